//! The engine start panel: two master switches and the ignition mode
//! selector, read as one packed byte from the panel's input bus.

use log::debug;

use crate::error::Result;
use crate::input::InputBus;
use crate::protocol::SerialProtocol;

pub const ENGINE1_MASTER_LVAR: &str = "AB_PDS_Eng1Master";
pub const ENGINE2_MASTER_LVAR: &str = "AB_PDS_Eng2Master";
pub const IGNITION_LVAR: &str = "AB_PDS_ignition";

fn master_one(byte: u8) -> i64 {
    (byte & 0x01) as i64
}

fn master_two(byte: u8) -> i64 {
    ((byte & 0x02) >> 1) as i64
}

/// The ignition selector occupies two bits, one-hot biased so CRANK,
/// NORM, and IGN/START read as -1, 0, and 1.
fn ignition(byte: u8) -> i64 {
    ((byte & 0x0C) >> 2) as i64 - 1
}

/// Mirrors the engine panel's switch byte into sim variables.
///
/// The first byte read publishes every field; afterwards only fields
/// that changed since the previous byte are written.
pub struct EnginePanel {
    bus: Box<dyn InputBus>,
    last: Option<u8>,
}

impl EnginePanel {
    pub fn new(bus: Box<dyn InputBus>) -> Self {
        Self { bus, last: None }
    }

    /// Run one control cycle: read the bus if it has fresh data and
    /// publish whichever switches moved.
    pub fn cycle(&mut self, proto: &mut SerialProtocol) -> Result<()> {
        if !self.bus.data_ready() {
            return Ok(());
        }
        let byte = self.bus.read_byte();
        debug!("engine switch byte: {byte:#04x}");

        if self.changed(byte, master_one) {
            proto.write_lvar(ENGINE1_MASTER_LVAR, master_one(byte))?;
        }
        if self.changed(byte, master_two) {
            proto.write_lvar(ENGINE2_MASTER_LVAR, master_two(byte))?;
        }
        if self.changed(byte, ignition) {
            proto.write_lvar(IGNITION_LVAR, ignition(byte))?;
        }

        self.last = Some(byte);
        Ok(())
    }

    fn changed(&self, byte: u8, field: fn(u8) -> i64) -> bool {
        match self.last {
            None => true,
            Some(last) => field(byte) != field(last),
        }
    }
}
