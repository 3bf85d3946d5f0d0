use std::io;
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{OacspError, Result};

use super::Transport;

/// Default OACSP link speed.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Serial settings for the link (8N1).
const DATA_BITS: serialport::DataBits = serialport::DataBits::Eight;
const STOP_BITS: serialport::StopBits = serialport::StopBits::One;
const PARITY: serialport::Parity = serialport::Parity::None;

/// A transport backed by a native serial port.
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    pub fn new(port: Box<dyn serialport::SerialPort>) -> Self {
        Self { port }
    }
}

impl Transport for SerialTransport {
    fn ready(&mut self) -> bool {
        // A successfully opened port is ready; there is no enumeration
        // delay to wait out on the host side of the link.
        true
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let available = self
            .port
            .bytes_to_read()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        if available == 0 {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match io::Read::read(&mut self.port, &mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::Write::write_all(&mut self.port, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut self.port)
    }
}

/// Open a serial port with OACSP link settings at the given baud rate.
pub fn open_port(port_name: &str, baud_rate: u32) -> Result<SerialTransport> {
    let port = serialport::new(port_name, baud_rate)
        .data_bits(DATA_BITS)
        .stop_bits(STOP_BITS)
        .parity(PARITY)
        .timeout(Duration::from_millis(100))
        .open()
        .map_err(OacspError::Serial)?;

    info!("opened {} at {} baud", port_name, baud_rate);
    Ok(SerialTransport::new(port))
}

/// List the serial ports visible on this machine.
///
/// Used by the monitor binary for troubleshooting when no port name was
/// given; logs what it finds.
pub fn list_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports().map_err(OacspError::Serial)?;

    if ports.is_empty() {
        warn!("no serial ports found");
    }
    for port in &ports {
        debug!("found port: {} ({:?})", port.port_name, port.port_type);
    }

    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
