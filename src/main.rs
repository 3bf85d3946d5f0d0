use std::process;
use std::thread;
use std::time::Duration;

use log::info;

use oacsp::bcd;
use oacsp::command::OffsetWidth;
use oacsp::engine::{ENGINE1_MASTER_LVAR, ENGINE2_MASTER_LVAR, IGNITION_LVAR};
use oacsp::event::Event;
use oacsp::panel::{
    COM1_ACTIVE_OFFSET, COM1_STANDBY_OFFSET, COM2_ACTIVE_OFFSET, COM2_STANDBY_OFFSET,
};
use oacsp::transport::serial::{self, DEFAULT_BAUD_RATE};
use oacsp::{Result, SerialProtocol};

/// Link monitor: opens an OACSP session on a serial port, subscribes to
/// the pedestal's offsets and variables, and logs every inbound event.
/// Useful for checking the wiring and the host connector without a panel
/// attached.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(port_name) = std::env::args().nth(1) else {
        eprintln!("usage: oacsp <serial-port>");
        eprintln!();
        match serial::list_ports() {
            Ok(ports) if !ports.is_empty() => {
                eprintln!("Available ports:");
                for port in ports {
                    eprintln!("  {port}");
                }
            }
            _ => eprintln!("No serial ports detected."),
        }
        process::exit(2);
    };

    if let Err(e) = run(&port_name) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(port_name: &str) -> Result<()> {
    let transport = serial::open_port(port_name, DEFAULT_BAUD_RATE)?;
    let mut proto = SerialProtocol::new(Box::new(transport));

    proto.begin("oacsp-monitor")?;
    info!("session opened on {port_name}");

    for address in [
        COM1_ACTIVE_OFFSET,
        COM1_STANDBY_OFFSET,
        COM2_ACTIVE_OFFSET,
        COM2_STANDBY_OFFSET,
    ] {
        proto.observe_offset(address, OffsetWidth::U16)?;
    }
    for name in [ENGINE1_MASTER_LVAR, ENGINE2_MASTER_LVAR, IGNITION_LVAR] {
        proto.observe_lvar(name)?;
    }

    loop {
        match proto.poll_event()? {
            Some(Event::LvarUpdate { name, value }) => {
                info!("lvar {name} = {value}");
            }
            Some(Event::OffsetUpdate { address, value }) => {
                let freq = bcd::freq_from_bcd(*value as u16);
                info!("offset {address:#06X} = {value} ({freq} kHz)");
            }
            None => thread::sleep(Duration::from_millis(10)),
        }
    }
}
