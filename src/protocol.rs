use std::thread;
use std::time::Duration;

use log::{debug, trace};

use crate::command::{Command, OffsetWidth};
use crate::error::Result;
use crate::event::Event;
use crate::transport::Transport;

/// The OACSP session codec.
///
/// Owns the transport, renders outbound commands to wire lines, and
/// incrementally decodes inbound lines into typed events. At most one
/// pending event is held between polls; it is a register, not a queue —
/// if the caller does not drain it before the next line completes, the
/// newer event overwrites the older one.
pub struct SerialProtocol {
    transport: Box<dyn Transport>,
    line: String,
    pending: Option<Event>,
}

impl SerialProtocol {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            line: String::with_capacity(128),
            pending: None,
        }
    }

    /// Open the session.
    ///
    /// Blocks until the transport reports ready, then emits the `BEGIN`
    /// line. This is the one deliberately blocking call in the crate:
    /// nothing else on the link is meaningful before the session opens,
    /// and there is no timeout.
    pub fn begin(&mut self, client: &str) -> Result<()> {
        while !self.transport.ready() {
            thread::sleep(Duration::from_millis(10));
        }
        self.send(&Command::Begin {
            client: client.to_string(),
        })
    }

    /// Close the session.
    pub fn end(&mut self) -> Result<()> {
        self.send(&Command::End)
    }

    /// Write a named simulation variable on the host.
    pub fn write_lvar(&mut self, name: &str, value: i64) -> Result<()> {
        self.send(&Command::WriteLvar {
            name: name.to_string(),
            value,
        })
    }

    /// Write a sim memory offset on the host.
    pub fn write_offset(&mut self, address: u16, width: OffsetWidth, value: i64) -> Result<()> {
        self.send(&Command::WriteOffset {
            address,
            width,
            value,
        })
    }

    /// Subscribe to changes of a named simulation variable.
    pub fn observe_lvar(&mut self, name: &str) -> Result<()> {
        self.send(&Command::ObserveLvar {
            name: name.to_string(),
        })
    }

    /// Subscribe to changes of a sim memory offset.
    pub fn observe_offset(&mut self, address: u16, width: OffsetWidth) -> Result<()> {
        self.send(&Command::ObserveOffset { address, width })
    }

    /// Render and transmit one command.
    pub fn send(&mut self, command: &Command) -> Result<()> {
        let line = command.to_line();
        trace!("TX: {}", line.trim_end());
        self.transport.write_all(line.as_bytes())?;
        self.transport.flush()?;
        Ok(())
    }

    /// Advance the inbound decoder and return the freshly pending event.
    ///
    /// Clears the pending slot, then drains buffered bytes into the line
    /// accumulator, stopping after the first complete line. A burst of
    /// several lines therefore surfaces one event per poll on consecutive
    /// polls; a partial line is carried until later polls complete it.
    /// Unrecognized or malformed lines are discarded without an event.
    pub fn poll_event(&mut self) -> Result<Option<&Event>> {
        self.pending = None;
        while let Some(byte) = self.transport.read_byte()? {
            let c = byte as char;
            self.line.push(c);
            if c == '\n' {
                self.pending = Event::parse_line(&self.line);
                if self.pending.is_none() {
                    debug!("ignoring line: {}", self.line.trim_end());
                } else {
                    trace!("RX: {}", self.line.trim_end());
                }
                self.line.clear();
                break;
            }
        }
        Ok(self.pending.as_ref())
    }

    /// The event left by the last `poll_event`, if any.
    pub fn event(&self) -> Option<&Event> {
        self.pending.as_ref()
    }

    /// The pending LVar update's value, if it matches `name` exactly.
    ///
    /// A non-matching query leaves the pending event in place.
    pub fn lvar_update(&self, name: &str) -> Option<i64> {
        match &self.pending {
            Some(Event::LvarUpdate { name: n, value }) if n == name => Some(*value),
            _ => None,
        }
    }

    /// The pending offset update's value, if it matches `address`.
    ///
    /// A non-matching query leaves the pending event in place.
    pub fn offset_update(&self, address: u16) -> Option<i64> {
        match &self.pending {
            Some(Event::OffsetUpdate { address: a, value }) if *a == address => Some(*value),
            _ => None,
        }
    }
}
