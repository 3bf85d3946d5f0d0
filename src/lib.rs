pub mod bcd;
pub mod channel;
pub mod command;
pub mod display;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod panel;
pub mod protocol;
pub mod ranged;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use command::{Command, OffsetWidth};
pub use error::{OacspError, Result};
pub use event::Event;
pub use panel::RadioPanel;
pub use protocol::SerialProtocol;
pub use ranged::RangedValue;
