use std::io;

pub mod serial;

/// A byte-oriented link to the host.
///
/// Reads are non-blocking: `read_byte` returns immediately with `None`
/// when nothing has arrived, so a single control cycle can interleave
/// protocol decoding with the rest of the panel work.
pub trait Transport: Send {
    /// Whether the link is established and ready to carry traffic.
    fn ready(&mut self) -> bool;

    /// Fetch the next received byte, or `None` if none is buffered.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Write all bytes to the link.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Flush any buffered output.
    fn flush(&mut self) -> io::Result<()>;
}
