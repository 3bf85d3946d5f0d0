use std::fmt::Write as _;

/// Wire protocol version, sent in the `BEGIN` line as bare hex.
pub const PROTOCOL_VERSION: u8 = 0x01;

/// Wire width code for an offset access.
///
/// Encodes signedness and width of the value at a sim memory offset:
/// unsigned/signed byte, word, and double word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetWidth {
    U8,
    S8,
    U16,
    S16,
    U32,
    S32,
}

impl OffsetWidth {
    /// Two-letter wire code as it appears after the offset address.
    pub fn code(self) -> &'static str {
        match self {
            OffsetWidth::U8 => "UB",
            OffsetWidth::S8 => "SB",
            OffsetWidth::U16 => "UW",
            OffsetWidth::S16 => "SW",
            OffsetWidth::U32 => "UD",
            OffsetWidth::S32 => "SD",
        }
    }
}

/// An outbound command for the host.
///
/// Every command renders to exactly one newline-terminated ASCII line
/// with space-separated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the session, announcing the protocol version and client name.
    Begin { client: String },
    /// Close the session.
    End,
    /// Write a named simulation variable.
    WriteLvar { name: String, value: i64 },
    /// Write a sim memory offset.
    WriteOffset {
        address: u16,
        width: OffsetWidth,
        value: i64,
    },
    /// Subscribe to changes of a named simulation variable.
    ObserveLvar { name: String },
    /// Subscribe to changes of a sim memory offset.
    ObserveOffset { address: u16, width: OffsetWidth },
}

impl Command {
    /// Render this command to its wire line, including the terminator.
    ///
    /// Offset addresses print as uppercase hex without leading zeros,
    /// values as signed decimal.
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        match self {
            Command::Begin { client } => {
                let _ = write!(line, "BEGIN {PROTOCOL_VERSION:X} {client}");
            }
            Command::End => line.push_str("END"),
            Command::WriteLvar { name, value } => {
                let _ = write!(line, "WRITE_LVAR {name} {value}");
            }
            Command::WriteOffset {
                address,
                width,
                value,
            } => {
                let _ = write!(line, "WRITE_OFFSET {address:X}:{} {value}", width.code());
            }
            Command::ObserveLvar { name } => {
                let _ = write!(line, "OBS_LVAR {name}");
            }
            Command::ObserveOffset { address, width } => {
                let _ = write!(line, "OBS_OFFSET {address:X}:{}", width.code());
            }
        }
        line.push('\n');
        line
    }
}
