/// Longest LVar name retained from an inbound event; longer names are
/// silently cut at this length.
pub const MAX_NAME_LEN: usize = 64;

/// A typed event received from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A named simulation variable changed.
    LvarUpdate { name: String, value: i64 },
    /// A sim memory offset changed.
    OffsetUpdate { address: u16, value: i64 },
}

impl Event {
    /// Parse one wire line into an event.
    ///
    /// Recognized forms:
    ///
    /// ```text
    /// EVENT_LVAR <name> <decimal value>
    /// EVENT_OFFSET <hex address> <decimal value>
    /// ```
    ///
    /// Anything else — unknown prefix, missing separator, unparseable
    /// numeric field — yields `None`. Parse failure is silent and
    /// non-fatal; a garbled line simply produces no event.
    pub fn parse_line(line: &str) -> Option<Event> {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("EVENT_LVAR") {
            let (name, value) = rest.trim().split_once(' ')?;
            let value = value.trim().parse::<i64>().ok()?;
            Some(Event::LvarUpdate {
                name: truncate_name(name),
                value,
            })
        } else if let Some(rest) = line.strip_prefix("EVENT_OFFSET") {
            let (address, value) = rest.trim().split_once(' ')?;
            let address = u16::from_str_radix(address, 16).ok()?;
            let value = value.trim().parse::<i64>().ok()?;
            Some(Event::OffsetUpdate { address, value })
        } else {
            None
        }
    }
}

fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}
