//! Shared fakes for the channel, panel, and protocol tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::display::{DisplayMode, DisplaySink, DisplayUnit};
use crate::input::{InputBus, InputLine, KeyScanner};
use crate::transport::Transport;

#[derive(Default)]
struct TransportInner {
    ready: bool,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

/// An in-memory transport; the paired [`TransportHandle`] scripts inbound
/// bytes and inspects outbound ones.
pub struct MockTransport {
    inner: Arc<Mutex<TransportInner>>,
}

#[derive(Clone)]
pub struct TransportHandle {
    inner: Arc<Mutex<TransportInner>>,
}

impl MockTransport {
    pub fn new() -> (Self, TransportHandle) {
        let inner = Arc::new(Mutex::new(TransportInner {
            ready: true,
            ..TransportInner::default()
        }));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            TransportHandle { inner },
        )
    }
}

impl TransportHandle {
    pub fn push_rx(&self, text: &str) {
        self.inner.lock().unwrap().rx.extend(text.bytes());
    }

    /// Everything written so far, as text.
    pub fn sent_text(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().tx.clone()).unwrap()
    }

    /// Drop the outbound capture, keeping further writes.
    pub fn clear_sent(&self) {
        self.inner.lock().unwrap().tx.clear();
    }
}

impl Transport for MockTransport {
    fn ready(&mut self) -> bool {
        self.inner.lock().unwrap().ready
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.inner.lock().unwrap().rx.pop_front())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.lock().unwrap().tx.extend_from_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One operation issued to a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOp {
    Mode(DisplayUnit, DisplayMode),
    Digits(DisplayUnit, [u8; 6]),
    Indicators(u16),
    PowerOn(DisplayUnit),
    PowerOff(DisplayUnit),
}

/// A display sink that records every call for inspection.
pub struct RecordingSink {
    ops: Rc<RefCell<Vec<SinkOp>>>,
}

#[derive(Clone)]
pub struct SinkHandle {
    ops: Rc<RefCell<Vec<SinkOp>>>,
}

impl RecordingSink {
    pub fn new() -> (Self, SinkHandle) {
        let ops = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                ops: Rc::clone(&ops),
            },
            SinkHandle { ops },
        )
    }
}

impl SinkHandle {
    pub fn ops(&self) -> Vec<SinkOp> {
        self.ops.borrow().clone()
    }

    pub fn clear(&self) {
        self.ops.borrow_mut().clear();
    }

    /// The digit pattern most recently written to `unit`.
    pub fn last_digits(&self, unit: DisplayUnit) -> Option<[u8; 6]> {
        self.ops
            .borrow()
            .iter()
            .rev()
            .find_map(|op| match op {
                SinkOp::Digits(u, digits) if *u == unit => Some(*digits),
                _ => None,
            })
    }

    /// The indicator word most recently written.
    pub fn last_indicators(&self) -> Option<u16> {
        self.ops.borrow().iter().rev().find_map(|op| match op {
            SinkOp::Indicators(bits) => Some(*bits),
            _ => None,
        })
    }
}

impl DisplaySink for RecordingSink {
    fn set_mode(&mut self, unit: DisplayUnit, mode: DisplayMode) {
        self.ops.borrow_mut().push(SinkOp::Mode(unit, mode));
    }

    fn write_digits(&mut self, unit: DisplayUnit, digits: &[u8; 6]) {
        self.ops.borrow_mut().push(SinkOp::Digits(unit, *digits));
    }

    fn write_indicators(&mut self, bits: u16) {
        self.ops.borrow_mut().push(SinkOp::Indicators(bits));
    }

    fn power_on(&mut self, unit: DisplayUnit) {
        self.ops.borrow_mut().push(SinkOp::PowerOn(unit));
    }

    fn power_off(&mut self, unit: DisplayUnit) {
        self.ops.borrow_mut().push(SinkOp::PowerOff(unit));
    }
}

/// An input line replaying a fixed level sequence, holding its last level
/// once the script runs out.
pub struct ScriptedLine {
    levels: VecDeque<bool>,
    last: bool,
}

impl ScriptedLine {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
            last: false,
        }
    }

    /// A line pinned at one level.
    pub fn held(level: bool) -> Self {
        Self {
            levels: VecDeque::new(),
            last: level,
        }
    }
}

impl InputLine for ScriptedLine {
    fn is_high(&mut self) -> bool {
        if let Some(level) = self.levels.pop_front() {
            self.last = level;
        }
        self.last
    }
}

/// A keypad scanner replaying a fixed key sequence, one key per cycle.
pub struct ScriptedKeys {
    keys: VecDeque<u8>,
}

impl ScriptedKeys {
    pub fn new(keys: &[u8]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
        }
    }
}

impl KeyScanner for ScriptedKeys {
    fn poll_key(&mut self) -> Option<u8> {
        self.keys.pop_front()
    }
}

/// An input bus replaying a fixed byte sequence, one byte per ready poll.
pub struct ScriptedBus {
    bytes: VecDeque<u8>,
}

impl ScriptedBus {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }
}

impl InputBus for ScriptedBus {
    fn data_ready(&mut self) -> bool {
        !self.bytes.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.bytes.pop_front().unwrap_or(0)
    }
}
