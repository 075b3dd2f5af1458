//! In-memory fakes for host tests
//!
//! Every fake hands out a cloneable handle to its state so a test can keep
//! scripting and inspecting it after the fake itself has been moved into the
//! component under test. Time only moves when a [`FakeDelay`] sleeps.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::convert::Infallible;
use std::net::Ipv4Addr;
use std::rc::Rc;
use std::string::{String as StdString, ToString};
use std::vec::Vec as StdVec;

use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::traits::{
    Clock, FetchError, Ink, LinkStatus, MarketStatus, NetworkInterface, Quote, QuoteSource,
    ScanEntry, ScanError, Surface, SurfaceError, TextSize,
};

/// Clock reading a shared millisecond counter
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Delay that advances the shared counter instead of waiting
#[derive(Clone)]
pub struct FakeDelay {
    now: Rc<Cell<u64>>,
    sleeps: Rc<RefCell<StdVec<u32>>>,
}

impl FakeDelay {
    /// Every millisecond sleep requested so far
    pub fn sleeps(&self) -> StdVec<u32> {
        self.sleeps.borrow().clone()
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.now.set(self.now.get() + (ns / 1_000_000) as u64);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        self.now.set(self.now.get() + ms as u64);
    }
}

/// Clock and delay sharing one counter, starting at `start_ms`
pub fn manual_time(start_ms: u64) -> (ManualClock, FakeDelay) {
    let now = Rc::new(Cell::new(start_ms));
    (
        ManualClock { now: now.clone() },
        FakeDelay {
            now,
            sleeps: Rc::new(RefCell::new(StdVec::new())),
        },
    )
}

/// Scripted radio state
pub struct NetState {
    /// Status reported once a join has started
    pub join_status: LinkStatus,
    /// Statuses returned by successive `status()` calls before settling
    pub status_script: VecDeque<LinkStatus>,
    pub status: LinkStatus,
    pub networks: StdVec<ScanEntry>,
    pub scan_fails: bool,
    pub address: Option<Ipv4Addr>,
    pub joins: u32,
    pub disconnects: u32,
    pub scans: u32,
    pub last_per_channel_ms: u16,
}

/// Network interface driven by a script
#[derive(Clone)]
pub struct ScriptedNetwork {
    pub state: Rc<RefCell<NetState>>,
}

impl ScriptedNetwork {
    /// Interface whose joins settle on `join_status`
    pub fn new(join_status: LinkStatus) -> Self {
        Self {
            state: Rc::new(RefCell::new(NetState {
                join_status,
                status_script: VecDeque::new(),
                status: LinkStatus::Idle,
                networks: StdVec::new(),
                scan_fails: false,
                address: Some(Ipv4Addr::new(192, 168, 1, 42)),
                joins: 0,
                disconnects: 0,
                scans: 0,
                last_per_channel_ms: 0,
            })),
        }
    }

    pub fn set_status(&self, status: LinkStatus) {
        self.state.borrow_mut().status = status;
    }

    pub fn set_join_status(&self, status: LinkStatus) {
        self.state.borrow_mut().join_status = status;
    }

    pub fn add_network(&self, ssid: &str, rssi_dbm: i16) {
        self.state
            .borrow_mut()
            .networks
            .push(ScanEntry::new(ssid, rssi_dbm));
    }

    pub fn joins(&self) -> u32 {
        self.state.borrow().joins
    }

    pub fn scans(&self) -> u32 {
        self.state.borrow().scans
    }

    pub fn disconnects(&self) -> u32 {
        self.state.borrow().disconnects
    }
}

impl NetworkInterface for ScriptedNetwork {
    async fn begin_join(&mut self, _ssid: &str, _passphrase: &str) {
        let mut state = self.state.borrow_mut();
        state.joins += 1;
        state.status = state.join_status;
    }

    fn status(&mut self) -> LinkStatus {
        let mut state = self.state.borrow_mut();
        if let Some(next) = state.status_script.pop_front() {
            state.status = next;
        }
        state.status
    }

    async fn disconnect(&mut self) {
        let mut state = self.state.borrow_mut();
        state.disconnects += 1;
        state.status = LinkStatus::Disconnected;
    }

    async fn scan<const N: usize>(
        &mut self,
        per_channel_ms: u16,
        out: &mut Vec<ScanEntry, N>,
    ) -> Result<(), ScanError> {
        let mut state = self.state.borrow_mut();
        state.scans += 1;
        state.last_per_channel_ms = per_channel_ms;
        if state.scan_fails {
            return Err(ScanError::Driver);
        }

        let mut found = state.networks.clone();
        found.sort_by(|a, b| b.rssi_dbm.cmp(&a.rssi_dbm));
        for entry in found {
            if out.push(entry).is_err() {
                break;
            }
        }
        Ok(())
    }

    fn current_address(&self) -> Option<Ipv4Addr> {
        let state = self.state.borrow();
        if state.status.is_up() {
            state.address
        } else {
            None
        }
    }
}

/// Scripted quote server state
pub struct QuoteState {
    pub default_quote: Result<Quote, FetchError>,
    pub quotes: HashMap<StdString, Result<Quote, FetchError>>,
    pub market: Result<MarketStatus, FetchError>,
    pub requested: StdVec<StdString>,
    pub market_queries: u32,
    /// Symbol whose lookup never completes
    pub stalled_symbol: Option<StdString>,
    pub market_stalled: bool,
}

/// Quote source answering from a table
#[derive(Clone)]
pub struct ScriptedQuotes {
    pub state: Rc<RefCell<QuoteState>>,
}

impl ScriptedQuotes {
    /// Source answering every symbol with `price` and `change_percent`
    pub fn new(price: f32, change_percent: f32) -> Self {
        Self {
            state: Rc::new(RefCell::new(QuoteState {
                default_quote: Ok(Quote {
                    price,
                    change_percent,
                }),
                quotes: HashMap::new(),
                market: Ok(MarketStatus::Open),
                requested: StdVec::new(),
                market_queries: 0,
                stalled_symbol: None,
                market_stalled: false,
            })),
        }
    }

    pub fn set_quote(&self, symbol: &str, quote: Result<Quote, FetchError>) {
        self.state
            .borrow_mut()
            .quotes
            .insert(symbol.to_string(), quote);
    }

    pub fn set_default(&self, quote: Result<Quote, FetchError>) {
        self.state.borrow_mut().default_quote = quote;
    }

    pub fn set_market(&self, market: Result<MarketStatus, FetchError>) {
        self.state.borrow_mut().market = market;
    }

    /// Leave lookups of `symbol` pending forever
    pub fn stall_symbol(&self, symbol: &str) {
        self.state.borrow_mut().stalled_symbol = Some(symbol.to_string());
    }

    /// Leave market status queries pending forever
    pub fn stall_market(&self) {
        self.state.borrow_mut().market_stalled = true;
    }

    pub fn requested(&self) -> StdVec<StdString> {
        self.state.borrow().requested.clone()
    }

    pub fn market_queries(&self) -> u32 {
        self.state.borrow().market_queries
    }
}

impl QuoteSource for ScriptedQuotes {
    async fn quote(&mut self, symbol: &str) -> Result<Quote, FetchError> {
        let stalled = {
            let mut state = self.state.borrow_mut();
            state.requested.push(symbol.to_string());
            state.stalled_symbol.as_deref() == Some(symbol)
        };
        if stalled {
            core::future::pending::<()>().await;
        }

        let state = self.state.borrow();
        state
            .quotes
            .get(symbol)
            .copied()
            .unwrap_or(state.default_quote)
    }

    async fn market_status(&mut self) -> Result<MarketStatus, FetchError> {
        let stalled = {
            let mut state = self.state.borrow_mut();
            state.market_queries += 1;
            state.market_stalled
        };
        if stalled {
            core::future::pending::<()>().await;
        }
        self.state.borrow().market
    }
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        ink: Ink,
    },
    Text {
        x: i32,
        y: i32,
        size: TextSize,
        text: StdString,
    },
    Present,
}

/// Recorded surface state
pub struct SurfaceLog {
    pub ops: StdVec<Op>,
    pub text_size: TextSize,
    pub fail_present: bool,
}

/// Surface that records calls instead of drawing
///
/// Character cells are 6x8 (small) and 12x16 (large), a 5x7 font at scale
/// one and two.
#[derive(Clone)]
pub struct RecordingSurface {
    pub log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(SurfaceLog {
                ops: StdVec::new(),
                text_size: TextSize::Small,
                fail_present: false,
            })),
        }
    }

    pub fn ops(&self) -> StdVec<Op> {
        self.log.borrow().ops.clone()
    }

    pub fn reset(&self) {
        self.log.borrow_mut().ops.clear();
    }

    pub fn presents(&self) -> usize {
        self.log
            .borrow()
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Present))
            .count()
    }

    /// Texts drawn, in order
    pub fn texts(&self) -> StdVec<StdString> {
        self.log
            .borrow()
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Lit rectangles drawn, in order
    pub fn lit_rects(&self) -> StdVec<(i32, i32, u16, u16)> {
        self.log
            .borrow()
            .ops
            .iter()
            .filter_map(|op| match *op {
                Op::Fill {
                    x,
                    y,
                    width,
                    height,
                    ink: Ink::On,
                } => Some((x, y, width, height)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u16, u16) {
        (128, 64)
    }

    fn glyph_size(&self, size: TextSize) -> (u16, u16) {
        match size {
            TextSize::Small => (6, 8),
            TextSize::Large => (12, 16),
        }
    }

    fn set_text_size(&mut self, size: TextSize) {
        self.log.borrow_mut().text_size = size;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, ink: Ink) {
        self.log.borrow_mut().ops.push(Op::Fill {
            x,
            y,
            width,
            height,
            ink,
        });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let mut log = self.log.borrow_mut();
        let size = log.text_size;
        log.ops.push(Op::Text {
            x,
            y,
            size,
            text: text.to_string(),
        });
    }

    async fn present(&mut self) -> Result<(), SurfaceError> {
        let mut log = self.log.borrow_mut();
        log.ops.push(Op::Present);
        if log.fail_present {
            Err(SurfaceError::Communication)
        } else {
            Ok(())
        }
    }
}

/// Push button replaying scripted pin levels
///
/// Each read consumes one level; an empty script reads high (released for
/// an active-low button).
#[derive(Clone)]
pub struct FakeButton {
    levels: Rc<RefCell<VecDeque<bool>>>,
    reads: Rc<Cell<u32>>,
}

impl FakeButton {
    pub fn new() -> Self {
        Self {
            levels: Rc::new(RefCell::new(VecDeque::new())),
            reads: Rc::new(Cell::new(0)),
        }
    }

    /// Queue pin levels, `true` meaning electrically low
    pub fn queue_low(&self, levels: &[bool]) {
        self.levels.borrow_mut().extend(levels.iter().copied());
    }

    /// Queue one confirmed press of an active-low button
    pub fn press(&self) {
        self.queue_low(&[true, true]);
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    fn next_low(&mut self) -> bool {
        self.reads.set(self.reads.get() + 1);
        self.levels.borrow_mut().pop_front().unwrap_or(false)
    }
}

impl ErrorType for FakeButton {
    type Error = Infallible;
}

impl InputPin for FakeButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.next_low())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.next_low())
    }
}
