//! Main controller
//!
//! Each [`AppController::tick`]:
//! 1. samples the speed button
//! 2. in fallback mode, rescans when due and shows the network list
//! 3. otherwise reconnects if the link dropped, or refreshes quotes when due
//! 4. redraws the status bar and marquee
//!
//! and returns how long to sleep before the next tick.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::TickerConfig;
use crate::display::{DisplayPresenter, RenderCursor, StatusBar};
use crate::feed::QuoteFeed;
use crate::input::{EdgeGate, InputController, SpeedIndex};
use crate::net::{JoinOutcome, NetworkLink, ScanResult};
use crate::state::{ConnectivityState, LinkEvent};
use crate::traits::{Clock, LinkStatus, NetworkInterface, QuoteSource, Surface};

use super::Diagnostics;

/// Cooperative control loop state
pub struct AppController<N, Q, S, B, C, D> {
    config: TickerConfig,
    link: NetworkLink<N>,
    feed: QuoteFeed<Q>,
    input: InputController<B>,
    presenter: DisplayPresenter<S>,
    clock: C,
    delay: D,
    state: ConnectivityState,
    /// Time of the last fetch attempt
    last_fetch: Option<u64>,
    /// Time of the last scan
    last_scan: Option<u64>,
    edge_gate: EdgeGate,
    speed: SpeedIndex,
    /// Set when the link was found down, cleared on the next good join
    link_lost: bool,
    cursor: RenderCursor,
    scan: ScanResult,
    diagnostics: Diagnostics,
}

impl<N, Q, S, B, C, D> AppController<N, Q, S, B, C, D>
where
    N: NetworkInterface,
    Q: QuoteSource,
    S: Surface,
    B: InputPin,
    C: Clock,
    D: DelayNs,
{
    /// Assemble the controller from its collaborators
    pub fn new(
        config: TickerConfig,
        iface: N,
        source: Q,
        surface: S,
        button: B,
        clock: C,
        delay: D,
    ) -> Self {
        let presenter = DisplayPresenter::new(surface);
        let cursor = RenderCursor::new(presenter.width());

        Self {
            link: NetworkLink::new(iface, &config.wifi),
            feed: QuoteFeed::new(
                source,
                config.feed.throttle_ms,
                config.feed.request_timeout_ms,
            ),
            input: InputController::new(button, &config.ui),
            edge_gate: EdgeGate::new(config.ui.retrigger_ms),
            presenter,
            clock,
            delay,
            state: ConnectivityState::default(),
            last_fetch: None,
            last_scan: None,
            speed: SpeedIndex::new(),
            link_lost: false,
            cursor,
            scan: ScanResult::new(),
            diagnostics: Diagnostics::default(),
            config,
        }
    }

    /// Boot sequence: one join, one fetch if it worked, then the status bar
    pub async fn start(&mut self) {
        info!("ticker starting, {} symbols", self.config.feed.symbols.len());
        self.connect().await;

        if self.state.can_fetch() {
            let now = self.clock.now_ms();
            self.fetch(now).await;
        }
        self.draw_status_bar().await;
    }

    /// Run one scheduler step and return the sleep before the next (ms)
    pub async fn tick(&mut self) -> u32 {
        let now = self.clock.now_ms();

        if self.input.poll_edge(&mut self.delay).await && self.edge_gate.accept(now) {
            self.input.cycle_speed(&mut self.speed);
        }

        if self.state.shows_scan_list() {
            if self.scan_due(now) {
                self.rescan(now).await;
            }
            return self.draw_scan_view().await;
        }

        if !self.link.is_up() {
            if !self.link_lost {
                warn!("wifi: link down, reconnecting");
            }
            self.link_lost = true;
            self.state = self.state.transition(LinkEvent::LinkLost);
            self.connect().await;

            if self.state.shows_scan_list() {
                return self.draw_scan_view().await;
            }
        } else {
            if self.state == ConnectivityState::Disconnected {
                self.adopt_late_join().await;
            }
            if self.state.can_fetch() && self.fetch_due(now) {
                self.fetch(now).await;
            }
        }

        self.draw_status_bar().await;
        let market_open = self.feed.market_open();
        self.presenter
            .draw_marquee(self.feed.line().as_str(), &mut self.cursor, market_open)
            .await;

        self.speed.frame_delay_ms(&self.config.ui.frame_delays_ms)
    }

    /// Start, then tick forever
    pub async fn run(mut self) -> ! {
        self.start().await;
        loop {
            let sleep_ms = self.tick().await;
            self.delay.delay_ms(sleep_ms).await;
        }
    }

    /// Join and apply the outcome to the connectivity state
    async fn connect(&mut self) {
        let outcome = self
            .link
            .connect(self.config.wifi.connect_timeout_ms, &self.clock, &mut self.delay)
            .await;
        self.diagnostics.last_link_code = self.link.last_code();
        self.state = self.state.transition(outcome.event());

        match outcome {
            JoinOutcome::Joined => {
                self.link_lost = false;
                self.presenter.clear().await;
            }
            JoinOutcome::NoMatchingNetwork => {
                info!("wifi: entering scan fallback");
                let now = self.clock.now_ms();
                self.rescan(now).await;
            }
            JoinOutcome::OtherFailure(_) => {}
        }
    }

    /// The link came up after `connect` had already given up on it
    async fn adopt_late_join(&mut self) {
        info!("wifi: link came up after the join timed out");
        self.diagnostics.last_link_code = LinkStatus::Up.code();
        self.state = self.state.transition(LinkEvent::Joined);
        self.link_lost = false;
        self.presenter.clear().await;
    }

    async fn fetch(&mut self, now: u64) {
        self.last_fetch = Some(now);
        match self
            .feed
            .fetch_all(self.config.feed.symbols.as_slice(), &mut self.delay)
            .await
        {
            Ok(()) => {
                self.diagnostics.data_ok = true;
                self.cursor.reset(self.presenter.width());
            }
            Err(e) => {
                warn!("feed: fetch failed: {:?}", e);
                self.diagnostics.data_ok = false;
            }
        }
    }

    async fn rescan(&mut self, now: u64) {
        self.presenter.draw_scanning().await;
        self.scan = self.link.scan(&self.config.scan, &mut self.delay).await;
        self.last_scan = Some(now);
    }

    fn fetch_due(&self, now: u64) -> bool {
        self.last_fetch.map_or(true, |last| {
            now.saturating_sub(last) >= self.config.feed.fetch_interval_ms as u64
        })
    }

    fn scan_due(&self, now: u64) -> bool {
        self.last_scan.map_or(true, |last| {
            now.saturating_sub(last) >= self.config.scan.rescan_interval_ms as u64
        })
    }

    async fn draw_scan_view(&mut self) -> u32 {
        self.draw_status_bar().await;
        self.presenter.draw_scan_list(&self.scan).await;
        self.config.ui.fallback_frame_ms
    }

    async fn draw_status_bar(&mut self) {
        let link_up = self.state == ConnectivityState::Connected;
        let status = StatusBar {
            address: if link_up {
                self.link.current_address()
            } else {
                None
            },
            link_up,
            link_code: self.diagnostics.last_link_code,
            data_ok: self.diagnostics.data_ok,
        };
        self.presenter.draw_status_bar(&status).await;
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn speed(&self) -> SpeedIndex {
        self.speed
    }

    pub fn link_lost(&self) -> bool {
        self.link_lost
    }
}
