//! Speed button
//!
//! One push button cycles the marquee through a fixed set of speeds.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::{UiConfig, SPEED_STEPS};

/// Index into the frame delay table, 0 being the slowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedIndex(u8);

impl SpeedIndex {
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn value(&self) -> usize {
        self.0 as usize
    }

    /// Next speed, wrapping back to the slowest after the last step
    pub fn next(self) -> Self {
        Self(((self.0 as usize + 1) % SPEED_STEPS) as u8)
    }

    /// Tick sleep for this speed
    pub fn frame_delay_ms(&self, table: &[u16; SPEED_STEPS]) -> u32 {
        table[self.value()] as u32
    }
}

/// Re-trigger guard for accepted presses
///
/// A press is accepted only if the previous accepted press is at least
/// `window_ms` old. The first press is accepted whenever it comes, even
/// right after boot.
#[derive(Debug, Clone, Copy)]
pub struct EdgeGate {
    last_accepted: Option<u64>,
    window_ms: u32,
}

impl EdgeGate {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            last_accepted: None,
            window_ms,
        }
    }

    /// Accept or reject a press seen at `now_ms`
    pub fn accept(&mut self, now_ms: u64) -> bool {
        let open = match self.last_accepted {
            Some(last) => now_ms.saturating_sub(last) >= self.window_ms as u64,
            None => true,
        };
        if open {
            self.last_accepted = Some(now_ms);
        }
        open
    }
}

/// Debounced push button
pub struct InputController<B> {
    button: B,
    active_low: bool,
    debounce_ms: u32,
}

impl<B: InputPin> InputController<B> {
    pub fn new(button: B, ui: &UiConfig) -> Self {
        Self {
            button,
            active_low: ui.button_active_low,
            debounce_ms: ui.debounce_ms,
        }
    }

    fn pressed(&mut self) -> bool {
        let level = if self.active_low {
            self.button.is_low()
        } else {
            self.button.is_high()
        };
        // A pin that cannot be read counts as released
        level.unwrap_or(false)
    }

    /// Sample the button
    ///
    /// Returns true only if it reads pressed twice, `debounce_ms` apart.
    /// Sleeps only when the first sample is pressed.
    pub async fn poll_edge<D: DelayNs>(&mut self, delay: &mut D) -> bool {
        if !self.pressed() {
            return false;
        }
        delay.delay_ms(self.debounce_ms).await;
        self.pressed()
    }

    /// Advance to the next speed
    pub fn cycle_speed(&mut self, speed: &mut SpeedIndex) {
        *speed = speed.next();
        info!("speed step {}", speed.value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{manual_time, FakeButton};
    use embassy_futures::block_on;
    use proptest::prelude::*;

    #[test]
    fn test_speed_wraps() {
        let mut speed = SpeedIndex::new();
        let table = [40, 30, 20, 12, 6];
        let mut seen = [0u32; 6];
        for slot in seen.iter_mut() {
            *slot = speed.frame_delay_ms(&table);
            speed = speed.next();
        }
        assert_eq!(seen, [40, 30, 20, 12, 6, 40]);
    }

    #[test]
    fn test_poll_edge_confirms_press() {
        let button = FakeButton::new();
        let (_clock, mut delay) = manual_time(0);
        let mut input = InputController::new(button.clone(), &UiConfig::default());

        button.press();
        assert!(block_on(input.poll_edge(&mut delay)));
        assert_eq!(delay.sleeps(), [5]);
    }

    #[test]
    fn test_poll_edge_rejects_bounce() {
        let button = FakeButton::new();
        let (_clock, mut delay) = manual_time(0);
        let mut input = InputController::new(button.clone(), &UiConfig::default());

        button.queue_low(&[true, false]);
        assert!(!block_on(input.poll_edge(&mut delay)));

        // Released: a single read, no sleep
        assert!(!block_on(input.poll_edge(&mut delay)));
        assert_eq!(button.reads(), 3);
        assert_eq!(delay.sleeps(), [5]);
    }

    #[test]
    fn test_active_high_button() {
        let button = FakeButton::new();
        let (_clock, mut delay) = manual_time(0);
        let ui = UiConfig {
            button_active_low: false,
            ..UiConfig::default()
        };
        let mut input = InputController::new(button.clone(), &ui);

        // Empty script reads high, which is pressed here
        assert!(block_on(input.poll_edge(&mut delay)));
    }

    #[test]
    fn test_cycle_speed() {
        let mut input = InputController::new(FakeButton::new(), &UiConfig::default());
        let mut speed = SpeedIndex::new();
        for _ in 0..SPEED_STEPS {
            input.cycle_speed(&mut speed);
        }
        assert_eq!(speed, SpeedIndex::new());
    }

    #[test]
    fn test_edge_gate() {
        let mut gate = EdgeGate::new(250);
        assert!(gate.accept(100));
        assert!(!gate.accept(349));
        assert!(gate.accept(350));
    }

    proptest! {
        #[test]
        fn prop_gate_spacing(gaps in proptest::collection::vec(0u64..600, 1..50)) {
            let mut gate = EdgeGate::new(250);
            let mut now = 0u64;
            let mut accepted: Vec<u64> = Vec::new();

            for gap in gaps {
                now += gap;
                if gate.accept(now) {
                    accepted.push(now);
                }
            }

            for pair in accepted.windows(2) {
                prop_assert!(pair[1] - pair[0] >= 250);
            }
        }
    }
}
