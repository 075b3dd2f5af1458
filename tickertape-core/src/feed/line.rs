//! Marquee text

use core::fmt::Write;

use heapless::String;

use crate::traits::{FetchError, Quote};

/// Capacity of the rendered line (eight full segments with room to spare)
pub const MAX_LINE_LEN: usize = 320;

/// Separator after every segment
const SEGMENT_GAP: &str = "   ";

/// Rendered ticker text, e.g. `"SPY 512.10 +0.42%   QQQ 438.02 -1.10%   "`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuoteLine {
    text: String<MAX_LINE_LEN>,
}

impl QuoteLine {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Append one `"<symbol> <price> <+|-><percent>%   "` segment
    ///
    /// Price and percent carry exactly two fractional digits. The percent is
    /// signed `+` when non-negative (negative zero included).
    pub fn push_segment(&mut self, symbol: &str, quote: &Quote) -> Result<(), FetchError> {
        let change = quote.change_percent;
        let sign = if change.is_sign_negative() && change != 0.0 {
            '-'
        } else {
            '+'
        };

        write!(
            self.text,
            "{} {:.2} {}{:.2}%{}",
            symbol,
            quote.price,
            sign,
            change.abs(),
            SEGMENT_GAP
        )
        .map_err(|_| FetchError::LineOverflow)
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of characters (one glyph cell each)
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quote(price: f32, change_percent: f32) -> Quote {
        Quote {
            price,
            change_percent,
        }
    }

    #[test]
    fn test_segment_format() {
        let mut line = QuoteLine::new();
        line.push_segment("AAA", &quote(12.345, 1.2)).unwrap();
        assert_eq!(line.as_str(), "AAA 12.35 +1.20%   ");
    }

    #[test]
    fn test_negative_change() {
        let mut line = QuoteLine::new();
        line.push_segment("VIX", &quote(14.0, -3.456)).unwrap();
        assert_eq!(line.as_str(), "VIX 14.00 -3.46%   ");
    }

    #[test]
    fn test_zero_change_is_positive() {
        let mut line = QuoteLine::new();
        line.push_segment("SPY", &quote(500.0, 0.0)).unwrap();
        line.push_segment("QQQ", &quote(400.0, -0.0)).unwrap();
        assert_eq!(line.as_str(), "SPY 500.00 +0.00%   QQQ 400.00 +0.00%   ");
    }

    #[test]
    fn test_overflow() {
        let mut line = QuoteLine::new();
        let mut result = Ok(());
        for _ in 0..40 {
            result = line.push_segment("NVDA", &quote(123456.78, 12.5));
            if result.is_err() {
                break;
            }
        }
        assert_eq!(result, Err(FetchError::LineOverflow));
    }

    proptest! {
        #[test]
        fn prop_segment_shape(
            price in 0.0f32..100_000.0,
            change in -100.0f32..100.0,
        ) {
            let mut line = QuoteLine::new();
            line.push_segment("SYM", &quote(price, change)).unwrap();
            let text = line.as_str();

            prop_assert!(text.starts_with("SYM "));
            prop_assert!(text.ends_with("%   "));

            let mut parts = text.trim_end().split(' ');
            prop_assert_eq!(parts.next(), Some("SYM"));

            let price_text = parts.next().unwrap();
            prop_assert_eq!(price_text.split('.').nth(1).map(str::len), Some(2));

            let pct_text = parts.next().unwrap();
            let sign = pct_text.chars().next().unwrap();
            prop_assert!(sign == '+' || sign == '-');
            prop_assert_eq!(sign == '-', change < 0.0);
            let digits = pct_text.trim_start_matches(['+', '-']).trim_end_matches('%');
            prop_assert_eq!(digits.split('.').nth(1).map(str::len), Some(2));
        }
    }
}
