//! The parsing boundary for rendered text.
//!
//! Every regex and currency/quantity format assumption in the crate lives
//! here, so a change to how the store renders numbers is a single-module
//! change. Business invariants elsewhere work on the typed values these
//! helpers return, never on raw strings.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Currency symbol the store renders in front of every price
pub const CURRENCY_SYMBOL: &str = "€";

/// A price in integer cents.
///
/// Totals and subtotals are compared exactly at 2 decimal places, so the
/// representation avoids floats entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    cents: u64,
}

impl Money {
    /// Create a price from integer cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Get the raw cent count
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// Multiply by a line quantity
    #[must_use]
    pub const fn times(&self, quantity: u32) -> Self {
        Self {
            cents: self.cents * quantity as u64,
        }
    }

    /// Add another price (total aggregation)
    #[must_use]
    pub const fn plus(&self, other: Self) -> Self {
        Self {
            cents: self.cents + other.cents,
        }
    }

    /// Parse a plain decimal like `"9999.99"` or `"50"` (fixture form values).
    ///
    /// Accepts at most 2 fraction digits; `"50"` means 50 euros even.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (major, minor) = match text.split_once('.') {
            Some((maj, min)) => (maj, min),
            None => (text, ""),
        };
        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let major: u64 = major.parse().ok()?;
        let minor: u64 = if minor.is_empty() {
            0
        } else if minor.len() == 1 {
            minor.parse::<u64>().ok()? * 10
        } else {
            minor.parse().ok()?
        };
        Some(Self::from_cents(major * 100 + minor))
    }

    /// Render without the currency symbol, always 2 fraction digits
    #[must_use]
    pub fn plain(&self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{}", self.plain())
    }
}

/// Parse the leading integer of a rendered quantity badge (`"0 in stock"` → 0).
///
/// The badge renders as a bare non-negative integer with no sign or locale
/// grouping; a leading `-` or thousands separator would make this return
/// `None` rather than a wrong value.
#[must_use]
pub fn leading_int(text: &str) -> Option<u32> {
    let digits: String = text.trim_start().chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Cheap zero-quantity screen: does the badge text start with `"0"`?
///
/// Used by the out-of-stock scan to skip non-candidates before reading the
/// action control. Rows whose quantity is `"0"` pass; `"10"` starts with
/// `"1"` and is skipped.
#[must_use]
pub fn starts_with_zero(text: &str) -> bool {
    text.trim_start().starts_with('0') && leading_int(text) == Some(0)
}

/// Extract the line quantity from text shaped like `"2 x"`.
#[must_use]
pub fn quantity_token(text: &str) -> Option<u32> {
    let re = Regex::new(r"(\d+)\s*x").unwrap();
    let caps = re.captures(text)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Extract the **last** currency-shaped token (`"€49.99"`) from a row.
///
/// A cart row may render the unit price before the subtotal; the subtotal
/// is always the final currency token in the row text.
#[must_use]
pub fn last_currency_token(text: &str) -> Option<Money> {
    let re = Regex::new(&format!(r"{CURRENCY_SYMBOL}(\d+)\.(\d{{2}})")).unwrap();
    let caps = re.captures_iter(text).last()?;
    let major: u64 = caps.get(1)?.as_str().parse().ok()?;
    let minor: u64 = caps.get(2)?.as_str().parse().ok()?;
    Some(Money::from_cents(major * 100 + minor))
}

/// Does the text contain any currency-shaped token at all?
#[must_use]
pub fn contains_currency(text: &str) -> bool {
    let re = Regex::new(&format!(r"{CURRENCY_SYMBOL}\d+(\.\d+)?")).unwrap();
    re.is_match(text)
}

/// Does the text contain an order-style date line (`"Date: 8/8/2026"`)?
#[must_use]
pub fn contains_order_date(text: &str) -> bool {
    let re = Regex::new(r"Date: \d{1,2}/\d{1,2}/\d{4}").unwrap();
    re.is_match(text)
}
