//! Locator abstraction for addressing the rendered surface.
//!
//! Locators are strict and lazy: a [`Locator`] carries a [`Selector`] plus
//! options, and resolution happens at use-time against the live surface, so
//! a lookup tolerates re-renders between construction and assertion. Zero or
//! multiple matches surface as a lookup error at the point of use.

use std::time::Duration;

use crate::wait::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Selector for locating elements on the rendered surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Stable semantic identifier (`data-testid`)
    TestId(String),
    /// Any element whose semantic identifier starts with the prefix
    /// (per-row ids like `catalog-item-quantity-3`)
    TestIdPrefix(String),
    /// All list rows of the active page, in on-screen order
    Rows,
    /// The list row whose rendered text contains the substring
    RowWithText(String),
    /// All buttons in scope
    Buttons,
    /// The button whose label equals the text
    ButtonWithLabel(String),
}

impl Selector {
    /// Create a test-id selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Create a test-id prefix selector
    #[must_use]
    pub fn test_id_prefix(prefix: impl Into<String>) -> Self {
        Self::TestIdPrefix(prefix.into())
    }

    /// Create a row-by-contained-text selector
    #[must_use]
    pub fn row_with_text(text: impl Into<String>) -> Self {
        Self::RowWithText(text.into())
    }

    /// Create a button-by-label selector
    #[must_use]
    pub fn button(label: impl Into<String>) -> Self {
        Self::ButtonWithLabel(label.into())
    }

    /// Human-readable description for error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::TestId(id) => format!("test id {id:?}"),
            Self::TestIdPrefix(prefix) => format!("test id prefix {prefix:?}"),
            Self::Rows => "list rows".to_string(),
            Self::RowWithText(text) => format!("row containing {text:?}"),
            Self::Buttons => "buttons".to_string(),
            Self::ButtonWithLabel(label) => format!("button labeled {label:?}"),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Options for locator resolution
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// How long resolution may poll for a match
    pub timeout: Duration,
    /// Polling interval
    pub poll_interval: Duration,
    /// Require exactly one match (multiple matches are a caller error)
    pub strict: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            strict: true,
        }
    }
}

/// A lazily-resolved handle to an element region.
///
/// Holding a `Locator` performs no lookup; resolution happens when a
/// session interacts through it.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator from a selector with default options
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Shorthand for a test-id locator
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::new(Selector::test_id(id))
    }

    /// Set a custom resolution timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Disable strict single-match resolution
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_test_id_describe() {
            let s = Selector::test_id("cart-total");
            assert!(s.describe().contains("cart-total"));
        }

        #[test]
        fn test_row_with_text_describe() {
            let s = Selector::row_with_text("Invisible Pen");
            assert!(s.describe().contains("Invisible Pen"));
            assert!(s.describe().starts_with("row"));
        }

        #[test]
        fn test_display_matches_describe() {
            let s = Selector::button("Add to Cart");
            assert_eq!(s.to_string(), s.describe());
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_defaults_are_strict() {
            let locator = Locator::test_id("payment-total");
            assert!(locator.options().strict);
            assert_eq!(
                locator.options().timeout,
                Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS)
            );
        }

        #[test]
        fn test_with_timeout() {
            let locator = Locator::test_id("cart-total").with_timeout(Duration::from_secs(10));
            assert_eq!(locator.options().timeout, Duration::from_secs(10));
        }

        #[test]
        fn test_with_strict() {
            let locator = Locator::new(Selector::Rows).with_strict(false);
            assert!(!locator.options().strict);
        }
    }
}
