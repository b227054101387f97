//! Out-of-stock detection over the catalog.
//!
//! A product counts as out of stock only when three independent UI signals
//! agree: the rendered quantity is zero, the action control is disabled,
//! and its label is the canonical unavailable string. A row where only one
//! or two signals hold (a transient render, say a quantity that updated
//! before the control state) is excluded, never reported — false negatives
//! over false positives.

use crate::locator::{Locator, Selector};
use crate::pages::OUT_OF_STOCK_LABEL;
use crate::result::{VerdadError, VerdadResult};
use crate::session::Session;
use crate::text;

/// Scans catalog rows and classifies out-of-stock products
#[derive(Debug, Clone)]
pub struct OosDetector {
    session: Session,
}

impl OosDetector {
    /// Bind the detector to a session (the catalog tab must be active)
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Names of all out-of-stock products, in on-screen order.
    ///
    /// Read-only and restartable: the scan performs no mutation and can be
    /// called repeatedly. Names are taken from each row's name field, never
    /// from caller-supplied fixture data.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if a classified row carries no name field.
    pub fn find_out_of_stock(&self) -> VerdadResult<Vec<String>> {
        self.session.step("Scan catalog rows for out-of-stock products", || {
            let quantity_badge = Locator::new(Selector::test_id_prefix("catalog-item-quantity"));
            let add_control = Locator::new(Selector::test_id_prefix("catalog-item-add-button"));
            let name_field = Locator::new(Selector::test_id_prefix("catalog-item-name"));

            let mut names = Vec::new();
            for row in self.session.query_all(&Locator::new(Selector::Rows)) {
                // Signal 1: rendered quantity is zero. Rows whose badge text
                // does not start with "0" are skipped before any further
                // reads. The badge renders a bare integer; a sign or locale
                // grouping prefix would defeat this screen.
                let Some(badge) = self
                    .session
                    .query_all_within(row.id, &quantity_badge)
                    .into_iter()
                    .next()
                else {
                    continue;
                };
                if !text::starts_with_zero(&badge.text) {
                    continue;
                }

                // Signals 2 and 3: the control is disabled and labeled with
                // the canonical unavailable string.
                let Some(control) = self
                    .session
                    .query_all_within(row.id, &add_control)
                    .into_iter()
                    .next()
                else {
                    continue;
                };
                if control.enabled || control.text != OUT_OF_STOCK_LABEL {
                    continue;
                }

                let name = self
                    .session
                    .query_all_within(row.id, &name_field)
                    .into_iter()
                    .next()
                    .ok_or_else(|| VerdadError::Lookup {
                        selector: "name field of an out-of-stock row".to_string(),
                        matches: 0,
                    })?;
                names.push(name.text);
            }
            Ok(names)
        })
    }
}
