//! Order history page.
//!
//! Orders render newest-first: the latest order is the first list row. Each
//! row carries the ordered lines plus a `Date: d/m/yyyy` stamp.

use crate::locator::{Locator, Selector};
use crate::product::Product;
use crate::result::{VerdadError, VerdadResult};
use crate::session::Session;
use crate::surface::NodeSnapshot;
use crate::text;

/// Orders page object
#[derive(Debug, Clone)]
pub struct OrdersPage {
    session: Session,
    tab: Locator,
    title: Locator,
}

impl OrdersPage {
    /// Bind the page to a session
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tab: Locator::test_id("store-tab-orders"),
            title: Locator::test_id("orders-title"),
        }
    }

    /// Select the orders tab
    pub fn open(&self) -> VerdadResult<()> {
        self.session
            .step("Navigate to the orders page", || self.session.click(&self.tab))
    }

    /// Verify the orders heading is rendered (the user reached this page)
    pub fn assert_on_page(&self) -> VerdadResult<()> {
        self.session.step("Verify the user is on the orders page", || {
            self.session.resolve(&self.title).map(|_| ())
        })
    }

    /// Number of rendered orders right now (no waiting)
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.session.query_all(&Locator::new(Selector::Rows)).len()
    }

    /// The most recent order's row (first in list order).
    ///
    /// Waits for at least one order to render; an empty history inside the
    /// wait budget is a lookup failure.
    pub fn latest_order(&self) -> VerdadResult<NodeSnapshot> {
        self.session
            .resolve(&Locator::new(Selector::Rows).with_strict(false))
    }

    /// Verify the latest order shows the product name, a quantity token,
    /// a currency token, the expected price, and a date stamp.
    pub fn assert_latest_order(&self, product: &Product) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the latest order shows {}", product.name()),
            || {
                let row = self.latest_order()?;
                if !row.text.contains(product.name()) {
                    return Err(VerdadError::mismatch(
                        "latest order product",
                        product.name(),
                        &row.text,
                    ));
                }
                if text::quantity_token(&row.text).is_none() {
                    return Err(VerdadError::AssertionFailed {
                        message: format!("latest order has no quantity token: {:?}", row.text),
                    });
                }
                if !text::contains_currency(&row.text) {
                    return Err(VerdadError::AssertionFailed {
                        message: format!("latest order has no currency token: {:?}", row.text),
                    });
                }
                if !row.text.contains(&product.price().plain()) {
                    return Err(VerdadError::mismatch(
                        "latest order price",
                        product.price(),
                        &row.text,
                    ));
                }
                if !text::contains_order_date(&row.text) {
                    return Err(VerdadError::AssertionFailed {
                        message: format!("latest order has no date stamp: {:?}", row.text),
                    });
                }
                Ok(())
            },
        )
    }
}
