//! Shopping cart page.
//!
//! Inspecting cart rows and the grand total, and moving on to payment. The
//! total is kept as rendered text: verification is string containment
//! against an expected literal, not arithmetic — arithmetic correctness is
//! checked line-by-line by the consistency checker.

use crate::locator::{Locator, Selector};
use crate::product::Product;
use crate::result::{VerdadError, VerdadResult};
use crate::session::Session;

/// Cart page object
#[derive(Debug, Clone)]
pub struct CartPage {
    session: Session,
    tab: Locator,
    total: Locator,
    go_to_payment: Locator,
}

impl CartPage {
    /// Bind the page to a session
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tab: Locator::test_id("store-tab-cart"),
            total: Locator::test_id("cart-total"),
            go_to_payment: Locator::test_id("cart-go-to-payment"),
        }
    }

    /// Select the cart tab
    pub fn open(&self) -> VerdadResult<()> {
        self.session
            .step("Navigate to the cart page", || self.session.click(&self.tab))
    }

    /// Locator for the product's cart row
    #[must_use]
    pub fn row_for(&self, product: &Product) -> Locator {
        Locator::new(Selector::row_with_text(product.name()))
    }

    /// The grand total exactly as rendered
    pub fn total_text(&self) -> VerdadResult<String> {
        self.session
            .step("Read the cart grand total", || self.session.text_of(&self.total))
    }

    /// Click through to the payments step
    pub fn go_to_payments(&self) -> VerdadResult<()> {
        self.session
            .step("Go to payments", || self.session.click(&self.go_to_payment))
    }

    /// Verify the rendered grand total contains the expected literal
    pub fn assert_total_shows(&self, expected: &str) -> VerdadResult<()> {
        self.session
            .step(&format!("Verify the cart total shows {expected}"), || {
                let actual = self.session.text_of(&self.total)?;
                if actual.contains(expected) {
                    Ok(())
                } else {
                    Err(VerdadError::mismatch("cart total", expected, actual))
                }
            })
    }
}
