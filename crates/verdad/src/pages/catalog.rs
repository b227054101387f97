//! Catalog page.
//!
//! Browsing and adding items to the cart. Adding a unit decrements the
//! displayed stock; a product at quantity 0 renders a disabled control with
//! the canonical unavailable label.

use crate::locator::{Locator, Selector};
use crate::product::Product;
use crate::result::{VerdadError, VerdadResult};
use crate::session::Session;
use crate::surface::NodeSnapshot;
use crate::text;

/// Canonical label of an actionable add control
pub const ADD_TO_CART_LABEL: &str = "Add to Cart";

/// Canonical label communicating unavailability
pub const OUT_OF_STOCK_LABEL: &str = "Out of Stock";

/// Catalog page object
#[derive(Debug, Clone)]
pub struct CatalogPage {
    session: Session,
    tab: Locator,
}

impl CatalogPage {
    /// Bind the page to a session
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tab: Locator::test_id("store-tab-catalog"),
        }
    }

    /// Select the catalog tab
    pub fn open(&self) -> VerdadResult<()> {
        self.session
            .step("Navigate to the catalog page", || self.session.click(&self.tab))
    }

    /// Locator for the product's catalog row
    #[must_use]
    pub fn row_for(&self, product: &Product) -> Locator {
        Locator::new(Selector::row_with_text(product.name()))
    }

    /// Snapshot of the row's add control (label and enabled state)
    pub fn add_control_for(&self, product: &Product) -> VerdadResult<NodeSnapshot> {
        let row = self.session.resolve(&self.row_for(product))?;
        self.session.resolve_within(
            row.id,
            &Locator::new(Selector::test_id_prefix("catalog-item-add-button")),
        )
    }

    /// Rendered stock quantity of the product's catalog row
    pub fn quantity_of(&self, product: &Product) -> VerdadResult<u32> {
        let row = self.session.resolve(&self.row_for(product))?;
        let badge = self.session.resolve_within(
            row.id,
            &Locator::new(Selector::test_id_prefix("catalog-item-quantity")),
        )?;
        text::leading_int(&badge.text).ok_or_else(|| VerdadError::AssertionFailed {
            message: format!(
                "quantity badge for {} is not a plain integer: {:?}",
                product.name(),
                badge.text
            ),
        })
    }

    /// Find the product's row and add one unit to the cart
    pub fn add_to_cart(&self, product: &Product) -> VerdadResult<()> {
        self.session.step(
            &format!("Add {} to the cart", product.name()),
            || {
                let row = self.session.resolve(&self.row_for(product))?;
                self.session
                    .click_within(row.id, &Locator::new(Selector::button(ADD_TO_CART_LABEL)))
            },
        )
    }

    /// Verify the rendered quantity equals `expected`
    pub fn assert_quantity(&self, product: &Product, expected: u32) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the {} catalog quantity reads {expected}", product.name()),
            || {
                let actual = self.quantity_of(product)?;
                if actual == expected {
                    Ok(())
                } else {
                    Err(VerdadError::mismatch("rendered quantity", expected, actual))
                }
            },
        )
    }
}
