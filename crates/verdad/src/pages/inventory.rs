//! Inventory management page.
//!
//! Create products and manage stock levels. Every mutation returns only
//! after the row re-renders the expected value (or the wait budget
//! elapses); the observed quantity is always re-read from the surface,
//! never taken from the driving fixture.

use crate::locator::{Locator, Selector};
use crate::product::Product;
use crate::result::{VerdadError, VerdadResult};
use crate::session::Session;
use crate::text;

/// Inventory page object
#[derive(Debug, Clone)]
pub struct InventoryPage {
    session: Session,
    tab: Locator,
    name_field: Locator,
    price_field: Locator,
    quantity_field: Locator,
    submit_button: Locator,
}

impl InventoryPage {
    /// Bind the page to a session
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tab: Locator::test_id("store-tab-inventory"),
            name_field: Locator::test_id("inventory-input-name"),
            price_field: Locator::test_id("inventory-input-price"),
            quantity_field: Locator::test_id("inventory-input-quantity"),
            submit_button: Locator::test_id("inventory-submit-button"),
        }
    }

    /// Locator for the product's list row
    #[must_use]
    pub fn row_for(&self, product: &Product) -> Locator {
        Locator::new(Selector::row_with_text(product.name()))
    }

    /// Select the inventory tab
    pub fn open(&self) -> VerdadResult<()> {
        self.session
            .step("Navigate to the inventory page", || self.session.click(&self.tab))
    }

    /// Fill the product form and submit a new inventory item.
    ///
    /// Re-submission creates a second, distinct row; there is no dedup.
    pub fn create(&self, product: &Product) -> VerdadResult<()> {
        self.session.step("Create a new inventory product", || {
            self.session.fill(&self.name_field, product.name())?;
            self.session.fill(&self.price_field, &product.price_text())?;
            self.session.fill(&self.quantity_field, &product.quantity_text())?;
            self.session.click(&self.submit_button)?;
            let row = self.row_for(product);
            self.session.wait_until(
                &format!("row for {} to render", product.name()),
                || !self.session.query_all(&row).is_empty(),
            )
        })
    }

    /// Current stock quantity, re-read from the row's quantity badge
    pub fn quantity_of(&self, product: &Product) -> VerdadResult<u32> {
        let row = self.session.resolve(&self.row_for(product))?;
        let badge = self.session.resolve_within(
            row.id,
            &Locator::new(Selector::test_id_prefix("inventory-item-quantity")),
        )?;
        text::leading_int(&badge.text).ok_or_else(|| VerdadError::AssertionFailed {
            message: format!(
                "quantity badge for {} is not a plain integer: {:?}",
                product.name(),
                badge.text
            ),
        })
    }

    /// Click the row's "+" control and wait for the quantity to show one more
    pub fn increase(&self, product: &Product) -> VerdadResult<()> {
        self.session
            .step(&format!("Increase stock for {}", product.name()), || {
                let before = self.quantity_of(product)?;
                let row = self.session.resolve(&self.row_for(product))?;
                self.session
                    .click_within(row.id, &Locator::new(Selector::button("+")))?;
                self.wait_for_quantity(product, before + 1)
            })
    }

    /// Click the row's "-" control and wait for the quantity to show one
    /// less, clamped at 0.
    ///
    /// At quantity 0 this is a caller-visible no-op: the rendered value
    /// stays 0 and never goes negative.
    pub fn decrease(&self, product: &Product) -> VerdadResult<()> {
        self.session
            .step(&format!("Decrease stock for {}", product.name()), || {
                let before = self.quantity_of(product)?;
                let row = self.session.resolve(&self.row_for(product))?;
                self.session
                    .click_within(row.id, &Locator::new(Selector::button("-")))?;
                self.wait_for_quantity(product, before.saturating_sub(1))
            })
    }

    fn wait_for_quantity(&self, product: &Product, expected: u32) -> VerdadResult<()> {
        self.session.wait_until(
            &format!("{} quantity to read {expected}", product.name()),
            || self.quantity_of(product).is_ok_and(|q| q == expected),
        )
    }

    /// Verify the product row is rendered
    pub fn assert_created(&self, product: &Product) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the {} row is in the list", product.name()),
            || self.session.resolve(&self.row_for(product)).map(|_| ()),
        )
    }

    /// Verify the row renders the product's price
    pub fn assert_price(&self, product: &Product) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the {} row price", product.name()),
            || {
                let row = self.session.resolve(&self.row_for(product))?;
                match text::last_currency_token(&row.text) {
                    Some(rendered) if rendered == product.price() => Ok(()),
                    Some(rendered) => Err(VerdadError::mismatch(
                        "rendered price",
                        product.price(),
                        rendered,
                    )),
                    None => Err(VerdadError::AssertionFailed {
                        message: format!("row for {} renders no price", product.name()),
                    }),
                }
            },
        )
    }

    /// Verify the rendered quantity equals `expected`
    pub fn assert_quantity(&self, product: &Product, expected: u32) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the {} quantity reads {expected}", product.name()),
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
