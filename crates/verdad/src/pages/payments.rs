//! Payments/checkout page.
//!
//! Payment method selection and order confirmation. Confirming without a
//! selected method must not create an order; the suites verify that through
//! the orders page afterwards.

use crate::locator::{Locator, Selector};
use crate::product::Product;
use crate::result::{VerdadError, VerdadResult};
use crate::session::Session;
use crate::text;

/// Payment methods the checkout offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// The instant-payment method this suite exercises
    MbWay,
}

impl PaymentMethod {
    /// Semantic identifier of the method's input control
    #[must_use]
    pub const fn test_id(&self) -> &'static str {
        match self {
            Self::MbWay => "payment-method-input-MBWay",
        }
    }

    /// Display name
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MbWay => "MB Way",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Payments page object
#[derive(Debug, Clone)]
pub struct PaymentsPage {
    session: Session,
    tab: Locator,
    confirm_button: Locator,
    total: Locator,
}

impl PaymentsPage {
    /// Bind the page to a session
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tab: Locator::test_id("store-tab-payments"),
            confirm_button: Locator::test_id("payment-confirm-button"),
            total: Locator::test_id("payment-total"),
        }
    }

    /// Select the payments tab
    pub fn open(&self) -> VerdadResult<()> {
        self.session
            .step("Navigate to the payments page", || self.session.click(&self.tab))
    }

    /// Pick a payment method
    pub fn select_method(&self, method: PaymentMethod) -> VerdadResult<()> {
        self.session
            .step(&format!("Select the {method} payment method"), || {
                self.session.click(&Locator::test_id(method.test_id()))
            })
    }

    /// Click the confirm button
    pub fn confirm(&self) -> VerdadResult<()> {
        self.session
            .step("Confirm payment", || self.session.click(&self.confirm_button))
    }

    /// Select a method and confirm
    pub fn submit(&self, method: PaymentMethod) -> VerdadResult<()> {
        self.session
            .step(&format!("Confirm payment using {method}"), || {
                self.session.click(&Locator::test_id(method.test_id()))?;
                self.session.click(&self.confirm_button)
            })
    }

    /// Click confirm with no method selected (negative scenario)
    pub fn confirm_without_method(&self) -> VerdadResult<()> {
        self.session.step("Confirm payment without a method", || {
            self.session.click(&self.confirm_button)
        })
    }

    /// The payment total exactly as rendered
    pub fn total_text(&self) -> VerdadResult<String> {
        self.session
            .step("Read the payment total", || self.session.text_of(&self.total))
    }

    /// Locator for the product's summary row
    #[must_use]
    pub fn summary_row_for(&self, product: &Product) -> Locator {
        Locator::new(Selector::row_with_text(product.name()))
    }

    /// Verify the method input is rendered (the user reached this page)
    pub fn assert_on_page(&self) -> VerdadResult<()> {
        self.session.step("Verify the user is on the payments page", || {
            self.session
                .resolve(&Locator::test_id(PaymentMethod::MbWay.test_id()))
                .map(|_| ())
        })
    }

    /// Verify the summary row shows the product with a quantity and a price
    pub fn assert_summary_for(&self, product: &Product) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the payment summary shows {}", product.name()),
            || {
                let row = self.session.resolve(&self.summary_row_for(product))?;
                if text::quantity_token(&row.text).is_none() {
                    return Err(VerdadError::AssertionFailed {
                        message: format!("summary row for {} has no quantity token", product.name()),
                    });
                }
                if !text::contains_currency(&row.text) {
                    return Err(VerdadError::AssertionFailed {
                        message: format!("summary row for {} has no currency token", product.name()),
                    });
                }
                Ok(())
            },
        )
    }

    /// Verify the rendered payment total contains the expected literal
    pub fn assert_total_shows(&self, expected: &str) -> VerdadResult<()> {
        self.session
            .step(&format!("Verify the payment total shows {expected}"), || {
                let actual = self.session.text_of(&self.total)?;
                if actual.contains(expected) {
                    Ok(())
                } else {
                    Err(VerdadError::mismatch("payment total", expected, actual))
                }
            })
    }
}
