//! Cross-page numeric consistency checks.
//!
//! Verifies that quantity × unit price equals the rendered subtotal, that
//! subtotal sums equal the displayed totals, and that a confirmed order
//! mirrors the cart it came from — catalog → cart → payment → order. Any
//! missing or malformed token is a hard assertion failure; nothing is
//! retried or silently tolerated.

use crate::locator::{Locator, Selector};
use crate::product::Product;
use crate::result::{VerdadError, VerdadResult};
use crate::session::Session;
use crate::text::{self, Money};

/// Which page-level aggregate total to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalSurface {
    /// The cart's grand total
    Cart,
    /// The payment summary's total
    Payment,
}

impl TotalSurface {
    /// Semantic identifier of the total figure
    #[must_use]
    pub const fn test_id(&self) -> &'static str {
        match self {
            Self::Cart => "cart-total",
            Self::Payment => "payment-total",
        }
    }
}

/// Typed view of one cart line, extracted from its rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Parsed line quantity (from the `"N x"` token)
    pub quantity: u32,
    /// Parsed subtotal (the last currency-shaped token in the row)
    pub subtotal: Money,
    /// The row text the values were extracted from
    pub row_text: String,
}

/// Verifies transaction invariants over the rendered surface
#[derive(Debug, Clone)]
pub struct ConsistencyChecker {
    session: Session,
}

impl ConsistencyChecker {
    /// Bind the checker to a session
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Extract the product's cart line from the active page.
    ///
    /// Quantity comes from the `"N x"` token; the subtotal is the **last**
    /// currency-shaped token in the row, since the row may also render the
    /// unit price earlier in its text.
    ///
    /// # Errors
    ///
    /// A row without both tokens is a hard assertion failure.
    pub fn cart_line_for(&self, product: &Product) -> VerdadResult<CartLineView> {
        self.session.step(
            &format!("Extract the {} cart line", product.name()),
            || {
                let row = self
                    .session
                    .resolve(&Locator::new(Selector::row_with_text(product.name())))?;
                let quantity =
                    text::quantity_token(&row.text).ok_or_else(|| VerdadError::AssertionFailed {
                        message: format!(
                            "cart row for {} has no quantity token: {:?}",
                            product.name(),
                            row.text
                        ),
                    })?;
                let subtotal = text::last_currency_token(&row.text).ok_or_else(|| {
                    VerdadError::AssertionFailed {
                        message: format!(
                            "cart row for {} has no currency token: {:?}",
                            product.name(),
                            row.text
                        ),
                    }
                })?;
                Ok(CartLineView {
                    quantity,
                    subtotal,
                    row_text: row.text,
                })
            },
        )
    }

    /// The page-level aggregate total exactly as rendered.
    ///
    /// Kept as text: callers check string containment against an expected
    /// literal; arithmetic correctness is the application's responsibility,
    /// not the oracle's.
    pub fn total_for(&self, surface: TotalSurface) -> VerdadResult<String> {
        self.session.text_of(&Locator::test_id(surface.test_id()))
    }

    /// Verify the line-level identity `subtotal == quantity × unit price`
    pub fn assert_line_subtotal(&self, product: &Product) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the {} line subtotal", product.name()),
            || {
                let line = self.cart_line_for(product)?;
                let expected = product.price().times(line.quantity);
                if line.subtotal == expected {
                    Ok(())
                } else {
                    Err(VerdadError::mismatch(
                        &format!("subtotal of {} x {}", line.quantity, product.name()),
                        expected,
                        line.subtotal,
                    ))
                }
            },
        )
    }

    /// Verify the rendered total contains the expected literal
    pub fn assert_total_shows(&self, surface: TotalSurface, expected: &str) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the {} total shows {expected}", surface.test_id()),
            || {
                let actual = self.total_for(surface)?;
                if actual.contains(expected) {
                    Ok(())
                } else {
                    Err(VerdadError::mismatch(surface.test_id(), expected, actual))
                }
            },
        )
    }

    /// Verify two captured total renderings agree on their currency token.
    ///
    /// Used to compare the cart's grand total against the payment summary
    /// total after navigating between the two pages.
    pub fn assert_totals_agree(&self, cart_total: &str, payment_total: &str) -> VerdadResult<()> {
        self.session.step("Verify cart and payment totals agree", || {
            let cart = text::last_currency_token(cart_total).ok_or_else(|| {
                VerdadError::AssertionFailed {
                    message: format!("cart total has no currency token: {cart_total:?}"),
                }
            })?;
            let payment = text::last_currency_token(payment_total).ok_or_else(|| {
                VerdadError::AssertionFailed {
                    message: format!("payment total has no currency token: {payment_total:?}"),
                }
            })?;
            if cart == payment {
                Ok(())
            } else {
                Err(VerdadError::mismatch("payment total", cart, payment))
            }
        })
    }

    /// Does the most recent order row mention the product with a
    /// quantity-shaped and a currency-shaped token?
    ///
    /// The latest order is the first row of the orders page. The expected
    /// price must appear as well, since a product always knows its price.
    ///
    /// # Errors
    ///
    /// An empty order history is a lookup failure.
    pub fn latest_order_matches(&self, product: &Product) -> VerdadResult<bool> {
        let row = self
            .session
            .resolve(&Locator::new(Selector::Rows).with_strict(false))?;
        Ok(row.text.contains(product.name())
            && text::quantity_token(&row.text).is_some()
            && text::contains_currency(&row.text)
            && row.text.contains(&product.price().plain()))
    }

    /// Verify the latest order exactly mirrors a cart line: name present,
    /// quantity token equal, subtotal equal to quantity × unit price.
    pub fn assert_latest_order_mirrors(
        &self,
        product: &Product,
        quantity: u32,
    ) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the latest order mirrors {} x {}", quantity, product.name()),
            || {
                let row = self
                    .session
                    .resolve(&Locator::new(Selector::Rows).with_strict(false))?;
                if !row.text.contains(product.name()) {
                    return Err(VerdadError::mismatch(
                        "latest order product",
                        product.name(),
                        &row.text,
                    ));
                }
                let rendered_quantity = text::quantity_token(&row.text).ok_or_else(|| {
                    VerdadError::AssertionFailed {
                        message: format!("latest order has no quantity token: {:?}", row.text),
                    }
                })?;
                if rendered_quantity != quantity {
                    return Err(VerdadError::mismatch(
                        "latest order quantity",
                        quantity,
                        rendered_quantity,
                    ));
                }
                let rendered_subtotal =
                    text::last_currency_token(&row.text).ok_or_else(|| {
                        VerdadError::AssertionFailed {
                            message: format!("latest order has no currency token: {:?}", row.text),
                        }
                    })?;
                let expected = product.price().times(quantity);
                if rendered_subtotal != expected {
                    return Err(VerdadError::mismatch(
                        "latest order subtotal",
                        expected,
                        rendered_subtotal,
                    ));
                }
                Ok(())
            },
        )
    }

    /// Verify the orders page currently renders exactly `expected` orders
    pub fn assert_order_count(&self, expected: usize) -> VerdadResult<()> {
        self.session.step(
            &format!("Verify the order history holds {expected} orders"),
            || {
                let actual = self.session.query_all(&Locator::new(Selector::Rows)).len();
                if actual == expected {
                    Ok(())
                } else {
                    Err(VerdadError::mismatch("order count", expected, actual))
                }
            },
        )
    }
}
