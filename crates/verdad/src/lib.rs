//! Verdad: UI-truth verification for a toy-store checkout flow.
//!
//! Verdad (Spanish: "truth") derives domain facts — stock levels,
//! out-of-stock status, cart/payment/order totals — from the live rendered
//! surface of the store, never from the test's own fixture data. Fixture
//! values drive actions; every asserted outcome is re-read from what the
//! application actually rendered.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     VERDAD Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Suites     │    │ Pages +    │    │ Rendered   │            │
//! │   │ (Rust)     │───►│ Oracles    │───►│ Surface    │            │
//! │   │            │    │ (Session)  │    │ (app/mock) │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One logical session per test: inventory mutations → catalog render →
//! cart add → payment confirm → order record, each oracle reading only the
//! surface of its page and the consistency checker comparing surfaces
//! pairwise.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

/// Cross-page numeric consistency checks (subtotals, totals, order mirror)
pub mod consistency;
/// Seed catalog fixtures
pub mod fixture;
/// Locator abstraction (strict, lazily resolved)
pub mod locator;
/// In-memory store application implementing the surface contract
pub mod mock;
/// Out-of-stock detection over the catalog
pub mod oos;
/// Page objects for the store's tabbed workflow
pub mod pages;
/// Product value type
pub mod product;
/// Result and error types
pub mod result;
/// Session handle shared by all page objects
pub mod session;
/// Step-scoped execution and reporting
pub mod step;
/// The rendered-surface contract
pub mod surface;
/// The parsing boundary for rendered text
pub mod text;
/// Wait mechanisms for render synchronization
pub mod wait;

pub use consistency::{CartLineView, ConsistencyChecker, TotalSurface};
pub use fixture::StoreSeed;
pub use locator::{Locator, LocatorOptions, Selector};
pub use mock::MockStore;
pub use oos::OosDetector;
pub use pages::{
    CartPage, CatalogPage, InventoryPage, OrdersPage, PaymentMethod, PaymentsPage,
    ADD_TO_CART_LABEL, OUT_OF_STOCK_LABEL,
};
pub use product::Product;
pub use result::{VerdadError, VerdadResult};
pub use session::Session;
pub use step::{StepScope, StepSpan, StepStatus};
pub use surface::{NodeId, NodeKind, NodeSnapshot, Surface};
pub use text::Money;
pub use wait::{WaitOptions, Waiter, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};
