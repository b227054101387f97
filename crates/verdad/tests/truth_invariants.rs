//! Invariant-level coverage: the floor property, three-signal out-of-stock
//! agreement, subtotal/total identities, the no-method guard, and the
//! order-mirror check, each observed through the rendered surface only.

use proptest::prelude::*;
use verdad::{
    CartPage, CatalogPage, ConsistencyChecker, InventoryPage, MockStore, OosDetector, OrdersPage,
    PaymentMethod, PaymentsPage, Product, Session, StepStatus, StoreSeed, TotalSurface,
    VerdadError,
};

fn store_session() -> Session {
    Session::new(MockStore::new(&StoreSeed::catalog()))
}

fn empty_session() -> Session {
    Session::new(MockStore::empty())
}

mod floor_property {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// After n decreases from quantity q, the rendered value is
        /// max(0, q - n) and never negative.
        #[test]
        fn decreases_clamp_at_zero(q in 0u32..4, n in 0usize..6) {
            let session = empty_session();
            let inventory = InventoryPage::new(session);
            let product = Product::new("Bacon-Scented Candle", "14.99", q).unwrap();

            inventory.open().unwrap();
            inventory.create(&product).unwrap();
            for _ in 0..n {
                inventory.decrease(&product).unwrap();
            }
            let expected = q.saturating_sub(n as u32);
            prop_assert_eq!(inventory.quantity_of(&product).unwrap(), expected);
        }
    }
}

mod oos_agreement {
    use super::*;

    #[test]
    fn reports_product_when_all_three_signals_agree() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let detector = OosDetector::new(session);
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.invisible_pen()).unwrap();

        let oos = detector.find_out_of_stock().unwrap();
        assert_eq!(oos, vec!["Invisible Pen".to_string()]);
    }

    #[test]
    fn in_stock_rows_are_skipped_by_the_quantity_screen() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let detector = OosDetector::new(session);

        catalog.open().unwrap();
        assert!(detector.find_out_of_stock().unwrap().is_empty());
    }

    #[test]
    fn scan_performs_no_mutation() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let detector = OosDetector::new(session);
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        let before = catalog.quantity_of(seed.lightsaber()).unwrap();
        let _ = detector.find_out_of_stock().unwrap();
        assert_eq!(catalog.quantity_of(seed.lightsaber()).unwrap(), before);
    }
}

mod subtotal_identity {
    use super::*;

    #[test]
    fn line_subtotal_equals_quantity_times_unit_price() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let cart = CartPage::new(session.clone());
        let checker = ConsistencyChecker::new(session);
        let seed = StoreSeed::catalog();
        let duck = seed.product("Giant Rubber Duck").unwrap();

        catalog.open().unwrap();
        for _ in 0..3 {
            catalog.add_to_cart(duck).unwrap();
        }

        cart.open().unwrap();
        let line = checker.cart_line_for(duck).unwrap();
        assert_eq!(line.quantity, 3);
        checker.assert_line_subtotal(duck).unwrap();
    }

    #[test]
    fn subtotal_is_the_last_currency_token_in_the_row() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let cart = CartPage::new(session.clone());
        let checker = ConsistencyChecker::new(session);
        let seed = StoreSeed::catalog();
        let duck = seed.product("Giant Rubber Duck").unwrap();

        catalog.open().unwrap();
        catalog.add_to_cart(duck).unwrap();
        catalog.add_to_cart(duck).unwrap();

        cart.open().unwrap();
        let line = checker.cart_line_for(duck).unwrap();
        // the row also shows the €49.99 unit price earlier in its text
        assert_eq!(line.subtotal, duck.price().times(2));
    }
}

mod total_aggregation {
    use super::*;

    #[test]
    fn cart_total_aggregates_lines_and_matches_payment_total() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let cart = CartPage::new(session.clone());
        let payments = PaymentsPage::new(session.clone());
        let checker = ConsistencyChecker::new(session);
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.product("Shark Repellent").unwrap()).unwrap();
        catalog.add_to_cart(seed.product("Dog Sunglasses").unwrap()).unwrap();

        cart.open().unwrap();
        // 299.99 + 24.99
        checker.assert_total_shows(TotalSurface::Cart, "324.98").unwrap();
        let cart_total = checker.total_for(TotalSurface::Cart).unwrap();

        payments.open().unwrap();
        let payment_total = checker.total_for(TotalSurface::Payment).unwrap();
        checker.assert_totals_agree(&cart_total, &payment_total).unwrap();
    }

    #[test]
    fn boundary_price_renders_in_the_cart_total() {
        // one unit priced 9999.99 displays "9999.99" in the total
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let cart = CartPage::new(session.clone());
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.lightsaber()).unwrap();
        cart.open().unwrap();
        cart.assert_total_shows("9999.99").unwrap();
    }
}

mod no_method_guard {
    use super::*;

    #[test]
    fn confirming_without_method_creates_no_order() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let payments = PaymentsPage::new(session.clone());
        let orders = OrdersPage::new(session.clone());
        let checker = ConsistencyChecker::new(session);
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.lightsaber()).unwrap();
        payments.open().unwrap();
        payments.confirm_without_method().unwrap();

        orders.open().unwrap();
        checker.assert_order_count(0).unwrap();
    }

    #[test]
    fn selecting_a_method_afterwards_recovers() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let payments = PaymentsPage::new(session.clone());
        let checker = ConsistencyChecker::new(session);
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.lightsaber()).unwrap();
        payments.open().unwrap();
        payments.confirm_without_method().unwrap();
        payments.select_method(PaymentMethod::MbWay).unwrap();
        payments.confirm().unwrap();

        checker.assert_order_count(1).unwrap();
    }
}

mod order_mirror {
    use super::*;

    #[test]
    fn latest_order_mirrors_the_cart_contents() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let payments = PaymentsPage::new(session.clone());
        let orders = OrdersPage::new(session.clone());
        let checker = ConsistencyChecker::new(session);
        let seed = StoreSeed::catalog();
        let duck = seed.product("Giant Rubber Duck").unwrap();

        catalog.open().unwrap();
        catalog.add_to_cart(duck).unwrap();
        catalog.add_to_cart(duck).unwrap();
        payments.open().unwrap();
        payments.submit(PaymentMethod::MbWay).unwrap();

        orders.assert_on_page().unwrap();
        checker.assert_latest_order_mirrors(duck, 2).unwrap();
    }

    #[test]
    fn latest_order_row_carries_quantity_and_currency_tokens() {
        // "\d+ x" and "€\d+.\d+" shaped tokens on the first row
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let payments = PaymentsPage::new(session.clone());
        let orders = OrdersPage::new(session.clone());
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.lightsaber()).unwrap();
        payments.open().unwrap();
        payments.submit(PaymentMethod::MbWay).unwrap();

        orders.assert_latest_order(seed.lightsaber()).unwrap();

        let checker = ConsistencyChecker::new(session);
        assert!(checker.latest_order_matches(seed.lightsaber()).unwrap());
    }
}

mod step_attribution {
    use super::*;

    #[test]
    fn failed_assertion_reports_the_step_path() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let cart = CartPage::new(session.clone());
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.lightsaber()).unwrap();
        cart.open().unwrap();

        let err = cart.assert_total_shows("1.00").unwrap_err();
        assert!(matches!(err, VerdadError::AssertionFailed { .. }));

        let path = session.scope().failure_path().unwrap();
        assert!(path.contains("Verify the cart total shows 1.00"));
        let spans = session.scope().spans();
        assert!(spans.iter().any(|s| s.status == StepStatus::Failed));
    }

    #[test]
    fn trace_exports_as_json_for_the_report_collaborator() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());

        catalog.open().unwrap();
        let json = session.scope().to_json().unwrap();
        assert!(json.contains("Navigate to the catalog page"));
    }
}
