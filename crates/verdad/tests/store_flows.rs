//! End-to-end suites over the simulated store: inventory, catalog, cart,
//! payments, and orders flows, each driven through the page objects and
//! verified against the rendered surface.

use verdad::{
    CartPage, CatalogPage, ConsistencyChecker, InventoryPage, MockStore, OosDetector, OrdersPage,
    PaymentMethod, PaymentsPage, Product, Session, StoreSeed,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn store_session() -> Session {
    init_logging();
    Session::new(MockStore::new(&StoreSeed::catalog()))
}

fn empty_session() -> Session {
    init_logging();
    Session::new(MockStore::empty())
}

mod inventory_tests {
    use super::*;

    fn cat_translator() -> Product {
        Product::new("Cat Translator", "50", 11).unwrap()
    }

    #[test]
    fn add_a_new_product_to_inventory() {
        let session = empty_session();
        let inventory = InventoryPage::new(session);
        let product = cat_translator();

        inventory.open().unwrap();
        inventory.create(&product).unwrap();
        inventory.assert_created(&product).unwrap();
        inventory.assert_price(&product).unwrap();
        inventory.assert_quantity(&product, 11).unwrap();
    }

    #[test]
    fn increase_stock_quantity_by_one() {
        let session = empty_session();
        let inventory = InventoryPage::new(session);
        let product = cat_translator();

        inventory.open().unwrap();
        inventory.create(&product).unwrap();
        inventory.increase(&product).unwrap();
        inventory.assert_quantity(&product, 12).unwrap();
    }

    #[test]
    fn decrease_stock_quantity_by_one() {
        let session = empty_session();
        let inventory = InventoryPage::new(session);
        let product = cat_translator();

        inventory.open().unwrap();
        inventory.create(&product).unwrap();
        inventory.decrease(&product).unwrap();
        inventory.assert_quantity(&product, 10).unwrap();
    }

    #[test]
    fn quantity_never_goes_below_zero() {
        let session = empty_session();
        let inventory = InventoryPage::new(session);
        let product = Product::new("Invisible Dog Glasses", "12.50", 1).unwrap();

        inventory.open().unwrap();
        inventory.create(&product).unwrap();
        inventory.decrease(&product).unwrap();
        inventory.decrease(&product).unwrap();
        inventory.assert_quantity(&product, 0).unwrap();
    }

    #[test]
    fn resubmission_creates_a_second_row() {
        let session = empty_session();
        let inventory = InventoryPage::new(session.clone());
        let product = cat_translator();

        inventory.open().unwrap();
        inventory.create(&product).unwrap();
        inventory.create(&product).unwrap();

        // two rows now match the same name, so a strict lookup is a caller
        // error surfaced at the point of use
        let err = inventory.assert_quantity(&product, 11).unwrap_err();
        assert!(matches!(err, verdad::VerdadError::Lookup { matches: 2, .. }));
    }
}

mod catalog_tests {
    use super::*;

    #[test]
    fn add_an_item_to_the_cart_from_the_catalog() {
        let session = store_session();
        let catalog = CatalogPage::new(session);
        let seed = StoreSeed::catalog();
        let lightsaber = seed.lightsaber();

        catalog.open().unwrap();
        let initial = catalog.quantity_of(lightsaber).unwrap();
        catalog.add_to_cart(lightsaber).unwrap();
        catalog.assert_quantity(lightsaber, initial - 1).unwrap();
    }

    #[test]
    fn prevent_adding_out_of_stock_items() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let detector = OosDetector::new(session);
        let seed = StoreSeed::catalog();
        let pen = seed.invisible_pen();

        catalog.open().unwrap();
        catalog.add_to_cart(pen).unwrap(); // drains the single unit

        let oos = detector.find_out_of_stock().unwrap();
        assert!(!oos.is_empty());
        assert!(oos.contains(&pen.name().to_string()));

        let control = catalog.add_control_for(pen).unwrap();
        assert!(!control.enabled);
        assert_eq!(control.text, verdad::OUT_OF_STOCK_LABEL);
    }

    #[test]
    fn scan_is_restartable_and_reads_names_from_the_surface() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let detector = OosDetector::new(session);
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.invisible_pen()).unwrap();

        let first = detector.find_out_of_stock().unwrap();
        let second = detector.find_out_of_stock().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["Invisible Pen".to_string()]);
    }
}

mod cart_tests {
    use super::*;

    #[test]
    fn display_cart_items_and_totals() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let cart = CartPage::new(session.clone());
        let checker = ConsistencyChecker::new(session);
        let seed = StoreSeed::catalog();
        let lightsaber = seed.lightsaber();

        catalog.open().unwrap();
        catalog.add_to_cart(lightsaber).unwrap();

        cart.open().unwrap();
        let line = checker.cart_line_for(lightsaber).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.subtotal, lightsaber.price());
        cart.assert_total_shows(&lightsaber.price_text()).unwrap();
    }

    #[test]
    fn proceed_to_the_payment_step() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let cart = CartPage::new(session.clone());
        let payments = PaymentsPage::new(session);
        let seed = StoreSeed::catalog();

        catalog.open().unwrap();
        catalog.add_to_cart(seed.lightsaber()).unwrap();

        cart.open().unwrap();
        cart.go_to_payments().unwrap();
        payments.assert_on_page().unwrap();
    }
}

mod payment_tests {
    use super::*;

    fn add_lightsaber_and_open_payments(session: &Session) -> Product {
        let catalog = CatalogPage::new(session.clone());
        let payments = PaymentsPage::new(session.clone());
        let seed = StoreSeed::catalog();
        let lightsaber = seed.lightsaber().clone();

        catalog.open().unwrap();
        catalog.add_to_cart(&lightsaber).unwrap();
        payments.open().unwrap();
        lightsaber
    }

    #[test]
    fn validate_payment_summary() {
        let session = store_session();
        let payments = PaymentsPage::new(session.clone());
        let lightsaber = add_lightsaber_and_open_payments(&session);

        payments.assert_summary_for(&lightsaber).unwrap();
        payments.assert_total_shows(&lightsaber.price_text()).unwrap();
    }

    #[test]
    fn complete_a_purchase() {
        let session = store_session();
        let payments = PaymentsPage::new(session.clone());
        let orders = OrdersPage::new(session.clone());
        let _ = add_lightsaber_and_open_payments(&session);

        payments.submit(PaymentMethod::MbWay).unwrap();
        orders.assert_on_page().unwrap();
    }

    #[test]
    fn block_payment_without_method() {
        let session = store_session();
        let payments = PaymentsPage::new(session.clone());
        let orders = OrdersPage::new(session.clone());
        let checker = ConsistencyChecker::new(session.clone());
        let _ = add_lightsaber_and_open_payments(&session);

        payments.confirm_without_method().unwrap();

        orders.open().unwrap();
        checker.assert_order_count(0).unwrap();
    }
}

mod orders_tests {
    use super::*;

    #[test]
    fn display_order_details() {
        let session = store_session();
        let payments = PaymentsPage::new(session.clone());
        let orders = OrdersPage::new(session.clone());
        let catalog = CatalogPage::new(session.clone());
        let seed = StoreSeed::catalog();
        let lightsaber = seed.lightsaber();

        catalog.open().unwrap();
        catalog.add_to_cart(lightsaber).unwrap();
        payments.open().unwrap();
        payments.submit(PaymentMethod::MbWay).unwrap();

        orders.open().unwrap();
        orders.assert_latest_order(lightsaber).unwrap();
    }

    #[test]
    fn newest_order_is_listed_first() {
        let session = store_session();
        let catalog = CatalogPage::new(session.clone());
        let payments = PaymentsPage::new(session.clone());
        let orders = OrdersPage::new(session.clone());
        let seed = StoreSeed::catalog();

        for product in [seed.lightsaber(), seed.product("Dog Sunglasses").unwrap()] {
            catalog.open().unwrap();
            catalog.add_to_cart(product).unwrap();
            payments.open().unwrap();
            payments.submit(PaymentMethod::MbWay).unwrap();
        }

        orders.open().unwrap();
        assert_eq!(orders.order_count(), 2);
        let latest = orders.latest_order().unwrap();
        assert!(latest.text.contains("Dog Sunglasses"));
    }
}
