//! Seed catalog fixtures.
//!
//! Typed reproduction of the store's toy catalog. Fixture values drive
//! actions (create, add to cart); assertions always re-derive outcomes from
//! the rendered surface.

use crate::product::Product;

/// The seed catalog used by the suites.
///
/// `invisible_pen` ships with quantity 1 so a single add-to-cart drives it
/// out of stock; `lightsaber` carries the boundary price the cart-total
/// scenario pins down.
#[derive(Debug, Clone)]
pub struct StoreSeed {
    products: Vec<Product>,
}

impl StoreSeed {
    /// The full toy catalog
    #[must_use]
    pub fn catalog() -> Self {
        let products = vec![
            Product::new("Cat Translator", "50", 11),
            Product::new("Lightsaber (Star Wars)", "9999.99", 1),
            Product::new("Giant Rubber Duck", "49.99", 15),
            Product::new("Shark Repellent", "299.99", 5),
            Product::new(
                "Aluminum Helmet for Protection Against Alien Mind Control",
                "19.99",
                50,
            ),
            Product::new("Sonic Screwdriver (Doctor Who)", "79.99", 6),
            Product::new("Bacon-Scented Candle", "14.99", 20),
            Product::new("Invisible Pen", "9.99", 1),
            Product::new("Dog Sunglasses", "24.99", 12),
        ]
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("seed catalog is well-formed");
        Self { products }
    }

    /// An empty store (inventory suites create their own products)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// All seeded products
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a seeded product by exact name
    #[must_use]
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// The boundary-priced product used by the cart-total scenario
    #[must_use]
    pub fn lightsaber(&self) -> &Product {
        self.product("Lightsaber (Star Wars)").expect("seeded")
    }

    /// The quantity-1 product used to drive an out-of-stock state
    #[must_use]
    pub fn invisible_pen(&self) -> &Product {
        self.product("Invisible Pen").expect("seeded")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Money;

    #[test]
    fn test_catalog_has_nine_products() {
        assert_eq!(StoreSeed::catalog().products().len(), 9);
    }

    #[test]
    fn test_lightsaber_boundary_price() {
        let seed = StoreSeed::catalog();
        assert_eq!(seed.lightsaber().price(), Money::from_cents(999_999));
        assert_eq!(seed.lightsaber().quantity(), 1);
    }

    #[test]
    fn test_unique_names() {
        let seed = StoreSeed::catalog();
        let mut names: Vec<_> = seed.products().iter().map(Product::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), seed.products().len());
    }
}
