//! In-memory store application for the suites.
//!
//! [`MockStore`] implements the [`Surface`] contract the way the real store
//! renders: a tabbed workflow (inventory, catalog, cart, payments, orders)
//! whose elements carry the application's semantic identifiers. The store
//! re-renders from state on every query, so handles are only valid within
//! one render — exactly the re-render tolerance the lazy locators are
//! built for.

use chrono::{Datelike, Local, NaiveDate};

use crate::fixture::StoreSeed;
use crate::locator::Selector;
use crate::result::{VerdadError, VerdadResult};
use crate::surface::{NodeId, NodeKind, NodeSnapshot, Surface};
use crate::text::Money;

/// Canonical label of an actionable add control
const ADD_TO_CART: &str = "Add to Cart";
/// Canonical label of a disabled add control
const OUT_OF_STOCK: &str = "Out of Stock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Inventory,
    Catalog,
    Cart,
    Payments,
    Orders,
}

#[derive(Debug, Clone)]
struct Item {
    name: String,
    price: Money,
    quantity: u32,
}

#[derive(Debug, Clone)]
struct CartLine {
    item: usize,
    quantity: u32,
}

#[derive(Debug, Clone)]
struct OrderLine {
    name: String,
    quantity: u32,
    subtotal: Money,
}

#[derive(Debug, Clone)]
struct Order {
    lines: Vec<OrderLine>,
    date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
struct FormState {
    name: String,
    price: String,
    quantity: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Price,
    Quantity,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    SwitchTab(Tab),
    SubmitForm,
    IncreaseStock(usize),
    DecreaseStock(usize),
    AddToCart(usize),
    GoToPayment,
    SelectMethod,
    ConfirmPayment,
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Act(Action),
    Input(Field),
}

struct RenderedNode {
    kind: NodeKind,
    test_id: Option<String>,
    text: String,
    enabled: bool,
    parent: Option<usize>,
    target: Option<Target>,
}

/// The simulated store application
#[derive(Debug)]
pub struct MockStore {
    tab: Tab,
    items: Vec<Item>,
    cart: Vec<CartLine>,
    orders: Vec<Order>, // newest first
    method_selected: bool,
    payment_error: bool,
    form: FormState,
}

impl MockStore {
    /// Open the store with a seeded catalog
    #[must_use]
    pub fn new(seed: &StoreSeed) -> Self {
        let items = seed
            .products()
            .iter()
            .map(|p| Item {
                name: p.name().to_string(),
                price: p.price(),
                quantity: p.quantity(),
            })
            .collect();
        Self {
            tab: Tab::Inventory,
            items,
            cart: Vec::new(),
            orders: Vec::new(),
            method_selected: false,
            payment_error: false,
            form: FormState::default(),
        }
    }

    /// Open the store with an empty inventory
    #[must_use]
    pub fn empty() -> Self {
        Self::new(&StoreSeed::empty())
    }

    fn cart_total(&self) -> Money {
        self.cart.iter().fold(Money::from_cents(0), |acc, line| {
            acc.plus(self.items[line.item].price.times(line.quantity))
        })
    }

    fn render(&self) -> Vec<RenderedNode> {
        let mut nodes = Vec::new();
        self.render_nav(&mut nodes);
        match self.tab {
            Tab::Inventory => self.render_inventory(&mut nodes),
            Tab::Catalog => self.render_catalog(&mut nodes),
            Tab::Cart => self.render_cart(&mut nodes),
            Tab::Payments => self.render_payments(&mut nodes),
            Tab::Orders => self.render_orders(&mut nodes),
        }
        nodes
    }

    fn render_nav(&self, nodes: &mut Vec<RenderedNode>) {
        let tabs = [
            ("store-tab-inventory", "Inventory", Tab::Inventory),
            ("store-tab-catalog", "Catalog", Tab::Catalog),
            ("store-tab-cart", "Cart", Tab::Cart),
            ("store-tab-payments", "Payments", Tab::Payments),
            ("store-tab-orders", "Orders", Tab::Orders),
        ];
        for (test_id, label, tab) in tabs {
            push(
                nodes,
                NodeKind::Button,
                Some(test_id.to_string()),
                label,
                true,
                None,
                Some(Target::Act(Action::SwitchTab(tab))),
            );
        }
    }

    fn render_inventory(&self, nodes: &mut Vec<RenderedNode>) {
        push(nodes, NodeKind::Text, Some("inventory-title".into()), "Inventory", true, None, None);
        push(
            nodes,
            NodeKind::Input,
            Some("inventory-input-name".into()),
            &self.form.name,
            true,
            None,
            Some(Target::Input(Field::Name)),
        );
        push(
            nodes,
            NodeKind::Input,
            Some("inventory-input-price".into()),
            &self.form.price,
            true,
            None,
            Some(Target::Input(Field::Price)),
        );
        push(
            nodes,
            NodeKind::Input,
            Some("inventory-input-quantity".into()),
            &self.form.quantity,
            true,
            None,
            Some(Target::Input(Field::Quantity)),
        );
        push(
            nodes,
            NodeKind::Button,
            Some("inventory-submit-button".into()),
            "Add Product",
            true,
            None,
            Some(Target::Act(Action::SubmitForm)),
        );
        for (i, item) in self.items.iter().enumerate() {
            let badge = format!("{} in stock", item.quantity);
            let row_text = format!("{} {} {} - +", item.name, item.price, badge);
            let row = push(nodes, NodeKind::ListItem, None, &row_text, true, None, None);
            push(
                nodes,
                NodeKind::Text,
                Some(format!("inventory-item-name-{i}")),
                &item.name,
                true,
                Some(row),
                None,
            );
            push(
                nodes,
                NodeKind::Text,
                Some(format!("inventory-item-quantity-{i}")),
                &badge,
                true,
                Some(row),
                None,
            );
            push(
                nodes,
                NodeKind::Button,
                None,
                "-",
                true,
                Some(row),
                Some(Target::Act(Action::DecreaseStock(i))),
            );
            push(
                nodes,
                NodeKind::Button,
                None,
                "+",
                true,
                Some(row),
                Some(Target::Act(Action::IncreaseStock(i))),
            );
        }
    }

    fn render_catalog(&self, nodes: &mut Vec<RenderedNode>) {
        push(nodes, NodeKind::Text, Some("catalog-title".into()), "Catalog", true, None, None);
        for (i, item) in self.items.iter().enumerate() {
            let in_stock = item.quantity > 0;
            let label = if in_stock { ADD_TO_CART } else { OUT_OF_STOCK };
            let badge = format!("{} in stock", item.quantity);
            let row_text = format!("{} {} {} {}", item.name, item.price, badge, label);
            let row = push(nodes, NodeKind::ListItem, None, &row_text, true, None, None);
            push(
                nodes,
                NodeKind::Text,
                Some(format!("catalog-item-name-{i}")),
                &item.name,
                true,
                Some(row),
                None,
            );
            push(
                nodes,
                NodeKind::Text,
                Some(format!("catalog-item-quantity-{i}")),
                &badge,
                true,
                Some(row),
                None,
            );
            push(
                nodes,
                NodeKind::Button,
                Some(format!("catalog-item-add-button-{i}")),
                label,
                in_stock,
                Some(row),
                Some(Target::Act(Action::AddToCart(i))),
            );
        }
    }

    fn render_cart(&self, nodes: &mut Vec<RenderedNode>) {
        push(nodes, NodeKind::Text, Some("cart-title".into()), "Cart", true, None, None);
        for (i, line) in self.cart.iter().enumerate() {
            let item = &self.items[line.item];
            let subtotal = item.price.times(line.quantity);
            // unit price first, subtotal last
            let row_text = format!("{} {} x {} {}", item.name, line.quantity, item.price, subtotal);
            let row = push(nodes, NodeKind::ListItem, None, &row_text, true, None, None);
            push(
                nodes,
                NodeKind::Text,
                Some(format!("cart-item-name-{i}")),
                &item.name,
                true,
                Some(row),
                None,
            );
        }
        push(
            nodes,
            NodeKind::Text,
            Some("cart-total".into()),
            &format!("Total: {}", self.cart_total()),
            true,
            None,
            None,
        );
        push(
            nodes,
            NodeKind::Button,
            Some("cart-go-to-payment".into()),
            "Go to Payments",
            true,
            None,
            Some(Target::Act(Action::GoToPayment)),
        );
    }

    fn render_payments(&self, nodes: &mut Vec<RenderedNode>) {
        push(nodes, NodeKind::Text, Some("payment-title".into()), "Payments", true, None, None);
        for (i, line) in self.cart.iter().enumerate() {
            let item = &self.items[line.item];
            let subtotal = item.price.times(line.quantity);
            let row_text = format!("{} {} x {}", item.name, line.quantity, subtotal);
            let row = push(nodes, NodeKind::ListItem, None, &row_text, true, None, None);
            push(
                nodes,
                NodeKind::Text,
                Some(format!("payment-item-name-{i}")),
                &item.name,
                true,
                Some(row),
                None,
            );
        }
        push(
            nodes,
            NodeKind::Input,
            Some("payment-method-input-MBWay".into()),
            "MB Way",
            true,
            None,
            Some(Target::Act(Action::SelectMethod)),
        );
        push(
            nodes,
            NodeKind::Text,
            Some("payment-total".into()),
            &format!("Total: {}", self.cart_total()),
            true,
            None,
            None,
        );
        push(
            nodes,
            NodeKind::Button,
            Some("payment-confirm-button".into()),
            "Confirm Payment",
            true,
            None,
            Some(Target::Act(Action::ConfirmPayment)),
        );
        if self.payment_error {
            push(
                nodes,
                NodeKind::Text,
                Some("payment-error".into()),
                "Select a payment method",
                true,
                None,
                None,
            );
        }
    }

    fn render_orders(&self, nodes: &mut Vec<RenderedNode>) {
        push(nodes, NodeKind::Text, Some("orders-title".into()), "Orders", true, None, None);
        for (i, order) in self.orders.iter().enumerate() {
            let date = format!(
                "Date: {}/{}/{}",
                order.date.day(),
                order.date.month(),
                order.date.year()
            );
            let lines = order
                .lines
                .iter()
                .map(|l| format!("{} {} x {}", l.name, l.quantity, l.subtotal))
                .collect::<Vec<_>>()
                .join(" ");
            let row_text = format!("{lines} {date}");
            let row = push(nodes, NodeKind::ListItem, None, &row_text, true, None, None);
            push(
                nodes,
                NodeKind::Text,
                Some(format!("order-date-{i}")),
                &date,
                true,
                Some(row),
                None,
            );
        }
    }

    fn apply(&mut self, action: Action) -> VerdadResult<()> {
        match action {
            Action::SwitchTab(tab) => {
                self.tab = tab;
                self.payment_error = false;
            }
            Action::SubmitForm => return self.submit_form(),
            Action::IncreaseStock(i) => self.items[i].quantity += 1,
            // floor: stock never renders below zero
            Action::DecreaseStock(i) => {
                self.items[i].quantity = self.items[i].quantity.saturating_sub(1);
            }
            Action::AddToCart(i) => return self.add_to_cart(i),
            Action::GoToPayment => self.tab = Tab::Payments,
            Action::SelectMethod => {
                self.method_selected = true;
                self.payment_error = false;
            }
            Action::ConfirmPayment => self.confirm_payment(),
        }
        Ok(())
    }

    fn submit_form(&mut self) -> VerdadResult<()> {
        if self.form.name.trim().is_empty() {
            return Err(VerdadError::Interaction {
                message: "product name is required".to_string(),
            });
        }
        let price = Money::parse(&self.form.price).ok_or_else(|| VerdadError::Interaction {
            message: format!("price {:?} is not a plain decimal", self.form.price),
        })?;
        let quantity: u32 =
            self.form.quantity.parse().map_err(|_| VerdadError::Interaction {
                message: format!("quantity {:?} is not an integer", self.form.quantity),
            })?;
        // a duplicate name creates a second, distinct row
        self.items.push(Item {
            name: self.form.name.clone(),
            price,
            quantity,
        });
        self.form = FormState::default();
        Ok(())
    }

    fn add_to_cart(&mut self, i: usize) -> VerdadResult<()> {
        if self.items[i].quantity == 0 {
            return Err(VerdadError::Interaction {
                message: format!("{} is out of stock", self.items[i].name),
            });
        }
        self.items[i].quantity -= 1;
        match self.cart.iter_mut().find(|line| line.item == i) {
            Some(line) => line.quantity += 1,
            None => self.cart.push(CartLine { item: i, quantity: 1 }),
        }
        Ok(())
    }

    fn confirm_payment(&mut self) {
        if !self.method_selected {
            // no method: surface an error, create nothing
            self.payment_error = true;
            return;
        }
        let lines = self
            .cart
            .iter()
            .map(|line| {
                let item = &self.items[line.item];
                OrderLine {
                    name: item.name.clone(),
                    quantity: line.quantity,
                    subtotal: item.price.times(line.quantity),
                }
            })
            .collect();
        self.orders.insert(
            0,
            Order {
                lines,
                date: Local::now().date_naive(),
            },
        );
        self.cart.clear();
        self.method_selected = false;
        self.tab = Tab::Orders;
    }

    fn find(nodes: &[RenderedNode], id: NodeId) -> VerdadResult<usize> {
        let index = id.0 as usize;
        if index < nodes.len() {
            Ok(index)
        } else {
            Err(VerdadError::Interaction {
                message: format!("stale element handle {id:?}"),
            })
        }
    }
}

fn snapshot(index: usize, node: &RenderedNode) -> NodeSnapshot {
    NodeSnapshot {
        id: NodeId(index as u64),
        kind: node.kind,
        test_id: node.test_id.clone(),
        text: node.text.clone(),
        enabled: node.enabled,
    }
}

fn push(
    nodes: &mut Vec<RenderedNode>,
    kind: NodeKind,
    test_id: Option<String>,
    text: &str,
    enabled: bool,
    parent: Option<usize>,
    target: Option<Target>,
) -> usize {
    nodes.push(RenderedNode {
        kind,
        test_id,
        text: text.to_string(),
        enabled,
        parent,
        target,
    });
    nodes.len() - 1
}

impl Surface for MockStore {
    fn query(&self, selector: &Selector) -> Vec<NodeSnapshot> {
        let nodes = self.render();
        nodes
            .iter()
            .enumerate()
            .map(|(i, n)| snapshot(i, n))
            .filter(|s| s.matches(selector))
            .collect()
    }

    fn query_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeSnapshot> {
        let nodes = self.render();
        nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let mut parent = nodes[*i].parent;
                while let Some(p) = parent {
                    if p as u64 == scope.0 {
                        return true;
                    }
                    parent = nodes[p].parent;
                }
                false
            })
            .map(|(i, n)| snapshot(i, n))
            .filter(|s| s.matches(selector))
            .collect()
    }

    fn click(&mut self, node: NodeId) -> VerdadResult<()> {
        let nodes = self.render();
        let index = Self::find(&nodes, node)?;
        let rendered = &nodes[index];
        if !rendered.enabled {
            return Err(VerdadError::Interaction {
                message: format!("element {:?} is disabled", rendered.text),
            });
        }
        match rendered.target {
            Some(Target::Act(action)) => self.apply(action),
            // clicking a row or text region is a harmless no-op
            _ => Ok(()),
        }
    }

    fn fill(&mut self, node: NodeId, text: &str) -> VerdadResult<()> {
        let nodes = self.render();
        let index = Self::find(&nodes, node)?;
        match nodes[index].target {
            Some(Target::Input(Field::Name)) => self.form.name = text.to_string(),
            Some(Target::Input(Field::Price)) => self.form.price = text.to_string(),
            Some(Target::Input(Field::Quantity)) => self.form.quantity = text.to_string(),
            _ => {
                return Err(VerdadError::Interaction {
                    message: format!("element {:?} is not an input", nodes[index].text),
                })
            }
        }
        Ok(())
    }
}
