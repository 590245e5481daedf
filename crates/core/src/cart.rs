//! Cart Engine
//!
//! In-memory, insertion-ordered collection of line items. All mutation goes
//! through the cart's operations, which uphold two invariants: no line ever
//! has quantity zero, and no two lines share a merge identity (catalog lines
//! merge by product id, custom sundaes by exact attribute triple).

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    money,
    products::{Product, ProductId},
    sundae::SundaeSelection,
};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The given line index does not exist (index, cart length).
    #[error("no cart line at index {0}; cart has {1} lines")]
    IndexOutOfRange(usize, usize),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Identity of a cart line.
///
/// Catalog lines are keyed by product id; custom sundaes get a
/// timestamp-derived UUID so they can never collide with catalog ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemId {
    /// A fixed menu product.
    Catalog(ProductId),

    /// A sundae built by the customer.
    Custom(Uuid),
}

/// A custom sundae ready to be added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomItem {
    /// Chosen attributes; the merge identity for custom lines.
    pub selection: SundaeSelection,

    /// Display name, AI-generated or the builder default.
    pub name: String,

    /// Display description.
    pub description: String,

    /// Fixed builder price.
    pub price: Money<'static, Currency>,
}

/// Discriminates catalog lines from built sundaes.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemKind {
    /// References a catalog product.
    Catalog,

    /// Built via the sundae builder.
    Custom(SundaeSelection),
}

/// One entry in the cart.
#[derive(Debug, Clone)]
pub struct LineItem {
    id: LineItemId,
    name: String,
    description: String,
    price: Money<'static, Currency>,
    image: Option<String>,
    quantity: u32,
    kind: LineItemKind,
}

impl LineItem {
    /// Line identity.
    #[must_use]
    pub fn id(&self) -> LineItemId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price.
    #[must_use]
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Image URL, if the line came from the catalog.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Current quantity, always at least 1.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Kind discriminator.
    #[must_use]
    pub fn kind(&self) -> &LineItemKind {
        &self.kind
    }

    /// Whether this line is a built sundae.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self.kind, LineItemKind::Custom(_))
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money<'static, Currency> {
        let minor_units = self
            .price
            .to_minor_units()
            .saturating_mul(i64::from(self.quantity));

        Money::from_minor(minor_units, self.price.currency())
    }

    fn matches_product(&self, id: ProductId) -> bool {
        matches!(self.id, LineItemId::Catalog(product_id) if product_id == id)
    }

    fn matches_selection(&self, selection: &SundaeSelection) -> bool {
        matches!(&self.kind, LineItemKind::Custom(existing) if existing == selection)
    }
}

/// The shopping cart. Created empty, mutated only through these operations,
/// and reset to empty exactly at successful checkout.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Outcome of a quantity adjustment.
#[derive(Debug)]
pub enum QuantityChange {
    /// The line remains, with its new quantity.
    Updated(u32),

    /// The quantity dropped to zero or below and the line was removed.
    Removed(LineItem),
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a catalog product, merging into an existing line
    /// for the same product id if one exists.
    pub fn add_catalog_item(&mut self, product: &Product) -> LineItemId {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches_product(product.id))
        {
            line.quantity = line.quantity.saturating_add(1);
            return line.id;
        }

        let id = LineItemId::Catalog(product.id);

        self.items.push(LineItem {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image: Some(product.image.clone()),
            quantity: 1,
            kind: LineItemKind::Catalog,
        });

        id
    }

    /// Adds one unit of a custom sundae. Lines with an identical
    /// (base, syrup, extra) triple merge; otherwise a new line is appended
    /// under a freshly minted custom id.
    pub fn add_custom_item(&mut self, item: CustomItem) -> LineItemId {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.matches_selection(&item.selection))
        {
            line.quantity = line.quantity.saturating_add(1);
            return line.id;
        }

        let id = LineItemId::Custom(Uuid::now_v7());

        self.items.push(LineItem {
            id,
            name: item.name,
            description: item.description,
            price: item.price,
            image: None,
            quantity: 1,
            kind: LineItemKind::Custom(item.selection),
        });

        id
    }

    /// Removes the line at `index`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] for a bad index; the cart is
    /// left unchanged.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange(index, self.items.len()));
        }

        Ok(self.items.remove(index))
    }

    /// Adds `delta` to the quantity of the line at `index`. A resulting
    /// quantity of zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::IndexOutOfRange`] for a bad index; the cart is
    /// left unchanged.
    pub fn change_quantity(
        &mut self,
        index: usize,
        delta: i32,
    ) -> Result<QuantityChange, CartError> {
        let len = self.items.len();

        let Some(line) = self.items.get_mut(index) else {
            return Err(CartError::IndexOutOfRange(index, len));
        };

        let quantity = i64::from(line.quantity).saturating_add(i64::from(delta));

        if quantity > 0 {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            return Ok(QuantityChange::Updated(line.quantity));
        }

        Ok(QuantityChange::Removed(self.items.remove(index)))
    }

    /// Cart total, recomputed from the lines on every call.
    ///
    /// # Errors
    ///
    /// Returns a wrapped money error on currency mismatch between lines.
    pub fn total(&self) -> Result<Money<'static, Currency>, CartError> {
        let total = self
            .items
            .iter()
            .try_fold(money::brl(0), |acc, line| acc.add(line.line_total()))?;

        Ok(total)
    }

    /// Sum of quantities across all lines, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Empties the cart. Used at successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Gets the line at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::SmallVec;
    use testresult::TestResult;

    use crate::{money::format_brl, sundae::SundaeDraft, tags::TagSet};

    use super::*;

    fn product(id: u32, price_minor: i64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: money::brl(price_minor),
            image: String::new(),
            tags: TagSet::new(),
            badges: SmallVec::new(),
        }
    }

    fn sundae(base: &str, syrup: &str, extra: &str) -> CustomItem {
        CustomItem {
            selection: SundaeSelection::new(base, syrup, extra),
            name: "Sundae".to_string(),
            description: String::new(),
            price: money::brl(22_90),
        }
    }

    #[test]
    fn repeated_catalog_adds_merge_into_one_line() -> TestResult {
        let mut cart = Cart::new();
        let pastel_dream = product(1, 14_90);

        for _ in 0..3 {
            cart.add_catalog_item(&pastel_dream);
        }

        assert_eq!(cart.len(), 1);

        let line = cart.get(0).ok_or("line missing")?;
        assert_eq!(line.quantity(), 3);
        assert_eq!(line.id(), LineItemId::Catalog(ProductId(1)));

        Ok(())
    }

    #[test]
    fn different_products_get_their_own_lines() {
        let mut cart = Cart::new();

        cart.add_catalog_item(&product(1, 14_90));
        cart.add_catalog_item(&product(4, 16_90));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn identical_sundae_triples_merge() -> TestResult {
        let mut cart = Cart::new();

        let first = cart.add_custom_item(sundae("Chocolate", "Caramelo", "Granulado"));
        let second = cart.add_custom_item(sundae("Chocolate", "Caramelo", "Granulado"));

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).ok_or("line missing")?.quantity(), 2);

        Ok(())
    }

    #[test]
    fn differing_sundae_triples_never_merge() {
        let mut cart = Cart::new();

        let first = cart.add_custom_item(sundae("Chocolate", "Caramelo", "Granulado"));
        let second = cart.add_custom_item(sundae("Chocolate", "Caramelo", "Paçoca"));

        assert_ne!(first, second);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn custom_ids_are_distinct_from_catalog_ids() {
        let mut cart = Cart::new();

        cart.add_catalog_item(&product(1, 14_90));
        cart.add_custom_item(sundae("Chocolate", "Caramelo", "Granulado"));

        let ids: Vec<LineItemId> = cart.items().iter().map(LineItem::id).collect();

        assert!(matches!(ids.first(), Some(LineItemId::Catalog(_))));
        assert!(matches!(ids.get(1), Some(LineItemId::Custom(_))));
    }

    #[test]
    fn catalog_and_custom_lines_do_not_merge_with_each_other() {
        let mut cart = Cart::new();

        cart.add_catalog_item(&product(1, 14_90));
        cart.add_custom_item(sundae("Chocolate", "Caramelo", "Granulado"));
        cart.add_catalog_item(&product(1, 14_90));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn remove_item_out_of_range_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_catalog_item(&product(1, 14_90));

        let result = cart.remove_item(5);

        assert!(
            matches!(result, Err(CartError::IndexOutOfRange(5, 1))),
            "expected IndexOutOfRange, got {result:?}"
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn quantity_dropping_to_zero_removes_the_line() -> TestResult {
        let mut cart = Cart::new();
        cart.add_catalog_item(&product(1, 14_90));
        cart.add_catalog_item(&product(1, 14_90));

        let change = cart.change_quantity(0, -1)?;
        assert!(matches!(change, QuantityChange::Updated(1)));

        let change = cart.change_quantity(0, -1)?;
        assert!(matches!(change, QuantityChange::Removed(_)));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn quantity_never_reaches_zero_in_place() -> TestResult {
        let mut cart = Cart::new();
        cart.add_catalog_item(&product(1, 14_90));

        cart.change_quantity(0, -10)?;

        assert!(cart.items().iter().all(|line| line.quantity() >= 1));
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn change_quantity_out_of_range_is_an_error() {
        let mut cart = Cart::new();

        let result = cart.change_quantity(0, 1);

        assert!(
            matches!(result, Err(CartError::IndexOutOfRange(0, 0))),
            "expected IndexOutOfRange, got {result:?}"
        );
    }

    #[test]
    fn total_is_rederived_after_every_mutation() -> TestResult {
        let mut cart = Cart::new();
        let pastel_dream = product(1, 14_90);

        cart.add_catalog_item(&pastel_dream);
        cart.add_catalog_item(&pastel_dream);
        assert_eq!(format_brl(&cart.total()?), "R$ 29,80");

        cart.remove_item(0)?;
        assert_eq!(format_brl(&cart.total()?), "R$ 0,00");

        Ok(())
    }

    #[test]
    fn add_then_remove_restores_the_prior_total() -> TestResult {
        let mut cart = Cart::new();
        cart.add_catalog_item(&product(1, 14_90));

        let before = cart.total()?;

        cart.add_catalog_item(&product(6, 3_00));
        cart.remove_item(1)?;

        assert_eq!(cart.total()?, before);

        Ok(())
    }

    #[test]
    fn total_includes_custom_lines() -> TestResult {
        let mut cart = Cart::new();

        cart.add_catalog_item(&product(5, 4_50));
        cart.add_custom_item(SundaeDraft::default().into_custom_item());

        assert_eq!(format_brl(&cart.total()?), "R$ 27,40");

        Ok(())
    }

    #[test]
    fn clear_empties_the_cart() -> TestResult {
        let mut cart = Cart::new();
        cart.add_catalog_item(&product(1, 14_90));
        cart.add_custom_item(sundae("Chocolate", "Caramelo", "Granulado"));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(format_brl(&cart.total()?), "R$ 0,00");

        Ok(())
    }
}
