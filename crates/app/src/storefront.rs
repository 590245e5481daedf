//! Storefront facade.
//!
//! The presentation boundary: owns the catalog, the cart, the sundae
//! builder and the order tracker, and exposes the operations a rendering
//! layer calls plus read accessors for everything it draws. A single
//! logical thread drives it; every mutation completes before the next
//! user event is processed.

use std::{fmt, sync::Arc, time::Duration};

use jiff::Timestamp;
use thiserror::Error;
use tokio::sync::broadcast;

use gelateria::{
    cart::{Cart, CartError, LineItem, LineItemId, QuantityChange},
    catalog::Catalog,
    products::{Product, ProductId},
    status::OrderStatus,
    sundae::{SundaeDraft, SundaeSelection},
};

use crate::{
    builder::{BuilderError, BuilderState, SundaeBuilder},
    chef::Chef,
    concierge::{self, ConciergeError},
    events::StorefrontEvent,
    orders::OrderTracker,
};

/// Simulated payment processing delay at checkout.
pub const CHECKOUT_PROCESSING_DELAY: Duration = Duration::from_millis(1500);

const TOAST_ITEM_ADDED: &str = "Item adicionado ao carrinho!";

const EVENT_CAPACITY: usize = 32;

/// Errors surfaced at the storefront boundary.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The product id is not in the catalog.
    #[error("unknown product id {0}")]
    UnknownProduct(ProductId),

    /// A cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A builder operation failed.
    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Errors from checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was attempted with an empty cart.
    #[error("Adicione itens ao carrinho primeiro!")]
    EmptyCart,
}

/// The storefront.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    builder: SundaeBuilder,
    tracker: OrderTracker,
    chef: Arc<dyn Chef>,
    events: broadcast::Sender<StorefrontEvent>,
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Creates a storefront over `catalog`, with `chef` backing both the
    /// sundae builder and the concierge.
    #[must_use]
    pub fn new(catalog: Catalog, chef: Arc<dyn Chef>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            cart: Cart::new(),
            builder: SundaeBuilder::new(Arc::clone(&chef)),
            tracker: OrderTracker::new(events.clone()),
            catalog,
            chef,
            events,
        }
    }

    /// Subscribes to presentation events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.events.subscribe()
    }

    /// The full menu in display order.
    pub fn menu(&self) -> impl Iterator<Item = &Product> {
        self.catalog.iter()
    }

    /// The menu filtered by tag.
    #[must_use]
    pub fn menu_filtered(&self, tag: &str) -> Vec<&Product> {
        self.catalog.filter(tag)
    }

    /// The catalog backing the menu.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Adds one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::UnknownProduct`] for an id not in the
    /// catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<LineItemId, StorefrontError> {
        let product = self
            .catalog
            .get(id)
            .ok_or(StorefrontError::UnknownProduct(id))?;

        let line = self.cart.add_catalog_item(product);
        self.toast(TOAST_ITEM_ADDED);

        Ok(line)
    }

    /// Removes the cart line at `index`.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`CartError`] for a bad index.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, StorefrontError> {
        Ok(self.cart.remove_item(index)?)
    }

    /// Adjusts the quantity of the cart line at `index` by `delta`.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`CartError`] for a bad index.
    pub fn change_quantity(
        &mut self,
        index: usize,
        delta: i32,
    ) -> Result<QuantityChange, StorefrontError> {
        Ok(self.cart.change_quantity(index, delta)?)
    }

    /// Read access to the cart for rendering.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Opens the sundae builder with a fresh draft.
    pub fn open_sundae_builder(&mut self) {
        self.builder.open();
    }

    /// Closes the sundae builder, discarding the draft.
    pub fn close_sundae_builder(&mut self) {
        self.builder.close();
    }

    /// Replaces the draft's attribute selection.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`BuilderError`] when the builder is not open.
    pub fn select_sundae(&mut self, selection: SundaeSelection) -> Result<(), StorefrontError> {
        Ok(self.builder.select(selection)?)
    }

    /// Asks the chef for a playful name for the current draft.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`BuilderError`] when the builder is not open.
    pub async fn request_magic_name(&mut self) -> Result<(), StorefrontError> {
        Ok(self.builder.request_magic_name().await?)
    }

    /// Commits the draft to the cart and closes the builder.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`BuilderError`] when the builder is closed or
    /// already committed.
    pub fn add_sundae_to_cart(&mut self) -> Result<LineItemId, StorefrontError> {
        let line = self.builder.commit(&mut self.cart)?;

        self.builder.close();
        self.toast(TOAST_ITEM_ADDED);

        Ok(line)
    }

    /// Current builder state.
    #[must_use]
    pub fn builder_state(&self) -> BuilderState {
        self.builder.state()
    }

    /// The draft being assembled in the builder.
    #[must_use]
    pub fn draft(&self) -> &SundaeDraft {
        self.builder.draft()
    }

    /// Asks the chef for a single menu suggestion.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::EmptyRequest`] for a blank request.
    pub async fn ask_chef(&self, customer_request: &str) -> Result<String, ConciergeError> {
        concierge::suggest(self.chef.as_ref(), &self.catalog, customer_request).await
    }

    /// Checks out the cart. After a simulated processing delay the cart is
    /// emptied and the status timeline starts; the cart is empty by the
    /// time this returns. Returns the delivery estimate fixed at
    /// `placed_at` plus thirty minutes.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when the cart has no items.
    pub async fn checkout(&mut self, placed_at: Timestamp) -> Result<Timestamp, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        tokio::time::sleep(CHECKOUT_PROCESSING_DELAY).await;

        self.cart.clear();

        Ok(self.tracker.start(placed_at))
    }

    /// Current order stage, if an order has been placed.
    #[must_use]
    pub fn order_status(&self) -> Option<OrderStatus> {
        self.tracker.status()
    }

    /// Delivery estimate, if an order has been placed.
    #[must_use]
    pub fn estimated_delivery(&self) -> Option<Timestamp> {
        self.tracker.estimated_delivery()
    }

    fn toast(&self, message: &str) {
        self.events
            .send(StorefrontEvent::Toast(message.to_string()))
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use gelateria::fixtures;

    use crate::chef::MockChef;

    use super::*;

    fn storefront() -> TestResult<Storefront> {
        Ok(Storefront::new(
            fixtures::builtin_menu()?,
            Arc::new(MockChef::new()),
        ))
    }

    #[tokio::test]
    async fn unknown_product_ids_are_rejected() -> TestResult {
        let mut storefront = storefront()?;

        let result = storefront.add_to_cart(ProductId(99));

        assert!(
            matches!(result, Err(StorefrontError::UnknownProduct(ProductId(99)))),
            "expected UnknownProduct, got {result:?}"
        );
        assert!(storefront.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn adding_to_the_cart_raises_a_toast() -> TestResult {
        let mut storefront = storefront()?;
        let mut events = storefront.subscribe();

        storefront.add_to_cart(ProductId(1))?;

        assert_eq!(
            events.recv().await?,
            StorefrontEvent::Toast("Item adicionado ao carrinho!".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn menu_filter_matches_the_catalog() -> TestResult {
        let storefront = storefront()?;

        assert_eq!(storefront.menu().count(), 6);
        assert_eq!(storefront.menu_filtered("bestseller").len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_with_an_empty_cart_is_rejected() -> TestResult {
        let mut storefront = storefront()?;

        let result = storefront.checkout(Timestamp::UNIX_EPOCH).await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(storefront.order_status(), None);

        Ok(())
    }
}
