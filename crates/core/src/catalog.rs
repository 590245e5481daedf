//! Catalog Store
//!
//! Read-only list of menu products, populated once at startup.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors related to catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
}

/// The product catalog. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from a list of products, preserving menu order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn from_products(products: impl Into<Vec<Product>>) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products, index })
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Iterates over the products in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products carrying the given filter tag, in menu order.
    #[must_use]
    pub fn filter(&self, tag: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.tags.contains(tag))
            .collect()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
