//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::tags::TagSet;

/// Catalog product identifier, unique within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed menu product. Immutable once the catalog is built.
#[derive(Debug, Clone)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,

    /// Product name.
    pub name: String,

    /// One-line description shown on the menu card.
    pub description: String,

    /// Unit price.
    pub price: Money<'static, Currency>,

    /// Image URL for the menu card.
    pub image: String,

    /// Free-form tags used for menu filtering.
    pub tags: TagSet,

    /// Display badges, e.g. "Mais Vendido".
    pub badges: SmallVec<[String; 2]>,
}
