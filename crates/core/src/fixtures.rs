//! Catalog Fixtures
//!
//! The menu ships as a YAML fixture; prices are written as decimal BRL
//! amounts (e.g. `"14.90 BRL"`).

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    products::{Product, ProductId},
    tags::TagSet,
};

const MENU_YAML: &str = include_str!("../fixtures/menu.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Catalog construction error (e.g. duplicate id)
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Products in menu order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Menu card description
    pub description: String,

    /// Product price (e.g., "14.90 BRL")
    pub price: String,

    /// Image URL
    pub image: String,

    /// Filter tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Display badges
    #[serde(default)]
    pub badges: Vec<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product {
            id: ProductId(fixture.id),
            name: fixture.name,
            description: fixture.description,
            price: Money::from_minor(minor_units, currency),
            image: fixture.image,
            tags: TagSet::from_strings(fixture.tags),
            badges: fixture.badges.into_iter().collect(),
        })
    }
}

/// Parse price string (e.g. "14.90 BRL") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "BRL" => iso::BRL,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse a menu catalog from YAML.
///
/// # Errors
///
/// Returns an error on malformed YAML, bad prices, or duplicate ids.
pub fn from_yaml(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: MenuFixture = serde_norway::from_str(yaml)?;

    let products = fixture
        .products
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog::from_products(products)?)
}

/// Load the built-in Gelateria Pastel menu.
///
/// # Errors
///
/// Returns an error if the bundled fixture is malformed.
pub fn builtin_menu() -> Result<Catalog, FixtureError> {
    from_yaml(MENU_YAML)
}
