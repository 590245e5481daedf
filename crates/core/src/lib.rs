//! Gelateria
//!
//! Core domain engine for the Gelateria Pastel storefront demo: the product
//! catalog, the in-memory cart, the sundae building rules and the simulated
//! order-status timeline. Everything here is synchronous and free of I/O;
//! the async shell (chef client, timers, presentation facade) lives in the
//! companion application crate.

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod money;
pub mod products;
pub mod status;
pub mod sundae;
pub mod tags;
