//! Query modules for the PokeMaster SDK.
//!
//! Each module provides a query struct that borrows a
//! [`CatalogSource`](crate::catalog::CatalogSource) and turns search
//! parameters into catalog requests through the
//! [`query_builder`](crate::query_builder).

pub mod cards;
pub mod sets;

pub use cards::CardQuery;
pub use sets::SetQuery;
