//! Tidepool Admin library.
//!
//! Merchant-facing admin panel for the Tidepool storefront. The single
//! functional page is a paginated, filterable product listing backed by the
//! Shopify Admin GraphQL API.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod shopify;
pub mod state;
