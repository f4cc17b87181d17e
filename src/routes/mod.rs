//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /            - Redirect to the product listing
//! GET  /listing     - Product listing (rel/cursor pagination + filters)
//! GET  /health      - Health check (in main)
//! ```

pub mod listing;

use axum::{Router, response::Redirect, routing::get};

use crate::state::AppState;

/// Assemble the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route(listing::LISTING_PATH, get(listing::index))
}

/// Redirect the root to the listing page.
async fn root() -> Redirect {
    Redirect::permanent(listing::LISTING_PATH)
}
