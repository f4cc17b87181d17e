//! Shopify Admin API GraphQL client.
//!
//! Provides a typed, read-only client for the product listing capability of
//! the Admin API. Authentication is a given: the client is constructed from
//! a custom-app access token supplied by configuration and does not
//! implement any OAuth handshake.

mod client;
pub mod queries;
pub mod types;

pub use client::AdminClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A GraphQL error returned by the Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopify_error_display() {
        let err = ShopifyError::RateLimited(30);
        assert_eq!(err.to_string(), "Rate limited, retry after 30 seconds");

        let err = ShopifyError::Unauthorized("expired token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: expired token");
    }

    #[test]
    fn test_graphql_errors_joined_in_display() {
        let err = ShopifyError::GraphQL(vec![
            GraphQLError {
                message: "Field 'foo' doesn't exist".to_string(),
                locations: vec![GraphQLErrorLocation { line: 3, column: 5 }],
                path: vec![],
            },
            GraphQLError {
                message: "Throttled".to_string(),
                locations: vec![],
                path: vec![],
            },
        ]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'foo' doesn't exist; Throttled"
        );
    }
}
