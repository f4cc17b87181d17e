//! Shopify Admin API GraphQL client.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::config::ShopifyAdminConfig;

use super::queries::{self, PAGE_SIZE, ProductListingVariables};
use super::types::{ProductPage, ProductPageRequest};
use super::{GraphQLError, GraphQLErrorLocation, ShopifyError};

/// Shopify Admin API GraphQL client.
///
/// Read-only access to the product listing capability. Cheaply cloneable
/// via `Arc`; one request per invocation, no retry logic of its own.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl AdminClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        let client = reqwest::Client::new();

        Self {
            inner: Arc::new(AdminClientInner {
                client,
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    /// GraphQL endpoint for the configured store and API version.
    fn endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.store, self.inner.api_version
        )
    }

    /// Execute a GraphQL query.
    async fn execute<T, V>(&self, query: &str, variables: &V) -> Result<T, ShopifyError>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(self.endpoint())
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path,
                })
                .collect();
            return Err(ShopifyError::GraphQL(converted_errors));
        }

        graphql_response.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    /// Fetch one page of products for the given cursor window.
    ///
    /// Issues exactly one request; a fixed page size of 5 records is
    /// requested regardless of direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response. There is no retry; the caller owns failure handling.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        request: &ProductPageRequest,
    ) -> Result<ProductPage, ShopifyError> {
        let variables = ProductListingVariables::for_request(request, PAGE_SIZE);

        let data: queries::ProductListingData = self
            .execute(queries::PRODUCT_LISTING_QUERY, &variables)
            .await?;

        Ok(queries::convert_page(data.products))
    }
}
