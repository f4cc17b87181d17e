//! Domain types for the Shopify Admin product listing.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// Product status in the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Product is visible on the storefront.
    Active,
    /// Product is not visible (work in progress).
    Draft,
    /// Product is hidden/archived.
    Archived,
}

impl ProductStatus {
    /// The status string as the Admin API spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Draft => "DRAFT",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product or media image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// A product record returned by the listing query.
///
/// Read-only snapshot of the Admin API's shape; never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Platform-namespaced ID (e.g., `gid://shopify/Product/123`).
    pub id: String,
    /// Product title.
    pub title: String,
    /// Product status.
    pub status: ProductStatus,
    /// Total inventory quantity across all variants.
    pub total_inventory: i64,
    /// Titles of the collections this product belongs to (up to 5).
    pub collections: Vec<String>,
    /// First product image, if any.
    pub image: Option<Image>,
    /// First metafield value, if any.
    pub metafield: Option<String>,
}

// =============================================================================
// Pagination Types
// =============================================================================

/// Pagination information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// One page of products, in API order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}

/// Cursor window for one page fetch.
///
/// Derived from the inbound `rel` and `cursor` query parameters: no cursor
/// means the first page, `rel=next` pages forward from the cursor, and any
/// other `rel` value with a cursor pages backward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPageRequest {
    /// First page, no cursor bound.
    First,
    /// Page forward from the given cursor.
    After(String),
    /// Page backward from the given cursor.
    Before(String),
}

impl ProductPageRequest {
    /// Parse the `rel`/`cursor` query parameters into a page request.
    ///
    /// Empty strings are treated as absent so that round-tripped form
    /// fields do not produce a bogus cursor.
    #[must_use]
    pub fn from_params(rel: Option<&str>, cursor: Option<&str>) -> Self {
        let rel = rel.filter(|r| !r.is_empty());
        let cursor = cursor.filter(|c| !c.is_empty());

        match (rel, cursor) {
            (Some("next"), Some(c)) => Self::After(c.to_owned()),
            (Some(_), Some(c)) => Self::Before(c.to_owned()),
            _ => Self::First,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(ProductStatus::Active.as_str(), "ACTIVE");
        assert_eq!(ProductStatus::Draft.as_str(), "DRAFT");
        assert_eq!(ProductStatus::Archived.as_str(), "ARCHIVED");
    }

    #[test]
    fn test_status_deserializes_screaming_snake_case() {
        let status: ProductStatus =
            serde_json::from_value(serde_json::json!("ACTIVE")).expect("valid status");
        assert_eq!(status, ProductStatus::Active);
    }

    #[test]
    fn test_page_request_without_cursor_is_first() {
        assert_eq!(
            ProductPageRequest::from_params(None, None),
            ProductPageRequest::First
        );
        // Direction alone is not enough
        assert_eq!(
            ProductPageRequest::from_params(Some("next"), None),
            ProductPageRequest::First
        );
        // Cursor alone is not enough
        assert_eq!(
            ProductPageRequest::from_params(None, Some("c1")),
            ProductPageRequest::First
        );
    }

    #[test]
    fn test_page_request_next_pages_forward() {
        assert_eq!(
            ProductPageRequest::from_params(Some("next"), Some("c1")),
            ProductPageRequest::After("c1".to_string())
        );
    }

    #[test]
    fn test_page_request_any_other_rel_pages_backward() {
        assert_eq!(
            ProductPageRequest::from_params(Some("previous"), Some("c1")),
            ProductPageRequest::Before("c1".to_string())
        );
        assert_eq!(
            ProductPageRequest::from_params(Some("bogus"), Some("c1")),
            ProductPageRequest::Before("c1".to_string())
        );
    }

    #[test]
    fn test_page_request_empty_strings_treated_as_absent() {
        assert_eq!(
            ProductPageRequest::from_params(Some(""), Some("")),
            ProductPageRequest::First
        );
        assert_eq!(
            ProductPageRequest::from_params(Some("next"), Some("")),
            ProductPageRequest::First
        );
    }
}
