//! GraphQL document and response shapes for the product listing query.
//!
//! The document is hand-written and posted as a JSON body; the response
//! shapes below mirror the connection structure the Admin API returns and
//! are flattened into the domain types in [`crate::shopify::types`].

use serde::{Deserialize, Serialize};

use super::types::{Image, PageInfo, Product, ProductPage, ProductPageRequest, ProductStatus};

/// Fixed page size for the listing view.
pub const PAGE_SIZE: i64 = 5;

/// Product listing query.
///
/// Requests id, title, status, total inventory, up to 5 collection titles,
/// the first image and the first metafield value, plus full page info.
pub const PRODUCT_LISTING_QUERY: &str = r"
query ProductListing($first: Int, $after: String, $last: Int, $before: String) {
  products(first: $first, after: $after, last: $last, before: $before) {
    pageInfo {
      startCursor
      endCursor
      hasNextPage
      hasPreviousPage
    }
    nodes {
      id
      title
      status
      totalInventory
      collections(first: 5) {
        edges {
          node {
            title
          }
        }
      }
      images(first: 1) {
        edges {
          node {
            url
            altText
          }
        }
      }
      metafields(first: 1) {
        edges {
          node {
            value
          }
        }
      }
    }
  }
}
";

/// Variables for [`PRODUCT_LISTING_QUERY`].
#[derive(Debug, Default, Serialize)]
pub struct ProductListingVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

impl ProductListingVariables {
    /// Build the variables for a cursor window.
    ///
    /// Forward windows use `first`/`after`, backward windows `last`/`before`;
    /// the first page binds `first` only.
    #[must_use]
    pub fn for_request(request: &ProductPageRequest, page_size: i64) -> Self {
        match request {
            ProductPageRequest::First => Self {
                first: Some(page_size),
                ..Self::default()
            },
            ProductPageRequest::After(cursor) => Self {
                first: Some(page_size),
                after: Some(cursor.clone()),
                ..Self::default()
            },
            ProductPageRequest::Before(cursor) => Self {
                last: Some(page_size),
                before: Some(cursor.clone()),
                ..Self::default()
            },
        }
    }
}

// =============================================================================
// Response shapes
// =============================================================================

/// Top-level `data` shape for the listing query.
#[derive(Debug, Deserialize)]
pub struct ProductListingData {
    pub products: ProductConnection,
}

/// The `products` connection.
#[derive(Debug, Deserialize)]
pub struct ProductConnection {
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfoNode,
    #[serde(default)]
    pub nodes: Vec<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoNode {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    pub status: ProductStatus,
    pub total_inventory: Option<i64>,
    #[serde(default)]
    pub collections: ConnectionEdges<CollectionNode>,
    #[serde(default)]
    pub images: ConnectionEdges<ImageNode>,
    #[serde(default)]
    pub metafields: ConnectionEdges<MetafieldNode>,
}

/// An edges-wrapped sub-connection.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ConnectionEdges<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for ConnectionEdges<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct CollectionNode {
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub url: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetafieldNode {
    pub value: String,
}

// =============================================================================
// Conversions
// =============================================================================

/// Flatten the raw connection into the domain page envelope.
#[must_use]
pub fn convert_page(connection: ProductConnection) -> ProductPage {
    ProductPage {
        products: connection.nodes.into_iter().map(convert_product).collect(),
        page_info: PageInfo {
            has_next_page: connection.page_info.has_next_page,
            has_previous_page: connection.page_info.has_previous_page,
            start_cursor: connection.page_info.start_cursor,
            end_cursor: connection.page_info.end_cursor,
        },
    }
}

fn convert_product(node: ProductNode) -> Product {
    Product {
        id: node.id,
        title: node.title,
        status: node.status,
        total_inventory: node.total_inventory.unwrap_or(0),
        collections: node
            .collections
            .edges
            .into_iter()
            .map(|e| e.node.title)
            .collect(),
        image: node.images.edges.into_iter().next().map(|e| Image {
            url: e.node.url,
            alt_text: e.node.alt_text,
        }),
        metafield: node.metafields.edges.into_iter().next().map(|e| e.node.value),
    }
}
