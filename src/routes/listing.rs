//! Product listing route handler.
//!
//! One page view is one fetch: the handler asks the Admin API for a fixed
//! 5-item cursor window, narrows it with the request's filter strings, and
//! renders the result as a table with previous/next cursor links.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::components::data_table::TableColumn;
use crate::error::AppError;
use crate::filters;
use crate::shopify::types::{PageInfo, Product, ProductPageRequest, ProductStatus};
use crate::state::AppState;

/// Route path the listing page lives at and links back to.
pub const LISTING_PATH: &str = "/listing";

/// Placeholder shown for records without an image.
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/30x40?text=No+Image";

/// Platform namespace prefix stripped from displayed IDs.
const GID_PREFIX: &str = "gid://shopify/Product/";

/// Query parameters for the listing page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// Pagination direction ("next" or "previous").
    pub rel: Option<String>,
    /// Opaque cursor echoed from a prior page's pagination metadata.
    pub cursor: Option<String>,
    /// Title filter (case-insensitive substring).
    pub title: Option<String>,
    /// Status filter (exact match, e.g. ACTIVE).
    pub status: Option<String>,
    /// Collection filter (substring against collection titles).
    pub collection: Option<String>,
}

/// Filter state for the current page.
///
/// Three independent strings; an empty string is match-all for its
/// predicate. The filter only narrows the already-fetched page and never
/// triggers another fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub title: String,
    pub status: String,
    pub collection: String,
}

impl ProductFilter {
    /// Build the filter from the inbound query parameters.
    #[must_use]
    pub fn from_query(query: &ListingQuery) -> Self {
        Self {
            title: query.title.clone().unwrap_or_default(),
            status: query.status.clone().unwrap_or_default(),
            collection: query.collection.clone().unwrap_or_default(),
        }
    }

    /// True when all three filter strings are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.status.is_empty() && self.collection.is_empty()
    }

    /// Reset all three filter strings in one action.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a record passes all three predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let matches_title = self.title.is_empty()
            || product
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());

        let matches_status =
            self.status.is_empty() || product.status.as_str() == self.status;

        let matches_collection = self.collection.is_empty()
            || product
                .collections
                .iter()
                .any(|title| title.contains(&self.collection));

        matches_title && matches_status && matches_collection
    }

    /// Narrow the current page to the records passing all predicates.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Pagination link descriptor for the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Whether the link is rendered inert.
    pub disabled: bool,
    /// Target URL (empty when disabled).
    pub href: String,
}

impl PageLink {
    fn disabled() -> Self {
        Self {
            disabled: true,
            href: String::new(),
        }
    }

    fn to(rel: &str, cursor: &str) -> Self {
        Self {
            disabled: false,
            href: listing_url(rel, cursor),
        }
    }
}

/// Build a listing URL carrying a pagination cursor.
fn listing_url(rel: &str, cursor: &str) -> String {
    format!("{LISTING_PATH}?rel={rel}&cursor={}", urlencoding::encode(cursor))
}

/// Derive the previous/next link descriptors from pagination metadata.
///
/// A link is disabled when its has-page flag is false or its cursor is
/// absent; otherwise it targets the same route with `rel` and the cursor.
#[must_use]
pub fn page_links(page_info: &PageInfo) -> (PageLink, PageLink) {
    let previous = match (&page_info.start_cursor, page_info.has_previous_page) {
        (Some(cursor), true) => PageLink::to("previous", cursor),
        _ => PageLink::disabled(),
    };

    let next = match (&page_info.end_cursor, page_info.has_next_page) {
        (Some(cursor), true) => PageLink::to("next", cursor),
        _ => PageLink::disabled(),
    };

    (previous, next)
}

/// Product row for the listing table.
///
/// All cells are precomputed strings; missing image/collection/metafield
/// values are substituted with fixed placeholders, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub title: String,
    pub status: String,
    pub status_class: String,
    pub inventory: String,
    pub image_url: String,
    pub image_alt: String,
    pub collection: String,
    pub metafield: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        let (image_url, image_alt) = match &product.image {
            Some(image) => (
                image.url.clone(),
                image
                    .alt_text
                    .clone()
                    .unwrap_or_else(|| "Alt text".to_string()),
            ),
            None => (PLACEHOLDER_IMAGE.to_string(), "Alt text".to_string()),
        };

        let status_class = match product.status {
            ProductStatus::Active => "badge-active",
            ProductStatus::Draft => "badge-draft",
            ProductStatus::Archived => "badge-archived",
        };

        Self {
            id: product
                .id
                .strip_prefix(GID_PREFIX)
                .unwrap_or(&product.id)
                .to_string(),
            title: product.title.clone(),
            status: product.status.as_str().to_string(),
            status_class: status_class.to_string(),
            inventory: format!("{} in stock", product.total_inventory),
            image_url,
            image_alt,
            collection: product
                .collections
                .first()
                .cloned()
                .unwrap_or_else(|| "No Collection".to_string()),
            metafield: product
                .metafield
                .clone()
                .unwrap_or_else(|| "No value".to_string()),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "listing/index.html")]
pub struct ListingTemplate {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<ProductRow>,
    pub filter: ProductFilter,
    pub previous: PageLink,
    pub next: PageLink,
    /// Direction of the current window, echoed through the filter form.
    pub rel: String,
    /// Cursor of the current window, echoed through the filter form.
    pub cursor: String,
    /// Current window with all filters cleared.
    pub clear_href: String,
}

fn table_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("image", "Image"),
        TableColumn::new("id", "Id"),
        TableColumn::new("title", "Title"),
        TableColumn::new("status", "Status"),
        TableColumn::new("inventory", "Inventory"),
        TableColumn::new("collections", "Collections"),
        TableColumn::new("metafields", "Metafields"),
    ]
}

/// The `rel`/`cursor` pair identifying the current window, for echoing in
/// form fields and the clear link.
fn window_params(request: &ProductPageRequest) -> (String, String) {
    match request {
        ProductPageRequest::First => (String::new(), String::new()),
        ProductPageRequest::After(cursor) => ("next".to_string(), cursor.clone()),
        ProductPageRequest::Before(cursor) => ("previous".to_string(), cursor.clone()),
    }
}

fn clear_url(request: &ProductPageRequest) -> String {
    match request {
        ProductPageRequest::First => LISTING_PATH.to_string(),
        ProductPageRequest::After(cursor) => listing_url("next", cursor),
        ProductPageRequest::Before(cursor) => listing_url("previous", cursor),
    }
}

/// Product listing page handler.
///
/// Exactly one Admin API round trip per render; filtering happens after the
/// fetch, over the fetched 5-item window only.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<ListingTemplate, AppError> {
    let request = ProductPageRequest::from_params(query.rel.as_deref(), query.cursor.as_deref());

    let page = state.shopify().list_products(&request).await?;

    let filter = ProductFilter::from_query(&query);
    let rows: Vec<ProductRow> = filter
        .apply(&page.products)
        .into_iter()
        .map(ProductRow::from)
        .collect();

    let (previous, next) = page_links(&page.page_info);
    let (rel, cursor) = window_params(&request);
    let clear_href = clear_url(&request);

    Ok(ListingTemplate {
        columns: table_columns(),
        rows,
        filter,
        previous,
        next,
        rel,
        cursor,
        clear_href,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::types::Image;

    fn product(title: &str, status: ProductStatus, collections: &[&str]) -> Product {
        Product {
            id: format!("gid://shopify/Product/{}", title.len()),
            title: title.to_string(),
            status,
            total_inventory: 3,
            collections: collections.iter().map(|c| (*c).to_string()).collect(),
            image: None,
            metafield: None,
        }
    }

    fn sample_page() -> Vec<Product> {
        vec![
            product("Blue Shirt", ProductStatus::Active, &["Summer"]),
            product("Red Shirt", ProductStatus::Active, &["Summer", "Sale"]),
            product("Green Hat", ProductStatus::Draft, &[]),
            product("Blue Jeans", ProductStatus::Archived, &["Denim"]),
            product("Socks", ProductStatus::Active, &["Basics"]),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_full_page() {
        let page = sample_page();
        let filter = ProductFilter::default();
        assert_eq!(filter.apply(&page).len(), page.len());
    }

    #[test]
    fn test_title_filter_is_case_insensitive_substring() {
        let page = sample_page();
        let filter = ProductFilter {
            title: "blue".to_string(),
            ..ProductFilter::default()
        };
        let kept: Vec<&str> = filter.apply(&page).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(kept, vec!["Blue Shirt", "Blue Jeans"]);
    }

    #[test]
    fn test_status_filter_is_exact_and_case_sensitive() {
        let page = sample_page();

        let filter = ProductFilter {
            status: "DRAFT".to_string(),
            ..ProductFilter::default()
        };
        assert_eq!(filter.apply(&page).len(), 1);

        // Lowercase does not match the API's SCREAMING_SNAKE_CASE status
        let filter = ProductFilter {
            status: "draft".to_string(),
            ..ProductFilter::default()
        };
        assert!(filter.apply(&page).is_empty());
    }

    #[test]
    fn test_collection_filter_matches_any_membership() {
        let page = sample_page();
        let filter = ProductFilter {
            collection: "Sale".to_string(),
            ..ProductFilter::default()
        };
        let kept: Vec<&str> = filter.apply(&page).iter().map(|p| p.title.as_str()).collect();
        assert_eq!(kept, vec!["Red Shirt"]);
    }

    #[test]
    fn test_predicates_combine_with_logical_and() {
        let page = sample_page();
        let filter = ProductFilter {
            title: "shirt".to_string(),
            status: "ACTIVE".to_string(),
            collection: "Summer".to_string(),
        };
        let kept = filter.apply(&page);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|p| {
            p.title.to_lowercase().contains("shirt")
                && p.status == ProductStatus::Active
                && p.collections.iter().any(|c| c.contains("Summer"))
        }));
    }

    #[test]
    fn test_filtering_never_grows_the_candidate_set() {
        // Narrowing a 5-record page can never surface a 6th record.
        let page = sample_page();
        let filter = ProductFilter {
            title: "s".to_string(),
            ..ProductFilter::default()
        };
        assert!(filter.apply(&page).len() <= page.len());
    }

    #[test]
    fn test_clear_restores_full_page() {
        let page = sample_page();
        let mut filter = ProductFilter {
            title: "blue".to_string(),
            status: "ACTIVE".to_string(),
            collection: "Summer".to_string(),
        };
        assert!(filter.apply(&page).len() < page.len());

        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&page).len(), page.len());
    }

    #[test]
    fn test_blue_shirt_scenarios() {
        let record = product("Blue Shirt", ProductStatus::Active, &[]);

        let filter = ProductFilter {
            title: "blue".to_string(),
            ..ProductFilter::default()
        };
        assert!(filter.matches(&record));

        let filter = ProductFilter {
            status: "DRAFT".to_string(),
            ..ProductFilter::default()
        };
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_page_links_first_page() {
        let page_info = PageInfo {
            has_next_page: true,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: Some("c1".to_string()),
        };

        let (previous, next) = page_links(&page_info);
        assert!(previous.disabled);
        assert!(!next.disabled);
        assert_eq!(next.href, "/listing?rel=next&cursor=c1");
    }

    #[test]
    fn test_page_links_disabled_without_cursor() {
        // has-next set but no end cursor: the link must stay disabled
        let page_info = PageInfo {
            has_next_page: true,
            has_previous_page: true,
            start_cursor: Some("s1".to_string()),
            end_cursor: None,
        };

        let (previous, next) = page_links(&page_info);
        assert!(!previous.disabled);
        assert_eq!(previous.href, "/listing?rel=previous&cursor=s1");
        assert!(next.disabled);
        assert!(next.href.is_empty());
    }

    #[test]
    fn test_page_links_encode_cursor() {
        let page_info = PageInfo {
            has_next_page: true,
            has_previous_page: false,
            start_cursor: None,
            end_cursor: Some("eyJsYXN0X2lkIjo0Mn0=".to_string()),
        };

        let (_, next) = page_links(&page_info);
        assert_eq!(next.href, "/listing?rel=next&cursor=eyJsYXN0X2lkIjo0Mn0%3D");
    }

    #[test]
    fn test_row_shortens_platform_id() {
        let record = product("Blue Shirt", ProductStatus::Active, &[]);
        let row = ProductRow::from(&record);
        assert!(!row.id.contains("gid://"));
        assert_eq!(row.id, record.id.trim_start_matches(GID_PREFIX));
    }

    #[test]
    fn test_row_placeholders_for_missing_fields() {
        let record = product("Bare", ProductStatus::Active, &[]);
        let row = ProductRow::from(&record);

        assert_eq!(row.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(row.image_alt, "Alt text");
        assert_eq!(row.collection, "No Collection");
        assert_eq!(row.metafield, "No value");
    }

    #[test]
    fn test_row_uses_image_and_first_collection_when_present() {
        let mut record = product("Blue Shirt", ProductStatus::Active, &["Summer", "Sale"]);
        record.image = Some(Image {
            url: "https://cdn.example.com/shirt.png".to_string(),
            alt_text: Some("A blue shirt".to_string()),
        });
        record.metafield = Some("cotton".to_string());
        record.total_inventory = 12;

        let row = ProductRow::from(&record);
        assert_eq!(row.image_url, "https://cdn.example.com/shirt.png");
        assert_eq!(row.image_alt, "A blue shirt");
        assert_eq!(row.collection, "Summer");
        assert_eq!(row.metafield, "cotton");
        assert_eq!(row.inventory, "12 in stock");
        assert_eq!(row.status, "ACTIVE");
        assert_eq!(row.status_class, "badge-active");
    }

    #[test]
    fn test_window_params_round_trip() {
        let (rel, cursor) = window_params(&ProductPageRequest::First);
        assert!(rel.is_empty() && cursor.is_empty());

        let (rel, cursor) = window_params(&ProductPageRequest::After("c1".to_string()));
        assert_eq!((rel.as_str(), cursor.as_str()), ("next", "c1"));

        let (rel, cursor) = window_params(&ProductPageRequest::Before("c2".to_string()));
        assert_eq!((rel.as_str(), cursor.as_str()), ("previous", "c2"));
    }

    #[test]
    fn test_clear_url_keeps_window_drops_filters() {
        assert_eq!(clear_url(&ProductPageRequest::First), "/listing");
        assert_eq!(
            clear_url(&ProductPageRequest::After("c1".to_string())),
            "/listing?rel=next&cursor=c1"
        );
    }
}
