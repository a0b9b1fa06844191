//! Wire types for the Boutique admin API
//!
//! The backend wraps most payloads in a `result` envelope and serves pages
//! Spring-style under `result.content`. Auth responses are tolerated in two
//! nestings (token fields under `result`, or at the top level); see
//! [`TokenEnvelope`].

use boutique_core::TokenSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::error::ClientError;

/// Standard response envelope: payload under `result`, alongside an
/// optional code/message pair.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, erroring when the envelope carried none.
    pub fn into_result(self) -> Result<T, ClientError> {
        self.result.ok_or_else(|| {
            ClientError::UnexpectedResponse(
                self.message
                    .unwrap_or_else(|| "envelope carried no result".to_owned()),
            )
        })
    }
}

/// One page of a listing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, alias = "pageNumber")]
    pub number: u32,
    #[serde(default, alias = "pageSize")]
    pub size: u32,
    /// Some listing endpoints nest the counters under a `page` object
    /// instead of carrying them at the top level.
    #[serde(default)]
    pub page: Option<PageMeta>,
}

/// Nested page counters, as served by the customer listing endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// Token fields as they appear in auth responses. Snake-case spellings are
/// accepted alongside the camel-case ones.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TokenFields {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "accessToken", alias = "access_token")]
    pub access_token: Option<String>,
    #[serde(default, rename = "refreshToken", alias = "refresh_token")]
    pub refresh_token: Option<String>,
}

impl TokenFields {
    fn access(self) -> Option<String> {
        self.access_token.or(self.token)
    }
}

/// Auth response envelope tolerating both known nestings.
#[derive(Debug, Deserialize)]
pub struct TokenEnvelope {
    #[serde(default)]
    result: Option<TokenFields>,
    #[serde(flatten)]
    top: TokenFields,
}

impl TokenEnvelope {
    /// Extract the token pair.
    ///
    /// Priority order: fields nested under `result` win over top-level
    /// fields, and within a nesting `accessToken` wins over `token`. The
    /// refresh token may come from either nesting. Returns `None` when no
    /// shape yields an access token.
    pub fn into_token_set(self) -> Option<TokenSet> {
        let nested = self.result.unwrap_or_default();
        let top = self.top;
        let refresh_token = nested.refresh_token.clone().or(top.refresh_token.clone());
        let access_token = nested.access().or(top.access())?;
        Some(TokenSet {
            access_token,
            refresh_token,
        })
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /user/create`, `/user/create-staff`, `/user/create-admin` body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Catalog category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create/update body for a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Seasonal collection grouping products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image: Option<String>,
}

/// A size option (S, M, L, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeOption {
    pub id: i64,
    pub name: String,
}

/// Stock entry linking a product to a size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSize {
    #[serde(alias = "productSizeId")]
    pub id: i64,
    pub product_id: i64,
    pub size_id: i64,
    #[serde(default)]
    pub quantity: i64,
}

/// Create/update body for a product-size stock entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSizeRequest {
    pub product_id: i64,
    pub size_id: i64,
    pub quantity: i64,
}

/// Image attached to a product or collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i64,
    #[serde(default, alias = "imageUrl")]
    pub url: Option<String>,
}

/// Catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inventory: Option<i64>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub collection_id: Option<i64>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// Create/update body for a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    pub category_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Wire spelling, for query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipping => "SHIPPING",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Payment record attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
}

/// Customer order. Older backend builds misspell the status field as
/// `oderStatus` and date the order under `createdAt`; all spellings are
/// accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_code: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, alias = "oderStatus", alias = "orderStatus")]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default, alias = "createdAt", alias = "createdDate")]
    pub order_date: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub shipping_fee: Option<f64>,
    #[serde(default)]
    pub payment: Option<PaymentInfo>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// Sort direction for listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query parameters for `GET /orders/search-orders`.
#[derive(Debug, Clone, Default)]
pub struct OrderSearchParams {
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDir>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl OrderSearchParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_owned()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(date) = self.start_date {
            query.push(("startDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            query.push(("endDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sortBy", sort_by.clone()));
        }
        if let Some(dir) = self.sort_dir {
            query.push(("sortDir", dir.as_str().to_owned()));
        }
        if let Some(page) = self.page_number {
            query.push(("pageNumber", page.to_string()));
        }
        if let Some(size) = self.page_size {
            query.push(("pageSize", size.to_string()));
        }
        query
    }
}

/// Discount voucher. `percentTag` marks percentage discounts; the listing
/// endpoint misspells it `percentTage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default, alias = "percentTage")]
    pub percent_tag: bool,
    #[serde(default)]
    pub point_required: Option<i64>,
    #[serde(default)]
    pub min_order_amount: Option<f64>,
    #[serde(default)]
    pub max_discount_amount: Option<f64>,
    #[serde(default)]
    pub usage_limit: Option<i64>,
    #[serde(default)]
    pub used_count: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Create/update body for a voucher.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherRequest {
    pub code: String,
    pub discount_amount: f64,
    pub percent_tag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_required: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_envelope_prefers_nested_result() {
        let envelope: TokenEnvelope = serde_json::from_value(json!({
            "token": "outer",
            "refreshToken": "outer-refresh",
            "result": { "token": "inner", "refreshToken": "inner-refresh" }
        }))
        .unwrap();
        let tokens = envelope.into_token_set().unwrap();
        assert_eq!(tokens.access_token, "inner");
        assert_eq!(tokens.refresh_token.as_deref(), Some("inner-refresh"));
    }

    #[test]
    fn token_envelope_accepts_top_level_and_snake_case() {
        let envelope: TokenEnvelope =
            serde_json::from_value(json!({ "access_token": "a", "refresh_token": "r" })).unwrap();
        let tokens = envelope.into_token_set().unwrap();
        assert_eq!(tokens.access_token, "a");
        assert_eq!(tokens.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn token_envelope_prefers_access_token_over_token() {
        let envelope: TokenEnvelope = serde_json::from_value(json!({
            "result": { "accessToken": "primary", "token": "secondary" }
        }))
        .unwrap();
        assert_eq!(envelope.into_token_set().unwrap().access_token, "primary");
    }

    #[test]
    fn token_envelope_without_access_token_is_rejected() {
        let envelope: TokenEnvelope =
            serde_json::from_value(json!({ "result": { "refreshToken": "r" } })).unwrap();
        assert!(envelope.into_token_set().is_none());
    }

    #[test]
    fn empty_envelope_yields_unexpected_response() {
        let response: ApiResponse<Category> =
            serde_json::from_value(json!({ "code": 200, "message": "ok" })).unwrap();
        assert!(matches!(
            response.into_result(),
            Err(ClientError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn order_tolerates_misspelled_status_and_legacy_dates() {
        let order: Order = serde_json::from_value(json!({
            "id": 12,
            "oderStatus": "PENDING",
            "createdAt": "2025-03-01T10:00:00",
            "totalAmount": 125000.0
        }))
        .unwrap();
        assert_eq!(order.status, Some(OrderStatus::Pending));
        assert_eq!(order.order_date.as_deref(), Some("2025-03-01T10:00:00"));

        let unknown: Order = serde_json::from_value(json!({
            "id": 13,
            "status": "REFUND_REQUESTED"
        }))
        .unwrap();
        assert_eq!(unknown.status, Some(OrderStatus::Unknown));
    }

    #[test]
    fn search_params_serialize_in_wire_spelling() {
        let params = OrderSearchParams {
            status: Some(OrderStatus::Delivered),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 30),
            sort_dir: Some(SortDir::Desc),
            page_size: Some(10),
            ..Default::default()
        };
        let query = params.to_query();
        assert!(query.contains(&("status", "DELIVERED".to_owned())));
        assert!(query.contains(&("startDate", "2025-01-01".to_owned())));
        assert!(query.contains(&("sortDir", "desc".to_owned())));
        assert!(query.contains(&("pageSize", "10".to_owned())));
    }

    #[test]
    fn voucher_accepts_listing_misspelling() {
        let voucher: Voucher = serde_json::from_value(json!({
            "id": 1,
            "code": "SPRING10",
            "discountAmount": 10.0,
            "percentTage": true
        }))
        .unwrap();
        assert!(voucher.percent_tag);
    }
}
