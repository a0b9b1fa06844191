//! Order lifecycle and revenue client methods

use chrono::NaiveDate;
use reqwest::Method;

use super::AdminClient;
use crate::client::error::ClientError;
use crate::types::{ApiResponse, Order, OrderSearchParams, Page};

impl AdminClient {
    /// List orders, paginated
    pub async fn list_orders(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<Page<Order>, ClientError> {
        let request = self.request(Method::GET, "/orders/get-orders").query(&[
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ]);
        let response: ApiResponse<Page<Order>> = self.execute(request).await?;
        response.into_result()
    }

    /// Search orders by status, date range and sort order
    pub async fn search_orders(
        &self,
        params: &OrderSearchParams,
    ) -> Result<Page<Order>, ClientError> {
        let request = self
            .request(Method::GET, "/orders/search-orders")
            .query(&params.to_query());
        let response: ApiResponse<Page<Order>> = self.execute(request).await?;
        response.into_result()
    }

    /// Get a single order
    pub async fn get_order(&self, id: i64) -> Result<Order, ClientError> {
        let request = self.request(Method::GET, &format!("/orders/get-order/{id}"));
        let response: ApiResponse<Order> = self.execute(request).await?;
        response.into_result()
    }

    /// Confirm a customer's cancellation request
    pub async fn confirm_cancel_order(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::PATCH, &format!("/orders/confirm-cancel-order/{id}")))
            .await
    }

    /// Total revenue over an inclusive date range (dashboard statistic)
    pub async fn total_revenue(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<f64, ClientError> {
        let request = self.request(Method::GET, "/orders/total-revenue").query(&[
            ("startDate", start_date.format("%Y-%m-%d").to_string()),
            ("endDate", end_date.format("%Y-%m-%d").to_string()),
        ]);
        let response: ApiResponse<f64> = self.execute(request).await?;
        response.into_result()
    }
}
