//! Voucher management client methods

use reqwest::Method;

use super::AdminClient;
use crate::client::error::ClientError;
use crate::types::{ApiResponse, Page, Voucher, VoucherRequest};

impl AdminClient {
    /// List vouchers, paginated, optionally filtered by code
    pub async fn list_vouchers(
        &self,
        page_number: u32,
        page_size: u32,
        code: Option<&str>,
    ) -> Result<Page<Voucher>, ClientError> {
        let mut query = vec![
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(code) = code {
            query.push(("code", code.to_owned()));
        }
        let request = self.request(Method::GET, "/voucher/getAll").query(&query);
        let response: ApiResponse<Page<Voucher>> = self.execute(request).await?;
        response.into_result()
    }

    /// Create a voucher
    pub async fn create_voucher(&self, request: &VoucherRequest) -> Result<Voucher, ClientError> {
        let request = self.request(Method::POST, "/voucher/create").json(request);
        let response: ApiResponse<Voucher> = self.execute(request).await?;
        response.into_result()
    }

    /// Update a voucher
    pub async fn update_voucher(
        &self,
        id: i64,
        request: &VoucherRequest,
    ) -> Result<Voucher, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/voucher/update/{id}"))
            .json(request);
        let response: ApiResponse<Voucher> = self.execute(request).await?;
        response.into_result()
    }

    /// Delete a voucher
    pub async fn delete_voucher(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::DELETE, &format!("/voucher/delete/{id}")))
            .await
    }
}
