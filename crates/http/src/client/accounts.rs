//! Account management client methods

use boutique_core::UserProfile;
use reqwest::Method;

use super::AdminClient;
use crate::client::error::ClientError;
use crate::types::{ApiResponse, CreateUserRequest, Page, SortDir};

impl AdminClient {
    /// Get a specific account's details
    pub async fn get_user(&self, id: i64) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::GET, &format!("/user/getUser/{id}"));
        let response: ApiResponse<UserProfile> = self.execute(request).await?;
        response.into_result()
    }

    /// Create a customer account
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::POST, "/user/create").json(request);
        let response: ApiResponse<UserProfile> = self.execute(request).await?;
        response.into_result()
    }

    /// Create a staff account
    pub async fn create_staff(
        &self,
        request: &CreateUserRequest,
    ) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::POST, "/user/create-staff").json(request);
        let response: ApiResponse<UserProfile> = self.execute(request).await?;
        response.into_result()
    }

    /// Create an admin account
    pub async fn create_admin(
        &self,
        request: &CreateUserRequest,
    ) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::POST, "/user/create-admin").json(request);
        let response: ApiResponse<UserProfile> = self.execute(request).await?;
        response.into_result()
    }

    /// Delete an account
    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::DELETE, &format!("/user/delete/{id}")))
            .await
    }

    /// Lock (disable) an account
    pub async fn lock_user(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::PUT, &format!("/user/lock/{id}")))
            .await
    }

    /// List staff and admin accounts, paginated
    pub async fn list_managers(
        &self,
        page_number: u32,
        page_size: u32,
        sort_by: Option<&str>,
        sort_dir: Option<SortDir>,
    ) -> Result<Page<UserProfile>, ClientError> {
        let mut query = vec![
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(sort_by) = sort_by {
            query.push(("sortBy", sort_by.to_owned()));
        }
        if let Some(dir) = sort_dir {
            query.push(("sortDir", dir.as_str().to_owned()));
        }
        let request = self.request(Method::GET, "/user/get-managers").query(&query);
        let response: ApiResponse<Page<UserProfile>> = self.execute(request).await?;
        response.into_result()
    }

    /// List customer accounts, paginated
    pub async fn list_users(
        &self,
        page_number: u32,
        page_size: u32,
        sort_by: Option<&str>,
        sort_dir: Option<SortDir>,
    ) -> Result<Page<UserProfile>, ClientError> {
        let mut query = vec![
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(sort_by) = sort_by {
            query.push(("sortBy", sort_by.to_owned()));
        }
        if let Some(dir) = sort_dir {
            query.push(("sortDir", dir.as_str().to_owned()));
        }
        let request = self.request(Method::GET, "/user/getAll").query(&query);
        let response: ApiResponse<Page<UserProfile>> = self.execute(request).await?;
        response.into_result()
    }

    /// Search customer accounts by keyword, paginated. This endpoint does
    /// not support sorting.
    pub async fn search_users(
        &self,
        keyword: &str,
        page_number: u32,
        page_size: u32,
    ) -> Result<Page<UserProfile>, ClientError> {
        let request = self.request(Method::GET, "/user/search").query(&[
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
            ("keyword", keyword.to_owned()),
        ]);
        let response: ApiResponse<Page<UserProfile>> = self.execute(request).await?;
        response.into_result()
    }

    /// Total number of active customer accounts (dashboard statistic)
    pub async fn total_active_users(&self) -> Result<u64, ClientError> {
        let request = self.request(Method::GET, "/user/total-active-users");
        let response: ApiResponse<u64> = self.execute(request).await?;
        response.into_result()
    }
}
