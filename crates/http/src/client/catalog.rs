//! Catalog management client methods: categories, collections, sizes,
//! products and their images.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::AdminClient;
use crate::client::error::ClientError;
use crate::types::{
    ApiResponse, Category, CategoryRequest, Collection, Page, Product, ProductImage,
    ProductRequest, ProductSize, ProductSizeRequest, SizeOption, SortDir,
};

impl AdminClient {
    /// List every category
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let request = self.request(Method::GET, "/category/getall");
        let response: ApiResponse<Vec<Category>> = self.execute(request).await?;
        response.into_result()
    }

    /// Get a category by id
    pub async fn get_category(&self, id: i64) -> Result<Category, ClientError> {
        let request = self.request(Method::GET, &format!("/category/get-by-id/{id}"));
        let response: ApiResponse<Category> = self.execute(request).await?;
        response.into_result()
    }

    /// Create a category
    pub async fn create_category(&self, request: &CategoryRequest) -> Result<Category, ClientError> {
        let request = self.request(Method::POST, "/category/create").json(request);
        let response: ApiResponse<Category> = self.execute(request).await?;
        response.into_result()
    }

    /// Update a category
    pub async fn update_category(
        &self,
        id: i64,
        request: &CategoryRequest,
    ) -> Result<Category, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/category/update/{id}"))
            .json(request);
        let response: ApiResponse<Category> = self.execute(request).await?;
        response.into_result()
    }

    /// Delete a category
    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::DELETE, &format!("/category/delete/{id}")))
            .await
    }

    /// List collections, paginated
    pub async fn list_collections(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<Page<Collection>, ClientError> {
        let request = self.request(Method::GET, "/collection/get-all").query(&[
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ]);
        let response: ApiResponse<Page<Collection>> = self.execute(request).await?;
        response.into_result()
    }

    /// Get a collection by id
    pub async fn get_collection(&self, id: i64) -> Result<Collection, ClientError> {
        let request = self.request(Method::GET, &format!("/collection/get-collection-by-id/{id}"));
        let response: ApiResponse<Collection> = self.execute(request).await?;
        response.into_result()
    }

    /// Find collections by name
    pub async fn find_collections_by_name(
        &self,
        name: &str,
    ) -> Result<Page<Collection>, ClientError> {
        let request = self
            .request(Method::GET, "/collection/get-collection-by-name")
            .query(&[("name", name)]);
        let response: ApiResponse<Page<Collection>> = self.execute(request).await?;
        response.into_result()
    }

    /// Create a collection. Name and description travel as query
    /// parameters and the optional cover image as an `imageFile` multipart
    /// part; the backend picks a default cover when no file is sent.
    pub async fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
        image: Option<(String, Vec<u8>)>,
    ) -> Result<Collection, ClientError> {
        let request = self
            .request(Method::POST, "/collection/create-collection")
            .query(&collection_query(name, description))
            .multipart(collection_form(image));
        let response: ApiResponse<Collection> = self.execute(request).await?;
        response.into_result()
    }

    /// Update a collection's name and description, and optionally its
    /// cover image
    pub async fn update_collection(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
        image: Option<(String, Vec<u8>)>,
    ) -> Result<Collection, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/collection/update-collection/{id}"))
            .query(&collection_query(name, description))
            .multipart(collection_form(image));
        let response: ApiResponse<Collection> = self.execute(request).await?;
        response.into_result()
    }

    /// Delete a collection
    pub async fn delete_collection(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(
            self.request(Method::DELETE, &format!("/collection/delete-collection/{id}")),
        )
        .await
    }

    /// List the available size options
    pub async fn list_sizes(&self) -> Result<Vec<SizeOption>, ClientError> {
        let request = self.request(Method::GET, "/size/get-all-size");
        let response: ApiResponse<Vec<SizeOption>> = self.execute(request).await?;
        response.into_result()
    }

    /// List every product-size stock entry
    pub async fn list_product_sizes(&self) -> Result<Vec<ProductSize>, ClientError> {
        let request = self.request(Method::GET, "/product-size/get-all");
        let response: ApiResponse<Vec<ProductSize>> = self.execute(request).await?;
        response.into_result()
    }

    /// Create a product-size stock entry
    pub async fn create_product_size(
        &self,
        request: &ProductSizeRequest,
    ) -> Result<ProductSize, ClientError> {
        let request = self.request(Method::POST, "/product-size/create").json(request);
        let response: ApiResponse<ProductSize> = self.execute(request).await?;
        response.into_result()
    }

    /// Update a product-size stock entry
    pub async fn update_product_size(
        &self,
        id: i64,
        request: &ProductSizeRequest,
    ) -> Result<ProductSize, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/product-size/update/{id}"))
            .json(request);
        let response: ApiResponse<ProductSize> = self.execute(request).await?;
        response.into_result()
    }

    /// Delete a product-size stock entry
    pub async fn delete_product_size(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::DELETE, &format!("/product-size/delete/{id}")))
            .await
    }

    /// List products, paginated
    pub async fn list_products(
        &self,
        page_number: u32,
        page_size: u32,
        sort_dir: Option<SortDir>,
    ) -> Result<Page<Product>, ClientError> {
        let mut query = vec![
            ("pageNumber", page_number.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        if let Some(dir) = sort_dir {
            query.push(("sortDir", dir.as_str().to_owned()));
        }
        let request = self.request(Method::GET, "/products/get-products").query(&query);
        let response: ApiResponse<Page<Product>> = self.execute(request).await?;
        response.into_result()
    }

    /// Search products by name. This endpoint ignores pagination.
    pub async fn find_products_by_name(&self, name: &str) -> Result<Vec<Product>, ClientError> {
        let request = self
            .request(Method::GET, "/products/product/name")
            .query(&[("name", name)]);
        let response: ApiResponse<Vec<Product>> = self.execute(request).await?;
        response.into_result()
    }

    /// Create a product
    pub async fn create_product(&self, request: &ProductRequest) -> Result<Product, ClientError> {
        let request = self.request(Method::POST, "/products/create").json(request);
        let response: ApiResponse<Product> = self.execute(request).await?;
        response.into_result()
    }

    /// Update a product
    pub async fn update_product(
        &self,
        id: i64,
        request: &ProductRequest,
    ) -> Result<Product, ClientError> {
        let request = self
            .request(Method::PUT, &format!("/products/update/{id}"))
            .json(request);
        let response: ApiResponse<Product> = self.execute(request).await?;
        response.into_result()
    }

    /// Delete a product
    pub async fn delete_product(&self, id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::DELETE, &format!("/products/delete/{id}")))
            .await
    }

    /// Upload product images: repeated `files` parts plus the product id,
    /// in one request. Multipart bodies cannot be replayed, so an expired
    /// token surfaces as an auth error instead of triggering a refresh;
    /// callers retry the upload.
    pub async fn upload_images(
        &self,
        product_id: i64,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<ProductImage>, ClientError> {
        let mut form = Form::new().text("productId", product_id.to_string());
        for (file_name, bytes) in files {
            form = form.part("files", Part::bytes(bytes).file_name(file_name));
        }
        let request = self.request(Method::POST, "/image/upload").multipart(form);
        let response: ApiResponse<Vec<ProductImage>> = self.execute(request).await?;
        response.into_result()
    }

    /// Delete an image
    pub async fn delete_image(&self, image_id: i64) -> Result<(), ClientError> {
        self.execute_ack(self.request(Method::DELETE, &format!("/image/delete/{image_id}")))
            .await
    }
}

fn collection_query(name: &str, description: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("name", name.to_owned())];
    if let Some(description) = description {
        query.push(("description", description.to_owned()));
    }
    query
}

fn collection_form(image: Option<(String, Vec<u8>)>) -> Form {
    let mut form = Form::new();
    if let Some((file_name, bytes)) = image {
        form = form.part("imageFile", Part::bytes(bytes).file_name(file_name));
    }
    form
}
