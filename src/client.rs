use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::{Material, MaterialsPage, Order, OrderStatus, OrdersPage};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

/// Page size used when scanning for a single order
const SCAN_PAGE_SIZE: u32 = 50;

/// HTTP client for the order and material store APIs
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    asset_base_url: String,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_seconds))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            asset_base_url: cfg.asset_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /orders?page&limit`
    pub async fn list_orders(&self, page: u32, limit: u32) -> Result<OrdersPage, AppError> {
        debug!("Fetching orders page {} (limit {})", page, limit);
        let response = self
            .http
            .get(format!("{}/orders", self.base_url))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Locate one order by id, paging through the listing
    ///
    /// The backend exposes no single-order endpoint.
    pub async fn find_order(&self, id: &str) -> Result<Order, AppError> {
        let mut page = 1u32;
        loop {
            let batch = self.list_orders(page, SCAN_PAGE_SIZE).await?;
            let fetched = batch.orders.len();
            if let Some(order) = batch.orders.into_iter().find(|o| o.id == id) {
                return Ok(order);
            }
            if fetched == 0 || u64::from(page) * u64::from(SCAN_PAGE_SIZE) >= batch.total {
                return Err(AppError::NotFound(format!("order {}", id)));
            }
            page += 1;
        }
    }

    /// `PUT /orders/{id}/status` with `{"status": ...}`
    pub async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<(), AppError> {
        let response = self
            .http
            .put(format!("{}/orders/{}/status", self.base_url, id))
            .json(&json!({ "status": status }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// `GET /materials?page&size`
    pub async fn list_materials(&self, page: u32, size: u32) -> Result<MaterialsPage, AppError> {
        debug!("Fetching materials page {} (size {})", page, size);
        let response = self
            .http
            .get(format!("{}/materials", self.base_url))
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;

        Self::decode(response).await
    }

    /// `POST /materials`, returns the persisted record
    pub async fn create_material(&self, material: &Material) -> Result<Material, AppError> {
        let response = self
            .http
            .post(format!("{}/materials", self.base_url))
            .json(material)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// `PUT /materials/{id}`, returns the persisted record
    pub async fn update_material(
        &self,
        id: &str,
        material: &Material,
    ) -> Result<Material, AppError> {
        let response = self
            .http
            .put(format!("{}/materials/{}", self.base_url, id))
            .json(material)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// `DELETE /materials/{id}`
    pub async fn delete_material(&self, id: &str) -> Result<(), AppError> {
        let response = self
            .http
            .delete(format!("{}/materials/{}", self.base_url, id))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// Base URL for resolving line-item preview paths
    pub fn asset_base_url(&self) -> &str {
        &self.asset_base_url
    }

    async fn check_status(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut message = response.text().await.unwrap_or_default();
        if message.len() > 200 {
            message.truncate(200);
        }
        Err(AppError::Backend { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn client() -> ApiClient {
        let cfg = ApiConfig {
            base_url: "http://localhost:9000/api/".to_string(),
            asset_base_url: "http://localhost:9000".to_string(),
            ..Default::default()
        };
        ApiClient::new(&cfg).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client();
        assert_eq!(client.base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_asset_base_url_trailing_slash_is_trimmed() {
        let cfg = ApiConfig {
            base_url: "http://localhost:9000/api".to_string(),
            asset_base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&cfg).unwrap();
        assert_eq!(client.asset_base_url(), "http://localhost:9000");
    }
}
