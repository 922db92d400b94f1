use crate::core::address::FreeTextAddress;
use crate::domain::model::{ApiResponse, MenuResponse, StoreLocatorResponse, StoreProfile};
use crate::domain::order::OrderPayload;
use crate::utils::error::ApiError;
use async_trait::async_trait;

/// The pizza ordering service. Each call is a single request with no retry.
#[async_trait]
pub trait OrderingApi: Send + Sync {
    async fn find_stores(
        &self,
        address: &FreeTextAddress,
        service: &str,
    ) -> Result<StoreLocatorResponse, ApiError>;

    async fn store_profile(&self, store_id: &str) -> Result<StoreProfile, ApiError>;

    async fn menu(&self, store_id: &str) -> Result<MenuResponse, ApiError>;

    async fn validate_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError>;

    async fn price_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError>;

    async fn place_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError>;

    /// Language code sent with menus and orders.
    fn lang(&self) -> &str {
        "en"
    }
}
