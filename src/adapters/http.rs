use crate::config::ApiConfig;
use crate::core::address::FreeTextAddress;
use crate::domain::model::{ApiResponse, MenuResponse, StoreLocatorResponse, StoreProfile};
use crate::domain::order::OrderPayload;
use crate::domain::ports::OrderingApi;
use crate::utils::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

/// `OrderingApi` over the public `/power` JSON endpoints.
pub struct DominosClient {
    client: Client,
    base_url: Url,
    config: ApiConfig,
}

impl DominosClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            client: Client::new(),
            base_url,
            config,
        })
    }

    /// Appends `segments` to the base URL path, percent-encoding each one, so a
    /// store id can never leave its own segment and a `base_url` prefix is kept.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 添加自定義標頭與超時設定
    fn prepare(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }
        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }
        request
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self.prepare(self.client.get(url.clone())).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_order(&self, action: &str, order: &OrderPayload) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(&["power", action])?;
        tracing::debug!("POST {} (StoreID={})", url, order.store_id);
        let response = self
            .prepare(self.client.post(url.clone()))
            .json(&json!({ "Order": order }))
            .send()
            .await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;
        let raw: Value = serde_json::from_slice(&body)?;
        Ok(ApiResponse::from_value(raw))
    }
}

#[async_trait]
impl OrderingApi for DominosClient {
    async fn find_stores(
        &self,
        address: &FreeTextAddress,
        service: &str,
    ) -> Result<StoreLocatorResponse, ApiError> {
        let mut url = self.endpoint(&["power", "store-locator"])?;
        url.query_pairs_mut()
            .append_pair("s", address.line1())
            .append_pair("c", &address.line2())
            .append_pair("type", service);

        let raw: Value = self.get_json(url).await?;
        let located = ApiResponse::from_value(raw).into_accepted("store lookup")?;
        let response: StoreLocatorResponse = serde_json::from_value(located.raw)?;
        tracing::debug!("Store locator returned {} stores", response.stores.len());
        Ok(response)
    }

    async fn store_profile(&self, store_id: &str) -> Result<StoreProfile, ApiError> {
        let url = self.endpoint(&["power", "store", store_id, "profile"])?;
        self.get_json(url).await
    }

    async fn menu(&self, store_id: &str) -> Result<MenuResponse, ApiError> {
        let mut url = self.endpoint(&["power", "store", store_id, "menu"])?;
        url.query_pairs_mut()
            .append_pair("lang", &self.config.lang)
            .append_pair("structured", "true");
        self.get_json(url).await
    }

    async fn validate_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError> {
        self.post_order("validate-order", order).await
    }

    async fn price_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError> {
        self.post_order("price-order", order).await
    }

    async fn place_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError> {
        self.post_order("place-order", order).await
    }

    fn lang(&self) -> &str {
        &self.config.lang
    }
}
