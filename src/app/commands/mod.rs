//! One handler per CLI command. Each validates its flags, talks to the
//! ordering API and returns the payload for the success envelope.

pub mod menu;
pub mod order_request;
pub mod place;
pub mod price;
pub mod stores;

use crate::core::args::ParsedArgs;

pub const DEFAULT_SERVICE: &str = "Delivery";

/// `--service` or `--method`, defaulting to delivery.
pub fn service_method(args: &ParsedArgs) -> String {
    args.first_non_empty(&["service", "method"])
        .unwrap_or(DEFAULT_SERVICE)
        .to_string()
}

/// `--store` or `--storeID`.
pub fn store_id(args: &ParsedArgs) -> Option<&str> {
    args.first_non_empty(&["store", "storeID"])
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory `OrderingApi` that records which endpoints were hit.

    use crate::core::address::FreeTextAddress;
    use crate::domain::model::{ApiResponse, MenuResponse, StoreLocatorResponse, StoreProfile};
    use crate::domain::order::OrderPayload;
    use crate::domain::ports::OrderingApi;
    use crate::utils::error::ApiError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    pub struct MockApi {
        pub calls: Mutex<Vec<String>>,
        pub orders: Mutex<Vec<OrderPayload>>,
        pub locator: Value,
        pub profile: Value,
        pub menu: Value,
        pub validate: Value,
        pub price: Value,
        pub place: Value,
        pub fail_menu: bool,
    }

    impl Default for MockApi {
        fn default() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                orders: Mutex::new(Vec::new()),
                locator: json!({"Status": 0, "Stores": []}),
                profile: json!({"StoreID": "4336"}),
                menu: json!({"Variants": {}}),
                validate: json!({"Status": 1, "Order": {"OrderID": "ord-1"}}),
                price: json!({
                    "Status": 1,
                    "Order": {
                        "Products": [{"Code": "14SCREEN", "Qty": 2, "Options": {"C": {"1/1": "1"}}}],
                        "Amounts": {"Customer": 24.5},
                        "AmountsBreakdown": {"FoodAndBeverage": "21.98", "Tax": 1.52, "DeliveryFee": "1.00", "Customer": 24.5}
                    }
                }),
                place: json!({"Status": 1, "Order": {"OrderID": "ord-1", "EstimatedWaitMinutes": "20-30"}}),
                fail_menu: false,
            }
        }
    }

    impl MockApi {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn record_order(&self, call: &str, order: &OrderPayload) {
            self.record(call);
            self.orders.lock().unwrap().push(order.clone());
        }
    }

    #[async_trait]
    impl OrderingApi for MockApi {
        async fn find_stores(
            &self,
            address: &FreeTextAddress,
            service: &str,
        ) -> Result<StoreLocatorResponse, ApiError> {
            self.record(&format!("find_stores:{}:{}", address.raw(), service));
            Ok(serde_json::from_value(self.locator.clone())?)
        }

        async fn store_profile(&self, store_id: &str) -> Result<StoreProfile, ApiError> {
            self.record(&format!("store_profile:{}", store_id));
            Ok(serde_json::from_value(self.profile.clone())?)
        }

        async fn menu(&self, store_id: &str) -> Result<MenuResponse, ApiError> {
            self.record(&format!("menu:{}", store_id));
            if self.fail_menu {
                return Err(ApiError::Status {
                    status: 503,
                    url: "mock://menu".to_string(),
                });
            }
            Ok(serde_json::from_value(self.menu.clone())?)
        }

        async fn validate_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError> {
            self.record_order("validate", order);
            Ok(ApiResponse::from_value(self.validate.clone()))
        }

        async fn price_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError> {
            self.record_order("price", order);
            Ok(ApiResponse::from_value(self.price.clone()))
        }

        async fn place_order(&self, order: &OrderPayload) -> Result<ApiResponse, ApiError> {
            self.record_order("place", order);
            Ok(ApiResponse::from_value(self.place.clone()))
        }
    }
}
