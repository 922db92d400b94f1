use super::order_request::OrderRequest;
use crate::core::args::ParsedArgs;
use crate::core::output::{to_payload, Payload};
use crate::domain::order::{Order, PricedItem};
use crate::domain::ports::OrderingApi;
use crate::utils::error::{ApiError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PricedOrder {
    #[serde(rename = "storeID")]
    pub store_id: String,
    pub service_method: String,
    pub amounts_breakdown: Map<String, Value>,
    pub items: Vec<PricedItem>,
}

impl PricedOrder {
    pub fn new(request: &OrderRequest, order: &Order) -> Self {
        Self {
            store_id: request.store_id.clone(),
            service_method: request.service_method.clone(),
            amounts_breakdown: order.amounts_breakdown(),
            items: order.priced_items(),
        }
    }
}

/// Validate, then price. Stops at the first step the API rejects.
pub async fn validate_and_price<A: OrderingApi + ?Sized>(
    order: &mut Order,
    api: &A,
) -> std::result::Result<(), ApiError> {
    order.validate(api).await?;
    order.price(api).await
}

pub async fn run<A: OrderingApi + ?Sized>(args: &ParsedArgs, api: &A) -> Result<Payload> {
    let request = OrderRequest::from_args(args)?;
    let mut order = request.build_order(api.lang());

    tracing::info!(
        "Pricing {} item(s) at store {} for {}",
        request.items.len(),
        request.store_id,
        request.service_method
    );
    if let Err(err) = validate_and_price(&mut order, api).await {
        return Err(request.failure(err, &order));
    }

    to_payload(&PricedOrder::new(&request, &order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::testing::MockApi;
    use crate::utils::error::ErrorCategory;
    use serde_json::json;

    const ITEMS: &str = r#"[{"code":"14SCREEN","qty":2,"options":{"C":{"1/1":"1"}}}]"#;

    fn price_args() -> ParsedArgs {
        ParsedArgs::parse(&[
            "--store", "4336", "--address", "1 Main St, Bryan, TX 77801", "--items", ITEMS,
        ])
    }

    #[tokio::test]
    async fn test_price_success() {
        let api = MockApi::default();
        let payload = run(&price_args(), &api).await.unwrap();

        assert_eq!(payload["storeID"], "4336");
        assert_eq!(payload["serviceMethod"], "Delivery");
        assert_eq!(payload["amountsBreakdown"]["foodAndBeverage"], "21.98");
        assert_eq!(payload["amountsBreakdown"]["customer"], 24.5);
        assert_eq!(payload["items"], json!([{"code": "14SCREEN", "qty": 2}]));
        assert_eq!(api.calls(), vec!["validate", "price"]);

        let orders = api.orders.lock().unwrap();
        assert_eq!(orders[0].phone, "5550100");
        // price goes out with the OrderID handed back by validation
        assert_eq!(orders[1].order_id, "ord-1");
    }

    #[tokio::test]
    async fn test_invalid_items_makes_no_call() {
        let api = MockApi::default();
        let err = run(&ParsedArgs::parse(&["--items", "not json"]), &api)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "items must be a JSON array");
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_validation_rejection_carries_diagnostics() {
        let api = MockApi {
            validate: json!({"Status": -1, "StatusItems": [{"Code": "StoreClosed"}]}),
            ..MockApi::default()
        };
        let err = run(&price_args(), &api).await.unwrap_err();

        assert_eq!(err.to_string(), "order validation failed: StoreClosed");
        let diagnostics = err.diagnostics().unwrap();
        assert_eq!(diagnostics["validationResponse"]["Status"], -1);
        assert!(!diagnostics.contains_key("priceResponse"));
        assert_eq!(diagnostics["serviceMethod"], "Delivery");
        assert_eq!(diagnostics["storeID"], "4336");
        assert_eq!(diagnostics["address"], "1 Main St, Bryan, TX 77801");
        assert_eq!(diagnostics["items"][0]["options"]["C"]["1/1"], "1");
        assert_eq!(api.calls(), vec!["validate"]);
    }

    #[tokio::test]
    async fn test_price_rejection_includes_both_responses() {
        let api = MockApi {
            price: json!({"Status": -1, "StatusItems": [{"Code": "PriceFailure"}]}),
            ..MockApi::default()
        };
        let err = run(&price_args(), &api).await.unwrap_err();

        assert_eq!(err.to_string(), "order pricing failed: PriceFailure");
        let diagnostics = err.diagnostics().unwrap();
        assert!(diagnostics.contains_key("validationResponse"));
        assert_eq!(diagnostics["priceResponse"]["StatusItems"][0]["Code"], "PriceFailure");
    }
}
