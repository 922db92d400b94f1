use super::order_request::OrderRequest;
use super::price::{validate_and_price, PricedOrder};
use crate::core::args::ParsedArgs;
use crate::core::output::{to_payload, Payload};
use crate::domain::order::Order;
use crate::domain::payment::{digits_only, CardDetails, Payment};
use crate::domain::ports::OrderingApi;
use crate::utils::error::{ApiError, CommandError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacedOrder {
    #[serde(flatten)]
    priced: PricedOrder,
    result: Map<String, Value>,
    place_response: Value,
}

/// `--cardNumber`, `--exp`, `--cvv`, `--postal` and an optional `--tip`.
pub fn card_details(args: &ParsedArgs) -> Result<CardDetails> {
    let number = digits_only(args.non_empty("cardNumber").unwrap_or_default());
    let (Some(expiration), Some(security_code), Some(postal_code)) = (
        args.non_empty("exp"),
        args.non_empty("cvv"),
        args.non_empty("postal"),
    ) else {
        return Err(payment_required());
    };
    if number.is_empty() {
        return Err(payment_required());
    }

    let tip = args
        .non_empty("tip")
        .and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite())
        .unwrap_or(0.0);

    Ok(CardDetails {
        number,
        expiration: expiration.to_string(),
        security_code: security_code.to_string(),
        postal_code: postal_code.to_string(),
        tip,
    })
}

fn payment_required() -> CommandError {
    CommandError::validation("cardNumber, exp, cvv, and postal are required")
}

async fn submit<A: OrderingApi + ?Sized>(
    order: &mut Order,
    card: &CardDetails,
    api: &A,
) -> std::result::Result<(), ApiError> {
    validate_and_price(order, api).await?;
    let payment = Payment::credit_card(order.customer_amount(), card);
    order.add_payment(payment);
    order.place(api).await
}

pub async fn run<A: OrderingApi + ?Sized>(args: &ParsedArgs, api: &A) -> Result<Payload> {
    let request = OrderRequest::from_args(args)?;
    let card = card_details(args)?;
    let mut order = request.build_order(api.lang());

    tracing::info!(
        "Placing order with {} item(s) at store {}",
        request.items.len(),
        request.store_id
    );
    if let Err(err) = submit(&mut order, &card, api).await {
        return Err(request.failure(err, &order));
    }

    to_payload(&PlacedOrder {
        priced: PricedOrder::new(&request, &order),
        result: order.placement_summary(),
        place_response: order.place_response.clone().unwrap_or(Value::Null),
    })
}
