use super::{service_method, store_id};
use crate::core::address::FreeTextAddress;
use crate::core::args::ParsedArgs;
use crate::domain::model::OrderItem;
use crate::domain::order::{Customer, Order};
use crate::utils::error::{ApiError, CommandError, Result};
use serde_json::{Map, Value};

pub const DEFAULT_FIRST_NAME: &str = "Test";
pub const DEFAULT_LAST_NAME: &str = "User";
pub const DEFAULT_PHONE: &str = "555-0100";
pub const DEFAULT_EMAIL: &str = "test@example.com";

/// Flags shared by `price` and `place`, checked before anything is sent.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub store_id: String,
    pub address: String,
    pub service_method: String,
    pub customer: Customer,
    pub raw_items: Vec<Value>,
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    pub fn from_args(args: &ParsedArgs) -> Result<Self> {
        let raw_items = parse_items(args.non_empty("items"))?;

        let (Some(store), Some(address)) = (store_id(args), args.non_empty("address")) else {
            return Err(required_error());
        };
        if raw_items.is_empty() {
            return Err(required_error());
        }

        let mut items = Vec::with_capacity(raw_items.len());
        for raw in &raw_items {
            if let Some(item) = to_order_item(raw)? {
                items.push(item);
            }
        }

        let customer = Customer {
            first_name: args.non_empty("first").unwrap_or(DEFAULT_FIRST_NAME).to_string(),
            last_name: args.non_empty("last").unwrap_or(DEFAULT_LAST_NAME).to_string(),
            phone: args
                .non_empty("phone")
                .unwrap_or(DEFAULT_PHONE)
                .replace('-', ""),
            email: args.non_empty("email").unwrap_or(DEFAULT_EMAIL).to_string(),
            address: FreeTextAddress::parse(address),
        };

        Ok(Self {
            store_id: store.to_string(),
            address: address.to_string(),
            service_method: service_method(args),
            customer,
            raw_items,
            items,
        })
    }

    pub fn build_order(&self, lang: &str) -> Order {
        let mut order = Order::new(&self.customer, &self.store_id, &self.service_method, lang);
        for item in &self.items {
            order.add_item(item);
        }
        order
    }

    /// Error payload for a failed API step: whatever responses came back, plus
    /// the request that was attempted.
    pub fn failure(&self, err: ApiError, order: &Order) -> CommandError {
        let mut diagnostics = Map::new();
        let responses = [
            ("validationResponse", &order.validation_response),
            ("priceResponse", &order.price_response),
            ("placeResponse", &order.place_response),
        ];
        for (key, response) in responses {
            if let Some(body) = response {
                diagnostics.insert(key.to_string(), body.clone());
            }
        }
        diagnostics.insert(
            "serviceMethod".to_string(),
            Value::String(self.service_method.clone()),
        );
        diagnostics.insert("storeID".to_string(), Value::String(self.store_id.clone()));
        diagnostics.insert("address".to_string(), Value::String(self.address.clone()));
        diagnostics.insert("items".to_string(), Value::Array(self.raw_items.clone()));

        tracing::debug!("Order request failed: {}", err);
        CommandError::from(err).with_diagnostics(diagnostics)
    }
}

fn required_error() -> CommandError {
    CommandError::validation("store, address, and items are required")
}

/// `--items` must be a JSON array; a missing flag counts as an empty one.
pub fn parse_items(raw: Option<&str>) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(raw.unwrap_or("[]")) {
        Ok(Value::Array(items)) => Ok(items),
        _ => Err(CommandError::parse("items must be a JSON array")),
    }
}

/// Entries without a usable `code` are skipped.
pub fn to_order_item(raw: &Value) -> Result<Option<OrderItem>> {
    let Some(code) = raw
        .get("code")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
    else {
        return Ok(None);
    };

    let qty = item_qty(raw.get("qty")).ok_or_else(|| {
        CommandError::validation(format!("qty must be a positive number for item {}", code))
    })?;
    let options = raw
        .get("options")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Ok(Some(OrderItem {
        code: code.to_string(),
        qty,
        options,
    }))
}

/// Absent, null, zero, false or empty quantities mean one.
fn item_qty(raw: Option<&Value>) -> Option<u32> {
    let number = match raw {
        None | Some(Value::Null) | Some(Value::Bool(_)) => return Some(1),
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) if s.trim().is_empty() => return Some(1),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        Some(_) => return None,
    };

    if number == 0.0 {
        Some(1)
    } else if number >= 1.0 && number.fract() == 0.0 && number <= f64::from(u32::MAX) {
        Some(number as u32)
    } else {
        None
    }
}
