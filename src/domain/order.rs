use crate::core::address::FreeTextAddress;
use crate::domain::model::{ApiResponse, OrderItem};
use crate::domain::payment::Payment;
use crate::domain::ports::OrderingApi;
use crate::utils::error::ApiError;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: FreeTextAddress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderAddress {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    #[serde(rename = "Type")]
    pub address_type: String,
}

impl From<&FreeTextAddress> for OrderAddress {
    fn from(address: &FreeTextAddress) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            region: address.region.clone(),
            postal_code: address.postal_code.clone(),
            address_type: "House".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Qty")]
    pub qty: u32,
    #[serde(rename = "Options")]
    pub options: Map<String, Value>,
    #[serde(rename = "ID")]
    pub id: usize,
    #[serde(rename = "isNew")]
    pub is_new: bool,
}

/// Wire form of an order sent to the validate, price and place endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderPayload {
    pub address: OrderAddress,
    pub coupons: Vec<Value>,
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    pub email: String,
    pub extension: String,
    pub first_name: String,
    pub last_name: String,
    pub language_code: String,
    pub order_channel: String,
    #[serde(rename = "OrderID")]
    pub order_id: String,
    pub order_method: String,
    pub payments: Vec<Payment>,
    pub phone: String,
    pub products: Vec<Product>,
    pub service_method: String,
    #[serde(rename = "SourceOrganizationURI")]
    pub source_organization_uri: String,
    #[serde(rename = "StoreID")]
    pub store_id: String,
    pub version: String,
    pub no_combine: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedItem {
    pub code: String,
    pub qty: u32,
}

/// An order in progress. Each API step keeps the response body it got back,
/// rejected or not, so failures can be reported with context.
#[derive(Debug, Clone)]
pub struct Order {
    pub payload: OrderPayload,
    pub validation_response: Option<Value>,
    pub price_response: Option<Value>,
    pub place_response: Option<Value>,
    priced_products: Vec<Value>,
    amounts: Map<String, Value>,
    amounts_breakdown: Map<String, Value>,
}

impl Order {
    pub fn new(customer: &Customer, store_id: &str, service_method: &str, lang: &str) -> Self {
        Self {
            payload: OrderPayload {
                address: OrderAddress::from(&customer.address),
                coupons: Vec::new(),
                customer_id: String::new(),
                email: customer.email.clone(),
                extension: String::new(),
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                language_code: lang.to_string(),
                order_channel: "OLO".to_string(),
                order_id: String::new(),
                order_method: "Web".to_string(),
                payments: Vec::new(),
                phone: customer.phone.clone(),
                products: Vec::new(),
                service_method: service_method.to_string(),
                source_organization_uri: "order.dominos.com".to_string(),
                store_id: store_id.to_string(),
                version: "1.0".to_string(),
                no_combine: true,
            },
            validation_response: None,
            price_response: None,
            place_response: None,
            priced_products: Vec::new(),
            amounts: Map::new(),
            amounts_breakdown: Map::new(),
        }
    }

    pub fn add_item(&mut self, item: &OrderItem) {
        let id = self.payload.products.len() + 1;
        self.payload.products.push(Product {
            code: item.code.clone(),
            qty: item.qty,
            options: item.options.clone(),
            id,
            is_new: true,
        });
    }

    pub fn add_payment(&mut self, payment: Payment) {
        self.payload.payments.push(payment);
    }

    pub async fn validate<A: OrderingApi + ?Sized>(&mut self, api: &A) -> Result<(), ApiError> {
        let response = api.validate_order(&self.payload).await?;
        self.validation_response = Some(response.raw.clone());
        let response = response.into_accepted("order validation")?;

        if let Some(order_id) = response.order.get("OrderID").and_then(Value::as_str) {
            self.payload.order_id = order_id.to_string();
        }
        tracing::debug!("Order validated (OrderID={:?})", self.payload.order_id);
        Ok(())
    }

    pub async fn price<A: OrderingApi + ?Sized>(&mut self, api: &A) -> Result<(), ApiError> {
        let response = api.price_order(&self.payload).await?;
        self.price_response = Some(response.raw.clone());
        let response = response.into_accepted("order pricing")?;

        let order = response.order;
        if let Some(products) = order.get("Products").and_then(Value::as_array) {
            self.priced_products = products.clone();
        }
        if let Some(amounts) = order.get("Amounts").and_then(Value::as_object) {
            self.amounts = amounts.clone();
        }
        if let Some(breakdown) = order.get("AmountsBreakdown").and_then(Value::as_object) {
            self.amounts_breakdown = breakdown.clone();
        }
        tracing::debug!("Order priced, customer owes {}", self.customer_amount());
        Ok(())
    }

    pub async fn place<A: OrderingApi + ?Sized>(&mut self, api: &A) -> Result<(), ApiError> {
        let response = api.place_order(&self.payload).await?;
        self.place_response = Some(response.raw.clone());
        response.into_accepted("order placement")?;
        Ok(())
    }

    /// Price breakdown with camelCase keys (`foodAndBeverage`, `tax`, `customer`, ...).
    pub fn amounts_breakdown(&self) -> Map<String, Value> {
        self.amounts_breakdown
            .iter()
            .map(|(key, value)| (lower_first(key), value.clone()))
            .collect()
    }

    pub fn customer_amount(&self) -> f64 {
        [&self.amounts_breakdown, &self.amounts]
            .into_iter()
            .find_map(|map| map.get("Customer").and_then(as_number))
            .unwrap_or(0.0)
    }

    /// Items as priced by the API, falling back to what was submitted. Options are dropped.
    pub fn priced_items(&self) -> Vec<PricedItem> {
        if self.priced_products.is_empty() {
            return self
                .payload
                .products
                .iter()
                .map(|p| PricedItem {
                    code: p.code.clone(),
                    qty: p.qty,
                })
                .collect();
        }

        self.priced_products
            .iter()
            .filter_map(|p| {
                let code = p.get("Code").and_then(Value::as_str)?;
                let qty = p
                    .get("Qty")
                    .and_then(as_number)
                    .map(|q| q as u32)
                    .unwrap_or(1);
                Some(PricedItem {
                    code: code.to_string(),
                    qty,
                })
            })
            .collect()
    }

    /// Status, order id and wait estimate from the place response.
    pub fn placement_summary(&self) -> Map<String, Value> {
        let mut summary = Map::new();
        let Some(raw) = &self.place_response else {
            return summary;
        };
        let response = ApiResponse::from_value(raw.clone());
        summary.insert("status".to_string(), Value::from(response.status));
        for (key, out) in [("OrderID", "orderID"), ("EstimatedWaitMinutes", "estimatedWaitMinutes")] {
            if let Some(value) = response.order.get(key) {
                summary.insert(out.to_string(), value.clone());
            }
        }
        summary
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lower_first(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
