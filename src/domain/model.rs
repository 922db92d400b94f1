use crate::utils::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Accepts ids sent either as JSON strings or numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts distances sent either as JSON numbers or numeric strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Normalized address as returned by the store locator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiAddress {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreRecord {
    #[serde(default, rename = "StoreID", deserialize_with = "lenient_string")]
    pub store_id: Option<String>,
    #[serde(default)]
    pub address_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub min_distance: Option<f64>,
    #[serde(default)]
    pub is_online_capable: Option<bool>,
    #[serde(default)]
    pub is_delivery_store: Option<bool>,
    #[serde(default)]
    pub is_open: Option<bool>,
    #[serde(default)]
    pub service_is_open: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreLocatorResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub address: Option<ApiAddress>,
    #[serde(default)]
    pub stores: Vec<StoreRecord>,
}

/// Read-only projection of a store record for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: Option<String>,
    pub address_description: Option<String>,
    pub distance: Option<f64>,
    pub online_capable: Option<bool>,
    pub delivery_capable: Option<bool>,
    pub is_open: Option<bool>,
    pub service_is_open: BTreeMap<String, bool>,
}

impl From<&StoreRecord> for StoreSummary {
    fn from(store: &StoreRecord) -> Self {
        Self {
            id: store.store_id.clone(),
            address_description: store.address_description.clone(),
            distance: store.min_distance,
            online_capable: store.is_online_capable,
            delivery_capable: store.is_delivery_store,
            is_open: store.is_open,
            service_is_open: store.service_is_open.clone(),
        }
    }
}

impl StoreSummary {
    /// Whether this store can take an order for `service` right now.
    pub fn accepts(&self, service: &str) -> bool {
        let delivery_ok = !service.eq_ignore_ascii_case("delivery")
            || self.delivery_capable.unwrap_or(false);
        self.online_capable.unwrap_or(false)
            && self.is_open.unwrap_or(false)
            && delivery_ok
            && self
                .service_is_open
                .iter()
                .any(|(k, open)| *open && k.eq_ignore_ascii_case(service))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreProfile {
    #[serde(default, rename = "StoreID", deserialize_with = "lenient_string")]
    pub store_id: Option<String>,
    #[serde(default)]
    pub address_description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_open: Option<bool>,
    #[serde(default)]
    pub service_is_open: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    pub id: Option<String>,
    pub address_description: Option<String>,
    pub phone: Option<String>,
    pub is_open: Option<bool>,
    pub service_is_open: BTreeMap<String, bool>,
}

impl From<StoreProfile> for StoreInfo {
    fn from(profile: StoreProfile) -> Self {
        Self {
            id: profile.store_id,
            address_description: profile.address_description,
            phone: profile.phone,
            is_open: profile.is_open,
            service_is_open: profile.service_is_open,
        }
    }
}

/// One orderable configuration of a menu item. Menus spell the name key
/// either `name` or `Name`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "Name")]
    pub pascal_name: Option<String>,
}

impl VariantRecord {
    pub fn named(name: &str) -> Self {
        Self {
            name: None,
            pascal_name: Some(name.to_string()),
        }
    }

    pub fn display_name(&self) -> &str {
        [&self.name, &self.pascal_name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .find(|n| !n.is_empty())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MenuResponse {
    #[serde(default)]
    pub variants: BTreeMap<String, VariantRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub code: String,
    pub name: String,
    pub size_hint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuGroups {
    pub pizzas: Vec<MenuEntry>,
    pub sides: Vec<MenuEntry>,
    pub drinks: Vec<MenuEntry>,
    pub desserts: Vec<MenuEntry>,
    pub other: Vec<MenuEntry>,
}

impl MenuGroups {
    pub fn buckets_mut(&mut self) -> [&mut Vec<MenuEntry>; 5] {
        [
            &mut self.pizzas,
            &mut self.sides,
            &mut self.drinks,
            &mut self.desserts,
            &mut self.other,
        ]
    }
}

/// A cart line supplied on the command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub code: String,
    pub qty: u32,
    pub options: Map<String, Value>,
}

/// Order endpoint response: `Status` is -1 when the API rejects the order.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: i64,
    pub status_codes: Vec<String>,
    pub order: Map<String, Value>,
    pub raw: Value,
}

impl ApiResponse {
    pub fn from_value(raw: Value) -> Self {
        let status = raw.get("Status").and_then(Value::as_i64).unwrap_or(0);
        let status_codes = raw
            .get("StatusItems")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("Code").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let order = raw
            .get("Order")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self {
            status,
            status_codes,
            order,
            raw,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.status == -1
    }

    /// Turns a `Status == -1` response into `ApiError::Rejected` for `stage`.
    pub fn into_accepted(self, stage: &'static str) -> Result<Self, ApiError> {
        if !self.is_rejected() {
            return Ok(self);
        }
        let codes = if self.status_codes.is_empty() {
            "rejected by the ordering API".to_string()
        } else {
            self.status_codes.join(", ")
        };
        Err(ApiError::Rejected {
            stage,
            codes,
            body: self.raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_name_fallback() {
        let lower: VariantRecord = serde_json::from_value(json!({"name": "Coke"})).unwrap();
        let pascal: VariantRecord = serde_json::from_value(json!({"Name": "Sprite"})).unwrap();
        let both: VariantRecord =
            serde_json::from_value(json!({"name": "", "Name": "Pepsi"})).unwrap();
        let none: VariantRecord = serde_json::from_value(json!({"Code": "X"})).unwrap();

        assert_eq!(lower.display_name(), "Coke");
        assert_eq!(pascal.display_name(), "Sprite");
        assert_eq!(both.display_name(), "Pepsi");
        assert_eq!(none.display_name(), "");
    }

    #[test]
    fn test_store_record_lenient_fields() {
        let store: StoreRecord = serde_json::from_value(json!({
            "StoreID": 4336,
            "AddressDescription": "1 Main St",
            "MinDistance": "1.4",
            "IsOnlineCapable": true,
            "IsDeliveryStore": true,
            "IsOpen": true,
            "ServiceIsOpen": {"Delivery": true, "Carryout": false}
        }))
        .unwrap();

        let summary = StoreSummary::from(&store);
        assert_eq!(summary.id.as_deref(), Some("4336"));
        assert_eq!(summary.distance, Some(1.4));
        assert!(summary.accepts("Delivery"));
        assert!(!summary.accepts("Carryout"));
    }

    #[test]
    fn test_store_summary_serializes_camel_case() {
        let summary = StoreSummary::from(&StoreRecord::default());
        let value = serde_json::to_value(&summary).unwrap();
        for key in [
            "id",
            "addressDescription",
            "distance",
            "onlineCapable",
            "deliveryCapable",
            "isOpen",
            "serviceIsOpen",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_api_response_status() {
        let resp = ApiResponse::from_value(json!({
            "Status": -1,
            "StatusItems": [{"Code": "Warning"}, {"Code": "PosOrderIncomplete"}],
            "Order": {"OrderID": "abc"}
        }));
        assert!(resp.is_rejected());
        assert_eq!(resp.status_codes, vec!["Warning", "PosOrderIncomplete"]);
        assert_eq!(resp.order.get("OrderID"), Some(&json!("abc")));

        let ok = ApiResponse::from_value(json!({"Status": 1}));
        assert!(!ok.is_rejected());
        assert!(ok.order.is_empty());
    }

    #[test]
    fn test_rejected_response_keeps_body() {
        let response = ApiResponse::from_value(json!({
            "Status": -1,
            "StatusItems": [{"Code": "StoreClosed"}]
        }));
        let err = response.into_accepted("order validation").unwrap_err();
        assert_eq!(err.to_string(), "order validation failed: StoreClosed");
        assert_eq!(err.body().unwrap()["Status"], -1);
    }

    #[test]
    fn test_rejection_without_codes_has_fallback_text() {
        let response = ApiResponse::from_value(json!({"Status": -1, "StatusItems": []}));
        let err = response.into_accepted("store lookup").unwrap_err();
        assert_eq!(err.to_string(), "store lookup failed: rejected by the ordering API");

        let accepted = ApiResponse::from_value(json!({"Status": 0}));
        assert!(accepted.into_accepted("store lookup").is_ok());
    }
}
