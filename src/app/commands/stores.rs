use super::service_method;
use crate::core::address::{canonical_address, FreeTextAddress};
use crate::core::args::ParsedArgs;
use crate::core::output::{to_payload, Payload};
use crate::domain::model::StoreSummary;
use crate::domain::ports::OrderingApi;
use crate::utils::error::{CommandError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoresResponse {
    address: String,
    service: String,
    stores: Vec<StoreSummary>,
    #[serde(rename = "recommendedStoreID")]
    recommended_store_id: Option<String>,
}

pub async fn run<A: OrderingApi + ?Sized>(args: &ParsedArgs, api: &A) -> Result<Payload> {
    let Some(input) = args.non_empty("address") else {
        return Err(CommandError::validation("address is required"));
    };
    let service = service_method(args);
    let address = FreeTextAddress::parse(input);

    tracing::info!("Looking up {} stores near '{}'", service, input);
    let located = api.find_stores(&address, &service).await?;

    let stores: Vec<StoreSummary> = located.stores.iter().map(StoreSummary::from).collect();
    let recommended_store_id = recommend(&stores, &service).and_then(|s| s.id.clone());

    to_payload(&StoresResponse {
        address: canonical_address(located.address.as_ref(), input),
        service,
        stores,
        recommended_store_id,
    })
}

/// Closest store currently taking `service` orders, else the first one listed.
pub fn recommend<'a>(stores: &'a [StoreSummary], service: &str) -> Option<&'a StoreSummary> {
    stores
        .iter()
        .filter(|s| s.accepts(service))
        .min_by(|a, b| {
            let da = a.distance.unwrap_or(f64::MAX);
            let db = b.distance.unwrap_or(f64::MAX);
            da.total_cmp(&db)
        })
        .or_else(|| stores.first())
}
