use super::store_id;
use crate::core::args::ParsedArgs;
use crate::core::classifier::classify;
use crate::core::output::{to_payload, Payload};
use crate::domain::model::{MenuGroups, StoreInfo};
use crate::domain::ports::OrderingApi;
use crate::utils::error::{CommandError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MenuPayload {
    #[serde(rename = "storeID")]
    store_id: String,
    store: StoreInfo,
    groups: MenuGroups,
}

pub async fn run<A: OrderingApi + ?Sized>(args: &ParsedArgs, api: &A) -> Result<Payload> {
    let Some(store) = store_id(args) else {
        return Err(CommandError::validation("store is required"));
    };

    tracing::info!("Fetching store {} profile and menu", store);
    let (profile, menu) = tokio::try_join!(api.store_profile(store), api.menu(store))?;

    to_payload(&MenuPayload {
        store_id: store.to_string(),
        store: StoreInfo::from(profile),
        groups: classify(&menu.variants),
    })
}
