pub mod client;
pub mod normalize;
pub mod query;
pub mod types;

use worker::*;

use self::client::fetch_offers;
use self::normalize::select_offer;
use self::types::ApiResponse;
use crate::config::FeedConfig;
use crate::error::ProxyError;
use crate::utils::visitor::Visitor;

/// One feed round trip: fetch, then keep the first offer if there is one.
///
/// An empty or non-array payload is a normal outcome, not an error.
pub async fn lookup_offer(
    config: &FeedConfig,
    visitor: &Visitor,
) -> std::result::Result<ApiResponse, ProxyError> {
    let payload = fetch_offers(config, visitor).await?;

    match select_offer(&payload) {
        Some(offer) => {
            console_log!("[feed] selected offer name={}", offer.name);
            Ok(ApiResponse::offer(offer))
        }
        None => {
            console_log!("[feed] no offers for ip={}", visitor.ip);
            Ok(ApiResponse::no_offers())
        }
    }
}
