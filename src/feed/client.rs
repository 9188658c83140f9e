use std::future::Future;
use std::time::Duration;

use futures_util::future::{select, Either};
use futures_util::pin_mut;
use serde_json::Value;
use worker::*;

use super::query::UpstreamOfferQuery;
use crate::config::FeedConfig;
use crate::error::ProxyError;
use crate::utils::visitor::Visitor;

/// Sent upstream in place of the visitor's own user-agent header.
const OUTBOUND_UA: &str = "OfferProxy-Worker/1.0";

/// Performs the single offer feed lookup for `visitor` and decodes the body.
///
/// Sending the request and reading the body both race one timer of
/// `config.timeout`; if the timer wins the request is aborted. Non-2xx
/// statuses are errors. The decoded JSON is returned whatever its shape.
pub async fn fetch_offers(
    config: &FeedConfig,
    visitor: &Visitor,
) -> std::result::Result<Value, ProxyError> {
    let url = UpstreamOfferQuery::new(config, visitor).to_url(&config.base_url);
    console_log!(
        "[feed] requesting offers ip={} host={}",
        visitor.ip,
        config.base_url.host_str().unwrap_or("-")
    );

    let headers = Headers::new();
    headers.set("User-Agent", OUTBOUND_UA)?;
    headers.set("Accept", "application/json")?;

    let mut init = RequestInit::new();
    init.with_method(Method::Get).with_headers(headers);

    let request = Request::new_with_init(url.as_str(), &init)?;
    let fetch = Fetch::Request(request);

    let controller = AbortController::default();
    let signal = controller.signal();
    let exchange = async {
        let mut resp = fetch
            .send_with_signal(&signal)
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;
        let status = resp.status_code();
        console_log!("[feed] status={}", status);
        check_status(status)?;
        resp.text()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))
    };

    let text = match bounded(exchange, Delay::from(config.timeout), config.timeout).await {
        Err(ProxyError::Timeout(limit)) => {
            controller.abort();
            return Err(ProxyError::Timeout(limit));
        }
        other => other?,
    };
    decode_payload(&text)
}

/// Runs `work` unless `deadline` fires first.
async fn bounded<T, W, D>(
    work: W,
    deadline: D,
    limit: Duration,
) -> std::result::Result<T, ProxyError>
where
    W: Future<Output = std::result::Result<T, ProxyError>>,
    D: Future<Output = ()>,
{
    pin_mut!(work);
    pin_mut!(deadline);
    match select(work, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ProxyError::Timeout(limit)),
    }
}

fn check_status(status: u16) -> std::result::Result<(), ProxyError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ProxyError::UpstreamStatus(status))
    }
}

fn decode_payload(text: &str) -> std::result::Result<Value, ProxyError> {
    serde_json::from_str(text).map_err(|e| ProxyError::MalformedPayload(e.to_string()))
}
