use worker::*;

use crate::config::FeedConfig;
use crate::error::ProxyError;
use crate::feed::lookup_offer;
use crate::feed::types::ApiResponse;
use crate::utils::cors::with_cors;
use crate::utils::visitor::Visitor;

/// Body used when not even a regular error response can be built.
const FAULT_BODY: &str = r#"{"success":false,"error":"Internal server error."}"#;

/// Main (non-preflight) path. Every method is treated the same way.
///
/// Outcomes: 200 with an offer, 200 with the "no offers" message, or 500 with
/// a sanitized error. Details of a failure only go to the log.
pub async fn handle(req: &Request, env: &Env) -> Result<Response> {
    let result = find_offer(req, env).await;
    if let Err(e) = &result {
        console_error!("[offer] request failed: {}", e);
    }
    let (body, status) = outcome(result);

    match json_response(&body, status) {
        Ok(resp) => Ok(resp),
        Err(e) => {
            console_error!("[offer] response build failed: {:?}", e);
            fault_response()
        }
    }
}

/// Maps the lookup result onto the body and status sent back.
fn outcome(result: std::result::Result<ApiResponse, ProxyError>) -> (ApiResponse, u16) {
    match result {
        Ok(body) => (body, 200),
        Err(e) => (ApiResponse::failure(e.public_message()), 500),
    }
}

async fn find_offer(req: &Request, env: &Env) -> std::result::Result<ApiResponse, ProxyError> {
    let visitor = Visitor::from_request(req)?;
    let config = FeedConfig::from_env(env)?;
    lookup_offer(&config, &visitor).await
}

fn json_response(body: &ApiResponse, status: u16) -> Result<Response> {
    let json = serde_json::to_string(body)
        .map_err(|e| Error::RustError(format!("JSON serialization error: {e}")))?;
    json_body(json, status)
}

/// Fixed 500 response that needs no serialization.
fn fault_response() -> Result<Response> {
    json_body(FAULT_BODY.to_string(), 500)
}

fn json_body(json: String, status: u16) -> Result<Response> {
    let headers = Headers::new();
    headers.set("Content-Type", "application/json")?;
    with_cors(Response::ok(json)?.with_status(status).with_headers(headers))
}
