use worker::{Response, Result};

/// Headers attached to every response, preflight or not.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, HEAD, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

pub fn with_cors(mut response: Response) -> Result<Response> {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.set(name, value)?;
    }
    Ok(response)
}

/// Empty 200 answer to an `OPTIONS` preflight.
pub fn preflight() -> Result<Response> {
    with_cors(Response::empty()?)
}
