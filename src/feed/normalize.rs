use serde_json::Value;

use super::types::NormalizedOffer;

const DEFAULT_NAME: &str = "Exclusive Offer";
const DEFAULT_LINK: &str = "#";
const DEFAULT_PAYOUT: &str = "0.00";
const DEFAULT_INSTRUCTIONS: &str = "Complete the steps to proceed.";

/// Picks the first offer out of a feed payload.
///
/// Anything other than a non-empty JSON array means "no offers". Only index 0
/// is inspected; the feed orders its results by priority.
pub fn select_offer(payload: &Value) -> Option<NormalizedOffer> {
    let first = payload.as_array()?.first()?;
    Some(normalize_offer(first))
}

/// Maps one raw feed entry onto the four output fields.
pub fn normalize_offer(raw: &Value) -> NormalizedOffer {
    NormalizedOffer {
        name: resolve(raw, &["anchor", "name"], DEFAULT_NAME),
        link: resolve(raw, &["url", "click_url"], DEFAULT_LINK),
        payout: resolve(raw, &["conversion", "payout"], DEFAULT_PAYOUT),
        instructions: resolve(raw, &["requirements", "description"], DEFAULT_INSTRUCTIONS),
    }
}

/// Returns the first truthy field among `keys`, in order, else `default`.
fn resolve(raw: &Value, keys: &[&str], default: &str) -> String {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .find_map(truthy_text)
        .unwrap_or_else(|| default.to_string())
}

/// Falsy values (`null`, `false`, `""`, zero) yield `None`.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
