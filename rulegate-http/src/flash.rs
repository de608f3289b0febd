// Flash handoff of validation messages across a redirect

use rulegate_core::MessageBag;

use crate::error::HttpError;
use crate::http::{HttpRequest, HttpResponse};

/// Cookie carrying the flashed error bag to the next request.
pub const ERROR_COOKIE: &str = "validation_errors";

/// Attaches `bag` to `response` as a flash cookie (URL-encoded JSON).
pub fn flash_errors(
    mut response: HttpResponse,
    bag: &MessageBag,
) -> Result<HttpResponse, HttpError> {
    let json = serde_json::to_string(bag).map_err(|e| HttpError::Serialization(e.to_string()))?;
    let cookie = format!(
        "{ERROR_COOKIE}={}; Path=/; HttpOnly",
        urlencoding::encode(&json)
    );
    response.headers.insert("Set-Cookie".to_string(), cookie);
    Ok(response)
}

/// Reads and decodes the flashed error bag from `request`, if present.
pub fn take_errors(request: &HttpRequest) -> Option<MessageBag> {
    let header = request
        .headers
        .get("Cookie")
        .or_else(|| request.headers.get("cookie"))?;
    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name == ERROR_COOKIE {
            let decoded = urlencoding::decode(value).ok()?;
            return serde_json::from_str(&decoded).ok();
        }
    }
    None
}
