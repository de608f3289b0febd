// Request payload extraction for validation

use rulegate_core::{DataMap, ValidationSource};
use serde_json::Value;

use crate::error::HttpError;
use crate::http::HttpRequest;

/// A validation source built from an HTTP request: query parameters merged
/// with the parsed body, body fields winning, plus the resolved rule group.
#[derive(Debug, Clone, Default)]
pub struct RequestSource {
    data: DataMap,
    group: Option<String>,
}

impl RequestSource {
    /// Extracts the validation payload from `request`.
    ///
    /// The body is parsed as a JSON object when it parses as JSON, otherwise
    /// as form data; an empty body contributes nothing. A JSON body that is
    /// not an object is rejected.
    pub fn from_request(request: &HttpRequest) -> Result<Self, HttpError> {
        let mut data = DataMap::new();
        for (key, value) in &request.query_params {
            data.insert(key.clone(), Value::String(value.clone()));
        }
        for (key, value) in body_fields(&request.body)? {
            data.insert(key, value);
        }
        Ok(Self { data, group: None })
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl ValidationSource for RequestSource {
    fn data(&self) -> DataMap {
        self.data.clone()
    }

    fn group(&self) -> Option<String> {
        self.group.clone()
    }
}

fn body_fields(body: &[u8]) -> Result<DataMap, HttpError> {
    if body.is_empty() {
        return Ok(DataMap::new());
    }

    // Try to parse as JSON
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return match value {
            Value::Object(map) => Ok(map),
            _ => Err(HttpError::BadRequest(
                "request body must be a JSON object or form data".to_string(),
            )),
        };
    }

    // Try to parse as form data
    if let Ok(pairs) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
        let mut map = DataMap::new();
        for (key, value) in pairs {
            map.insert(key, Value::String(value));
        }
        return Ok(map);
    }

    Err(HttpError::Deserialization(
        "request body is neither JSON nor form data".to_string(),
    ))
}
