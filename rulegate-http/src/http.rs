// Host-agnostic HTTP request and response forms

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::HttpError;

/// The request form the adapters operate on.
///
/// A host maps its native request into this shape before running the chain;
/// the validator middlewares only ever read from it.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub query_params: HashMap<String, String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: HashMap::new(),
            body: Vec::new(),
            query_params: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Parses the body as JSON.
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Deserialization(e.to_string()))
    }

    /// A query parameter by name.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }
}

/// The response form middlewares produce.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    /// A 302 redirect to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::new(302).with_header("Location", location)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Serializes `value` into the JSON body and sets the content type.
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, HttpError> {
        self.body =
            serde_json::to_vec(value).map_err(|e| HttpError::Serialization(e.to_string()))?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_json_body() {
        let req = HttpRequest::new("POST", "/items").with_body(br#"{"int": 5}"#.to_vec());

        let parsed: serde_json::Value = req.json().unwrap();
        assert_eq!(parsed, json!({"int": 5}));
    }

    #[test]
    fn test_request_json_body_invalid() {
        let req = HttpRequest::new("POST", "/items").with_body(b"not json".to_vec());

        let result: Result<serde_json::Value, _> = req.json();
        assert!(matches!(result, Err(HttpError::Deserialization(_))));
    }

    #[test]
    fn test_request_query_lookup() {
        let req = HttpRequest::new("GET", "/items").with_query("page", "2");

        assert_eq!(req.query("page"), Some("2"));
        assert_eq!(req.query("missing"), None);
    }

    #[test]
    fn test_redirect_response() {
        let response = HttpResponse::redirect("/form");
        assert_eq!(response.status, 302);
        assert_eq!(response.headers.get("Location"), Some(&"/form".to_string()));
    }

    #[test]
    fn test_json_response() {
        let response = HttpResponse::ok().with_json(&json!({"ok": true})).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(response.body, br#"{"ok":true}"#.to_vec());
    }
}
