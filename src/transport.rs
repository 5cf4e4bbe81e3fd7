//! The HTTP seam. Every API call the tools make goes through [`Transport`],
//! so request construction can be checked without the network.

use crate::auth::Credentials;
use crate::errors::{Result, SlidesApiError};
use log::{debug, error};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::future::Future;

/// Helper struct to attempt parsing standard Google API error responses.
#[derive(Deserialize, Debug)]
struct GoogleApiErrorResponse {
    error: GoogleApiErrorDetail,
}

/// Details within a standard Google API error response.
#[allow(unused)]
#[derive(Deserialize, Debug)]
struct GoogleApiErrorDetail {
    code: i32,
    message: String,
    #[serde(default)]
    status: String,
}

/// A fully built API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
    /// Whether to attach the bearer token. Thumbnail content URLs are
    /// pre-signed and must be fetched without it.
    pub authorized: bool,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        ApiRequest {
            method,
            url,
            query: Vec::new(),
            body: None,
            authorized: true,
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    pub fn unauthorized(mut self) -> Self {
        self.authorized = false;
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Sends an [`ApiRequest`] and returns the raw response body of a successful
/// call. Non-2xx responses are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// The production transport: `reqwest` plus OAuth credentials.
#[derive(Debug)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_client(reqwest::Client::new(), credentials)
    }

    pub fn with_client(http_client: reqwest::Client, credentials: Credentials) -> Self {
        HttpTransport {
            http_client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Vec<u8>> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http_client
            .request(request.method.clone(), request.url.clone())
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if request.authorized {
            let access_token = self.credentials.access_token().await?;
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", access_token));
            if let Some(project) = self.credentials.quota_project() {
                let value = HeaderValue::from_str(project).map_err(|_| {
                    SlidesApiError::AuthSetupError(format!("Invalid quota project '{}'", project))
                })?;
                builder = builder.header("x-goog-user-project", value);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(SlidesApiError::Network)?;

        // Handle response
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await.map_err(SlidesApiError::Network)?;
            Ok(bytes.to_vec())
        } else {
            // Handle API-level errors (non-2xx status codes)
            let error_text = response.text().await.map_err(SlidesApiError::Network)?;
            let message = match serde_json::from_str::<GoogleApiErrorResponse>(&error_text) {
                Ok(google_error) => google_error.error.message,
                Err(_) => format!("API request failed with status {}: {}", status, error_text),
            };
            error!("{} {} failed: {}", request.method, request.url, message);
            Err(SlidesApiError::ApiError { status, message })
        }
    }
}

/// Deserializes a response body, logging a snippet of the body on failure.
pub(crate) fn decode<R: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<R> {
    serde_json::from_slice::<R>(bytes).map_err(|e| {
        let json_snippet = String::from_utf8_lossy(&bytes[..bytes.len().min(500)]);
        error!("JSON deserialization error: {}\n{}", e, json_snippet);
        SlidesApiError::JsonDeserialization(e)
    })
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    type Handler = Box<dyn Fn(&ApiRequest) -> Result<Vec<u8>> + Send + Sync>;

    /// Records every request and answers with `handler`.
    pub struct MockTransport {
        handler: Handler,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockTransport {
        pub fn new<F>(handler: F) -> Self
        where
            F: Fn(&ApiRequest) -> Result<Vec<u8>> + Send + Sync + 'static,
        {
            MockTransport {
                handler: Box::new(handler),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Requests whose method matches and whose URL path ends with `suffix`.
        pub fn matching(&self, method: Method, suffix: &str) -> Vec<ApiRequest> {
            self.requests()
                .into_iter()
                .filter(|r| r.method == method && r.url.path().ends_with(suffix))
                .collect()
        }
    }

    impl Transport for MockTransport {
        async fn send(&self, request: ApiRequest) -> Result<Vec<u8>> {
            let response = (self.handler)(&request);
            self.requests.lock().unwrap().push(request);
            response
        }
    }

    pub fn json_body(value: JsonValue) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&value).unwrap())
    }

    pub fn api_error(status: u16, message: &str) -> Result<Vec<u8>> {
        Err(SlidesApiError::ApiError {
            status: reqwest::StatusCode::from_u16(status).unwrap(),
            message: message.to_string(),
        })
    }
}
