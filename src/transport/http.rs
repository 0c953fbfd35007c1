use reqwest::Client;
use serde_json::Value;

use super::error::{Failure, TransportError, NETWORK_ERROR};
use super::timeout::TimeoutConfig;
use super::{Outcome, Transport, TransportRequest};

/// Transport backed by a `reqwest` client.
///
/// Read and delete params are appended as a query string; write params
/// become the body, JSON-encoded when the request asks for it. Otherwise
/// an object is form-encoded and anything else is sent as-is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout_config: TimeoutConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(timeout_config.connect)
            .timeout(timeout_config.request)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client, keeping its timeouts and pool settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn perform(&self, request: TransportRequest) -> Outcome {
        let mut builder = self
            .client
            .request(request.method.http_method(), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(params) = &request.params {
            if request.method.has_body() {
                builder = match params {
                    _ if request.json_body => builder.json(params),
                    Value::Object(_) => builder.form(&request.param_pairs()),
                    Value::Null => builder,
                    Value::String(text) => builder.body(text.clone()),
                    other => builder.body(other.to_string()),
                };
            } else {
                let pairs = request.param_pairs();
                if !pairs.is_empty() {
                    builder = builder.query(&pairs);
                }
            }
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(url = %request.url, method = %request.method, error = %e, "Request failed");
            if e.is_timeout() {
                Failure::network(format!("{}: request timed out", NETWORK_ERROR))
            } else {
                Failure::network(NETWORK_ERROR)
            }
        })?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url = %request.url, %status, error = %e, "Failed to read response body");
                return Err(if status.is_success() {
                    Failure::network(NETWORK_ERROR)
                } else {
                    Failure::status(status.as_u16(), Value::Null)
                });
            }
        };
        let payload = request.response_kind.decode(&body);

        tracing::debug!(url = %request.url, method = %request.method, %status, "Response received");

        if status.is_success() {
            Ok(payload)
        } else {
            Err(Failure::status(status.as_u16(), payload))
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Outcome {
        self.perform(request).await
    }
}
