// HTTP transport for the resource cache.
// Issues unauthenticated GET requests and hands back the response body as a byte stream.

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::TransportError;
use crate::logger::{Logger, NoopLogger};

/// Response body handed to the cache. Dropping it releases the connection.
pub type BodyStream = Box<dyn Read + Send>;

/// Source of resource bytes for a URI.
pub trait Transport {
    fn get_stream(&self, uri: &str) -> Result<BodyStream, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_stream(&self, uri: &str) -> Result<BodyStream, TransportError> {
        (**self).get_stream(uri)
    }
}

/// Blocking `reqwest` transport with a per-request timeout.
pub struct HttpTransport {
    client: Client,
    logger: Arc<dyn Logger>,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repocache/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            logger: Arc::new(NoopLogger),
        })
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }
}

impl Transport for HttpTransport {
    fn get_stream(&self, uri: &str) -> Result<BodyStream, TransportError> {
        self.logger.info(format_args!("GET {}", uri));
        let response = self.client.get(uri).send()?;

        // The body is cached whatever the status; only flag it.
        let status = response.status();
        if !status.is_success() {
            self.logger
                .warn(format_args!("GET {} returned HTTP {}", uri, status));
        }

        Ok(Box::new(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        assert!(HttpTransport::new(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
        // Port 1 on loopback refuses connections.
        let result = transport.get_stream("http://127.0.0.1:1/repos/o/r/issues");
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
