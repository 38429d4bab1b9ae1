//! HTTP capability used to fetch device descriptions and post SOAP requests.
//!
//! The gateway logic only needs two primitives, so they are exposed as the
//! [`HttpTransport`] trait. [`UreqTransport`] is the blocking implementation
//! used by default; tests plug in their own.

use std::time::Duration;

use tracing::{debug, trace};
use ureq::Agent;

use crate::config::HttpConfig;
use crate::errors::{IgdError, Result};

/// Status and body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpTransport: Send + Sync {
    /// GET `url` and return its body. Any non-2xx status is an error.
    fn get(&self, url: &str) -> Result<String>;

    /// POST `body` to `url` with the given headers.
    ///
    /// Non-2xx statuses are *not* errors: the reply is returned as is so the
    /// caller can inspect SOAP fault bodies sent with HTTP 500.
    fn post(&self, url: &str, headers: &[(&str, &str)], body: String) -> Result<HttpReply>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }

    fn post(&self, url: &str, headers: &[(&str, &str)], body: String) -> Result<HttpReply> {
        (**self).post(url, headers, body)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    user_agent: String,
}

impl UreqTransport {
    pub fn from_config(config: &HttpConfig) -> Self {
        // 4xx/5xx must not become Error::StatusCode, otherwise the body of a
        // SOAP fault (HTTP 500) is lost.
        let agent_config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout_secs.map(Duration::from_secs))
            .build();

        Self {
            agent: agent_config.into(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<String> {
        debug!("HTTP GET {}", url);

        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| IgdError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IgdError::transport(
                url,
                format!("unexpected HTTP status {}", status),
            ));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| IgdError::transport(url, e))?;
        trace!("HTTP GET {} returned {} bytes", url, body.len());

        Ok(body)
    }

    fn post(&self, url: &str, headers: &[(&str, &str)], body: String) -> Result<HttpReply> {
        debug!("HTTP POST {}", url);

        let mut request = self.agent.post(url).header("User-Agent", self.user_agent.as_str());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let mut response = request
            .send(body)
            .map_err(|e| IgdError::transport(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| IgdError::transport(url, e))?;

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_success_range() {
        let reply = |status| HttpReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(199).is_success());
        assert!(!reply(300).is_success());
        assert!(!reply(500).is_success());
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let transport = UreqTransport::from_config(&HttpConfig {
            timeout_secs: Some(2),
            ..HttpConfig::default()
        });
        // Port 9 on loopback: nothing listens there in a test environment.
        match transport.get("http://127.0.0.1:9/desc.xml") {
            Err(IgdError::Transport(message)) => {
                assert!(message.starts_with("http://127.0.0.1:9/desc.xml"))
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
