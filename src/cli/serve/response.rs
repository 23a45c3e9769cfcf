//! HTTP responses.

use anyhow::{Result, anyhow};
use tiny_http::{Header, Request, Response, StatusCode};

use crate::core::OptimizeResult;

const JSON: &str = "application/json";
const PLAIN: &str = "text/plain; charset=utf-8";

/// Response ready to be sent, kept apart from the connection for testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub allow: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Reply {
    /// Wire JSON for a pipeline result.
    pub fn json(status: u16, result: &OptimizeResult) -> Result<Self> {
        Ok(Self {
            status,
            content_type: JSON,
            allow: None,
            body: serde_json::to_vec(result)?,
        })
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: PLAIN,
            allow: None,
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn not_found() -> Self {
        Self::text(404, "404 Not Found")
    }

    pub fn method_not_allowed(allow: &'static str) -> Self {
        Self {
            allow: Some(allow),
            ..Self::text(405, "405 Method Not Allowed")
        }
    }

    pub fn unavailable() -> Self {
        Self::text(503, "503 Service Unavailable")
    }

    pub fn send(self, request: Request) -> Result<()> {
        let mut response = Response::from_data(self.body)
            .with_status_code(StatusCode(self.status))
            .with_header(make_header("Content-Type", self.content_type)?);
        if let Some(allow) = self.allow {
            response = response.with_header(make_header("Allow", allow)?);
        }
        request.respond(response)?;
        Ok(())
    }
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}
