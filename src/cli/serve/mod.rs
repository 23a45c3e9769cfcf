//! HTTP endpoint exposing the pipeline.
//!
//! | Route               | Response                                   |
//! |---------------------|--------------------------------------------|
//! | `POST /api/optimize`| wire JSON (200, or 400 for bad requests)   |
//! | `GET /health`       | `ok`                                       |

mod response;

use std::io::Read;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use tiny_http::{Method, Request, Server};

use crate::config::RevectorConfig;
use crate::core::{OptimizeRequest, OptimizeResult, is_shutdown, register_server};
use crate::pipeline::{Pipeline, PipelineError};
use crate::{debug, log};
use response::Reply;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Largest request body accepted by the optimize route.
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Number of worker threads handling requests.
const WORKER_THREADS: usize = 4;

/// Bind the server and handle requests until shutdown.
pub fn serve(config: &RevectorConfig) -> Result<()> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    run_request_loop(&server)?;
    log!("serve"; "stopped");
    Ok(())
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

fn run_request_loop(server: &Server) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(WORKER_THREADS)
        .build()?;
    let pipeline = Arc::new(Pipeline::new());

    for request in server.incoming_requests() {
        let pipeline = Arc::clone(&pipeline);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &pipeline) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(mut request: Request, pipeline: &Pipeline) -> Result<()> {
    if is_shutdown() {
        return Reply::unavailable().send(request);
    }

    let method = request.method().clone();
    let path = request.url().split('?').next().unwrap_or("").to_string();
    debug!("serve"; "{} {}", method, path);

    let body = if method == Method::Post {
        Some(read_body(&mut request))
    } else {
        None
    };

    route(&method, &path, body, pipeline)?.send(request)
}

/// Read the request body as UTF-8, rejecting oversized payloads.
fn read_body(request: &mut Request) -> Result<String, String> {
    if request.body_length().is_some_and(|len| len > MAX_BODY_BYTES) {
        return Err(format!("request body exceeds {MAX_BODY_BYTES} bytes"));
    }

    let mut body = String::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES as u64 + 1)
        .read_to_string(&mut body)
        .map_err(|e| format!("unreadable request body: {e}"))?;

    if body.len() > MAX_BODY_BYTES {
        return Err(format!("request body exceeds {MAX_BODY_BYTES} bytes"));
    }
    Ok(body)
}

/// Map a method, path and body to a reply.
fn route(
    method: &Method,
    path: &str,
    body: Option<Result<String, String>>,
    pipeline: &Pipeline,
) -> Result<Reply> {
    match (method, path) {
        (Method::Post, "/api/optimize") => {
            let body = body.unwrap_or_else(|| Ok(String::new()));
            optimize(body, pipeline)
        }
        (Method::Get | Method::Head, "/health") => Ok(Reply::text(200, "ok")),
        (_, "/api/optimize") => Ok(Reply::method_not_allowed("POST")),
        (_, "/health") => Ok(Reply::method_not_allowed("GET, HEAD")),
        _ => Ok(Reply::not_found()),
    }
}

/// Validate the body, then run the pipeline. Bad requests are answered
/// with 400 and never reach the pipeline stages.
fn optimize(body: Result<String, String>, pipeline: &Pipeline) -> Result<Reply> {
    let request = body.and_then(|body| {
        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| e.to_string())?;
        OptimizeRequest::from_json(value)
    });

    match request {
        Ok(request) => Reply::json(200, &pipeline.run(&request)),
        Err(message) => {
            let error = PipelineError::Validation(message);
            log!("error"; "{}", error);
            Reply::json(400, &OptimizeResult::failure(error.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::net::Ipv4Addr;

    const SVG: &str = r#"<svg width="24" height="24"><rect width="24" height="24"/></svg>"#;

    fn post(body: &str) -> Reply {
        route(
            &Method::Post,
            "/api/optimize",
            Some(Ok(body.to_string())),
            &Pipeline::new(),
        )
        .unwrap()
    }

    fn body_json(reply: &Reply) -> Value {
        serde_json::from_slice(&reply.body).unwrap()
    }

    #[test]
    fn test_health() {
        let reply = route(&Method::Get, "/health", None, &Pipeline::new()).unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, b"ok");
    }

    #[test]
    fn test_unknown_route() {
        let reply = route(&Method::Get, "/nope", None, &Pipeline::new()).unwrap();
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn test_wrong_method() {
        let reply = route(&Method::Get, "/api/optimize", None, &Pipeline::new()).unwrap();
        assert_eq!(reply.status, 405);
        assert_eq!(reply.allow, Some("POST"));
    }

    #[test]
    fn test_optimize_success() {
        let body = json!({ "rawSvg": SVG, "fileName": "bell.svg" }).to_string();
        let reply = post(&body);

        assert_eq!(reply.status, 200);
        let wire = body_json(&reply);
        assert_eq!(wire["success"], json!(true));
        assert!(wire["componentCode"].as_str().unwrap().contains("const Bell"));
        assert!(wire.get("error").is_none());
    }

    #[test]
    fn test_pipeline_failure_is_200() {
        let reply = post(&json!({ "rawSvg": "<svg><unclosed" }).to_string());
        assert_eq!(reply.status, 200);
        assert_eq!(body_json(&reply)["success"], json!(false));
    }

    #[test]
    fn test_bad_requests_are_400() {
        for body in ["not json", r#"{"fileName":"x"}"#, r#"{"rawSvg":"<svg/>","framework":"svelte"}"#] {
            let reply = post(body);
            assert_eq!(reply.status, 400, "body: {body}");
            let wire = body_json(&reply);
            assert_eq!(wire["success"], json!(false));
            assert!(wire["error"].as_str().unwrap().starts_with("invalid request:"));
        }
    }

    #[test]
    fn test_unreadable_body_is_400() {
        let reply = route(
            &Method::Post,
            "/api/optimize",
            Some(Err("unreadable request body: reset".to_string())),
            &Pipeline::new(),
        )
        .unwrap();
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn test_bind_retries_next_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let taken = Server::http(SocketAddr::new(localhost, 0)).unwrap();
        let port = taken.server_addr().to_ip().unwrap().port();

        let (_server, addr) = bind_with_retry(localhost, port).unwrap();
        assert!(addr.port() > port);
    }
}
