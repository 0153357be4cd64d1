//! The relay HTTP server
//!
//! One endpoint, no state: validate the `url` parameter, fetch it upstream,
//! gate the body on being valid JSON, and forward it with permissive CORS
//! headers so any origin can call the relay.

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

use crate::config::RelayConfig;

/// Start the relay server.
///
/// Binds to the address and port in `config` and serves `/api/proxy` until
/// the process is terminated.
pub async fn start_relay_server(
    config: RelayConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Relay listening on http://{}", addr);

    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.upstream_timeout)
        .build()?;

    loop {
        let (stream, _remote) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let client = client.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let client = client.clone();
                async move { handle_request(req, &client).await }
            });
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("Relay connection error: {}", e);
            }
        });
    }
}

async fn handle_request(
    req: Request<Incoming>,
    client: &reqwest::Client,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(dispatch(req.method(), req.uri().path(), req.uri().query(), client).await)
}

/// Method/path dispatch, separated from the hyper request type so handler
/// behavior is testable without sockets.
pub(crate) async fn dispatch(
    method: &Method,
    path: &str,
    query: Option<&str>,
    client: &reqwest::Client,
) -> Response<Full<Bytes>> {
    if *method == Method::OPTIONS {
        // Pre-flight: 200 with no body, CORS headers only.
        return empty_response(StatusCode::OK);
    }
    if *method != Method::GET {
        return json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            r#"{"error":"Method not allowed"}"#,
        );
    }
    if path == "/api/proxy" {
        handle_proxy(query, client).await
    } else {
        json_response(StatusCode::NOT_FOUND, r#"{"error":"Unknown endpoint"}"#)
    }
}

async fn handle_proxy(query: Option<&str>, client: &reqwest::Client) -> Response<Full<Bytes>> {
    let target = match target_url(query) {
        Ok(url) => url,
        Err(message) => return json_response(StatusCode::BAD_REQUEST, &error_body(message)),
    };

    let upstream = match client.get(target.clone()).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Relay transport failure for {}: {}", target, err);
            let body = serde_json::json!({
                "error": "Failed to fetch URL",
                "message": err.to_string(),
            });
            return json_response(StatusCode::INTERNAL_SERVER_ERROR, &body.to_string());
        }
    };

    let status = upstream.status();
    if !status.is_success() {
        warn!("Relay upstream {} returned {}", target, status);
        let message = format!(
            "Failed to fetch: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );
        let forwarded =
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
        return json_response(forwarded, &error_body(message.trim_end()));
    }

    let text = match upstream.text().await {
        Ok(text) => text,
        Err(err) => {
            let body = serde_json::json!({
                "error": "Failed to fetch URL",
                "message": err.to_string(),
            });
            return json_response(StatusCode::INTERNAL_SERVER_ERROR, &body.to_string());
        }
    };

    match relay_body(&text) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(message) => json_response(StatusCode::BAD_REQUEST, &error_body(message)),
    }
}

/// Extract and validate the `url` query parameter: present, parseable, and
/// an http(s) scheme. Returns the user-facing refusal otherwise.
fn target_url(query: Option<&str>) -> Result<Url, &'static str> {
    let raw = query.and_then(|query| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value.into_owned())
    });

    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err("URL parameter is required"),
    };

    let parsed = Url::parse(&raw).map_err(|_| "Invalid URL format")?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err("Only HTTP and HTTPS URLs are allowed");
    }
    Ok(parsed)
}

/// Upstream bodies pass through verbatim, but only when they parse as JSON.
fn relay_body(text: &str) -> Result<&str, &'static str> {
    match serde_json::from_str::<Value>(text) {
        Ok(_) => Ok(text),
        Err(_) => Err("Response is not valid JSON"),
    }
}

fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn json_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    cors_builder(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from(r#"{"error":"internal"}"#))))
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    cors_builder(status)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

fn cors_builder(status: StatusCode) -> hyper::http::response::Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
}
