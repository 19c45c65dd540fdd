//! tiny_http server adapter
//!
//! Handles routing, query-string parsing, and response conversion for
//! tiny_http. Routing itself is a pure function over method and URL so it
//! can be tested without a socket.

use std::collections::HashMap;
use std::io::Cursor;

use chrono::Utc;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use openmedicaid::api::{self, ApiError, ApiResponse, WatchlistRequest};
use openmedicaid::dataset::Dataset;
use openmedicaid::feed::{self, ARTICLES};

/// Everything a request needs, built once at startup
#[derive(Debug)]
pub struct ServerState {
    /// Fixtures
    pub data: Dataset,
    /// Public site address for the feed and sitemap
    pub site_url: String,
}

/// A routed reply before conversion to a tiny_http response
#[derive(Debug)]
pub struct Reply {
    /// HTTP status
    pub status: u16,
    /// `Content-Type` header value
    pub content_type: &'static str,
    /// Body bytes
    pub body: Vec<u8>,
}

const JSON: &str = "application/json";
const XML: &str = "application/xml";
const HTML: &str = "text/html; charset=utf-8";

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle a request and return a response
pub fn handle_request(state: &ServerState, request: &Request) -> Response<Cursor<Vec<u8>>> {
    let reply = route(state, request.method(), request.url());
    log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);
    into_response(reply)
}

/// Map a method and URL to a reply
pub fn route(state: &ServerState, method: &Method, url: &str) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let params = parse_query(query);

    if method != &Method::Get {
        return error_reply(&ApiError::bad_request(format!("Method not allowed: {method}")));
    }

    match path {
        "/" => Reply {
            status: 200,
            content_type: HTML,
            body: INDEX_HTML.as_bytes().to_vec(),
        },
        "/feed.xml" => xml_reply(feed::rss(&state.site_url, ARTICLES, &feed::default_pub_date())),
        "/sitemap.xml" => match feed::sitemap(&state.site_url, &state.data, &Utc::now()) {
            Ok(xml) => xml_reply(xml),
            Err(e) => error_reply(&ApiError::from(e)),
        },
        _ => {
            // Supports both /api/v1/... (versioned) and /api/...
            let Some(api_path) = path.strip_prefix("/api/v1").or_else(|| path.strip_prefix("/api"))
            else {
                return error_reply(&ApiError::not_found(format!("Not found: {path}")));
            };
            route_api(state, api_path, &params)
        },
    }
}

fn route_api(state: &ServerState, api_path: &str, params: &HashMap<String, String>) -> Reply {
    let data = &state.data;
    let param = |key: &str| params.get(key).map(String::as_str);

    match api_path {
        "/stats" => json_reply(&api::get_stats(data)),
        "/watchlist" => handle_result(api::get_watchlist(data, &watchlist_request(params))),
        "/check" => json_reply(&api::search_providers(data, param("q").unwrap_or(""))),
        "/states" => handle_result(api::list_states(data, param("view"))),
        "/trends" => json_reply(&api::get_trends(data)),
        "/exclusions" => json_reply(&api::get_exclusions(data)),
        "/ml" => json_reply(&api::get_ml(data)),
        "/flags" => json_reply(&api::list_flags()),
        "/validate" => json_reply(&api::validate(data)),
        "/format" => match (param("kind"), param("value")) {
            (Some(kind), Some(value)) => handle_result(api::format_value(kind, value)),
            _ => error_reply(&ApiError::bad_request("kind and value are required")),
        },

        // Provider detail: /providers/{npi}
        _ if api_path.starts_with("/providers/") => {
            let npi = api_path.strip_prefix("/providers/").unwrap_or("");
            handle_result(api::get_provider(data, npi))
        },

        // State detail: /states/{code}
        _ if api_path.starts_with("/states/") => {
            let code = api_path.strip_prefix("/states/").unwrap_or("");
            handle_result(api::get_state(data, code))
        },

        _ => error_reply(&ApiError::not_found(format!("API endpoint not found: {api_path}"))),
    }
}

// =============================================================================
// QUERY PARSING
// =============================================================================

/// Decode `a=1&b=two` into a map; later keys win
fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

fn watchlist_request(params: &HashMap<String, String>) -> WatchlistRequest {
    let get = |key: &str| params.get(key).cloned();
    WatchlistRequest {
        tab: get("tab"),
        tier: get("tier"),
        flag: get("flag"),
        state: get("state"),
        search: get("search").or_else(|| get("q")),
        sort: get("sort"),
        limit: get("limit"),
    }
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to a reply
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Reply {
    match result {
        Ok(data) => json_reply(&data),
        Err(e) => error_reply(&e),
    }
}

/// Successful JSON reply in the envelope
fn json_reply<T: Serialize>(data: &T) -> Reply {
    encode(&ApiResponse::success(data), 200)
}

/// Error JSON reply with the matching status code
fn error_reply(error: &ApiError) -> Reply {
    let response = ApiResponse::<()>::error(error.clone());
    encode(&response, error.status_code())
}

fn encode<T: Serialize>(data: &T, status: u16) -> Reply {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Reply {
        status,
        content_type: JSON,
        body: json.into_bytes(),
    }
}

fn xml_reply(xml: String) -> Reply {
    Reply {
        status: 200,
        content_type: XML,
        body: xml.into_bytes(),
    }
}

fn into_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_data(reply.body).with_status_code(StatusCode(reply.status));
    match Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>openmedicaid</title>
</head>
<body>
    <h1>openmedicaid</h1>
    <p>Medicaid provider spending reports.</p>
    <ul>
        <li><a href="/api/v1/stats">/api/v1/stats</a></li>
        <li><a href="/api/v1/watchlist">/api/v1/watchlist</a>
            (<code>tab, tier, flag, state, search, sort, limit</code>)</li>
        <li><code>/api/v1/providers/{npi}</code></li>
        <li><code>/api/v1/check?q=...</code></li>
        <li><a href="/api/v1/states">/api/v1/states</a> (<code>view=per-capita|total</code>)</li>
        <li><code>/api/v1/states/{code}</code></li>
        <li><a href="/api/v1/trends">/api/v1/trends</a></li>
        <li><a href="/api/v1/exclusions">/api/v1/exclusions</a></li>
        <li><a href="/api/v1/ml">/api/v1/ml</a></li>
        <li><a href="/api/v1/flags">/api/v1/flags</a></li>
        <li><a href="/api/v1/validate">/api/v1/validate</a></li>
        <li><code>/api/v1/format?kind=money&amp;value=1500</code></li>
        <li><a href="/feed.xml">/feed.xml</a></li>
        <li><a href="/sitemap.xml">/sitemap.xml</a></li>
    </ul>
</body>
</html>
"#;
