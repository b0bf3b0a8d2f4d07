//! In-process HTTP transport for tests.
//!
//! [`ScriptedTransport`] replays queued responses per `(method, path)` and
//! records every request it sees, so tests can assert on URLs, headers,
//! bodies and request counts without touching the network.

use async_trait::async_trait;
use http_client::{Error, HttpClient, Request, Response};
use http_types::{Method, StatusCode};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A request seen by a [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query pairs in the order they were sent.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        http_types::Url::parse(&self.url)
            .map(|url| {
                url.query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Respond { status: u16, body: String },
    Fail(String),
}

#[derive(Debug, Default)]
struct Script {
    routes: HashMap<(String, String), VecDeque<Scripted>>,
    requests: Vec<RecordedRequest>,
}

/// Transport answering from a script.
///
/// Clones share the script, so keep one handle for assertions and hand a
/// clone to the client. Unscripted routes answer 404.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enqueue(&self, method: Method, path: &str, scripted: Scripted) -> &Self {
        self.script()
            .routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(scripted);
        self
    }

    /// Queue a raw response for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.enqueue(
            method,
            path,
            Scripted::Respond {
                status,
                body: body.into(),
            },
        )
    }

    /// Queue a JSON response for `method path`.
    pub fn respond_json(&self, method: Method, path: &str, status: u16, body: &Value) -> &Self {
        self.respond(method, path, status, body.to_string())
    }

    /// Queue a 200 JSON response for `GET path`.
    pub fn get_json(&self, path: &str, body: &Value) -> &Self {
        self.respond_json(Method::Get, path, 200, body)
    }

    /// Queue a network failure for `method path`.
    pub fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
        self.enqueue(method, path, Scripted::Fail(message.to_string()))
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script().requests.len()
    }

    /// Requests whose path equals `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.script()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpClient for ScriptedTransport {
    async fn send(&self, mut req: Request) -> Result<Response, Error> {
        let body = req.body_string().await.unwrap_or_default();
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            url: req.url().to_string(),
            path: req.url().path().to_string(),
            headers: req
                .iter()
                .map(|(name, values)| (name.as_str().to_string(), values.last().as_str().to_string()))
                .collect(),
            body,
        };

        let scripted = {
            let mut script = self.script();
            let next = script
                .routes
                .get_mut(&(recorded.method.clone(), recorded.path.clone()))
                .and_then(VecDeque::pop_front);
            script.requests.push(recorded);
            next
        };

        match scripted {
            Some(Scripted::Respond { status, body }) => {
                let mut response = Response::new(status);
                let _ = response.insert_header("Content-Type", "application/json");
                response.set_body(body);
                Ok(response)
            }
            Some(Scripted::Fail(message)) => Err(Error::from_str(StatusCode::BadGateway, message)),
            None => {
                let mut response = Response::new(StatusCode::NotFound);
                response.set_body("{}");
                Ok(response)
            }
        }
    }
}
