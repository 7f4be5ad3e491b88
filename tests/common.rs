//! Common test utilities for account integration tests
//!
//! - `ScriptedFetch`: canned per-URL responses with optional delays, so
//!   concurrent requests can be forced to complete out of order
//! - `RecordingDispatcher`: collects dispatched actions in order
//! - fixed mnemonic and network helpers
#![allow(dead_code)]

use async_trait::async_trait;
use portal_account::{AccountError, Action, Dispatch, Fetch, FetchResponse};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::time::Duration;

pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[derive(Debug, Clone)]
enum Scripted {
    Respond(FetchResponse),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Route {
    outcome: Scripted,
    delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Fetch double answering from a per-URL script
#[derive(Default)]
pub struct ScriptedFetch {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, status: u16, body: &str) -> Self {
        self.respond_after(url, status, body, 0)
    }

    pub fn respond_after(mut self, url: &str, status: u16, body: &str, delay_ms: u64) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                outcome: Scripted::Respond(FetchResponse::new(status, body)),
                delay: Duration::from_millis(delay_ms),
            },
        );
        self
    }

    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route {
                outcome: Scripted::Fail(message.to_string()),
                delay: Duration::ZERO,
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    async fn answer(&self, request: RecordedRequest) -> Result<FetchResponse, AccountError> {
        let route = self.routes.get(&request.url).cloned();
        self.requests.lock().unwrap().push(request.clone());

        let route = route.ok_or_else(|| {
            AccountError::Transport(format!("no scripted response for {}", request.url))
        })?;
        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }
        match route.outcome {
            Scripted::Respond(response) => Ok(response),
            Scripted::Fail(message) => Err(AccountError::Transport(message)),
        }
    }
}

#[async_trait]
impl Fetch for ScriptedFetch {
    async fn get(
        &self,
        url: &str,
        authorization: Option<&str>,
    ) -> Result<FetchResponse, AccountError> {
        self.answer(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            authorization: authorization.map(str::to_string),
            body: None,
        })
        .await
    }

    async fn post_json(
        &self,
        url: &str,
        authorization: Option<&str>,
        body: &Value,
    ) -> Result<FetchResponse, AccountError> {
        self.answer(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            authorization: authorization.map(str::to_string),
            body: Some(body.clone()),
        })
        .await
    }
}

/// Dispatch target that only records
#[derive(Default)]
pub struct RecordingDispatcher {
    actions: Mutex<Vec<Action>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }
}

impl Dispatch for RecordingDispatcher {
    fn dispatch(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }
}

/// Balance endpoint template used with `ScriptedFetch`
pub const BALANCE_TEMPLATE: &str = "http://explorer.test/insight-api/addr/{address}/?noTxList=1";

pub fn balance_route(address: &str) -> String {
    BALANCE_TEMPLATE.replace("{address}", address)
}

pub fn balance_body(balance: f64) -> String {
    format!(r#"{{"addrStr":"x","balance":{},"balanceSat":0}}"#, balance)
}
