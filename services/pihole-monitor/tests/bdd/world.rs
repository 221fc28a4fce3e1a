//! BDD test world for the pihole monitor

use std::sync::Arc;

use cucumber::World;
use tokio::sync::RwLock;

use pihole_monitor::actions::ActionDispatcher;
use pihole_monitor::config::PiholeConfig;
use pihole_monitor::io::{HttpClient, HttpResponse};
use pihole_monitor::scheduler::PollScheduler;
use pihole_monitor::state::{new_state_handle, StateHandle};
use pihole_monitor::{FetchError, MonitorError};

/// Canned Pi-hole answers, by name
pub fn canned_response(name: &str) -> Result<HttpResponse, String> {
    let (status, body) = match name {
        "enabled summary" => (
            200,
            r#"{"domains_being_blocked":121860,"dns_queries_today":1234,"ads_blocked_today":56,"ads_percentage_today":4.5,"status":"enabled"}"#,
        ),
        "disabled summary" => (
            200,
            r#"{"domains_being_blocked":121860,"dns_queries_today":1300,"ads_blocked_today":60,"ads_percentage_today":4.6,"status":"disabled"}"#,
        ),
        "summary without ads_blocked_today" => (
            200,
            r#"{"dns_queries_today":2000,"status":"enabled"}"#,
        ),
        "empty object" => (200, "{}"),
        "auth rejection" => (200, "[]"),
        "empty body" => (200, ""),
        "server error" => (500, "Internal Server Error"),
        "no answer" => return Err("operation timed out".to_string()),
        other => panic!("Unknown canned response: {}", other),
    };
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

/// An HTTP client that records request URLs and answers with a swappable response
#[derive(Debug)]
pub struct ScriptedHttpClient {
    response: RwLock<Result<HttpResponse, String>>,
    requests: RwLock<Vec<String>>,
}

impl Default for ScriptedHttpClient {
    fn default() -> Self {
        Self {
            response: RwLock::new(canned_response("empty object")),
            requests: RwLock::new(Vec::new()),
        }
    }
}

impl ScriptedHttpClient {
    pub async fn answer_with(&self, name: &str) {
        *self.response.write().await = canned_response(name);
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        url: &str,
        _timeout: std::time::Duration,
    ) -> pihole_monitor::Result<HttpResponse> {
        self.requests.write().await.push(url.to_string());
        self.response
            .read()
            .await
            .clone()
            .map_err(MonitorError::Http)
    }
}

#[derive(Debug, Default, World)]
pub struct PiholeWorld {
    pub endpoint: PiholeConfig,
    pub http: Arc<ScriptedHttpClient>,
    pub state: Option<StateHandle>,
    pub scheduler: Option<PollScheduler>,
    pub dispatcher: Option<ActionDispatcher>,

    // Polling
    pub ticks_delivered: u64,
    pub polled_on_ticks: Vec<u64>,
    pub last_poll: Option<Result<(), FetchError>>,

    // Actions
    pub last_command_result: Option<bool>,

    // Extraction
    pub body: Option<String>,
}

impl PiholeWorld {
    /// Build the engine around the configured endpoint on first use
    pub fn ensure_engine(&mut self) {
        if self.state.is_some() {
            return;
        }
        let state = new_state_handle(self.endpoint.clone());
        let http: Arc<dyn HttpClient> = self.http.clone();
        self.scheduler = Some(PollScheduler::new(Arc::clone(&http), Arc::clone(&state)));
        self.dispatcher = Some(ActionDispatcher::new(http, Arc::clone(&state)));
        self.state = Some(state);
    }

    pub fn state(&self) -> StateHandle {
        Arc::clone(self.state.as_ref().expect("engine not built"))
    }
}
