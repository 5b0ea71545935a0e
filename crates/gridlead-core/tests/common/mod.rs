//! Shared fixtures: a throwaway form backend and a scripted strategy.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use gridlead_core::LeadRecord;
use gridlead_core::delivery::{DeliveryKind, DeliveryOutcome, DeliveryStrategy};
use gridlead_surface::{FieldId, MemorySurface};

/// One request the backend saw.
#[derive(Debug, Clone)]
pub struct Received {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct BackendState {
    status: StatusCode,
    body: String,
    delay: Duration,
    received: Arc<Mutex<Vec<Received>>>,
}

/// A form backend answering every `POST /leads` the same way.
pub struct Backend {
    pub endpoint: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl Backend {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, body: &str, delay: Duration) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            status,
            body: body.to_owned(),
            delay,
            received: Arc::clone(&received),
        };
        let app = Router::new()
            .route("/leads", post(accept_lead))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{addr}/leads"),
            received,
        }
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

async fn accept_lead(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state.received.lock().unwrap().push(Received { headers, body });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

/// An endpoint on a port nobody listens on.
pub async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/leads")
}

/// A strategy that counts calls and can be held mid-delivery.
#[derive(Default)]
pub struct ScriptedStrategy {
    pub calls: AtomicUsize,
    pub fail: bool,
    hold: bool,
    pub entered: Notify,
    pub release: Notify,
}

impl ScriptedStrategy {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Block inside `deliver` until `release` is notified.
    pub fn held() -> Self {
        Self {
            hold: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DeliveryStrategy for ScriptedStrategy {
    fn kind(&self) -> DeliveryKind {
        DeliveryKind::Http
    }

    async fn deliver(&self, _record: &LeadRecord) -> DeliveryOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hold {
            self.entered.notify_one();
            self.release.notified().await;
        }
        if self.fail {
            DeliveryOutcome {
                succeeded: false,
                detail: "scripted failure".to_owned(),
                kind: DeliveryKind::Http,
                mail: None,
            }
        } else {
            DeliveryOutcome::succeeded(DeliveryKind::Http, "scripted success")
        }
    }
}

/// The example lead from the landing page copy, typed into a fresh page.
pub fn ada_surface() -> MemorySurface {
    MemorySurface::new()
        .with_value(FieldId::Name, "Ada")
        .with_value(FieldId::Email, "ada@x.com")
        .with_value(FieldId::Usecase, "index search")
        .with_checked(FieldId::Consent, true)
}
