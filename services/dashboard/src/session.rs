//! Per-browser session state.
//!
//! A session owns its current screen, the dataset it loaded on entering the
//! results screen, and the last image it uploaded. Sessions are keyed by a
//! v4 UUID carried in the `crop_session` cookie.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Duration, Utc};
use recommender::{Dataset, FilterOptions};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::upload::UploadedImage;

pub const SESSION_COOKIE: &str = "crop_session";

/// Which page a session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Home,
    Results,
}

/// Navigation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The "Go" button on the home screen.
    Go,
    /// Return to the introduction.
    Home,
}

impl Screen {
    /// Next screen after `action`. Actions that do not apply leave the
    /// screen unchanged.
    pub fn apply(self, action: Action) -> Screen {
        match (self, action) {
            (Screen::Home, Action::Go) => Screen::Results,
            (Screen::Results, Action::Home) => Screen::Home,
            (screen, _) => screen,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Results => "results",
        }
    }
}

/// The dataset a session loaded, with its option lists.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub dataset: Arc<Dataset>,
    pub options: Arc<FilterOptions>,
}

impl SessionData {
    pub fn new(dataset: Dataset) -> Self {
        let options = FilterOptions::from_dataset(&dataset);
        Self {
            dataset: Arc::new(dataset),
            options: Arc::new(options),
        }
    }
}

/// State of one session.
#[derive(Debug, Clone)]
pub struct Session {
    pub screen: Screen,
    pub data: Option<SessionData>,
    pub upload: Option<UploadedImage>,
    /// Message about the last rejected upload, shown once.
    pub upload_notice: Option<String>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new() -> Self {
        Self {
            screen: Screen::Home,
            data: None,
            upload: None,
            upload_notice: None,
            last_seen: Utc::now(),
        }
    }
}

/// All live sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Resolve the session named by the request cookie, creating one when
    /// the cookie is absent or unknown. Returns the id and whether it is new.
    pub async fn resolve(&self, headers: &HeaderMap) -> (Uuid, bool) {
        if let Some(id) = session_id_from_headers(headers) {
            let mut sessions = self.sessions.write().await;
            if let Some(session) = sessions.get_mut(&id) {
                session.last_seen = Utc::now();
                return (id, false);
            }
        }

        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        self.prune(&mut sessions);
        sessions.insert(id, Session::new());
        tracing::debug!(session = %id, "Created session");
        (id, true)
    }

    /// Snapshot of a session.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Apply a navigation action and return the resulting screen.
    pub async fn navigate(&self, id: Uuid, action: Action) -> Screen {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id).or_insert_with(Session::new);
        let from = session.screen;
        session.screen = from.apply(action);
        tracing::debug!(
            session = %id,
            from = from.as_str(),
            to = session.screen.as_str(),
            "Navigated"
        );
        session.screen
    }

    /// Mutate a session in place.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> T
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id).or_insert_with(Session::new);
        f(session)
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, Session>) {
        let cutoff = Utc::now() - self.ttl;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_seen >= cutoff);
        let dropped = before - sessions.len();
        if dropped > 0 {
            tracing::info!(dropped, "Pruned idle sessions");
        }
    }
}

/// Session id from the `Cookie` header, if well formed.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session id.
pub fn session_cookie(id: Uuid) -> HeaderValue {
    // uuid text is always a valid header value
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, id
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}
