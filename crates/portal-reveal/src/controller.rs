//! The reveal controller: fetch, display window, cancellation.

use crate::{RevealError, RevealMachine, RevealMachineInput, RevealResult, RevealState};
use portal_api::{ApiResult, Credential, CredentialRow, PortalBackend, RevealResponse};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The one backend call the controller needs. Blanket-implemented for every
/// [`PortalBackend`], so production wires the real client straight in while
/// tests supply a hand-rolled fake.
pub trait RevealBackend {
    /// Fetch the plaintext credential pair for a game.
    fn reveal(
        &self,
        credential: &Credential,
        game_id: &str,
    ) -> impl std::future::Future<Output = ApiResult<RevealResponse>>;
}

impl<B: PortalBackend> RevealBackend for B {
    async fn reveal(&self, credential: &Credential, game_id: &str) -> ApiResult<RevealResponse> {
        self.reveal_credential(credential, game_id).await
    }
}

/// A live reveal window. Exists only in memory and only while revealed.
#[derive(Clone)]
pub struct RevealSession {
    /// Game id the plaintext belongs to. Display is keyed to this, so a
    /// switch to another item can never show the old item's secret.
    pub target_id: String,
    pub username: String,
    pub password: String,
    /// Seconds left in the window; decremented by the countdown tick.
    pub remaining_seconds: u64,
}

impl std::fmt::Debug for RevealSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealSession")
            .field("target_id", &self.target_id)
            .field("username", &"<redacted>")
            .field("password", &"<redacted>")
            .field("remaining_seconds", &self.remaining_seconds)
            .finish()
    }
}

/// Outcome of a reveal request.
#[derive(Debug)]
pub enum RevealOutcome {
    /// The secret was fetched and is now displayed.
    Revealed(RevealSession),
    /// Another fetch was already in flight; this request was ignored.
    InFlight,
    /// The controller was hidden or closed while the fetch was pending; the
    /// response was discarded.
    Superseded,
}

struct Inner {
    fsm: RevealMachine,
    session: Option<RevealSession>,
    last_error: Option<String>,
    timer: Option<JoinHandle<()>>,
    /// Bumped on every hide/expiry/new-fetch; stale timers and late fetch
    /// continuations compare against it and stand down.
    generation: u64,
    closed: bool,
}

impl Inner {
    fn new() -> Self {
        Self {
            fsm: RevealMachine::new(),
            session: None,
            last_error: None,
            timer: None,
            generation: 0,
            closed: false,
        }
    }

    fn state(&self) -> RevealState {
        RevealState::from(self.fsm.state())
    }

    /// Hide from any state: cancel the timer, clear the plaintext, invalidate
    /// in-flight work.
    fn force_hidden(&mut self) {
        let _ = self.fsm.consume(&RevealMachineInput::Hide);
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
        self.session = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Countdown reached zero. Runs inside the timer task itself, so the
    /// handle is dropped rather than aborted.
    fn expire(&mut self) {
        let _ = self.fsm.consume(&RevealMachineInput::Expired);
        self.timer.take();
        self.session = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Per-screen controller for time-boxed credential disclosure.
///
/// At most one reveal session is live at any instant. Every hide path
/// (expiry, manual hide, target switch, close) cancels the pending timer
/// before the state changes hands, so two timers can never race to clear or
/// repopulate the display.
pub struct RevealController<B: RevealBackend> {
    backend: B,
    inner: Arc<Mutex<Inner>>,
}

impl<B: RevealBackend> RevealController<B> {
    /// Create a controller in the `Hidden` state.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            inner: Arc::new(Mutex::new(Inner::new())),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RevealState {
        self.inner.lock().unwrap().state()
    }

    /// The live reveal session, while one exists.
    pub fn session(&self) -> Option<RevealSession> {
        self.inner.lock().unwrap().session.clone()
    }

    /// Seconds left in the current window.
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.inner
            .lock()
            .unwrap()
            .session
            .as_ref()
            .map(|s| s.remaining_seconds)
    }

    /// Message from the most recent failed fetch.
    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().unwrap().last_error.clone()
    }

    /// Direct access to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Request disclosure of a credential row.
    ///
    /// No-op while a fetch is already in flight (rapid double-clicks produce
    /// one call). Requesting a different item while another is revealed hides
    /// the old one first, so exactly one session is ever live.
    pub async fn request(
        &self,
        row: &CredentialRow,
        credential: &Credential,
    ) -> RevealResult<RevealOutcome> {
        if !row.is_revealable() {
            return Err(RevealError::NotRevealable(row.game_user_id.clone()));
        }

        let generation = {
            let mut inner = self.inner.lock().unwrap();
            if inner.closed {
                return Ok(RevealOutcome::Superseded);
            }
            match inner.state() {
                RevealState::Fetching => {
                    debug!(target = %row.game_id, "Reveal already in flight, ignoring request");
                    return Ok(RevealOutcome::InFlight);
                }
                RevealState::Revealed => {
                    debug!(target = %row.game_id, "Switching reveal target, hiding previous");
                    inner.force_hidden();
                }
                RevealState::Hidden => {}
            }
            inner.last_error = None;
            let _ = inner.fsm.consume(&RevealMachineInput::Request);
            inner.generation
        };

        // Lock released across the network call.
        let result = self.backend.reveal(credential, &row.game_id).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.closed || inner.generation != generation {
            // A hide or close landed mid-flight; whatever owns the display
            // now is not ours to touch.
            debug!(target = %row.game_id, "Reveal response arrived after cancellation, discarding");
            return Ok(RevealOutcome::Superseded);
        }

        match result {
            Err(e) => {
                let _ = inner.fsm.consume(&RevealMachineInput::FetchFailed);
                warn!(target = %row.game_id, error = %e, "Reveal fetch failed");
                inner.last_error = Some(e.to_string());
                Err(e.into())
            }
            Ok(payload) => {
                let _ = inner.fsm.consume(&RevealMachineInput::FetchSucceeded);
                let session = RevealSession {
                    target_id: row.game_id.clone(),
                    username: payload.game_user_id,
                    password: payload.game_password,
                    remaining_seconds: payload.expires_in_seconds,
                };
                inner.session = Some(session.clone());
                inner.timer = Some(spawn_countdown(self.inner.clone(), generation));
                info!(
                    target = %row.game_id,
                    ttl_seconds = session.remaining_seconds,
                    "Credential revealed"
                );
                Ok(RevealOutcome::Revealed(session))
            }
        }
    }

    /// Hide early. Clears the plaintext and cancels the pending timer
    /// immediately; safe to call in any state.
    pub fn hide(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.session.is_some() {
            debug!("Reveal hidden early");
        }
        inner.force_hidden();
    }

    /// Tear down on unmount. After this every pending timer and in-flight
    /// fetch is inert; no state update can land.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        inner.force_hidden();
    }
}

impl<B: RevealBackend> Drop for RevealController<B> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.closed = true;
            inner.force_hidden();
        }
    }
}

/// One-second countdown tick for a specific session generation.
fn spawn_countdown(inner: Arc<Mutex<Inner>>, generation: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick of a tokio interval resolves immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let mut guard = inner.lock().unwrap();
            if guard.closed || guard.generation != generation {
                // Superseded while we slept; a newer session owns the display.
                return;
            }
            let done = match guard.session.as_mut() {
                Some(session) => {
                    session.remaining_seconds = session.remaining_seconds.saturating_sub(1);
                    session.remaining_seconds == 0
                }
                None => true,
            };
            if done {
                guard.expire();
                debug!("Reveal window elapsed, secret cleared");
                return;
            }
        }
    })
}
