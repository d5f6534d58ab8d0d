// src/services/search_controller.rs
//
// Online discovery state machine
//
// Owns the query text, the debounce timer and the catalog client, and
// collapses their interleavings into one explicit state:
//
//   Idle -> Debouncing -> Loading -> Results | Empty | Failed
//
// RULES:
// - Every keystroke restarts the debounce timer; an emptied query drops
//   straight back to Idle and cancels the in-flight request
// - The debounce firing (or an explicit submit) issues exactly one search
// - A superseded request's completion never mutates state
// - After teardown, nothing mutates state

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::events::{EventBus, SearchCompleted};
use crate::integrations::openlibrary::{CatalogRecord, CatalogSearch, SearchOutcome};

/// How long input must pause before a search fires
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(600);

/// Where the discovery screen currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No active query; suggestions are shown
    Idle,
    /// Keystroke received, waiting out the debounce delay
    Debouncing,
    /// Request in flight
    Loading,
    /// Search completed with records, in server order
    Results(Vec<CatalogRecord>),
    /// Search completed with zero records
    Empty,
    /// Search failed; message is user-displayable, retry via submit()
    Failed(String),
}

pub struct SearchController {
    client: Arc<dyn CatalogSearch>,
    event_bus: Arc<EventBus>,
    state: Mutex<SearchState>,
    query: Mutex<String>,
    /// Distinguishes "no results" from "never searched"
    has_searched: AtomicBool,
    torn_down: AtomicBool,
    /// Monotonic id of the newest issued search; older completions lose
    search_seq: AtomicU64,
    debounce_task: Mutex<Option<JoinHandle<()>>>,
}

impl SearchController {
    pub fn new(client: Arc<dyn CatalogSearch>, event_bus: Arc<EventBus>) -> Self {
        Self {
            client,
            event_bus,
            state: Mutex::new(SearchState::Idle),
            query: Mutex::new(String::new()),
            has_searched: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
            search_seq: AtomicU64::new(0),
            debounce_task: Mutex::new(None),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> SearchState {
        self.state.lock().unwrap().clone()
    }

    pub fn query(&self) -> String {
        self.query.lock().unwrap().clone()
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched.load(Ordering::SeqCst)
    }

    /// Record a keystroke.
    ///
    /// Restarts the debounce timer. An emptied query transitions straight
    /// to Idle and cancels any in-flight request without waiting.
    pub fn set_query(self: &Arc<Self>, query: &str) {
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }

        *self.query.lock().unwrap() = query.to_string();

        if query.trim().is_empty() {
            self.reset_to_idle();
            return;
        }

        self.set_state(SearchState::Debouncing);
        self.restart_debounce();
    }

    /// Explicit search trigger: skips the pending debounce entirely
    pub async fn submit(&self) {
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }
        self.cancel_debounce();
        self.run_search().await;
    }

    /// Clear the query and discard the current result set
    pub fn clear(self: &Arc<Self>) {
        self.query.lock().unwrap().clear();
        self.reset_to_idle();
    }

    /// Release the debounce timer and any in-flight request.
    ///
    /// After this returns no state mutation will occur, even if a spawned
    /// callback is still unwinding.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
        self.cancel_debounce();
        self.client.cancel();
    }

    fn reset_to_idle(self: &Arc<Self>) {
        self.cancel_debounce();
        self.client.cancel();
        self.has_searched.store(false, Ordering::SeqCst);
        self.set_state(SearchState::Idle);
    }

    fn restart_debounce(self: &Arc<Self>) {
        let mut slot = self.debounce_task.lock().unwrap();
        if let Some(task) = slot.take() {
            task.abort();
        }

        let controller = Arc::clone(self);
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_DELAY).await;
            controller.run_search().await;
        }));
    }

    fn cancel_debounce(&self) {
        if let Some(task) = self.debounce_task.lock().unwrap().take() {
            task.abort();
        }
    }

    fn set_state(&self, next: SearchState) {
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }
        *self.state.lock().unwrap() = next;
    }

    async fn run_search(&self) {
        if self.torn_down.load(Ordering::SeqCst) {
            return;
        }

        let query = self.query.lock().unwrap().clone();
        if query.trim().is_empty() {
            return;
        }

        let my_seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;

        self.has_searched.store(true, Ordering::SeqCst);
        self.set_state(SearchState::Loading);

        let result = self.client.search(&query).await;

        // A request that finished before it was superseded must still lose
        // to the newer one
        if self.torn_down.load(Ordering::SeqCst)
            || self.search_seq.load(Ordering::SeqCst) != my_seq
        {
            return;
        }

        match result {
            Ok(SearchOutcome::Cancelled) => {
                // Superseded; whoever cancelled us owns the state now
            }
            Ok(SearchOutcome::Complete(response)) => {
                let count = response.docs.len();
                if count == 0 {
                    self.set_state(SearchState::Empty);
                } else {
                    self.set_state(SearchState::Results(response.docs));
                }
                self.event_bus.emit(SearchCompleted::new(query, count, false));
            }
            Err(err) => {
                self.set_state(SearchState::Failed(user_message(&err)));
                self.event_bus.emit(SearchCompleted::new(query, 0, true));
            }
        }
    }
}

/// Collapse catalog errors into a single user-displayable message
fn user_message(err: &AppError) -> String {
    match err {
        AppError::Network(_) => "Network error occurred".to_string(),
        AppError::Server(_) => "Server returned error".to_string(),
        AppError::Decode(_) => "Failed to parse results".to_string(),
        other => other.to_string(),
    }
}
