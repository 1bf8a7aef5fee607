//! Subscriber search service implementation

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

use vc_shared::config::ClientConfig;
use vc_shared::phone::{looks_like_phone_number, mask_phone_number};
use vc_shared::ResponseEnvelope;

use crate::domain::entities::UserRecord;
use crate::errors::{SearchError, SearchResult};

use super::request::{build_search_body, RequestBody};
use super::traits::{HttpTransport, SearchCallback};
use super::types::{PendingSearch, TransportResponse};

/// The in-flight request of a client
#[derive(Debug)]
pub(super) struct PendingCall {
    sequence: u64,
    abort: AbortHandle,
}

/// Pending-call slot shared between the client and its request tasks
#[derive(Debug, Default)]
pub(super) struct PendingSlot {
    /// Sequence number of the most recent invocation
    pub(super) latest: u64,
    /// Request still waiting for its response, if any
    call: Option<PendingCall>,
}

/// How a finished request relates to the client's current state
enum Completion {
    Current,
    Cancelled,
    Superseded,
}

/// Client for the backend's subscriber search endpoint.
///
/// Each client tracks at most one outstanding search. Starting a new search
/// aborts the previous one if it is still running, and a completion that
/// arrives for anything but the newest search is discarded, so callers only
/// ever observe the outcome of their latest request.
///
/// Searches run on the ambient tokio runtime; methods that submit work must
/// be called from within one.
pub struct SubscriberSearchService<T: HttpTransport> {
    /// Transport used to reach the backend
    transport: Arc<T>,
    /// Full URL of the search endpoint
    endpoint: String,
    /// Pending-call slot
    slot: Arc<Mutex<PendingSlot>>,
}

impl<T: HttpTransport + 'static> SubscriberSearchService<T> {
    /// Create a new search client
    ///
    /// # Arguments
    ///
    /// * `transport` - HTTP transport implementation
    /// * `config` - Endpoint configuration
    pub fn new(transport: Arc<T>, config: &ClientConfig) -> Self {
        Self::with_endpoint(transport, config.endpoint_url())
    }

    /// Create a search client for an explicit endpoint URL
    pub fn with_endpoint(transport: Arc<T>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            slot: Arc::new(Mutex::new(PendingSlot::default())),
        }
    }

    /// Full URL searches are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether a search is still waiting for its response
    pub fn has_pending(&self) -> bool {
        self.lock_slot().call.is_some()
    }

    /// Search for a subscriber by phone number.
    ///
    /// Cancels the previous search if it has not completed, builds the
    /// request, and submits it without waiting. The returned handle resolves
    /// exactly once:
    /// - `Ok(record)` when the backend answers with code 200
    /// - `Err(SearchError::Server { code, .. })` for any other code
    /// - `Err(SearchError::Transport(_))` when no response was obtained
    /// - `Err(SearchError::Superseded)` / `Err(SearchError::Cancelled)` when
    ///   a newer search or [`cancel`](Self::cancel) took over
    pub fn search(&self, phone_number: &str) -> PendingSearch {
        let (sender, receiver) = oneshot::channel();
        let masked = mask_phone_number(phone_number);

        // Held until the new call is installed; request tasks settle their
        // completion under the same lock.
        let mut slot = self.lock_slot();
        slot.latest += 1;
        let sequence = slot.latest;

        if let Some(previous) = slot.call.take() {
            warn!(
                previous = previous.sequence,
                sequence = sequence,
                "Cancelling unfinished subscriber search"
            );
            previous.abort.abort();
        }

        if !looks_like_phone_number(phone_number) {
            debug!(phone = %masked, "Phone number has an unusual format, forwarding as-is");
        }

        match build_search_body(phone_number) {
            Ok(body) => {
                let task = tokio::spawn(run_search(
                    Arc::clone(&self.transport),
                    self.endpoint.clone(),
                    body,
                    sequence,
                    Arc::clone(&self.slot),
                    sender,
                ));
                slot.call = Some(PendingCall {
                    sequence,
                    abort: task.abort_handle(),
                });
                debug!(sequence = sequence, phone = %masked, "Subscriber search submitted");
            }
            Err(e) => {
                error!(sequence = sequence, error = %e, "Failed to build subscriber search request");
                let _ = sender.send(Err(e));
            }
        }
        drop(slot);

        PendingSearch::new(sequence, receiver, Arc::clone(&self.slot))
    }

    /// Search for a subscriber and report the outcome through `callback`.
    ///
    /// Exactly one of `on_success` / `on_fail` is invoked for a search that
    /// runs to completion. Superseded or cancelled searches invoke nothing.
    /// Without a callback the outcome is dropped.
    ///
    /// Returns the invocation's sequence number.
    pub fn search_by_phone_number(
        &self,
        phone_number: &str,
        callback: Option<Arc<dyn SearchCallback>>,
    ) -> u64 {
        let pending = self.search(phone_number);
        let sequence = pending.sequence();
        tokio::spawn(deliver(pending, callback));
        sequence
    }

    /// Cancel the in-flight search, if any
    ///
    /// Returns whether a search was cancelled.
    pub fn cancel(&self) -> bool {
        let mut slot = self.lock_slot();
        match slot.call.take() {
            Some(call) => {
                info!(sequence = call.sequence, "Subscriber search cancelled");
                call.abort.abort();
                true
            }
            None => false,
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, PendingSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Request task: submit, decode, then report unless another search took over
async fn run_search<T: HttpTransport>(
    transport: Arc<T>,
    endpoint: String,
    body: RequestBody,
    sequence: u64,
    slot: Arc<Mutex<PendingSlot>>,
    sender: oneshot::Sender<SearchResult<UserRecord>>,
) {
    let outcome = execute(transport.as_ref(), &endpoint, body).await;

    let completion = {
        let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let installed = slot
            .call
            .as_ref()
            .is_some_and(|call| call.sequence == sequence);
        if installed {
            slot.call = None;
            Completion::Current
        } else if slot.latest == sequence {
            Completion::Cancelled
        } else {
            Completion::Superseded
        }
    };

    let outcome = match completion {
        Completion::Current => {
            log_outcome(sequence, &outcome);
            outcome
        }
        Completion::Cancelled => {
            debug!(sequence = sequence, "Discarding completion of cancelled subscriber search");
            Err(SearchError::Cancelled)
        }
        Completion::Superseded => {
            debug!(sequence = sequence, "Discarding completion of superseded subscriber search");
            Err(SearchError::Superseded)
        }
    };

    let _ = sender.send(outcome);
}

async fn execute<T: HttpTransport + ?Sized>(
    transport: &T,
    endpoint: &str,
    body: RequestBody,
) -> SearchResult<UserRecord> {
    let response = transport.post_json(endpoint, body).await?;
    decode_response(response)
}

/// Map a raw response onto the search outcome
fn decode_response(response: TransportResponse) -> SearchResult<UserRecord> {
    let envelope: ResponseEnvelope<UserRecord> = match serde_json::from_slice(&response.body) {
        Ok(envelope) => envelope,
        Err(_) if !response.is_success() => {
            return Err(SearchError::Server {
                code: i32::from(response.status),
                message: None,
            });
        }
        Err(e) => return Err(SearchError::Decode(e.to_string())),
    };

    if !envelope.is_ok() {
        return Err(SearchError::Server {
            code: envelope.code,
            message: envelope.msg,
        });
    }

    // The record is forwarded as sent, including an absent or null payload
    Ok(envelope
        .into_data()
        .unwrap_or_else(|| UserRecord::new(Value::Null)))
}

fn log_outcome(sequence: u64, outcome: &SearchResult<UserRecord>) {
    match outcome {
        Ok(_) => info!(sequence = sequence, "Subscriber found"),
        Err(e @ SearchError::Server { .. }) => {
            warn!(sequence = sequence, code = e.code(), "Subscriber search rejected by server")
        }
        Err(e @ SearchError::Transport(_)) => {
            error!(sequence = sequence, error = %e, "Subscriber search transport failure")
        }
        Err(e) => warn!(sequence = sequence, error = %e, "Subscriber search failed"),
    }
}

/// Forward a search outcome to an optional callback
async fn deliver(pending: PendingSearch, callback: Option<Arc<dyn SearchCallback>>) {
    let sequence = pending.sequence();
    let outcome = pending.await;

    let Some(callback) = callback else {
        return;
    };

    match outcome {
        Ok(record) => callback.on_success(record),
        Err(e) if e.is_abandoned() => {
            debug!(sequence = sequence, reason = %e, "Dropping outcome of abandoned subscriber search")
        }
        Err(e) => callback.on_fail(e.code()),
    }
}
