//! Types for search results

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::domain::entities::UserRecord;
use crate::errors::{SearchError, SearchResult};

use super::service::PendingSlot;

/// Raw HTTP response handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the HTTP status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Handle to a submitted search, resolving to its single outcome.
///
/// Dropping the handle does not cancel the request; use
/// [`SubscriberSearchService::cancel`](super::SubscriberSearchService::cancel).
#[derive(Debug)]
pub struct PendingSearch {
    sequence: u64,
    receiver: oneshot::Receiver<SearchResult<UserRecord>>,
    slot: Arc<Mutex<PendingSlot>>,
}

impl PendingSearch {
    pub(super) fn new(
        sequence: u64,
        receiver: oneshot::Receiver<SearchResult<UserRecord>>,
        slot: Arc<Mutex<PendingSlot>>,
    ) -> Self {
        Self {
            sequence,
            receiver,
            slot,
        }
    }

    /// Sequence number of this invocation on its client
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The request task was aborted before it reported back
    fn abandoned(&self) -> SearchError {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.latest == self.sequence {
            SearchError::Cancelled
        } else {
            SearchError::Superseded
        }
    }
}

impl Future for PendingSearch {
    type Output = SearchResult<UserRecord>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(self.abandoned())),
            Poll::Pending => Poll::Pending,
        }
    }
}
