//! Network collaborators: location resolution and the prayer-time provider.
//!
//! The HTTP clients are gated behind the `async` feature. The fetch
//! sequencer is always available; it is how callers discard a stale
//! response that lands after a newer request was issued.

#[cfg(feature = "async")]
pub mod aladhan;
#[cfg(feature = "async")]
pub mod geo;

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues monotonically increasing tickets for outstanding fetches.
///
/// Only one fetch is logically outstanding at a time: starting a new one
/// supersedes the previous. The design does not cancel in-flight requests;
/// instead, a response is applied only when its ticket is still current.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: AtomicU64,
}

/// Ticket identifying one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchSequencer {
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Starts a new fetch, superseding any earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True iff no newer fetch has started since `ticket` was issued.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
