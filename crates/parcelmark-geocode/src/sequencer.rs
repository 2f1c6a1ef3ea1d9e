//! Stale-response guard for location search.
//!
//! Each outgoing search takes a ticket. When its response arrives, it is
//! applied only if no newer ticket has been issued in the meantime.

use serde::Serialize;

/// Sequence number of one issued search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: u64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket(self.latest)
    }

    pub fn is_latest(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }
}
