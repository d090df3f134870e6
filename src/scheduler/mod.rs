//! Polling loop / claim scheduler
//!
//! Owns the work set of room identifiers and drives repeated passes over it
//! until every requested room has yielded exactly one claimed ticket. Rooms
//! are visited strictly sequentially: there is never more than one in-flight
//! network operation, so claiming the same slot from two attempts at once is
//! impossible by construction. There is no pause between passes and no
//! attempt cap; the loop runs until satisfied or externally killed.

use tracing::{info, warn};

use crate::client::ReservationClient;
use crate::error::{ClaimError, Error, Result};
use crate::models::Ticket;
use crate::report::ConsoleReporter;
use crate::storage::TicketLog;

/// Sequential polling-and-claim scheduler
pub struct Scheduler {
    client: ReservationClient,
    reporter: ConsoleReporter,
    log: TicketLog,

    /// Rooms still waiting for a claim; mutated only between network calls
    pending: Vec<u32>,

    /// Progress counter, one tick per room visit, starting at 1
    iteration: u64,
}

impl Scheduler {
    /// Create a scheduler over a deduplicated work set
    ///
    /// Duplicate room ids collapse to one pending entry; first-occurrence
    /// order is preserved.
    pub fn new(
        client: ReservationClient,
        reporter: ConsoleReporter,
        log: TicketLog,
        rooms: &[u32],
    ) -> Self {
        let mut pending = Vec::new();
        for &room in rooms {
            if !pending.contains(&room) {
                pending.push(room);
            }
        }

        Self {
            client,
            reporter,
            log,
            pending,
            iteration: 1,
        }
    }

    /// Rooms still waiting for a claim
    pub fn pending(&self) -> &[u32] {
        &self.pending
    }

    /// Run passes over the pending set until it is empty
    ///
    /// Returns every claimed ticket, one per requested room.
    ///
    /// # Errors
    ///
    /// Transport failures propagate and abort the run; "no slot yet" and
    /// malformed claim responses do not.
    pub async fn run(mut self) -> Result<Vec<Ticket>> {
        let mut claimed = Vec::new();

        while !self.pending.is_empty() {
            let rooms = self.pending.clone();
            let mut satisfied = Vec::new();

            for room in rooms {
                self.reporter.iteration(self.iteration);
                if let Some(ticket) = self.visit(room).await? {
                    satisfied.push(room);
                    claimed.push(ticket);
                }
                self.iteration += 1;
            }

            self.pending.retain(|room| !satisfied.contains(room));
        }

        info!(total = claimed.len(), "all requested rooms claimed");
        Ok(claimed)
    }

    /// Visit one room once: list, claim the first candidate, log and report
    ///
    /// Returns `Ok(None)` when the room is not yet satisfied this pass.
    async fn visit(&mut self, room: u32) -> Result<Option<Ticket>> {
        self.reporter.polling(room);

        let candidates = self.client.list_slots(room).await?;
        let Some(first) = candidates.into_iter().next() else {
            self.reporter.no_slots(room);
            return Ok(None);
        };

        // First available wins; the rest of this listing is discarded.
        self.reporter.found();

        match self.client.claim_slot(room, &first).await {
            Ok(ticket) => {
                self.log.append(&ticket)?;
                self.reporter.claimed(&ticket);
                info!(room, slot_id = ?ticket.id, status = %ticket.status, "slot claimed");
                Ok(Some(ticket))
            }
            // A garbled confirmation page is indistinguishable from the slot
            // being snatched between list and claim: leave the room pending.
            Err(ClaimError::Malformed(e)) => {
                warn!(room, error = %e, "claim response malformed, room stays pending");
                Ok(None)
            }
            Err(ClaimError::Fetch(e)) => Err(Error::Fetch(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::report::ConsoleReporter;

    fn scheduler_for(rooms: &[u32]) -> (Scheduler, tempfile::TempDir) {
        let config = Config::default();
        let person = config.patient.to_person().unwrap();
        let client = ReservationClient::new(&config, person).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let log = TicketLog::new(&dir.path().join("tickets.log")).unwrap();
        (Scheduler::new(client, ConsoleReporter::new(), log, rooms), dir)
    }

    #[test]
    fn test_pending_set_is_deduplicated() {
        let (scheduler, _dir) = scheduler_for(&[101, 102, 101, 103, 102]);
        assert_eq!(scheduler.pending(), &[101, 102, 103]);
    }

    #[test]
    fn test_pending_keeps_first_occurrence_order() {
        let (scheduler, _dir) = scheduler_for(&[205, 101, 205]);
        assert_eq!(scheduler.pending(), &[205, 101]);
    }
}
