//! talon - clinic appointment slot booking bot
//!
//! Polls a clinic portal's room-availability pages, scrapes slot metadata out
//! of server-rendered HTML and submits a reservation form for a
//! pre-configured patient, retrying each room until it yields one claimed
//! ticket.
//!
//! # Architecture
//!
//! - [`config`] - TOML configuration loaded once at startup
//! - [`models`] - Person, DoctorInfo, RawSlot and Ticket records
//! - [`parser`] - HTML extraction for slot listings and room headers
//! - [`client`] - the two portal operations: list slots, claim a slot
//! - [`scheduler`] - the polling-and-claim loop over the pending room set
//! - [`report`] - console status output
//! - [`storage`] - append-only ticket log
//!
//! # Example
//!
//! ```no_run
//! use talon::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_file(std::path::Path::new("config.toml"))?;
//!     config.validate()?;
//!     let person = config.patient.to_person()?;
//!     let client = ReservationClient::new(&config, person)?;
//!     let log = TicketLog::new(&config.log.ticket_file)?;
//!     let scheduler = Scheduler::new(client, ConsoleReporter::new(), log, &config.service.rooms);
//!     let tickets = scheduler.run().await?;
//!     println!("claimed {} tickets", tickets.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod scheduler;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::ReservationClient;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::{DoctorInfo, Person, RawSlot, SlotCandidate, Ticket};
    pub use crate::report::ConsoleReporter;
    pub use crate::scheduler::Scheduler;
    pub use crate::storage::TicketLog;
}

// Direct re-exports for convenience
pub use models::{DoctorInfo, Person, RawSlot, SlotCandidate, Ticket};
