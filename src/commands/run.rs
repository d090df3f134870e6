//! The `run` command: poll every configured room until each yields a ticket

use anyhow::{Context, Result};

use crate::client::ReservationClient;
use crate::config::Config;
use crate::report::ConsoleReporter;
use crate::scheduler::Scheduler;
use crate::storage::TicketLog;

pub async fn run(config: Config) -> Result<()> {
    let person = config
        .patient
        .to_person()
        .context("Invalid patient identity in config")?;

    let client = ReservationClient::new(&config, person)?;
    let log = TicketLog::new(&config.log.ticket_file)
        .with_context(|| format!("Failed to open ticket log: {}", config.log.ticket_file.display()))?;

    println!("Polling {} room(s): {:?}", config.service.rooms.len(), config.service.rooms);
    println!("Ticket log: {}", config.log.ticket_file.display());
    println!();

    let scheduler = Scheduler::new(client, ConsoleReporter::new(), log, &config.service.rooms);
    let tickets = scheduler.run().await?;

    println!("\nClaim Summary");
    println!("=============");
    println!("Tickets claimed: {}", tickets.len());
    for ticket in &tickets {
        println!(
            "  {} — кабинет {}, {}",
            ticket.date.format("%Y-%m-%d %H:%M"),
            ticket.cabinet,
            ticket.status
        );
    }

    Ok(())
}
