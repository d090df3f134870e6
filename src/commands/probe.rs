//! The `probe` command: one read-only pass over the rooms, no claims
//!
//! Useful for checking cookies and room ids before letting the bot loose.

use anyhow::{Context, Result};

use crate::client::ReservationClient;
use crate::config::Config;

pub async fn probe(config: Config) -> Result<()> {
    let person = config
        .patient
        .to_person()
        .context("Invalid patient identity in config")?;
    let client = ReservationClient::new(&config, person)?;

    println!("Probing {} room(s)", config.service.rooms.len());
    println!("====================");

    for &room in &config.service.rooms {
        let candidates = client
            .list_slots(room)
            .await
            .with_context(|| format!("Failed to list slots for room {room}"))?;

        if candidates.is_empty() {
            println!("room {room}: талонов нет");
            continue;
        }

        let doctor = &candidates[0].doctor;
        println!(
            "room {room}: {} слот(ов), врач: {}, специальность: {}",
            candidates.len(),
            doctor.full_name().unwrap_or_else(|| String::from("—")),
            doctor.speciality.as_deref().unwrap_or("—"),
        );
        for candidate in &candidates {
            println!(
                "  {} — кабинет {}",
                candidate.slot.date.format("%Y-%m-%d %H:%M"),
                candidate.slot.cabinet
            );
        }
    }

    Ok(())
}
