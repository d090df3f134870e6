// Core data structures for the talon bot

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use crate::error::ValidationError;

// One uppercase Cyrillic letter followed by lowercase ones. The ranges are
// deliberately А-Я/а-я (the portal's locale), not Unicode letter classes.
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[А-Я][а-я]+$").expect("invalid name pattern"));

/// Patient identity, loaded once from configuration
///
/// Fields are private: a `Person` can only be produced through [`Person::new`],
/// so every instance satisfies the name and birthday constraints for its whole
/// lifetime.
#[derive(Debug, Clone)]
pub struct Person {
    name: String,
    family: String,
    second_name: String,
    birthday_date: NaiveDate,
    phone_number: String,
}

impl Person {
    /// Validate the patient fields and construct an immutable identity
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidName`] when `name`, `family` or
    /// `second_name` is not one uppercase Cyrillic letter followed by one or
    /// more lowercase ones, and [`ValidationError::InvalidBirthday`] when
    /// `birthday_date` does not parse as `dd.mm.yyyy`.
    pub fn new(
        name: &str,
        family: &str,
        second_name: &str,
        birthday_date: &str,
        phone_number: &str,
    ) -> Result<Self, ValidationError> {
        let check = |field: &'static str, value: &str| {
            if NAME_REGEX.is_match(value) {
                Ok(())
            } else {
                Err(ValidationError::InvalidName { field })
            }
        };
        check("name", name)?;
        check("family", family)?;
        check("second name", second_name)?;

        let birthday_date = NaiveDate::parse_from_str(birthday_date, "%d.%m.%Y")
            .map_err(|_| ValidationError::InvalidBirthday(birthday_date.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            family: family.to_string(),
            second_name: second_name.to_string(),
            birthday_date,
            phone_number: phone_number.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn second_name(&self) -> &str {
        &self.second_name
    }

    pub fn birthday_date(&self) -> NaiveDate {
        self.birthday_date
    }

    /// Birthday rendered back to `dd.mm.yyyy`, the format the claim form expects
    pub fn birthday_form(&self) -> String {
        self.birthday_date.format("%d.%m.%Y").to_string()
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// Doctor and room metadata scraped from a room's header block
///
/// Extraction is best-effort text scraping: every field may be absent
/// independently, and nothing links them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoctorInfo {
    pub name: Option<String>,
    pub family: Option<String>,
    pub patronymic: Option<String>,
    pub speciality: Option<String>,
    pub cabinet: Option<u32>,
}

impl DoctorInfo {
    /// Full name as `Family Name Patronymic` when all three parts were found
    pub fn full_name(&self) -> Option<String> {
        match (&self.family, &self.name, &self.patronymic) {
            (Some(f), Some(n), Some(p)) => Some(format!("{f} {n} {p}")),
            _ => None,
        }
    }
}

/// A bookable slot as discovered on the listing page
///
/// Only a candidate: the remote system may reassign or expire it at any time,
/// so a later claim against it is allowed to fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSlot {
    /// Opaque slot identifier assigned by the portal
    pub id: String,

    /// Appointment date and time (listing date merged with HH:MM)
    pub date: NaiveDateTime,

    /// Department code
    pub department: u32,

    /// Appointment duration in minutes
    pub duration_minutes: u32,

    /// Opaque scheduling-graph identifier, passed through unmodified
    pub graph: u32,

    /// Opaque token required to claim this exact slot
    pub hash: String,

    /// Cabinet number
    pub cabinet: u32,
}

/// A discovered slot paired with the room's doctor metadata
#[derive(Debug, Clone, Serialize)]
pub struct SlotCandidate {
    pub slot: RawSlot,
    pub doctor: DoctorInfo,
}

/// Terminal record of one claim attempt
///
/// Carries the claimed slot's attributes, the resolved doctor info and the
/// status/reason strings read back from the confirmation page. Never mutated
/// after construction; its [`Display`](fmt::Display) text is what goes into
/// the ticket log.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub id: Option<String>,
    pub date: NaiveDateTime,
    pub department: u32,
    pub duration_minutes: u32,
    pub graph: u32,
    pub hash: String,
    pub cabinet: u32,
    pub doctor: DoctorInfo,
    pub status: String,
    pub reason: String,
}

impl Ticket {
    /// Build the terminal record from the claimed candidate and the
    /// confirmation page's status/reason pair
    pub fn from_claim(candidate: &SlotCandidate, status: String, reason: String) -> Self {
        let slot = &candidate.slot;
        Self {
            id: Some(slot.id.clone()),
            date: slot.date,
            department: slot.department,
            duration_minutes: slot.duration_minutes,
            graph: slot.graph,
            hash: slot.hash.clone(),
            cabinet: slot.cabinet,
            doctor: candidate.doctor.clone(),
            status,
            reason,
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = || String::from("—");
        writeln!(f, "Талон {}", self.id.as_deref().unwrap_or("—"))?;
        writeln!(f, "Дата: {}", self.date.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "Кабинет: {}", self.cabinet)?;
        writeln!(f, "Отделение: {}", self.department)?;
        writeln!(f, "Длительность: {} мин", self.duration_minutes)?;
        writeln!(f, "Врач: {}", self.doctor.full_name().unwrap_or_else(dash))?;
        writeln!(
            f,
            "Специальность: {}",
            self.doctor.speciality.clone().unwrap_or_else(dash)
        )?;
        writeln!(f, "Статус: {}", self.status)?;
        write!(f, "Причина: {}", self.reason)
    }
}
