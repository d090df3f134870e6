//! HTML parsing and data extraction
//!
//! This module turns the portal's server-rendered pages into structured
//! records: the slot listing into [`RawSlot`](crate::models::RawSlot)s and
//! the room header into [`DoctorInfo`](crate::models::DoctorInfo).

pub mod doctor;
pub mod slots;

pub use doctor::extract_doctor_info;
pub use slots::extract_slots;
