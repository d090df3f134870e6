//! Doctor metadata extraction from the room header
//!
//! The header block (`header.page-head`) is free-form text, so this is
//! best-effort scraping: three independent patterns are run over the trimmed
//! text blob and each field is filled only when its pattern matches. The
//! character ranges are the portal locale's А-Я/а-я, kept exactly for
//! compatibility with the remote markup; occasional false positives (e.g. a
//! lone uppercase letter matching as "speciality") are a known limitation of
//! the source data, not of this extractor.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::models::DoctorInfo;

static PAGE_HEAD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("header.page-head").expect("invalid header selector"));

// Name triplet: Surname Name Patronymic, single spaces between tokens.
static DOCTOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<family>[А-Я][а-я]+)\s(?P<name>[А-Я][а-я]+)\s(?P<patronymic>[А-Я][а-я]+)")
        .expect("invalid doctor pattern")
});

// Specialities are rendered in capitals; take the first uppercase run.
static SPECIALITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[А-Я]+").expect("invalid speciality pattern"));

// First run of three digits anywhere in the text.
static CABINET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3}").expect("invalid cabinet pattern"));

/// Extract doctor, speciality and cabinet info from a room page
///
/// Never fails: a page without a header block, or a header matching none of
/// the patterns, yields a [`DoctorInfo`] with all fields `None`.
pub fn extract_doctor_info(html: &str) -> DoctorInfo {
    let document = Html::parse_document(html);

    let Some(header) = document.select(&PAGE_HEAD).next() else {
        return DoctorInfo::default();
    };

    let text = header.text().collect::<String>();
    doctor_info_from_text(text.trim())
}

/// Apply the three extraction patterns to an already-trimmed text blob
pub fn doctor_info_from_text(text: &str) -> DoctorInfo {
    let mut info = DoctorInfo::default();

    if let Some(caps) = DOCTOR_REGEX.captures(text) {
        info.family = caps.name("family").map(|m| m.as_str().to_string());
        info.name = caps.name("name").map(|m| m.as_str().to_string());
        info.patronymic = caps.name("patronymic").map(|m| m.as_str().to_string());
    }

    info.speciality = SPECIALITY_REGEX
        .find(text)
        .map(|m| m.as_str().to_string());

    info.cabinet = CABINET_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse().ok());

    info
}
