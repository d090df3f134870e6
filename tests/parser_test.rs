//! Parser integration tests over portal-shaped HTML fixtures

mod common;

use common::{empty_listing_page, listing_page, SlotFixture};
use talon::parser::{extract_doctor_info, extract_slots};

// ============================================================================
// Slot listing
// ============================================================================

#[test]
fn test_extract_slots_empty_page() {
    let slots = extract_slots(&empty_listing_page());
    assert!(slots.is_empty());
}

#[test]
fn test_extract_slots_no_html_at_all() {
    assert!(extract_slots("").is_empty());
    assert!(extract_slots("plain text, not html").is_empty());
}

#[test]
fn test_extract_slots_n_nodes_yield_n_records() {
    let html = listing_page(&[
        SlotFixture::new("901", "2023-05-01", "09:30", "h901"),
        SlotFixture::new("902", "2023-05-01", "09:45", "h902"),
        SlotFixture::new("903", "2023-05-02", "10:00", "h903"),
    ]);

    let slots = extract_slots(&html);
    assert_eq!(slots.len(), 3);

    assert_eq!(slots[0].id, "901");
    assert_eq!(
        slots[0].date.format("%Y-%m-%d %H:%M").to_string(),
        "2023-05-01 09:30"
    );
    assert_eq!(slots[0].hash, "h901");
    assert_eq!(slots[0].department, 1);
    assert_eq!(slots[0].duration_minutes, 15);
    assert_eq!(slots[0].graph, 77);
    assert_eq!(slots[0].cabinet, 214);

    assert_eq!(slots[2].id, "903");
    assert_eq!(
        slots[2].date.format("%Y-%m-%d %H:%M").to_string(),
        "2023-05-02 10:00"
    );
}

#[test]
fn test_extract_slots_preserves_document_order() {
    let html = listing_page(&[
        SlotFixture::new("912", "2023-05-01", "11:00", "a"),
        SlotFixture::new("905", "2023-05-01", "08:00", "b"),
    ]);

    let slots = extract_slots(&html);
    assert_eq!(slots[0].id, "912");
    assert_eq!(slots[1].id, "905");
}

// ============================================================================
// Doctor header
// ============================================================================

#[test]
fn test_extract_doctor_info_full_header() {
    let info = extract_doctor_info(&empty_listing_page());
    assert_eq!(info.family.as_deref(), Some("Иванов"));
    assert_eq!(info.name.as_deref(), Some("Петр"));
    assert_eq!(info.patronymic.as_deref(), Some("Сергеевич"));
    assert_eq!(info.speciality.as_deref(), Some("ТЕРАПЕВТ"));
    assert_eq!(info.cabinet, Some(214));
}

#[test]
fn test_extract_doctor_info_no_patterns() {
    let html = r#"<header class="page-head">Schedule for today</header>"#;
    let info = extract_doctor_info(html);
    assert_eq!(info.family, None);
    assert_eq!(info.name, None);
    assert_eq!(info.patronymic, None);
    assert_eq!(info.speciality, None);
    assert_eq!(info.cabinet, None);
}

#[test]
fn test_extract_doctor_info_cabinet_from_longer_number() {
    // The cabinet pattern takes the first three-digit run wherever it occurs
    let html = r#"<header class="page-head">Приём в 2023 году</header>"#;
    let info = extract_doctor_info(html);
    assert_eq!(info.cabinet, Some(202));
}

#[test]
fn test_extract_doctor_info_missing_header() {
    let html = "<html><body><div>no header here</div></body></html>";
    let info = extract_doctor_info(html);
    assert_eq!(info.family, None);
    assert_eq!(info.speciality, None);
    assert_eq!(info.cabinet, None);
}
