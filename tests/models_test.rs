//! Person validation and record model tests

use chrono::{Datelike, NaiveDate};
use talon::error::ValidationError;
use talon::{DoctorInfo, Person, RawSlot, SlotCandidate, Ticket};

#[test]
fn test_person_valid_dates_round_trip() {
    let cases = [
        ("09.09.1999", (1999, 9, 9)),
        ("01.01.2000", (2000, 1, 1)),
        ("29.02.2020", (2020, 2, 29)),
        ("31.12.1970", (1970, 12, 31)),
    ];

    for (input, (y, m, d)) in cases {
        let person = Person::new("Петр", "Иванов", "Сергеевич", input, "+375").unwrap();
        let date = person.birthday_date();
        assert_eq!((date.year(), date.month(), date.day()), (y, m, d));
        assert_eq!(person.birthday_form(), input);
    }
}

#[test]
fn test_person_invalid_dates_rejected() {
    for bad in ["31/12/1999", "2020-01-01", "29.02.2021", "9 сентября", ""] {
        let result = Person::new("Петр", "Иванов", "Сергеевич", bad, "+375");
        assert!(
            matches!(result, Err(ValidationError::InvalidBirthday(_))),
            "{bad:?} should fail"
        );
    }
}

#[test]
fn test_person_name_pattern() {
    // Matching inputs are stored verbatim
    let person = Person::new("Гарик", "Иванов", "Газаросович", "01.01.1990", "x").unwrap();
    assert_eq!(person.name(), "Гарик");
    assert_eq!(person.family(), "Иванов");
    assert_eq!(person.second_name(), "Газаросович");

    // One uppercase Cyrillic letter + one or more lowercase ones, nothing
    // else. The а-я range excludes ё, so "Пётр" is rejected too.
    for bad in ["иванов", "ИВАНОВ", "И", "Ivanov", "Иванов Петров", " Иванов", "Пётр"] {
        assert!(
            Person::new("Петр", bad, "Сергеевич", "01.01.1990", "x").is_err(),
            "{bad:?} should fail as family"
        );
    }
}

#[test]
fn test_phone_number_is_opaque() {
    let person = Person::new("Петр", "Иванов", "Сергеевич", "01.01.1990", "whatever ##")
        .unwrap();
    assert_eq!(person.phone_number(), "whatever ##");
}

#[test]
fn test_ticket_carries_slot_and_doctor() {
    let candidate = SlotCandidate {
        slot: RawSlot {
            id: "901".into(),
            date: NaiveDate::from_ymd_opt(2023, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            department: 4,
            duration_minutes: 20,
            graph: 55,
            hash: "h901".into(),
            cabinet: 318,
        },
        doctor: DoctorInfo {
            family: Some("Иванов".into()),
            name: Some("Петр".into()),
            patronymic: Some("Сергеевич".into()),
            speciality: Some("ХИРУРГ".into()),
            cabinet: Some(318),
        },
    };

    let ticket = Ticket::from_claim(&candidate, "Оформлен".into(), "Ожидайте".into());
    assert_eq!(ticket.id.as_deref(), Some("901"));
    assert_eq!(ticket.department, 4);
    assert_eq!(ticket.duration_minutes, 20);
    assert_eq!(ticket.graph, 55);
    assert_eq!(ticket.hash, "h901");
    assert_eq!(ticket.cabinet, 318);
    assert_eq!(ticket.doctor.speciality.as_deref(), Some("ХИРУРГ"));
    assert_eq!(ticket.status, "Оформлен");
    assert_eq!(ticket.reason, "Ожидайте");
}
