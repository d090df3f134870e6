//! Shared HTML fixtures for integration tests
//!
//! The pages mirror the portal's markup shape: a `header.page-head` with the
//! doctor text, `div.TimeItem` nodes carrying the slot attribute bag, and a
//! confirmation page whose `body.ticket-getting__result` holds the alert
//! block.

/// One slot's listing attributes
pub struct SlotFixture {
    pub id: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub hash: &'static str,
}

impl SlotFixture {
    pub fn new(id: &'static str, date: &'static str, time: &'static str, hash: &'static str) -> Self {
        Self {
            id,
            date,
            time,
            hash,
        }
    }
}

/// Room page with a doctor header and the given slots
pub fn listing_page(slots: &[SlotFixture]) -> String {
    let items: String = slots
        .iter()
        .map(|s| {
            format!(
                r#"<div class="TimeItem" id="{id}" ticketdate="{date}" tickettime="{time}"
                    ticketdepartment="1" ticketduration="15" ticketgraph="77"
                    tickethash="{hash}" ticketcabinet="214">{time}</div>"#,
                id = s.id,
                date = s.date,
                time = s.time,
                hash = s.hash,
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Запись на приём</title></head>
<body>
<header class="page-head">ТЕРАПЕВТ Иванов Петр Сергеевич, кабинет 214</header>
<div class="ticket-list">{items}</div>
</body>
</html>"#
    )
}

/// Room page with a doctor header but no bookable slots
pub fn empty_listing_page() -> String {
    listing_page(&[])
}

/// Confirmation page in the shape the claim endpoint returns on completion
pub fn claim_result_page(status: &str, reason: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Талон</title></head>
<body class="ticket-getting__result">
<main>
  <div role="alert" class="alert">
    <p>{status}</p>
    <p>{reason}</p>
  </div>
</main>
</body>
</html>"#
    )
}

/// A page that violates the confirmation contract
pub fn malformed_claim_page() -> String {
    String::from("<!DOCTYPE html><html><body><p>что-то пошло не так</p></body></html>")
}
