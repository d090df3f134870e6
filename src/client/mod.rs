//! Reservation client for the clinic portal
//!
//! Two network operations exist: listing a room's slots (with an extra
//! cookie-less fetch of the public room page for doctor info) and claiming
//! one specific slot. Every call opens its own HTTP session and closes it on
//! completion; nothing is shared or pooled between calls.

pub mod headers;

use encoding_rs::{UTF_8, WINDOWS_1251};
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::{Client, RequestBuilder, Response};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ClaimError, Error, ExtractError, FetchError, Result};
use crate::models::{DoctorInfo, Person, SlotCandidate, Ticket};
use crate::parser::{extract_doctor_info, extract_slots};

use headers::build_portal_headers;

static RESULT_BODY: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body.ticket-getting__result").expect("invalid result selector")
});

static ALERT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[role="alert"]"#).expect("invalid alert selector"));

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("invalid paragraph selector"));

/// Client for the portal's listing and claim endpoints
pub struct ReservationClient {
    /// Base service URL without trailing slash
    base_url: String,

    /// Operator-supplied session cookies, pre-rendered as one header value
    cookie: Option<HeaderValue>,

    /// Patient identity sent with every claim
    person: Person,

    /// Per-request timeout
    timeout: Duration,

    /// Bounded transport retry; 0 retries preserves fail-fast behaviour
    max_retries: u32,
    base_delay_ms: u64,
}

impl ReservationClient {
    /// Build a client from configuration and a validated patient identity
    ///
    /// # Errors
    ///
    /// Returns a config error when the cookie map cannot be rendered as an
    /// HTTP header value.
    pub fn new(config: &Config, person: Person) -> Result<Self> {
        let cookie = render_cookies(&config.http.cookies)
            .map_err(|e| Error::config(format!("invalid cookie value: {e}")))?;

        Ok(Self {
            base_url: config.service.base_url.trim_end_matches('/').to_string(),
            cookie,
            person,
            timeout: config.request_timeout(),
            max_retries: config.retry.max_retries,
            base_delay_ms: config.retry.base_delay_ms,
        })
    }

    /// List the currently bookable slots for a room
    ///
    /// One GET with cookies and fingerprint headers; when slots are present,
    /// one extra cookie-less GET of the same (publicly viewable) page
    /// resolves the doctor info that is attached to every candidate. An
    /// empty listing is the normal "fully booked" state.
    pub async fn list_slots(&self, room_id: u32) -> std::result::Result<Vec<SlotCandidate>, FetchError> {
        debug!(room_id, "fetching slot listing");
        let html = self.fetch_room_page(room_id, true).await?;

        let slots = extract_slots(&html);
        if slots.is_empty() {
            return Ok(Vec::new());
        }

        let doctor = self.doctor_info(room_id).await?;
        Ok(slots
            .into_iter()
            .map(|slot| SlotCandidate {
                slot,
                doctor: doctor.clone(),
            })
            .collect())
    }

    /// Fetch the room page anonymously and scrape the doctor header
    pub async fn doctor_info(&self, room_id: u32) -> std::result::Result<DoctorInfo, FetchError> {
        debug!(room_id, "fetching doctor info");
        let html = self.fetch_room_page(room_id, false).await?;
        Ok(extract_doctor_info(&html))
    }

    /// Claim one specific slot for the configured patient
    ///
    /// The slot's identifying attributes travel as query parameters and the
    /// patient's fields as the form body. The confirmation page's status and
    /// reason become the terminal [`Ticket`].
    ///
    /// # Errors
    ///
    /// [`ClaimError::Fetch`] on transport failure, [`ClaimError::Malformed`]
    /// when the confirmation page lacks the expected result structure.
    pub async fn claim_slot(
        &self,
        room_id: u32,
        candidate: &SlotCandidate,
    ) -> std::result::Result<Ticket, ClaimError> {
        let slot = &candidate.slot;
        info!(room_id, slot_id = %slot.id, date = %slot.date, "submitting claim");

        let url = format!("{}/ticketGet/views/DisplayTicket.php", self.base_url);
        let query = [
            ("TicketTime", slot.date.format("%H:%M").to_string()),
            ("TicketDate", slot.date.format("%Y-%m-%d").to_string()),
            ("TicketDepartment", slot.department.to_string()),
            ("TicketGraph", slot.graph.to_string()),
            ("TicketHash", slot.hash.clone()),
            ("TicketCabinet", slot.cabinet.to_string()),
            ("TicketID", slot.id.clone()),
            ("TicketDuration", slot.duration_minutes.to_string()),
        ];
        let form = [
            ("patient[family]", self.person.family().to_string()),
            ("patient[name]", self.person.name().to_string()),
            ("patient[secondname]", self.person.second_name().to_string()),
            ("patient[birthdayDate]", self.person.birthday_form()),
            ("patient[PhoneNumber]", self.person.phone_number().to_string()),
            ("Approve", "sendData".to_string()),
        ];

        let html = self
            .send_with_retry(|client| {
                let mut request = client
                    .post(&url)
                    .query(&query)
                    .form(&form)
                    .headers(build_portal_headers());
                if let Some(cookie) = &self.cookie {
                    request = request.header(COOKIE, cookie.clone());
                }
                request
            })
            .await?;

        let (status, reason) = extract_claim_result(&html)?;
        Ok(Ticket::from_claim(candidate, status, reason))
    }

    /// GET the room listing page, with or without the operator's session
    async fn fetch_room_page(
        &self,
        room_id: u32,
        authenticated: bool,
    ) -> std::result::Result<String, FetchError> {
        let url = format!("{}/ticketGet/", self.base_url);
        self.send_with_retry(|client| {
            let mut request = client.get(&url).query(&[("room_id", room_id)]);
            if authenticated {
                request = request.headers(build_portal_headers());
                if let Some(cookie) = &self.cookie {
                    request = request.header(COOKIE, cookie.clone());
                }
            }
            request
        })
        .await
    }

    /// Open a fresh session for one request
    fn session(&self) -> std::result::Result<Client, FetchError> {
        Client::builder()
            .timeout(self.timeout)
            .gzip(true)
            .build()
            .map_err(FetchError::Http)
    }

    /// Send a request with bounded retry and exponential backoff
    ///
    /// With `max_retries = 0` (the default) a failure propagates
    /// immediately; otherwise 429/5xx responses, timeouts and connection
    /// errors are retried up to the configured bound.
    async fn send_with_retry<F>(&self, build: F) -> std::result::Result<String, FetchError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.base_delay_ms * 2_u64.pow(attempt - 1);
                debug!(attempt, delay_ms = delay, "retrying request after delay");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let client = self.session()?;
            match build(&client).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return decode_response(response).await;
                    } else if Self::should_retry(status.as_u16()) {
                        warn!(status = status.as_u16(), attempt, "retryable server error");
                        last_error = Some(FetchError::ServerError(status.as_u16()));
                    } else {
                        return Err(FetchError::ServerError(status.as_u16()));
                    }
                }
                Err(e) if e.is_timeout() => {
                    warn!(attempt, "request timed out");
                    last_error = Some(FetchError::Timeout);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "request failed");
                    last_error = Some(FetchError::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or(FetchError::MaxRetriesExceeded))
    }

    /// Retry on 429 and transient 5xx, never on client errors
    fn should_retry(status: u16) -> bool {
        matches!(status, 429 | 500 | 502 | 503 | 504)
    }
}

/// Render the cookie map as a single `Cookie` header value
fn render_cookies(
    cookies: &BTreeMap<String, String>,
) -> std::result::Result<Option<HeaderValue>, reqwest::header::InvalidHeaderValue> {
    if cookies.is_empty() {
        return Ok(None);
    }
    let rendered = cookies
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ");
    HeaderValue::from_str(&rendered).map(Some)
}

/// Read status and reason out of a claim confirmation page
///
/// The contract is `body.ticket-getting__result` holding a `div[role=alert]`
/// whose first `<p>` is the status; the status paragraph's next sibling
/// element carries the reason.
pub fn extract_claim_result(html: &str) -> std::result::Result<(String, String), ExtractError> {
    let document = Html::parse_document(html);

    let body = document
        .select(&RESULT_BODY)
        .next()
        .ok_or(ExtractError::ResultBlockMissing)?;
    let alert = body.select(&ALERT).next().ok_or(ExtractError::AlertMissing)?;
    let status_el = alert
        .select(&PARAGRAPH)
        .next()
        .ok_or(ExtractError::StatusMissing)?;
    let reason_el = status_el
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .ok_or(ExtractError::ReasonMissing)?;

    Ok((element_text(status_el), element_text(reason_el)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Decode a response body, preferring UTF-8 with a windows-1251 fallback
async fn decode_response(response: Response) -> std::result::Result<String, FetchError> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let bytes = response.bytes().await?;
    decode_bytes(&bytes, &content_type)
}

/// Decode bytes to UTF-8 with charset detection
///
/// Honours an explicit charset in the Content-Type, then tries UTF-8 and
/// falls back to windows-1251 (the portal's legacy encoding).
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> std::result::Result<String, FetchError> {
    let content_type = content_type.to_lowercase();

    if content_type.contains("charset=windows-1251") {
        return decode_win1251(bytes);
    }
    if content_type.contains("charset=utf-8") {
        return decode_utf8(bytes);
    }

    if let Ok(text) = decode_utf8(bytes) {
        if !text.starts_with('\u{FFFD}') {
            return Ok(text);
        }
    }

    decode_win1251(bytes)
        .map_err(|_| FetchError::Decode("content is neither UTF-8 nor windows-1251".to_string()))
}

fn decode_utf8(bytes: &[u8]) -> std::result::Result<String, FetchError> {
    let (cow, _encoding, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        return Err(FetchError::Decode("UTF-8 decoding errors".to_string()));
    }
    Ok(cow.into_owned())
}

fn decode_win1251(bytes: &[u8]) -> std::result::Result<String, FetchError> {
    let (cow, _encoding, had_errors) = WINDOWS_1251.decode(bytes);
    if had_errors {
        return Err(FetchError::Decode("windows-1251 decoding errors".to_string()));
    }
    Ok(cow.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let text = "Талон оформлен";
        let decoded = decode_bytes(text.as_bytes(), "text/html; charset=utf-8").unwrap();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_decode_win1251_fallback() {
        // "Талон" in windows-1251
        let bytes: &[u8] = &[0xd2, 0xe0, 0xeb, 0xee, 0xed];
        let decoded = decode_bytes(bytes, "text/html").unwrap();
        assert_eq!(decoded, "Талон");
    }

    #[test]
    fn test_decode_win1251_explicit_charset() {
        let bytes: &[u8] = &[0xd2, 0xe0, 0xeb, 0xee, 0xed];
        let decoded = decode_bytes(bytes, "text/html; charset=windows-1251").unwrap();
        assert_eq!(decoded, "Талон");
    }

    #[test]
    fn test_should_retry() {
        assert!(ReservationClient::should_retry(429));
        assert!(ReservationClient::should_retry(500));
        assert!(ReservationClient::should_retry(503));

        assert!(!ReservationClient::should_retry(400));
        assert!(!ReservationClient::should_retry(403));
        assert!(!ReservationClient::should_retry(404));
        assert!(!ReservationClient::should_retry(200));
    }

    #[test]
    fn test_render_cookies() {
        let mut cookies = BTreeMap::new();
        assert!(render_cookies(&cookies).unwrap().is_none());

        cookies.insert("PHPSESSID".to_string(), "abc123".to_string());
        cookies.insert("lang".to_string(), "ru".to_string());
        let value = render_cookies(&cookies).unwrap().unwrap();
        assert_eq!(value.to_str().unwrap(), "PHPSESSID=abc123; lang=ru");
    }

    #[test]
    fn test_extract_claim_result() {
        let html = r#"<html><body class="ticket-getting__result">
            <div role="alert">
                <p>  Талон оформлен  </p>
                <span>Ожидайте приёма</span>
            </div>
        </body></html>"#;

        let (status, reason) = extract_claim_result(html).unwrap();
        assert_eq!(status, "Талон оформлен");
        assert_eq!(reason, "Ожидайте приёма");
    }

    #[test]
    fn test_extract_claim_result_missing_block() {
        let html = "<html><body><p>что-то пошло не так</p></body></html>";
        assert_eq!(
            extract_claim_result(html),
            Err(ExtractError::ResultBlockMissing)
        );
    }

    #[test]
    fn test_extract_claim_result_missing_reason() {
        let html = r#"<body class="ticket-getting__result">
            <div role="alert"><p>Статус</p></div>
        </body>"#;
        assert_eq!(extract_claim_result(html), Err(ExtractError::ReasonMissing));
    }

    #[test]
    fn test_extract_claim_result_missing_status() {
        let html = r#"<body class="ticket-getting__result">
            <div role="alert"><span>нет параграфа</span></div>
        </body>"#;
        assert_eq!(extract_claim_result(html), Err(ExtractError::StatusMissing));
    }
}
