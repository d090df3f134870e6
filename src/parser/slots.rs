//! Slot extraction from the room listing page
//!
//! Every bookable slot is rendered as a `div.TimeItem` node whose attribute
//! bag carries the slot's identifying fields. An empty page (no such nodes)
//! is the normal "fully booked" state, not a failure.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::warn;

use crate::models::RawSlot;

static TIME_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.TimeItem").expect("invalid slot selector"));

/// Extract every well-formed slot from a listing page
///
/// Returns an empty vector when no slot nodes are present. A node with a
/// missing or unparseable attribute invalidates only that slot: it is skipped
/// with a warning, never fabricated.
pub fn extract_slots(html: &str) -> Vec<RawSlot> {
    let document = Html::parse_document(html);

    let mut slots = Vec::new();
    for element in document.select(&TIME_ITEM) {
        match read_slot(element) {
            Ok(slot) => slots.push(slot),
            Err(detail) => warn!(%detail, "skipping malformed slot node"),
        }
    }
    slots
}

/// Read one `div.TimeItem` attribute bag into a [`RawSlot`]
fn read_slot(element: ElementRef<'_>) -> Result<RawSlot, String> {
    let attr = |name: &str| {
        element
            .value()
            .attr(name)
            .ok_or_else(|| format!("missing attribute {name:?}"))
    };

    let date_part = attr("ticketdate")?;
    let time_part = attr("tickettime")?;
    let date = NaiveDateTime::parse_from_str(
        &format!("{date_part} {time_part}"),
        "%Y-%m-%d %H:%M",
    )
    .map_err(|e| format!("bad date/time {date_part:?} {time_part:?}: {e}"))?;

    let int = |name: &str| {
        attr(name).and_then(|v| {
            v.parse::<u32>()
                .map_err(|e| format!("bad integer in {name:?} ({v:?}): {e}"))
        })
    };

    Ok(RawSlot {
        id: attr("id")?.to_string(),
        date,
        department: int("ticketdepartment")?,
        duration_minutes: int("ticketduration")?,
        graph: int("ticketgraph")?,
        hash: attr("tickethash")?.to_string(),
        cabinet: int("ticketcabinet")?,
    })
}
