//! Listen-again link for the most recent broadcast.

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::error::ViewError;
use crate::schedule::BroadcastSlot;
use crate::view::{Element, View};

pub const DEFAULT_LISTEN_BASE: &str = "https://radiocut.fm/radiostation/uncocalf/listen";

/// `<base>/<YYYY>/<MM>/<DD>/<HH>/00/00/` for the slot start on `date`'s day.
///
/// Month, day and hour are always two digits; the year is written as-is.
pub fn listen_again_url(base: &str, date: NaiveDateTime, slot: &BroadcastSlot) -> String {
    format!(
        "{}/{}/{:02}/{:02}/{:02}/00/00/",
        base.trim_end_matches('/'),
        date.year(),
        date.month(),
        date.day(),
        slot.start_hour()
    )
}

/// Point the last-broadcast link at the airing preceding `now`.
pub fn update_last_broadcast_link<V: View + ?Sized>(
    view: &mut V,
    base: &str,
    slot: &BroadcastSlot,
    now: NaiveDateTime,
) -> Result<String, ViewError> {
    let url = listen_again_url(base, slot.last_broadcast(now), slot);
    debug!("Last broadcast link: {}", url);
    view.set_attribute(Element::LastBroadcastLink, "href", &url)?;
    Ok(url)
}
