use chrono::NaiveDateTime;

use crate::schedule::BroadcastSlot;
use crate::view::{Indicator, View};

/// Show the live indicators and hide the off-air ones while the show is on,
/// and the reverse otherwise. Returns whether the show is live.
pub fn update_live_banner<V: View + ?Sized>(
    view: &mut V,
    slot: &BroadcastSlot,
    now: NaiveDateTime,
) -> bool {
    let live = slot.is_live(now);
    view.set_visible(Indicator::Live, live);
    view.set_visible(Indicator::OffAir, !live);
    live
}
