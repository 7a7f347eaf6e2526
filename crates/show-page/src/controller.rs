//! Page startup: link, interviewees, live banner, embeds.
//!
//! The interviewee fetch is the only asynchronous step. It is issued second
//! but only its rendering waits on it; the banner and embeds are applied
//! before the fetched records land in the tables. Every step is independent:
//! a failure is logged and the remaining steps still run.

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::acknowledgements::AcknowledgementList;
use crate::config::Config;
use crate::embeds::{activate_embeds, EmbedUrls};
use crate::interviewees::{render_interviewees, IntervieweeSource};
use crate::link::{listen_again_url, update_last_broadcast_link};
use crate::live::update_live_banner;
use crate::schedule::BroadcastSlot;
use crate::view::View;

/// What a startup run managed to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    pub listen_again_url: Option<String>,
    pub live: bool,
    pub interviewees: Option<usize>,
    pub embeds_loaded: bool,
}

/// Schedule snapshot for a given moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowStatus {
    pub live: bool,
    pub last_broadcast: NaiveDateTime,
    pub listen_again_url: String,
}

#[derive(Debug, Clone)]
pub struct PageController {
    slot: BroadcastSlot,
    listen_base: String,
    embeds: EmbedUrls,
    source: IntervieweeSource,
    client: reqwest::Client,
}

impl PageController {
    pub fn new(
        slot: BroadcastSlot,
        listen_base: impl Into<String>,
        embeds: EmbedUrls,
        source: IntervieweeSource,
        client: reqwest::Client,
    ) -> Self {
        Self {
            slot,
            listen_base: listen_base.into(),
            embeds,
            source,
            client,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.data.timeout_secs))
            .build()?;
        Ok(Self::new(
            config.show.slot()?,
            config.links.listen_base.clone(),
            config.embeds.clone(),
            IntervieweeSource::resolve(&config.data.source, &config.site.root),
            client,
        ))
    }

    pub fn slot(&self) -> &BroadcastSlot {
        &self.slot
    }

    pub fn source(&self) -> &IntervieweeSource {
        &self.source
    }

    pub fn status(&self, now: NaiveDateTime) -> ShowStatus {
        let last_broadcast = self.slot.last_broadcast(now);
        ShowStatus {
            live: self.slot.is_live(now),
            last_broadcast,
            listen_again_url: listen_again_url(&self.listen_base, last_broadcast, &self.slot),
        }
    }

    /// Run every startup step against `view` as of `now`.
    pub async fn start<V: View + ?Sized>(&self, view: &mut V, now: NaiveDateTime) -> StartupReport {
        let mut report = StartupReport::default();

        match update_last_broadcast_link(view, &self.listen_base, &self.slot, now) {
            Ok(url) => report.listen_again_url = Some(url),
            Err(e) => warn!("Failed to update last broadcast link: {}", e),
        }

        // Not polled until the synchronous steps are done.
        let pending = self.source.fetch(&self.client);

        report.live = update_live_banner(view, &self.slot, now);

        match activate_embeds(view, &self.embeds) {
            Ok(()) => report.embeds_loaded = true,
            Err(e) => warn!("Failed to activate embeds: {}", e),
        }

        match pending.await {
            Ok(records) => {
                let mut acknowledgements = AcknowledgementList::new();
                match render_interviewees(view, &records, &mut acknowledgements) {
                    Ok(()) => report.interviewees = Some(records.len()),
                    Err(e) => warn!("Failed to render interviewees: {}", e),
                }
            }
            Err(e) => warn!("Failed to load interviewees: {}", e),
        }

        info!(
            "Page started: live={} interviewees={:?} embeds={}",
            report.live, report.interviewees, report.embeds_loaded
        );
        report
    }
}
