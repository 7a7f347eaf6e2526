//! Third-party players, loaded only once the rest of the page exists.

use serde::{Deserialize, Serialize};

use crate::error::ViewError;
use crate::view::{Element, View};

pub const ARTIST_EMBED_URL: &str = "https://open.audio/front/embed.html?type=artist&id=16403";
pub const PLAYLIST_EMBED_URL: &str = "https://open.audio/front/embed.html?type=playlist&id=558";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedUrls {
    #[serde(default = "default_artist_url")]
    pub artist_url: String,
    #[serde(default = "default_playlist_url")]
    pub playlist_url: String,
}

impl Default for EmbedUrls {
    fn default() -> Self {
        Self {
            artist_url: default_artist_url(),
            playlist_url: default_playlist_url(),
        }
    }
}

fn default_artist_url() -> String {
    ARTIST_EMBED_URL.to_string()
}

fn default_playlist_url() -> String {
    PLAYLIST_EMBED_URL.to_string()
}

pub fn activate_embeds<V: View + ?Sized>(view: &mut V, embeds: &EmbedUrls) -> Result<(), ViewError> {
    view.set_attribute(Element::ArtistEmbed, "src", &embeds.artist_url)?;
    view.set_attribute(Element::PlaylistEmbed, "src", &embeds.playlist_url)
}
