//! The page capability the controller is written against.
//!
//! Only the operations the page logic needs: text, attributes, table rows and
//! show/hide by indicator class.

use crate::error::ViewError;

/// Elements of the page the controller touches, by their fixed ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    LastBroadcastLink,
    Acknowledgements,
    InterviewTable,
    PreviewTable,
    ArtistEmbed,
    PlaylistEmbed,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::LastBroadcastLink,
        Element::Acknowledgements,
        Element::InterviewTable,
        Element::PreviewTable,
        Element::ArtistEmbed,
        Element::PlaylistEmbed,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::LastBroadcastLink => "ultimoLink",
            Self::Acknowledgements => "agradecimientos",
            Self::InterviewTable => "tabla-entrevistades",
            Self::PreviewTable => "previewEntrevistades",
            Self::ArtistEmbed => "iframeNotas",
            Self::PlaylistEmbed => "iframeTris",
        }
    }
}

/// The two indicator groups toggled by the live banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Live,
    OffAir,
}

impl Indicator {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::OffAir => "live-off",
        }
    }
}

/// Where new content goes inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prepend,
    Append,
}

pub trait View {
    fn text(&self, element: Element) -> Result<String, ViewError>;

    fn insert_text(
        &mut self,
        element: Element,
        text: &str,
        placement: Placement,
    ) -> Result<(), ViewError>;

    fn attribute(&self, element: Element, name: &str) -> Result<Option<String>, ViewError>;

    fn set_attribute(&mut self, element: Element, name: &str, value: &str)
        -> Result<(), ViewError>;

    /// Insert a table row whose cells are rendered in the given order.
    fn insert_row(
        &mut self,
        table: Element,
        cells: &[&str],
        placement: Placement,
    ) -> Result<(), ViewError>;

    /// Show or hide every element carrying the indicator's class.
    fn set_visible(&mut self, indicator: Indicator, visible: bool);
}
