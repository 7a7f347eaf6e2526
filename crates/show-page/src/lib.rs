//! Page controller for the show's website.
//!
//! The page logic talks to the page only through [`view::View`], so the same
//! controller drives the in-memory [`document::PageDocument`] the daemon
//! renders and the fakes used in tests.

pub mod acknowledgements;
pub mod config;
pub mod controller;
pub mod document;
pub mod embeds;
pub mod error;
pub mod interviewees;
pub mod link;
pub mod live;
pub mod platform;
pub mod schedule;
pub mod startup;
pub mod view;

pub use controller::PageController;
pub use document::PageDocument;
pub use schedule::BroadcastSlot;
pub use view::View;
