use thiserror::Error;

use crate::view::Element;

/// Failures while reading or writing the page.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("element #{} is missing from the page", .0.id())]
    MissingElement(Element),
}

/// Invalid broadcast slot parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("hour {0} is out of range (0-24)")]
    HourOutOfRange(u32),
    #[error("slot start hour {start} must be before end hour {end}")]
    EmptySlot { start: u32, end: u32 },
}

/// Failures loading the interviewee list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed interviewee data: {0}")]
    Parse(#[from] serde_json::Error),
}
