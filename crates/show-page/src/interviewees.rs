//! Interviewee list: fetch-and-parse, then render into the two tables.
//!
//! The data file is a JSON array of `{ "entrevistade", "tema", "fecha" }`
//! objects. Array order is display order; the last [`PREVIEW_COUNT`] entries
//! are the upcoming guests and everything before them has already aired.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::acknowledgements::AcknowledgementList;
use crate::error::{FetchError, ViewError};
use crate::view::{Element, Placement, View};

/// Number of trailing records shown in the preview table.
pub const PREVIEW_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervieweeRecord {
    #[serde(rename = "entrevistade")]
    pub name: String,
    #[serde(rename = "tema")]
    pub topic: String,
    /// Already formatted for display, never parsed.
    #[serde(rename = "fecha")]
    pub date: String,
}

impl IntervieweeRecord {
    /// Cells in column order: name, topic, date.
    pub fn cells(&self) -> [&str; 3] {
        [&self.name, &self.topic, &self.date]
    }
}

/// Where the interviewee list lives: an `http(s)://` URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervieweeSource {
    Url(String),
    File(PathBuf),
}

impl IntervieweeSource {
    /// Paths are site-relative, the way the page fetches them: a leading `/`
    /// still means the site root. Host paths must be spelled `file:///...`.
    pub fn resolve(source: &str, site_root: &Path) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            return Self::Url(source.to_string());
        }
        if let Some(host_path) = source.strip_prefix("file://") {
            return Self::File(PathBuf::from(host_path));
        }
        Self::File(site_root.join(source.trim_start_matches('/')))
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }

    pub async fn fetch(
        &self,
        client: &reqwest::Client,
    ) -> Result<Vec<IntervieweeRecord>, FetchError> {
        let body = match self {
            Self::Url(url) => fetch_url(client, url).await?,
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FetchError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
        };
        let records = parse_interviewees(&body)?;
        info!("Loaded {} interviewees from {}", records.len(), self.describe());
        Ok(records)
    }
}

async fn fetch_url(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let http_err = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(http_err)?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    response.text().await.map_err(http_err)
}

pub fn parse_interviewees(json: &str) -> Result<Vec<IntervieweeRecord>, FetchError> {
    Ok(serde_json::from_str(json)?)
}

/// `(main, preview)`: everything but the last [`PREVIEW_COUNT`] records, and
/// those last records. Both keep the original order; `main` is empty when
/// there are no more than [`PREVIEW_COUNT`] records.
pub fn split_for_preview(records: &[IntervieweeRecord]) -> (&[IntervieweeRecord], &[IntervieweeRecord]) {
    records.split_at(records.len().saturating_sub(PREVIEW_COUNT))
}

/// Fill both tables and the acknowledgements from `records`.
///
/// Aired interviews are prepended (newest first), previews appended in data
/// order. Every name goes through `acknowledgements`.
pub fn render_interviewees<V: View + ?Sized>(
    view: &mut V,
    records: &[IntervieweeRecord],
    acknowledgements: &mut AcknowledgementList,
) -> Result<(), ViewError> {
    let (main, preview) = split_for_preview(records);
    debug!(
        "Rendering {} aired and {} upcoming interviews",
        main.len(),
        preview.len()
    );

    for record in main {
        view.insert_row(Element::InterviewTable, &record.cells(), Placement::Prepend)?;
        acknowledgements.acknowledge(view, &record.name, Placement::Prepend)?;
    }
    for record in preview {
        view.insert_row(Element::PreviewTable, &record.cells(), Placement::Append)?;
        acknowledgements.acknowledge(view, &record.name, Placement::Append)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageDocument;

    fn records(n: usize) -> Vec<IntervieweeRecord> {
        (1..=n)
            .map(|i| IntervieweeRecord {
                name: format!("Persona {}", i),
                topic: format!("Tema {}", i),
                date: format!("{}/03/2023", i),
            })
            .collect()
    }

    fn names(rows: Vec<Vec<String>>) -> Vec<String> {
        rows.into_iter().map(|r| r[0].clone()).collect()
    }

    #[test]
    fn test_parse_field_names() {
        let json = r#"[
            {"entrevistade": "Ana", "tema": "Software libre", "fecha": "5 de abril"},
            {"entrevistade": "Beto", "tema": "Radios comunitarias", "fecha": "12 de abril", "extra": 1}
        ]"#;
        let parsed = parse_interviewees(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "Ana");
        assert_eq!(parsed[0].topic, "Software libre");
        assert_eq!(parsed[1].date, "12 de abril");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_interviewees(r#"{"entrevistade": "Ana"}"#),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_split() {
        let seven = records(7);
        let (main, preview) = split_for_preview(&seven);
        assert_eq!(main, &seven[..2]);
        assert_eq!(preview, &seven[2..]);

        let five = records(5);
        let (main, preview) = split_for_preview(&five);
        assert!(main.is_empty());
        assert_eq!(preview.len(), 5);

        let (main, preview) = split_for_preview(&[]);
        assert!(main.is_empty() && preview.is_empty());
    }

    #[test]
    fn test_render_seven_records() {
        let mut doc = PageDocument::new("Programa");
        let mut acks = AcknowledgementList::new();
        render_interviewees(&mut doc, &records(7), &mut acks).unwrap();

        let main = doc.rows(Element::InterviewTable).unwrap();
        assert_eq!(names(main.clone()), ["Persona 2", "Persona 1"]);
        assert_eq!(main[0], ["Persona 2", "Tema 2", "2/03/2023"]);
        assert_eq!(
            names(doc.rows(Element::PreviewTable).unwrap()),
            ["Persona 3", "Persona 4", "Persona 5", "Persona 6", "Persona 7"]
        );
        assert_eq!(acks.names().len(), 7);
        assert_eq!(
            doc.text(Element::Acknowledgements).unwrap(),
            "Persona 2, Persona 1Persona 3, Persona 4, Persona 5, Persona 6, Persona 7, "
        );
    }

    #[test]
    fn test_render_three_records_only_preview() {
        let mut doc = PageDocument::new("Programa");
        let mut acks = AcknowledgementList::new();
        render_interviewees(&mut doc, &records(3), &mut acks).unwrap();
        assert!(doc.rows(Element::InterviewTable).unwrap().is_empty());
        assert_eq!(
            names(doc.rows(Element::PreviewTable).unwrap()),
            ["Persona 1", "Persona 2", "Persona 3"]
        );
    }

    #[test]
    fn test_render_repeat_guest() {
        let mut list = records(6);
        list[5].name = "Persona 1".to_string();
        let mut doc = PageDocument::new("Programa");
        let mut acks = AcknowledgementList::new();
        render_interviewees(&mut doc, &list, &mut acks).unwrap();
        assert_eq!(acks.names().len(), 5);
        assert!(doc
            .text(Element::Acknowledgements)
            .unwrap()
            .ends_with("Persona 1 (¡por participar nuevamente!), "));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("datos")).unwrap();
        std::fs::write(
            dir.path().join("datos/entrevistas.json"),
            r#"[{"entrevistade": "Ana", "tema": "Radio", "fecha": "1/1"}]"#,
        )
        .unwrap();

        let source = IntervieweeSource::resolve("/datos/entrevistas.json", dir.path());
        assert_eq!(
            source,
            IntervieweeSource::File(dir.path().join("datos/entrevistas.json"))
        );
        let fetched = source.fetch(&reqwest::Client::new()).await.unwrap();
        assert_eq!(fetched[0].name, "Ana");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = IntervieweeSource::resolve("datos/entrevistas.json", dir.path());
        let err = source.fetch(&reqwest::Client::new()).await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn test_leading_slash_stays_under_site_root() {
        let dir = tempfile::tempdir().unwrap();
        let host_file = dir.path().join("entrevistas.json");
        std::fs::write(&host_file, "[]").unwrap();
        let site = Path::new("/srv/www");

        // An existing host path is still read as site-relative.
        let absolute = host_file.to_str().unwrap();
        assert_eq!(
            IntervieweeSource::resolve(absolute, site),
            IntervieweeSource::File(site.join(absolute.trim_start_matches('/')))
        );

        let explicit = format!("file://{}", absolute);
        assert_eq!(
            IntervieweeSource::resolve(&explicit, site),
            IntervieweeSource::File(host_file.clone())
        );
    }

    #[tokio::test]
    async fn test_fetch_from_url() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("datos")).unwrap();
        std::fs::write(
            dir.path().join("datos/entrevistas.json"),
            r#"[{"entrevistade": "Ana", "tema": "Radio", "fecha": "1/1"},
                {"entrevistade": "Beto", "tema": "Huertas", "fecha": "8/1"}]"#,
        )
        .unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new()
            .fallback_service(tower_http::services::ServeDir::new(dir.path()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::new();
        let source = IntervieweeSource::resolve(
            &format!("http://{}/datos/entrevistas.json", addr),
            Path::new("/unused"),
        );
        let fetched = source.fetch(&client).await.unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[1].name, "Beto");

        let missing = IntervieweeSource::Url(format!("http://{}/datos/nope.json", addr));
        match missing.fetch(&client).await {
            Err(FetchError::Status { url, status }) => {
                assert!(url.ends_with("/datos/nope.json"));
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            IntervieweeSource::resolve("https://example.test/e.json", Path::new("/srv")),
            IntervieweeSource::Url("https://example.test/e.json".to_string())
        );
    }
}
