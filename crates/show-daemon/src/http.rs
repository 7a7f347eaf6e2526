use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, response::Html, response::Json, routing::get, Router};
use chrono::Local;
use show_page::controller::ShowStatus;
use show_page::startup::{ReadyState, StartupGate};
use show_page::{PageController, PageDocument};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

#[derive(Clone)]
struct HttpState {
    controller: Arc<PageController>,
    title: Arc<str>,
}

pub fn router(controller: Arc<PageController>, title: &str, site_root: &Path) -> Router {
    let state = HttpState {
        controller,
        title: Arc::from(title),
    };

    Router::new()
        .route("/", get(index))
        .route("/api/status", get(status))
        .fallback_service(ServeDir::new(site_root))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn start_server(
    bind_address: String,
    port: u16,
    app: Router,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}", addr, e);
                return;
            }
        };

        info!("Show page listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    })
}

/// Builds a fresh document per request so no page state outlives it.
async fn index(State(state): State<HttpState>) -> Html<String> {
    let mut doc =
        PageDocument::new(state.title.to_string()).with_slot(*state.controller.slot());
    let gate = StartupGate::new();

    // Server-side rendering always hands the controller a complete document,
    // so startup runs right here and the deferred path never fires.
    if gate.on_script_loaded(ReadyState::Complete) {
        let report = state
            .controller
            .start(&mut doc, Local::now().naive_local())
            .await;
        debug!("Rendered page: {:?}", report);
    }

    Html(doc.render_html())
}

async fn status(State(state): State<HttpState>) -> Json<ShowStatus> {
    Json(state.controller.status(Local::now().naive_local()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use show_page::config::Config;
    use tower::ServiceExt;

    const DATA: &str = r#"[
        {"entrevistade": "Ana", "tema": "Software libre", "fecha": "5/4/2023"},
        {"entrevistade": "Beto", "tema": "Radios", "fecha": "12/4/2023"}
    ]"#;

    fn app(site_root: &Path) -> Router {
        app_with(site_root, Config::default())
    }

    fn app_with(site_root: &Path, mut config: Config) -> Router {
        config.site.root = site_root.to_path_buf();
        let controller = PageController::from_config(&config).unwrap();
        router(Arc::new(controller), "Programa <de> prueba", site_root)
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("datos")).unwrap();
        std::fs::write(dir.path().join("datos/entrevistas.json"), DATA).unwrap();
        dir
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_page() {
        let dir = site();
        let response = app(dir.path())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("<title>Programa &lt;de&gt; prueba</title>"));
        assert!(html.contains(r#"href="https://radiocut.fm/radiostation/uncocalf/listen/"#));
        assert!(html.contains("<td>Ana</td><td>Software libre</td><td>5/4/2023</td>"));
        assert!(html.contains(r#"<p id="agradecimientos">AnaBeto, </p>"#));
        assert!(html.contains(
            r#"src="https://open.audio/front/embed.html?type=playlist&amp;id=558""#
        ));
    }

    #[tokio::test]
    async fn test_index_names_configured_slot() {
        let dir = site();
        let mut config = Config::default();
        config.show.weekday = chrono::Weekday::Thu;
        config.show.start_hour = 20;
        config.show.end_hour = 21;
        let response = app_with(dir.path(), config)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains(">Jueves de 20 a 21 hs.</span>"));
        assert!(html.contains("/20/00/00/"));
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let dir = site();
        let response = app(dir.path())
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["live"].is_boolean());
        assert!(json["listen_again_url"]
            .as_str()
            .unwrap()
            .ends_with("/13/00/00/"));
    }

    #[tokio::test]
    async fn test_serves_data_file() {
        let dir = site();
        let response = app(dir.path())
            .oneshot(
                Request::builder()
                    .uri("/datos/entrevistas.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, DATA);
    }
}
