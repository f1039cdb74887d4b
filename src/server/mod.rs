//! HTTP server exposing the exports

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::Collection;
use crate::export::{markdown, sitemap, urllist, Export, PLAIN_TEXT, PNG};
use crate::og::{self, ImageRequest, OgQuery};
use crate::Garden;

/// Server state, built once and never mutated
pub struct AppState {
    pub config: SiteConfig,
    pub collection: Collection,
    pub public_dir: PathBuf,
}

/// Load the garden and serve it until the process is stopped
pub async fn start(garden: &Garden, ip: &str, port: u16) -> Result<()> {
    let collection = garden.load()?;
    tracing::info!(
        "Serving {} published entries",
        collection.published_slugs().len()
    );

    let state = Arc::new(AppState {
        config: garden.config.clone(),
        collection,
        public_dir: garden.public_dir.clone(),
    });
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router: the four export endpoints, then static files
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/api/og.png", get(og_handler))
        .route("/api/:file", get(markdown_handler))
        .route("/sitemap.md", get(sitemap_handler))
        .route("/sitemap.txt", get(urllist_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/{slug}.md
async fn markdown_handler(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Response {
    match file.strip_suffix(".md") {
        Some(slug) => markdown::render(&state.collection, &state.config, slug).into_response(),
        None => markdown::not_found(&file).into_response(),
    }
}

/// GET /sitemap.md
async fn sitemap_handler(State(state): State<Arc<AppState>>) -> Response {
    sitemap::render(&state.collection, &state.config).into_response()
}

/// GET /sitemap.txt
async fn urllist_handler(State(state): State<Arc<AppState>>) -> Response {
    urllist::render(&state.collection, &state.config).into_response()
}

/// GET /api/og.png?title=&stage=&description=
async fn og_handler(State(state): State<Arc<AppState>>, Query(query): Query<OgQuery>) -> Response {
    let request = ImageRequest::from_query(query, &state.config.title);
    let watermark = state.config.watermark.clone();

    let rendered = tokio::task::spawn_blocking(move || og::render(&request, &watermark)).await;
    match rendered {
        Ok(Ok(bytes)) => Export::ok(PNG, None, bytes).into_response(),
        Ok(Err(e)) => {
            tracing::error!("Preview render failed: {}", e);
            internal_error().into_response()
        }
        Err(e) => {
            tracing::error!("Preview render task failed: {}", e);
            internal_error().into_response()
        }
    }
}

/// Opaque 500. Details go to the log, never to the client.
fn internal_error() -> Export {
    Export {
        status: 500,
        content_type: PLAIN_TEXT,
        cache_control: None,
        headers: Vec::new(),
        body: b"Internal Server Error".to_vec(),
    }
}

impl IntoResponse for Export {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );
        if let Some(cache_control) = self.cache_control {
            match HeaderValue::from_str(&cache_control) {
                Ok(value) => {
                    headers.insert(header::CACHE_CONTROL, value);
                }
                Err(e) => tracing::warn!("Invalid Cache-Control {:?}: {}", cache_control, e),
            }
        }
        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.append(name, value);
                }
                _ => tracing::warn!("Skipping invalid header {}: {:?}", name, value),
            }
        }

        response
    }
}
