//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    handler::Handler,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use victoria_content::node::escape_html;
use victoria_content::DocStore;
use victoria_static::assets::AssetPipeline;
use victoria_static::{Route, SiteInfo, SitePages};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

const HMR_PATH: &str = "/__hmr";
const HMR_SCRIPT_PATH: &str = "/__hmr.js";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Markdown content directory
    pub docs_dir: PathBuf,

    /// Static files served as-is (downloads, images)
    pub public_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site settings
    pub site: SiteInfo,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            public_dir: PathBuf::from("public"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            site: SiteInfo::default(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    store: DocStore,
    pages: SitePages,
    hmr: HmrHub,
}

impl ServerState {
    fn new(config: &DevServerConfig) -> Self {
        // Pages are served from the root regardless of the deploy base URL.
        let site = SiteInfo {
            base_url: "/".to_string(),
            ..config.site.clone()
        };

        Self {
            store: DocStore::new(&config.docs_dir),
            pages: SitePages::new(site),
            hmr: HmrHub::new(),
        }
    }

    /// Render the page for a request path.
    fn respond(&self, path: &str) -> (StatusCode, String) {
        let scripts = [HMR_SCRIPT_PATH.to_string()];
        let route = Route::resolve(path, "/").unwrap_or(Route::NotFound);

        match self.pages.render(&route, &self.store, &scripts) {
            Ok(page) if page.found && route != Route::NotFound => (StatusCode::OK, page.html),
            Ok(page) => (StatusCode::NOT_FOUND, page.html),
            Err(e) => {
                tracing::error!("Failed to render {}: {}", path, e);
                let mut body = String::from("<pre>");
                escape_html(&mut body, &e.to_string());
                body.push_str("</pre>");
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        }
    }
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let host_port = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = host_port
            .parse()
            .map_err(|_| ServerError::InvalidAddress(host_port.clone()))?;

        let state = Arc::new(ServerState::new(&self.config));

        // Set up file watcher
        let watch_paths = vec![
            self.config.docs_dir.clone(),
            self.config.public_dir.clone(),
        ];

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        // Spawn file watch handler
        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(changes) = rx.recv().await {
                handle_changes(&state_clone, &changes);
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.public_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: Arc<ServerState>, public_dir: &Path) -> Router {
    // Unmatched paths try the public directory, then fall back to a page.
    let public = ServeDir::new(public_dir).fallback(page_handler.with_state(Arc::clone(&state)));

    Router::new()
        .route("/", get(page_handler))
        .route("/download", get(page_handler))
        .route("/download/", get(page_handler))
        .route("/docs/{slug}", get(page_handler))
        .route("/docs/{slug}/", get(page_handler))
        .route("/assets/main.css", get(css_handler))
        .route("/assets/main.js", get(js_handler))
        .route(HMR_PATH, get(ws_handler))
        .route(HMR_SCRIPT_PATH, get(hmr_script_handler))
        .fallback_service(public)
        .with_state(state)
}

/// Drop cached documents and reload browsers once per batch of changes.
fn handle_changes(state: &ServerState, changes: &[WatchEvent]) {
    for change in changes {
        match change {
            WatchEvent::DocModified(path) => tracing::info!("Doc modified: {}", path.display()),
            _ => tracing::debug!("Changed: {}", change.path().display()),
        }
    }

    if changes.is_empty() {
        return;
    }

    state.store.invalidate();
    state.hmr.send(HmrMessage::Reload);
}

/// Handler for every site page.
async fn page_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let (status, html) = state.respond(uri.path());
    (status, Html(html)).into_response()
}

async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::generate_css(),
    )
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

/// Handler for the HMR WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hmr.subscribe();

    if send_message(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    // Forward HMR messages to the client
    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}

/// Handler for the HMR client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        hmr_client_script(HMR_PATH),
    )
}
