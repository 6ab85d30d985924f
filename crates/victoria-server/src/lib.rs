//! Development server with live reload for the Victoria website.
//!
//! Renders pages on demand from the content directory and reloads connected
//! browsers over a WebSocket whenever a document changes.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{ChangeSet, FileWatcher, WatchEvent, QUIET_PERIOD};
pub use websocket::{HmrHub, HmrMessage};
