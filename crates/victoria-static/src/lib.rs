//! Static site generator for the Victoria language website.
//!
//! Renders the landing page, downloads page and markdown documentation into
//! a directory of plain HTML files.

pub mod assets;
pub mod builder;
pub mod pages;
pub mod routes;
pub mod site;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use pages::{Page, RenderError, SitePages};
pub use routes::{generate_routes, Route};
pub use site::{DownloadLink, SiteInfo};
