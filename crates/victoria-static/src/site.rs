//! Site-wide settings shared by every page.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A downloadable binary served from `/downloads/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    /// File name under `downloads/`
    pub file: String,
    /// Whether this is the primary download
    #[serde(default)]
    pub primary: bool,
}

/// Settings rendered into the layout and static pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    /// Language name, used as the brand
    pub title: String,

    /// Short tagline shown in the footer and mobile menu
    pub tagline: String,

    /// Meta description
    pub description: String,

    /// Source repository URL
    pub repository: String,

    /// Released version shown in the hero badge
    pub version: String,

    /// Base URL the site is deployed under, always ending in `/`
    pub base_url: String,

    /// Doc slug linked from "Get Started"
    pub start_doc: String,

    /// Doc slug linked from "Philosophy"
    pub philosophy_doc: String,

    /// Windows binaries on the downloads page
    pub downloads: Vec<DownloadLink>,

    /// Year shown in the footer
    pub year: i32,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Victoria".to_string(),
            tagline: "A learning-first language.".to_string(),
            description: "A dynamic, interpreted programming language designed for readability and expressiveness.".to_string(),
            repository: "https://github.com/theawakener0/VictoriaLang".to_string(),
            version: "0.1.0".to_string(),
            base_url: "/".to_string(),
            start_doc: "LANGUAGE".to_string(),
            philosophy_doc: "PHILOSOPHY".to_string(),
            downloads: vec![
                DownloadLink {
                    file: "victoria.exe".to_string(),
                    primary: true,
                },
                DownloadLink {
                    file: "vic.exe".to_string(),
                    primary: false,
                },
            ],
            year: current_year(),
        }
    }
}

impl SiteInfo {
    /// Normalize the base URL to start and end with `/`.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim_matches('/');
        self.base_url = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        self
    }
}

/// Current year in UTC.
pub fn current_year() -> i32 {
    Utc::now().year()
}
