//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use victoria_content::node::escape_html;
use victoria_content::{ContentError, DocStore};

use crate::assets::AssetPipeline;
use crate::pages::{Page, RenderError, SitePages};
use crate::routes::{generate_routes, Route};
use crate::site::SiteInfo;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Markdown content directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Files copied verbatim into the output (downloads, images)
    pub public_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Site settings
    pub site: SiteInfo,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            public_dir: PathBuf::from("public"),
            minify: true,
            site: SiteInfo::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of documents rendered
    pub docs: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {0}")]
    ReadError(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

impl From<RenderError> for BuildError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Content(e) => BuildError::Content(e),
            RenderError::Template(e) => BuildError::TemplateError(e.to_string()),
        }
    }
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    store: DocStore,
    pages: SitePages,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            store: DocStore::new(&config.docs_dir),
            pages: SitePages::new(config.site.clone()),
            config,
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let routes = generate_routes(&self.store)?;
        let docs = routes
            .iter()
            .filter(|route| matches!(route, Route::Doc(_)))
            .count();

        // Render pages in parallel
        let results: Vec<Result<Page, RenderError>> = routes
            .par_iter()
            .map(|route| self.pages.render(route, &self.store, &[]))
            .collect();

        for result in results {
            self.write_page(&result?)?;
        }

        self.generate_assets()?;
        self.copy_public()?;
        self.generate_sitemap(&routes)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: routes.len(),
            docs,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    fn write_page(&self, page: &Page) -> Result<(), BuildError> {
        let output_path = page.route.output_path(&self.config.output_dir);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&output_path, &page.html).map_err(|e| {
            BuildError::WriteError(format!("{}: {}", output_path.display(), e))
        })?;

        tracing::debug!("Wrote {}", output_path.display());

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("{}, writing unminified CSS", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let js = AssetPipeline::generate_js();
        fs::write(assets_dir.join("main.js"), js)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Copy the public directory into the output.
    fn copy_public(&self) -> Result<(), BuildError> {
        let public = &self.config.public_dir;
        if !public.is_dir() {
            tracing::debug!("No public directory at {}", public.display());
            return Ok(());
        }

        let mut copied = 0;

        for entry in WalkDir::new(public) {
            let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
            let Ok(relative) = entry.path().strip_prefix(public) else {
                continue;
            };
            let target = self.config.output_dir.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| BuildError::WriteError(e.to_string()))?;
            } else if entry.file_type().is_file() {
                fs::copy(entry.path(), &target).map_err(|e| {
                    BuildError::WriteError(format!("{}: {}", target.display(), e))
                })?;
                copied += 1;
            }
        }

        tracing::info!("Copied {} files from {}", copied, public.display());

        Ok(())
    }

    /// Generate sitemap.
    fn generate_sitemap(&self, routes: &[Route]) -> Result<(), BuildError> {
        let base_url = &self.pages.site().base_url;

        let urls: Vec<String> = routes
            .iter()
            .filter(|route| route.is_indexable())
            .map(|route| {
                let mut entry = String::from("  <url>\n    <loc>");
                escape_html(&mut entry, &route.url(base_url));
                entry.push_str("</loc>\n  </url>");
                entry
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), &sitemap)?;

        let robots = format!("User-agent: *\nAllow: /\nSitemap: {}sitemap.xml", base_url);
        write_file(&self.config.output_dir.join("robots.txt"), &robots)?;

        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|e| BuildError::WriteError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(root: &Path) -> BuildConfig {
        BuildConfig {
            docs_dir: root.join("docs"),
            output_dir: root.join("dist"),
            public_dir: root.join("public"),
            minify: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_site() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");

        fs::create_dir_all(&docs).unwrap();
        fs::write(
            docs.join("LANGUAGE.md"),
            r#"---
title: The Language
---
# Welcome
"#,
        )
        .unwrap();
        fs::write(docs.join("PHILOSOPHY.md"), "Clarity.").unwrap();

        let builder = StaticBuilder::new(config(temp.path()));
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 5);
        assert_eq!(result.docs, 2);
        assert!(out.join("index.html").exists());
        assert!(out.join("download/index.html").exists());
        assert!(out.join("docs/LANGUAGE/index.html").exists());
        assert!(out.join("docs/PHILOSOPHY/index.html").exists());
        assert!(out.join("404.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/main.js").exists());

        let page = fs::read_to_string(out.join("docs/LANGUAGE/index.html")).unwrap();
        assert!(page.contains("The Language"));
    }

    #[tokio::test]
    async fn builds_without_docs() {
        let temp = tempdir().unwrap();

        let builder = StaticBuilder::new(config(temp.path()));
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 3);
        assert_eq!(result.docs, 0);
    }

    #[tokio::test]
    async fn copies_public_files() {
        let temp = tempdir().unwrap();
        let downloads = temp.path().join("public/downloads");
        fs::create_dir_all(&downloads).unwrap();
        fs::write(downloads.join("victoria.exe"), b"MZ").unwrap();

        StaticBuilder::new(config(temp.path()))
            .build()
            .await
            .unwrap();

        let copied = fs::read(temp.path().join("dist/downloads/victoria.exe")).unwrap();
        assert_eq!(copied, b"MZ");
    }

    #[tokio::test]
    async fn generates_sitemap_without_not_found() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("LANGUAGE.md"), "# Language").unwrap();

        StaticBuilder::new(config(temp.path()))
            .build()
            .await
            .unwrap();

        let sitemap = fs::read_to_string(temp.path().join("dist/sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>/docs/LANGUAGE/</loc>"));
        assert!(sitemap.contains("<loc>/download/</loc>"));
        assert!(!sitemap.contains("404"));

        let robots = fs::read_to_string(temp.path().join("dist/robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: /sitemap.xml"));
    }

    #[tokio::test]
    async fn sitemap_escapes_slugs() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("a&b.md"), "# Both").unwrap();

        StaticBuilder::new(config(temp.path()))
            .build()
            .await
            .unwrap();

        let sitemap = fs::read_to_string(temp.path().join("dist/sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>/docs/a&amp;b/</loc>"));
        assert!(!sitemap.contains("a&b"));
        assert!(temp.path().join("dist/docs/a&b/index.html").exists());
    }

    #[tokio::test]
    async fn invalid_front_matter_fails_build() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("broken.md"), "---\ntitle: [x\n---\n").unwrap();

        let result = StaticBuilder::new(config(temp.path())).build().await;

        assert!(matches!(result, Err(BuildError::Content(_))));
    }
}
