//! Content store access: loading and listing documents.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::frontmatter::{split_front_matter, FrontMatterError, Metadata};

/// File extension of content files.
pub const DOC_EXTENSION: &str = ".md";

/// A loaded markdown document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier: the filename without its extension
    pub slug: String,

    /// Front-matter metadata
    pub metadata: Metadata,

    /// Markdown body without the front-matter
    pub body: String,
}

impl Document {
    /// Title from metadata, falling back to the capitalized slug.
    pub fn display_title(&self) -> String {
        self.metadata
            .title()
            .unwrap_or_else(|| capitalize(&self.slug))
    }

    pub fn summary(&self) -> DocSummary {
        DocSummary {
            slug: self.slug.clone(),
            title: self.display_title(),
        }
    }
}

/// Slug and display title, used for navigation listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocSummary {
    pub slug: String,
    pub title: String,
}

/// Errors that can occur when loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid front-matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Markdown documents in a single content directory.
///
/// Loaded documents are cached by slug until [`DocStore::invalidate`] is
/// called. Lookups that find no file are never cached.
#[derive(Debug)]
pub struct DocStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, Arc<Document>>>,
}

impl DocStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The content directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a document by identifier.
    ///
    /// A trailing `.md` on the identifier is ignored. Returns `Ok(None)` when
    /// no matching file exists.
    pub fn fetch_document(&self, identifier: &str) -> Result<Option<Arc<Document>>, ContentError> {
        let slug = identifier.strip_suffix(DOC_EXTENSION).unwrap_or(identifier);

        if !is_valid_slug(slug) {
            return Ok(None);
        }

        if let Some(doc) = self.cache.read().get(slug) {
            return Ok(Some(Arc::clone(doc)));
        }

        let path = self.dir.join(format!("{}{}", slug, DOC_EXTENSION));
        if !path.is_file() {
            return Ok(None);
        }

        let source = fs::read_to_string(&path).map_err(|source| ContentError::Read {
            path: path.clone(),
            source,
        })?;

        let (metadata, body) =
            split_front_matter(&source).map_err(|source| ContentError::FrontMatter {
                path: path.clone(),
                source,
            })?;

        let doc = Arc::new(Document {
            slug: slug.to_string(),
            metadata,
            body: body.to_string(),
        });

        tracing::debug!("Loaded {}", path.display());

        self.cache.write().insert(slug.to_string(), Arc::clone(&doc));

        Ok(Some(doc))
    }

    /// Summaries of every document, sorted by slug.
    ///
    /// A missing content directory has no documents.
    pub fn list_documents(&self) -> Result<Vec<DocSummary>, ContentError> {
        if !self.dir.exists() {
            tracing::debug!("Content directory {} not found", self.dir.display());
            return Ok(Vec::new());
        }

        let read_error = |source| ContentError::Read {
            path: self.dir.clone(),
            source,
        };

        let mut summaries = Vec::new();

        for entry in fs::read_dir(&self.dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let Some(slug) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(DOC_EXTENSION))
            else {
                continue;
            };

            // The file may have disappeared since the directory was read.
            if let Some(doc) = self.fetch_document(slug)? {
                summaries.push(doc.summary());
            }
        }

        summaries.sort_by(|a, b| a.slug.cmp(&b.slug));

        Ok(summaries)
    }

    /// Drop every cached document.
    pub fn invalidate(&self) {
        self.cache.write().clear();
        tracing::debug!("Content cache cleared");
    }

    /// Number of cached documents.
    pub fn cached(&self) -> usize {
        self.cache.read().len()
    }
}

/// A slug names a single file directly inside the content directory.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn fetches_present_document() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "LANGUAGE.md",
            "---\ntitle: The Language\ndescription: Reference\n---\n# Syntax\n",
        );

        let store = DocStore::new(temp.path());
        let doc = store.fetch_document("LANGUAGE").unwrap().unwrap();

        assert_eq!(doc.slug, "LANGUAGE");
        assert_eq!(doc.metadata.title(), Some("The Language".to_string()));
        assert_eq!(doc.metadata.description(), Some("Reference".to_string()));
        assert_eq!(doc.body, "# Syntax\n");
    }

    #[test]
    fn strips_markdown_extension_from_identifier() {
        let temp = tempdir().unwrap();
        write(temp.path(), "guide.md", "# Guide");

        let store = DocStore::new(temp.path());
        let doc = store.fetch_document("guide.md").unwrap().unwrap();

        assert_eq!(doc.slug, "guide");
    }

    #[test]
    fn missing_document_is_none() {
        let temp = tempdir().unwrap();
        write(temp.path(), "present.md", "# Here");

        let store = DocStore::new(temp.path());

        assert!(store.fetch_document("absent").unwrap().is_none());
        assert!(store.fetch_document("").unwrap().is_none());
        assert_eq!(store.cached(), 0);
    }

    #[test]
    fn rejects_paths_outside_directory() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        write(temp.path(), "secret.md", "# Secret");

        let store = DocStore::new(&docs);

        assert!(store.fetch_document("../secret").unwrap().is_none());
        assert!(store.fetch_document("..").unwrap().is_none());
    }

    #[test]
    fn invalid_front_matter_is_an_error() {
        let temp = tempdir().unwrap();
        write(temp.path(), "broken.md", "---\ntitle: [oops\n---\n");

        let store = DocStore::new(temp.path());

        assert!(matches!(
            store.fetch_document("broken"),
            Err(ContentError::FrontMatter { .. })
        ));
    }

    #[test]
    fn lists_missing_directory_as_empty() {
        let temp = tempdir().unwrap();
        let store = DocStore::new(temp.path().join("nope"));

        assert!(store.list_documents().unwrap().is_empty());
    }

    #[test]
    fn lists_empty_directory_as_empty() {
        let temp = tempdir().unwrap();
        let store = DocStore::new(temp.path());

        assert!(store.list_documents().unwrap().is_empty());
    }

    #[test]
    fn lists_sorted_summaries_with_title_fallback() {
        let temp = tempdir().unwrap();
        write(temp.path(), "example.md", "Just a body.");
        write(temp.path(), "PHILOSOPHY.md", "# Why");
        write(temp.path(), "LANGUAGE.md", "---\ntitle: The Language\n---\n");
        write(temp.path(), "notes.txt", "ignored");
        fs::create_dir_all(temp.path().join("nested.md")).unwrap();

        let store = DocStore::new(temp.path());
        let docs = store.list_documents().unwrap();

        assert_eq!(
            docs,
            vec![
                DocSummary {
                    slug: "LANGUAGE".to_string(),
                    title: "The Language".to_string(),
                },
                DocSummary {
                    slug: "PHILOSOPHY".to_string(),
                    title: "Philosophy".to_string(),
                },
                DocSummary {
                    slug: "example".to_string(),
                    title: "Example".to_string(),
                },
            ]
        );
    }

    #[test]
    fn every_listed_slug_can_be_fetched() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.md", "A");
        write(temp.path(), "b.md", "---\ntitle: Bee\n---\nB");

        let store = DocStore::new(temp.path());

        for summary in store.list_documents().unwrap() {
            let doc = store.fetch_document(&summary.slug).unwrap().unwrap();
            assert_eq!(doc.slug, summary.slug);
        }
    }

    #[test]
    fn cache_serves_until_invalidated() {
        let temp = tempdir().unwrap();
        write(temp.path(), "page.md", "---\ntitle: First\n---\n");

        let store = DocStore::new(temp.path());
        assert_eq!(store.list_documents().unwrap()[0].title, "First");
        assert_eq!(store.cached(), 1);

        write(temp.path(), "page.md", "---\ntitle: Second\n---\n");
        assert_eq!(store.list_documents().unwrap()[0].title, "First");

        store.invalidate();
        assert_eq!(store.cached(), 0);
        assert_eq!(store.list_documents().unwrap()[0].title, "Second");
    }

    #[test]
    fn cache_is_shared_across_threads() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.md", "A");
        write(temp.path(), "b.md", "B");

        let store = DocStore::new(temp.path());

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for slug in ["a", "b"] {
                        assert_eq!(store.fetch_document(slug).unwrap().unwrap().slug, slug);
                    }
                });
            }
        });

        assert_eq!(store.cached(), 2);
    }

    #[test]
    fn capitalizes_slugs() {
        assert_eq!(capitalize("example"), "Example");
        assert_eq!(capitalize("LANGUAGE"), "Language");
        assert_eq!(capitalize("getting-started"), "Getting-started");
        assert_eq!(capitalize(""), "");
    }
}
