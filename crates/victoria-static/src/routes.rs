//! Site routes and their mapping to output files.

use std::fmt;
use std::path::{Path, PathBuf};

use victoria_content::{ContentError, DocStore};

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Download,
    Doc(String),
    NotFound,
}

impl Route {
    /// Public URL of the route under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        match self {
            Route::Home => base_url.to_string(),
            Route::Download => format!("{}download/", base_url),
            Route::Doc(slug) => format!("{}docs/{}/", base_url, slug),
            Route::NotFound => format!("{}404.html", base_url),
        }
    }

    /// File the route is written to inside the output directory.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        match self {
            Route::Home => output_dir.join("index.html"),
            Route::Download => output_dir.join("download").join("index.html"),
            Route::Doc(slug) => output_dir.join("docs").join(slug).join("index.html"),
            Route::NotFound => output_dir.join("404.html"),
        }
    }

    /// Map a request path back to a route.
    ///
    /// Tolerates a missing trailing slash and an explicit `index.html`.
    /// Whether a doc route's slug exists is left to the page renderer.
    pub fn resolve(path: &str, base_url: &str) -> Option<Route> {
        let path = if base_url == "/" {
            path
        } else {
            let base = base_url.trim_end_matches('/');
            path.strip_prefix(base)?
        };

        let path = path.trim_start_matches('/');
        let path = path.strip_suffix("index.html").unwrap_or(path);
        let path = path.trim_end_matches('/');

        match path {
            "" => Some(Route::Home),
            "download" => Some(Route::Download),
            "404.html" => Some(Route::NotFound),
            _ => {
                let slug = path.strip_prefix("docs/")?;
                if slug.is_empty() || slug.contains('/') {
                    None
                } else {
                    Some(Route::Doc(slug.to_string()))
                }
            }
        }
    }

    /// Whether the route belongs in the sitemap.
    pub fn is_indexable(&self) -> bool {
        !matches!(self, Route::NotFound)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url("/"))
    }
}

/// Every route to pre-render: fixed pages plus one per document.
pub fn generate_routes(store: &DocStore) -> Result<Vec<Route>, ContentError> {
    let docs = store.list_documents()?;

    let mut routes = Vec::with_capacity(docs.len() + 3);
    routes.push(Route::Home);
    routes.push(Route::Download);
    routes.extend(docs.into_iter().map(|doc| Route::Doc(doc.slug)));
    routes.push(Route::NotFound);

    tracing::debug!("Generated {} routes", routes.len());

    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn generates_one_route_per_document() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("LANGUAGE.md"), "# Language").unwrap();
        fs::write(temp.path().join("PHILOSOPHY.md"), "# Philosophy").unwrap();

        let routes = generate_routes(&DocStore::new(temp.path())).unwrap();

        assert_eq!(
            routes,
            vec![
                Route::Home,
                Route::Download,
                Route::Doc("LANGUAGE".to_string()),
                Route::Doc("PHILOSOPHY".to_string()),
                Route::NotFound,
            ]
        );
    }

    #[test]
    fn missing_content_yields_fixed_routes_only() {
        let temp = tempdir().unwrap();

        let routes = generate_routes(&DocStore::new(temp.path().join("docs"))).unwrap();

        assert_eq!(routes, vec![Route::Home, Route::Download, Route::NotFound]);
    }

    #[test]
    fn maps_routes_to_output_files() {
        let out = Path::new("dist");

        assert_eq!(Route::Home.output_path(out), out.join("index.html"));
        assert_eq!(
            Route::Download.output_path(out),
            out.join("download/index.html")
        );
        assert_eq!(
            Route::Doc("LANGUAGE".to_string()).output_path(out),
            out.join("docs/LANGUAGE/index.html")
        );
        assert_eq!(Route::NotFound.output_path(out), out.join("404.html"));
    }

    #[test]
    fn resolves_request_paths() {
        assert_eq!(Route::resolve("/", "/"), Some(Route::Home));
        assert_eq!(Route::resolve("/index.html", "/"), Some(Route::Home));
        assert_eq!(Route::resolve("/download", "/"), Some(Route::Download));
        assert_eq!(Route::resolve("/download/", "/"), Some(Route::Download));
        assert_eq!(
            Route::resolve("/docs/LANGUAGE", "/"),
            Some(Route::Doc("LANGUAGE".to_string()))
        );
        assert_eq!(
            Route::resolve("/docs/LANGUAGE/index.html", "/"),
            Some(Route::Doc("LANGUAGE".to_string()))
        );
        assert_eq!(Route::resolve("/docs/", "/"), None);
        assert_eq!(Route::resolve("/docs/a/b", "/"), None);
        assert_eq!(Route::resolve("/elsewhere", "/"), None);
    }

    #[test]
    fn resolves_under_base_url() {
        assert_eq!(Route::resolve("/site/", "/site/"), Some(Route::Home));
        assert_eq!(
            Route::resolve("/site/docs/x/", "/site/"),
            Some(Route::Doc("x".to_string()))
        );
        assert_eq!(Route::resolve("/docs/x/", "/site/"), None);
    }

    #[test]
    fn url_and_resolve_agree() {
        for route in [
            Route::Home,
            Route::Download,
            Route::Doc("LANGUAGE".to_string()),
            Route::NotFound,
        ] {
            assert_eq!(Route::resolve(&route.url("/v/"), "/v/"), Some(route));
        }
    }
}
