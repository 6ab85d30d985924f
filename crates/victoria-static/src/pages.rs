//! Page rendering shared by the static builder and the dev server.

use victoria_content::{ContentError, DocStore, MarkdownRenderer};

use crate::routes::Route;
use crate::site::SiteInfo;
use crate::templates::{Context, DocView, NavItem, Section, TemplateEngine};

/// A rendered page.
#[derive(Debug, Clone)]
pub struct Page {
    /// Route the page was rendered for
    pub route: Route,
    /// False when the not-found page was rendered in place of the route
    pub found: bool,
    pub html: String,
}

/// Errors that can occur while rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders routes to HTML.
pub struct SitePages {
    site: SiteInfo,
    templates: TemplateEngine,
    markdown: MarkdownRenderer,
}

impl SitePages {
    pub fn new(site: SiteInfo) -> Self {
        Self {
            site: site.normalized(),
            templates: TemplateEngine::new(),
            markdown: MarkdownRenderer::default(),
        }
    }

    pub fn site(&self) -> &SiteInfo {
        &self.site
    }

    /// Render a route.
    ///
    /// A doc route whose document does not exist renders the not-found page
    /// with `found` set to false. `scripts` are appended to the layout.
    pub fn render(
        &self,
        route: &Route,
        store: &DocStore,
        scripts: &[String],
    ) -> Result<Page, RenderError> {
        let mut context = match route {
            Route::Home => Context::new(&self.site, Section::Home),
            Route::Download => {
                let mut context = Context::new(&self.site, Section::Download);
                context.title = Some("Download".to_string());
                context
            }
            Route::NotFound => return self.not_found(route, scripts, true),
            Route::Doc(slug) => match self.doc_context(slug, store)? {
                Some(context) => context,
                None => {
                    tracing::debug!("No document for {}", route);
                    return self.not_found(route, scripts, false);
                }
            },
        };
        context.scripts = scripts.to_vec();

        let template = match route {
            Route::Home => "home.html",
            Route::Download => "download.html",
            _ => "doc.html",
        };

        Ok(Page {
            route: route.clone(),
            found: true,
            html: self.templates.render_page(template, &context)?,
        })
    }

    fn doc_context(
        &self,
        slug: &str,
        store: &DocStore,
    ) -> Result<Option<Context<'_>>, RenderError> {
        let Some(doc) = store.fetch_document(slug)? else {
            return Ok(None);
        };

        let nav = store
            .list_documents()?
            .into_iter()
            .map(|summary| NavItem {
                path: Route::Doc(summary.slug.clone()).url(&self.site.base_url),
                active: summary.slug == doc.slug,
                title: summary.title,
            })
            .collect();

        let rendered = self.markdown.render(&doc.body);
        let heading = doc.metadata.title().unwrap_or_else(|| doc.slug.clone());
        let description = doc.metadata.description();

        let mut context = Context::new(&self.site, Section::Docs);
        context.title = Some(heading.clone());
        context.description = description.clone();
        context.nav = nav;
        context.doc = Some(DocView {
            slug: doc.slug.clone(),
            heading,
            description,
            content: rendered.to_html(),
        });
        context.toc = rendered.toc;

        Ok(Some(context))
    }

    fn not_found(
        &self,
        route: &Route,
        scripts: &[String],
        found: bool,
    ) -> Result<Page, RenderError> {
        let mut context = Context::new(&self.site, Section::None);
        context.title = Some("Not Found".to_string());
        context.scripts = scripts.to_vec();

        Ok(Page {
            route: route.clone(),
            found,
            html: self.templates.render_page("not_found.html", &context)?,
        })
    }
}
