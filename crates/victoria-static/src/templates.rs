//! Template engine for rendering site pages.

use minijinja::{context, Environment};
use serde::Serialize;
use victoria_content::TocEntry;

use crate::site::SiteInfo;

/// A documentation navigation item.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Whether this is the active page
    pub active: bool,
}

/// Top-level navbar section, used to highlight the current link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Home,
    Docs,
    Download,
    None,
}

/// A rendered document, as shown on a docs page.
#[derive(Debug, Clone, Serialize)]
pub struct DocView {
    pub slug: String,
    /// Page heading: the title metadata or the raw slug
    pub heading: String,
    pub description: Option<String>,
    /// Rendered markdown HTML
    pub content: String,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Serialize)]
pub struct Context<'a> {
    /// Page title, shown after the site title
    pub title: Option<String>,
    /// Meta description override
    pub description: Option<String>,
    /// Site settings
    pub site: &'a SiteInfo,
    /// Current navbar section
    pub section: Section,
    /// Documentation navigation items
    pub nav: Vec<NavItem>,
    /// Table of contents
    pub toc: Vec<TocEntry>,
    /// Document shown on a docs page
    pub doc: Option<DocView>,
    /// Extra scripts to include
    pub scripts: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(site: &'a SiteInfo, section: Section) -> Self {
        Self {
            title: None,
            description: None,
            site,
            section,
            nav: Vec::new(),
            toc: Vec::new(),
            doc: None,
            scripts: Vec::new(),
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("navbar.html", NAVBAR_TEMPLATE),
            ("home.html", HOME_TEMPLATE),
            ("download.html", DOWNLOAD_TEMPLATE),
            ("doc.html", DOC_TEMPLATE),
            ("not_found.html", NOT_FOUND_TEMPLATE),
        ] {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("built-in templates are valid");
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context<'_>,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            description => &context.description,
            site => context.site,
            base_url => &context.site.base_url,
            section => context.section,
            nav => &context.nav,
            toc => &context.toc,
            doc => &context.doc,
            scripts => &context.scripts,
            repo_name => repo_name(&context.site.repository),
        })
    }
}

/// Last path segment of a repository URL.
fn repo_name(repository: &str) -> &str {
    repository
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(repository)
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ site.title }}{% if title %} | {{ title }}{% endif %}</title>
  <meta name="description" content="{{ description or site.description }}">
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  {% include "navbar.html" %}
  <main class="site-main">
    {% block content %}{% endblock %}
  </main>
  <footer class="site-footer">
    <div class="container footer-inner">
      <div class="footer-brand">
        <span class="brand">{{ site.title }}</span>
        <span>{{ site.tagline }}</span>
      </div>
      <p>&copy; {{ site.year }} {{ site.title }} Language. Built for clarity.</p>
      <div class="footer-links">
        <a href="{{ site.repository }}">GitHub</a>
        <a href="{{ base_url }}docs/{{ site.start_doc }}/">Docs</a>
      </div>
    </div>
  </footer>
  <script src="{{ base_url }}assets/main.js"></script>
  {% for script in scripts %}<script src="{{ script }}"></script>
  {% endfor %}
</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"<header class="site-header">
  <nav class="navbar glass">
    <div class="navbar-left">
      <a href="{{ base_url }}" class="brand">{{ site.title }}</a>
      <div class="navbar-links">
        <a href="{{ base_url }}docs/{{ site.start_doc }}/"{% if section == "docs" %} class="active"{% endif %}>Docs</a>
        <a href="{{ base_url }}download/"{% if section == "download" %} class="active"{% endif %}>Download</a>
        <a href="{{ base_url }}docs/{{ site.philosophy_doc }}/">Philosophy</a>
      </div>
    </div>
    <div class="navbar-right">
      <a href="{{ site.repository }}" class="navbar-github">GitHub</a>
      <a href="{{ base_url }}docs/{{ site.start_doc }}/" class="btn btn-primary btn-sm">Get Started</a>
      <button type="button" class="menu-btn" data-toggle="site-menu" aria-label="Toggle menu">&#9776;</button>
    </div>
  </nav>
  <div class="mobile-menu glass" id="site-menu">
    <div class="mobile-menu-header">
      <span class="brand">{{ site.title }}</span>
      <span class="muted">{{ site.tagline }}</span>
    </div>
    <a href="{{ base_url }}docs/{{ site.start_doc }}/">Documentation</a>
    <a href="{{ base_url }}download/">Download</a>
    <a href="{{ base_url }}docs/{{ site.philosophy_doc }}/">Philosophy</a>
    <a href="{{ site.repository }}">GitHub</a>
    <a href="{{ base_url }}docs/{{ site.start_doc }}/" class="btn btn-primary">Get Started</a>
  </div>
</header>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="home">
  <div class="glow"></div>

  <section class="hero">
    <div class="badge"><span class="badge-dot"></span>{{ site.title }} v{{ site.version }} is now in preview</div>
    <h1 class="hero-title">Programming <span class="hero-accent">simplified.</span></h1>
    <p class="hero-lead">
      {{ site.title }} is a learning-first programming language designed for clarity, joy, and progressive complexity.
      Focus on your logic, not the boilerplate.
    </p>
    <div class="hero-actions">
      <a href="{{ base_url }}docs/{{ site.start_doc }}/" class="btn btn-primary btn-lg">Get Started &rarr;</a>
      <a href="{{ base_url }}docs/{{ site.philosophy_doc }}/" class="btn btn-outline btn-lg glass">Our Philosophy</a>
    </div>
  </section>

  <section class="code-preview container">
    <div class="card code-preview-card">
      <div class="code-preview-text">
        <h2>Familiar, yet fresh.</h2>
        <p>
          {{ site.title }} combines the best of C-style syntax with modern features like optional static typing,
          first-class functions, and built-in modules.
        </p>
        <ul class="highlights">
          <li><span class="highlight-icon"></span>Optional static typing</li>
          <li><span class="highlight-icon"></span>Zero-config build system</li>
          <li><span class="highlight-icon"></span>Human-readable errors</li>
        </ul>
      </div>
      <div class="code-preview-window">
        <div class="window">
          <div class="window-bar">
            <span class="dot dot-red"></span><span class="dot dot-yellow"></span><span class="dot dot-green"></span>
            <span class="window-title">hello.vc</span>
          </div>
          <pre class="window-body"><code>// Victoria is clean and expressive
define greet(name: string) -&gt; string {
    return "Hello, ${name}!"
}

let message = greet("Victoria")
print(message)

// Optional types where you need them
let count: int = 42
if count &gt; 40 {
    print("The answer is ready.")
}</code></pre>
        </div>
      </div>
    </div>
  </section>

  <section class="features container">
    <div class="section-heading">
      <h2>Designed for Humans</h2>
      <p>
        We believe that programming should be accessible and enjoyable.
        {{ site.title }} is built on principles that prioritize the developer experience.
      </p>
    </div>
    <div class="feature-grid">
      <div class="card feature">
        <h3>Minimalist Syntax</h3>
        <p>No semicolons required, no complex keywords. Just clean, readable code that looks like what it does.</p>
      </div>
      <div class="card feature">
        <h3>Instant Feedback</h3>
        <p>Fast interpreter and clear error messages that act as micro-tutorials, helping you learn as you go.</p>
      </div>
      <div class="card feature">
        <h3>Batteries Included</h3>
        <p>Built-in support for JSON, HTTP, Math, and more. Start building real applications immediately.</p>
      </div>
    </div>
  </section>

  <section class="installation container">
    <div class="installation-text">
      <h2>Start coding in seconds.</h2>
      <p>
        {{ site.title }} is distributed as a single executable. No complex installers, no dependencies hell.
        Just download, add to PATH, and run.
      </p>
      <div class="installation-actions">
        <a href="{{ base_url }}download/" class="btn btn-primary">Download for Windows</a>
        <a href="{{ base_url }}docs/{{ site.start_doc }}/" class="btn btn-outline">Installation Guide</a>
      </div>
    </div>
    <div class="terminal">
      <div class="window-bar">
        <span class="dot dot-red"></span><span class="dot dot-yellow"></span><span class="dot dot-green"></span>
      </div>
      <p><span class="prompt">&#10140;</span> <span class="cwd">~</span> victoria --version</p>
      <p class="muted">Victoria version {{ site.version }} (windows/amd64)</p>
      <p><span class="prompt">&#10140;</span> <span class="cwd">~</span> vic install http_server</p>
      <p class="muted">Installing package http_server...</p>
      <p class="muted">&#10003; Package installed successfully.</p>
      <p><span class="prompt">&#10140;</span> <span class="cwd">~</span> <span class="cursor">_</span></p>
    </div>
  </section>

  <section class="cta">
    <div class="cta-card container">
      <h2>Ready to experience {{ site.title }}?</h2>
      <p>Join the community and start building with {{ site.title }} today. Experience programming as it should be.</p>
      <div class="cta-actions">
        <a href="{{ base_url }}docs/{{ site.start_doc }}/" class="btn btn-light btn-lg">Read the Docs</a>
        <a href="{{ site.repository }}" class="btn btn-ghost btn-lg">View on GitHub</a>
      </div>
    </div>
  </section>
</div>
{% endblock %}"##;

const DOWNLOAD_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="download">
  <div class="glow"></div>

  <div class="download-heading">
    <h1>Download {{ site.title }}</h1>
    <p>Get started with {{ site.title }} on your machine. Choose the method that works best for you.</p>
  </div>

  <div class="download-grid">
    <div class="card download-card">
      <h2>Windows Binaries</h2>
      <p>Download the pre-compiled executables for Windows x64. Includes the interpreter and package manager.</p>
      <div class="download-buttons">
        {% for download in site.downloads %}
        <a href="{{ base_url }}downloads/{{ download.file }}" class="btn {% if download.primary %}btn-primary{% else %}btn-outline{% endif %}" download>Download {{ download.file }}</a>
        {% endfor %}
      </div>
      <p class="hint">Place these files in a folder included in your system PATH.</p>
    </div>

    <div class="card download-card">
      <h2>Build from Source</h2>
      <p>Clone the repository and build {{ site.title }} yourself using Go. Recommended for contributors and Linux/macOS users.</p>
      <div class="terminal terminal-compact">
        <p>$ git clone {{ site.repository }}</p>
        <p>$ cd {{ repo_name }}</p>
        <p>$ go build -o victoria cmd/victoria/main.go</p>
        <p>$ go build -o vic cmd/vic/main.go</p>
      </div>
      <a href="{{ site.repository }}" class="btn btn-outline">View on GitHub</a>
    </div>
  </div>
</div>
{% endblock %}"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="docs-layout container">
  <button type="button" class="docs-menu-btn" data-toggle="docs-menu" aria-label="Open docs menu">&#9776;</button>
  <div class="docs-menu glass" id="docs-menu">
    <div class="docs-menu-header">
      <span class="brand">Docs</span>
      <span class="muted">Navigate topics</span>
    </div>
    <div class="docs-quick-links">
      <a href="{{ base_url }}docs/{{ site.start_doc }}/">Language</a>
      <a href="{{ base_url }}docs/{{ site.philosophy_doc }}/">Philosophy</a>
    </div>
    {% for item in nav %}
    <a href="{{ item.path }}" class="docs-menu-link">{{ item.title }}</a>
    {% endfor %}
    <a href="{{ base_url }}docs/{{ site.start_doc }}/" class="btn btn-primary">Get Started</a>
  </div>

  <aside class="docs-sidebar">
    <h4>Documentation</h4>
    <nav class="docs-nav">
    {% for item in nav %}
      <a href="{{ item.path }}" class="docs-nav-link{% if item.active %} active{% endif %}">{{ item.title }}</a>
    {% endfor %}
    </nav>
  </aside>

  <article class="doc">
    <header class="doc-header">
      <h1 class="doc-title">{{ doc.heading }}</h1>
      {% if doc.description %}<p class="doc-description">{{ doc.description }}</p>{% endif %}
    </header>
    <div class="markdown-content">
      {{ doc.content | safe }}
    </div>
  </article>

  {% if toc %}
  <aside class="toc">
    <h2>On this page</h2>
    <ul>
    {% for entry in toc %}
      <li class="toc-level-{{ entry.level }}">
        <a href="#{{ entry.id }}">{{ entry.title }}</a>
      </li>
    {% endfor %}
    </ul>
  </aside>
  {% endif %}
</div>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<div class="not-found">
  <h1>404</h1>
  <p>This page could not be found.</p>
  <a href="{{ base_url }}" class="btn btn-primary">Back home</a>
</div>
{% endblock %}"##;
