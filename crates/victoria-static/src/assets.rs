//! Asset pipeline for CSS and JavaScript processing.

use victoria_content::COPY_REVERT;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.replace("__COPY_REVERT_MS__", &COPY_REVERT.as_millis().to_string())
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* Victoria site theme */

:root {
  --background: #09090b;
  --foreground: #fafafa;
  --muted: #18181b;
  --muted-foreground: #a1a1aa;
  --border: rgba(255, 255, 255, 0.1);
  --primary: #a78bfa;
  --primary-foreground: #09090b;
  --radius: 1rem;
  --font-sans: "Geist", system-ui, -apple-system, sans-serif;
  --font-mono: "Geist Mono", ui-monospace, SFMono-Regular, monospace;
  --sidebar-width: 260px;
  --toc-width: 200px;
  --content-max-width: 48rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-sans);
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
  min-height: 100vh;
  display: flex;
  flex-direction: column;
  -webkit-font-smoothing: antialiased;
}

a {
  color: inherit;
  text-decoration: none;
}

.container {
  width: 100%;
  max-width: 72rem;
  margin: 0 auto;
  padding: 0 1rem;
}

.muted {
  color: var(--muted-foreground);
}

.glass {
  background: rgba(9, 9, 11, 0.7);
  backdrop-filter: blur(12px);
  border: 1px solid var(--border);
}

.card {
  border: 1px solid var(--border);
  border-radius: 1.5rem;
  background: rgba(24, 24, 27, 0.4);
}

.glow {
  position: absolute;
  top: 0;
  left: 50%;
  transform: translateX(-50%);
  width: 100%;
  max-width: 72rem;
  height: 500px;
  background: rgba(167, 139, 250, 0.05);
  filter: blur(120px);
  border-radius: 9999px;
  z-index: -1;
}

/* Buttons */
.btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  gap: 0.5rem;
  border-radius: 9999px;
  padding: 0.6rem 1.5rem;
  font-weight: 500;
  border: 1px solid transparent;
  transition: background 0.2s, color 0.2s;
}

.btn-sm {
  padding: 0.35rem 1rem;
  font-size: 0.875rem;
}

.btn-lg {
  padding: 0.8rem 2.5rem;
  font-size: 1.05rem;
}

.btn-primary {
  background: var(--primary);
  color: var(--primary-foreground);
}

.btn-outline {
  border-color: var(--border);
}

.btn-outline:hover {
  background: var(--muted);
}

.btn-light {
  background: #fff;
  color: #000;
}

.btn-ghost {
  border-color: rgba(255, 255, 255, 0.2);
  color: #fff;
}

/* Navbar */
.site-header {
  position: fixed;
  top: 1rem;
  left: 0;
  right: 0;
  z-index: 50;
  display: flex;
  flex-direction: column;
  align-items: center;
  padding: 0 1rem;
}

.navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  width: 100%;
  max-width: 56rem;
  height: 3.5rem;
  padding: 0 1.5rem;
  border-radius: 9999px;
  box-shadow: 0 10px 30px rgba(0, 0, 0, 0.3);
}

.navbar-left,
.navbar-right,
.navbar-links {
  display: flex;
  align-items: center;
  gap: 1.5rem;
}

.brand {
  font-weight: 700;
  font-size: 1.125rem;
  letter-spacing: -0.01em;
}

.navbar-links a,
.navbar-github {
  font-size: 0.875rem;
  font-weight: 500;
  color: var(--muted-foreground);
}

.navbar-links a:hover,
.navbar-links a.active,
.navbar-github:hover {
  color: var(--primary);
}

.menu-btn {
  display: none;
  background: none;
  border: none;
  color: var(--foreground);
  font-size: 1.25rem;
  cursor: pointer;
}

.mobile-menu {
  display: none;
  flex-direction: column;
  gap: 0.5rem;
  width: 100%;
  max-width: 56rem;
  margin-top: 0.5rem;
  padding: 1.5rem;
  border-radius: 1.5rem;
}

.mobile-menu.open {
  display: flex;
}

.mobile-menu-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin-bottom: 0.5rem;
}

.mobile-menu a:not(.btn) {
  padding: 0.75rem 1rem;
  border-radius: 0.75rem;
}

/* Footer */
.site-main {
  flex: 1;
}

.site-footer {
  border-top: 1px solid var(--border);
  padding: 3rem 0;
  color: var(--muted-foreground);
  font-size: 0.875rem;
}

.footer-inner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  gap: 1.5rem;
  flex-wrap: wrap;
}

.footer-brand .brand {
  color: var(--foreground);
  font-size: 0.875rem;
  margin-right: 0.5rem;
}

.footer-links {
  display: flex;
  gap: 1.5rem;
}

.footer-links a:hover {
  color: var(--primary);
}

/* Home */
.home,
.download {
  position: relative;
  overflow: hidden;
  display: flex;
  flex-direction: column;
  align-items: center;
}

.hero {
  padding: 12rem 1rem 6rem;
  text-align: center;
  max-width: 56rem;
}

.badge {
  display: inline-flex;
  align-items: center;
  border: 1px solid rgba(167, 139, 250, 0.2);
  background: rgba(167, 139, 250, 0.05);
  color: var(--primary);
  border-radius: 9999px;
  padding: 0.25rem 0.75rem;
  font-size: 0.875rem;
  font-weight: 500;
  margin-bottom: 2rem;
}

.badge-dot {
  width: 0.5rem;
  height: 0.5rem;
  border-radius: 9999px;
  background: var(--primary);
  margin-right: 0.5rem;
}

.hero-title {
  font-size: clamp(3rem, 8vw, 6rem);
  font-weight: 700;
  letter-spacing: -0.03em;
  line-height: 1.05;
}

.hero-accent {
  font-family: Georgia, serif;
  font-style: italic;
  font-weight: 300;
  opacity: 0.8;
}

.hero-lead {
  max-width: 44rem;
  margin: 2rem auto 0;
  font-size: 1.2rem;
  font-weight: 300;
  color: var(--muted-foreground);
}

.hero-actions,
.installation-actions,
.cta-actions {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem;
  justify-content: center;
  padding-top: 2rem;
}

.code-preview {
  padding: 6rem 1rem;
}

.code-preview-card {
  display: grid;
  grid-template-columns: 1fr 1fr;
  overflow: hidden;
}

.code-preview-text {
  padding: 3rem;
  border-right: 1px solid var(--border);
}

.code-preview-text h2,
.installation-text h2,
.section-heading h2 {
  font-size: 2.25rem;
  letter-spacing: -0.02em;
}

.code-preview-text p,
.installation-text p {
  margin-top: 1.5rem;
  color: var(--muted-foreground);
  font-size: 1.1rem;
}

.highlights {
  list-style: none;
  margin-top: 2rem;
  display: grid;
  gap: 1rem;
  font-weight: 500;
}

.highlight-icon {
  display: inline-block;
  width: 2rem;
  height: 2rem;
  border-radius: 9999px;
  background: rgba(167, 139, 250, 0.1);
  vertical-align: middle;
  margin-right: 0.75rem;
}

.code-preview-window {
  background: rgba(24, 24, 27, 0.2);
  padding: 2rem;
}

.window,
.terminal {
  border: 1px solid var(--border);
  border-radius: 0.75rem;
  background: rgba(0, 0, 0, 0.6);
  overflow: hidden;
}

.window-bar {
  display: flex;
  align-items: center;
  gap: 0.4rem;
  padding: 0.75rem 1rem;
  border-bottom: 1px solid var(--border);
}

.dot {
  width: 0.75rem;
  height: 0.75rem;
  border-radius: 9999px;
}

.dot-red { background: rgba(239, 68, 68, 0.5); }
.dot-yellow { background: rgba(234, 179, 8, 0.5); }
.dot-green { background: rgba(34, 197, 94, 0.5); }

.window-title {
  margin-left: 1rem;
  font-family: var(--font-mono);
  font-size: 0.625rem;
  text-transform: uppercase;
  letter-spacing: 0.15em;
  color: var(--muted-foreground);
}

.window-body {
  padding: 1.5rem;
  overflow-x: auto;
  font-family: var(--font-mono);
  font-size: 0.875rem;
  line-height: 1.7;
  color: #dbeafe;
}

.features {
  padding: 8rem 1rem;
}

.section-heading {
  text-align: center;
  margin-bottom: 5rem;
}

.section-heading p {
  max-width: 44rem;
  margin: 1rem auto 0;
  color: var(--muted-foreground);
  font-weight: 300;
  font-size: 1.1rem;
}

.feature-grid {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
  gap: 2rem;
}

.feature {
  padding: 2rem;
}

.feature h3 {
  font-size: 1.25rem;
  margin-bottom: 0.75rem;
}

.feature p {
  color: var(--muted-foreground);
  font-weight: 300;
}

.installation {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 3rem;
  align-items: center;
  padding: 6rem 1rem;
}

.installation-actions {
  justify-content: flex-start;
}

.terminal {
  padding: 1.5rem;
  font-family: var(--font-mono);
  font-size: 0.875rem;
  color: #d4d4d8;
}

.terminal .window-bar {
  border: none;
  padding: 0 0 1rem;
}

.terminal p + p {
  margin-top: 0.5rem;
}

.terminal-compact {
  text-align: left;
  width: 100%;
}

.prompt { color: #4ade80; }
.cwd { color: #60a5fa; }

.cursor {
  animation: blink 1s steps(2) infinite;
}

@keyframes blink {
  to { visibility: hidden; }
}

.cta {
  width: 100%;
  padding: 8rem 1rem;
}

.cta-card {
  max-width: 64rem;
  border-radius: 3rem;
  border: 1px solid rgba(255, 255, 255, 0.05);
  background: #18181b;
  padding: 6rem 3rem;
  text-align: center;
}

.cta-card h2 {
  font-size: clamp(2.25rem, 6vw, 4.5rem);
  letter-spacing: -0.03em;
  color: #fff;
}

.cta-card p {
  max-width: 38rem;
  margin: 1.5rem auto 0;
  color: #a1a1aa;
  font-size: 1.2rem;
  font-weight: 300;
}

/* Downloads */
.download {
  padding: 8rem 1rem 5rem;
}

.download-heading {
  text-align: center;
  max-width: 48rem;
  margin-bottom: 4rem;
}

.download-heading h1 {
  font-size: clamp(2.25rem, 6vw, 3.75rem);
  letter-spacing: -0.02em;
  margin-bottom: 1.5rem;
}

.download-heading p {
  font-size: 1.25rem;
  font-weight: 300;
  color: var(--muted-foreground);
}

.download-grid {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 2rem;
  width: 100%;
  max-width: 64rem;
}

.download-card {
  padding: 2rem;
  display: flex;
  flex-direction: column;
  align-items: center;
  text-align: center;
  gap: 1.5rem;
}

.download-card p {
  color: var(--muted-foreground);
}

.download-buttons {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
  width: 100%;
  max-width: 20rem;
}

.hint {
  font-size: 0.75rem;
}

/* Docs layout */
.docs-layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) minmax(0, 1fr) var(--toc-width);
  gap: 3rem;
  align-items: start;
  padding-top: 8rem;
  padding-bottom: 6rem;
}

.docs-sidebar,
.toc {
  position: sticky;
  top: 6rem;
  max-height: calc(100vh - 8rem);
  overflow-y: auto;
}

.docs-sidebar h4,
.toc h2 {
  font-size: 0.75rem;
  font-weight: 700;
  text-transform: uppercase;
  letter-spacing: 0.15em;
  color: rgba(161, 161, 170, 0.5);
  margin-bottom: 1rem;
  padding: 0 1rem;
}

.docs-nav {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
}

.docs-nav-link {
  display: block;
  border-radius: 9999px;
  padding: 0.5rem 1rem;
  font-size: 0.875rem;
  font-weight: 500;
  color: var(--muted-foreground);
  transition: all 0.2s;
}

.docs-nav-link:hover,
.docs-nav-link.active {
  background: rgba(167, 139, 250, 0.05);
  color: var(--primary);
}

.toc ul {
  list-style: none;
}

.toc li a {
  display: block;
  padding: 0.25rem 1rem;
  font-size: 0.8rem;
  color: var(--muted-foreground);
}

.toc li a:hover {
  color: var(--primary);
}

.toc-level-3 { padding-left: 0.75rem; }
.toc-level-4,
.toc-level-5,
.toc-level-6 { padding-left: 1.5rem; }

.docs-menu-btn {
  display: none;
  position: fixed;
  bottom: 1.5rem;
  right: 1.5rem;
  z-index: 50;
  width: 3rem;
  height: 3rem;
  border-radius: 9999px;
  border: none;
  background: var(--primary);
  color: var(--primary-foreground);
  font-size: 1.25rem;
  box-shadow: 0 10px 30px rgba(0, 0, 0, 0.4);
  cursor: pointer;
}

.docs-menu {
  display: none;
  position: fixed;
  inset: 0;
  z-index: 40;
  flex-direction: column;
  gap: 0.5rem;
  padding: 1.5rem;
  overflow-y: auto;
}

.docs-menu.open {
  display: flex;
}

.docs-menu-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin-bottom: 1rem;
}

.docs-menu-header .brand {
  font-size: 1.5rem;
}

.docs-quick-links {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 0.5rem;
  margin-bottom: 1rem;
}

.docs-quick-links a {
  border-radius: 0.5rem;
  padding: 0.75rem 1rem;
  background: rgba(24, 24, 27, 0.3);
}

.docs-menu-link {
  border-radius: 0.75rem;
  padding: 0.75rem 1rem;
  font-weight: 500;
}

.docs-menu-link:hover {
  background: rgba(167, 139, 250, 0.1);
}

.doc {
  max-width: var(--content-max-width);
  min-width: 0;
}

.doc-header {
  margin-bottom: 3rem;
}

.doc-title {
  font-size: clamp(2.25rem, 5vw, 3rem);
  font-weight: 700;
  letter-spacing: -0.02em;
  scroll-margin-top: 5rem;
}

.doc-description {
  margin-top: 1rem;
  font-size: 1.25rem;
  font-weight: 300;
  color: var(--muted-foreground);
}

/* Markdown content */
.doc-h1 { font-size: 1.875rem; font-weight: 700; margin: 3rem 0 1.5rem; }
.doc-h2 { font-size: 1.5rem; font-weight: 700; margin: 4rem 0 1.5rem; padding-bottom: 0.5rem; border-bottom: 1px solid var(--border); }
.doc-h3 { font-size: 1.25rem; font-weight: 700; margin: 2.5rem 0 1rem; }
.doc-p { line-height: 1.75; color: var(--muted-foreground); margin-bottom: 1.5rem; }
.doc-ul,
.doc-ol { margin: 1.5rem 0 1.5rem 1.5rem; color: var(--muted-foreground); }
.doc-ul { list-style: disc; }
.doc-ol { list-style: decimal; }
.doc-li { padding-left: 0.5rem; }
.doc-li + .doc-li { margin-top: 0.5rem; }

.doc-table-scroll {
  margin: 2rem 0;
  width: 100%;
  overflow-x: auto;
  border: 1px solid var(--border);
  border-radius: 0.75rem;
}

.doc-table { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
.doc-thead { background: rgba(24, 24, 27, 0.5); }
.doc-th { border-bottom: 1px solid var(--border); padding: 0.75rem 1rem; text-align: left; font-weight: 700; }
.doc-td { border-bottom: 1px solid var(--border); padding: 0.75rem 1rem; color: var(--muted-foreground); }

.doc-code {
  border-radius: 0.25rem;
  background: rgba(24, 24, 27, 0.5);
  padding: 0.125rem 0.375rem;
  font-family: var(--font-mono);
  font-size: 0.875rem;
  font-weight: 500;
  color: var(--foreground);
}

.doc-blockquote {
  border-left: 2px solid rgba(167, 139, 250, 0.2);
  padding-left: 1.5rem;
  font-style: italic;
  color: var(--muted-foreground);
  margin: 2rem 0;
}

.markdown-content a {
  color: var(--primary);
  text-decoration: underline;
}

.markdown-content img {
  max-width: 100%;
}

/* Code block presenter */
.code-block {
  margin: 2rem 0;
  border: 1px solid var(--border);
  border-radius: 1rem;
  background: rgba(24, 24, 27, 0.3);
  padding: 0.25rem;
  overflow: hidden;
}

.code-block-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.5rem 1rem;
  background: rgba(24, 24, 27, 0.5);
  border-bottom: 1px solid var(--border);
}

.code-block-label {
  font-family: var(--font-mono);
  font-size: 0.625rem;
  letter-spacing: 0.15em;
  color: rgba(161, 161, 170, 0.6);
}

.copy-btn {
  background: none;
  border: none;
  border-radius: 0.375rem;
  padding: 0.25rem 0.5rem;
  font-size: 0.75rem;
  color: var(--muted-foreground);
  cursor: pointer;
}

.copy-btn:hover {
  background: rgba(167, 139, 250, 0.1);
}

.copy-btn .copy-done,
.copy-btn[data-copied="true"] .copy-idle {
  display: none;
}

.copy-btn[data-copied="true"] .copy-done {
  display: inline;
  color: #22c55e;
}

.code-block-body {
  padding: 1.5rem;
  overflow-x: auto;
}

.code-block-body code {
  font-family: var(--font-mono);
  font-size: 0.875rem;
  line-height: 1.7;
}

/* Not found */
.not-found {
  padding: 12rem 1rem 8rem;
  text-align: center;
}

.not-found h1 {
  font-size: 4rem;
}

.not-found p {
  color: var(--muted-foreground);
  margin: 1rem 0 2rem;
}

@media (max-width: 1024px) {
  .docs-layout {
    grid-template-columns: var(--sidebar-width) minmax(0, 1fr);
  }

  .toc {
    display: none;
  }
}

@media (max-width: 768px) {
  .navbar-links,
  .navbar-github,
  .navbar-right .btn {
    display: none;
  }

  .menu-btn,
  .docs-menu-btn {
    display: block;
  }

  .docs-layout {
    grid-template-columns: minmax(0, 1fr);
  }

  .docs-sidebar {
    display: none;
  }

  .code-preview-card,
  .feature-grid,
  .installation,
  .download-grid {
    grid-template-columns: 1fr;
  }

  .code-preview-text {
    border-right: none;
    border-bottom: 1px solid var(--border);
  }
}
"#;

const DEFAULT_JS: &str = r#"// Victoria site runtime
(function() {
  'use strict';

  const COPY_REVERT_MS = __COPY_REVERT_MS__;

  // Menu toggles: a button's data-toggle names the element to open
  document.querySelectorAll('[data-toggle]').forEach(btn => {
    const target = document.getElementById(btn.getAttribute('data-toggle'));
    if (!target) return;

    btn.addEventListener('click', () => {
      target.classList.toggle('open');
    });

    target.querySelectorAll('a').forEach(link => {
      link.addEventListener('click', () => target.classList.remove('open'));
    });
  });

  // Copy buttons on framed code blocks. Each click restarts the revert
  // timer, so the indicator stays on until COPY_REVERT_MS after the last one.
  document.querySelectorAll('.code-block').forEach(block => {
    const btn = block.querySelector('.copy-btn');
    const code = block.querySelector('pre code');
    if (!btn || !code) return;

    let timer = null;

    btn.addEventListener('click', () => {
      const text = code.textContent || '';
      if (navigator.clipboard) {
        navigator.clipboard.writeText(text).catch(() => {});
      }

      btn.setAttribute('data-copied', 'true');
      if (timer !== null) {
        clearTimeout(timer);
      }
      timer = setTimeout(() => {
        btn.setAttribute('data-copied', 'false');
        timer = null;
      }, COPY_REVERT_MS);
    });
  });
})();
"#;
