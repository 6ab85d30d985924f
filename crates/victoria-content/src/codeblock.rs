//! Fenced code blocks and their framed, copyable presentation.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::node::escape_html;

/// How long the "copied" indicator stays visible after a click.
pub const COPY_REVERT: Duration = Duration::from_millis(2000);

/// Header label used when a block has no language tag.
pub const PLACEHOLDER_LABEL: &str = "text";

static LANGUAGE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"language-(\w+)").expect("language class pattern is valid"));

/// A code block handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language identifier from the fence, e.g. `go`
    pub language: Option<String>,

    /// Block text with the trailing newline removed
    pub code: String,
}

impl CodeBlock {
    /// Build a block from a fence class and the raw fenced text.
    ///
    /// Exactly one trailing newline is dropped; everything else is kept.
    pub fn from_fence(class: Option<&str>, text: &str) -> Self {
        Self {
            language: class.and_then(language_from_class),
            code: text.strip_suffix('\n').unwrap_or(text).to_string(),
        }
    }

    /// Uppercased header label.
    pub fn label(&self) -> String {
        self.language
            .as_deref()
            .unwrap_or(PLACEHOLDER_LABEL)
            .to_uppercase()
    }
}

/// Class attached to a fenced block's `<code>` element, e.g. `language-go`.
///
/// Only the first word of the info string is used.
pub fn fence_class(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .map(|lang| format!("language-{}", lang))
}

/// Extract the language name from a `language-xxx` class.
pub fn language_from_class(class: &str) -> Option<String> {
    LANGUAGE_CLASS
        .captures(class)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Renders code blocks as a bordered frame with a label and copy button.
pub struct CodeBlockPresenter;

impl CodeBlockPresenter {
    /// Render a block to HTML.
    pub fn render(block: &CodeBlock) -> String {
        let mut out = String::new();
        Self::render_into(block, &mut out);
        out
    }

    /// Render a block, appending to `out`.
    pub fn render_into(block: &CodeBlock, out: &mut String) {
        out.push_str(r#"<div class="code-block">"#);
        out.push_str(r#"<div class="code-block-header"><span class="code-block-label">"#);
        escape_html(out, &block.label());
        out.push_str("</span>");
        out.push_str(
            r#"<button type="button" class="copy-btn" aria-label="Copy code" data-copied="false">"#,
        );
        out.push_str(r#"<span class="copy-idle">Copy</span><span class="copy-done">Copied</span>"#);
        out.push_str("</button></div>");

        out.push_str(r#"<pre class="code-block-body"><code"#);
        if let Some(lang) = &block.language {
            out.push_str(r#" class="language-"#);
            escape_html(out, lang);
            out.push('"');
        }
        out.push('>');
        escape_html(out, &block.code);
        out.push_str("</code></pre></div>");
    }
}

/// State of a code block's "copied" indicator.
///
/// Each click shows the indicator and schedules it to revert after
/// [`COPY_REVERT`]. A click inside the window restarts it, so the last click
/// always wins. The browser runtime in `main.js` follows the same rules.
#[derive(Debug, Clone, Copy)]
pub struct CopyIndicator {
    revert_after: Duration,
    copied_until: Option<Instant>,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::with_revert(COPY_REVERT)
    }

    pub fn with_revert(revert_after: Duration) -> Self {
        Self {
            revert_after,
            copied_until: None,
        }
    }

    /// Record a copy click at `now`.
    pub fn click(&mut self, now: Instant) {
        self.copied_until = Some(now + self.revert_after);
    }

    /// Whether the indicator shows "copied" at `now`.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_until.is_some_and(|until| now < until)
    }

    /// When the indicator reverts, if it is pending.
    pub fn reverts_at(&self) -> Option<Instant> {
        self.copied_until
    }
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new()
    }
}
