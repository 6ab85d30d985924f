//! Markdown documentation content for the Victoria website.
//!
//! This crate loads markdown files with YAML front-matter from a content
//! directory, and renders their bodies into a presentation tree whose fenced
//! code blocks are framed with a copy-to-clipboard header.

pub mod codeblock;
pub mod frontmatter;
pub mod loader;
pub mod node;
pub mod render;
pub mod rules;

pub use codeblock::{CodeBlock, CodeBlockPresenter, CopyIndicator, COPY_REVERT};
pub use frontmatter::{split_front_matter, FrontMatterError, MetaValue, Metadata};
pub use loader::{ContentError, DocStore, DocSummary, Document};
pub use node::{Element, Node};
pub use render::{MarkdownRenderer, Rendered, TocEntry};
pub use rules::{ElementKind, RenderRules, Rule};
