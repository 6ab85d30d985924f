//! Markdown to presentation tree.

use std::collections::HashSet;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use serde::Serialize;

use crate::codeblock::{fence_class, CodeBlock};
use crate::node::{Element, Node};
use crate::rules::{ElementKind, RenderRules, Rule};

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Output of rendering one markdown body.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// Top-level presentation nodes
    pub nodes: Vec<Node>,

    /// Headings in document order
    pub toc: Vec<TocEntry>,

    /// Every block handed to the code block presenter, in order
    pub code_blocks: Vec<CodeBlock>,
}

impl Rendered {
    /// Serialize the node tree to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }
}

/// Markdown renderer applying a [`RenderRules`] dispatch table.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    rules: RenderRules,
}

impl MarkdownRenderer {
    pub fn new(rules: RenderRules) -> Self {
        Self { rules }
    }

    /// Parser extensions: tables plus the usual GitHub additions.
    pub fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }

    /// Render a markdown body.
    pub fn render(&self, markdown: &str) -> Rendered {
        let mut builder = TreeBuilder::new(&self.rules);

        for event in Parser::new_ext(markdown, Self::options()) {
            builder.event(event);
        }

        builder.finish()
    }
}

/// An element under construction.
enum Frame {
    Element(Element),
    Heading { level: u8, children: Vec<Node> },
    Code { class: Option<String>, text: String },
    Table { head: Option<Node>, rows: Vec<Node> },
    TableHead { cells: Vec<Node> },
    TableRow { cells: Vec<Node> },
    TableCell { children: Vec<Node> },
    Image { src: String, title: String, alt: String },
    Transparent(Vec<Node>),
}

struct TreeBuilder<'r> {
    rules: &'r RenderRules,
    stack: Vec<Frame>,
    root: Vec<Node>,
    toc: Vec<TocEntry>,
    code_blocks: Vec<CodeBlock>,
    heading_ids: HashSet<String>,
    in_table_head: bool,
}

impl<'r> TreeBuilder<'r> {
    fn new(rules: &'r RenderRules) -> Self {
        Self {
            rules,
            stack: Vec::new(),
            root: Vec::new(),
            toc: Vec::new(),
            code_blocks: Vec::new(),
            heading_ids: HashSet::new(),
            in_table_head: false,
        }
    }

    fn finish(mut self) -> Rendered {
        // Unbalanced input should not happen, but never drop content.
        while !self.stack.is_empty() {
            self.end();
        }

        Rendered {
            nodes: self.root,
            toc: self.toc,
            code_blocks: self.code_blocks,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => self.append(Node::Text(text.to_string())),
            Event::Code(code) => {
                let pill = Element::new("code")
                    .class(self.rules.class(ElementKind::InlineCode))
                    .child(Node::Text(code.to_string()));
                self.append(pill.into());
            }
            // Raw HTML is shown, not interpreted.
            Event::Html(html) | Event::InlineHtml(html) => {
                self.append(Node::Text(html.to_string()))
            }
            Event::SoftBreak => self.append(Node::Text("\n".to_string())),
            Event::HardBreak => self.append(Element::new("br").into()),
            Event::Rule => self.append(Element::new("hr").into()),
            Event::FootnoteReference(label) => {
                let link = Element::new("a")
                    .attr("href", format!("#fn-{}", label))
                    .child(Node::Text(label.to_string()));
                let sup = Element::new("sup")
                    .attr("class", "footnote-reference")
                    .child(link.into());
                self.append(sup.into());
            }
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("input")
                    .attr("type", "checkbox")
                    .attr("disabled", "");
                if checked {
                    input = input.attr("checked", "");
                }
                self.append(input.into());
            }
            _ => {}
        }
    }

    fn styled(&self, tag: &'static str, kind: ElementKind) -> Frame {
        Frame::Element(Element::new(tag).class(self.rules.class(kind)))
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => self.styled("p", ElementKind::Paragraph),
            Tag::Heading { level, .. } => Frame::Heading {
                level: level as u8,
                children: Vec::new(),
            },
            Tag::BlockQuote(_) => self.styled("blockquote", ElementKind::BlockQuote),
            Tag::CodeBlock(kind) => Frame::Code {
                class: match kind {
                    CodeBlockKind::Fenced(info) => fence_class(&info),
                    CodeBlockKind::Indented => None,
                },
                text: String::new(),
            },
            Tag::List(Some(start)) => {
                let mut list =
                    Element::new("ol").class(self.rules.class(ElementKind::OrderedList));
                if start != 1 {
                    list = list.attr("start", start.to_string());
                }
                Frame::Element(list)
            }
            Tag::List(None) => self.styled("ul", ElementKind::UnorderedList),
            Tag::Item => self.styled("li", ElementKind::ListItem),
            Tag::FootnoteDefinition(label) => {
                let marker = Element::new("sup")
                    .attr("class", "footnote-label")
                    .child(Node::Text(label.to_string()));
                Frame::Element(
                    Element::new("div")
                        .attr("class", "footnote-definition")
                        .attr("id", format!("fn-{}", label))
                        .child(marker.into()),
                )
            }
            Tag::Table(_) => Frame::Table {
                head: None,
                rows: Vec::new(),
            },
            Tag::TableHead => {
                self.in_table_head = true;
                Frame::TableHead { cells: Vec::new() }
            }
            Tag::TableRow => Frame::TableRow { cells: Vec::new() },
            Tag::TableCell => Frame::TableCell {
                children: Vec::new(),
            },
            Tag::Emphasis => Frame::Element(Element::new("em")),
            Tag::Strong => Frame::Element(Element::new("strong")),
            Tag::Strikethrough => Frame::Element(Element::new("del")),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = Element::new("a").attr("href", dest_url.to_string());
                if !title.is_empty() {
                    link = link.attr("title", title.to_string());
                }
                Frame::Element(link)
            }
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                src: dest_url.to_string(),
                title: title.to_string(),
                alt: String::new(),
            },
            _ => Frame::Transparent(Vec::new()),
        };

        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        let nodes = match frame {
            Frame::Element(el) => vec![el.into()],
            Frame::Heading { level, children } => vec![self.heading(level, children)],
            Frame::Code { class, text } => self.code_block(class, text),
            Frame::Table { head, rows } => vec![self.table(head, rows)],
            Frame::TableHead { cells } => {
                self.in_table_head = false;
                vec![self.table_head(cells)]
            }
            Frame::TableRow { cells } => vec![Element::new("tr").children(cells).into()],
            Frame::TableCell { children } => {
                let (tag, kind) = if self.in_table_head {
                    ("th", ElementKind::TableHeaderCell)
                } else {
                    ("td", ElementKind::TableCell)
                };
                vec![Element::new(tag)
                    .class(self.rules.class(kind))
                    .children(children)
                    .into()]
            }
            Frame::Image { src, title, alt } => {
                let mut img = Element::new("img").attr("src", src).attr("alt", alt);
                if !title.is_empty() {
                    img = img.attr("title", title);
                }
                vec![img.into()]
            }
            Frame::Transparent(children) => children,
        };

        for node in nodes {
            self.append(node);
        }
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => self.root.push(node),
            Some(Frame::Element(el)) => el.children.push(node),
            Some(Frame::Heading { children, .. })
            | Some(Frame::TableCell { children })
            | Some(Frame::Transparent(children)) => children.push(node),
            Some(Frame::Code { text, .. }) => text.push_str(&node.text_content()),
            Some(Frame::Table { head, rows }) => {
                if node.as_element().is_some_and(|el| el.tag == "thead") {
                    *head = Some(node);
                } else {
                    rows.push(node);
                }
            }
            Some(Frame::TableHead { cells }) | Some(Frame::TableRow { cells }) => cells.push(node),
            Some(Frame::Image { alt, .. }) => alt.push_str(&node.text_content()),
        }
    }

    fn heading(&mut self, level: u8, children: Vec<Node>) -> Node {
        let title: String = children.iter().map(Node::text_content).collect();
        let id = self.unique_id(slugify(&title));

        self.toc.push(TocEntry {
            title,
            id: id.clone(),
            level,
        });

        let (tag, kind) = match level {
            1 => ("h1", Some(ElementKind::Heading1)),
            2 => ("h2", Some(ElementKind::Heading2)),
            3 => ("h3", Some(ElementKind::Heading3)),
            4 => ("h4", None),
            5 => ("h5", None),
            _ => ("h6", None),
        };

        Element::new(tag)
            .attr("id", id)
            .class(kind.and_then(|k| self.rules.class(k)))
            .children(children)
            .into()
    }

    fn code_block(&mut self, class: Option<String>, text: String) -> Vec<Node> {
        if self.rules.get(ElementKind::FencedCode) == Some(Rule::Present) {
            let block = CodeBlock::from_fence(class.as_deref(), &text);
            self.code_blocks.push(block.clone());
            return vec![Node::Code(block)];
        }

        let code: Node = Element::new("code")
            .class(class.as_deref())
            .child(Node::Text(text))
            .into();

        match self.rules.get(ElementKind::Preformatted) {
            Some(Rule::Transparent) => vec![code],
            rule => vec![Element::new("pre")
                .class(rule.and_then(|r| r.class()))
                .child(code)
                .into()],
        }
    }

    fn table_head(&self, cells: Vec<Node>) -> Node {
        let has_rows = cells
            .iter()
            .any(|n| n.as_element().is_some_and(|el| el.tag == "tr"));
        let head = Element::new("thead").class(self.rules.class(ElementKind::TableHead));

        if has_rows {
            head.children(cells).into()
        } else {
            head.child(Element::new("tr").children(cells).into()).into()
        }
    }

    fn table(&self, head: Option<Node>, rows: Vec<Node>) -> Node {
        let mut table = Element::new("table");
        if let Some(head) = head {
            table = table.child(head);
        }
        if !rows.is_empty() {
            table = table.child(Element::new("tbody").children(rows).into());
        }

        match self.rules.get(ElementKind::Table) {
            Some(Rule::Wrapped { container, class }) => Element::new("div")
                .attr("class", container)
                .child(table.attr("class", class).into())
                .into(),
            Some(rule) => table.class(rule.class()).into(),
            None => table.into(),
        }
    }

    /// Deduplicate heading anchors: `setup`, `setup-1`, `setup-2`.
    ///
    /// Suffixed ids are claimed too, so a later `Setup 1` heading skips to
    /// the next free suffix instead of repeating `setup-1`.
    fn unique_id(&mut self, base: String) -> String {
        let base = if base.is_empty() {
            "section".to_string()
        } else {
            base
        };

        let mut id = base.clone();
        let mut suffix = 0;
        while self.heading_ids.contains(&id) {
            suffix += 1;
            id = format!("{}-{}", base, suffix);
        }

        self.heading_ids.insert(id.clone());
        id
    }
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> Rendered {
        MarkdownRenderer::default().render(markdown)
    }

    fn find_all<'a>(nodes: &'a [Node], tag: &str, found: &mut Vec<&'a Element>) {
        for node in nodes {
            if let Node::Element(el) = node {
                if el.tag == tag {
                    found.push(el);
                }
                find_all(&el.children, tag, found);
            }
        }
    }

    fn elements<'a>(rendered: &'a Rendered, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        find_all(&rendered.nodes, tag, &mut found);
        found
    }

    #[test]
    fn fenced_block_goes_to_presenter() {
        let rendered = render("```go\nfmt.Println(1)\n```\n");

        assert_eq!(
            rendered.code_blocks,
            vec![CodeBlock {
                language: Some("go".to_string()),
                code: "fmt.Println(1)".to_string(),
            }]
        );
        assert_eq!(rendered.nodes, vec![Node::Code(rendered.code_blocks[0].clone())]);
    }

    #[test]
    fn fence_without_language_uses_placeholder() {
        let rendered = render("```\nplain text\n```\n");

        assert_eq!(rendered.code_blocks.len(), 1);
        assert_eq!(rendered.code_blocks[0].language, None);
        assert!(rendered.to_html().contains(">TEXT</span>"));
    }

    #[test]
    fn preformatted_wrapper_is_suppressed() {
        let html = render("```vc\nlet x = 1\n```\n").to_html();

        // Only the presenter's own <pre> is emitted.
        assert_eq!(html.matches("<pre").count(), 1);
        assert!(html.starts_with(r#"<div class="code-block">"#));
    }

    #[test]
    fn inline_code_is_a_pill() {
        let html = render("Use `print` here.").to_html();

        assert_eq!(
            html,
            r#"<p class="doc-p">Use <code class="doc-code">print</code> here.</p>"#
        );
    }

    #[test]
    fn table_is_wrapped_once() {
        let rendered = render(
            "| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |\n",
        );

        assert_eq!(rendered.nodes.len(), 1);
        let wrapper = rendered.nodes[0].as_element().unwrap();
        assert_eq!(wrapper.tag, "div");
        assert_eq!(wrapper.get_attr("class"), Some("doc-table-scroll"));

        let tables: Vec<_> = wrapper.child_elements().collect();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].tag, "table");

        let th = elements(&rendered, "th");
        let td = elements(&rendered, "td");
        assert_eq!(th.len(), 3);
        assert_eq!(td.len(), 6);
        assert!(th.iter().all(|c| c.get_attr("class") == Some("doc-th")));
        assert!(td.iter().all(|c| c.get_attr("class") == Some("doc-td")));
        assert_eq!(elements(&rendered, "thead").len(), 1);
        assert_eq!(elements(&rendered, "tbody").len(), 1);

        let html = rendered.to_html();
        assert_eq!(html.matches("doc-table-scroll").count(), 1);
    }

    #[test]
    fn single_column_table_is_wrapped_once() {
        let rendered = render("| Only |\n|------|\n| one |\n");

        assert_eq!(rendered.to_html().matches("doc-table-scroll").count(), 1);
        assert_eq!(elements(&rendered, "th").len(), 1);
        assert_eq!(elements(&rendered, "td").len(), 1);
    }

    #[test]
    fn headings_get_classes_ids_and_toc() {
        let rendered = render("# Intro\n\n## Setup\n\n### Setup\n\n#### Deep\n\n## Setup\n");

        let html = rendered.to_html();
        assert!(html.contains(r#"<h1 id="intro" class="doc-h1">Intro</h1>"#));
        assert!(html.contains(r#"<h2 id="setup" class="doc-h2">Setup</h2>"#));
        assert!(html.contains(r#"<h3 id="setup-1" class="doc-h3">Setup</h3>"#));
        assert!(html.contains(r#"<h4 id="deep">Deep</h4>"#));
        assert!(html.contains(r#"<h2 id="setup-2" class="doc-h2">Setup</h2>"#));

        let levels: Vec<u8> = rendered.toc.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 2]);
        assert_eq!(rendered.toc[0].title, "Intro");
    }

    #[test]
    fn heading_ids_never_repeat() {
        let rendered = render("## Setup\n\n## Setup\n\n## Setup 1\n\n## Setup 1\n");

        let ids: Vec<&str> = rendered.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-1-1", "setup-1-2"]);

        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn lists_and_blockquotes_are_styled() {
        let html = render("- a\n- b\n\n3. c\n\n> quoted\n").to_html();

        assert!(html.contains(r#"<ul class="doc-ul"><li class="doc-li">a</li>"#));
        assert!(html.contains(r#"<ol class="doc-ol" start="3"><li class="doc-li">c</li></ol>"#));
        assert!(html.contains(r#"<blockquote class="doc-blockquote"><p class="doc-p">quoted</p></blockquote>"#));
    }

    #[test]
    fn standard_inline_markdown_is_kept() {
        let html = render("*em* **strong** ~~gone~~ [link](/docs/x \"X\") ![alt *text*](/a.png)")
            .to_html();

        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains(r#"<a href="/docs/x" title="X">link</a>"#));
        assert!(html.contains(r#"<img src="/a.png" alt="alt text">"#));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render("<script>alert(1)</script>\n").to_html();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn task_lists_render_checkboxes() {
        let html = render("- [x] done\n- [ ] todo\n").to_html();

        assert!(html.contains(r#"<input type="checkbox" disabled="" checked="">"#));
        assert_eq!(html.matches("type=\"checkbox\"").count(), 2);
    }

    #[test]
    fn plain_rules_render_standard_html() {
        let renderer = MarkdownRenderer::new(RenderRules::plain());

        let rendered = renderer.render("# Title\n\n```rust\nfn main() {}\n```\n");

        assert!(rendered.code_blocks.is_empty());
        assert_eq!(
            rendered.to_html(),
            "<h1 id=\"title\">Title</h1><pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("Button (Primary)"), "button-primary");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }
}
