//! Rendering rule set: element kind to presentation.

use std::collections::HashMap;

/// Markdown element kinds that can carry a rendering override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Table,
    TableHead,
    TableHeaderCell,
    TableCell,
    InlineCode,
    FencedCode,
    BlockQuote,
    Preformatted,
}

/// How an element kind is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Render the element with a class
    Styled(&'static str),

    /// Wrap the element in a container; both get a class
    Wrapped {
        container: &'static str,
        class: &'static str,
    },

    /// Hand the element to the code block presenter
    Present,

    /// Drop the element and keep its children
    Transparent,
}

impl Rule {
    /// Class for the element itself, if the rule assigns one.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Rule::Styled(class) | Rule::Wrapped { class, .. } => Some(*class),
            Rule::Present | Rule::Transparent => None,
        }
    }
}

/// Dispatch table from element kind to rule.
///
/// Kinds without an entry render as standard HTML.
#[derive(Debug, Clone)]
pub struct RenderRules {
    rules: HashMap<ElementKind, Rule>,
}

impl RenderRules {
    /// An empty rule set; everything renders as standard HTML.
    pub fn plain() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Rule set used by the documentation pages.
    pub fn docs() -> Self {
        use ElementKind::*;

        let rules = HashMap::from([
            (Heading1, Rule::Styled("doc-h1")),
            (Heading2, Rule::Styled("doc-h2")),
            (Heading3, Rule::Styled("doc-h3")),
            (Paragraph, Rule::Styled("doc-p")),
            (UnorderedList, Rule::Styled("doc-ul")),
            (OrderedList, Rule::Styled("doc-ol")),
            (ListItem, Rule::Styled("doc-li")),
            (
                Table,
                Rule::Wrapped {
                    container: "doc-table-scroll",
                    class: "doc-table",
                },
            ),
            (TableHead, Rule::Styled("doc-thead")),
            (TableHeaderCell, Rule::Styled("doc-th")),
            (TableCell, Rule::Styled("doc-td")),
            (InlineCode, Rule::Styled("doc-code")),
            (FencedCode, Rule::Present),
            (BlockQuote, Rule::Styled("doc-blockquote")),
            (Preformatted, Rule::Transparent),
        ]);

        Self { rules }
    }

    pub fn get(&self, kind: ElementKind) -> Option<Rule> {
        self.rules.get(&kind).copied()
    }

    /// Class for an element kind, if its rule assigns one.
    pub fn class(&self, kind: ElementKind) -> Option<&'static str> {
        self.get(kind).and_then(|rule| rule.class())
    }
}

impl Default for RenderRules {
    fn default() -> Self {
        Self::docs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_rules_cover_every_kind() {
        use ElementKind::*;

        let rules = RenderRules::docs();

        for kind in [
            Heading1,
            Heading2,
            Heading3,
            Paragraph,
            UnorderedList,
            OrderedList,
            ListItem,
            Table,
            TableHead,
            TableHeaderCell,
            TableCell,
            InlineCode,
            FencedCode,
            BlockQuote,
            Preformatted,
        ] {
            assert!(rules.get(kind).is_some(), "missing rule for {:?}", kind);
        }
    }

    #[test]
    fn headings_are_distinct() {
        let rules = RenderRules::docs();

        let h1 = rules.class(ElementKind::Heading1);
        let h2 = rules.class(ElementKind::Heading2);
        let h3 = rules.class(ElementKind::Heading3);

        assert_ne!(h1, h2);
        assert_ne!(h2, h3);
        assert_ne!(h1, h3);
    }

    #[test]
    fn plain_rules_are_empty() {
        let rules = RenderRules::plain();

        assert_eq!(rules.get(ElementKind::FencedCode), None);
        assert_eq!(rules.class(ElementKind::Paragraph), None);
    }
}
