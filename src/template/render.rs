// src/template/render.rs
//! Render tree produced by templates, plus text and Typst serializers

use crate::types::TemplateKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Page,
    Columns,
    Column,
    Section,
    Entry,
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Normal,
    Strong,
    Emphasis,
    Muted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderNode {
    Block {
        role: BlockRole,
        children: Vec<RenderNode>,
    },
    Heading {
        level: u8,
        text: String,
    },
    Text {
        text: String,
        style: TextStyle,
    },
    Link {
        label: String,
        target: Option<String>,
    },
    List(Vec<RenderNode>),
    Tags(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub template: TemplateKind,
    pub root: RenderNode,
}

// ===== Builders =====

pub fn block(role: BlockRole, children: Vec<RenderNode>) -> RenderNode {
    RenderNode::Block { role, children }
}

pub fn section(title: &str, children: Vec<RenderNode>) -> RenderNode {
    let mut nodes = Vec::with_capacity(children.len() + 1);
    nodes.push(heading(2, title));
    nodes.extend(children);
    block(BlockRole::Section, nodes)
}

pub fn entry(children: Vec<RenderNode>) -> RenderNode {
    block(BlockRole::Entry, children)
}

pub fn heading(level: u8, text: impl Into<String>) -> RenderNode {
    RenderNode::Heading {
        level,
        text: text.into(),
    }
}

pub fn styled(text: impl Into<String>, style: TextStyle) -> RenderNode {
    RenderNode::Text {
        text: text.into(),
        style,
    }
}

pub fn text(value: impl Into<String>) -> RenderNode {
    styled(value, TextStyle::Normal)
}

/// Push a text node for an optional, non-blank value
pub fn push_opt(nodes: &mut Vec<RenderNode>, value: Option<&str>, style: TextStyle) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        nodes.push(styled(value, style));
    }
}

// ===== Plain Text =====

impl RenderTree {
    pub fn to_plain_text(&self) -> String {
        let mut lines = Vec::new();
        plain_lines(&self.root, &mut lines);
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Typst markup for the tree, without page setup
    pub fn to_typst(&self) -> String {
        let mut out = String::new();
        typst_node(&self.root, &mut out);
        out
    }
}

fn plain_lines(node: &RenderNode, lines: &mut Vec<String>) {
    match node {
        RenderNode::Block { role, children } => {
            if *role == BlockRole::Inline {
                let parts: Vec<String> = children.iter().map(inline_text).collect();
                lines.push(parts.join(" | "));
                return;
            }
            if *role == BlockRole::Section && !lines.is_empty() {
                lines.push(String::new());
            }
            for child in children {
                plain_lines(child, lines);
            }
        }
        RenderNode::Heading { level, text } => match level {
            1 => lines.push(text.to_uppercase()),
            _ => lines.push(format!("== {} ==", text.to_uppercase())),
        },
        RenderNode::List(items) => {
            for item in items {
                lines.push(format!("- {}", inline_text(item)));
            }
        }
        other => lines.push(inline_text(other)),
    }
}

fn inline_text(node: &RenderNode) -> String {
    match node {
        RenderNode::Text { text, .. } => text.clone(),
        RenderNode::Heading { text, .. } => text.clone(),
        RenderNode::Link { label, target } => match target {
            Some(target) if target != label => format!("{} <{}>", label, target),
            _ => label.clone(),
        },
        RenderNode::Tags(tags) => format!("[{}]", tags.join(", ")),
        RenderNode::List(items) => items.iter().map(inline_text).collect::<Vec<_>>().join(", "),
        RenderNode::Block { children, .. } => {
            children.iter().map(inline_text).collect::<Vec<_>>().join(" ")
        }
    }
}

// ===== Typst =====

/// Escape characters with markup meaning in Typst content
pub fn escape_typst(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(
            c,
            '\\' | '#' | '*' | '_' | '$' | '@' | '<' | '>' | '[' | ']' | '`' | '=' | '-' | '+' | '/' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn escape_typst_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn typst_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Block { role, children } => match role {
            BlockRole::Columns => {
                out.push_str("#grid(columns: (1fr, 2.4fr), gutter: 1.5em,\n");
                for child in children {
                    out.push_str("[\n");
                    typst_node(child, out);
                    out.push_str("],\n");
                }
                out.push_str(")\n");
            }
            BlockRole::Inline => {
                let parts: Vec<String> = children.iter().map(typst_inline).collect();
                out.push_str(&parts.join(" | "));
                out.push_str("\n\n");
            }
            BlockRole::Entry => {
                out.push_str("#block(below: 0.9em)[\n");
                for child in children {
                    typst_node(child, out);
                }
                out.push_str("]\n");
            }
            _ => {
                for child in children {
                    typst_node(child, out);
                }
            }
        },
        RenderNode::Heading { level, text } => {
            out.push_str(&"=".repeat((*level).max(1) as usize));
            out.push(' ');
            out.push_str(&escape_typst(text));
            out.push_str("\n\n");
        }
        RenderNode::List(items) => {
            for item in items {
                out.push_str("- ");
                out.push_str(&typst_inline(item));
                out.push('\n');
            }
            out.push('\n');
        }
        other => {
            out.push_str(&typst_inline(other));
            out.push_str("\n\n");
        }
    }
}

fn typst_inline(node: &RenderNode) -> String {
    match node {
        RenderNode::Text { text, style } => {
            let escaped = escape_typst(text);
            match style {
                TextStyle::Normal => escaped,
                TextStyle::Strong => format!("*{}*", escaped),
                TextStyle::Emphasis => format!("_{}_", escaped),
                TextStyle::Muted => format!("#text(fill: gray)[{}]", escaped),
            }
        }
        RenderNode::Heading { text, .. } => format!("*{}*", escape_typst(text)),
        RenderNode::Link { label, target } => match target {
            Some(target) => format!(
                "#link(\"{}\")[{}]",
                escape_typst_string(target),
                escape_typst(label)
            ),
            None => escape_typst(label),
        },
        RenderNode::Tags(tags) => tags
            .iter()
            .map(|tag| format!("#box(inset: 2pt, fill: luma(235))[{}]", escape_typst(tag)))
            .collect::<Vec<_>>()
            .join(" "),
        RenderNode::List(items) => items.iter().map(typst_inline).collect::<Vec<_>>().join(", "),
        RenderNode::Block { children, .. } => {
            children.iter().map(typst_inline).collect::<Vec<_>>().join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> RenderTree {
        RenderTree {
            template: TemplateKind::Template1,
            root: block(
                BlockRole::Page,
                vec![
                    heading(1, "Jane Doe"),
                    block(
                        BlockRole::Inline,
                        vec![
                            text("555"),
                            RenderNode::Link {
                                label: "GitHub @jane".to_string(),
                                target: Some("https://github.com/jane".to_string()),
                            },
                        ],
                    ),
                    section(
                        "Skills",
                        vec![RenderNode::List(vec![text("Rust (Expert)"), text("Go (Beginner)")])],
                    ),
                    section(
                        "Projects",
                        vec![entry(vec![
                            styled("cvdraft", TextStyle::Strong),
                            RenderNode::Tags(vec!["Rust".to_string(), "SQLite".to_string()]),
                        ])],
                    ),
                ],
            ),
        }
    }

    #[test]
    fn test_plain_text_layout() {
        let text = tree().to_plain_text();
        let expected = "JANE DOE\n\
                        555 | GitHub @jane <https://github.com/jane>\n\
                        \n\
                        == SKILLS ==\n\
                        - Rust (Expert)\n\
                        - Go (Beginner)\n\
                        \n\
                        == PROJECTS ==\n\
                        cvdraft\n\
                        [Rust, SQLite]\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_typst_output_escapes_markup() {
        assert_eq!(escape_typst("C# & *bold*"), "C\\# & \\*bold\\*");
        assert_eq!(escape_typst("a@b.com"), "a\\@b.com");

        let typst = tree().to_typst();
        assert!(typst.starts_with("= Jane Doe\n"));
        assert!(typst.contains("== Skills"));
        assert!(typst.contains("- Rust (Expert)"));
        assert!(typst.contains("#link(\"https://github.com/jane\")[GitHub \\@jane]"));
        assert!(typst.contains("*cvdraft*"));
    }

    #[test]
    fn test_push_opt_skips_blank_values() {
        let mut nodes = Vec::new();
        push_opt(&mut nodes, None, TextStyle::Normal);
        push_opt(&mut nodes, Some("  "), TextStyle::Normal);
        push_opt(&mut nodes, Some("x"), TextStyle::Muted);
        assert_eq!(nodes, vec![styled("x", TextStyle::Muted)]);
    }
}
