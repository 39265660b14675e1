//! Deterministic writer for the YAML subset
//!
//! Layout rules:
//! - block mappings nest by two spaces
//! - a block sequence under a mapping key sits at the key's own indentation
//! - a mapping inside a sequence item starts on the `- ` line
//! - flow-styled mappings, empty collections and scalars are written inline

use crate::node::{format_float, Mapping, Node, Scalar, Style};

/// Render a document. Output always ends with a newline.
pub fn to_string(node: &Node) -> String {
    let mut out = String::new();
    match node {
        Node::Mapping(m) if is_block(node) => write_mapping(&mut out, m, 0),
        Node::Sequence(items) if is_block(node) => write_sequence(&mut out, items, 0),
        other => {
            out.push_str(&inline(other));
            out.push('\n');
        }
    }
    out
}

fn is_block(node: &Node) -> bool {
    match node {
        Node::Mapping(m) => m.style() == Style::Block && !m.is_empty(),
        Node::Sequence(items) => !items.is_empty(),
        Node::Scalar(_) => false,
    }
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn write_mapping(out: &mut String, mapping: &Mapping, indent: usize) {
    for (key, value) in mapping.iter() {
        pad(out, indent);
        out.push_str(&render_str(key));
        out.push(':');
        match value {
            Node::Mapping(m) if is_block(value) => {
                out.push('\n');
                write_mapping(out, m, indent + 2);
            }
            Node::Sequence(items) if is_block(value) => {
                out.push('\n');
                write_sequence(out, items, indent);
            }
            other => {
                out.push(' ');
                out.push_str(&inline(other));
                out.push('\n');
            }
        }
    }
}

fn write_sequence(out: &mut String, items: &[Node], indent: usize) {
    for item in items {
        pad(out, indent);
        out.push('-');
        if is_block(item) {
            // Render the nested block one level in, then hoist its first
            // line onto the dash.
            let mut nested = String::new();
            match item {
                Node::Mapping(m) => write_mapping(&mut nested, m, indent + 2),
                Node::Sequence(inner) => write_sequence(&mut nested, inner, indent + 2),
                Node::Scalar(_) => unreachable!("scalars are never block nodes"),
            }
            out.push(' ');
            out.push_str(&nested[indent + 2..]);
        } else {
            out.push(' ');
            out.push_str(&inline(item));
            out.push('\n');
        }
    }
}

fn inline(node: &Node) -> String {
    match node {
        Node::Scalar(s) => render_scalar(s),
        Node::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(inline).collect();
            format!("[{}]", parts.join(", "))
        }
        Node::Mapping(m) => {
            let parts: Vec<String> = m
                .iter()
                .map(|(k, v)| format!("{}: {}", render_str(k), inline(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn render_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => format_float(*f),
        Scalar::Str(s) => render_str(s),
    }
}

fn render_str(s: &str) -> String {
    if needs_quotes(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

const INDICATORS: &[char] = &[
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

const RESERVED_WORDS: &[&str] = &[
    "~", "null", "Null", "NULL", "true", "True", "TRUE", "false", "False", "FALSE", "yes", "no",
    "on", "off",
];

/// Whether a string would read back as something else if written plain
fn needs_quotes(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    INDICATORS.contains(&first)
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.ends_with(':')
        || s.contains(": ")
        || s.contains(" #")
        || s.contains([',', '[', ']', '{', '}'])
        || s.chars().any(char::is_control)
        || RESERVED_WORDS.contains(&s)
        || !matches!(Scalar::from_plain(s), Scalar::Str(_))
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
