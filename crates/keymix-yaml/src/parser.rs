//! Reader for the YAML subset
//!
//! Each line's content is parsed with the pest grammar in `line.pest`; the
//! block structure is rebuilt from indentation here.

use crate::node::{Mapping, Node, Scalar};
use keymix_core::{KeymixError, Result};
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "line.pest"]
struct LineParser;

/// Parse a document. The input must not carry `%` directives or a `---`
/// document marker.
pub fn from_str(input: &str) -> Result<Node> {
    let lines = split_lines(input)?;
    if lines.is_empty() {
        return Err(KeymixError::parse(0, "empty document"));
    }

    let mut parser = BlockParser { lines, pos: 0 };
    let indent = parser.lines[0].indent;
    let node = parser.parse_block(indent)?;

    if let Some(line) = parser.lines.get(parser.pos) {
        return Err(KeymixError::parse(line.number, "unexpected content after document"));
    }
    Ok(node)
}

#[derive(Debug, Clone)]
struct Line {
    /// 1-based
    number: usize,
    indent: usize,
    text: String,
}

fn split_lines(input: &str) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        let raw = raw.trim_end();
        let text = raw.trim_start_matches(' ');
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        if text.starts_with('\t') {
            return Err(KeymixError::parse(i + 1, "tab character in indentation"));
        }
        lines.push(Line {
            number: i + 1,
            indent: raw.len() - text.len(),
            text: text.to_string(),
        });
    }
    Ok(lines)
}

fn is_sequence_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

enum Content {
    Pair(String, Option<Node>),
    Value(Node),
}

struct BlockParser {
    lines: Vec<Line>,
    pos: usize,
}

impl BlockParser {
    fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    /// Parse the node that starts at the current line, whose content begins
    /// at column `indent`.
    fn parse_block(&mut self, indent: usize) -> Result<Node> {
        let Some(line) = self.peek() else {
            return Ok(empty());
        };
        if is_sequence_item(&line.text) {
            return self.parse_sequence(indent);
        }
        match parse_content(line)? {
            Content::Pair(..) => self.parse_mapping(indent),
            Content::Value(node) => {
                self.pos += 1;
                Ok(node)
            }
        }
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Node> {
        let mut mapping = Mapping::new();

        while let Some(line) = self.peek() {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(KeymixError::parse(line.number, "unexpected indentation"));
            }
            if is_sequence_item(&line.text) {
                return Err(KeymixError::parse(
                    line.number,
                    "sequence item where a mapping key was expected",
                ));
            }

            let number = line.number;
            let (key, value) = match parse_content(line)? {
                Content::Pair(key, value) => (key, value),
                Content::Value(_) => {
                    return Err(KeymixError::parse(number, "expected a `key: value` entry"));
                }
            };
            self.pos += 1;

            let value = match value {
                Some(value) => value,
                None => self.parse_key_body(indent)?,
            };
            mapping.insert(key, value);
        }

        Ok(Node::Mapping(mapping))
    }

    /// Body of a key written as `key:` with nothing after the colon.
    fn parse_key_body(&mut self, key_indent: usize) -> Result<Node> {
        let next = self
            .peek()
            .map(|line| (line.indent, is_sequence_item(&line.text)));
        match next {
            Some((indent, _)) if indent > key_indent => self.parse_block(indent),
            // Sequences may sit at the same indentation as their key.
            Some((indent, true)) if indent == key_indent => self.parse_sequence(key_indent),
            _ => Ok(empty()),
        }
    }

    fn parse_sequence(&mut self, indent: usize) -> Result<Node> {
        let mut items = Vec::new();

        while let Some(line) = self.peek() {
            if line.indent < indent || !is_sequence_item(&line.text) {
                if line.indent > indent {
                    return Err(KeymixError::parse(line.number, "unexpected indentation"));
                }
                break;
            }
            if line.indent > indent {
                return Err(KeymixError::parse(line.number, "unexpected indentation"));
            }

            let rest = &line.text[1..];
            let content = rest.trim_start_matches(' ');
            if content.is_empty() {
                self.pos += 1;
                let item = match self.peek().map(|next| next.indent) {
                    Some(nested) if nested > indent => self.parse_block(nested)?,
                    _ => empty(),
                };
                items.push(item);
                continue;
            }

            // Treat the item's content as a line of its own starting at the
            // column after the dash, so nested mappings line up with it.
            let column = indent + 1 + (rest.len() - content.len());
            let content = content.to_string();
            let current = &mut self.lines[self.pos];
            current.indent = column;
            current.text = content;

            items.push(self.parse_block(column)?);
        }

        Ok(Node::Sequence(items))
    }
}

fn empty() -> Node {
    Node::Scalar(Scalar::Str(String::new()))
}

fn parse_content(line: &Line) -> Result<Content> {
    let mut pairs = LineParser::parse(Rule::line, &line.text).map_err(|e| {
        let column = match e.line_col {
            LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
        };
        KeymixError::parse(
            line.number,
            format!(
                "invalid syntax at column {} in `{}`",
                line.indent + column,
                line.text
            ),
        )
    })?;

    let fail = |message: String| KeymixError::parse(line.number, message);
    let root = pairs
        .next()
        .ok_or_else(|| fail("empty line".to_string()))?;

    for inner in root.into_inner() {
        match inner.as_rule() {
            Rule::EOI => {}
            Rule::pair => {
                let mut parts = inner.into_inner();
                let key = parts
                    .next()
                    .ok_or_else(|| fail("missing key".to_string()))?;
                let key = build_key(key).map_err(fail)?;
                let value = parts.next().map(build_value).transpose().map_err(fail)?;
                return Ok(Content::Pair(key, value));
            }
            _ => return Ok(Content::Value(build_value(inner).map_err(fail)?)),
        }
    }

    Err(fail("empty line".to_string()))
}

fn build_key(pair: Pair<Rule>) -> std::result::Result<String, String> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| "empty key".to_string())?;
    match inner.as_rule() {
        Rule::plain_key => Ok(inner.as_str().trim().to_string()),
        Rule::double_quoted | Rule::single_quoted => match build_value(inner)? {
            Node::Scalar(Scalar::Str(s)) => Ok(s),
            _ => Err("invalid quoted key".to_string()),
        },
        other => Err(format!("unexpected {:?} in key", other)),
    }
}

fn build_value(pair: Pair<Rule>) -> std::result::Result<Node, String> {
    match pair.as_rule() {
        Rule::flow_map => {
            let mut mapping = Mapping::flow();
            for entry in pair.into_inner() {
                let mut parts = entry.into_inner();
                let key = parts.next().ok_or_else(|| "missing key".to_string())?;
                let value = parts.next().ok_or_else(|| "missing value".to_string())?;
                mapping.insert(build_key(key)?, build_value(value)?);
            }
            Ok(Node::Mapping(mapping))
        }
        Rule::flow_seq => pair
            .into_inner()
            .map(build_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Node::Sequence),
        Rule::double_quoted => {
            let raw = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
            Ok(Node::Scalar(Scalar::Str(unescape(raw)?)))
        }
        Rule::single_quoted => {
            let raw = pair.into_inner().next().map(|p| p.as_str()).unwrap_or("");
            Ok(Node::Scalar(Scalar::Str(raw.replace("''", "'"))))
        }
        Rule::block_plain | Rule::flow_plain => Ok(Node::Scalar(Scalar::from_plain(
            pair.as_str().trim(),
        ))),
        other => Err(format!("unexpected {:?}", other)),
    }
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(' ') => out.push(' '),
            Some(kind @ ('x' | 'u' | 'U')) => {
                let width = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let hex: String = chars.by_ref().take(width).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == width)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid escape \\{}{}", kind, hex))?;
                out.push(code);
            }
            Some(other) => return Err(format!("unknown escape \\{}", other)),
            None => return Err("dangling backslash".to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Style;
    use crate::writer::to_string;

    #[test]
    fn test_flat_mapping() {
        let doc = from_str("m_Name: Smile\nm_SampleRate: 60\nm_StopTime: 0.016666668\n").unwrap();
        let m = doc.as_mapping().unwrap();
        assert_eq!(m.get("m_Name"), Some(&Node::from("Smile")));
        assert_eq!(m.get("m_SampleRate"), Some(&Node::from(60)));
        assert_eq!(m.get("m_StopTime"), Some(&Node::from(0.016666668)));
    }

    #[test]
    fn test_flow_collections() {
        let doc = from_str("script: {fileID: 0}\nm_Center: {x: 0, y: 0.5, z: -1}\nm_Events: []\n")
            .unwrap();
        let script = doc.get("script").unwrap().as_mapping().unwrap();
        assert_eq!(script.style(), Style::Flow);
        assert_eq!(script.get("fileID"), Some(&Node::from(0)));

        let center = doc.get("m_Center").unwrap();
        assert_eq!(center.get("y"), Some(&Node::from(0.5)));
        assert_eq!(center.get("z"), Some(&Node::from(-1)));

        assert_eq!(doc.get("m_Events").unwrap().as_sequence(), Some(&[][..]));
    }

    #[test]
    fn test_unity_style_sequences() {
        let text = "\
AnimationClip:
  m_FloatCurves:
  - curve:
      serializedVersion: 2
      m_Curve:
      - serializedVersion: 3
        time: 0
        value: 100
      m_PreInfinity: 2
    attribute: blendShape.Mouth Open
    path: Body
  - curve:
      m_Curve: []
    attribute: m_IsActive
    path: Hat
  m_SampleRate: 60
";
        let doc = from_str(text).unwrap();
        let clip = doc.get("AnimationClip").unwrap();
        let curves = clip.get("m_FloatCurves").unwrap().as_sequence().unwrap();
        assert_eq!(curves.len(), 2);

        let first = &curves[0];
        assert_eq!(first.get("attribute"), Some(&Node::from("blendShape.Mouth Open")));
        assert_eq!(first.get("path"), Some(&Node::from("Body")));
        let frames = first
            .get("curve")
            .and_then(|c| c.get("m_Curve"))
            .and_then(Node::as_sequence)
            .unwrap();
        assert_eq!(frames[0].get("value"), Some(&Node::from(100)));
        assert_eq!(
            first.get("curve").and_then(|c| c.get("m_PreInfinity")),
            Some(&Node::from(2))
        );

        assert_eq!(curves[1].get("path"), Some(&Node::from("Hat")));
        assert_eq!(clip.get("m_SampleRate"), Some(&Node::from(60)));
    }

    #[test]
    fn test_indented_sequences() {
        let doc = from_str("items:\n  - a\n  - b\nnext: 1\n").unwrap();
        let items = doc.get("items").unwrap().as_sequence().unwrap();
        assert_eq!(items, &[Node::from("a"), Node::from("b")][..]);
        assert_eq!(doc.get("next"), Some(&Node::from(1)));
    }

    #[test]
    fn test_quoted_scalars() {
        let doc = from_str(
            "a: \"42\"\nb: 'it''s'\nc: \"tab\\there \\u00e9\"\n\"quoted key\": 1\n",
        )
        .unwrap();
        assert_eq!(doc.get("a"), Some(&Node::from("42")));
        assert_eq!(doc.get("b"), Some(&Node::from("it's")));
        assert_eq!(doc.get("c"), Some(&Node::from("tab\there \u{e9}")));
        assert_eq!(doc.get("quoted key"), Some(&Node::from(1)));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let doc = from_str("# header\n\na: 1\n\n  # indented comment\nb: 2\n").unwrap();
        assert_eq!(doc.as_mapping().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_key_body() {
        let doc = from_str("a:\nb: 1\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Node::from("")));
    }

    #[test]
    fn test_nested_sequence_items() {
        let doc = from_str("- - 1\n  - 2\n- x\n").unwrap();
        let items = doc.as_sequence().unwrap();
        assert_eq!(
            items[0],
            Node::from(vec![Node::from(1), Node::from(2)])
        );
        assert_eq!(items[1], Node::from("x"));
    }

    #[test]
    fn test_reject_empty_document() {
        let err = from_str("\n  \n# only a comment\n").unwrap_err();
        assert!(matches!(err, KeymixError::Parse { line: 0, .. }));
    }

    #[test]
    fn test_reject_unterminated_flow_mapping() {
        let err = from_str("a: 1\nscript: {fileID: 0\n").unwrap_err();
        assert!(matches!(err, KeymixError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_reject_unterminated_quote() {
        assert!(from_str("name: \"open\n").is_err());
    }

    #[test]
    fn test_reject_bad_indentation() {
        let err = from_str("a: 1\n    b: 2\n").unwrap_err();
        assert!(matches!(err, KeymixError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_reject_tab_indentation() {
        let err = from_str("a:\n\tb: 2\n").unwrap_err();
        assert!(matches!(err, KeymixError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_reject_scalar_in_mapping() {
        let err = from_str("a: 1\njust words\n").unwrap_err();
        assert!(matches!(err, KeymixError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_reject_stray_document_marker() {
        assert!(from_str("--- !u!74 &7400000\nAnimationClip:\n  m_Name: x\n").is_err());
    }

    #[test]
    fn test_writer_output_reads_back() {
        let doc = Node::from(
            Mapping::new()
                .with("name", "Mouth: open")
                .with("flags", Mapping::flow().with("fileID", 0))
                .with(
                    "list",
                    vec![
                        Node::from(Mapping::new().with("k", "v").with("n", 0.25)),
                        Node::from("7"),
                    ],
                )
                .with("empty", Vec::<Node>::new()),
        );
        let text = to_string(&doc);
        assert_eq!(from_str(&text).unwrap(), doc);
    }

    #[test]
    fn test_plain_keys_with_inner_quotes() {
        let doc = Node::from(
            Mapping::new()
                .with("it's", 1)
                .with("say \"hi\"", "ok")
                .with("a#b", "c")
                .with("inline", Mapping::flow().with("it's", 2).with("x\"y", 3)),
        );
        let text = to_string(&doc);
        assert!(text.starts_with("it's: 1\n"));
        assert_eq!(from_str(&text).unwrap(), doc);
    }

    #[test]
    fn test_leading_quote_still_quotes_key() {
        let doc = Node::from(Mapping::new().with("'lead", 1).with("#tag", 2));
        let text = to_string(&doc);
        assert_eq!(text, "\"'lead\": 1\n\"#tag\": 2\n");
        assert_eq!(from_str(&text).unwrap(), doc);
    }
}
