//! Selector parsing and matching against the document tree.
//!
//! Supports the subset element discovery and landmark lookups need:
//! tag, `.class`, `#id`, `[attr]`, `[attr=value]`, compounds of those, and
//! the descendant combinator. Matching returns element ids in document
//! order.

use crate::dom::{Document, ElementId, Node, NodeType};

/// A parsed selector: compound segments separated by descendant combinators.
#[derive(Debug, Clone)]
pub struct Selector {
    segments: Vec<Vec<SimplePart>>,
}

#[derive(Debug, Clone)]
enum SimplePart {
    Tag(String),
    Class(String),
    Id(String),
    Attr(String, Option<String>),
}

#[derive(Debug)]
pub struct SelectorError(pub String);

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid selector: {}", self.0)
    }
}

impl std::error::Error for SelectorError {}

/// Parse a selector string.
pub fn parse(input: &str) -> Result<Selector, SelectorError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SelectorError("empty selector".to_string()));
    }

    let mut segments = Vec::new();
    for compound in split_compounds(input) {
        let parts = parse_compound(&compound)?;
        if parts.is_empty() {
            return Err(SelectorError(input.to_string()));
        }
        segments.push(parts);
    }

    if segments.is_empty() {
        return Err(SelectorError(input.to_string()));
    }
    Ok(Selector { segments })
}

/// Split on whitespace combinators, but not inside `[...]`.
fn split_compounds(input: &str) -> Vec<String> {
    let mut compounds = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;

    for ch in input.chars() {
        match ch {
            '[' => {
                in_brackets = true;
                current.push(ch);
            }
            ']' => {
                in_brackets = false;
                current.push(ch);
            }
            c if c.is_whitespace() && !in_brackets => {
                if !current.is_empty() {
                    compounds.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        compounds.push(current);
    }
    compounds
}

fn parse_compound(compound: &str) -> Result<Vec<SimplePart>, SelectorError> {
    let mut parts = Vec::new();
    let mut chars = compound.chars().peekable();
    let mut tag = String::new();

    while let Some(&ch) = chars.peek() {
        match ch {
            '.' => {
                flush_tag(&mut tag, &mut parts);
                chars.next();
                let name = read_ident(&mut chars);
                if name.is_empty() {
                    return Err(SelectorError(compound.to_string()));
                }
                parts.push(SimplePart::Class(name));
            }
            '#' => {
                flush_tag(&mut tag, &mut parts);
                chars.next();
                let name = read_ident(&mut chars);
                if name.is_empty() {
                    return Err(SelectorError(compound.to_string()));
                }
                parts.push(SimplePart::Id(name));
            }
            '[' => {
                flush_tag(&mut tag, &mut parts);
                chars.next();
                let mut attr = String::new();
                let mut value = None;
                let mut closed = false;
                while let Some(&c) = chars.peek() {
                    if c == ']' {
                        chars.next();
                        closed = true;
                        break;
                    }
                    if c == '=' {
                        chars.next();
                        let mut val = String::new();
                        let quote = chars.peek().copied();
                        if quote == Some('"') || quote == Some('\'') {
                            chars.next();
                            while let Some(&vc) = chars.peek() {
                                chars.next();
                                if Some(vc) == quote {
                                    break;
                                }
                                val.push(vc);
                            }
                        } else {
                            while let Some(&vc) = chars.peek() {
                                if vc == ']' {
                                    break;
                                }
                                val.push(vc);
                                chars.next();
                            }
                        }
                        value = Some(val);
                    } else {
                        attr.push(c);
                        chars.next();
                    }
                }
                if !closed || attr.trim().is_empty() {
                    return Err(SelectorError(compound.to_string()));
                }
                parts.push(SimplePart::Attr(attr.trim().to_string(), value));
            }
            _ => {
                tag.push(ch);
                chars.next();
            }
        }
    }

    flush_tag(&mut tag, &mut parts);
    Ok(parts)
}

fn flush_tag(tag: &mut String, parts: &mut Vec<SimplePart>) {
    let t = tag.trim();
    if !t.is_empty() {
        parts.push(SimplePart::Tag(t.to_lowercase()));
    }
    tag.clear();
}

fn read_ident(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    name
}

/// All elements matching the selector, in document order.
pub fn select(doc: &Document, selector: &Selector) -> Vec<ElementId> {
    let mut out = Vec::new();
    let mut ancestors = Vec::new();
    walk(doc.root(), selector, &mut ancestors, &mut out);
    out
}

/// The first element matching the selector, in document order.
pub fn select_first(doc: &Document, selector: &Selector) -> Option<ElementId> {
    select(doc, selector).into_iter().next()
}

/// Convenience: parse and select in one step.
pub fn select_str(doc: &Document, selector: &str) -> Result<Vec<ElementId>, SelectorError> {
    Ok(select(doc, &parse(selector)?))
}

fn walk<'a>(
    node: &'a Node,
    selector: &Selector,
    ancestors: &mut Vec<&'a Node>,
    out: &mut Vec<ElementId>,
) {
    if node.node_type == NodeType::Element {
        if let Some(id) = node.id {
            if matches(selector, node, ancestors) {
                out.push(id);
            }
        }
        ancestors.push(node);
        for child in &node.children {
            walk(child, selector, ancestors, out);
        }
        ancestors.pop();
    } else {
        for child in &node.children {
            walk(child, selector, ancestors, out);
        }
    }
}

fn matches(selector: &Selector, node: &Node, ancestors: &[&Node]) -> bool {
    // Parsing guarantees at least one segment
    let Some(last) = selector.segments.last() else {
        return false;
    };
    if !segment_matches(last, node) {
        return false;
    }

    // Remaining segments must each match some ancestor, right to left.
    let mut anc_idx = ancestors.len();
    for segment in selector.segments[..selector.segments.len() - 1].iter().rev() {
        let mut found = false;
        while anc_idx > 0 {
            anc_idx -= 1;
            if segment_matches(segment, ancestors[anc_idx]) {
                found = true;
                break;
            }
        }
        if !found {
            return false;
        }
    }
    true
}

fn segment_matches(segment: &[SimplePart], node: &Node) -> bool {
    segment.iter().all(|part| match part {
        SimplePart::Tag(t) => node.tag.eq_ignore_ascii_case(t),
        SimplePart::Class(c) => node.has_class(c),
        SimplePart::Id(i) => node.get_attr("id") == Some(i.as_str()),
        SimplePart::Attr(name, expected) => match expected {
            Some(val) => node.get_attr(name) == Some(val.as_str()),
            None => node.attributes.contains_key(name.as_str()),
        },
    })
}
