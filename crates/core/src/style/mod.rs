use crate::dom::{Document, ElementId, Node, NodeType};

/// Computed layout styles for a single element: the subset that affects the
/// bounding boxes intersection tests run against. Sources are tag defaults
/// and the inline `style` attribute; there is no stylesheet cascade.
#[derive(Debug, Clone)]
pub struct Style {
    pub display: Display,
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,
    pub margin: Edges,
    pub padding: Edges,
    pub flex_direction: FlexDirection,
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Dimension,
    pub gap: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: Display::Block,
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_width: Dimension::Auto,
            max_height: Dimension::Auto,
            margin: Edges::zero(),
            padding: Edges::zero(),
            flex_direction: FlexDirection::Row,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Dimension::Auto,
            gap: 0.0,
            font_size: 16.0,
            line_height: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    Flex,
    None,
}

#[derive(Debug, Clone)]
pub enum Dimension {
    Px(f32),
    Percent(f32),
    Auto,
}

#[derive(Debug, Clone)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn zero() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlexDirection {
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

/// A document node with computed layout styles. Carries the element id so
/// geometry extraction can key bounds by element.
#[derive(Debug, Clone)]
pub struct StyledNode {
    pub id: Option<ElementId>,
    pub tag: String,
    pub text: String,
    pub node_type: NodeType,
    pub style: Style,
    pub children: Vec<StyledNode>,
}

/// Apply tag-default and inline styles across the document.
pub fn compute_styles(doc: &Document) -> StyledNode {
    style_node(doc.root())
}

fn style_node(node: &Node) -> StyledNode {
    let mut style = default_style_for_tag(&node.tag);

    if let Some(inline) = node.get_attr("style") {
        parse_inline_style(inline, &mut style);
    }

    if node.attributes.contains_key("hidden") {
        style.display = Display::None;
    }

    // width/height attributes (for <img>, <table>, etc.)
    if let Some(w) = node.get_attr("width") {
        if let Some(dim) = parse_dimension_value(w) {
            style.width = dim;
        }
    }
    if let Some(h) = node.get_attr("height") {
        if let Some(dim) = parse_dimension_value(h) {
            style.height = dim;
        }
    }

    let children = node.children.iter().map(style_node).collect();

    StyledNode {
        id: node.id,
        tag: node.tag.clone(),
        text: node.text.clone(),
        node_type: node.node_type.clone(),
        style,
        children,
    }
}

fn default_style_for_tag(tag: &str) -> Style {
    let mut style = Style::default();

    match tag {
        // Inline elements
        "a" | "span" | "strong" | "em" | "b" | "i" | "u" | "small" | "sub" | "sup" | "label"
        | "abbr" | "cite" | "code" | "kbd" | "mark" | "q" | "s" | "samp" | "time" | "var" => {
            style.display = Display::Inline;
        }

        // Headings — block with larger font
        "h1" => {
            style.font_size = 32.0;
            style.margin = Edges { top: 21.0, right: 0.0, bottom: 21.0, left: 0.0 };
        }
        "h2" => {
            style.font_size = 24.0;
            style.margin = Edges { top: 19.0, right: 0.0, bottom: 19.0, left: 0.0 };
        }
        "h3" => {
            style.font_size = 18.7;
            style.margin = Edges { top: 18.0, right: 0.0, bottom: 18.0, left: 0.0 };
        }

        "button" | "select" | "textarea" | "img" => {
            style.display = Display::InlineBlock;
        }

        "input" => {
            style.display = Display::InlineBlock;
            style.width = Dimension::Px(173.0); // default input width
            style.height = Dimension::Px(21.0);
        }

        // Elements that never render
        "head" | "meta" | "link" | "title" | "script" | "style" | "noscript" => {
            style.display = Display::None;
        }

        "body" => {
            style.margin = Edges { top: 8.0, right: 8.0, bottom: 8.0, left: 8.0 };
        }

        // Everything else defaults to block
        _ => {}
    }

    style
}

/// Parse an inline style string into a Style.
fn parse_inline_style(style_str: &str, style: &mut Style) {
    for declaration in style_str.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let mut parts = declaration.splitn(2, ':');
        let property = match parts.next() {
            Some(p) => p.trim().to_lowercase(),
            None => continue,
        };
        let value = match parts.next() {
            Some(v) => v.trim(),
            None => continue,
        };

        match property.as_str() {
            "display" => {
                style.display = match value {
                    "none" => Display::None,
                    "inline" => Display::Inline,
                    "inline-block" => Display::InlineBlock,
                    "flex" | "inline-flex" => Display::Flex,
                    _ => Display::Block,
                };
            }
            "width" => {
                if let Some(dim) = parse_dimension_value(value) {
                    style.width = dim;
                }
            }
            "height" => {
                if let Some(dim) = parse_dimension_value(value) {
                    style.height = dim;
                }
            }
            "min-width" => {
                if let Some(dim) = parse_dimension_value(value) {
                    style.min_width = dim;
                }
            }
            "min-height" => {
                if let Some(dim) = parse_dimension_value(value) {
                    style.min_height = dim;
                }
            }
            "max-width" => {
                if let Some(dim) = parse_dimension_value(value) {
                    style.max_width = dim;
                }
            }
            "max-height" => {
                if let Some(dim) = parse_dimension_value(value) {
                    style.max_height = dim;
                }
            }
            "margin" => {
                style.margin = parse_edges(value);
            }
            "margin-top" => {
                if let Some(v) = parse_px(value) {
                    style.margin.top = v;
                }
            }
            "margin-right" => {
                if let Some(v) = parse_px(value) {
                    style.margin.right = v;
                }
            }
            "margin-bottom" => {
                if let Some(v) = parse_px(value) {
                    style.margin.bottom = v;
                }
            }
            "margin-left" => {
                if let Some(v) = parse_px(value) {
                    style.margin.left = v;
                }
            }
            "padding" => {
                style.padding = parse_edges(value);
            }
            "padding-top" => {
                if let Some(v) = parse_px(value) {
                    style.padding.top = v;
                }
            }
            "padding-right" => {
                if let Some(v) = parse_px(value) {
                    style.padding.right = v;
                }
            }
            "padding-bottom" => {
                if let Some(v) = parse_px(value) {
                    style.padding.bottom = v;
                }
            }
            "padding-left" => {
                if let Some(v) = parse_px(value) {
                    style.padding.left = v;
                }
            }
            "flex-direction" => {
                style.flex_direction = match value {
                    "row-reverse" => FlexDirection::RowReverse,
                    "column" => FlexDirection::Column,
                    "column-reverse" => FlexDirection::ColumnReverse,
                    _ => FlexDirection::Row,
                };
            }
            "flex-grow" => {
                if let Ok(v) = value.parse() {
                    style.flex_grow = v;
                }
            }
            "flex-shrink" => {
                if let Ok(v) = value.parse() {
                    style.flex_shrink = v;
                }
            }
            "flex-basis" => {
                if let Some(dim) = parse_dimension_value(value) {
                    style.flex_basis = dim;
                }
            }
            "gap" => {
                if let Some(v) = parse_px(value) {
                    style.gap = v;
                }
            }
            "font-size" => {
                if let Some(v) = parse_px(value) {
                    style.font_size = v;
                }
            }
            "line-height" => {
                if let Ok(v) = value.parse::<f32>() {
                    style.line_height = v;
                } else if let Some(v) = parse_px(value) {
                    style.line_height = v / style.font_size;
                }
            }
            _ => {} // Non-layout properties don't affect geometry
        }
    }
}

fn parse_dimension_value(value: &str) -> Option<Dimension> {
    let value = value.trim();
    if value == "auto" {
        return Some(Dimension::Auto);
    }
    if value.ends_with('%') {
        let num = value.trim_end_matches('%').trim().parse::<f32>().ok()?;
        return Some(Dimension::Percent(num / 100.0));
    }
    if let Some(px) = parse_px(value) {
        return Some(Dimension::Px(px));
    }
    // Bare number (treated as px)
    value.parse::<f32>().ok().map(Dimension::Px)
}

fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    if value == "0" {
        return Some(0.0);
    }
    if value.ends_with("px") {
        return value.trim_end_matches("px").trim().parse().ok();
    }
    if value.ends_with("rem") {
        return value
            .trim_end_matches("rem")
            .trim()
            .parse::<f32>()
            .ok()
            .map(|v| v * 16.0);
    }
    if value.ends_with("em") {
        // Approximate: 1em = 16px
        return value
            .trim_end_matches("em")
            .trim()
            .parse::<f32>()
            .ok()
            .map(|v| v * 16.0);
    }
    None
}

fn parse_edges(value: &str) -> Edges {
    let parts: Vec<f32> = value.split_whitespace().filter_map(parse_px).collect();

    match parts.len() {
        1 => Edges {
            top: parts[0],
            right: parts[0],
            bottom: parts[0],
            left: parts[0],
        },
        2 => Edges {
            top: parts[0],
            right: parts[1],
            bottom: parts[0],
            left: parts[1],
        },
        3 => Edges {
            top: parts[0],
            right: parts[1],
            bottom: parts[2],
            left: parts[1],
        },
        4 => Edges {
            top: parts[0],
            right: parts[1],
            bottom: parts[2],
            left: parts[3],
        },
        _ => Edges::zero(),
    }
}
