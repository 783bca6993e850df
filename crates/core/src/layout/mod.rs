use crate::dom::ElementId;
use crate::style::{self, StyledNode};
use std::collections::HashMap;
use taffy::prelude::*;

/// Absolute bounding box of an element, in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Computed geometry for the whole page, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct GeometryMap {
    bounds: HashMap<ElementId, Bounds>,
    page_height: f32,
}

impl GeometryMap {
    pub fn get(&self, id: ElementId) -> Option<&Bounds> {
        self.bounds.get(&id)
    }

    /// Total laid-out height of the page; the scroll extent derives from it.
    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

/// Compute layout for the styled tree and extract per-element bounds.
pub fn compute_geometry(
    root: &StyledNode,
    viewport_width: f32,
    viewport_height: f32,
) -> GeometryMap {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let root_taffy = build_taffy_tree(&mut tree, root, viewport_width);

    tree.compute_layout(
        root_taffy,
        Size {
            width: AvailableSpace::Definite(viewport_width),
            height: AvailableSpace::Definite(viewport_height),
        },
    )
    .expect("layout computation failed");

    let mut geometry = GeometryMap::default();
    extract_bounds(&tree, root_taffy, root, 0.0, 0.0, &mut geometry);

    let root_layout = tree.layout(root_taffy).expect("root should have layout");
    geometry.page_height = root_layout.size.height;

    geometry
}

fn build_taffy_tree(tree: &mut TaffyTree<()>, node: &StyledNode, parent_width: f32) -> NodeId {
    if node.style.display == style::Display::None {
        let taffy_style = Style {
            display: Display::None,
            ..Default::default()
        };
        return tree.new_leaf(taffy_style).unwrap();
    }

    let taffy_style = to_taffy_style(&node.style);

    if node.children.is_empty() && node.node_type == crate::dom::NodeType::Text {
        // Text node — estimate size from character count
        let text_len = node.text.trim().len() as f32;
        let char_width = node.style.font_size * 0.6; // approximate
        let text_width = text_len * char_width;
        let text_height = node.style.font_size * node.style.line_height;

        let mut style = taffy_style;
        style.min_size.width = Dimension::Length(text_width.min(parent_width));
        style.size.height = Dimension::Length(text_height);

        return tree.new_leaf(style).unwrap();
    }

    // Elements with only text children become leaves with estimated content size
    if node.node_type == crate::dom::NodeType::Element
        && !node.children.is_empty()
        && node
            .children
            .iter()
            .all(|c| c.node_type == crate::dom::NodeType::Text)
    {
        let text: String = node
            .children
            .iter()
            .map(|c| c.text.trim())
            .collect::<Vec<_>>()
            .join(" ");
        let text_len = text.trim().len() as f32;
        let char_width = node.style.font_size * 0.6;
        let text_height = node.style.font_size * node.style.line_height;

        let mut style = taffy_style;
        if matches!(style.size.width, Dimension::Auto) {
            style.min_size.width = Dimension::Length(text_len * char_width);
        }
        if matches!(style.size.height, Dimension::Auto) {
            style.min_size.height = Dimension::Length(text_height);
        }

        return tree.new_leaf(style).unwrap();
    }

    let child_ids: Vec<NodeId> = node
        .children
        .iter()
        .map(|c| build_taffy_tree(tree, c, parent_width))
        .collect();

    tree.new_with_children(taffy_style, &child_ids).unwrap()
}

fn to_taffy_style(style: &style::Style) -> Style {
    Style {
        display: match style.display {
            style::Display::Block => Display::Block,
            style::Display::Flex => Display::Flex,
            style::Display::None => Display::None,
            // Inline and inline-block approximated as flex for taffy
            style::Display::Inline | style::Display::InlineBlock => Display::Flex,
        },
        size: Size {
            width: to_taffy_dim(&style.width),
            height: to_taffy_dim(&style.height),
        },
        min_size: Size {
            width: to_taffy_dim(&style.min_width),
            height: to_taffy_dim(&style.min_height),
        },
        max_size: Size {
            width: to_taffy_dim(&style.max_width),
            height: to_taffy_dim(&style.max_height),
        },
        margin: Rect {
            top: LengthPercentageAuto::Length(style.margin.top),
            right: LengthPercentageAuto::Length(style.margin.right),
            bottom: LengthPercentageAuto::Length(style.margin.bottom),
            left: LengthPercentageAuto::Length(style.margin.left),
        },
        padding: Rect {
            top: LengthPercentage::Length(style.padding.top),
            right: LengthPercentage::Length(style.padding.right),
            bottom: LengthPercentage::Length(style.padding.bottom),
            left: LengthPercentage::Length(style.padding.left),
        },
        flex_direction: match style.flex_direction {
            style::FlexDirection::Row => FlexDirection::Row,
            style::FlexDirection::RowReverse => FlexDirection::RowReverse,
            style::FlexDirection::Column => FlexDirection::Column,
            style::FlexDirection::ColumnReverse => FlexDirection::ColumnReverse,
        },
        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        flex_basis: to_taffy_dim(&style.flex_basis),
        gap: Size {
            width: LengthPercentage::Length(style.gap),
            height: LengthPercentage::Length(style.gap),
        },
        ..Default::default()
    }
}

fn to_taffy_dim(dim: &style::Dimension) -> Dimension {
    match dim {
        style::Dimension::Px(v) => Dimension::Length(*v),
        style::Dimension::Percent(v) => Dimension::Percent(*v),
        style::Dimension::Auto => Dimension::Auto,
    }
}

fn extract_bounds(
    tree: &TaffyTree<()>,
    node_id: NodeId,
    styled: &StyledNode,
    parent_x: f32,
    parent_y: f32,
    geometry: &mut GeometryMap,
) {
    let taffy_layout = tree.layout(node_id).expect("node should have layout");

    let x = parent_x + taffy_layout.location.x;
    let y = parent_y + taffy_layout.location.y;

    if let Some(id) = styled.id {
        geometry.bounds.insert(
            id,
            Bounds {
                x,
                y,
                width: taffy_layout.size.width,
                height: taffy_layout.size.height,
            },
        );
    }

    let taffy_children: Vec<NodeId> = tree.children(node_id).unwrap_or_default();
    for (styled_child, &taffy_child) in styled.children.iter().zip(taffy_children.iter()) {
        extract_bounds(tree, taffy_child, styled_child, x, y, geometry);
    }
}
