use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use serde::Serialize;
use std::collections::HashMap;

/// Stable handle to an element, assigned in document order at parse time.
/// Handles stay valid for the lifetime of the document: elements are never
/// added or removed after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub u32);

/// A node in the document tree. Minimal — only what the engine needs.
#[derive(Debug, Clone)]
pub struct Node {
    /// Present on elements, absent on text and document nodes.
    pub id: Option<ElementId>,
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<Node>,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Element,
    Text,
    Document,
}

impl Node {
    fn new_element(tag: &str, id: ElementId) -> Self {
        Self {
            id: Some(id),
            tag: tag.to_string(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Element,
        }
    }

    fn new_text(text: &str) -> Self {
        Self {
            id: None,
            tag: String::new(),
            attributes: HashMap::new(),
            text: text.to_string(),
            children: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    fn new_document() -> Self {
        Self {
            id: None,
            tag: String::new(),
            attributes: HashMap::new(),
            text: String::new(),
            children: Vec::new(),
            node_type: NodeType::Document,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Class list of this element, split on whitespace.
    pub fn classes(&self) -> Vec<&str> {
        self.get_attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| *c == class)
    }

    /// Get the visible text content of this node and all children.
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => {
                let trimmed = self.text.trim();
                if !trimmed.is_empty() {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                    out.push_str(trimmed);
                }
            }
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// An owned, parsed page. The single mutable surface that animation effects
/// apply to.
#[derive(Debug, Clone)]
pub struct Document {
    root: Node,
    element_count: u32,
}

impl Document {
    /// Parse an HTML string into a document tree.
    pub fn parse(html: &str) -> Document {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                drop_doctype: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let dom = parse_document(RcDom::default(), opts)
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .expect("failed to parse HTML");

        let mut id_counter = 0u32;
        let root = convert_node(&dom.document, &mut id_counter);

        Document {
            root,
            element_count: id_counter,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn element_count(&self) -> u32 {
        self.element_count
    }

    pub fn get(&self, id: ElementId) -> Option<&Node> {
        find_node(&self.root, id)
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.get_attr(name))
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).map(|n| n.has_class(class)).unwrap_or(false)
    }

    pub fn text_content(&self, id: ElementId) -> Option<String> {
        self.get(id).map(|n| n.text_content())
    }

    /// The element id of the parent of `id`, if the parent is an element.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        find_parent(&self.root, id).and_then(|p| p.id)
    }

    /// Replace the element's children with a single text node.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(node) = find_node_mut(&mut self.root, id) {
            node.children = vec![Node::new_text(text)];
        }
    }

    /// Add a class to the element's class list. No-op if already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = find_node_mut(&mut self.root, id) {
            if node.has_class(class) {
                return;
            }
            let current = node.attributes.get("class").cloned().unwrap_or_default();
            let new = if current.is_empty() {
                class.to_string()
            } else {
                format!("{} {}", current, class)
            };
            node.attributes.insert("class".to_string(), new);
        }
    }

    /// Remove a class from the element's class list. No-op if absent.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = find_node_mut(&mut self.root, id) {
            if !node.has_class(class) {
                return;
            }
            let remaining = node
                .classes()
                .into_iter()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
            node.attributes.insert("class".to_string(), remaining);
        }
    }
}

fn convert_node(handle: &Handle, id_counter: &mut u32) -> Node {
    match &handle.data {
        NodeData::Document => {
            let mut doc = Node::new_document();
            for child in handle.children.borrow().iter() {
                doc.children.push(convert_node(child, id_counter));
            }
            doc
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_string();
            let id = ElementId(*id_counter);
            *id_counter += 1;

            let mut node = Node::new_element(&tag, id);
            for attr in attrs.borrow().iter() {
                node.attributes
                    .insert(attr.name.local.to_string(), attr.value.to_string());
            }

            // Script, style, and svg content carries nothing the engine reads
            if tag == "script" || tag == "style" || tag == "svg" || tag == "path" {
                return node;
            }

            for child in handle.children.borrow().iter() {
                let child_node = convert_node(child, id_counter);
                // Skip empty text nodes
                if child_node.node_type == NodeType::Text && child_node.text.trim().is_empty() {
                    continue;
                }
                node.children.push(child_node);
            }
            node
        }
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            Node::new_text(&text)
        }
        _ => Node::new_document(), // Comments, PIs, doctypes → ignored
    }
}

fn find_node(node: &Node, id: ElementId) -> Option<&Node> {
    if node.id == Some(id) {
        return Some(node);
    }
    for child in &node.children {
        if let Some(found) = find_node(child, id) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut(node: &mut Node, id: ElementId) -> Option<&mut Node> {
    if node.id == Some(id) {
        return Some(node);
    }
    for child in &mut node.children {
        if let Some(found) = find_node_mut(child, id) {
            return Some(found);
        }
    }
    None
}

fn find_parent<'a>(node: &'a Node, id: ElementId) -> Option<&'a Node> {
    for child in &node.children {
        if child.id == Some(id) {
            return Some(node);
        }
        if let Some(found) = find_parent(child, id) {
            return Some(found);
        }
    }
    None
}
