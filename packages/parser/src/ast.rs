//! Owned element tree for markup fragments

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute list in source order
pub type Attributes = IndexMap<String, String>;

/// Parsed markup fragment (zero or more top-level nodes)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Element(Element),
    Text { content: String },
    Comment { content: String },
    CData { content: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Name without any namespace prefix (`svg:path` → `path`)
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// ASCII case-insensitive match on the local name
    pub fn is_named(&self, name: &str) -> bool {
        self.local_name().eq_ignore_ascii_case(name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Overwrite in place when present, append otherwise
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Depth-first search including `self`
    pub fn find_first(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_first(pred))
    }

    /// Visit every descendant element (not `self`) depth-first, parents first
    pub fn visit_descendants_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        for child in &mut self.children {
            if let Node::Element(el) = child {
                visit(el);
                el.visit_descendants_mut(visit);
            }
        }
    }

    /// Concatenated text content of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text { content } | Node::CData { content } => out.push_str(content),
            Node::Element(el) => collect_text(&el.children, out),
            Node::Comment { .. } => {}
        }
    }
}

impl Fragment {
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(Node::as_element)
    }

    /// First element in document order matching `pred`
    pub fn find_first(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.elements().find_map(|el| el.find_first(&pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_preserves_order() {
        let mut el = Element::new("svg")
            .with_attr("width", "16")
            .with_attr("height", "16")
            .with_attr("fill", "none");

        el.set_attr("width", "24");
        el.set_attr("stroke", "red");

        let names: Vec<&str> = el.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["width", "height", "fill", "stroke"]);
        assert_eq!(el.attr("width"), Some("24"));
    }

    #[test]
    fn test_remove_attr_keeps_remaining_order() {
        let mut el = Element::new("path")
            .with_attr("d", "M0 0")
            .with_attr("fill", "red")
            .with_attr("stroke", "blue");

        assert_eq!(el.remove_attr("fill"), Some("red".to_string()));
        let names: Vec<&str> = el.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["d", "stroke"]);
    }

    #[test]
    fn test_local_name_and_case() {
        let el = Element::new("svg:SVG");
        assert_eq!(el.local_name(), "SVG");
        assert!(el.is_named("svg"));
    }

    #[test]
    fn test_find_first_is_depth_first() {
        let inner = Element::new("svg").with_attr("id", "inner");
        let outer = Element::new("div")
            .with_child(Node::Element(Element::new("span").with_child(Node::Element(inner))))
            .with_child(Node::Element(Element::new("svg").with_attr("id", "second")));

        let fragment = Fragment {
            nodes: vec![Node::Element(outer)],
        };
        let found = fragment.find_first(|el| el.is_named("svg")).unwrap();
        assert_eq!(found.attr("id"), Some("inner"));
    }

    #[test]
    fn test_visit_descendants_skips_self() {
        let mut root = Element::new("svg")
            .with_child(Node::Element(Element::new("g").with_child(Node::Element(
                Element::new("path"),
            ))))
            .with_child(Node::Text {
                content: "x".to_string(),
            });

        let mut seen = Vec::new();
        root.visit_descendants_mut(&mut |el| seen.push(el.name.clone()));
        assert_eq!(seen, vec!["g", "path"]);
    }
}
