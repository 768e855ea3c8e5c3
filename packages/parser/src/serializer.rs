use crate::ast::{Element, Fragment, Node};
use quick_xml::escape::{escape, partial_escape};
use std::borrow::Cow;

/// Writes an element tree back to markup
///
/// Output follows DOM `outerHTML` conventions: attributes in stored order,
/// every element written with an explicit end tag.
#[derive(Debug, Default)]
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn write_fragment(&mut self, fragment: &Fragment) {
        for node in &fragment.nodes {
            self.write_node(node);
        }
    }

    pub fn write_node(&mut self, node: &Node) {
        match node {
            Node::Element(el) => self.write_element(el),
            Node::Text { content } => self.output.push_str(&escape_text(content)),
            Node::Comment { content } => {
                self.output.push_str("<!--");
                self.output.push_str(content);
                self.output.push_str("-->");
            }
            Node::CData { content } => {
                self.output.push_str("<![CDATA[");
                self.output.push_str(content);
                self.output.push_str("]]>");
            }
        }
    }

    pub fn write_element(&mut self, el: &Element) {
        self.output.push('<');
        self.output.push_str(&el.name);
        for (name, value) in &el.attributes {
            self.output.push(' ');
            self.output.push_str(name);
            self.output.push_str("=\"");
            self.output.push_str(&escape_attr(value));
            self.output.push('"');
        }
        self.output.push('>');

        for child in &el.children {
            self.write_node(child);
        }

        self.output.push_str("</");
        self.output.push_str(&el.name);
        self.output.push('>');
    }
}

/// Escape `<`, `>` and `&` for embedding as element text
pub fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

/// Escape for a double-quoted attribute value
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    escape(value)
}

/// Serialize a single element and its subtree
pub fn serialize(el: &Element) -> String {
    let mut serializer = Serializer::new();
    serializer.write_element(el);
    serializer.finish()
}

pub fn serialize_fragment(fragment: &Fragment) -> String {
    let mut serializer = Serializer::new();
    serializer.write_fragment(fragment);
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_fragment;

    #[test]
    fn test_childless_elements_get_end_tags() {
        let el = Element::new("svg")
            .with_attr("width", "24")
            .with_child(Node::Element(Element::new("path").with_attr("d", "M0 0")));

        assert_eq!(
            serialize(&el),
            r#"<svg width="24"><path d="M0 0"></path></svg>"#
        );
    }

    #[test]
    fn test_attribute_values_escaped() {
        let el = Element::new("svg").with_attr("aria-label", "\"a\" & <b>");
        assert_eq!(
            serialize(&el),
            r#"<svg aria-label="&quot;a&quot; &amp; &lt;b&gt;"></svg>"#
        );
    }

    #[test]
    fn test_reparse_is_stable() {
        let source = r#"<svg viewBox="0 0 24 24"><!-- icon --><path d="M1 1" /><text>a &amp; b</text></svg>"#;
        let once = serialize_fragment(&parse_fragment(source).unwrap());
        let twice = serialize_fragment(&parse_fragment(&once).unwrap());
        assert_eq!(once, twice);
        assert!(once.contains("<!-- icon -->"));
        assert!(once.contains("<text>a &amp; b</text>"));
    }
}
