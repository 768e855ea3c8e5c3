use crate::ast::{Attributes, Element, Fragment, Node};
use crate::error::{ParseError, ParseResult};
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

/// Lenient fragment parser over `quick-xml` events
///
/// Tag matching behaves like an HTML fragment parser rather than a strict
/// XML reader: an end tag closes the nearest open element with the same
/// name (and anything opened inside it), stray end tags are ignored and
/// elements still open at end of input are closed there.
pub struct FragmentParser<'src> {
    reader: Reader<&'src [u8]>,
    stack: Vec<Element>,
    nodes: Vec<Node>,
}

impl<'src> FragmentParser<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.expand_empty_elements = false;
        config.trim_text(false);

        Self {
            reader,
            stack: Vec::new(),
            nodes: Vec::new(),
        }
    }

    pub fn parse(mut self) -> ParseResult<Fragment> {
        loop {
            let event = self
                .reader
                .read_event()
                .map_err(|err| ParseError::xml(self.reader.error_position() as usize, err.to_string()))?;

            match event {
                Event::Start(start) => {
                    let element = self.open_element(&start)?;
                    self.stack.push(element);
                }
                Event::Empty(start) => {
                    let element = self.open_element(&start)?;
                    self.push_node(Node::Element(element));
                }
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    self.close_element(&name);
                }
                Event::Text(text) => {
                    let content = unescape_text(&text);
                    if !content.is_empty() {
                        self.push_node(Node::Text { content });
                    }
                }
                Event::CData(data) => {
                    let content = String::from_utf8_lossy(&data).into_owned();
                    self.push_node(Node::CData { content });
                }
                Event::Comment(comment) => {
                    let content = String::from_utf8_lossy(&comment).into_owned();
                    self.push_node(Node::Comment { content });
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        while !self.stack.is_empty() {
            self.pop_into_parent();
        }

        Ok(Fragment { nodes: self.nodes })
    }

    fn open_element(&self, start: &BytesStart<'_>) -> ParseResult<Element> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Attributes::new();

        let mut iter = start.html_attributes();
        iter.with_checks(false);
        for attr in iter {
            let attr = attr.map_err(|err| {
                ParseError::attribute(self.reader.buffer_position() as usize, err.to_string())
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = unescape_lenient(&String::from_utf8_lossy(&attr.value));
            // First occurrence wins, as in HTML
            attributes.entry(key).or_insert(value);
        }

        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn close_element(&mut self, name: &str) {
        let Some(depth) = self.stack.iter().rposition(|el| el.name == name) else {
            return;
        };
        while self.stack.len() > depth {
            self.pop_into_parent();
        }
    }

    fn pop_into_parent(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.push_node(Node::Element(element));
        }
    }
}

fn unescape_text(text: &BytesText<'_>) -> String {
    unescape_lenient(&String::from_utf8_lossy(text))
}

/// Resolve character references one at a time. A reference that does not
/// resolve is kept as written and does not affect its neighbours.
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let reference = tail
            .find(';')
            .map(|end| &tail[..=end])
            .filter(|r| !r[1..r.len() - 1].contains(|c: char| c == '&' || c.is_whitespace()));

        match reference {
            Some(reference) => {
                match unescape_with(reference, resolve_html5_entity) {
                    Ok(resolved) => out.push_str(&resolved),
                    Err(_) => out.push_str(reference),
                }
                rest = &tail[reference.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parse a markup fragment into an owned element tree
pub fn parse_fragment(source: &str) -> ParseResult<Fragment> {
    if source.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    FragmentParser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(source: &str) -> Element {
        let fragment = parse_fragment(source).unwrap();
        let root = fragment.elements().next().cloned().unwrap();
        root
    }

    #[test]
    fn test_parse_nested_svg() {
        let svg = root(r#"<svg viewBox="0 0 24 24"><g><path d="M0 0h24"/></g></svg>"#);
        assert_eq!(svg.name, "svg");
        assert_eq!(svg.attr("viewBox"), Some("0 0 24 24"));

        let g = svg.child_elements().next().unwrap();
        let path = g.child_elements().next().unwrap();
        assert_eq!(path.attr("d"), Some("M0 0h24"));
    }

    #[test]
    fn test_unclosed_elements_close_at_eof() {
        let svg = root(r#"<svg><g><path d="M1 1">"#);
        let g = svg.child_elements().next().unwrap();
        assert_eq!(g.child_elements().count(), 1);
    }

    #[test]
    fn test_mismatched_end_closes_nearest_match() {
        let svg = root("<svg><g><circle r=\"2\"></g><rect/></svg>");
        let names: Vec<&str> = svg.child_elements().map(|el| el.name.as_str()).collect();
        assert_eq!(names, vec!["g", "rect"]);
    }

    #[test]
    fn test_stray_end_tag_is_ignored() {
        let svg = root("<svg></span><path/></svg>");
        assert_eq!(svg.child_elements().count(), 1);
    }

    #[test]
    fn test_entities_unescaped() {
        let svg = root(r#"<svg aria-label="a &amp; b"><text>1 &lt; 2&nbsp;</text></svg>"#);
        assert_eq!(svg.attr("aria-label"), Some("a & b"));
        assert_eq!(svg.text_content(), "1 < 2\u{a0}");
    }

    #[test]
    fn test_unknown_entity_kept_literally() {
        let svg = root("<svg><text>&bogus;</text></svg>");
        assert_eq!(svg.text_content(), "&bogus;");
    }

    #[test]
    fn test_unknown_entity_leaves_neighbours_decoded() {
        let svg = root("<svg><text>&bogus; &amp;lt; &#65;</text></svg>");
        assert_eq!(svg.text_content(), "&bogus; &lt; A");

        let svg = root(r#"<svg aria-label="&nope; a &amp; b"/>"#);
        assert_eq!(svg.attr("aria-label"), Some("&nope; a & b"));
    }

    #[test]
    fn test_bare_ampersand_kept() {
        let svg = root("<svg><text>R & D &amp; co</text></svg>");
        assert_eq!(svg.text_content(), "R & D & co");
    }

    #[test]
    fn test_prolog_is_skipped() {
        let fragment =
            parse_fragment("<?xml version=\"1.0\"?><!DOCTYPE svg><svg/>").unwrap();
        assert_eq!(fragment.elements().count(), 1);
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let svg = root(r#"<svg fill="red" fill="blue"/>"#);
        assert_eq!(svg.attr("fill"), Some("red"));
    }

    #[test]
    fn test_unquoted_attribute_values() {
        let svg = root("<svg width=24 height=24></svg>");
        assert_eq!(svg.attr("width"), Some("24"));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(parse_fragment("  \n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_unterminated_tag_is_an_error() {
        let err = parse_fragment("<svg><path d=\"M0 0").unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }));
    }
}
