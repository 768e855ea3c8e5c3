use crate::style_resolver::StyleMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Element attributes in insertion order
pub type AttributeMap = IndexMap<String, String>;

/// Virtual DOM node handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    Element {
        tag: String,
        attributes: AttributeMap,
        styles: StyleMap,
        children: Vec<VNode>,
    },

    /// Text content, escaped by the renderer
    Text { content: String },

    /// Markup that is already serialized and must be emitted verbatim
    Raw { markup: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: AttributeMap::new(),
            styles: StyleMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        VNode::Raw {
            markup: markup.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_attrs(mut self, attrs: &AttributeMap) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        self
    }

    pub fn with_style(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.set(key, value);
        }
        self
    }

    pub fn with_styles(mut self, style: &StyleMap) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(style);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }
}
