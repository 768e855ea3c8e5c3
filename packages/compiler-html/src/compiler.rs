use pagekit_editor::{ComponentInstance, Document, EditorError, InstanceId};
use pagekit_evaluator::{AttributeMap, StyleMap, VNode};
use pagekit_parser::{escape_attr, escape_text, StyleDeclarations};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid attribute name {name:?} on <{tag}>")]
    InvalidAttributeName { tag: String, name: String },

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap the output in a full HTML page
    pub document: bool,
    /// Page title when `document` is set
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            document: false,
            title: "PageKit Components".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a single node (and its subtree) to HTML
pub fn compile_vnode(node: &VNode, options: &CompileOptions) -> Result<String, CompileError> {
    compile_nodes(std::slice::from_ref(node), options)
}

/// Compile the element an instance currently presents
pub fn compile_instance(instance: &ComponentInstance, options: &CompileOptions) -> Result<String, CompileError> {
    compile_vnode(&instance.to_vnode(), options)
}

/// Compile several instances in order, one after another
pub fn compile_to_html(instances: &[&ComponentInstance], options: &CompileOptions) -> Result<String, CompileError> {
    let nodes: Vec<VNode> = instances.iter().map(|inst| inst.to_vnode()).collect();
    compile_nodes(&nodes, options)
}

/// Compile the given instances of `document`, or all of them when `ids` is empty
pub fn compile_document(
    document: &Document,
    ids: &[InstanceId],
    options: &CompileOptions,
) -> Result<String, CompileError> {
    let nodes = if ids.is_empty() {
        document.instances().map(ComponentInstance::to_vnode).collect()
    } else {
        ids.iter()
            .map(|id| document.render(*id))
            .collect::<Result<Vec<_>, _>>()?
    };
    compile_nodes(&nodes, options)
}

fn compile_nodes(nodes: &[VNode], options: &CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    debug!(nodes = nodes.len(), document = options.document, "Compiling HTML");

    if options.document {
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html>");
        ctx.indent();
        compile_head(&mut ctx);
        ctx.add_line("<body>");
        ctx.indent();
    }

    for node in nodes {
        compile_root(node, &mut ctx)?;
    }

    if options.document {
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
    }

    Ok(ctx.get_output())
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", escape_text(&ctx.options.title));
    ctx.add_line(&title);

    ctx.dedent();
    ctx.add_line("</head>");
}

/// Top-level text and raw markup still get a line of their own
fn compile_root(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element { .. } => compile_node(node, ctx),
        VNode::Text { content } => {
            ctx.add_line(&escape_text(content));
            Ok(())
        }
        VNode::Raw { markup } => {
            ctx.add_line(markup);
            Ok(())
        }
    }
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => compile_element(tag, attributes, styles, children, ctx),
        VNode::Text { content } => {
            ctx.add(&escape_text(content));
            Ok(())
        }
        VNode::Raw { markup } => {
            ctx.add(markup);
            Ok(())
        }
    }
}

fn compile_element(
    tag: &str,
    attributes: &AttributeMap,
    styles: &StyleMap,
    children: &[VNode],
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_tag_name(tag) {
        return Err(CompileError::InvalidTagName(tag.to_string()));
    }

    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add("<");
    ctx.add(tag);

    for (name, value) in attributes {
        if name == "style" && !styles.is_empty() {
            continue;
        }
        if !is_valid_attribute_name(name) {
            return Err(CompileError::InvalidAttributeName {
                tag: tag.to_string(),
                name: name.clone(),
            });
        }
        compile_attribute(name, value, ctx);
    }

    if !styles.is_empty() {
        let mut merged = attributes
            .get("style")
            .map(|css| StyleDeclarations::parse(css))
            .unwrap_or_default();
        merged.extend(styles);
        compile_attribute("style", &merged.to_css_text(), ctx);
    }

    if children.is_empty() && is_void(tag) {
        ctx.add(" />");
        ctx.newline();
        return Ok(());
    }

    ctx.add(">");

    let block = has_element_children(children);
    if !children.is_empty() {
        if block {
            ctx.newline();
        }
        ctx.indent();

        for child in children {
            compile_node(child, ctx)?;
        }

        ctx.dedent();
        if block && ctx.options.pretty {
            ctx.add_indent();
        }
    }

    ctx.add("</");
    ctx.add(tag);
    ctx.add(">");
    ctx.newline();

    Ok(())
}

fn compile_attribute(name: &str, value: &str, ctx: &mut Context) {
    ctx.add(" ");
    ctx.add(name);
    ctx.add("=\"");
    ctx.add(&escape_attr(value));
    ctx.add("\"");
}

fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<'))
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| matches!(child, VNode::Element { .. }))
}
