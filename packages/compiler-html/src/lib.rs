//! HTML output for rendered component instances

mod compiler;

#[cfg(test)]
mod tests;

pub use compiler::{compile_document, compile_instance, compile_to_html, compile_vnode, CompileError, CompileOptions};
