//! # PageKit Parser
//!
//! Rendering-engine-independent element tree for the small markup fragments
//! PageKit handles (icon SVG pasted by authors), plus inline `style`
//! declaration lists.

pub mod ast;
pub mod declarations;
pub mod error;
pub mod parser;
pub mod serializer;

pub use ast::{Attributes, Element, Fragment, Node};
pub use declarations::StyleDeclarations;
#[cfg(feature = "pretty-errors")]
pub use error::format_error;
pub use error::{ParseError, ParseResult};
pub use parser::{parse_fragment, FragmentParser};
pub use serializer::{escape_attr, escape_text, serialize, serialize_fragment, Serializer};
