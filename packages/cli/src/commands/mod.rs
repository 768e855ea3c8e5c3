pub mod init;
pub mod render;
pub mod sanitize;

pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use sanitize::{sanitize, SanitizeArgs};
