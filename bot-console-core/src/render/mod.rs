//! Declarative list rendering

mod list_renderer;
mod node;
pub mod templates;

pub use list_renderer::ListRenderer;
pub use node::{html_escape, Action, Element, Node, Switch};
