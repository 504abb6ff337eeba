//! Resource list renderer

use std::sync::Arc;

use crate::traits::ListView;

use super::node::{Element, Node};

type Template<T> = Box<dyn Fn(&T) -> Node + Send + Sync>;

/// Renders a whole collection into a list container
///
/// Every call replaces the container content; there is no keyed
/// reconciliation, so any local control state is overwritten by the data.
pub struct ListRenderer<T> {
    view: Arc<dyn ListView>,
    template: Template<T>,
    placeholder: &'static str,
}

impl<T> ListRenderer<T> {
    /// Create a renderer
    ///
    /// # Arguments
    /// * `view` - target container
    /// * `template` - builds the node of one item
    /// * `placeholder` - text shown for an empty collection
    pub fn new(
        view: Arc<dyn ListView>,
        template: impl Fn(&T) -> Node + Send + Sync + 'static,
        placeholder: &'static str,
    ) -> Self {
        Self {
            view,
            template: Box::new(template),
            placeholder,
        }
    }

    pub fn render(&self, items: &[T]) {
        let nodes = if items.is_empty() {
            vec![Element::new("p", "list-placeholder")
                .text(self.placeholder)
                .into()]
        } else {
            items.iter().map(|item| (self.template)(item)).collect()
        };
        self.view.replace(nodes);
        self.view.materialize_icons();
    }

    pub fn view(&self) -> &Arc<dyn ListView> {
        &self.view
    }
}
