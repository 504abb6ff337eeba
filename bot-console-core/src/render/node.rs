//! Rendered view nodes
//!
//! User-supplied text can only enter the tree as [`Node::Text`] or as an
//! attribute value; both are escaped by [`Node::to_html`]. Controls carry a
//! typed [`Action`] instead of handler source.

use std::fmt::Write as _;

use crate::types::{Id, Platform};

/// Event bound to a rendered control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ActivateConnection(Id),
    CheckConnection(Id),
    EditConnection(Id),
    DeleteConnection(Id),
    ShowPrompts(Id),
    EditPrompt(Id),
    DeletePrompt(Id),
    ActivatePrompt(Id),
    DeactivatePrompt(Id),
    ToggleWhitelist { id: Id, platform: Platform },
    DeleteWhitelist { id: Id, platform: Platform },
    ClearChat { chat_id: i64, platform: Platform },
}

impl Action {
    /// Stable event name (`data-action`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActivateConnection(_) => "activate-connection",
            Self::CheckConnection(_) => "check-connection",
            Self::EditConnection(_) => "edit-connection",
            Self::DeleteConnection(_) => "delete-connection",
            Self::ShowPrompts(_) => "show-prompts",
            Self::EditPrompt(_) => "edit-prompt",
            Self::DeletePrompt(_) => "delete-prompt",
            Self::ActivatePrompt(_) => "activate-prompt",
            Self::DeactivatePrompt(_) => "deactivate-prompt",
            Self::ToggleWhitelist { .. } => "toggle-whitelist",
            Self::DeleteWhitelist { .. } => "delete-whitelist",
            Self::ClearChat { .. } => "clear-chat",
        }
    }

    /// Entity the action targets
    pub fn target(&self) -> Id {
        match self {
            Self::ActivateConnection(id)
            | Self::CheckConnection(id)
            | Self::EditConnection(id)
            | Self::DeleteConnection(id)
            | Self::ShowPrompts(id)
            | Self::EditPrompt(id)
            | Self::DeletePrompt(id)
            | Self::ActivatePrompt(id)
            | Self::DeactivatePrompt(id)
            | Self::ToggleWhitelist { id, .. }
            | Self::DeleteWhitelist { id, .. } => *id,
            Self::ClearChat { chat_id, .. } => *chat_id,
        }
    }

    pub fn platform(&self) -> Option<Platform> {
        match self {
            Self::ToggleWhitelist { platform, .. }
            | Self::DeleteWhitelist { platform, .. }
            | Self::ClearChat { platform, .. } => Some(*platform),
            _ => None,
        }
    }
}

/// Element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub class: &'static str,
    pub title: Option<String>,
    pub action: Option<Action>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            class,
            title: None,
            action: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    #[must_use]
    pub fn icon(self, name: &'static str) -> Self {
        self.child(Node::Icon(name))
    }
}

/// Boolean list control bound to an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub id: Id,
    pub on: bool,
    pub title: &'static str,
    pub action: Action,
}

/// View node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Icon placeholder, materialized by the view after each render
    Icon(&'static str),
    Switch(Switch),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Node {
    /// Concatenated text content of this subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Self::Icon(_) | Self::Switch(_) => {}
        }
    }

    /// All actions bound in this subtree, in document order
    pub fn actions(&self) -> Vec<&Action> {
        let mut out = Vec::new();
        self.collect_actions(&mut out);
        out
    }

    fn collect_actions<'a>(&'a self, out: &mut Vec<&'a Action>) {
        match self {
            Self::Element(el) => {
                if let Some(action) = &el.action {
                    out.push(action);
                }
                for child in &el.children {
                    child.collect_actions(out);
                }
            }
            Self::Switch(switch) => out.push(&switch.action),
            Self::Text(_) | Self::Icon(_) => {}
        }
    }

    /// Find the switch bound to `id` in this subtree
    pub fn find_switch_mut(&mut self, id: Id) -> Option<&mut Switch> {
        match self {
            Self::Switch(switch) if switch.id == id => Some(switch),
            Self::Element(el) => el
                .children
                .iter_mut()
                .find_map(|child| child.find_switch_mut(id)),
            _ => None,
        }
    }

    pub fn find_switch(&self, id: Id) -> Option<&Switch> {
        match self {
            Self::Switch(switch) if switch.id == id => Some(switch),
            Self::Element(el) => el.children.iter().find_map(|child| child.find_switch(id)),
            _ => None,
        }
    }

    /// Serialize to HTML; text and attribute values are escaped
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&html_escape(text)),
            Self::Icon(name) => {
                let _ = write!(out, r#"<i data-lucide="{name}"></i>"#);
            }
            Self::Switch(switch) => {
                let _ = write!(
                    out,
                    r#"<label class="switch" title="{}"><input type="checkbox"{}{}><span class="slider"></span></label>"#,
                    html_escape(switch.title),
                    if switch.on { " checked" } else { "" },
                    action_attrs(&switch.action),
                );
            }
            Self::Element(el) => {
                let _ = write!(out, "<{}", el.tag);
                if !el.class.is_empty() {
                    let _ = write!(out, r#" class="{}""#, el.class);
                }
                if let Some(title) = &el.title {
                    let _ = write!(out, r#" title="{}""#, html_escape(title));
                }
                if let Some(action) = &el.action {
                    out.push_str(&action_attrs(action));
                }
                out.push('>');
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

fn action_attrs(action: &Action) -> String {
    let mut attrs = format!(
        r#" data-action="{}" data-id="{}""#,
        action.name(),
        action.target()
    );
    if let Some(platform) = action.platform() {
        let _ = write!(attrs, r#" data-platform="{platform}""#);
    }
    attrs
}

/// Escape text for HTML content and quoted attribute values
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
