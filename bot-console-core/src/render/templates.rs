//! Item templates of every resource list

use crate::types::{ChatSummary, Connection, Platform, Prompt, WhitelistEntry};

use super::node::{Action, Element, Node, Switch};

pub const CONNECTIONS_PLACEHOLDER: &str = "Подключений пока нет";
pub const PROMPTS_PLACEHOLDER: &str = "Промптов пока нет";
pub const WHITELIST_PLACEHOLDER: &str = "Список пуст";
pub const CHATS_PLACEHOLDER: &str = "Истории пока нет";

const ACTIVE_BADGE: &str = "Активен";
const UNTITLED: &str = "Без названия";

fn icon_button(icon: &'static str, title: &str, action: Action) -> Node {
    Element::new("button", "btn btn-icon")
        .title(title)
        .on_click(action)
        .icon(icon)
        .into()
}

/// Connection card
pub fn connection_card(conn: &Connection) -> Node {
    let mut header = Element::new("div", "flex justify-between")
        .child(Element::new("strong", "").text(conn.name.clone()).into());
    if conn.is_active {
        header = header.child(Element::new("span", "badge-active").text(ACTIVE_BADGE).into());
    }

    let mut actions = Element::new("div", "flex");
    if !conn.is_active {
        actions = actions.child(icon_button(
            "play",
            "Активировать",
            Action::ActivateConnection(conn.id),
        ));
    }
    actions = actions
        .child(icon_button("zap", "Проверить", Action::CheckConnection(conn.id)))
        .child(icon_button("message-square", "Промпты", Action::ShowPrompts(conn.id)))
        .child(icon_button("edit-2", "Редактировать", Action::EditConnection(conn.id)))
        .child(icon_button("trash-2", "Удалить", Action::DeleteConnection(conn.id)));

    Element::new(
        "div",
        if conn.is_active { "card card-active" } else { "card" },
    )
    .child(header.into())
    .child(
        Element::new("div", "text-secondary")
            .text(format!("{} · {}", conn.provider, conn.model_name))
            .into(),
    )
    .child(actions.into())
    .into()
}

/// Prompt card
pub fn prompt_card(prompt: &Prompt) -> Node {
    let mut header_actions = Element::new("div", "flex");
    if prompt.is_active {
        header_actions =
            header_actions.child(Element::new("span", "badge-active").text(ACTIVE_BADGE).into());
    }
    header_actions = header_actions
        .child(icon_button("edit-2", "Редактировать", Action::EditPrompt(prompt.id)))
        .child(icon_button("trash-2", "Удалить", Action::DeletePrompt(prompt.id)));

    let state_button = if prompt.is_active {
        icon_button("check", ACTIVE_BADGE, Action::DeactivatePrompt(prompt.id))
    } else {
        icon_button("play", "Активировать", Action::ActivatePrompt(prompt.id))
    };

    Element::new(
        "div",
        if prompt.is_active { "card card-active" } else { "card" },
    )
    .child(
        Element::new("div", "flex justify-between")
            .child(Element::new("strong", "").text(prompt.name.clone()).into())
            .child(header_actions.into())
            .into(),
    )
    .child(Element::new("pre", "prompt-content").text(prompt.content.clone()).into())
    .child(Element::new("div", "flex").child(state_button).into())
    .into()
}

/// Whitelist row of one platform tab
pub fn whitelist_row(entry: &WhitelistEntry, platform: Platform) -> Node {
    let title = entry
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED);

    Element::new("div", "whitelist-item")
        .child(
            Element::new("div", "grow")
                .child(Element::new("div", "title").text(title).into())
                .child(Element::new("div", "mono").text(entry.chat_id.clone()).into())
                .into(),
        )
        .child(
            Element::new("div", "flex")
                .child(Node::Switch(Switch {
                    id: entry.id,
                    on: entry.is_active,
                    title: if entry.is_active { "Активна" } else { "Неактивна" },
                    action: Action::ToggleWhitelist {
                        id: entry.id,
                        platform,
                    },
                }))
                .child(icon_button(
                    "trash-2",
                    "Удалить",
                    Action::DeleteWhitelist {
                        id: entry.id,
                        platform,
                    },
                ))
                .into(),
        )
        .into()
}

/// Chat history row
pub fn chat_row(chat: &ChatSummary) -> Node {
    let kind = chat.chat_type.as_deref().unwrap_or("chat");
    Element::new("div", "chat-item")
        .child(
            Element::new("div", "grow")
                .child(
                    Element::new("div", "title")
                        .text(format!("{} · {}", chat.platform, chat.chat_id))
                        .into(),
                )
                .child(
                    Element::new("div", "text-secondary")
                        .text(format!("{kind} · {} msg", chat.message_count))
                        .into(),
                )
                .into(),
        )
        .child(icon_button(
            "trash-2",
            "Удалить",
            Action::ClearChat {
                chat_id: chat.chat_id,
                platform: chat.platform,
            },
        ))
        .into()
}
