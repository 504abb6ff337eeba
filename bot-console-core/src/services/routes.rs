//! Admin API endpoint paths, relative to the API root

use crate::types::{Id, Platform};

pub const CONNECTIONS: &str = "/llm/connections";
pub const CHECK_TEMPORARY: &str = "/llm/connections/check-temporary";
pub const WHITELIST: &str = "/whitelist";
pub const GLOBAL_SETTINGS: &str = "/settings/global";
pub const STATS: &str = "/stats";
pub const CHATS: &str = "/chats";
pub const CLEAR_ALL: &str = "/clear-all";

pub fn connection(id: Id) -> String {
    format!("{CONNECTIONS}/{id}")
}

pub fn activate_connection(id: Id) -> String {
    format!("{CONNECTIONS}/{id}/activate")
}

pub fn check_connection(id: Id) -> String {
    format!("{CONNECTIONS}/{id}/check")
}

pub fn connection_prompts(connection_id: Id) -> String {
    format!("{CONNECTIONS}/{connection_id}/prompts")
}

pub fn prompt(id: Id) -> String {
    format!("/llm/prompts/{id}")
}

pub fn activate_prompt(id: Id) -> String {
    format!("/llm/prompts/{id}/activate")
}

pub fn deactivate_prompt(id: Id) -> String {
    format!("/llm/prompts/{id}/deactivate")
}

pub fn whitelist_for(platform: Platform) -> String {
    format!(
        "{WHITELIST}?platform={}",
        urlencoding::encode(platform.as_str())
    )
}

pub fn whitelist_entry(id: Id) -> String {
    format!("{WHITELIST}/{id}")
}

pub fn toggle_whitelist_entry(id: Id) -> String {
    format!("{WHITELIST}/{id}/toggle")
}

pub fn clear_chat(chat_id: i64, platform: Platform) -> String {
    format!(
        "/clear/{chat_id}/{}",
        urlencoding::encode(platform.as_str())
    )
}
