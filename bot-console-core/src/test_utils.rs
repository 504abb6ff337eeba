//! Test helper module
//!
//! Provides an in-memory admin server, recording views and a harness that
//! wires a whole console over them.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{ConsoleError, ConsoleResult};
use crate::render::Node;
use crate::services::{
    ApiClient, ApiClientConfig, ConsoleContext, ModalTiming, NotificationChannel,
};
use crate::traits::{
    ApiRequest, ApiResponse, ConfirmPresenter, Confirmer, FormMode, FormView, ListView,
    ModalView, Navigator, Notice, NoticeLevel, Notifier, PageView, SettingsForm, TabView,
    TextSlot, Transport,
};
use crate::types::{
    ChatSummary, Connection, ConnectionDraft, ConnectionPayload, DiscordSettings, FieldKind,
    FieldValue,
    GlobalSettings, HttpMethod, Id, NewWhitelistEntry, Platform, Prompt, PromptDraft,
    PromptPayload, SettingsField, TelegramSettings, ToggleRequest, WhitelistDraft,
    WhitelistEntry,
};
use crate::utils::lock;
use crate::workflows::{
    Console, ConsoleViews, ConnectionViews, HistoryViews, PlatformViews, PromptViews,
    SettingsViews, WhitelistViews,
};

// ===== Notifier / Navigator =====

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    fn messages(&self, level: NoticeLevel) -> Vec<String> {
        lock(&self.notices)
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NoticeLevel::Success)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NoticeLevel::Error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
    reloads: Mutex<usize>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<String> {
        lock(&self.redirects).clone()
    }

    pub fn reloads(&self) -> usize {
        *lock(&self.reloads)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &str) {
        lock(&self.redirects).push(route.to_string());
    }

    fn reload(&self) {
        *lock(&self.reloads) += 1;
    }
}

// ===== Confirmation =====

pub struct ScriptedConfirmer {
    answer: Mutex<bool>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new() -> Self {
        Self {
            answer: Mutex::new(true),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(&self, answer: bool) {
        *lock(&self.answer) = answer;
    }

    pub fn asked(&self) -> Vec<String> {
        lock(&self.asked).clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, message: &str, _title: &str) -> bool {
        lock(&self.asked).push(message.to_string());
        *lock(&self.answer)
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    presented: Mutex<Vec<(String, String)>>,
    dismissals: Mutex<usize>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> Vec<(String, String)> {
        lock(&self.presented).clone()
    }

    pub fn dismissals(&self) -> usize {
        *lock(&self.dismissals)
    }
}

impl ConfirmPresenter for RecordingPresenter {
    fn present(&self, title: &str, message: &str) {
        lock(&self.presented).push((title.to_string(), message.to_string()));
    }

    fn dismiss(&self) {
        *lock(&self.dismissals) += 1;
    }
}

// ===== Views =====

#[derive(Default)]
pub struct RecordingListView {
    nodes: Mutex<Vec<Node>>,
    replaces: Mutex<usize>,
    icon_passes: Mutex<usize>,
    switches: Mutex<Vec<(Id, bool)>>,
}

impl RecordingListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> Vec<Node> {
        lock(&self.nodes).clone()
    }

    /// Text content of each top-level node
    pub fn texts(&self) -> Vec<String> {
        lock(&self.nodes).iter().map(Node::text_content).collect()
    }

    pub fn replace_count(&self) -> usize {
        *lock(&self.replaces)
    }

    pub fn icon_passes(&self) -> usize {
        *lock(&self.icon_passes)
    }

    /// Displayed state of the switch bound to `id`
    pub fn switch_state(&self, id: Id) -> Option<bool> {
        lock(&self.nodes)
            .iter()
            .find_map(|n| n.find_switch(id))
            .map(|s| s.on)
    }

    /// Every local switch flip, in order
    pub fn switch_history(&self) -> Vec<(Id, bool)> {
        lock(&self.switches).clone()
    }
}

impl ListView for RecordingListView {
    fn replace(&self, nodes: Vec<Node>) {
        *lock(&self.nodes) = nodes;
        *lock(&self.replaces) += 1;
    }

    fn materialize_icons(&self) {
        *lock(&self.icon_passes) += 1;
    }

    fn set_switch(&self, id: Id, on: bool) {
        lock(&self.switches).push((id, on));
        for node in lock(&self.nodes).iter_mut() {
            if let Some(switch) = node.find_switch_mut(id) {
                switch.on = on;
            }
        }
    }
}

pub struct RecordingFormView<D> {
    draft: Mutex<D>,
    mode: Mutex<FormMode>,
    busy: Mutex<Vec<bool>>,
}

impl<D: Clone + Default> RecordingFormView<D> {
    pub fn new() -> Self {
        Self {
            draft: Mutex::new(D::default()),
            mode: Mutex::new(FormMode::Create),
            busy: Mutex::new(Vec::new()),
        }
    }

    /// Operator input
    pub fn type_in(&self, draft: D) {
        *lock(&self.draft) = draft;
    }

    pub fn current(&self) -> D {
        lock(&self.draft).clone()
    }

    pub fn mode(&self) -> FormMode {
        *lock(&self.mode)
    }

    pub fn busy_history(&self) -> Vec<bool> {
        lock(&self.busy).clone()
    }
}

impl<D: Clone + Default + Send> FormView<D> for RecordingFormView<D> {
    fn read(&self) -> D {
        self.current()
    }

    fn write(&self, draft: &D) {
        *lock(&self.draft) = draft.clone();
    }

    fn set_mode(&self, mode: FormMode) {
        *lock(&self.mode) = mode;
    }

    fn set_busy(&self, busy: bool) {
        lock(&self.busy).push(busy);
    }
}

#[derive(Default)]
pub struct RecordingModalView {
    visible: Mutex<bool>,
    shown: Mutex<bool>,
}

impl RecordingModalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> bool {
        *lock(&self.visible)
    }

    pub fn shown(&self) -> bool {
        *lock(&self.shown)
    }
}

impl ModalView for RecordingModalView {
    fn set_visible(&self, visible: bool) {
        *lock(&self.visible) = visible;
    }

    fn set_shown(&self, shown: bool) {
        *lock(&self.shown) = shown;
    }
}

#[derive(Default)]
pub struct RecordingPage {
    locked: Mutex<bool>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locked(&self) -> bool {
        *lock(&self.locked)
    }
}

impl PageView for RecordingPage {
    fn set_scroll_locked(&self, locked: bool) {
        *lock(&self.locked) = locked;
    }
}

#[derive(Default)]
pub struct RecordingTabs {
    active: Mutex<Vec<Platform>>,
}

impl RecordingTabs {
    pub fn active(&self) -> Vec<Platform> {
        lock(&self.active).clone()
    }
}

impl TabView for RecordingTabs {
    fn activate_tab(&self, platform: Platform) {
        lock(&self.active).push(platform);
    }
}

#[derive(Default)]
pub struct RecordingText {
    text: Mutex<String>,
}

impl RecordingText {
    pub fn text(&self) -> String {
        lock(&self.text).clone()
    }
}

impl TextSlot for RecordingText {
    fn set_text(&self, text: &str) {
        *lock(&self.text) = text.to_string();
    }
}

#[derive(Debug, Clone)]
enum Control {
    Flag(bool),
    Text(String),
}

/// Settings form holding only the controls it was built with
pub struct MemorySettingsForm {
    controls: Mutex<HashMap<SettingsField, Control>>,
}

impl MemorySettingsForm {
    pub fn with_fields(fields: &[SettingsField]) -> Self {
        let controls = fields
            .iter()
            .map(|&f| {
                let control = match f.kind() {
                    FieldKind::Flag => Control::Flag(false),
                    FieldKind::Number => Control::Text(String::new()),
                };
                (f, control)
            })
            .collect();
        Self {
            controls: Mutex::new(controls),
        }
    }

    pub fn complete() -> Self {
        Self::with_fields(SettingsField::all())
    }

    pub fn value(&self, field: SettingsField) -> Option<FieldValue> {
        match lock(&self.controls).get(&field)? {
            Control::Flag(on) => Some(FieldValue::Flag(*on)),
            Control::Text(text) => text.parse().ok().map(FieldValue::Number),
        }
    }

    pub fn set_text(&self, field: SettingsField, text: &str) {
        if let Some(control) = lock(&self.controls).get_mut(&field) {
            *control = Control::Text(text.to_string());
        }
    }

    pub fn write_flag(&self, field: SettingsField, on: bool) {
        if let Some(control) = lock(&self.controls).get_mut(&field) {
            *control = Control::Flag(on);
        }
    }
}

impl SettingsForm for MemorySettingsForm {
    fn has(&self, field: SettingsField) -> bool {
        lock(&self.controls).contains_key(&field)
    }

    fn read_flag(&self, field: SettingsField) -> Option<bool> {
        match lock(&self.controls).get(&field)? {
            Control::Flag(on) => Some(*on),
            Control::Text(_) => None,
        }
    }

    fn read_text(&self, field: SettingsField) -> Option<String> {
        match lock(&self.controls).get(&field)? {
            Control::Text(text) => Some(text.clone()),
            Control::Flag(_) => None,
        }
    }

    fn write(&self, field: SettingsField, value: FieldValue) {
        if let Some(control) = lock(&self.controls).get_mut(&field) {
            *control = match value {
                FieldValue::Flag(on) => Control::Flag(on),
                FieldValue::Number(n) => Control::Text(n.to_string()),
            };
        }
    }
}

// ===== Transports =====

/// Replays queued responses and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ConsoleResult<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: ApiResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    pub fn push_err(&self, err: ConsoleError) {
        lock(&self.responses).push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ConsoleResult<ApiResponse> {
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(ConsoleError::Network("no scripted response".into())))
    }
}

/// Method and URL of a recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
}

impl Request {
    pub fn new(method: HttpMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
        }
    }
}

pub fn sample_settings() -> GlobalSettings {
    GlobalSettings {
        telegram: TelegramSettings {
            enabled: true,
            allow_private: false,
            allow_new_chats: true,
            memory_limit: 20,
        },
        discord: DiscordSettings {
            enabled: true,
            allow_dms: false,
            allow_new_chats: false,
            music_enabled: true,
            memory_limit: 15,
            seek_time: 30,
        },
    }
}

struct ServerState {
    next_connection: Id,
    next_prompt: Id,
    next_whitelist: Id,
    connections: Vec<Connection>,
    prompts: Vec<Prompt>,
    whitelist: Vec<WhitelistEntry>,
    chats: Vec<ChatSummary>,
    settings: GlobalSettings,
    failing_checks: Vec<Id>,
    fail_next: Option<(u16, String)>,
    fail_next_get: Option<(u16, String)>,
    login_required: bool,
    requests: Vec<ApiRequest>,
}

type Reply = Result<ApiResponse, ApiResponse>;

fn reply(value: &Value) -> Reply {
    Ok(ApiResponse::json(200, value.to_string()))
}

fn error(status: u16, detail: &str) -> ApiResponse {
    ApiResponse::json(status, json!({ "detail": detail }).to_string())
}

fn parse_id(segment: &str) -> Result<Id, ApiResponse> {
    segment.parse().map_err(|_| error(422, "invalid id"))
}

fn body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, ApiResponse> {
    serde_json::from_str(request.body.as_deref().unwrap_or("null"))
        .map_err(|e| error(422, &e.to_string()))
}

impl ServerState {
    fn connection_mut(&mut self, id: Id) -> Result<&mut Connection, ApiResponse> {
        self.connections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| error(404, "Connection not found"))
    }

    fn prompt_mut(&mut self, id: Id) -> Result<&mut Prompt, ApiResponse> {
        self.prompts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| error(404, "Prompt not found"))
    }

    fn whitelist_mut(&mut self, id: Id) -> Result<&mut WhitelistEntry, ApiResponse> {
        self.whitelist
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| error(404, "Item not found"))
    }

    fn handle(&mut self, request: &ApiRequest) -> Reply {
        let url = request.url.strip_prefix("/admin/api").unwrap_or(&request.url);
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match (request.method, segments.as_slice()) {
            (HttpMethod::Get, ["llm", "connections"]) => {
                let list: Vec<Value> = self
                    .connections
                    .iter()
                    .map(|c| {
                        json!({
                            "id": c.id,
                            "name": c.name,
                            "provider": c.provider,
                            "model_name": c.model_name,
                            "is_active": c.is_active,
                        })
                    })
                    .collect();
                reply(&json!(list))
            }
            (HttpMethod::Post, ["llm", "connections"]) => {
                let payload: ConnectionPayload = body(request)?;
                let id = self.next_connection;
                self.next_connection += 1;
                self.connections.push(Connection {
                    id,
                    name: payload.name,
                    provider: payload.provider,
                    model_name: payload.model_name,
                    api_key: Some(payload.api_key),
                    base_url: payload.base_url,
                    is_active: payload.is_active,
                });
                reply(&json!({ "id": id }))
            }
            (HttpMethod::Post, ["llm", "connections", "check-temporary"]) => {
                let payload: ConnectionPayload = body(request)?;
                if payload.api_key == "invalid" {
                    reply(&json!({ "ok": false, "detail": "invalid api key" }))
                } else {
                    reply(&json!({ "ok": true }))
                }
            }
            (HttpMethod::Get, ["llm", "connections", id]) => {
                let conn = self.connection_mut(parse_id(id)?)?;
                reply(&serde_json::to_value(&*conn).unwrap())
            }
            (HttpMethod::Put, ["llm", "connections", id]) => {
                let payload: ConnectionPayload = body(request)?;
                let conn = self.connection_mut(parse_id(id)?)?;
                conn.name = payload.name;
                conn.provider = payload.provider;
                conn.model_name = payload.model_name;
                conn.api_key = Some(payload.api_key);
                conn.base_url = payload.base_url;
                reply(&json!({ "id": conn.id }))
            }
            (HttpMethod::Delete, ["llm", "connections", id]) => {
                let id = parse_id(id)?;
                self.connection_mut(id)?;
                self.connections.retain(|c| c.id != id);
                self.prompts.retain(|p| p.connection_id != Some(id));
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Post, ["llm", "connections", id, "activate"]) => {
                let id = parse_id(id)?;
                self.connection_mut(id)?;
                for conn in &mut self.connections {
                    conn.is_active = conn.id == id;
                }
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Post, ["llm", "connections", id, "check"]) => {
                let id = parse_id(id)?;
                self.connection_mut(id)?;
                reply(&json!({ "ok": !self.failing_checks.contains(&id) }))
            }
            (HttpMethod::Get, ["llm", "connections", id, "prompts"]) => {
                let id = parse_id(id)?;
                let list: Vec<Value> = self
                    .prompts
                    .iter()
                    .filter(|p| p.connection_id == Some(id))
                    .map(|p| {
                        json!({
                            "id": p.id,
                            "name": p.name,
                            "content": p.content,
                            "is_active": p.is_active,
                        })
                    })
                    .collect();
                reply(&json!(list))
            }
            (HttpMethod::Post, ["llm", "connections", id, "prompts"]) => {
                let connection_id = parse_id(id)?;
                self.connection_mut(connection_id)?;
                let payload: PromptPayload = body(request)?;
                let id = self.next_prompt;
                self.next_prompt += 1;
                self.prompts.push(Prompt {
                    id,
                    connection_id: Some(connection_id),
                    name: payload.name,
                    content: payload.content,
                    is_active: payload.is_active.unwrap_or(false),
                });
                reply(&json!({ "id": id }))
            }
            (HttpMethod::Put, ["llm", "prompts", id]) => {
                let payload: PromptPayload = body(request)?;
                let prompt = self.prompt_mut(parse_id(id)?)?;
                prompt.name = payload.name;
                prompt.content = payload.content;
                reply(&json!({ "id": prompt.id }))
            }
            (HttpMethod::Delete, ["llm", "prompts", id]) => {
                let id = parse_id(id)?;
                self.prompt_mut(id)?;
                self.prompts.retain(|p| p.id != id);
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Post, ["llm", "prompts", id, "activate"]) => {
                let id = parse_id(id)?;
                let owner = self.prompt_mut(id)?.connection_id;
                for prompt in self.prompts.iter_mut().filter(|p| p.connection_id == owner) {
                    prompt.is_active = prompt.id == id;
                }
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Post, ["llm", "prompts", id, "deactivate"]) => {
                self.prompt_mut(parse_id(id)?)?.is_active = false;
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Get, ["whitelist"]) => {
                let platform = query
                    .strip_prefix("platform=")
                    .and_then(|p| p.parse::<Platform>().ok());
                let list: Vec<&WhitelistEntry> = self
                    .whitelist
                    .iter()
                    .filter(|w| platform.is_none() || w.platform == platform)
                    .collect();
                reply(&serde_json::to_value(list).unwrap())
            }
            (HttpMethod::Post, ["whitelist"]) => {
                let entry: NewWhitelistEntry = body(request)?;
                let exists = self
                    .whitelist
                    .iter()
                    .any(|w| w.chat_id == entry.chat_id && w.platform == Some(entry.platform));
                if exists {
                    return Err(error(400, "Chat ID already in whitelist"));
                }
                let id = self.push_whitelist(
                    entry.platform,
                    &entry.chat_id,
                    Some(entry.title.as_str()),
                    true,
                );
                reply(&json!({ "id": id }))
            }
            (HttpMethod::Delete, ["whitelist", id]) => {
                let id = parse_id(id)?;
                self.whitelist_mut(id)?;
                self.whitelist.retain(|w| w.id != id);
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Post, ["whitelist", id, "toggle"]) => {
                let toggle: ToggleRequest = body(request)?;
                self.whitelist_mut(parse_id(id)?)?.is_active = toggle.is_active;
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Get, ["settings", "global"]) => {
                reply(&serde_json::to_value(&self.settings).unwrap())
            }
            (HttpMethod::Post, ["settings", "global"]) => {
                self.settings = body(request)?;
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Get, ["stats"]) => {
                let count = |platform| {
                    self.chats
                        .iter()
                        .filter(|c| c.platform == platform)
                        .map(|c| c.message_count)
                        .sum::<u64>()
                };
                let telegram = count(Platform::Telegram);
                let discord = count(Platform::Discord);
                let total = telegram + discord;
                reply(&json!({
                    "chats_count": self.chats.len(),
                    "total_messages": total,
                    "telegram_messages": telegram,
                    "discord_messages": discord,
                    "messages_24h": total,
                    "active_chats_24h": self.chats.len(),
                    "assistant_messages": total / 2,
                    "user_messages": total - total / 2,
                }))
            }
            (HttpMethod::Get, ["chats"]) => reply(&serde_json::to_value(&self.chats).unwrap()),
            (HttpMethod::Post, ["clear-all"]) => {
                self.chats.clear();
                reply(&json!({ "ok": true }))
            }
            (HttpMethod::Post, ["clear", chat_id, platform]) => {
                let chat_id = parse_id(chat_id)?;
                let platform: Platform = platform.parse().map_err(|e: String| error(422, &e))?;
                self.chats
                    .retain(|c| !(c.chat_id == chat_id && c.platform == platform));
                reply(&json!({ "ok": true }))
            }
            _ => Err(error(404, "Not Found")),
        }
    }

    fn push_whitelist(
        &mut self,
        platform: Platform,
        chat_id: &str,
        title: Option<&str>,
        active: bool,
    ) -> Id {
        let id = self.next_whitelist;
        self.next_whitelist += 1;
        self.whitelist.push(WhitelistEntry {
            id,
            chat_id: chat_id.to_string(),
            platform: Some(platform),
            title: title.map(str::to_string),
            is_active: active,
            created_at: Some("2024-05-01T10:00:00".to_string()),
        });
        id
    }
}

/// In-memory admin API with the server's cascade and exclusivity rules
pub struct FakeAdminServer {
    state: Mutex<ServerState>,
}

impl FakeAdminServer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServerState {
                next_connection: 1,
                next_prompt: 1,
                next_whitelist: 1,
                connections: Vec::new(),
                prompts: Vec::new(),
                whitelist: Vec::new(),
                chats: Vec::new(),
                settings: sample_settings(),
                failing_checks: Vec::new(),
                fail_next: None,
                fail_next_get: None,
                login_required: false,
                requests: Vec::new(),
            }),
        }
    }

    pub fn seed_connection(&self, name: &str, active: bool) -> Id {
        let mut state = lock(&self.state);
        let id = state.next_connection;
        state.next_connection += 1;
        state.connections.push(Connection {
            id,
            name: name.to_string(),
            provider: "openai".to_string(),
            model_name: "gpt-4o".to_string(),
            api_key: Some(format!("sk-{name}")),
            base_url: None,
            is_active: active,
        });
        id
    }

    pub fn seed_prompt(&self, connection_id: Id, name: &str, content: &str, active: bool) -> Id {
        let mut state = lock(&self.state);
        let id = state.next_prompt;
        state.next_prompt += 1;
        state.prompts.push(Prompt {
            id,
            connection_id: Some(connection_id),
            name: name.to_string(),
            content: content.to_string(),
            is_active: active,
        });
        id
    }

    pub fn seed_whitelist(
        &self,
        platform: Platform,
        chat_id: &str,
        title: Option<&str>,
        active: bool,
    ) -> Id {
        lock(&self.state).push_whitelist(platform, chat_id, title, active)
    }

    pub fn seed_chat(&self, chat_id: i64, platform: Platform, messages: u64) {
        lock(&self.state).chats.push(ChatSummary {
            chat_id,
            platform,
            chat_type: Some("group".to_string()),
            message_count: messages,
            last_message_at: None,
        });
    }

    /// `/check` of `id` reports failure
    pub fn fail_checks_for(&self, id: Id) {
        lock(&self.state).failing_checks.push(id);
    }

    /// Answer the next request with `status` and `{"detail": detail}`
    pub fn fail_next(&self, status: u16, detail: &str) {
        lock(&self.state).fail_next = Some((status, detail.to_string()));
    }

    /// Answer the next GET with `status`; other requests still succeed
    pub fn fail_next_get(&self, status: u16, detail: &str) {
        lock(&self.state).fail_next_get = Some((status, detail.to_string()));
    }

    /// Answer every request with 401
    pub fn require_login(&self) {
        lock(&self.state).login_required = true;
    }

    pub fn connections(&self) -> Vec<Connection> {
        lock(&self.state).connections.clone()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        lock(&self.state).prompts.clone()
    }

    pub fn whitelist(&self, platform: Platform) -> Vec<WhitelistEntry> {
        lock(&self.state)
            .whitelist
            .iter()
            .filter(|w| w.platform == Some(platform))
            .cloned()
            .collect()
    }

    pub fn settings(&self) -> GlobalSettings {
        lock(&self.state).settings.clone()
    }

    pub fn requests(&self) -> Vec<Request> {
        lock(&self.state)
            .requests
            .iter()
            .map(|r| Request::new(r.method, &r.url))
            .collect()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.requests().pop()
    }

    pub fn bodies(&self) -> Vec<String> {
        lock(&self.state)
            .requests
            .iter()
            .filter_map(|r| r.body.clone())
            .collect()
    }

    pub fn last_body(&self) -> Option<String> {
        self.bodies().pop()
    }
}

#[async_trait]
impl Transport for FakeAdminServer {
    async fn send(&self, request: ApiRequest) -> ConsoleResult<ApiResponse> {
        let mut state = lock(&self.state);
        state.requests.push(request.clone());
        if state.login_required {
            return Ok(error(401, "Not authenticated"));
        }
        if let Some((status, detail)) = state.fail_next.take() {
            return Ok(error(status, &detail));
        }
        if request.method == HttpMethod::Get {
            if let Some((status, detail)) = state.fail_next_get.take() {
                return Ok(error(status, &detail));
            }
        }
        Ok(state.handle(&request).unwrap_or_else(|e| e))
    }
}

// ===== Harness =====

/// API client over `transport` with recording sinks
pub struct ApiHarness {
    pub api: Arc<ApiClient>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

impl ApiHarness {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let api = Arc::new(ApiClient::new(
            transport,
            NotificationChannel::new(notifier.clone()),
            navigator.clone(),
            ApiClientConfig::default(),
        ));
        Self {
            api,
            notifier,
            navigator,
        }
    }
}

#[derive(Default)]
pub struct TestViews {
    pub connections_list: Arc<RecordingListView>,
    pub connection_form: Arc<RecordingFormView<ConnectionDraft>>,
    pub connection_modal: Arc<RecordingModalView>,
    pub prompts_list: Arc<RecordingListView>,
    pub prompt_form: Arc<RecordingFormView<PromptDraft>>,
    pub prompt_modal: Arc<RecordingModalView>,
    pub prompt_header: Arc<RecordingText>,
    pub telegram_list: Arc<RecordingListView>,
    pub telegram_form: Arc<RecordingFormView<WhitelistDraft>>,
    pub discord_list: Arc<RecordingListView>,
    pub discord_form: Arc<RecordingFormView<WhitelistDraft>>,
    pub settings_modal: Arc<RecordingModalView>,
    pub tabs: Arc<RecordingTabs>,
    pub settings_form: Arc<MemorySettingsForm>,
    pub history_list: Arc<RecordingListView>,
    pub history_stats: Arc<RecordingText>,
    pub page: Arc<RecordingPage>,
}

impl<D: Clone + Default> Default for RecordingFormView<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for MemorySettingsForm {
    fn default() -> Self {
        Self::complete()
    }
}

impl TestViews {
    fn console_views(&self) -> ConsoleViews {
        ConsoleViews {
            connections: ConnectionViews {
                list: self.connections_list.clone(),
                form: self.connection_form.clone(),
                modal: self.connection_modal.clone(),
            },
            prompts: PromptViews {
                list: self.prompts_list.clone(),
                form: self.prompt_form.clone(),
                modal: self.prompt_modal.clone(),
                header: self.prompt_header.clone(),
            },
            whitelist: WhitelistViews {
                telegram: PlatformViews {
                    list: self.telegram_list.clone(),
                    form: self.telegram_form.clone(),
                },
                discord: PlatformViews {
                    list: self.discord_list.clone(),
                    form: self.discord_form.clone(),
                },
            },
            settings: SettingsViews {
                modal: self.settings_modal.clone(),
                tabs: self.tabs.clone(),
                form: self.settings_form.clone(),
            },
            history: HistoryViews {
                list: self.history_list.clone(),
                stats: self.history_stats.clone(),
            },
        }
    }
}

/// Whole console over a [`FakeAdminServer`] and recording views
pub struct Harness {
    pub server: Arc<FakeAdminServer>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub confirmer: Arc<ScriptedConfirmer>,
    pub views: TestViews,
    pub ctx: Arc<ConsoleContext>,
    pub console: Console,
}

impl Harness {
    pub fn new() -> Self {
        let server = Arc::new(FakeAdminServer::new());
        let ApiHarness {
            api,
            notifier,
            navigator,
        } = ApiHarness::new(server.clone());
        let confirmer = Arc::new(ScriptedConfirmer::new());
        let views = TestViews::default();
        let ctx = Arc::new(
            ConsoleContext::new(api, confirmer.clone(), views.page.clone())
                .with_modal_timing(ModalTiming::instant()),
        );
        let console = Console::new(ctx.clone(), views.console_views());
        Self {
            server,
            notifier,
            navigator,
            confirmer,
            views,
            ctx,
            console,
        }
    }
}
