//! Terminal implementations of the console views
//!
//! Lists keep their last rendered content and are printed on demand;
//! modals, tabs and the page have no terminal counterpart and only log.

use std::collections::HashMap;
use std::io::Write as _;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bot_console_core::render::Node;
use bot_console_core::services::{ConfirmResolution, ConfirmationGate};
use bot_console_core::traits::{
    ConfirmPresenter, Confirmer, FormMode, FormView, ListView, ModalView, Navigator, Notice,
    Notifier, PageView, SettingsForm, TabView, TextSlot,
};
use bot_console_core::types::{
    ConnectionDraft, FieldKind, FieldValue, Id, Platform, PromptDraft, SettingsField,
    WhitelistDraft,
};
use bot_console_core::utils::lock;
use bot_console_core::workflows::{
    ConnectionViews, ConsoleViews, HistoryViews, PlatformViews, PromptViews, SettingsViews,
    WhitelistViews,
};

// ===== Notices and navigation =====

/// Prints notices, errors to stderr
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            eprintln!("✗ {}", notice.message);
        } else {
            println!("✓ {}", notice.message);
        }
    }
}

/// Explains where to sign in; a reload has nothing to drop
pub struct TerminalNavigator {
    base_url: String,
}

impl TerminalNavigator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: &str) {
        eprintln!(
            "Authentication required: sign in at {}{route} and pass the session cookie with --session",
            self.base_url
        );
    }

    fn reload(&self) {
        log::debug!("Reload requested");
    }
}

// ===== Confirmation =====

/// Prints the question to stderr
pub struct TerminalPresenter;

impl ConfirmPresenter for TerminalPresenter {
    fn present(&self, title: &str, message: &str) {
        eprint!("{title}: {message} [y/N] ");
        let _ = std::io::stderr().flush();
    }

    fn dismiss(&self) {
        log::trace!("Confirmation dismissed");
    }
}

fn read_answer() -> ConfirmResolution {
    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => ConfirmResolution::Closed,
        Ok(_) => match line.trim().to_lowercase().as_str() {
            "y" | "yes" | "д" | "да" => ConfirmResolution::Accepted,
            _ => ConfirmResolution::Cancelled,
        },
    }
}

/// Confirmation gate answered from stdin
pub struct TerminalConfirmer {
    gate: Arc<ConfirmationGate>,
}

impl Default for TerminalConfirmer {
    fn default() -> Self {
        Self {
            gate: Arc::new(ConfirmationGate::new(Arc::new(TerminalPresenter))),
        }
    }
}

#[async_trait]
impl Confirmer for TerminalConfirmer {
    async fn confirm(&self, message: &str, title: &str) -> bool {
        let answer = async {
            let resolution = tokio::task::spawn_blocking(read_answer)
                .await
                .unwrap_or(ConfirmResolution::Closed);
            self.gate.resolve(resolution);
        };
        let (accepted, ()) = tokio::join!(self.gate.confirm(message, title), answer);
        accepted
    }
}

// ===== Lists =====

fn collect_parts(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Text(text) => {
            let text = text.trim();
            if !text.is_empty() {
                out.push(text.to_string());
            }
        }
        Node::Element(el) => {
            for child in &el.children {
                collect_parts(child, out);
            }
        }
        Node::Switch(switch) => out.push(format!("[{}]", switch.title)),
        Node::Icon(_) => {}
    }
}

/// One terminal line per rendered item, prefixed with the entity id
pub fn describe(node: &Node) -> String {
    let mut parts = Vec::new();
    collect_parts(node, &mut parts);
    let text = parts.join("  ");
    match node.actions().first() {
        Some(action) => format!("#{:<6} {text}", action.target()),
        None => text,
    }
}

/// Keeps the last rendered list
#[derive(Default)]
pub struct TerminalList {
    nodes: Mutex<Vec<Node>>,
}

impl TerminalList {
    pub fn lines(&self) -> Vec<String> {
        lock(&self.nodes).iter().map(describe).collect()
    }

    pub fn print(&self) {
        for line in self.lines() {
            println!("{line}");
        }
    }
}

impl ListView for TerminalList {
    fn replace(&self, nodes: Vec<Node>) {
        *lock(&self.nodes) = nodes;
    }

    fn materialize_icons(&self) {}

    fn set_switch(&self, id: Id, on: bool) {
        for node in lock(&self.nodes).iter_mut() {
            if let Some(switch) = node.find_switch_mut(id) {
                switch.on = on;
                switch.title = if on { "Активна" } else { "Неактивна" };
            }
        }
    }
}

// ===== Forms =====

/// Form state filled from command-line arguments
#[derive(Default)]
pub struct MemoryForm<D> {
    draft: Mutex<D>,
}

impl<D: Clone + Send> FormView<D> for MemoryForm<D> {
    fn read(&self) -> D {
        lock(&self.draft).clone()
    }

    fn write(&self, draft: &D) {
        *lock(&self.draft) = draft.clone();
    }

    fn set_mode(&self, mode: FormMode) {
        log::trace!("Form mode: {mode:?}");
    }

    fn set_busy(&self, busy: bool) {
        if busy {
            eprintln!("Проверка...");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Control {
    Flag(bool),
    Text(String),
}

/// Every settings control, kept as the operator would type it
pub struct MemorySettingsForm {
    controls: Mutex<HashMap<SettingsField, Control>>,
}

impl Default for MemorySettingsForm {
    fn default() -> Self {
        let controls = SettingsField::all()
            .iter()
            .map(|&field| {
                let control = match field.kind() {
                    FieldKind::Flag => Control::Flag(false),
                    FieldKind::Number => Control::Text(String::new()),
                };
                (field, control)
            })
            .collect();
        Self {
            controls: Mutex::new(controls),
        }
    }
}

impl MemorySettingsForm {
    /// Apply `key=value`; numbers are kept as typed
    pub fn assign(&self, assignment: &str) -> Result<(), String> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got `{assignment}`"))?;
        let field = SettingsField::from_key(key.trim())
            .ok_or_else(|| format!("unknown setting `{}`", key.trim()))?;
        let value = value.trim();
        let control = match field.kind() {
            FieldKind::Flag => Control::Flag(parse_flag(value)?),
            FieldKind::Number => Control::Text(value.to_string()),
        };
        lock(&self.controls).insert(field, control);
        Ok(())
    }

    pub fn lines(&self) -> Vec<String> {
        let controls = lock(&self.controls);
        SettingsField::all()
            .iter()
            .filter_map(|field| {
                let value = match controls.get(field)? {
                    Control::Flag(on) => on.to_string(),
                    Control::Text(text) => text.clone(),
                };
                Some(format!("{} = {value}", field.key()))
            })
            .collect()
    }
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(format!("expected true or false, got `{other}`")),
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
        let control = match value {
            FieldValue::Flag(on) => Control::Flag(on),
            FieldValue::Number(n) => Control::Text(n.to_string()),
        };
        lock(&self.controls).insert(field, control);
    }
}

// ===== Headless views =====

/// Modal without a screen
pub struct HeadlessModal(pub &'static str);

impl ModalView for HeadlessModal {
    fn set_visible(&self, visible: bool) {
        log::trace!("[{}] visible={visible}", self.0);
    }

    fn set_shown(&self, shown: bool) {
        log::trace!("[{}] shown={shown}", self.0);
    }
}

pub struct HeadlessPage;

impl PageView for HeadlessPage {
    fn set_scroll_locked(&self, _locked: bool) {}
}

pub struct HeadlessTabs;

impl TabView for HeadlessTabs {
    fn activate_tab(&self, platform: Platform) {
        log::trace!("Settings tab: {platform}");
    }
}

#[derive(Default)]
pub struct TerminalText {
    text: Mutex<String>,
}

impl TerminalText {
    pub fn text(&self) -> String {
        lock(&self.text).clone()
    }
}

impl TextSlot for TerminalText {
    fn set_text(&self, text: &str) {
        *lock(&self.text) = text.to_string();
    }
}

// ===== All views =====

/// List and form of one whitelist platform
#[derive(Default)]
pub struct PlatformPane {
    pub list: Arc<TerminalList>,
    pub form: Arc<MemoryForm<WhitelistDraft>>,
}

impl PlatformPane {
    fn views(&self) -> PlatformViews {
        PlatformViews {
            list: self.list.clone(),
            form: self.form.clone(),
        }
    }
}

/// Concrete handles to every view the console renders into
pub struct TerminalViews {
    pub connections: Arc<TerminalList>,
    pub connection_form: Arc<MemoryForm<ConnectionDraft>>,
    pub prompts: Arc<TerminalList>,
    pub prompt_form: Arc<MemoryForm<PromptDraft>>,
    pub prompts_header: Arc<TerminalText>,
    pub telegram: PlatformPane,
    pub discord: PlatformPane,
    pub settings: Arc<MemorySettingsForm>,
    pub chats: Arc<TerminalList>,
    pub stats: Arc<TerminalText>,
}

impl Default for TerminalViews {
    fn default() -> Self {
        Self {
            connections: Arc::default(),
            connection_form: Arc::default(),
            prompts: Arc::default(),
            prompt_form: Arc::default(),
            prompts_header: Arc::default(),
            telegram: PlatformPane::default(),
            discord: PlatformPane::default(),
            settings: Arc::default(),
            chats: Arc::default(),
            stats: Arc::default(),
        }
    }
}

impl TerminalViews {

    pub fn pane(&self, platform: Platform) -> &PlatformPane {
        match platform {
            Platform::Telegram => &self.telegram,
            Platform::Discord => &self.discord,
        }
    }

    pub fn console_views(&self) -> ConsoleViews {
        ConsoleViews {
            connections: ConnectionViews {
                list: self.connections.clone(),
                form: self.connection_form.clone(),
                modal: Arc::new(HeadlessModal("connection")),
            },
            prompts: PromptViews {
                list: self.prompts.clone(),
                form: self.prompt_form.clone(),
                modal: Arc::new(HeadlessModal("prompts")),
                header: self.prompts_header.clone(),
            },
            whitelist: WhitelistViews {
                telegram: self.telegram.views(),
                discord: self.discord.views(),
            },
            settings: SettingsViews {
                modal: Arc::new(HeadlessModal("settings")),
                tabs: Arc::new(HeadlessTabs),
                form: self.settings.clone(),
            },
            history: HistoryViews {
                list: self.chats.clone(),
                stats: self.stats.clone(),
            },
        }
    }
}
