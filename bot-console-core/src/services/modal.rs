//! Modal lifecycle controller
//!
//! A modal is `Closed -> Opening -> Open -> Closing -> Closed`. Opening makes
//! the dialog visible and locks page scroll at once; the transition class is
//! applied after the show delay. Closing removes the class at once and hides
//! the dialog after the hide delay.
//!
//! Every transition bumps a generation counter and hands out a
//! [`ModalTicket`]. Completing a transition with a stale ticket is ignored,
//! so a close timer that fires after the modal was reopened cannot hide it
//! or unlock the page.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{ModalView, PageView};
use crate::utils::lock;

/// Transition delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTiming {
    pub show_delay: Duration,
    pub hide_delay: Duration,
}

impl Default for ModalTiming {
    fn default() -> Self {
        Self {
            show_delay: Duration::from_millis(10),
            hide_delay: Duration::from_millis(300),
        }
    }
}

impl ModalTiming {
    /// No transition delays (terminal frontends, tests)
    pub fn instant() -> Self {
        Self {
            show_delay: Duration::ZERO,
            hide_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Where a click inside the modal landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Backdrop around the dialog body
    Backdrop,
    /// Anywhere inside the dialog body
    Body,
    /// Explicit close control
    CloseControl,
}

/// Generation handle of a pending transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTicket(u64);

#[derive(Default)]
struct ModalState {
    phase: ModalPhase,
    generation: u64,
}

type ResetHook = Box<dyn Fn() + Send + Sync>;

/// Controller of one modal dialog
pub struct ModalController {
    name: &'static str,
    view: Arc<dyn ModalView>,
    page: Arc<dyn PageView>,
    timing: ModalTiming,
    state: Mutex<ModalState>,
    on_closed: Option<ResetHook>,
}

impl ModalController {
    #[must_use]
    pub fn new(
        name: &'static str,
        view: Arc<dyn ModalView>,
        page: Arc<dyn PageView>,
        timing: ModalTiming,
    ) -> Self {
        Self {
            name,
            view,
            page,
            timing,
            state: Mutex::new(ModalState::default()),
            on_closed: None,
        }
    }

    /// Run `hook` whenever the modal finishes closing
    #[must_use]
    pub fn with_reset(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_closed = Some(Box::new(hook));
        self
    }

    pub fn phase(&self) -> ModalPhase {
        lock(&self.state).phase
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase(), ModalPhase::Opening | ModalPhase::Open)
    }

    /// Start opening
    ///
    /// Opening an already open modal keeps it open.
    pub fn open(&self) -> ModalTicket {
        let ticket = {
            let mut state = lock(&self.state);
            if state.phase == ModalPhase::Open {
                return ModalTicket(state.generation);
            }
            state.generation += 1;
            state.phase = ModalPhase::Opening;
            ModalTicket(state.generation)
        };
        log::debug!("[modal:{}] opening", self.name);
        self.view.set_visible(true);
        self.page.set_scroll_locked(true);
        ticket
    }

    /// Apply the transition class once the show delay has elapsed
    pub fn complete_open(&self, ticket: ModalTicket) -> bool {
        {
            let mut state = lock(&self.state);
            if state.generation != ticket.0 || state.phase != ModalPhase::Opening {
                return false;
            }
            state.phase = ModalPhase::Open;
        }
        self.view.set_shown(true);
        true
    }

    /// Start closing; `None` if already closed or closing
    pub fn close(&self) -> Option<ModalTicket> {
        let ticket = {
            let mut state = lock(&self.state);
            if matches!(state.phase, ModalPhase::Closed | ModalPhase::Closing) {
                return None;
            }
            state.generation += 1;
            state.phase = ModalPhase::Closing;
            ModalTicket(state.generation)
        };
        log::debug!("[modal:{}] closing", self.name);
        self.view.set_shown(false);
        Some(ticket)
    }

    /// Close on backdrop or close control; clicks inside the body do nothing
    pub fn request_close(&self, target: ClickTarget) -> Option<ModalTicket> {
        match target {
            ClickTarget::Body => None,
            ClickTarget::Backdrop | ClickTarget::CloseControl => self.close(),
        }
    }

    /// Hide the dialog once the hide delay has elapsed
    pub fn complete_close(&self, ticket: ModalTicket) -> bool {
        {
            let mut state = lock(&self.state);
            if state.generation != ticket.0 || state.phase != ModalPhase::Closing {
                log::debug!("[modal:{}] stale close ignored", self.name);
                return false;
            }
            state.phase = ModalPhase::Closed;
        }
        self.view.set_visible(false);
        self.page.set_scroll_locked(false);
        if let Some(hook) = &self.on_closed {
            hook();
        }
        true
    }

    /// Open and wait for the show delay
    pub async fn show(&self) {
        let ticket = self.open();
        tokio::time::sleep(self.timing.show_delay).await;
        self.complete_open(ticket);
    }

    /// Close and wait for the hide delay
    pub async fn hide(&self) {
        if let Some(ticket) = self.close() {
            tokio::time::sleep(self.timing.hide_delay).await;
            self.complete_close(ticket);
        }
    }

    /// [`Self::request_close`] followed by the hide delay
    pub async fn dismiss(&self, target: ClickTarget) {
        if let Some(ticket) = self.request_close(target) {
            tokio::time::sleep(self.timing.hide_delay).await;
            self.complete_close(ticket);
        }
    }
}
