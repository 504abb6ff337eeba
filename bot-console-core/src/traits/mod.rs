//! Seams to the outside world: the network and the rendering target

mod confirmer;
mod navigator;
mod notifier;
mod transport;
mod views;

pub use confirmer::{ConfirmPresenter, Confirmer};
pub use navigator::Navigator;
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use transport::{ApiRequest, ApiResponse, Transport};
pub use views::{FormMode, FormView, ListView, ModalView, PageView, SettingsForm, TabView, TextSlot};
