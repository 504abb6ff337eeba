//! Page navigation Trait

/// Whole-page navigation
pub trait Navigator: Send + Sync {
    /// Leave the console for `route` (login page after a 401)
    fn redirect(&self, route: &str);

    /// Reload the current page; all page-session state is dropped
    fn reload(&self);
}
