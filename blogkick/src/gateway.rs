//! The host surface the actions run inside.
//!
//! The host owns the page: it knows where the operator is, holds the project
//! configuration and renders overlays and notifications. Actions only talk to
//! it through [`HostGateway`].

use std::time::Duration;
use thiserror::Error;

use crate::config::ProjectConfig;
use crate::environment::Location;

/// How long a modal or notification stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Host default
    Auto,
    /// Stays until the operator closes it
    Sticky,
    /// Closes itself after the given delay
    After(Duration),
}

/// Clipboard writes can be refused by the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Capabilities the host offers to actions.
pub trait HostGateway: Send + Sync {
    /// Project configuration, as given by the host (not normalized).
    fn config(&self) -> &ProjectConfig;

    /// Address of the page the action fired on.
    fn location(&self) -> &Location;

    /// True when the page is the authoring view of the source document.
    fn is_editor(&self) -> bool;

    /// Show a modal. Blocking modals cover the page until hidden.
    fn show_modal(&self, lines: &[String], blocking: bool, dismissal: Dismissal);

    fn hide_modal(&self);

    /// Show a non-blocking notification.
    fn notify(&self, lines: &[String], dismissal: Dismissal);

    /// Navigate the current page.
    fn navigate(&self, url: &str);

    /// Open `url` in a named window.
    fn open_window(&self, url: &str, name: &str);

    fn copy_to_clipboard(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Blocking status overlay held by a running action.
///
/// Acquiring shows a blocking modal; the modal is hidden when the guard is
/// released or dropped, whichever comes first.
pub struct StatusOverlay<'a> {
    gateway: &'a dyn HostGateway,
    held: bool,
}

impl<'a> StatusOverlay<'a> {
    pub fn acquire(gateway: &'a dyn HostGateway, message: &str) -> Self {
        gateway.show_modal(&[message.to_string()], true, Dismissal::Auto);
        Self {
            gateway,
            held: true,
        }
    }

    /// Hide the overlay now.
    pub fn release(mut self) {
        self.hide();
    }

    fn hide(&mut self) {
        if self.held {
            self.gateway.hide_modal();
            self.held = false;
        }
    }
}

impl Drop for StatusOverlay<'_> {
    fn drop(&mut self) {
        self.hide();
    }
}
