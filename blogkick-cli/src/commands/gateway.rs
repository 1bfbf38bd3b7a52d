//! Terminal host for sidekick actions.
//!
//! Modals and notifications become printed lines, navigation is reported
//! rather than performed, and the clipboard is standard output.

use tracing::debug;

use blogkick::config::ProjectConfig;
use blogkick::environment::Location;
use blogkick::gateway::{ClipboardError, Dismissal, HostGateway};

use super::traits::Output;

/// [`HostGateway`] that prints to an [`Output`].
pub struct ConsoleGateway<'a> {
    config: ProjectConfig,
    location: Location,
    editor: bool,
    output: &'a dyn Output,
}

impl<'a> ConsoleGateway<'a> {
    pub fn new(
        config: ProjectConfig,
        location: Location,
        editor: bool,
        output: &'a dyn Output,
    ) -> Self {
        Self {
            config,
            location,
            editor,
            output,
        }
    }

    fn print_lines(&self, tag: &str, lines: &[String]) {
        for line in lines {
            self.output.println(&format!("[{}] {}", tag, line));
        }
    }
}

impl HostGateway for ConsoleGateway<'_> {
    fn config(&self) -> &ProjectConfig {
        &self.config
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn is_editor(&self) -> bool {
        self.editor
    }

    fn show_modal(&self, lines: &[String], blocking: bool, dismissal: Dismissal) {
        debug!(blocking, ?dismissal, "Modal shown");
        self.print_lines(if blocking { "modal" } else { "info" }, lines);
    }

    fn hide_modal(&self) {
        debug!("Modal hidden");
    }

    fn notify(&self, lines: &[String], dismissal: Dismissal) {
        debug!(?dismissal, "Notification shown");
        self.print_lines("notice", lines);
    }

    fn navigate(&self, url: &str) {
        self.output.println(&format!("Navigate to: {}", url));
    }

    fn open_window(&self, url: &str, name: &str) {
        self.output
            .println(&format!("Open in window '{}': {}", name, url));
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        self.output.println(text);
        Ok(())
    }
}
