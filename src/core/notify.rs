//! User-notification seam.
//! The pipeline never prints directly: it reports through this trait so
//! the CLI can route messages to `ui::messages` and tests can capture them.

use crate::ui::messages;

pub trait Notifier {
    /// Informational, non-blocking (e.g. "saved locally").
    fn info(&self, msg: &str);
    /// Positive confirmation of a completed action.
    fn success(&self, msg: &str);
    /// Non-blocking degradation (location failure, sync trouble).
    fn warning(&self, msg: &str);
}

/// Routes notifications to the colored CLI message helpers.
pub struct CliNotifier;

impl Notifier for CliNotifier {
    fn info(&self, msg: &str) {
        messages::info(msg);
    }

    fn success(&self, msg: &str) {
        messages::success(msg);
    }

    fn warning(&self, msg: &str) {
        messages::warning(msg);
    }
}
