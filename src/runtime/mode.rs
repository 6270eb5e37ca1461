//! Foreground/background visual-mode notifications for the presentation layer.
//!
//! This is a one-way stream: the scheduler never subscribes and keeps probing
//! whatever the mode is.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// How the presentation layer is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualMode {
    /// Full window.
    #[default]
    Foreground,
    /// Reduced view (picture-in-picture or similar).
    Background,
}

impl VisualMode {
    /// Map the platform's boolean flag.
    pub const fn from_background_flag(background: bool) -> Self {
        if background {
            Self::Background
        } else {
            Self::Foreground
        }
    }

    /// True for [`VisualMode::Background`].
    pub const fn is_background(self) -> bool {
        matches!(self, Self::Background)
    }
}

/// Publishes visual-mode changes.
#[derive(Debug)]
pub struct ModeNotifier {
    tx: watch::Sender<VisualMode>,
}

impl ModeNotifier {
    /// Start in [`VisualMode::Foreground`].
    pub fn new() -> Self {
        let (tx, _) = watch::channel(VisualMode::Foreground);
        Self { tx }
    }

    /// Record a mode change; subscribers are woken only if the mode differs.
    pub fn set(&self, mode: VisualMode) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == mode {
                false
            } else {
                *current = mode;
                true
            }
        });
        if changed {
            tracing::debug!(?mode, "visual mode changed");
        }
        changed
    }

    /// Convenience for platforms reporting a boolean flag.
    pub fn set_background(&self, background: bool) -> bool {
        self.set(VisualMode::from_background_flag(background))
    }

    /// Current mode.
    pub fn current(&self) -> VisualMode {
        *self.tx.borrow()
    }

    /// New subscription starting at the current mode.
    pub fn subscribe(&self) -> ModeSubscription {
        ModeSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ModeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of a [`ModeNotifier`].
#[derive(Debug, Clone)]
pub struct ModeSubscription {
    rx: watch::Receiver<VisualMode>,
}

impl ModeSubscription {
    /// Latest mode seen.
    pub fn current(&self) -> VisualMode {
        *self.rx.borrow()
    }

    /// Wait for the next change. Returns `None` once the notifier is dropped.
    pub async fn changed(&mut self) -> Option<VisualMode> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
