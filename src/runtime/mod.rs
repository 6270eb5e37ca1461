//! Runtime adapters: tokio spawner and ticker, manual ticker, mode notifications,
//! history following, and the presentation-facing API surface.

pub mod api;
pub mod manual;
pub mod mode;
pub mod monitor;
pub mod tokio_spawner;
pub mod tokio_ticker;

pub use api::{history_view, status, HistoryEntryView, HistoryView, StartRequest, StatusView};
pub use manual::ManualTicker;
pub use mode::{ModeNotifier, ModeSubscription, VisualMode};
pub use monitor::{follow_history, HistoryCursor};
pub use tokio_spawner::TokioSpawner;
pub use tokio_ticker::TokioTicker;
