//! hisob-core: taxonomy, parsing, and classification for the Hisob ledger

pub mod amount;
pub mod classify;
pub mod locale;
pub mod selection;
pub mod taxonomy;

/// Stable external platform identifier for a user.
pub type UserId = i64;

pub use amount::{format_amount, parse_amount};
pub use classify::classify;
pub use locale::{Lang, Replies, replies};
pub use selection::{PendingSelection, SelectionBoard};
pub use taxonomy::{Category, DebtDirection, TxKind};
