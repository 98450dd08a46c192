//! hisob-bot: chat-facing surface over the ledger core. Routes inbound
//! messages through parse/classify/record and renders localized replies.

pub mod config;
pub mod home;
pub mod notify;
pub mod reply;
pub mod router;

pub use notify::{ConsoleNotifier, Notifier, WebhookNotifier};
pub use router::{Inbound, Router};
