//! hisob-ledger: append-only ledger, materialized balances, and budget
//! limits behind a narrow storage boundary.

pub mod budget;
pub mod export;
pub mod memory;
pub mod recorder;
pub mod stats;
pub mod store;
pub mod types;

pub use budget::{BudgetAlert, BudgetEvaluator, BudgetStatus};
pub use export::export_csv;
pub use memory::MemoryStore;
pub use recorder::{BalanceStrategy, RecordError, Recorder};
pub use stats::{PeriodSummary, period_summary};
pub use store::{Store, StoreError};
pub use types::{BudgetLimit, Source, Transaction, User};
