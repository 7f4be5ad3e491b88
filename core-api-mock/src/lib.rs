/// Core API Mock Server Library
///
/// In-memory stand-in for the balance explorer, the core node wallet API and
/// the backup email service, for exercising account actions end to end.

pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

pub use server::{create_router, run_server, spawn_server};
pub use state::{MockLedger, RecordedBackup, RecordedWithdrawal};
pub use types::*;
