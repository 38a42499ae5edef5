//! Command implementations for the sync-data CLI

mod list;
mod sync;

pub use list::run_list;
pub use sync::{SyncFlags, run_sync};
