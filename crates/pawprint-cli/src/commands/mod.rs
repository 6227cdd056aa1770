//! Command implementations

pub mod account;
pub mod avatar;
pub mod profile;

use pawprint_core::PawprintConfig;
use pawprint_store::FileStore;
use tracing::debug;

/// What every command needs: settings and the record directory
pub struct Context {
    pub config: PawprintConfig,
}

impl Context {
    pub fn new(config: PawprintConfig) -> Self {
        debug!(data_dir = %config.resolved_data_dir().display(), "Using data directory");
        Self { config }
    }

    /// Store over the data directory
    pub fn store(&self) -> FileStore {
        FileStore::new(self.config.resolved_data_dir())
    }
}

/// Dash for an empty field
fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
