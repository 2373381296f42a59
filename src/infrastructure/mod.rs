pub mod i18n;
pub mod offline;
pub mod sync;

pub use i18n::StaticCatalog;
pub use offline::SqliteAssignOfflineStore;
pub use sync::{BroadcastSyncEvents, ConnectivityMonitor, InMemorySyncBlocker};
