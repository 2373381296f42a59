pub mod block_registry;
pub mod connectivity;
pub mod event_bus;

pub use block_registry::InMemorySyncBlocker;
pub use connectivity::ConnectivityMonitor;
pub use event_bus::BroadcastSyncEvents;
