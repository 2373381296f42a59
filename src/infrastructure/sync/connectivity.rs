use crate::application::ports::NetworkStatus;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Connectivity flag fed by the platform's network callbacks.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    online: AtomicBool,
}

impl ConnectivityMonitor {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous != online {
            info!(online, "network status changed");
        }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl NetworkStatus for ConnectivityMonitor {
    async fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
