use crate::application::ports::SyncEventPublisher;
use crate::domain::entities::AssignSyncEvent;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Fans sync events out to every live subscriber.
#[derive(Clone)]
pub struct BroadcastSyncEvents {
    sender: broadcast::Sender<AssignSyncEvent>,
}

impl BroadcastSyncEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AssignSyncEvent> {
        self.sender.subscribe()
    }
}

impl SyncEventPublisher for BroadcastSyncEvents {
    fn publish(&self, event: AssignSyncEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => trace!(event = name, receivers, "sync event published"),
            // No subscribers is not an error.
            Err(_) => debug!(event = name, "sync event dropped, nobody is listening"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SiteId;

    fn event(assign_id: i64) -> AssignSyncEvent {
        AssignSyncEvent::AutoSynced {
            site_id: SiteId::new("site-1").unwrap(),
            assign_id,
            warnings: vec!["warning".into()],
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = BroadcastSyncEvents::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(event(3));

        assert_eq!(first.recv().await.unwrap(), event(3));
        assert_eq!(second.recv().await.unwrap(), event(3));
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = BroadcastSyncEvents::new(8);
        bus.publish(event(3));
    }
}
