//! Change feed: typed notifications published after successful mutations.
//!
//! Handlers publish a `ChangeEvent` once the gateway write succeeds; clients
//! subscribe per user and decide for themselves what to refetch.
//!
//! Publishing is best-effort: no subscribers, or a lagging subscriber, never
//! fails the mutation that produced the event.

pub mod handlers;

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};
use uuid::Uuid;

const BUS_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    FinancialProfiles,
    BudgetCategories,
    FinancialGoals,
    DebtsSubscriptions,
    PurchaseDecisions,
    AiConversations,
    CheckIns,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: Table,
    pub kind: ChangeKind,
    pub user_id: Uuid,
    pub row_id: Uuid,
}

impl ChangeEvent {
    pub fn inserted(table: Table, user_id: Uuid, row_id: Uuid) -> Self {
        Self {
            table,
            kind: ChangeKind::Inserted,
            user_id,
            row_id,
        }
    }

    pub fn updated(table: Table, user_id: Uuid, row_id: Uuid) -> Self {
        Self {
            table,
            kind: ChangeKind::Updated,
            user_id,
            row_id,
        }
    }

    pub fn deleted(table: Table, user_id: Uuid, row_id: Uuid) -> Self {
        Self {
            table,
            kind: ChangeKind::Deleted,
            user_id,
            row_id,
        }
    }
}

/// In-process broadcast bus. Cheap to clone; all clones share one channel.
#[derive(Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: ChangeEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!("Change event delivered to {receivers} subscriber(s)"),
            Err(broadcast::error::SendError(event)) => {
                debug!("No subscribers for {:?} on {:?}", event.kind, event.table)
            }
        }
    }

    /// Events for one user, in publish order. Lagged events are skipped with a warning.
    pub fn subscribe(&self, user_id: Uuid) -> impl Stream<Item = ChangeEvent> + Send + 'static {
        BroadcastStream::new(self.sender.subscribe()).filter_map(move |item| async move {
            match item {
                Ok(event) if event.user_id == user_id => Some(event),
                Ok(_) => None,
                Err(e) => {
                    warn!("Change subscriber for user {user_id} lagged: {e}");
                    None
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_subscriber_receives_only_own_events() {
        let bus = ChangeBus::new();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut stream = Box::pin(bus.subscribe(me));

        let goal_id = Uuid::new_v4();
        bus.publish(ChangeEvent::inserted(Table::FinancialGoals, other, Uuid::new_v4()));
        bus.publish(ChangeEvent::inserted(Table::FinancialGoals, me, goal_id));

        let event = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.user_id, me);
        assert_eq!(event.row_id, goal_id);
        assert_eq!(event.kind, ChangeKind::Inserted);
    }

    #[tokio::test]
    async fn test_events_arrive_in_publish_order() {
        let bus = ChangeBus::new();
        let me = Uuid::new_v4();
        let mut stream = Box::pin(bus.subscribe(me));
        let row = Uuid::new_v4();

        bus.publish(ChangeEvent::inserted(Table::DebtsSubscriptions, me, row));
        bus.publish(ChangeEvent::updated(Table::DebtsSubscriptions, me, row));
        bus.publish(ChangeEvent::deleted(Table::DebtsSubscriptions, me, row));

        let mut kinds = Vec::new();
        for _ in 0..3 {
            kinds.push(stream.next().await.unwrap().kind);
        }
        assert_eq!(
            kinds,
            vec![ChangeKind::Inserted, ChangeKind::Updated, ChangeKind::Deleted]
        );
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        let bus = ChangeBus::new();
        bus.publish(ChangeEvent::deleted(
            Table::BudgetCategories,
            Uuid::new_v4(),
            Uuid::new_v4(),
        ));
    }

    #[test]
    fn test_event_serializes_snake_case() {
        let event = ChangeEvent::updated(Table::AiConversations, Uuid::nil(), Uuid::nil());
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["table"], "ai_conversations");
        assert_eq!(value["kind"], "updated");
    }
}
