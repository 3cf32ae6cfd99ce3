//! Budget change notifications
//!
//! After a successful budget write, interested parties (other views, caches)
//! are told which period changed so they can re-fetch. Each subscriber gets
//! its own channel; a subscriber that drops its receiver is pruned on the
//! next publish.

use std::sync::mpsc;
use std::sync::Mutex;

use crate::models::{BudgetId, Period};

/// What happened to a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetEventKind {
    Created,
    Updated,
    Deleted,
}

/// A "budgets changed" notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetEvent {
    pub kind: BudgetEventKind,
    pub period: Period,
    pub budget_id: BudgetId,
}

/// Fan-out publisher for [`BudgetEvent`]s
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Mutex<Vec<mpsc::Sender<BudgetEvent>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> mpsc::Receiver<BudgetEvent> {
        let (sender, receiver) = mpsc::channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(sender),
            Err(poisoned) => poisoned.into_inner().push(sender),
        }
        receiver
    }

    /// Deliver an event to every live subscriber
    pub fn publish(&self, event: BudgetEvent) {
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.retain(|sender| sender.send(event).is_ok());
        tracing::trace!(?event, listeners = subscribers.len(), "budget change published");
    }

    pub fn subscriber_count(&self) -> usize {
        match self.subscribers.lock() {
            Ok(subscribers) => subscribers.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: BudgetEventKind) -> BudgetEvent {
        BudgetEvent {
            kind,
            period: Period::new(2025, 1).unwrap(),
            budget_id: BudgetId::new(1),
        }
    }

    #[test]
    fn test_every_subscriber_receives() {
        let notifier = ChangeNotifier::new();
        let a = notifier.subscribe();
        let b = notifier.subscribe();

        notifier.publish(event(BudgetEventKind::Created));

        assert_eq!(a.try_recv().unwrap().kind, BudgetEventKind::Created);
        assert_eq!(b.try_recv().unwrap().kind, BudgetEventKind::Created);
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let notifier = ChangeNotifier::new();
        let kept = notifier.subscribe();
        drop(notifier.subscribe());
        assert_eq!(notifier.subscriber_count(), 2);

        notifier.publish(event(BudgetEventKind::Deleted));

        assert_eq!(notifier.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap().kind, BudgetEventKind::Deleted);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let notifier = ChangeNotifier::new();
        notifier.publish(event(BudgetEventKind::Updated));
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
