//! Order tracking.
//!
//! Drives the deterministic [`OrderTimeline`] with real timers after
//! checkout and broadcasts each transition to the presentation layer.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use smallvec::SmallVec;
use tokio::sync::{broadcast, watch};

use gelateria::status::{OrderStatus, OrderTimeline};

use crate::events::StorefrontEvent;

/// Tracks the single simulated order of a session.
///
/// Calling [`OrderTracker::start`] while an order is already tracked is a
/// no-op returning the existing delivery estimate: the simulated kitchen
/// never restarts an order.
#[derive(Debug)]
pub struct OrderTracker {
    timeline: Arc<watch::Sender<Option<OrderTimeline>>>,
    events: broadcast::Sender<StorefrontEvent>,
}

impl OrderTracker {
    /// Creates an idle tracker publishing transitions to `events`.
    #[must_use]
    pub fn new(events: broadcast::Sender<StorefrontEvent>) -> Self {
        let (timeline, _) = watch::channel(None);

        Self {
            timeline: Arc::new(timeline),
            events,
        }
    }

    /// Starts tracking an order placed at `placed_at`, returning the fixed
    /// delivery estimate. Spawns the timer task driving the remaining
    /// transitions, so this must be called from within a Tokio runtime.
    pub fn start(&self, placed_at: Timestamp) -> Timestamp {
        if let Some(existing) = self.timeline.borrow().as_ref() {
            tracing::debug!("an order is already tracked; ignoring start");
            return existing.estimated_delivery();
        }

        let timeline = OrderTimeline::start(placed_at);
        let estimated_delivery = timeline.estimated_delivery();
        let schedule: Vec<(Duration, OrderStatus)> = timeline.schedule().to_vec();

        tracing::info!(%placed_at, %estimated_delivery, "order received");

        self.timeline.send_replace(Some(timeline));
        self.events
            .send(StorefrontEvent::StatusChanged(OrderStatus::Received))
            .ok();

        let shared = Arc::clone(&self.timeline);
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut slept = Duration::ZERO;

            for (delay, _) in schedule {
                tokio::time::sleep(delay.checked_sub(slept).unwrap_or_default()).await;
                slept = delay;

                let mut entered: SmallVec<[OrderStatus; 2]> = SmallVec::new();

                shared.send_modify(|timeline| {
                    if let Some(timeline) = timeline {
                        entered = timeline.advance_to(delay);
                    }
                });

                for status in entered {
                    tracing::info!(%status, "order status advanced");
                    events.send(StorefrontEvent::StatusChanged(status)).ok();
                }
            }
        });

        estimated_delivery
    }

    /// Current order stage, if an order has been placed.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.timeline.borrow().as_ref().map(OrderTimeline::status)
    }

    /// Delivery estimate fixed at checkout, if an order has been placed.
    #[must_use]
    pub fn estimated_delivery(&self) -> Option<Timestamp> {
        self.timeline
            .borrow()
            .as_ref()
            .map(OrderTimeline::estimated_delivery)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use gelateria::status::{OUT_FOR_DELIVERY_DELAY, READY_DELAY};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn broadcasts_every_transition_in_order() -> TestResult {
        let (events, mut receiver) = broadcast::channel(16);
        let tracker = OrderTracker::new(events);

        tracker.start(Timestamp::UNIX_EPOCH);

        assert_eq!(tracker.status(), Some(OrderStatus::Received));
        assert_eq!(
            receiver.recv().await?,
            StorefrontEvent::StatusChanged(OrderStatus::Received)
        );
        assert_eq!(
            receiver.recv().await?,
            StorefrontEvent::StatusChanged(OrderStatus::Ready)
        );
        assert_eq!(
            receiver.recv().await?,
            StorefrontEvent::StatusChanged(OrderStatus::OutForDelivery)
        );
        assert_eq!(tracker.status(), Some(OrderStatus::OutForDelivery));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn transitions_fire_at_the_scheduled_delays() -> TestResult {
        let (events, _receiver) = broadcast::channel(16);
        let tracker = OrderTracker::new(events);

        tracker.start(Timestamp::UNIX_EPOCH);

        tokio::time::sleep(READY_DELAY - Duration::from_millis(10)).await;
        assert_eq!(tracker.status(), Some(OrderStatus::Received));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(tracker.status(), Some(OrderStatus::Ready));

        tokio::time::sleep(OUT_FOR_DELIVERY_DELAY - READY_DELAY).await;
        assert_eq!(tracker.status(), Some(OrderStatus::OutForDelivery));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn estimate_is_thirty_minutes_after_checkout() -> TestResult {
        let (events, _receiver) = broadcast::channel(16);
        let tracker = OrderTracker::new(events);

        let placed_at: Timestamp = "2026-08-07T15:00:00Z".parse()?;
        let estimate = tracker.start(placed_at);

        assert_eq!(estimate, "2026-08-07T15:30:00Z".parse::<Timestamp>()?);
        assert_eq!(tracker.estimated_delivery(), Some(estimate));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_a_tracked_order_is_a_no_op() -> TestResult {
        let (events, _receiver) = broadcast::channel(16);
        let tracker = OrderTracker::new(events);

        let first = tracker.start(Timestamp::UNIX_EPOCH);

        tokio::time::sleep(READY_DELAY).await;
        let later: Timestamp = "2026-08-07T15:00:00Z".parse()?;
        let second = tracker.start(later);

        assert_eq!(first, second, "restart must keep the original estimate");
        assert_eq!(tracker.status(), Some(OrderStatus::Ready));

        Ok(())
    }

    #[tokio::test]
    async fn idle_tracker_reports_no_order() {
        let (events, _receiver) = broadcast::channel(16);
        let tracker = OrderTracker::new(events);

        assert_eq!(tracker.status(), None);
        assert_eq!(tracker.estimated_delivery(), None);
    }
}
