//! Order status timeline
//!
//! A linear, monotonic progression through the simulated kitchen stages.
//! The timeline itself is timer-free: it holds a schedule of
//! `(delay, stage)` pairs and is advanced by whoever owns the clock, so
//! tests can step simulated time instead of sleeping.

use std::{fmt, time::Duration};

use jiff::{Timestamp, ToSpan};
use smallvec::SmallVec;

/// Delay before the kitchen marks the order ready.
pub const READY_DELAY: Duration = Duration::from_secs(5);

/// Delay before the order leaves for delivery.
pub const OUT_FOR_DELIVERY_DELAY: Duration = Duration::from_secs(10);

/// Estimated delivery offset fixed at checkout, in minutes.
pub const DELIVERY_ESTIMATE_MINUTES: i64 = 30;

/// Stages of a placed order. Advances monotonically, never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderStatus {
    /// The kitchen has the order.
    Received,

    /// The order is ready to leave.
    Ready,

    /// The order is on its way. Terminal.
    OutForDelivery,
}

impl OrderStatus {
    /// Step label shown in the status tracker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "Recebido",
            Self::Ready => "Pronto",
            Self::OutForDelivery => "Em entrega",
        }
    }

    /// One-line notification raised when the stage is entered.
    #[must_use]
    pub const fn announcement(self) -> &'static str {
        match self {
            Self::Received => "Pedido recebido! A cozinha já vai começar.",
            Self::Ready => "Seu pedido está pronto!",
            Self::OutForDelivery => "Saiu para entrega! 🛵",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deterministic order progression started at checkout.
#[derive(Debug, Clone)]
pub struct OrderTimeline {
    status: OrderStatus,
    placed_at: Timestamp,
    estimated_delivery: Timestamp,
    schedule: SmallVec<[(Duration, OrderStatus); 2]>,
}

impl OrderTimeline {
    /// Starts a timeline with the simulation schedule: ready after
    /// [`READY_DELAY`], out for delivery after [`OUT_FOR_DELIVERY_DELAY`].
    /// The estimated delivery time is fixed here and never recomputed.
    #[must_use]
    pub fn start(placed_at: Timestamp) -> Self {
        Self::with_schedule(
            placed_at,
            [
                (READY_DELAY, OrderStatus::Ready),
                (OUT_FOR_DELIVERY_DELAY, OrderStatus::OutForDelivery),
            ],
        )
    }

    /// Starts a timeline with a caller-supplied schedule of
    /// `(delay, stage)` pairs.
    pub fn with_schedule(
        placed_at: Timestamp,
        schedule: impl IntoIterator<Item = (Duration, OrderStatus)>,
    ) -> Self {
        let mut schedule: SmallVec<[(Duration, OrderStatus); 2]> =
            schedule.into_iter().collect();

        schedule.sort_by_key(|(delay, _)| *delay);

        Self {
            status: OrderStatus::Received,
            placed_at,
            estimated_delivery: placed_at
                .saturating_add(DELIVERY_ESTIMATE_MINUTES.minutes())
                .expect("a 30-minute span is uniform and cannot overflow the checkout timestamp"),
            schedule,
        }
    }

    /// Advances the timeline to `elapsed` time since checkout, returning
    /// the stages newly entered in order. Monotonic and idempotent: stages
    /// already passed are never re-entered or re-announced, and an earlier
    /// `elapsed` than previously seen changes nothing.
    pub fn advance_to(&mut self, elapsed: Duration) -> SmallVec<[OrderStatus; 2]> {
        let mut entered = SmallVec::new();

        for (delay, status) in &self.schedule {
            if elapsed >= *delay && *status > self.status {
                self.status = *status;
                entered.push(*status);
            }
        }

        entered
    }

    /// Current stage.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Checkout time.
    #[must_use]
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// Estimated delivery time, fixed at checkout.
    #[must_use]
    pub fn estimated_delivery(&self) -> Timestamp {
        self.estimated_delivery
    }

    /// The `(delay, stage)` pairs still driving this timeline.
    #[must_use]
    pub fn schedule(&self) -> &[(Duration, OrderStatus)] {
        &self.schedule
    }

    /// Whether the timeline has reached its terminal stage.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == OrderStatus::OutForDelivery
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn starts_received_with_a_fixed_estimate() -> TestResult {
        let placed_at: Timestamp = "2026-08-07T15:00:00Z".parse()?;
        let timeline = OrderTimeline::start(placed_at);

        assert_eq!(timeline.status(), OrderStatus::Received);
        assert_eq!(
            timeline.estimated_delivery(),
            "2026-08-07T15:30:00Z".parse::<Timestamp>()?
        );

        Ok(())
    }

    #[test]
    fn advances_through_the_schedule() {
        let mut timeline = OrderTimeline::start(Timestamp::UNIX_EPOCH);

        assert!(timeline.advance_to(Duration::from_secs(4)).is_empty());

        let entered = timeline.advance_to(READY_DELAY);
        assert_eq!(entered.as_slice(), [OrderStatus::Ready]);

        let entered = timeline.advance_to(OUT_FOR_DELIVERY_DELAY);
        assert_eq!(entered.as_slice(), [OrderStatus::OutForDelivery]);
        assert!(timeline.is_complete());
    }

    #[test]
    fn jumping_past_several_stages_enters_them_in_order() {
        let mut timeline = OrderTimeline::start(Timestamp::UNIX_EPOCH);

        let entered = timeline.advance_to(Duration::from_secs(60));

        assert_eq!(
            entered.as_slice(),
            [OrderStatus::Ready, OrderStatus::OutForDelivery]
        );
    }

    #[test]
    fn advancing_is_idempotent() {
        let mut timeline = OrderTimeline::start(Timestamp::UNIX_EPOCH);

        timeline.advance_to(READY_DELAY);
        let entered = timeline.advance_to(READY_DELAY);

        assert!(entered.is_empty(), "stages must not be re-announced");
        assert_eq!(timeline.status(), OrderStatus::Ready);
    }

    #[test]
    fn never_regresses_on_an_earlier_elapsed_time() {
        let mut timeline = OrderTimeline::start(Timestamp::UNIX_EPOCH);

        timeline.advance_to(Duration::from_secs(60));
        let entered = timeline.advance_to(Duration::from_secs(1));

        assert!(entered.is_empty());
        assert_eq!(timeline.status(), OrderStatus::OutForDelivery);
    }

    #[test]
    fn stage_order_is_total() {
        assert!(OrderStatus::Received < OrderStatus::Ready);
        assert!(OrderStatus::Ready < OrderStatus::OutForDelivery);
    }
}
