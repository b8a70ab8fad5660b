use std::time::{Duration, Instant};

/// When a scheduled tick becomes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    /// On the next poll, whatever the time
    Immediately,
    At(Instant),
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    epoch: u64,
    due: Due,
}

/// Proof that a scheduled tick fired.
///
/// Only the timer creates tickets, and a ticket is consumed when applied.
/// It stays valid until the timer is cancelled.
#[derive(Debug)]
#[must_use]
pub struct TickTicket {
    epoch: u64,
}

/// Cancellable single-shot timer that the controller re-arms after every
/// applied tick, giving a repeating schedule.
///
/// Cancelling bumps the epoch, so a ticket handed out before the
/// cancellation is recognised as stale even if it is applied later.
#[derive(Debug, Default)]
pub struct TickTimer {
    epoch: u64,
    pending: Option<Scheduled>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire on the next poll
    pub fn schedule_now(&mut self) {
        self.pending = Some(Scheduled {
            epoch: self.epoch,
            due: Due::Immediately,
        });
    }

    /// Arm the timer to fire `delay` after `now`. The delay is captured here;
    /// later interval changes do not move an already-armed tick.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration) {
        self.pending = Some(Scheduled {
            epoch: self.epoch,
            due: Due::At(now + delay),
        });
    }

    /// Drop the pending tick and invalidate every outstanding ticket
    pub fn cancel(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = None;
    }

    /// Fire the pending tick if it is due at `now`
    pub fn fire(&mut self, now: Instant) -> Option<TickTicket> {
        let scheduled = self.pending?;
        let ready = match scheduled.due {
            Due::Immediately => true,
            Due::At(at) => now >= at,
        };
        if !ready {
            return None;
        }
        self.pending = None;
        Some(TickTicket {
            epoch: scheduled.epoch,
        })
    }

    /// Whether `ticket` was issued since the last cancellation
    pub fn is_current(&self, ticket: &TickTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Time left before the pending tick is due, None if nothing is armed
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|scheduled| match scheduled.due {
            Due::Immediately => Duration::ZERO,
            Due::At(at) => at.saturating_duration_since(now),
        })
    }
}
