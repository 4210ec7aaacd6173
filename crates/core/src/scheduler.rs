//! Cancellable interval scheduling.
//!
//! The controller asks a [`Scheduler`] for one recurring tick registration at a
//! time and keeps the returned [`TickHandle`] until it stops.  Every delivered
//! tick carries the [`TickToken`] of the registration that produced it, so the
//! controller can recognise and discard ticks from a registration it has
//! already cancelled.

use std::{cell::RefCell, rc::Rc, time::Duration};

/// Identity of one schedule registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickToken(u64);

impl TickToken {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Installs recurring ticks.
pub trait Scheduler {
    type Handle: TickHandle;

    /// Start delivering `token` every `interval` until the handle is cancelled.
    fn schedule(&mut self, interval: Duration, token: TickToken) -> Self::Handle;
}

/// A live schedule registration.
pub trait TickHandle {
    fn token(&self) -> TickToken;

    /// Stop the registration.  No tick carrying this token is delivered after
    /// the call returns, except ticks already queued by the caller's transport.
    fn cancel(self);
}

// ── Manual scheduler ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Registration {
    token:    TickToken,
    interval: Duration,
    next_due: Duration,
}

#[derive(Debug, Default)]
struct ManualClock {
    now:           Duration,
    registrations: Vec<Registration>,
    installs:      usize,
}

/// A scheduler driven by an explicit simulated clock.
///
/// Clones share the same clock, so a test can hand one clone to a controller
/// and keep another to call [`ManualScheduler::advance`].
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the simulated clock forward by `by`, returning every tick that
    /// fell due in order, paired with the simulated time it fired at.
    pub fn advance(&self, by: Duration) -> Vec<(Duration, TickToken)> {
        let mut clock = self.clock.borrow_mut();
        let target = clock.now + by;
        let mut fired = Vec::new();

        loop {
            let due = clock
                .registrations
                .iter_mut()
                .filter(|r| r.next_due <= target)
                .min_by_key(|r| r.next_due);

            let Some(reg) = due else { break };
            let at = reg.next_due;
            reg.next_due += reg.interval;
            fired.push((at, reg.token));
            clock.now = at;
        }

        clock.now = target;
        fired
    }

    /// Simulated time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of registrations currently installed.
    pub fn live(&self) -> usize {
        self.clock.borrow().registrations.len()
    }

    /// Number of registrations ever installed.
    pub fn installs(&self) -> usize {
        self.clock.borrow().installs
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&mut self, interval: Duration, token: TickToken) -> ManualHandle {
        let mut clock = self.clock.borrow_mut();
        let interval = interval.max(Duration::from_nanos(1));
        let next_due = clock.now + interval;
        clock.registrations.push(Registration { token, interval, next_due });
        clock.installs += 1;

        ManualHandle {
            token,
            clock: Rc::clone(&self.clock),
        }
    }
}

/// Handle returned by [`ManualScheduler`].
#[derive(Debug)]
pub struct ManualHandle {
    token: TickToken,
    clock: Rc<RefCell<ManualClock>>,
}

impl TickHandle for ManualHandle {
    fn token(&self) -> TickToken {
        self.token
    }

    fn cancel(self) {
        let token = self.token;
        self.clock
            .borrow_mut()
            .registrations
            .retain(|r| r.token != token);
    }
}
