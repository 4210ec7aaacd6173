//! Tick scheduling expressed as an Iced subscription.
//!
//! Installing a registration does no work by itself: while the controller
//! holds it, [`ticks`] turns the live token into an `iced::time::every`
//! subscription.  Cancelling drops the token, the next `subscription()` call
//! no longer returns the timer, and Iced tears it down.  Because the token is
//! part of the subscription identity, a stop/start cycle always replaces the
//! timer instead of reusing the old one.

use livemon_core::{event::Message, Scheduler, TickHandle, TickToken};
use iced::Subscription;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SubscriptionScheduler;

impl Scheduler for SubscriptionScheduler {
    type Handle = Registration;

    fn schedule(&mut self, interval: Duration, token: TickToken) -> Registration {
        debug!(token = token.id(), ?interval, "tick subscription registered");
        Registration { token }
    }
}

/// A live registration; see the module docs.
#[derive(Debug)]
pub struct Registration {
    token: TickToken,
}

impl TickHandle for Registration {
    fn token(&self) -> TickToken {
        self.token
    }

    fn cancel(self) {
        debug!(token = self.token.id(), "tick subscription cancelled");
    }
}

/// Timer subscription for the live registration, if any.
pub fn ticks(active: Option<TickToken>, interval: Duration) -> Subscription<Message> {
    match active {
        Some(token) => iced::time::every(interval)
            .with(token)
            .map(|(token, _)| Message::Tick(token)),
        None => Subscription::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_keeps_its_token() {
        let mut sched = SubscriptionScheduler;
        let reg = sched.schedule(Duration::from_secs(1), TickToken::new(9));
        assert_eq!(reg.token(), TickToken::new(9));
        reg.cancel();
    }
}
