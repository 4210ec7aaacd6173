//! End-to-end walk through the live window lifecycle on a simulated clock.

use livemon_core::{
    ControllerOptions, LiveWindowController, ManualScheduler, Metric, RunState, Sample,
    SampleSource, CAPACITY,
};
use std::time::Duration;

/// Numbers samples from 1 so window contents can be checked by value.
struct Counting {
    n: u32,
}

impl SampleSource for Counting {
    fn generate(&mut self) -> Sample {
        self.n += 1;
        Sample {
            time: format!("00:00:{:02}", self.n),
            cpu: f64::from(self.n),
            memory: f64::from(self.n % 16),
            temperature: 20.0 + f64::from(self.n % 40),
        }
    }
}

fn cpus(ctl: &LiveWindowController<Counting, ManualScheduler>) -> Vec<u32> {
    ctl.window().iter().map(|s| s.cpu as u32).collect()
}

#[test]
fn live_window_lifecycle() {
    let sched = ManualScheduler::new();
    let mut ctl = LiveWindowController::new(
        Counting { n: 0 },
        sched.clone(),
        ControllerOptions::default(),
    );
    assert_eq!(ctl.run_state(), RunState::Stopped);

    // Five manual ticks on a stopped controller.
    for _ in 0..5 {
        ctl.tick();
    }
    assert_eq!(ctl.window().len(), 5);
    assert_eq!(ctl.cursor(), Some(4));

    // Twenty more: only ticks 6..=25 remain.
    for _ in 0..20 {
        ctl.tick();
    }
    assert_eq!(ctl.window().len(), CAPACITY);
    assert_eq!(cpus(&ctl), (6..=25).collect::<Vec<_>>());
    assert_eq!(ctl.cursor(), Some(CAPACITY - 1));

    // Run for three simulated seconds.
    assert_eq!(ctl.toggle_running(), RunState::Running);
    let fired = sched.advance(Duration::from_secs(3));
    let mut appended_at = Vec::new();
    for (at, token) in fired {
        if ctl.on_scheduled_tick(token) {
            appended_at.push(at);
        }
    }
    assert_eq!(
        appended_at,
        [1, 2, 3].map(Duration::from_secs).to_vec(),
        "one append per simulated second"
    );
    assert_eq!(cpus(&ctl), (9..=28).collect::<Vec<_>>());

    // Selection changes what is displayed, not what is stored.
    ctl.select_metric(Metric::Memory);
    assert_eq!(ctl.current_value(Metric::Cpu), Some(28.0));
    assert_eq!(ctl.snapshot().series().last().map(|(_, v)| v), Some(f64::from(28 % 16)));

    // Stopping freezes the window.
    assert_eq!(ctl.toggle_running(), RunState::Stopped);
    assert!(sched.advance(Duration::from_secs(30)).is_empty());
    assert_eq!(ctl.window().len(), CAPACITY);
    assert_eq!(sched.installs(), 1);
}

#[test]
fn restart_never_double_schedules() {
    let sched = ManualScheduler::new();
    let mut ctl = LiveWindowController::new(
        Counting { n: 0 },
        sched.clone(),
        ControllerOptions::default(),
    );

    for _ in 0..4 {
        ctl.toggle_running();
        assert!(sched.live() <= 1);
    }
    ctl.toggle_running();
    assert_eq!(sched.live(), 1);

    let appended = sched
        .advance(Duration::from_secs(5))
        .into_iter()
        .filter(|(_, token)| ctl.on_scheduled_tick(*token))
        .count();
    assert_eq!(appended, 5);
}
