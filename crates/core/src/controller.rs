use crate::{
    event::ControllerEvent,
    metric::{Metric, MetricDescriptor},
    sample::SampleSource,
    scheduler::{Scheduler, TickHandle, TickToken},
    state::{RunState, Snapshot},
    window::{SampleWindow, CAPACITY},
};
use std::time::Duration;
use tracing::{debug, info};

/// Default tick cadence: one sample per second.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest accepted tick cadence; smaller intervals are raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Construction parameters for [`LiveWindowController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerOptions {
    pub capacity: usize,
    pub interval: Duration,
    pub selected: Metric,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            capacity: CAPACITY,
            interval: DEFAULT_INTERVAL,
            selected: Metric::Cpu,
        }
    }
}

/// Receives a notification after every mutating controller operation.
pub trait Observer {
    fn notify(&mut self, event: &ControllerEvent, snapshot: &Snapshot<'_>);
}

/// Owns the live sample window and drives it from a scheduler.
///
/// The window, cursor and run state are only ever changed through the methods
/// below; everything else sees them through [`Snapshot`]s.  At most one
/// schedule registration is live at a time: starting checks the handle slot
/// first, stopping cancels and clears it.
pub struct LiveWindowController<G, S: Scheduler> {
    source:     G,
    scheduler:  S,
    window:     SampleWindow,
    run_state:  RunState,
    selected:   Metric,
    cursor:     Option<usize>,
    interval:   Duration,
    handle:     Option<S::Handle>,
    next_token: u64,
    observers:  Vec<Box<dyn Observer>>,
}

impl<G, S> LiveWindowController<G, S>
where
    G: SampleSource,
    S: Scheduler,
{
    /// Build a stopped controller with an empty window.
    ///
    /// A zero capacity is raised to one and the interval to [`MIN_INTERVAL`].
    pub fn new(source: G, scheduler: S, options: ControllerOptions) -> Self {
        Self {
            source,
            scheduler,
            window:     SampleWindow::new(options.capacity),
            run_state:  RunState::Stopped,
            selected:   options.selected,
            cursor:     None,
            interval:   options.interval.max(MIN_INTERVAL),
            handle:     None,
            next_token: 0,
            observers:  Vec::new(),
        }
    }

    /// Register an observer for all subsequent changes.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Generate one sample and append it, evicting the oldest past capacity.
    pub fn tick(&mut self) {
        let sample = self.source.generate();
        debug!(
            time = %sample.time,
            cpu = sample.cpu,
            memory = sample.memory,
            temperature = sample.temperature,
            "sample appended"
        );

        let evicted = self.window.push(sample);
        if let Some(old) = &evicted {
            debug!(time = %old.time, "oldest sample evicted");
        }

        let cursor = self.window.len() - 1;
        self.cursor = Some(cursor);
        self.emit(ControllerEvent::Appended {
            cursor,
            evicted: evicted.is_some(),
        });
    }

    /// Entry point for ticks delivered by the scheduler.
    ///
    /// Ticks from anything but the live registration are dropped.  Returns
    /// whether a sample was appended.
    pub fn on_scheduled_tick(&mut self, token: TickToken) -> bool {
        if self.active_tick() != Some(token) {
            debug!(token = token.id(), "discarding stale tick");
            return false;
        }
        self.tick();
        true
    }

    /// Flip between running and stopped; returns the new state.
    pub fn toggle_running(&mut self) -> RunState {
        match self.run_state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
        self.run_state = self.run_state.toggled();
        info!(state = ?self.run_state, "stream {}", self.run_state.label().to_lowercase());
        self.emit(ControllerEvent::RunStateChanged(self.run_state));
        self.run_state
    }

    /// Change the displayed metric.  The window is left untouched.
    pub fn select_metric(&mut self, metric: Metric) {
        self.selected = metric;
        debug!(metric = metric.key(), "metric selected");
        self.emit(ControllerEvent::MetricSelected(metric));
    }

    /// Cancel any live schedule and stop.  Called when the session ends.
    pub fn shutdown(&mut self) {
        if self.run_state.is_running() {
            self.toggle_running();
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Newest value of `metric`, or `None` while the window is empty.
    pub fn current_value(&self, metric: Metric) -> Option<f64> {
        self.window.latest().map(|s| metric.read(s))
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    pub fn selected(&self) -> Metric {
        self.selected
    }

    pub fn descriptor(&self) -> &'static MetricDescriptor {
        self.selected.descriptor()
    }

    /// Index of the newest sample, for transient emphasis.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Token of the live schedule registration, if running.
    pub fn active_tick(&self) -> Option<TickToken> {
        self.handle.as_ref().map(|h| h.token())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            window:    &self.window,
            selected:  self.selected,
            cursor:    self.cursor,
            run_state: self.run_state,
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let token = TickToken::new(self.next_token);
        self.next_token += 1;
        self.handle = Some(self.scheduler.schedule(self.interval, token));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }

    fn emit(&mut self, event: ControllerEvent) {
        let Self {
            observers,
            window,
            selected,
            cursor,
            run_state,
            ..
        } = self;

        let snapshot = Snapshot {
            window:    &*window,
            selected:  *selected,
            cursor:    *cursor,
            run_state: *run_state,
        };

        for observer in observers.iter_mut() {
            observer.notify(&event, &snapshot);
        }
    }
}

impl<G, S: Scheduler> Drop for LiveWindowController<G, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sample::Sample, scheduler::ManualScheduler};
    use std::{cell::RefCell, rc::Rc};

    const SECOND: Duration = Duration::from_secs(1);

    /// Deterministic source: the n-th sample has `cpu == n`.
    fn counter() -> impl FnMut() -> Sample {
        let mut n = 0u32;
        move || {
            n += 1;
            Sample {
                time: format!("t{n}"),
                cpu: f64::from(n),
                memory: f64::from(n) / 10.0,
                temperature: 20.0 + f64::from(n),
            }
        }
    }

    fn controller() -> (LiveWindowController<impl FnMut() -> Sample, ManualScheduler>, ManualScheduler) {
        let sched = ManualScheduler::new();
        let ctl = LiveWindowController::new(counter(), sched.clone(), ControllerOptions::default());
        (ctl, sched)
    }

    fn deliver(ctl: &mut LiveWindowController<impl SampleSource, ManualScheduler>, sched: &ManualScheduler, by: Duration) -> usize {
        sched
            .advance(by)
            .into_iter()
            .filter(|(_, token)| ctl.on_scheduled_tick(*token))
            .count()
    }

    #[test]
    fn starts_stopped_and_empty() {
        let (ctl, sched) = controller();
        assert_eq!(ctl.run_state(), RunState::Stopped);
        assert!(ctl.window().is_empty());
        assert_eq!(ctl.cursor(), None);
        assert_eq!(ctl.active_tick(), None);
        assert_eq!(sched.live(), 0);
    }

    #[test]
    fn zero_interval_and_capacity_are_clamped() {
        let sched = ManualScheduler::new();
        let options = ControllerOptions {
            capacity: 0,
            interval: Duration::ZERO,
            ..ControllerOptions::default()
        };
        let mut ctl = LiveWindowController::new(counter(), sched.clone(), options);
        assert_eq!(ctl.interval(), MIN_INTERVAL);
        assert_eq!(ctl.window().capacity(), 1);

        ctl.toggle_running();
        assert_eq!(deliver(&mut ctl, &sched, MIN_INTERVAL * 3), 3);
        assert_eq!(ctl.window().len(), 1);
    }

    #[test]
    fn length_tracks_min_of_ticks_and_capacity() {
        let (mut ctl, _sched) = controller();
        for fired in 1..=45 {
            ctl.tick();
            assert_eq!(ctl.window().len(), fired.min(CAPACITY));
            assert_eq!(ctl.cursor(), Some(ctl.window().len() - 1));
        }
    }

    #[test]
    fn overflow_keeps_most_recent_in_order() {
        let (mut ctl, _sched) = controller();
        for _ in 0..27 {
            ctl.tick();
        }
        let cpus: Vec<f64> = ctl.window().iter().map(|s| s.cpu).collect();
        let expected: Vec<f64> = (8..=27).map(f64::from).collect();
        assert_eq!(cpus, expected);
    }

    #[test]
    fn toggle_twice_restores_state_and_clears_schedule() {
        let (mut ctl, sched) = controller();
        assert_eq!(ctl.toggle_running(), RunState::Running);
        assert_eq!(sched.live(), 1);
        assert_eq!(ctl.toggle_running(), RunState::Stopped);
        assert_eq!(sched.live(), 0);
        assert_eq!(ctl.active_tick(), None);
    }

    #[test]
    fn no_ticks_while_stopped() {
        let (mut ctl, sched) = controller();
        assert_eq!(deliver(&mut ctl, &sched, Duration::from_secs(60)), 0);
        assert!(ctl.window().is_empty());
    }

    #[test]
    fn stopping_freezes_window() {
        let (mut ctl, sched) = controller();
        ctl.toggle_running();
        assert_eq!(deliver(&mut ctl, &sched, 2 * SECOND), 2);
        ctl.toggle_running();
        assert_eq!(deliver(&mut ctl, &sched, 5 * SECOND), 0);
        assert_eq!(ctl.window().len(), 2);
    }

    #[test]
    fn stale_token_is_discarded() {
        let (mut ctl, sched) = controller();
        ctl.toggle_running();
        let old = ctl.active_tick().unwrap();
        ctl.toggle_running();
        ctl.toggle_running();

        let new = ctl.active_tick().unwrap();
        assert_ne!(old, new);
        assert!(!ctl.on_scheduled_tick(old));
        assert!(ctl.on_scheduled_tick(new));
        assert_eq!(ctl.window().len(), 1);
        assert_eq!(sched.live(), 1);
        assert_eq!(sched.installs(), 2);
    }

    #[test]
    fn select_metric_leaves_window_alone() {
        let (mut ctl, _sched) = controller();
        for _ in 0..3 {
            ctl.tick();
        }
        let before: Vec<Sample> = ctl.window().iter().cloned().collect();

        ctl.select_metric(Metric::Temperature);

        let after: Vec<Sample> = ctl.window().iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(ctl.selected(), Metric::Temperature);
        assert_eq!(ctl.descriptor().unit, "°C");
        assert_eq!(ctl.cursor(), Some(2));
    }

    #[test]
    fn current_value_reads_newest_sample() {
        let (mut ctl, _sched) = controller();
        for metric in Metric::ALL {
            assert_eq!(ctl.current_value(metric), None);
        }
        ctl.tick();
        ctl.tick();
        assert_eq!(ctl.current_value(Metric::Cpu), Some(2.0));
        assert_eq!(ctl.current_value(Metric::Memory), Some(0.2));
        assert_eq!(ctl.current_value(Metric::Temperature), Some(22.0));
    }

    /// Records every event with the window length seen alongside it.
    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<(ControllerEvent, usize)>>>);

    impl Observer for Recorder {
        fn notify(&mut self, event: &ControllerEvent, snapshot: &Snapshot<'_>) {
            self.0.borrow_mut().push((*event, snapshot.window.len()));
        }
    }

    #[test]
    fn observers_see_every_mutation() {
        let (mut ctl, _sched) = controller();
        let recorder = Recorder::default();
        let seen = Rc::clone(&recorder.0);
        ctl.subscribe(recorder);

        ctl.tick();
        ctl.select_metric(Metric::Memory);
        ctl.toggle_running();

        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![
                (ControllerEvent::Appended { cursor: 0, evicted: false }, 1),
                (ControllerEvent::MetricSelected(Metric::Memory), 1),
                (ControllerEvent::RunStateChanged(RunState::Running), 1),
            ]
        );
    }

    #[test]
    fn eviction_is_reported() {
        let sched = ManualScheduler::new();
        let options = ControllerOptions { capacity: 2, ..ControllerOptions::default() };
        let mut ctl = LiveWindowController::new(counter(), sched, options);
        let recorder = Recorder::default();
        let seen = Rc::clone(&recorder.0);
        ctl.subscribe(recorder);

        for _ in 0..5 {
            ctl.tick();
        }
        let evictions = seen
            .borrow()
            .iter()
            .filter(|(event, _)| matches!(event, ControllerEvent::Appended { evicted: true, .. }))
            .count();
        assert_eq!(evictions, 3);
        assert_eq!(ctl.cursor(), Some(1));
    }

    #[test]
    fn drop_cancels_live_registration() {
        let (mut ctl, sched) = controller();
        ctl.toggle_running();
        assert_eq!(sched.live(), 1);
        drop(ctl);
        assert_eq!(sched.live(), 0);
    }

    #[test]
    fn shutdown_stops_running_stream() {
        let (mut ctl, sched) = controller();
        ctl.toggle_running();
        ctl.shutdown();
        assert_eq!(ctl.run_state(), RunState::Stopped);
        assert_eq!(sched.live(), 0);
        ctl.shutdown();
        assert_eq!(ctl.run_state(), RunState::Stopped);
    }
}
