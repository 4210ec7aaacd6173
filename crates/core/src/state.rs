use crate::{
    metric::{Metric, MetricDescriptor},
    window::SampleWindow,
};

/// Whether the simulated stream is ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    Running,
    #[default]
    Stopped,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Stopped,
            RunState::Stopped => RunState::Running,
        }
    }

    /// Connection indicator text.
    pub fn label(self) -> &'static str {
        match self {
            RunState::Running => "Connected",
            RunState::Stopped => "Disconnected",
        }
    }
}

/// Read-only view of the controller: everything the renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub window:    &'a SampleWindow,
    pub selected:  Metric,
    /// Index of the newest sample, `None` while the window is empty.
    pub cursor:    Option<usize>,
    pub run_state: RunState,
}

impl<'a> Snapshot<'a> {
    pub fn descriptor(&self) -> &'static MetricDescriptor {
        self.selected.descriptor()
    }

    /// Newest value of `metric`, `None` while the window is empty.
    pub fn current_value(&self, metric: Metric) -> Option<f64> {
        self.window.latest().map(|s| metric.read(s))
    }

    /// `(time, value)` pairs of the selected metric, oldest first.
    pub fn series(&self) -> impl ExactSizeIterator<Item = (&'a str, f64)> + 'a {
        let metric = self.selected;
        self.window.iter().map(move |s| (s.time.as_str(), metric.read(s)))
    }
}
