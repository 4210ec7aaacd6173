pub mod controller;
pub mod error;
pub mod event;
pub mod metric;
pub mod sample;
pub mod scheduler;
pub mod state;
pub mod window;

pub use controller::{ControllerOptions, LiveWindowController, Observer, DEFAULT_INTERVAL, MIN_INTERVAL};
pub use error::{LivemonError, Result};
pub use event::{ControllerEvent, Message};
pub use metric::{Metric, MetricDescriptor};
pub use sample::{Sample, SampleSource};
pub use scheduler::{ManualScheduler, Scheduler, TickHandle, TickToken};
pub use state::{RunState, Snapshot};
pub use window::{SampleWindow, CAPACITY};
