pub mod chart;
pub mod controls;
pub mod readout;
pub mod status;

pub use chart::ChartWidget;
pub use controls::ControlsWidget;
pub use readout::ReadoutWidget;
pub use status::StatusBadge;
