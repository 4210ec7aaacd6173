/// Geometry of the live line chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    /// Series line width in logical pixels.
    pub line_width: f32,
    /// Radius of every data point.
    pub dot_radius: f32,
    /// Radius of the newest point.
    pub emphasis_radius: f32,
    /// Ring drawn around each dot in the background colour.
    pub dot_ring: f32,
    /// Axis label font size.
    pub label_size: f32,
    /// Space reserved left of the plot for y-axis labels.
    pub gutter_left: f32,
    /// Space reserved below the plot for x-axis labels.
    pub gutter_bottom: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width:      2.0,
            dot_radius:      3.0,
            emphasis_radius: 5.0,
            dot_ring:        2.0,
            label_size:      10.0,
            gutter_left:     44.0,
            gutter_bottom:   22.0,
        }
    }
}
