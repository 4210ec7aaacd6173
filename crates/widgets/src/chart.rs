use livemon_core::{event::Message, MetricDescriptor, Snapshot};
use livemon_theme::{ChartStyle, Color, Theme};
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke, Text},
    Element, Length, Point, Rectangle, Renderer, Size,
};

/// Number of horizontal grid lines / y-axis labels.
const Y_TICKS: usize = 5;

/// Approximate glyph advance relative to font size, for label placement.
const GLYPH_WIDTH: f32 = 0.6;

/// Live line chart of the selected metric.
///
/// x = sample time, y = the selected metric's value, scaled to the metric's
/// declared range.  The newest sample (the snapshot cursor) is drawn with a
/// larger dot; hovering shows the nearest sample's value and time.
#[derive(Debug, Default)]
pub struct ChartWidget;

impl ChartWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, snapshot: Snapshot<'a>, theme: &'a Theme) -> Element<'a, Message> {
        canvas::Canvas::new(LineChart { snapshot, theme })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

struct LineChart<'a> {
    snapshot: Snapshot<'a>,
    theme:    &'a Theme,
}

impl canvas::Program<Message> for LineChart<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let style = &self.theme.chart;
        let descriptor = self.snapshot.descriptor();
        let plot = Plot::new(bounds.size(), style, descriptor);

        self.draw_axes(&mut frame, &plot, descriptor);

        let values: Vec<(&str, f64)> = self.snapshot.series().collect();
        if values.is_empty() {
            return vec![frame.into_geometry()];
        }

        let color = self.theme.metric_color(self.snapshot.selected);
        let points: Vec<Point> = values
            .iter()
            .enumerate()
            .map(|(i, (_, v))| plot.point(i, values.len(), *v))
            .collect();

        // ── Series line ──────────────────────────────────────────────────────
        let line = Path::new(|b| {
            b.move_to(points[0]);
            for p in &points[1..] {
                b.line_to(*p);
            }
        });
        frame.stroke(
            &line,
            Stroke::default().with_color(color.to_iced()).with_width(style.line_width),
        );

        // ── Dots ─────────────────────────────────────────────────────────────
        for (i, p) in points.iter().enumerate() {
            let radius = if Some(i) == self.snapshot.cursor {
                style.emphasis_radius
            } else {
                style.dot_radius
            };
            let dot = Path::circle(*p, radius);
            frame.fill(&dot, color.to_iced());
            frame.stroke(
                &dot,
                Stroke::default()
                    .with_color(self.theme.background.to_iced())
                    .with_width(style.dot_ring),
            );
        }

        // ── X labels: first and last sample ──────────────────────────────────
        let label_y = plot.origin.y + plot.size.height + 6.0;
        let first = values[0].0;
        self.label(&mut frame, first, Point::new(plot.origin.x, label_y));
        if values.len() > 1 {
            let last = values[values.len() - 1].0;
            let x = plot.origin.x + plot.size.width - text_width(last, style.label_size);
            self.label(&mut frame, last, Point::new(x, label_y));
        }

        // ── Hover tooltip ────────────────────────────────────────────────────
        if let Some(pos) = cursor.position_in(bounds) {
            if plot.contains(pos) {
                if let Some(i) = plot.nearest(pos.x, values.len()) {
                    self.draw_tooltip(&mut frame, &plot, points[i], values[i], descriptor, color);
                }
            }
        }

        vec![frame.into_geometry()]
    }
}

impl LineChart<'_> {
    fn draw_axes(&self, frame: &mut Frame, plot: &Plot, descriptor: &MetricDescriptor) {
        let style = &self.theme.chart;
        let grid = Stroke::default()
            .with_color(self.theme.foreground.with_alpha(0.12).to_iced())
            .with_width(1.0);

        for value in y_ticks(plot.min, plot.max) {
            let y = plot.y(value);
            frame.stroke(
                &Path::line(
                    Point::new(plot.origin.x, y),
                    Point::new(plot.origin.x + plot.size.width, y),
                ),
                grid,
            );

            let label = tick_label(value, descriptor.unit);
            let x = plot.origin.x - 6.0 - text_width(&label, style.label_size);
            self.label(frame, &label, Point::new(x.max(0.0), y - style.label_size / 2.0));
        }
    }

    fn draw_tooltip(
        &self,
        frame: &mut Frame,
        plot: &Plot,
        at: Point,
        (time, value): (&str, f64),
        descriptor: &MetricDescriptor,
        color: Color,
    ) {
        let size = self.theme.chart.label_size + 2.0;
        let guide = Stroke::default()
            .with_color(self.theme.foreground.with_alpha(0.3).to_iced())
            .with_width(1.0);
        frame.stroke(
            &Path::line(
                Point::new(at.x, plot.origin.y),
                Point::new(at.x, plot.origin.y + plot.size.height),
            ),
            guide,
        );

        let lines = [
            descriptor.label.to_uppercase(),
            format!("{value:.2} {}", descriptor.unit),
            time.to_string(),
        ];
        let width = lines
            .iter()
            .map(|l| text_width(l, size))
            .fold(0.0_f32, f32::max)
            + 16.0;
        let height = size * 1.4 * lines.len() as f32 + 12.0;

        // Keep the box inside the plot, flipping left of the point near the edge.
        let right_edge = plot.origin.x + plot.size.width;
        let x = if at.x + 12.0 + width > right_edge { at.x - 12.0 - width } else { at.x + 12.0 };
        let y = (at.y - height / 2.0).clamp(plot.origin.y, plot.origin.y + plot.size.height - height);
        let corner = Point::new(x.max(plot.origin.x), y.max(0.0));

        frame.fill_rectangle(corner, Size::new(width, height), self.theme.muted.to_iced());
        frame.stroke(
            &Path::rectangle(corner, Size::new(width, height)),
            Stroke::default().with_color(color.with_alpha(0.8).to_iced()).with_width(1.0),
        );

        for (n, line) in lines.iter().enumerate() {
            frame.fill_text(Text {
                content: line.clone(),
                position: Point::new(corner.x + 8.0, corner.y + 6.0 + n as f32 * size * 1.4),
                color: self.theme.foreground.to_iced(),
                size: size.into(),
                ..Text::default()
            });
        }
    }

    fn label(&self, frame: &mut Frame, content: &str, position: Point) {
        frame.fill_text(Text {
            content: content.to_string(),
            position,
            color: self.theme.foreground.with_alpha(0.8).to_iced(),
            size: self.theme.chart.label_size.into(),
            ..Text::default()
        });
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Plot area inside the canvas and the value range it maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plot {
    /// Top-left corner of the plot area.
    pub origin: Point,
    pub size:   Size,
    pub min:    f64,
    pub max:    f64,
}

impl Plot {
    /// Carve the plot area out of `bounds`, leaving room for axis labels.
    pub fn new(bounds: Size, style: &ChartStyle, descriptor: &MetricDescriptor) -> Self {
        let top = style.emphasis_radius + style.dot_ring;
        let right = style.emphasis_radius + style.dot_ring;
        Self {
            origin: Point::new(style.gutter_left, top),
            size: Size::new(
                (bounds.width - style.gutter_left - right).max(1.0),
                (bounds.height - style.gutter_bottom - top).max(1.0),
            ),
            min: descriptor.min,
            max: descriptor.max,
        }
    }

    /// Horizontal position of sample `index` out of `count`, spread evenly
    /// across the plot width.  A lone sample sits at the left edge.
    pub fn x(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return self.origin.x;
        }
        self.origin.x + self.size.width * index as f32 / (count - 1) as f32
    }

    /// Vertical position of `value`; values outside the range are clamped.
    pub fn y(&self, value: f64) -> f32 {
        let span = (self.max - self.min).max(f64::EPSILON);
        let t = ((value - self.min) / span).clamp(0.0, 1.0) as f32;
        self.origin.y + self.size.height * (1.0 - t)
    }

    pub fn point(&self, index: usize, count: usize, value: f64) -> Point {
        Point::new(self.x(index, count), self.y(value))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size.height
    }

    /// Index of the sample whose x position is closest to `x`.
    pub fn nearest(&self, x: f32, count: usize) -> Option<usize> {
        match count {
            0 => None,
            1 => Some(0),
            _ => {
                let t = ((x - self.origin.x) / self.size.width).clamp(0.0, 1.0);
                Some((t * (count - 1) as f32).round() as usize)
            }
        }
    }
}

/// Evenly spaced y-axis values from `min` to `max` inclusive.
pub fn y_ticks(min: f64, max: f64) -> [f64; Y_TICKS] {
    let step = (max - min) / (Y_TICKS - 1) as f64;
    std::array::from_fn(|i| min + step * i as f64)
}

/// Y-axis label, e.g. `"50%"` or `"20°C"`.
pub fn tick_label(value: f64, unit: &str) -> String {
    format!("{value:.0}{unit}")
}

fn text_width(s: &str, size: f32) -> f32 {
    s.chars().count() as f32 * size * GLYPH_WIDTH
}
