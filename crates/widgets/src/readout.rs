use livemon_core::{event::Message, Metric, Snapshot};
use livemon_theme::Theme;
use iced::{
    widget::{container, row, text, Row, Space},
    Alignment, Background, Border, Element, Length,
};

/// Current value of every metric, side by side.
///
/// Shows all three metrics regardless of which one is charted; each reads
/// `N/A` until the first sample arrives.
#[derive(Debug, Default)]
pub struct ReadoutWidget;

impl ReadoutWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, snapshot: Snapshot<'a>, theme: &'a Theme) -> Element<'a, Message> {
        let cards: Vec<Element<'a, Message>> = Metric::ALL
            .into_iter()
            .map(|metric| card(metric, snapshot.current_value(metric), theme))
            .collect();

        Row::from_vec(cards)
            .spacing(12)
            .width(Length::Fill)
            .into()
    }
}

fn card<'a>(metric: Metric, value: Option<f64>, theme: &'a Theme) -> Element<'a, Message> {
    let d = metric.descriptor();
    let bg = theme.muted;

    let content = row![
        text(theme.metric_icon(metric))
            .size(theme.font_size)
            .color(theme.metric_color(metric).to_iced()),
        text(format!("{}:", d.label)).size(theme.font_size),
        Space::new().width(Length::Fill),
        text(metric.format_reading(value)).size(theme.font_size),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(content)
        .padding([8, 12])
        .width(Length::FillPortion(1))
        .style(move |_: &iced::Theme| container::Style {
            background: Some(Background::Color(bg.to_iced())),
            border: Border { radius: 6.0.into(), ..Default::default() },
            text_color: Some(theme.foreground.to_iced()),
            ..Default::default()
        })
        .into()
}
