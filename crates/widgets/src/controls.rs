use livemon_core::{event::Message, Metric, Snapshot};
use livemon_theme::Theme;
use iced::{
    widget::{button, pick_list, row, text, Space},
    Alignment, Element, Length,
};

/// Metric selector and start/stop button.
#[derive(Debug, Default)]
pub struct ControlsWidget;

impl ControlsWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, snapshot: Snapshot<'a>, theme: &'a Theme) -> Element<'a, Message> {
        let selector = pick_list(Metric::ALL, Some(snapshot.selected), Message::SelectMetric)
            .placeholder("Select metric")
            .text_size(theme.font_size)
            .width(Length::Fixed(200.0));

        let running = snapshot.run_state.is_running();
        let toggle = button(text(toggle_label(running)).size(theme.font_size))
            .on_press(Message::ToggleRunning)
            .style(if running { button::danger } else { button::primary });

        row![selector, Space::new().width(Length::Fill), toggle]
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .into()
    }
}

fn toggle_label(running: bool) -> &'static str {
    if running { "Stop Simulation" } else { "Start Simulation" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_offers_the_opposite_action() {
        assert_eq!(toggle_label(false), "Start Simulation");
        assert_eq!(toggle_label(true), "Stop Simulation");
    }
}
