use livemon_core::{event::Message, RunState};
use livemon_theme::Theme;
use iced::{
    widget::{container, text},
    Background, Border, Element,
};

/// "Connected" / "Disconnected" pill reflecting the run state.
#[derive(Debug, Default)]
pub struct StatusBadge;

impl StatusBadge {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, state: RunState, theme: &'a Theme) -> Element<'a, Message> {
        let (bg, fg) = if state.is_running() {
            (theme.accent, theme.background)
        } else {
            (theme.muted, theme.foreground.with_alpha(0.7))
        };

        container(text(state.label()).size(theme.font_size - 2.0).color(fg.to_iced()))
            .padding([3, 10])
            .style(move |_: &iced::Theme| container::Style {
                background: Some(Background::Color(bg.to_iced())),
                border: Border { radius: 10.0.into(), ..Default::default() },
                ..Default::default()
            })
            .into()
    }
}
