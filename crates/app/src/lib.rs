//! Desktop dashboard for `livemon`.
//!
//! Owns the Iced application loop and wires together:
//! - the live window controller (random source + subscription scheduler)
//! - the tick timer, present only while the stream is running
//! - config file watcher (live theme reload on change)

pub mod headless;
pub mod schedule;

use livemon_config::{default_path, load as load_config, ConfigWatcher, LivemonConfig};
use livemon_core::{event::Message, LiveWindowController, Metric};
use livemon_feed::RandomSource;
use livemon_theme::Theme;
use livemon_widgets::{ChartWidget, ControlsWidget, ReadoutWidget, StatusBadge};
use futures::channel::mpsc::Sender;
use iced::{
    widget::{column, container, row, text, Space},
    Alignment, Element, Length, Size, Subscription, Task,
};
use schedule::SubscriptionScheduler;
use std::{path::Path, time::Duration};
use tracing::{info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window.  Returns when the window is closed.
///
/// `metric` overrides the configured initial metric.
pub fn run(metric: Option<Metric>) -> iced::Result {
    let config = startup_config(default_path(), metric);
    let size = Size::new(config.window.width, config.window.height);

    iced::application(
        move || Dashboard::new(config.clone()),
        Dashboard::update,
        Dashboard::view,
    )
    .title(Dashboard::title)
    .subscription(Dashboard::subscription)
    .style(Dashboard::style)
    .window_size(size)
    .run()
}

/// Load the config for either mode, falling back to defaults when the file
/// is unreadable or invalid, then apply the command-line metric override.
pub fn startup_config(path: impl AsRef<Path>, metric: Option<Metric>) -> LivemonConfig {
    let mut config = load_config(path).unwrap_or_else(|e| {
        warn!("Config load failed: {e}; using defaults");
        LivemonConfig::default()
    });
    if let Some(metric) = metric {
        config.stream.metric = metric;
    }
    config
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Dashboard {
    controller: LiveWindowController<RandomSource, SubscriptionScheduler>,
    config:     LivemonConfig,
    theme:      Theme,
    controls:   ControlsWidget,
    chart:      ChartWidget,
    readout:    ReadoutWidget,
    status:     StatusBadge,
}

impl Dashboard {
    fn new(config: LivemonConfig) -> (Self, Task<Message>) {
        let mut controller = LiveWindowController::new(
            RandomSource::new(),
            SubscriptionScheduler,
            config.stream.controller_options(),
        );
        if config.stream.autostart {
            controller.toggle_running();
        }

        let dashboard = Self {
            controller,
            theme:    Theme::from_config(&config.theme),
            config,
            controls: ControlsWidget::new(),
            chart:    ChartWidget::new(),
            readout:  ReadoutWidget::new(),
            status:   StatusBadge::new(),
        };

        (dashboard, Task::none())
    }

    fn title(&self) -> String {
        self.config.window.title.clone()
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToggleRunning => {
                self.controller.toggle_running();
            }
            Message::SelectMetric(metric) => {
                self.controller.select_metric(metric);
            }
            Message::Tick(token) => {
                self.controller.on_scheduled_tick(token);
            }
            Message::ConfigReloaded => match load_config(default_path()) {
                Ok(cfg) => self.apply_config(cfg),
                Err(e) => warn!("Config reload failed: {e}"),
            },
        }
        Task::none()
    }

    fn apply_config(&mut self, cfg: LivemonConfig) {
        info!("Config reloaded");
        if cfg.stream != self.config.stream || cfg.window != self.config.window {
            info!("Stream and window settings take effect on next launch");
        }
        self.theme = Theme::from_config(&cfg.theme);
        self.config = cfg;
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let theme = &self.theme;
        let snapshot = self.controller.snapshot();

        // ── Header: title + connection badge ─────────────────────────────────
        let header = row![
            column![
                text(&self.config.window.title).size(theme.font_size + 8.0),
                text("Live data from a simulated telemetry stream")
                    .size(theme.font_size - 2.0)
                    .color(theme.foreground.with_alpha(0.6).to_iced()),
            ]
            .spacing(4),
            Space::new().width(Length::Fill),
            self.status.view(snapshot.run_state, theme),
        ]
        .align_y(Alignment::Center);

        let body = column![
            header,
            self.controls.view(snapshot, theme),
            container(self.chart.view(snapshot, theme))
                .width(Length::Fill)
                .height(Length::Fill),
            self.readout.view(snapshot, theme),
        ]
        .spacing(16)
        .padding(20);

        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            schedule::ticks(self.controller.active_tick(), self.controller.interval()),
            Subscription::run(config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color:       self.theme.foreground.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Watches `~/.config/livemon/livemon.toml` for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        // Watcher exited (unwatchable directory); stall rather than crash.
        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}
