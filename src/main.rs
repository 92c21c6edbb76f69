#![warn(
    clippy::all,
    // clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    // clippy::unwrap_used
)]
use app::App;
use clap::Parser;

use iced::Settings;

mod app;
pub mod calendar;
mod cli;
pub mod config;
mod logger;
mod session;
pub mod views;

fn main() -> iced::Result {
    let cli = cli::Cli::parse();
    let mut config = config::init(cli.config).expect("Could not load the configuration file");

    logger::init(config.log.level);

    if let Some(view) = cli.view {
        config.calendar.default_view = view;
    }

    log::debug!("Loaded configuration: {config:?}");

    iced::application::application("Shared Calendar", App::update, App::view)
        .subscription(App::subscription)
        .theme(|_| iced::Theme::TokyoNightLight)
        .settings(Settings {
            antialiasing: true,
            ..Default::default()
        })
        .run_with(|| App::new(config))
}
