pub mod app;
pub mod building_view;
pub mod controls_panel;
pub mod elevator_panel;
pub mod event_feed;
pub mod game_over_overlay;
pub mod stats_panel;

pub use app::{App, AppProps};
