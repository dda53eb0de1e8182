mod components;
mod config;
mod model;
mod state;
mod util;

use components::{App, AppProps};
use config::AppConfig;

fn main() {
    let config = match util::load_app_config() {
        Ok(config) => {
            util::init_console_logger(config.log_level_filter());
            config
        }
        Err(e) => {
            util::init_console_logger(log::LevelFilter::Info);
            log::warn!("ignoring stored config: {}", e);
            AppConfig::default()
        }
    };
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
