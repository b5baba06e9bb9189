//! Configuration management

mod defaults;
mod settings;

pub use defaults::default_displays;
pub use settings::{AppConfig, CONFIG_VERSION};
