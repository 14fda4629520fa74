mod service;

pub use service::{
    default_config_path, load_settings_or_default, write_default_if_missing, SettingsService,
    CONFIG_ENV_VAR,
};
