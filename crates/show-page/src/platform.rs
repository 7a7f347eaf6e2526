use std::path::PathBuf;

const APP_DIR: &str = "radio-show";

/// Overrides the config file location when set.
pub const CONFIG_ENV: &str = "SHOW_CONFIG";

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/radio-show/ (XDG standard)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    // On macOS and Linux, always use ~/.config/radio-show/
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

/// Static site served next to the page (stylesheets, `datos/entrevistas.json`).
pub fn default_site_root() -> PathBuf {
    data_dir().join("www")
}
