//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        let resources = match &self.resources {
            Some(dir) => format!("resources = \"{}\"", toml_path(dir)),
            None => "# resources = \"/path/to/resources\"".to_string(),
        };

        format!(
            r#"# sitemap-viewer configuration

# URI shown at startup (sitemap://<id>/ loads sitemap/<id>.json)
load = "{load}"

# Directory with sitemap/ and icon/ subdirectories, searched before the
# bundled demo resources
{resources}

[icons]
# Iconset for icon:<category> URIs without an explicit set
default_set = "{default_set}"

[ui]
# Seconds a notification stays visible
toast_secs = {toast_secs}
# Redraw interval in milliseconds
tick_ms = {tick_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            load = self.load,
            resources = resources,
            default_set = self.icons.default_set,
            toast_secs = self.ui.toast_secs,
            tick_ms = self.ui.tick_ms,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_path(&self.logging.file_dir),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}

/// Path as a TOML basic string body (backslashes escaped for Windows paths)
fn toml_path(path: &std::path::Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}
