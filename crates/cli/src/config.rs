use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/postavka.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub session_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7654".to_string(),
            session_file: "config/session.json".to_string(),
        }
    }
}

/// Loads configuration with file < env < flag precedence.
pub fn load(
    config_path: Option<&str>,
    base_url: Option<String>,
    session_file: Option<String>,
) -> Result<AppConfig, config::ConfigError> {
    let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("POSTAVKA"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = base_url {
        settings.base_url = base_url;
    }
    if let Some(session_file) = session_file {
        settings.session_file = session_file;
    }

    Ok(settings)
}
