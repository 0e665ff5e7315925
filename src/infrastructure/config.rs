use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub client: ClientSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Browser front end: `index.html` at `/`, the rest under `/static`.
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    pub csv_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    pub api_base: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ClientSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    let port = std::env::var("PORT").ok();
    build_config(config::File::with_name("config/dashboard").required(false), port)
}

fn build_config<S>(file: S, port: Option<String>) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000_i64)?
        .set_default("server.static_dir", "static")?
        .set_default("data.csv_path", "data/sensor_data.csv")?
        .set_default("client.api_base", "http://127.0.0.1:5000")?
        .add_source(file)
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .set_override_option("server.port", port)?
        .build()?;

    Ok(settings.try_deserialize()?)
}
