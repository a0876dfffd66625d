use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub tmdb_api_key: String,

    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,

    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_storage_dir() -> String {
    "./data/storage".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }

    /// Builds a config from explicit key/value pairs, applying the same defaults as `from_env`.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
