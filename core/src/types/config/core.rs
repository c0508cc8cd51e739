use std::path::PathBuf;

/// Core configuration for opening a persistent consent store.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("consent.redb")
    }

    pub fn app_config_path(&self) -> PathBuf {
        self.base_path.join("config.toml")
    }
}
