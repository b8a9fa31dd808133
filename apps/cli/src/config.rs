use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "./data/rating.db";
const DEFAULT_CSV_DIR: &str = "./csv-files";

pub struct Config {
    pub database_url: String,
    pub csv_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let csv_dir = std::env::var("CSV_DIR").unwrap_or_else(|_| DEFAULT_CSV_DIR.into());
        Self {
            database_url,
            csv_dir: PathBuf::from(csv_dir),
        }
    }

    /// Applies command line overrides on top of the environment.
    pub fn with_overrides(mut self, database_url: Option<String>, csv_dir: Option<PathBuf>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(csv_dir) = csv_dir {
            self.csv_dir = csv_dir;
        }
        self
    }
}
