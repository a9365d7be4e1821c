use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub model_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_dir = env::var("DRAFT_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let model_path = env::var("DRAFT_WIN_MODEL").ok().map(PathBuf::from);

        Config {
            data_dir: PathBuf::from(data_dir),
            model_path,
        }
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.data_dir.join("draft_corpus.json")
    }

    pub fn default_model_path(&self) -> PathBuf {
        self.data_dir.join("models").join("win_model.json")
    }
}
