use directories::{ProjectDirs, UserDirs};
use std::path::PathBuf;

const APP_NAME: &str = "tubequiz";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tubequiz_config.json")
        }
    }

    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join(APP_NAME))
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    /// The user's download folder, falling back to the local data dir
    pub fn download_dir() -> PathBuf {
        UserDirs::new()
            .and_then(|ud| ud.download_dir().map(|d| d.join(APP_NAME)))
            .or_else(|| {
                ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().join("downloads"))
            })
            .unwrap_or_else(|| PathBuf::from("downloads"))
    }
}
