use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Local;

/// The two binary payloads the backend produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DownloadKind {
    #[strum(to_string = "notes")]
    Notes,
    #[strum(to_string = "summary_audio")]
    SummaryAudio,
}

impl DownloadKind {
    pub fn extension(self) -> &'static str {
        match self {
            DownloadKind::Notes => "pdf",
            DownloadKind::SummaryAudio => "mp3",
        }
    }

    pub fn file_name(self, stamp: &str) -> String {
        format!("{self}-{stamp}.{}", self.extension())
    }
}

/// A payload written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDownload {
    pub kind: DownloadKind,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Writes `bytes` under `dir` with a local timestamped name
pub fn save_payload(dir: &Path, kind: DownloadKind, bytes: &[u8]) -> io::Result<SavedDownload> {
    fs::create_dir_all(dir)?;
    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let path = dir.join(kind.file_name(&stamp));
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), len = bytes.len(), "saved {kind}");

    Ok(SavedDownload {
        kind,
        path,
        bytes: bytes.len(),
    })
}

/// `file://` URL for handing a saved file to the system opener
pub fn file_url(path: &Path) -> String {
    let absolute = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_names_follow_kind() {
        assert_eq!(
            DownloadKind::Notes.file_name("20260101-120000"),
            "notes-20260101-120000.pdf"
        );
        assert_eq!(
            DownloadKind::SummaryAudio.file_name("x"),
            "summary_audio-x.mp3"
        );
    }

    #[test]
    fn saves_into_missing_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("downloads");

        let saved = save_payload(&target, DownloadKind::Notes, b"%PDF-1.4").unwrap();

        assert_eq!(saved.bytes, 8);
        assert!(saved.path.starts_with(&target));
        assert_eq!(saved.path.extension().unwrap(), "pdf");
        assert_eq!(std::fs::read(&saved.path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn file_url_is_absolute() {
        let dir = tempdir().unwrap();
        let saved = save_payload(dir.path(), DownloadKind::SummaryAudio, b"ID3").unwrap();
        let url = file_url(&saved.path);
        assert!(url.starts_with("file://"));
        assert!(url.ends_with(".mp3"));
    }
}
