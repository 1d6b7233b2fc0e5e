use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc::Sender, Arc};

use tokio::runtime::Handle;
use webbrowser::Browser;

use crate::{
    app::{BackendEvent, Command, Ticket},
    backend::BackendClient,
    download::{file_url, save_payload, DownloadKind, SavedDownload},
    error::DownloadError,
    input::QuizRequest,
    runtime::AppEvent,
};

/// Executes [`Command`]s: network calls run as tokio tasks and report back
/// through the event channel, so all state changes stay on the UI thread.
pub struct Dispatcher {
    handle: Handle,
    client: Arc<BackendClient>,
    download_dir: PathBuf,
    events: Sender<AppEvent>,
}

impl Dispatcher {
    pub fn new(
        handle: Handle,
        client: BackendClient,
        download_dir: PathBuf,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            handle,
            client: Arc::new(client),
            download_dir,
            events,
        }
    }

    pub fn dispatch(&self, command: Command) {
        match command {
            Command::FetchQuiz { ticket, request } => self.fetch_quiz(ticket, request),
            Command::FetchDownload { ticket, kind, link } => {
                self.fetch_download(ticket, kind, link)
            }
            Command::Open(path) => open(&path),
            Command::Quit => tracing::debug!("quit is handled by the event loop"),
        }
    }

    fn fetch_quiz(&self, ticket: Ticket, request: QuizRequest) {
        let client = Arc::clone(&self.client);
        let events = self.events.clone();

        self.handle.spawn(async move {
            let result = client.request_quiz(&request).await;
            if events
                .send(AppEvent::Backend(BackendEvent::Quiz { ticket, result }))
                .is_err()
            {
                tracing::debug!(?ticket, "event loop gone; dropping quiz response");
            }
        });
    }

    fn fetch_download(&self, ticket: Ticket, kind: DownloadKind, link: String) {
        let client = Arc::clone(&self.client);
        let events = self.events.clone();
        let dir = self.download_dir.clone();

        self.handle.spawn(async move {
            let result = download(&client, &dir, kind, &link).await;
            if let Err(err) = &result {
                tracing::warn!(%kind, %err, "download failed");
            }
            if events
                .send(AppEvent::Backend(BackendEvent::Download {
                    ticket,
                    kind,
                    result,
                }))
                .is_err()
            {
                tracing::debug!(?ticket, "event loop gone; dropping download");
            }
        });
    }
}

async fn download(
    client: &BackendClient,
    dir: &Path,
    kind: DownloadKind,
    link: &str,
) -> Result<SavedDownload, DownloadError> {
    let bytes = match kind {
        DownloadKind::Notes => client.request_notes(link).await?,
        DownloadKind::SummaryAudio => client.request_summary_audio(link).await?,
    };
    let dir = dir.to_path_buf();
    let saved = tokio::task::spawn_blocking(move || save_payload(&dir, kind, &bytes))
        .await
        .map_err(io::Error::other)??;
    Ok(saved)
}

/// Hands a saved file to the system opener
fn open(path: &Path) {
    if !Browser::is_available() {
        tracing::warn!(path = %path.display(), "no opener available");
        return;
    }
    if let Err(err) = webbrowser::open(&file_url(path)) {
        tracing::warn!(path = %path.display(), %err, "could not open file");
    }
}
