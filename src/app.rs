use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    config::Config,
    download::{DownloadKind, SavedDownload},
    error::{BackendError, DownloadError},
    input::{FocusedField, InputForm, QuizRequest},
    question::Question,
    router::{Screen, ScreenRouter},
    session::{QuizPhase, QuizSession},
    timer::CountdownTick,
};

/// Sequence number tagging one fetch; completions carrying an old ticket are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// Completion of a backend call, posted back into the event loop
#[derive(Debug)]
pub enum BackendEvent {
    Quiz {
        ticket: Ticket,
        result: Result<Vec<Question>, BackendError>,
    },
    Download {
        ticket: Ticket,
        kind: DownloadKind,
        result: Result<SavedDownload, DownloadError>,
    },
}

/// Side effects requested by the app; executed by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchQuiz {
        ticket: Ticket,
        request: QuizRequest,
    },
    FetchDownload {
        ticket: Ticket,
        kind: DownloadKind,
        link: String,
    },
    Open(PathBuf),
    Quit,
}

/// Focusable items on the landing screen, top to bottom
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LandingFocus {
    #[default]
    Link,
    TakeQuiz,
    Notes,
    SummaryAudio,
}

impl LandingFocus {
    pub const ALL: [LandingFocus; 4] = [
        LandingFocus::Link,
        LandingFocus::TakeQuiz,
        LandingFocus::Notes,
        LandingFocus::SummaryAudio,
    ];

    pub fn next(self) -> Self {
        match self {
            LandingFocus::Link => LandingFocus::TakeQuiz,
            LandingFocus::TakeQuiz => LandingFocus::Notes,
            LandingFocus::Notes => LandingFocus::SummaryAudio,
            LandingFocus::SummaryAudio => LandingFocus::Link,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            LandingFocus::Link => LandingFocus::SummaryAudio,
            LandingFocus::TakeQuiz => LandingFocus::Link,
            LandingFocus::Notes => LandingFocus::TakeQuiz,
            LandingFocus::SummaryAudio => LandingFocus::Notes,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LandingFocus::Link => "YouTube link",
            LandingFocus::TakeQuiz => "Take a quiz",
            LandingFocus::Notes => "Download notes",
            LandingFocus::SummaryAudio => "Audio summary",
        }
    }
}

fn download_screen(kind: DownloadKind) -> Screen {
    match kind {
        DownloadKind::Notes => Screen::Notes,
        DownloadKind::SummaryAudio => Screen::SummaryAudio,
    }
}

/// All client state. Performs no I/O: key presses and backend completions
/// go in, [`Command`]s come out.
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub router: ScreenRouter,
    pub form: InputForm,
    pub landing_focus: LandingFocus,
    pub quiz: QuizSession,
    pub notes: Option<SavedDownload>,
    pub audio: Option<SavedDownload>,
    pub alert: Option<String>,
    pub frame: u64,
    next_ticket: u64,
    pending_quiz: Option<Ticket>,
    pending_notes: Option<Ticket>,
    pending_audio: Option<Ticket>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let form = InputForm::new(config.clamped_question_count(), config.difficulty);
        Self {
            config,
            router: ScreenRouter::default(),
            form,
            landing_focus: LandingFocus::default(),
            quiz: QuizSession::default(),
            notes: None,
            audio: None,
            alert: None,
            frame: 0,
            next_ticket: 0,
            pending_quiz: None,
            pending_notes: None,
            pending_audio: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.active()
    }

    pub fn saved(&self, kind: DownloadKind) -> Option<&SavedDownload> {
        match kind {
            DownloadKind::Notes => self.notes.as_ref(),
            DownloadKind::SummaryAudio => self.audio.as_ref(),
        }
    }

    fn saved_mut(&mut self, kind: DownloadKind) -> &mut Option<SavedDownload> {
        match kind {
            DownloadKind::Notes => &mut self.notes,
            DownloadKind::SummaryAudio => &mut self.audio,
        }
    }

    fn pending_download_mut(&mut self, kind: DownloadKind) -> &mut Option<Ticket> {
        match kind {
            DownloadKind::Notes => &mut self.pending_notes,
            DownloadKind::SummaryAudio => &mut self.pending_audio,
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn show_alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "alert");
        self.alert = Some(message);
    }

    /// Back to landing: drops the quiz session and forgets in-flight requests
    pub fn go_landing(&mut self) {
        self.quiz.reset();
        self.pending_quiz = None;
        self.pending_notes = None;
        self.pending_audio = None;
        for screen in Screen::ALL {
            self.router.set_loading(screen, false);
        }
        self.landing_focus = LandingFocus::default();
        self.router.show(Screen::Landing);
    }

    pub fn open_start_screen(&mut self) {
        self.form.focus = FocusedField::default();
        self.router.show(Screen::Start);
    }

    /// Validates the form and asks for a quiz
    pub fn start_quiz(&mut self) -> Option<Command> {
        let request = match self.form.collect_quiz_request() {
            Ok(request) => request,
            Err(err) => {
                self.show_alert(err.to_string());
                return None;
            }
        };

        if !self.quiz.begin_loading(request.clone()) {
            return None;
        }

        let ticket = self.issue_ticket();
        self.pending_quiz = Some(ticket);
        self.router.set_loading(Screen::Start, true);
        Some(Command::FetchQuiz { ticket, request })
    }

    /// Validates the link and asks for notes or the audio summary
    pub fn start_download(&mut self, kind: DownloadKind) -> Option<Command> {
        let link = match self.form.collect_link() {
            Ok(link) => link,
            Err(err) => {
                self.show_alert(err.to_string());
                return None;
            }
        };

        let screen = download_screen(kind);
        let ticket = self.issue_ticket();
        *self.pending_download_mut(kind) = Some(ticket);
        *self.saved_mut(kind) = None;
        self.router.show(screen);
        self.router.set_loading(screen, true);
        Some(Command::FetchDownload { ticket, kind, link })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        // alerts block until dismissed
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return None;
        }

        match self.router.active() {
            Screen::Landing => self.on_landing_key(key),
            Screen::Start => self.on_start_key(key),
            Screen::Quiz => self.on_quiz_key(key),
            Screen::Notes => self.on_download_key(DownloadKind::Notes, key),
            Screen::SummaryAudio => self.on_download_key(DownloadKind::SummaryAudio, key),
        }
    }

    fn on_landing_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => return Some(Command::Quit),
            KeyCode::Tab | KeyCode::Down => self.landing_focus = self.landing_focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.landing_focus = self.landing_focus.previous(),
            KeyCode::Enter => match self.landing_focus {
                LandingFocus::Link => self.landing_focus = LandingFocus::TakeQuiz,
                LandingFocus::TakeQuiz => self.open_start_screen(),
                LandingFocus::Notes => return self.start_download(DownloadKind::Notes),
                LandingFocus::SummaryAudio => {
                    return self.start_download(DownloadKind::SummaryAudio)
                }
            },
            KeyCode::Backspace if self.landing_focus == LandingFocus::Link => {
                self.form.pop_link_char()
            }
            KeyCode::Char('u')
                if self.landing_focus == LandingFocus::Link
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.form.clear_link()
            }
            KeyCode::Char(c) if self.landing_focus == LandingFocus::Link => {
                self.form.push_link_char(c)
            }
            _ => {}
        }
        None
    }

    fn on_start_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Esc {
            self.go_landing();
            return None;
        }
        if self.quiz.phase() == QuizPhase::Loading {
            return None;
        }

        match (key.code, self.form.focus) {
            (KeyCode::Enter, _) => return self.start_quiz(),
            (KeyCode::Tab | KeyCode::Down, _) => self.form.focus = self.form.focus.next(),
            (KeyCode::BackTab | KeyCode::Up, _) => self.form.focus = self.form.focus.previous(),
            (KeyCode::Char(c), FocusedField::Count) => self.form.push_count_digit(c),
            (KeyCode::Backspace, FocusedField::Count) => self.form.pop_count_digit(),
            (KeyCode::Left, FocusedField::Count) => self.form.decrement_count(),
            (KeyCode::Right, FocusedField::Count) => self.form.increment_count(),
            (KeyCode::Left, FocusedField::Difficulty) => self.form.previous_difficulty(),
            (KeyCode::Right | KeyCode::Char(' '), FocusedField::Difficulty) => {
                self.form.next_difficulty()
            }
            _ => {}
        }
        None
    }

    fn on_quiz_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Esc {
            self.go_landing();
            return None;
        }

        match self.quiz.phase() {
            QuizPhase::Active => match key.code {
                KeyCode::Up => self.quiz.focus_previous_question(),
                KeyCode::Down | KeyCode::Tab => self.quiz.focus_next_question(),
                KeyCode::Left => self.quiz.highlight_previous_option(),
                KeyCode::Right => self.quiz.highlight_next_option(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.quiz.select_highlighted();
                }
                KeyCode::Char('s') => {
                    self.quiz.submit();
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let option = c as usize - '1' as usize;
                    self.quiz.select_for_focused(option);
                }
                _ => {}
            },
            QuizPhase::Graded => match key.code {
                KeyCode::Up => self.quiz.scroll_results_up(),
                KeyCode::Down => self.quiz.scroll_results_down(),
                KeyCode::Char('n') => self.open_start_screen(),
                _ => {}
            },
            _ => {}
        }
        None
    }

    fn on_download_key(&mut self, kind: DownloadKind, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => self.go_landing(),
            KeyCode::Char('o') | KeyCode::Char('p') | KeyCode::Enter => {
                return self.saved(kind).map(|s| Command::Open(s.path.clone()));
            }
            _ => {}
        }
        None
    }

    pub fn handle_backend(&mut self, event: BackendEvent) -> Option<Command> {
        match event {
            BackendEvent::Quiz { ticket, result } => {
                if self.pending_quiz != Some(ticket) {
                    tracing::debug!(?ticket, "discarding stale quiz response");
                    return None;
                }
                self.pending_quiz = None;
                self.router.set_loading(Screen::Start, false);

                match result {
                    Ok(questions) => {
                        if self.quiz.activate(questions) {
                            self.router.show(Screen::Quiz);
                        }
                    }
                    Err(err) => {
                        self.quiz.fail();
                        self.show_alert(format!("❌ {err}"));
                    }
                }
                None
            }
            BackendEvent::Download {
                ticket,
                kind,
                result,
            } => {
                if *self.pending_download_mut(kind) != Some(ticket) {
                    tracing::debug!(?ticket, %kind, "discarding stale download");
                    return None;
                }
                *self.pending_download_mut(kind) = None;
                let screen = download_screen(kind);
                self.router.set_loading(screen, false);

                match result {
                    Ok(saved) => {
                        let open = (kind == DownloadKind::SummaryAudio && self.config.auto_play)
                            .then(|| Command::Open(saved.path.clone()));
                        *self.saved_mut(kind) = Some(saved);
                        open
                    }
                    Err(err) => {
                        self.show_alert(format!("❌ {err}"));
                        if self.router.is_active(screen) {
                            self.router.show(Screen::Landing);
                        }
                        None
                    }
                }
            }
        }
    }

    /// Advances timers; returns true when the screen needs a redraw
    pub fn on_tick(&mut self, elapsed: Duration) -> bool {
        self.frame = self.frame.wrapping_add(1);
        let tick = self.quiz.tick(elapsed);
        let loading = Screen::ALL.iter().any(|s| self.router.is_loading(*s));
        loading
            || matches!(
                tick,
                CountdownTick::Running { ticked: true } | CountdownTick::Expired
            )
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
