use std::time::Duration;

use crate::{
    input::QuizRequest,
    presenter::{present_results, GradeReport},
    question::Question,
    timer::{Countdown, CountdownTick},
};

/// Seconds granted per requested question
pub const SECONDS_PER_QUESTION: u32 = 10;

/// One quiz attempt: questions, countdown, selections and the submitted flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    questions: Vec<Question>,
    question_count: u32,
    selections: Vec<Option<usize>>,
    countdown: Countdown,
    submitted: bool,
}

impl Session {
    /// Builds an unstarted session timed for `question_count` questions
    pub fn new(questions: Vec<Question>, question_count: u32) -> Self {
        let selections = vec![None; questions.len()];
        let countdown = Countdown::new(question_count.saturating_mul(SECONDS_PER_QUESTION));
        Self {
            questions,
            question_count,
            selections,
            countdown,
            submitted: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    pub fn selected_option(&self, question: usize) -> Option<&str> {
        let option = self.selection(question)?;
        self.questions.get(question)?.option(option)
    }

    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    /// Records one answer per question; rejected once submitted
    pub fn select(&mut self, question: usize, option: usize) -> bool {
        if self.submitted {
            return false;
        }
        match self.questions.get(question) {
            Some(q) if option < q.options.len() => {
                self.selections[question] = Some(option);
                true
            }
            _ => false,
        }
    }

    fn start_countdown(&mut self) {
        self.countdown
            .start(self.question_count.saturating_mul(SECONDS_PER_QUESTION));
    }
}

/// Lifecycle of the quiz screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display)]
pub enum QuizPhase {
    #[default]
    Idle,
    Loading,
    Active,
    Grading,
    Graded,
}

/// What caused grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GradeTrigger {
    Submitted,
    TimedOut,
}

/// Question and option highlighted in the quiz view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizCursor {
    pub question: usize,
    pub option: usize,
}

/// The quiz state machine: `Idle → Loading → Active → Grading → Graded`
#[derive(Debug, Default)]
pub struct QuizSession {
    phase: QuizPhase,
    pending: Option<QuizRequest>,
    session: Option<Session>,
    report: Option<GradeReport>,
    grading_passes: u32,
    cursor: QuizCursor,
    results_offset: usize,
}

impl QuizSession {
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    pub fn pending_request(&self) -> Option<&QuizRequest> {
        self.pending.as_ref()
    }

    /// Number of times the current session was graded (0 or 1)
    pub fn grading_passes(&self) -> u32 {
        self.grading_passes
    }

    pub fn cursor(&self) -> QuizCursor {
        self.cursor
    }

    pub fn results_offset(&self) -> usize {
        self.results_offset
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.session.as_ref().map(Session::remaining_seconds)
    }

    /// Idle or Graded → Loading. Refused while a quiz is loading or running.
    pub fn begin_loading(&mut self, request: QuizRequest) -> bool {
        match self.phase {
            QuizPhase::Idle | QuizPhase::Graded => {
                tracing::debug!(num = request.num, diff = %request.diff, "quiz loading");
                // drops any graded attempt
                *self = Self::default();
                self.pending = Some(request);
                self.phase = QuizPhase::Loading;
                true
            }
            _ => false,
        }
    }

    /// Loading → Active with freshly fetched questions
    pub fn activate(&mut self, questions: Vec<Question>) -> bool {
        if self.phase != QuizPhase::Loading {
            return false;
        }
        let Some(request) = self.pending.take() else {
            return false;
        };

        if let Some(previous) = self.session.as_mut() {
            previous.countdown.cancel();
        }

        for (idx, q) in questions.iter().enumerate() {
            if !q.is_answerable() {
                tracing::warn!(question = idx + 1, "answer is not one of the options");
            }
        }

        let mut session = Session::new(questions, request.num);
        session.start_countdown();
        tracing::info!(
            questions = session.questions().len(),
            seconds = session.remaining_seconds(),
            "quiz started"
        );

        self.session = Some(session);
        self.report = None;
        self.grading_passes = 0;
        self.cursor = QuizCursor::default();
        self.results_offset = 0;
        self.phase = QuizPhase::Active;
        true
    }

    /// Loading → Idle after a failed fetch; no session is created
    pub fn fail(&mut self) {
        if self.phase == QuizPhase::Loading {
            self.pending = None;
            self.phase = QuizPhase::Idle;
        }
    }

    /// Back to Idle, dropping any session
    pub fn reset(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.countdown.cancel();
        }
        *self = Self::default();
    }

    pub fn select(&mut self, question: usize, option: usize) -> bool {
        if self.phase != QuizPhase::Active {
            return false;
        }
        self.session
            .as_mut()
            .is_some_and(|s| s.select(question, option))
    }

    /// Picks the highlighted option of the focused question
    pub fn select_highlighted(&mut self) -> bool {
        let QuizCursor { question, option } = self.cursor;
        self.select(question, option)
    }

    /// Picks option `option` of the focused question and moves the highlight to it
    pub fn select_for_focused(&mut self, option: usize) -> bool {
        let selected = self.select(self.cursor.question, option);
        if selected {
            self.cursor.option = option;
        }
        selected
    }

    /// Explicit submission. Returns the report only for the pass that graded.
    pub fn submit(&mut self) -> Option<&GradeReport> {
        self.grade(GradeTrigger::Submitted)
    }

    /// Advances the countdown; grades on expiry
    pub fn tick(&mut self, elapsed: Duration) -> CountdownTick {
        if self.phase != QuizPhase::Active {
            return CountdownTick::Stopped;
        }
        let Some(session) = self.session.as_mut() else {
            return CountdownTick::Stopped;
        };

        let tick = session.countdown.advance(elapsed);
        if tick == CountdownTick::Expired {
            self.grade(GradeTrigger::TimedOut);
        }
        tick
    }

    fn grade(&mut self, trigger: GradeTrigger) -> Option<&GradeReport> {
        if self.phase != QuizPhase::Active {
            return None;
        }
        let session = self.session.as_mut()?;

        // stop the clock before anything else so the other trigger cannot fire
        session.countdown.cancel();
        self.phase = QuizPhase::Grading;
        session.submitted = true;

        let report = present_results(session);
        tracing::info!(%trigger, score = %report.tally.label(), "quiz graded");

        self.grading_passes += 1;
        self.report = Some(report);
        self.phase = QuizPhase::Graded;
        self.report.as_ref()
    }

    pub fn focus_next_question(&mut self) {
        let len = self.question_len();
        if len > 0 && self.cursor.question + 1 < len {
            self.cursor.question += 1;
            self.cursor.option = self.focused_selection();
        }
    }

    pub fn focus_previous_question(&mut self) {
        if self.cursor.question > 0 {
            self.cursor.question -= 1;
            self.cursor.option = self.focused_selection();
        }
    }

    pub fn highlight_next_option(&mut self) {
        let len = self.focused_option_len();
        if len > 0 {
            self.cursor.option = (self.cursor.option + 1) % len;
        }
    }

    pub fn highlight_previous_option(&mut self) {
        let len = self.focused_option_len();
        if len > 0 {
            self.cursor.option = (self.cursor.option + len - 1) % len;
        }
    }

    pub fn scroll_results_down(&mut self) {
        let len = self.report.as_ref().map_or(0, |r| r.feedback.len());
        if self.results_offset + 1 < len {
            self.results_offset += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.results_offset = self.results_offset.saturating_sub(1);
    }

    fn question_len(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.questions().len())
    }

    fn focused_option_len(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.questions().get(self.cursor.question))
            .map_or(0, |q| q.options.len())
    }

    fn focused_selection(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.selection(self.cursor.question))
            .unwrap_or(0)
    }
}
