use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tubequiz::{
    app::{App, BackendEvent, Command},
    error::BackendError,
    question::Question,
    router::Screen,
    runtime::{AppEvent, FixedTicker, Runner, TestEventSource},
    session::QuizPhase,
};

// Headless integration: drives App through Runner/TestEventSource without a TTY.
// Backend completions are posted into the event channel the way the dispatcher does.

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| {
            Question::new(
                format!("Question number {i}?"),
                ["red", "green", "blue", "yellow"],
                "green",
            )
        })
        .collect()
}

/// Pumps events until the channel is drained, answering commands the way main does
fn pump(
    app: &mut App,
    runner: &Runner<TestEventSource, FixedTicker>,
    mut on_command: impl FnMut(Command),
) {
    for _ in 0..200u32 {
        let command = match runner.step() {
            AppEvent::Tick => return,
            AppEvent::Resize => None,
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Backend(event) => app.handle_backend(event),
        };
        if let Some(command) = command {
            on_command(command);
        }
    }
}

fn runner() -> Runner<TestEventSource, FixedTicker> {
    Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    )
}

/// Types the link on landing and walks to a running quiz of `n` questions
fn start_quiz(app: &mut App, runner: &Runner<TestEventSource, FixedTicker>, n: usize) {
    let tx = runner.sender();
    for c in "https://youtu.be/dQw4w9WgXcQ".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Tab)).unwrap(); // focus "Take a quiz"
    tx.send(key(KeyCode::Enter)).unwrap(); // start screen
    tx.send(key(KeyCode::Enter)).unwrap(); // request

    let reply = runner.sender();
    pump(app, runner, |command| match command {
        Command::FetchQuiz { ticket, request } => {
            assert_eq!(request.num as usize, 5);
            reply
                .send(AppEvent::Backend(BackendEvent::Quiz {
                    ticket,
                    result: Ok(questions(n)),
                }))
                .unwrap();
        }
        other => panic!("unexpected command {other:?}"),
    });
}

#[test]
fn headless_quiz_submitted_with_three_correct() {
    let mut app = App::default();
    let runner = runner();
    start_quiz(&mut app, &runner, 5);

    assert_eq!(app.screen(), Screen::Quiz);
    assert_eq!(app.quiz.phase(), QuizPhase::Active);
    assert_eq!(app.quiz.remaining_seconds(), Some(50));

    // green is option 2; answer the first three, leave the rest blank
    let tx = runner.sender();
    for _ in 0..3 {
        tx.send(key(KeyCode::Char('2'))).unwrap();
        tx.send(key(KeyCode::Down)).unwrap();
    }
    tx.send(key(KeyCode::Char('s'))).unwrap();
    pump(&mut app, &runner, |command| panic!("unexpected {command:?}"));

    assert_eq!(app.quiz.phase(), QuizPhase::Graded);
    let report = app.quiz.report().expect("graded");
    assert_eq!(report.tally.label(), "3 / 5");
    assert_eq!(report.score_line(), "🎯 Your Score: 3 / 5");
    assert!(!app.quiz.session().unwrap().is_timer_running());

    // time passing after grading changes nothing
    app.on_tick(Duration::from_secs(120));
    assert_eq!(app.quiz.grading_passes(), 1);
}

#[test]
fn headless_quiz_times_out() {
    let mut app = App::default();
    let runner = runner();
    start_quiz(&mut app, &runner, 5);

    for _ in 0..49 {
        app.on_tick(Duration::from_secs(1));
    }
    assert_eq!(app.quiz.phase(), QuizPhase::Active);
    assert_eq!(app.quiz.remaining_seconds(), Some(1));

    app.on_tick(Duration::from_secs(1));
    assert_eq!(app.quiz.phase(), QuizPhase::Graded);
    let report = app.quiz.report().expect("graded on timeout");
    assert_eq!(report.tally.label(), "0 / 5");
    assert_eq!(app.quiz.grading_passes(), 1);

    // a late submit is a no-op
    runner.sender().send(key(KeyCode::Char('s'))).unwrap();
    pump(&mut app, &runner, |command| panic!("unexpected {command:?}"));
    assert_eq!(app.quiz.grading_passes(), 1);
}

#[test]
fn headless_rejects_out_of_range_count() {
    let mut app = App::default();
    app.form.link = "https://youtu.be/abc".into();
    app.open_start_screen();

    let runner = runner();
    let tx = runner.sender();
    tx.send(key(KeyCode::Backspace)).unwrap();
    tx.send(key(KeyCode::Char('4'))).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    pump(&mut app, &runner, |command| panic!("no request expected, got {command:?}"));

    assert_eq!(app.alert.as_deref(), Some("Select between 5 and 20 questions"));
    assert_eq!(app.quiz.phase(), QuizPhase::Idle);
    assert_eq!(app.screen(), Screen::Start);
}

#[test]
fn headless_backend_error_returns_to_idle() {
    let mut app = App::default();
    let runner = runner();
    let tx = runner.sender();
    for c in "not-a-video".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Tab)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();

    let reply = runner.sender();
    pump(&mut app, &runner, |command| match command {
        Command::FetchQuiz { ticket, .. } => reply
            .send(AppEvent::Backend(BackendEvent::Quiz {
                ticket,
                result: Err(BackendError::Server("invalid link".into())),
            }))
            .unwrap(),
        other => panic!("unexpected command {other:?}"),
    });

    assert_eq!(app.quiz.phase(), QuizPhase::Idle);
    assert_eq!(app.screen(), Screen::Start);
    assert!(!app.router.is_loading(Screen::Start));
    assert_eq!(app.alert.as_deref(), Some("❌ invalid link"));
}

#[test]
fn headless_empty_link_is_rejected_before_any_request() {
    let mut app = App::default();
    let runner = runner();
    let tx = runner.sender();
    tx.send(key(KeyCode::Down)).unwrap();
    tx.send(key(KeyCode::Down)).unwrap(); // "Download notes"
    tx.send(key(KeyCode::Enter)).unwrap();
    pump(&mut app, &runner, |command| panic!("no request expected, got {command:?}"));

    assert_eq!(app.alert.as_deref(), Some("Please enter a YouTube link"));
    assert_eq!(app.screen(), Screen::Landing);
}
