use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::{
    app::{App, LandingFocus},
    download::DownloadKind,
    input::{Difficulty, FocusedField, MAX_QUESTIONS, MIN_QUESTIONS},
    presenter::GradeReport,
    router::Screen,
    session::{QuizPhase, Session},
    ui::{bold, charting, content_area, dim, fit_tail, focused, italic, legend},
    util::{format_bytes, format_time, spinner},
};

/// A UI screen boundary: renders one router screen from app state
pub trait ScreenView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Link field and the three actions
pub struct LandingView;

impl ScreenView for LandingView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let area = content_area(area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(3), // link field
                Constraint::Length(1), // padding
                Constraint::Length(3), // actions
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(vec![
            Line::from(Span::styled("tubequiz", bold().fg(Color::Magenta))),
            Line::from(Span::styled(
                "quizzes, notes and audio summaries from a video",
                dim(),
            )),
        ])
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let link_focused = app.landing_focus == LandingFocus::Link;
        let inner_width = chunks[1].width.saturating_sub(3) as usize;
        let mut link = fit_tail(&app.form.link, inner_width);
        if link_focused {
            link.push('▏');
        }
        Paragraph::new(link)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(LandingFocus::Link.label())
                    .border_style(if link_focused { focused() } else { dim() }),
            )
            .render(chunks[1], buf);

        let actions: Vec<Line> = LandingFocus::ALL[1..]
            .iter()
            .map(|item| {
                if *item == app.landing_focus {
                    Line::from(Span::styled(format!("> {}", item.label()), focused()))
                } else {
                    Line::from(Span::raw(format!("  {}", item.label())))
                }
            })
            .collect();
        Paragraph::new(actions).render(chunks[3], buf);

        legend("(tab) move / (enter) select / (ctrl+u) clear link / (esc)ape").render(chunks[5], buf);
    }
}

/// Question count, difficulty and the start button
pub struct StartView;

impl ScreenView for StartView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let area = content_area(area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(1), // count
                Constraint::Length(1), // difficulty
                Constraint::Length(1), // padding
                Constraint::Length(1), // start
                Constraint::Length(1), // padding
                Constraint::Length(1), // loader
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        let form = &app.form;
        let label_style = |field: FocusedField| {
            if form.focus == field {
                focused()
            } else {
                bold()
            }
        };

        Paragraph::new(Span::styled(
            format!("Quiz on {}", fit_tail(&form.link, area.width.saturating_sub(8) as usize)),
            bold(),
        ))
        .render(chunks[0], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Questions ({MIN_QUESTIONS}-{MAX_QUESTIONS}): "),
                label_style(FocusedField::Count),
            ),
            Span::raw(format!("[ {:>2} ]", form.count)),
        ]))
        .render(chunks[1], buf);

        let mut difficulty = vec![Span::styled(
            "Difficulty: ",
            label_style(FocusedField::Difficulty),
        )];
        for level in Difficulty::ALL {
            let style = if level == form.difficulty {
                bold().add_modifier(Modifier::UNDERLINED).fg(Color::Green)
            } else {
                dim()
            };
            difficulty.push(Span::styled(level.to_string(), style));
            difficulty.push(Span::raw("  "));
        }
        Paragraph::new(Line::from(difficulty)).render(chunks[2], buf);

        Paragraph::new(Span::styled("[ Start ]", label_style(FocusedField::Start)))
            .render(chunks[4], buf);

        if app.router.is_loading(Screen::Start) {
            Paragraph::new(Span::styled(
                format!("{} Generating quiz...", spinner(app.frame)),
                Style::default().fg(Color::Yellow),
            ))
            .render(chunks[6], buf);
        }

        legend("(tab) move / (←→) adjust / (enter) start / (esc) back").render(chunks[8], buf);
    }
}

/// The running quiz, or its results once graded
pub struct QuizView;

impl QuizView {
    fn render_active(session: &Session, app: &App, area: Rect, buf: &mut Buffer) {
        let cursor = app.quiz.cursor();
        let Some(question) = session.questions().get(cursor.question) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // timer + position
                Constraint::Length(1), // progress strip
                Constraint::Length(1), // padding
                Constraint::Min(3),    // question + options
                Constraint::Length(1), // legend
            ])
            .split(area);

        let remaining = session.remaining_seconds();
        let timer_style = if remaining <= 10 {
            bold().fg(Color::Red)
        } else {
            bold()
        };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("⏱ {}", format_time(remaining)), timer_style),
            Span::raw("   "),
            Span::styled(
                format!(
                    "Question {} of {}",
                    cursor.question + 1,
                    session.questions().len()
                ),
                bold(),
            ),
            Span::raw("   "),
            Span::styled(
                format!(
                    "{}/{} answered",
                    session.answered_count(),
                    session.questions().len()
                ),
                dim(),
            ),
        ]))
        .render(chunks[0], buf);

        let strip = (0..session.questions().len())
            .map(|idx| match (idx == cursor.question, session.selection(idx)) {
                (true, _) => "◆",
                (false, Some(_)) => "●",
                (false, None) => "○",
            })
            .join(" ");
        Paragraph::new(Span::styled(strip, dim())).render(chunks[1], buf);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{}: {}", cursor.question + 1, question.prompt),
                bold(),
            )),
            Line::default(),
        ];
        let selected = session.selection(cursor.question);
        for (idx, option) in question.options.iter().enumerate() {
            let marker = if selected == Some(idx) { "◉" } else { "○" };
            let style = if idx == cursor.option {
                focused().add_modifier(Modifier::REVERSED)
            } else if selected == Some(idx) {
                bold().fg(Color::Green)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{marker} {}. {option}", idx + 1),
                style,
            )));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        legend("(↑↓) question / (←→) option / (enter) choose / (1-9) pick / (s)ubmit / (esc) leave")
            .render(chunks[4], buf);
    }

    fn render_graded(session: &Session, report: &GradeReport, app: &App, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // timer notice
                Constraint::Length(1), // score
                Constraint::Length(1), // padding
                Constraint::Min(4),    // feedback + chart
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("⌛ Time's up or test submitted.", dim()))
            .render(chunks[0], buf);
        Paragraph::new(Span::styled(report.score_line(), bold().fg(Color::Magenta)))
            .render(chunks[1], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[3]);

        let feedback: Vec<Line> = session
            .questions()
            .iter()
            .zip(&report.feedback)
            .enumerate()
            .skip(app.quiz.results_offset())
            .flat_map(|(idx, (question, fb))| {
                let style = if fb.is_correct() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                };
                let chosen = session.selected_option(idx).unwrap_or("no answer");
                [
                    Line::from(Span::styled(
                        format!("{}: {}", idx + 1, question.prompt),
                        bold(),
                    )),
                    Line::from(vec![
                        Span::styled(format!("   {}", fb.label()), style),
                        Span::styled(format!("  (you: {chosen})"), dim()),
                    ]),
                ]
            })
            .collect();
        Paragraph::new(feedback)
            .wrap(Wrap { trim: false })
            .render(body[0], buf);

        render_score_chart(report, body[1], buf);

        legend("(↑↓) scroll / (n)ew quiz / (esc) home").render(chunks[4], buf);
    }
}

fn render_score_chart(report: &GradeReport, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let (params, max) = charting::compute_chart_params(&report.tally);
    let colors = [Color::Green, Color::Red];
    let bars: Vec<Bar> = params
        .iter()
        .zip(colors)
        .map(|(bar, color)| {
            Bar::default()
                .value(bar.value)
                .label(Line::from(bar.label))
                .style(Style::default().fg(color))
                .value_style(bold().fg(Color::Black).bg(color))
        })
        .collect();

    BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .max(max)
        .render(chunks[0], buf);

    Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Red))
        .ratio(charting::correct_ratio(&report.tally))
        .label(format!("{}% correct", report.tally.percent()))
        .render(chunks[1], buf);
}

impl ScreenView for QuizView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let area = content_area(area);
        match (app.quiz.phase(), app.quiz.session(), app.quiz.report()) {
            (QuizPhase::Active, Some(session), _) => {
                Self::render_active(session, app, area, buf)
            }
            (QuizPhase::Graded, Some(session), Some(report)) => {
                Self::render_graded(session, report, app, area, buf)
            }
            _ => Paragraph::new(Span::styled("No quiz loaded. (esc) home", italic()))
                .alignment(Alignment::Center)
                .render(area, buf),
        }
    }
}

/// Notes document or audio summary status
pub struct DownloadView(pub DownloadKind);

impl ScreenView for DownloadView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let kind = self.0;
        let (title, screen, noun, open_key) = match kind {
            DownloadKind::Notes => ("Notes", Screen::Notes, "notes", "(o)pen"),
            DownloadKind::SummaryAudio => (
                "Audio summary",
                Screen::SummaryAudio,
                "audio summary",
                "(p)lay",
            ),
        };

        let area = content_area(area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(2),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(Span::styled(title, bold().fg(Color::Magenta))).render(chunks[0], buf);

        let body = if app.router.is_loading(screen) {
            vec![Line::from(Span::styled(
                format!("{} Preparing {noun}...", spinner(app.frame)),
                Style::default().fg(Color::Yellow),
            ))]
        } else if let Some(saved) = app.saved(kind) {
            vec![
                Line::from(Span::styled(
                    format!("Saved {} ({})", noun, format_bytes(saved.bytes)),
                    bold().fg(Color::Green),
                )),
                Line::from(Span::raw(saved.path.display().to_string())),
            ]
        } else {
            vec![Line::from(Span::styled(format!("No {noun} yet."), italic()))]
        };
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);

        let keys = if app.saved(kind).is_some() {
            format!("{open_key} / (esc) back")
        } else {
            "(esc) back".to_string()
        };
        legend(&keys).render(chunks[2], buf);
    }
}

/// Helper to construct the view for the active screen
pub fn current_screen(screen: Screen) -> Box<dyn ScreenView> {
    match screen {
        Screen::Landing => Box::new(LandingView),
        Screen::Start => Box::new(StartView),
        Screen::Quiz => Box::new(QuizView),
        Screen::Notes => Box::new(DownloadView(DownloadKind::Notes)),
        Screen::SummaryAudio => Box::new(DownloadView(DownloadKind::SummaryAudio)),
    }
}
