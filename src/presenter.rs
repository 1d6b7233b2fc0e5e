use crate::session::Session;

/// Per-question grading outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_answer: String },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct)
    }

    pub fn label(&self) -> String {
        match self {
            Feedback::Correct => "✅ Correct".to_string(),
            Feedback::Incorrect { correct_answer } => {
                format!("❌ Incorrect. Correct: {correct_answer}")
            }
        }
    }
}

/// Correct and incorrect counts for the score chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub correct: usize,
    pub incorrect: usize,
}

impl ScoreTally {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// e.g. "3 / 5"
    pub fn label(&self) -> String {
        format!("{} / {}", self.correct, self.total())
    }

    /// Share of correct answers in whole percent
    pub fn percent(&self) -> u16 {
        if self.total() == 0 {
            return 0;
        }
        ((self.correct as f64 / self.total() as f64) * 100.0).round() as u16
    }
}

/// Everything the results view shows for a graded session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub feedback: Vec<Feedback>,
    pub tally: ScoreTally,
}

impl GradeReport {
    pub fn score_line(&self) -> String {
        format!("🎯 Your Score: {}", self.tally.label())
    }
}

/// Grades a session: an unanswered question counts as incorrect
pub fn present_results(session: &Session) -> GradeReport {
    let feedback: Vec<Feedback> = session
        .questions()
        .iter()
        .enumerate()
        .map(|(idx, question)| match session.selected_option(idx) {
            Some(selected) if question.is_correct(selected) => Feedback::Correct,
            _ => Feedback::Incorrect {
                correct_answer: question.correct_answer.clone(),
            },
        })
        .collect();

    let correct = feedback.iter().filter(|f| f.is_correct()).count();
    let tally = ScoreTally {
        correct,
        incorrect: feedback.len() - correct,
    };

    GradeReport { feedback, tally }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Question;

    fn session_with(selections: &[Option<usize>]) -> Session {
        let questions = (0..selections.len())
            .map(|i| Question::new(format!("q{i}"), ["a", "b", "c", "d"], "b"))
            .collect();
        let mut session = Session::new(questions, selections.len() as u32);
        for (idx, sel) in selections.iter().enumerate() {
            if let Some(opt) = sel {
                assert!(session.select(idx, *opt));
            }
        }
        session
    }

    #[test]
    fn counts_matching_selections() {
        let session = session_with(&[Some(1), Some(0), Some(1), None, Some(1)]);
        let report = present_results(&session);
        assert_eq!(report.tally, ScoreTally { correct: 3, incorrect: 2 });
        assert_eq!(report.tally.label(), "3 / 5");
        assert_eq!(report.score_line(), "🎯 Your Score: 3 / 5");
    }

    #[test]
    fn unanswered_questions_show_correct_answer() {
        let report = present_results(&session_with(&[None]));
        assert_eq!(
            report.feedback,
            vec![Feedback::Incorrect {
                correct_answer: "b".into()
            }]
        );
        assert_eq!(report.feedback[0].label(), "❌ Incorrect. Correct: b");
    }

    #[test]
    fn score_is_bounded_by_total() {
        let all = present_results(&session_with(&[Some(1); 6]));
        assert_eq!(all.tally.correct, all.tally.total());
        assert_eq!(all.tally.percent(), 100);

        let none = present_results(&session_with(&[None; 6]));
        assert_eq!(none.tally.correct, 0);
        assert_eq!(none.tally.percent(), 0);
    }

    #[test]
    fn percent_rounds_and_handles_empty() {
        assert_eq!(ScoreTally { correct: 1, incorrect: 2 }.percent(), 33);
        assert_eq!(ScoreTally { correct: 2, incorrect: 1 }.percent(), 67);
        assert_eq!(ScoreTally::default().percent(), 0);
    }
}
