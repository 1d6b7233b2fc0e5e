use crate::presenter::ScoreTally;

/// One bar of the score chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBar {
    pub label: &'static str,
    pub value: u64,
}

/// Correct and incorrect bars plus the y-axis maximum
pub fn compute_chart_params(tally: &ScoreTally) -> ([ScoreBar; 2], u64) {
    let bars = [
        ScoreBar {
            label: "Correct",
            value: tally.correct as u64,
        },
        ScoreBar {
            label: "Incorrect",
            value: tally.incorrect as u64,
        },
    ];
    (bars, (tally.total() as u64).max(1))
}

/// Gauge ratio in [0, 1]
pub fn correct_ratio(tally: &ScoreTally) -> f64 {
    if tally.total() == 0 {
        0.0
    } else {
        tally.correct as f64 / tally.total() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params() {
        let (bars, max) = compute_chart_params(&ScoreTally {
            correct: 3,
            incorrect: 2,
        });
        assert_eq!(bars[0].value, 3);
        assert_eq!(bars[1].label, "Incorrect");
        assert_eq!(max, 5);
    }

    #[test]
    fn test_compute_chart_params_empty() {
        let (bars, max) = compute_chart_params(&ScoreTally::default());
        assert_eq!(bars[0].value + bars[1].value, 0);
        assert_eq!(max, 1);
        assert_eq!(correct_ratio(&ScoreTally::default()), 0.0);
    }

    #[test]
    fn test_correct_ratio() {
        let ratio = correct_ratio(&ScoreTally {
            correct: 1,
            incorrect: 3,
        });
        assert!((ratio - 0.25).abs() < f64::EPSILON);
    }
}
