use crate::session::Outcome;

/// `part / whole` as a percentage, rounded half up. Zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Navigation offered by the results stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Start over with a fresh quiz on the default topic.
    Retake,
    GoHome,
}

impl Action {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Retake => "Retake Quiz",
            Self::GoHome => "Go to Home",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    Outstanding,
    GreatJob,
    KeepPracticing,
}

impl Rating {
    pub const fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Self::Outstanding,
            60.. => Self::GreatJob,
            _ => Self::KeepPracticing,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding!",
            Self::GreatJob => "Great job!",
            Self::KeepPracticing => "Keep practicing!",
        }
    }
}

/// How a single option is highlighted during review.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    /// The correct answer.
    Correct,
    /// The player's pick, when it was wrong.
    Wrong,
    Neutral,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItem {
    pub question: String,
    pub options: Vec<(String, Mark)>,
    pub user_answer: String,
    pub answer: String,
    pub explanation: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub rating: Rating,
    pub items: Vec<ReviewItem>,
}

/// The results stage. Reaching it without a finished attempt is a valid,
/// empty state rather than an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Review {
    Empty,
    Report(Report),
}

impl Review {
    pub const fn actions(&self) -> &'static [Action] {
        match self {
            Self::Empty => &[Action::GoHome],
            Self::Report(_) => &[Action::Retake, Action::GoHome],
        }
    }
}

impl From<Outcome> for Report {
    fn from(Outcome { score, total, questions, user_answers }: Outcome) -> Self {
        let items = questions
            .into_iter()
            .enumerate()
            .map(|(i, question)| {
                let user_answer = user_answers.get(i).cloned().unwrap_or_default();
                let correct = question.is_correct(&user_answer);
                let options = question
                    .options
                    .into_iter()
                    .map(|option| {
                        let mark = if option == question.answer {
                            Mark::Correct
                        } else if option == user_answer && !correct {
                            Mark::Wrong
                        } else {
                            Mark::Neutral
                        };
                        (option, mark)
                    })
                    .collect();
                ReviewItem {
                    question: question.question,
                    options,
                    user_answer,
                    answer: question.answer,
                    explanation: question.explanation,
                    correct,
                }
            })
            .collect();

        let percentage = percentage(score, total);
        Self { score, total, percentage, rating: Rating::from_percentage(percentage), items }
    }
}

impl From<Option<Outcome>> for Review {
    fn from(outcome: Option<Outcome>) -> Self {
        match outcome {
            Some(outcome) => Self::Report(outcome.into()),
            None => Self::Empty,
        }
    }
}
