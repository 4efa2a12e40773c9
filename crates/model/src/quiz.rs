use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Number of questions requested for every generated quiz.
pub const QUESTION_COUNT: usize = 5;

/// Number of options each question is expected to carry.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question as produced by the completion API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Prompt shown to the player.
    pub question: String,
    /// Possible answers to select from, in presentation order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Text of the correct option. Compared by exact string equality.
    #[serde(default)]
    pub answer: String,
    /// Shown once the player has submitted a selection.
    #[serde(default)]
    pub explanation: String,
}

/// Questions in presentation order.
pub type Quiz = Vec<Question>;

impl Question {
    /// Whether this record has exactly four options and exactly one of them
    /// is the answer. The shape of generated questions is trusted, so this is
    /// only ever used for diagnostics.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTION_COUNT && self.options.iter().filter(|opt| **opt == self.answer).count() == 1
    }

    /// Whether the given option text is the correct answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}
