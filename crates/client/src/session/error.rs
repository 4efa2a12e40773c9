use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The quiz has not been fetched yet.
    NotLoaded,
    /// Every question has been answered.
    Finished,
    /// Only a loading session can accept a fetched quiz.
    NotLoading,
    /// The current question has already been submitted.
    Revealed,
    /// The current question has not been submitted yet.
    NotRevealed,
    /// There is no such option on the current question.
    InvalidChoice,
    /// Nothing has been selected for the current question.
    NoSelection,
    /// Only a failed session can be retried.
    NotFailed,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotLoaded => "The quiz is not ready yet.",
            Self::Finished => "The quiz is already over.",
            Self::NotLoading => "The quiz has already been loaded.",
            Self::Revealed => "This question has already been answered.",
            Self::NotRevealed => "Submit an answer before moving on.",
            Self::InvalidChoice => "There is no such option.",
            Self::NoSelection => "Select an option first.",
            Self::NotFailed => "Only a failed quiz can be retried.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
