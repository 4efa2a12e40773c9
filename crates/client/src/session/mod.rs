mod error;

pub use error::{Error, Result};

use crate::results::percentage;
use core::{fmt::Display, mem};
use model::{Difficulty, GenerationRequest, Question, Quiz};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Options may still be (re)selected.
    Answering,
    /// The selection is frozen and its correctness is shown.
    Revealed,
}

/// Position within a loaded quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Never empty.
    quiz: Quiz,
    index: usize,
    /// Index into the options of the current question.
    selected: Option<usize>,
    /// Submitted option text per question. Empty until answered.
    answers: Vec<String>,
    score: usize,
    phase: Phase,
}

impl Progress {
    fn new(quiz: Quiz) -> Self {
        let answers = vec![String::new(); quiz.len()];
        Self { quiz, index: 0, selected: None, answers, score: 0, phase: Phase::Answering }
    }

    pub fn question(&self) -> &Question {
        &self.quiz[self.index]
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    /// One-based number of the current question.
    pub const fn position(&self) -> usize {
        self.index + 1
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    pub const fn score(&self) -> usize {
        self.score
    }

    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Share of the quiz reached so far, counting the current question.
    pub fn percent_complete(&self) -> u32 {
        percentage(self.position(), self.total())
    }

    /// Whether the submitted selection was right. Only known once revealed.
    pub fn is_correct(&self) -> Option<bool> {
        if self.phase != Phase::Revealed {
            return None;
        }
        Some(self.question().is_correct(&self.answers[self.index]))
    }
}

/// Everything the results stage needs from a finished attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub score: usize,
    pub total: usize,
    pub questions: Quiz,
    /// Submitted option text per question, or empty where unanswered.
    pub user_answers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum State {
    Loading,
    Ready(Progress),
    Finished(Outcome),
    Failed(Box<str>),
}

/// A single quiz attempt, from topic submission to the final tally.
pub struct Session {
    request: GenerationRequest,
    state: State,
}

impl Session {
    /// Begins loading a quiz about `topic`. Returns the request to issue.
    pub fn start(topic: &str) -> (Self, GenerationRequest) {
        let request = GenerationRequest::new(topic, Difficulty::default());
        log::debug!("Starting a quiz session: {request:?}");
        (Self { request: request.clone(), state: State::Loading }, request)
    }

    pub const fn state(&self) -> &State {
        &self.state
    }

    pub const fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn progress(&self) -> Option<&Progress> {
        match &self.state {
            State::Ready(progress) => Some(progress),
            _ => None,
        }
    }

    fn progress_mut(&mut self) -> Result<&mut Progress> {
        match &mut self.state {
            State::Ready(progress) => Ok(progress),
            State::Finished(_) => Err(Error::Finished),
            State::Loading | State::Failed(_) => Err(Error::NotLoaded),
        }
    }

    /// Resolves the pending request.
    pub fn on_loaded<E: Display>(&mut self, result: core::result::Result<Quiz, E>) -> Result<()> {
        if self.state != State::Loading {
            return Err(Error::NotLoading);
        }

        self.state = match result {
            Ok(quiz) if quiz.is_empty() => State::Failed(crate::fetch::Error::Empty.to_string().into_boxed_str()),
            Ok(quiz) => State::Ready(Progress::new(quiz)),
            Err(err) => {
                log::error!("Error fetching quiz: {err}");
                State::Failed(err.to_string().into_boxed_str())
            }
        };
        Ok(())
    }

    /// Overwrites the current selection.
    pub fn select(&mut self, choice: usize) -> Result<()> {
        let progress = self.progress_mut()?;
        if progress.phase == Phase::Revealed {
            return Err(Error::Revealed);
        }
        if choice >= progress.question().options.len() {
            return Err(Error::InvalidChoice);
        }
        progress.selected = Some(choice);
        Ok(())
    }

    /// Freezes the selection and scores it. Returns whether it was correct.
    pub fn submit(&mut self) -> Result<bool> {
        let progress = self.progress_mut()?;
        if progress.phase == Phase::Revealed {
            return Err(Error::Revealed);
        }
        let choice = progress.selected.ok_or(Error::NoSelection)?;

        let question = &progress.quiz[progress.index];
        let picked = question.options[choice].clone();
        let correct = question.is_correct(&picked);

        progress.answers[progress.index] = picked;
        progress.score += usize::from(correct);
        progress.phase = Phase::Revealed;
        Ok(correct)
    }

    /// Moves to the next question, or finishes after the last one.
    pub fn next(&mut self) -> Result<()> {
        let progress = self.progress_mut()?;
        if progress.phase != Phase::Revealed {
            return Err(Error::NotRevealed);
        }

        if progress.position() < progress.total() {
            progress.index += 1;
            progress.selected = None;
            progress.phase = Phase::Answering;
            return Ok(());
        }

        let outcome = Outcome {
            score: progress.score,
            total: progress.quiz.len(),
            questions: mem::take(&mut progress.quiz),
            user_answers: mem::take(&mut progress.answers),
        };
        log::debug!("Quiz finished with {}/{}.", outcome.score, outcome.total);
        self.state = State::Finished(outcome);
        Ok(())
    }

    /// Re-issues the same request after a failure.
    pub fn retry(&mut self) -> Result<GenerationRequest> {
        if !matches!(self.state, State::Failed(_)) {
            return Err(Error::NotFailed);
        }
        self.state = State::Loading;
        Ok(self.request.clone())
    }

    /// Abandons the attempt so the player can pick a new topic.
    pub fn reset(self) {
        log::debug!("Abandoning quiz session about {:?}.", self.request.topic);
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            State::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Hands the finished attempt over to the results stage.
    pub fn into_outcome(self) -> Option<Outcome> {
        match self.state {
            State::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}
