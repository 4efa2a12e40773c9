use crate::{
    completion::{Completion, Prompt},
    error::{Error, Result},
    parse,
};
use model::{GenerationRequest, Normalized, Question, QUESTION_COUNT};
use serde::Deserialize;
use serde_json::Value;

/// Balances variety between quizzes against sticking to the requested format.
const TEMPERATURE: f32 = 0.7;

impl Prompt {
    pub fn for_quiz(topic: &str, difficulty: &str) -> Self {
        let system = format!(
            "Generate exactly {QUESTION_COUNT} quiz questions about {topic} with {difficulty} difficulty. \
             Return only a JSON array of {QUESTION_COUNT} objects where each object has: \
             question (string), options (array of 4 strings), \
             answer (string - exactly one of the options), and explanation (string)."
        );
        let user = format!("Create {QUESTION_COUNT} quiz questions about {topic} with {difficulty} difficulty level.");
        Self { system: system.into_boxed_str(), user: user.into_boxed_str(), temperature: TEMPERATURE }
    }
}

/// Asks the completion API for a quiz and leniently parses its reply.
pub async fn generate<C: Completion>(completion: &C, request: &GenerationRequest) -> Result<Vec<Value>> {
    let Normalized { topic, difficulty } = request.normalize();
    let prompt = Prompt::for_quiz(&topic, difficulty.as_str());

    let reply = completion.complete(&prompt).await.map_err(|err| {
        log::error!("Completion API call failed for topic {topic:?}: {err}");
        Error::Upstream(err.to_string().into_boxed_str())
    })?;

    let questions = parse::questions(&reply)?;

    let malformed = questions
        .iter()
        .filter(|value| !Question::deserialize(*value).is_ok_and(|question| question.is_well_formed()))
        .count();
    if malformed > 0 {
        log::warn!("{malformed} of {} generated questions about {topic:?} are malformed.", questions.len());
    }

    log::info!("Generated {} {difficulty} questions about {topic:?}.", questions.len());
    Ok(questions)
}
