use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// First `[` up to the *last* `]` in the text.
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[\s\S]*\]").expect("valid bracket pattern"));

/// Leniently extracts the question array from a completion reply.
///
/// The full reply is first parsed as a JSON array. Failing that, the first
/// bracketed span (greedy to the last closing bracket) is parsed instead.
/// Elements are returned exactly as they appear; their shape is not checked.
pub fn questions(reply: &str) -> Result<Vec<Value>> {
    let questions = match serde_json::from_str::<Vec<Value>>(reply) {
        Ok(questions) => questions,
        Err(err) => {
            log::warn!("Completion reply is not a bare JSON array ({err}). Searching for a bracketed span.");
            let span = BRACKETED.find(reply).ok_or(Error::Parse)?;
            serde_json::from_str(span.as_str()).map_err(|err| {
                log::error!("Bracketed span of the completion reply is not a JSON array: {err}");
                Error::Parse
            })?
        }
    };

    if questions.is_empty() {
        return Err(Error::Empty);
    }

    Ok(questions)
}
