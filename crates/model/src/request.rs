use alloc::{boxed::Box, string::String};
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/// Topic used when the player leaves the field blank.
pub const DEFAULT_TOPIC: &str = "general knowledge";

/// Difficulty used when the request names none.
pub const DEFAULT_DIFFICULTY: &str = "medium";

/// Free-form difficulty label. It is passed to the prompt exactly as given,
/// so `"Hard"` and `"expert"` are as valid as `"easy"`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Difficulty(String);

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY.into())
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Difficulty {
    fn from(label: &str) -> Self {
        Self(label.into())
    }
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/quiz`. Both fields may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

/// A [`GenerationRequest`] with all defaults applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    pub topic: Box<str>,
    pub difficulty: Difficulty,
}

/// Trims the topic and substitutes [`DEFAULT_TOPIC`] when nothing is left.
pub fn normalize_topic(topic: &str) -> &str {
    match topic.trim() {
        "" => DEFAULT_TOPIC,
        trimmed => trimmed,
    }
}

impl GenerationRequest {
    pub fn new(topic: &str, difficulty: Difficulty) -> Self {
        Self { topic: Some(normalize_topic(topic).into()), difficulty: Some(difficulty) }
    }

    pub fn normalize(&self) -> Normalized {
        let topic = normalize_topic(self.topic.as_deref().unwrap_or_default());
        Normalized { topic: topic.into(), difficulty: self.difficulty.clone().unwrap_or_default() }
    }
}
