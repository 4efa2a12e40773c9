#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod quiz;
pub mod request;
pub mod response;

pub use quiz::{Question, Quiz, QUESTION_COUNT};
pub use request::{Difficulty, GenerationRequest, Normalized, DEFAULT_DIFFICULTY, DEFAULT_TOPIC};
