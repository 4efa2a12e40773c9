mod openai;

pub use openai::OpenAi;

use core::{
    fmt::{self, Display},
    future::Future,
};
use hyper::StatusCode;

/// Instructions for a single chat completion.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub system: Box<str>,
    pub user: Box<str>,
    pub temperature: f32,
}

/// A hosted language model that turns a [`Prompt`] into free text.
pub trait Completion {
    fn complete(&self, prompt: &Prompt) -> impl Future<Output = Result<String, Error>> + Send;
}

#[derive(Debug)]
pub enum Error {
    /// The request could not be built.
    Request(hyper::http::Error),
    /// The connection failed before a reply was received.
    Transport(hyper_util::client::legacy::Error),
    /// The reply body was cut short.
    Body(hyper::Error),
    /// The API answered with a non-2xx status and, if it said so, why.
    Status(StatusCode, Option<Box<str>>),
    /// The reply was not the expected chat-completion schema.
    Schema(serde_json::Error),
    /// The reply carried no message content.
    NoContent,
}

impl From<hyper::http::Error> for Error {
    fn from(err: hyper::http::Error) -> Self {
        Self::Request(err)
    }
}

impl From<hyper_util::client::legacy::Error> for Error {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<hyper::Error> for Error {
    fn from(err: hyper::Error) -> Self {
        Self::Body(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Schema(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(err) => write!(f, "Invalid completion request: {err}"),
            Self::Transport(err) => write!(f, "Completion API is unreachable: {err}"),
            Self::Body(err) => write!(f, "Completion reply was interrupted: {err}"),
            Self::Status(status, Some(msg)) => write!(f, "{} {msg}", status.as_u16()),
            Self::Status(status, None) => write!(f, "Completion API responded with {status}"),
            Self::Schema(err) => write!(f, "Unexpected completion reply: {err}"),
            Self::NoContent => f.write_str("Completion reply has no content."),
        }
    }
}
