use core::fmt::{self, Display};
use hyper::StatusCode;

#[derive(Debug)]
pub enum Error {
    /// The server answered with a non-2xx status.
    Status(StatusCode),
    /// The server answered, but without any questions.
    Empty,
    /// The server could not be reached or hung up mid-reply.
    Network,
    /// The reply was not a quiz.
    Malformed,
}

impl From<hyper_util::client::legacy::Error> for Error {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        log::error!("Quiz server is unreachable: {err}");
        Self::Network
    }
}

impl From<hyper::Error> for Error {
    fn from(err: hyper::Error) -> Self {
        log::error!("Quiz reply was interrupted: {err}");
        Self::Network
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        log::error!("Quiz reply is malformed: {err}");
        Self::Malformed
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "Server error: {}", status.as_u16()),
            Self::Empty => f.write_str("No questions received from server"),
            Self::Network | Self::Malformed => f.write_str("Failed to load quiz questions"),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
