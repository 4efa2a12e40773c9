use core::fmt::{self, Display};
use hyper::StatusCode;

#[derive(Debug)]
pub enum Error {
    /// No route matches the requested path.
    NotFound,
    /// The path exists but does not accept this method.
    MethodNotAllowed,
    /// The request body could not be read or decoded.
    BadRequest(Box<str>),
    /// The completion API failed or rejected the call.
    Upstream(Box<str>),
    /// Neither the full reply nor any bracketed span of it is a JSON array.
    Parse,
    /// The reply parsed, but held no questions.
    Empty,
    Fatal,
}

impl Error {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Parse | Self::Empty | Self::Fatal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed summary placed in the `error` field of the reply body.
    pub const fn summary(&self) -> Option<&'static str> {
        match self {
            Self::NotFound | Self::MethodNotAllowed => None,
            Self::BadRequest(_) => Some("Invalid quiz request"),
            Self::Upstream(_) | Self::Parse | Self::Empty | Self::Fatal => Some("Failed to generate quiz questions"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "Resource not found.",
            Self::MethodNotAllowed => "Method not allowed.",
            Self::BadRequest(msg) | Self::Upstream(msg) => msg,
            Self::Parse => "Could not parse quiz questions from the completion response.",
            Self::Empty => "No questions received from the completion API.",
            Self::Fatal => "The quiz reply could not be encoded.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
