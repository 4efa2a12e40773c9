mod error;

pub use error::{Error, Result};

use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{HeaderValue, CONTENT_TYPE},
    http::uri::InvalidUri,
    Request, Uri,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use model::{response::QuizResponse, GenerationRequest, Question, Quiz};

/// Requests quizzes from a quiz server.
#[derive(Clone)]
pub struct Fetcher {
    http: Client<HttpConnector, Full<Bytes>>,
    endpoint: Uri,
}

impl Fetcher {
    /// `base` is the server origin, such as `http://localhost:5000`.
    pub fn new(base: &str) -> core::result::Result<Self, InvalidUri> {
        let endpoint = format!("{}/api/quiz", base.trim_end_matches('/')).parse()?;
        let http = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { http, endpoint })
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<Quiz> {
        let body = serde_json::to_vec(request)?;
        let req = Request::post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Full::new(Bytes::from(body)))
            .map_err(|_| Error::Malformed)?;

        let res = self.http.request(req).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let bytes = res.into_body().collect().await?.to_bytes();
        let QuizResponse { questions } = serde_json::from_slice::<QuizResponse<Question>>(&bytes)?;
        if questions.is_empty() {
            return Err(Error::Empty);
        }

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Fetcher};
    use hyper::StatusCode;

    #[test]
    fn builds_endpoint_from_base() {
        let fetcher = Fetcher::new("http://localhost:5000/").unwrap();
        assert_eq!(fetcher.endpoint, "http://localhost:5000/api/quiz");
        let fetcher = Fetcher::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(fetcher.endpoint, "http://127.0.0.1:8080/api/quiz");
    }

    #[test]
    fn rejects_invalid_base() {
        assert!(Fetcher::new("http://exa mple.com").is_err());
    }

    #[test]
    fn messages_match_quiz_screen() {
        assert_eq!(Error::Status(StatusCode::INTERNAL_SERVER_ERROR).to_string(), "Server error: 500");
        assert_eq!(Error::Empty.to_string(), "No questions received from server");
        assert_eq!(Error::Network.to_string(), "Failed to load quiz questions");
    }
}
