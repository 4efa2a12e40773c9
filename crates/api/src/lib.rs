pub mod completion;
pub mod error;
pub mod generate;

mod parse;

use completion::Completion;
use core::fmt::Display;
use error::Error;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::{Body, Bytes},
    header::{
        HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        CONTENT_TYPE,
    },
    Method, Request, Response, StatusCode,
};
use model::{
    response::{ErrorResponse, HealthStatus, QuizResponse, StatusMessage},
    GenerationRequest,
};
use serde::Serialize;

pub type Reply = Response<Full<Bytes>>;

const APPLICATION_JSON: &str = "application/json";

fn empty(status: StatusCode) -> Reply {
    let mut res = Response::new(Full::default());
    *res.status_mut() = status;
    res
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> error::Result<Reply> {
    let bytes = serde_json::to_vec(value).map_err(|_| Error::Fatal)?;
    let mut res = Response::new(Full::new(Bytes::from(bytes)));
    *res.status_mut() = status;
    assert!(res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)).is_none());
    Ok(res)
}

impl Error {
    fn into_reply(self) -> Reply {
        let status = self.status();
        let Some(summary) = self.summary() else {
            return empty(status);
        };
        let body = ErrorResponse { error: summary.into(), message: self.to_string() };
        json(status, &body).unwrap_or_else(|_| empty(status))
    }
}

/// Permits any origin to call every route.
fn preflight() -> Reply {
    let mut res = empty(StatusCode::NO_CONTENT);
    let head = res.headers_mut();
    assert!(head.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, POST, OPTIONS")).is_none());
    assert!(head.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type")).is_none());
    res
}

fn health() -> error::Result<Reply> {
    use chrono::{SecondsFormat, Utc};
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    json(StatusCode::OK, &HealthStatus { status: "OK".into(), timestamp })
}

/// Stateless request handler shared by every connection.
pub struct Service<C> {
    completion: C,
}

impl<C: Completion> Service<C> {
    pub const fn new(completion: C) -> Self {
        Self { completion }
    }

    pub async fn on_request<B>(&self, req: Request<B>) -> Reply
    where
        B: Body,
        B::Error: Display,
    {
        let method = req.method().clone();
        let mut res = match self.try_respond(req).await {
            Ok(res) => res,
            Err(err) => {
                log::warn!("{method} request failed with {}: {err}", err.status());
                err.into_reply()
            }
        };

        let head = res.headers_mut();
        assert!(head.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")).is_none());
        res
    }

    async fn try_respond<B>(&self, req: Request<B>) -> error::Result<Reply>
    where
        B: Body,
        B::Error: Display,
    {
        let (parts, body) = req.into_parts();
        match (&parts.method, parts.uri.path()) {
            (&Method::OPTIONS, _) => Ok(preflight()),
            (&Method::GET, "/") => json(StatusCode::OK, &StatusMessage { message: "Server is running!".into() }),
            (&Method::GET, "/api/health") => health(),
            (&Method::POST, "/api/quiz") => self.on_quiz(body).await,
            (_, "/" | "/api/health" | "/api/quiz") => Err(Error::MethodNotAllowed),
            _ => Err(Error::NotFound),
        }
    }

    async fn on_quiz<B>(&self, body: B) -> error::Result<Reply>
    where
        B: Body,
        B::Error: Display,
    {
        let bytes = body.collect().await.map_err(|err| Error::BadRequest(err.to_string().into_boxed_str()))?.to_bytes();

        // An absent body means every default applies.
        let request: GenerationRequest = if bytes.is_empty() {
            GenerationRequest::default()
        } else {
            serde_json::from_slice(&bytes).map_err(|err| Error::BadRequest(err.to_string().into_boxed_str()))?
        };

        let questions = generate::generate(&self.completion, &request).await?;
        json(StatusCode::OK, &QuizResponse { questions })
    }
}

#[cfg(test)]
mod tests {
    use super::{Reply, Service};
    use crate::generate::tests::{Canned, FIVE_QUESTIONS};
    use http_body_util::{BodyExt, Full};
    use hyper::{body::Bytes, Method, Request, StatusCode};
    use model::response::{ErrorResponse, HealthStatus, QuizResponse, StatusMessage};
    use serde::de::DeserializeOwned;

    fn request(method: Method, path: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder().method(method).uri(path).body(Full::new(Bytes::from_static(body.as_bytes()))).unwrap()
    }

    async fn decode<T: DeserializeOwned>(res: Reply) -> T {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn greets_on_root() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        let res = service.on_request(request(Method::GET, "/", "")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        let body: StatusMessage = decode(res).await;
        assert_eq!(body.message, "Server is running!");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn reports_health_with_timestamp() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        let res = service.on_request(request(Method::GET, "/api/health", "")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/json");
        let HealthStatus { status, timestamp } = decode(res).await;
        assert_eq!(status, "OK");
        assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn generates_quiz() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        let res = service.on_request(request(Method::POST, "/api/quiz", r#"{"topic":"Astronomy","difficulty":"medium"}"#)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: QuizResponse<serde_json::Value> = decode(res).await;
        assert_eq!(body.questions.len(), 5);
        assert_eq!(body.questions[4]["answer"], "Jupiter");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn empty_body_uses_defaults() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        let res = service.on_request(request(Method::POST, "/api/quiz", "")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let prompts = service.completion.prompts.lock().unwrap();
        assert!(prompts[0].system.contains("about general knowledge with medium difficulty"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn parse_failure_is_internal_error() {
        let service = Service::new(Canned::ok("Sorry, I cannot produce a quiz about that."));
        let res = service.on_request(request(Method::POST, "/api/quiz", r#"{"topic":"Astronomy"}"#)).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let ErrorResponse { error, message } = decode(res).await;
        assert_eq!(error, "Failed to generate quiz questions");
        assert_eq!(message, "Could not parse quiz questions from the completion response.");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn upstream_failure_is_internal_error() {
        let service = Service::new(Canned::failing(StatusCode::UNAUTHORIZED));
        let res = service.on_request(request(Method::POST, "/api/quiz", "{}")).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let ErrorResponse { message, .. } = decode(res).await;
        assert_eq!(message, "401 Incorrect API key provided");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejects_malformed_bodies() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        for body in ["{", "topic=Astronomy", "42"] {
            let res = service.on_request(request(Method::POST, "/api/quiz", body)).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
            let ErrorResponse { error, .. } = decode(res).await;
            assert_eq!(error, "Invalid quiz request");
        }
        assert!(service.completion.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn passes_difficulty_label_verbatim() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        for label in ["Hard", "expert"] {
            let body = format!(r#"{{"topic":"Astronomy","difficulty":"{label}"}}"#);
            let req = Request::post("/api/quiz").body(Full::new(Bytes::from(body))).unwrap();
            let res = service.on_request(req).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        let prompts = service.completion.prompts.lock().unwrap();
        assert!(prompts[0].system.contains("about Astronomy with Hard difficulty"));
        assert!(prompts[1].user.contains("about Astronomy with expert difficulty level"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn answers_preflight() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        let res = service.on_request(request(Method::OPTIONS, "/api/quiz", "")).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(res.headers()["access-control-allow-methods"], "GET, POST, OPTIONS");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unknown_routes_and_methods() {
        let service = Service::new(Canned::ok(FIVE_QUESTIONS));
        let res = service.on_request(request(Method::GET, "/api/quizzes", "")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let res = service.on_request(request(Method::GET, "/api/quiz", "")).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(service.completion.prompts.lock().unwrap().is_empty());
    }
}
