use super::{Completion, Error, Prompt};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Request, Uri,
};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAi {
    http: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    endpoint: Uri,
    /// Pre-rendered `Bearer` credential.
    auth: HeaderValue,
    model: Box<str>,
}

impl OpenAi {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.openai.com/v1/chat/completions";
    pub const DEFAULT_MODEL: &'static str = "gpt-3.5-turbo";

    pub fn new(key: &str, model: Box<str>, endpoint: Uri) -> Result<Self, InvalidHeaderValue> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {key}"))?;
        auth.set_sensitive(true);

        let connector =
            hyper_rustls::HttpsConnectorBuilder::new().with_webpki_roots().https_or_http().enable_http1().build();
        let http = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self { http, endpoint, auth, model })
    }
}

impl Completion for OpenAi {
    async fn complete(&self, prompt: &Prompt) -> Result<String, Error> {
        let payload = ChatRequest {
            model: &self.model,
            messages: [
                Message { role: "system", content: &prompt.system },
                Message { role: "user", content: &prompt.user },
            ],
            temperature: prompt.temperature,
        };
        let body = serde_json::to_vec(&payload)?;

        let req = Request::post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, self.auth.clone())
            .body(Full::new(Bytes::from(body)))?;

        let res = self.http.request(req).await?;
        let status = res.status();
        let bytes = res.into_body().collect().await?.to_bytes();

        if !status.is_success() {
            let reason = serde_json::from_slice::<ApiErrorBody>(&bytes).ok().map(|body| body.error.message.into_boxed_str());
            return Err(Error::Status(status, reason));
        }

        let ChatResponse { choices } = serde_json::from_slice(&bytes)?;
        choices.into_iter().next().and_then(|choice| choice.message.content).ok_or(Error::NoContent)
    }
}
