use serde::{Deserialize, Serialize};

use crate::{error::BackendError, input::QuizRequest, question::Question};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum McqResponse {
    Failed { error: String },
    Questions(Vec<Question>),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct LinkBody<'a> {
    link: &'a str,
}

/// HTTP client for the quiz, notes and summary audio endpoints.
///
/// Every call is a single attempt: no retries and no timeout beyond the
/// `reqwest` defaults.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `POST /mcq`: a JSON array of questions, or an object with `error`
    pub async fn request_quiz(&self, request: &QuizRequest) -> Result<Vec<Question>, BackendError> {
        let url = self.endpoint("mcq");
        tracing::info!(%url, num = request.num, diff = %request.diff, "requesting quiz");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<McqResponse>(&body) {
            Ok(McqResponse::Failed { error }) => {
                tracing::warn!(%status, %error, "quiz request rejected");
                Err(BackendError::Server(error))
            }
            Ok(McqResponse::Questions(questions)) if questions.is_empty() => {
                tracing::warn!(%status, "quiz response had no questions");
                Err(BackendError::EmptyQuiz)
            }
            Ok(McqResponse::Questions(questions)) => {
                tracing::debug!(count = questions.len(), "quiz received");
                Ok(questions)
            }
            Err(err) if !status.is_success() => {
                tracing::warn!(%status, %err, "quiz request failed");
                Err(BackendError::Status(status))
            }
            Err(err) => {
                tracing::warn!(%err, "quiz response did not decode");
                Err(BackendError::Decode(err))
            }
        }
    }

    /// `POST /notes`: the PDF bytes
    pub async fn request_notes(&self, link: &str) -> Result<Vec<u8>, BackendError> {
        self.request_binary("notes", link).await
    }

    /// `POST /summary-audio`: the MP3 bytes
    pub async fn request_summary_audio(&self, link: &str) -> Result<Vec<u8>, BackendError> {
        self.request_binary("summary-audio", link).await
    }

    async fn request_binary(&self, path: &str, link: &str) -> Result<Vec<u8>, BackendError> {
        let url = self.endpoint(path);
        tracing::info!(%url, "requesting download");

        let response = self.http.post(&url).json(&LinkBody { link }).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let err = match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(ErrorBody { error }) => BackendError::Server(error),
                Err(_) => BackendError::Status(status),
            };
            tracing::warn!(%url, %status, %err, "download failed");
            return Err(err);
        }

        let bytes = response.bytes().await?;
        tracing::debug!(%url, len = bytes.len(), "download received");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.endpoint("mcq"), "http://localhost:8000/mcq");
        assert_eq!(
            client.endpoint("summary-audio"),
            "http://localhost:8000/summary-audio"
        );
    }

    #[test]
    fn mcq_error_object_wins_over_array_shape() {
        let parsed: McqResponse =
            serde_json::from_str(r#"{"error": "invalid link", "detail": 1}"#).unwrap();
        assert!(matches!(parsed, McqResponse::Failed { error } if error == "invalid link"));
    }

    #[test]
    fn mcq_array_parses_as_questions() {
        let parsed: McqResponse = serde_json::from_str(
            r#"[{"question": "q", "options": ["a", "b"], "answer": "a"}]"#,
        )
        .unwrap();
        assert!(matches!(parsed, McqResponse::Questions(qs) if qs.len() == 1));
    }

    #[test]
    fn link_body_shape() {
        assert_eq!(
            serde_json::to_value(LinkBody { link: "x" }).unwrap(),
            serde_json::json!({"link": "x"})
        );
    }
}
