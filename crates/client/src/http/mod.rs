mod dto;

use async_trait::async_trait;
use exam_core::model::{AnswerSheet, ProblemSetId, Question};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::env;

use crate::collaborators::{
    ApiError, AuthSession, CatalogSource, GradingSink, QuestionSource, ScoreboardSource,
    SectionOverview, Standing, SubmitReceipt,
};
use dto::{
    question_from_dto, section_from_dto, sheet_payload, standing_from_dto, Envelope,
    QuestionDto, SectionDto, StandingDto, SubmitResponseDto,
};

/// Header the API expects the session token under.
const AUTH_HEADER: &str = "Auth-Bearer-Token";

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth: Option<AuthSession>,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth: Option<AuthSession>) -> Self {
        Self {
            base_url: base_url.into(),
            auth,
        }
    }

    /// Reads `QUZUU_API_URL` and `QUZUU_AUTH_TOKEN`. Returns `None` when no
    /// API url is configured, which selects the embedded sample backend.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_vars(
            env::var("QUZUU_API_URL").ok(),
            env::var("QUZUU_AUTH_TOKEN").ok(),
        )
    }

    fn from_vars(base_url: Option<String>, token: Option<String>) -> Option<Self> {
        let base_url = base_url.filter(|url| !url.trim().is_empty())?;
        let auth = token.filter(|t| !t.trim().is_empty()).map(AuthSession::new);
        Some(Self { base_url, auth })
    }
}

//
// ─── HTTP BACKEND ──────────────────────────────────────────────────────────────
//

/// REST adapter for the remote exam service.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth {
            Some(session) => request.header(AUTH_HEADER, session.token()),
            None => request,
        }
    }

    async fn get_enveloped<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.client.get(self.endpoint(path)));
        let response = request.send().await.map_err(transport)?;
        let envelope: Envelope<T> = decode_checked(response).await?;
        envelope.into_data()
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Connection(e.to_string())
    }
}

/// Maps error statuses before decoding the body.
async fn decode_checked<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => return Err(ApiError::NotFound),
        status if !status.is_success() => return Err(ApiError::Status(status.as_u16())),
        _ => {}
    }
    response.json::<T>().await.map_err(transport)
}

#[async_trait]
impl QuestionSource for HttpBackend {
    async fn fetch_questions(
        &self,
        problem_set: ProblemSetId,
    ) -> Result<Vec<Question>, ApiError> {
        tracing::debug!(%problem_set, "fetching question set");
        let dtos: Vec<QuestionDto> = self
            .get_enveloped(&format!("questions/{problem_set}"))
            .await?;
        dtos.into_iter().map(question_from_dto).collect()
    }
}

#[async_trait]
impl GradingSink for HttpBackend {
    async fn submit_answers(
        &self,
        problem_set: ProblemSetId,
        sheet: &AnswerSheet,
    ) -> Result<SubmitReceipt, ApiError> {
        let request = self
            .authorize(
                self.client
                    .post(self.endpoint(&format!("submit-answers/{problem_set}"))),
            )
            .json(&sheet_payload(sheet));

        let response = request.send().await.map_err(transport)?;
        let body: SubmitResponseDto = decode_checked(response).await?;
        let receipt = body.into_receipt();
        if let Err(err) = &receipt {
            tracing::warn!(%problem_set, %err, "submission rejected");
        }
        receipt
    }
}

#[async_trait]
impl CatalogSource for HttpBackend {
    async fn list_sections(&self) -> Result<Vec<SectionOverview>, ApiError> {
        let dtos: Vec<SectionDto> = self.get_enveloped("problemset-list").await?;
        Ok(dtos.into_iter().map(section_from_dto).collect())
    }
}

#[async_trait]
impl ScoreboardSource for HttpBackend {
    async fn standings(&self, problem_set: ProblemSetId) -> Result<Vec<Standing>, ApiError> {
        let dtos: Vec<StandingDto> = self
            .get_enveloped(&format!("scoreboard/{problem_set}"))
            .await?;
        Ok(dtos.into_iter().map(standing_from_dto).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_requires_a_non_empty_api_url() {
        assert!(ApiConfig::from_vars(None, Some("tok".into())).is_none());
        assert!(ApiConfig::from_vars(Some("   ".into()), None).is_none());
    }

    #[test]
    fn config_picks_up_url_and_optional_token() {
        let config = ApiConfig::from_vars(Some("https://api.example".into()), Some("tok".into()))
            .expect("configured");
        assert_eq!(config.base_url, "https://api.example");
        assert_eq!(config.auth.expect("auth").token(), "tok");

        let bare = ApiConfig::from_vars(Some("https://api.example".into()), Some("".into()))
            .expect("configured");
        assert!(bare.auth.is_none());
    }
}
