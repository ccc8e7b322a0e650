use async_trait::async_trait;
use kcal_model::{
    api::{ActivityLevelInfo, ErrorKind, ErrorResponse},
    biometrics::{ActivityLevel, BiometricInput, CalculationRequest},
    estimate::CalorieEstimate,
};
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
    #[error("rejected by server: {0}")]
    InvalidInput(String),
    #[error("rejected by server: {0}")]
    InvalidActivityLevel(String),
}

impl From<ErrorResponse> for Error {
    fn from(response: ErrorResponse) -> Self {
        match response.error {
            ErrorKind::InvalidInput => Error::InvalidInput(response.message),
            ErrorKind::InvalidActivityLevel => Error::InvalidActivityLevel(response.message),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn estimate(&self, input: &BiometricInput) -> Result<CalorieEstimate>;
    async fn activity_levels(&self) -> Result<Vec<ActivityLevel>>;
}

pub struct ClientImpl {
    url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    pub fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

pub fn create(url: String) -> impl Client {
    ClientImpl::new(url)
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status == StatusCode::BAD_REQUEST {
        Err(resp
            .json::<ErrorResponse>()
            .await
            .map_err(|_| Error::RequestError)?
            .into())
    } else if status.is_client_error() {
        Err(Error::RequestError)
    } else if status.is_server_error() {
        Err(Error::InternalServerError)
    } else {
        Ok(resp)
    }
}

#[async_trait]
impl Client for ClientImpl {
    async fn estimate(&self, input: &BiometricInput) -> Result<CalorieEstimate> {
        let resp = self
            .client
            .post(self.endpoint("/api/calculate"))
            .json(&CalculationRequest::from(input))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)?;

        check_status(resp)
            .await?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }

    async fn activity_levels(&self) -> Result<Vec<ActivityLevel>> {
        let resp = self
            .client
            .get(self.endpoint("/api/activity-levels"))
            .send()
            .await
            .map_err(|_| Error::CommunicationError)?;

        check_status(resp)
            .await?
            .json::<Vec<ActivityLevelInfo>>()
            .await
            .map_err(|_| Error::ResponseError)?
            .into_iter()
            .map(|info| {
                ActivityLevel::try_from(info.activity_factor).map_err(|_| Error::ResponseError)
            })
            .collect()
    }
}
