pub mod fields;

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use futures::lock::Mutex;
use kcal_client::Client;
use kcal_model::{
    biometrics::{ActivityLevel, Sex, UnitSystem, ValidationError},
    estimate::CalorieEstimate,
};
use log::{debug, error, info};
use tokio::time;

pub use crate::fields::{Field, FormFields};

/// Length of the flip animation played before the form is cleared.
pub const RESET_TRANSITION: Duration = Duration::from_millis(800);

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("{0} is not a number")]
    InvalidNumber(Field),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("could not get an estimate: {0}")]
    Estimate(#[from] kcal_client::Error),
    #[error("superseded by a newer request")]
    Superseded,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum View {
    Input,
    Result(CalorieEstimate),
}

struct State {
    fields: FormFields,
    view: View,
}

impl Default for State {
    fn default() -> Self {
        Self {
            fields: FormFields::default(),
            view: View::Input,
        }
    }
}

/// Collects biometrics and shows the estimate returned by the calculation
/// service.
///
/// Each `submit` and `reset` takes a fresh request token. Only the holder of
/// the latest token may change the view, so a slow response can never
/// overwrite the outcome of a newer operation.
pub struct Form {
    client: Box<dyn Client>,
    state: Mutex<State>,
    token: AtomicU64,
    reset_delay: Duration,
}

impl Form {
    pub fn new(client: Box<dyn Client>) -> Self {
        Self::with_reset_delay(client, RESET_TRANSITION)
    }

    pub fn with_reset_delay(client: Box<dyn Client>, reset_delay: Duration) -> Self {
        Self {
            client,
            state: Mutex::new(State::default()),
            token: AtomicU64::new(0),
            reset_delay,
        }
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.state.get_mut().fields.age = age.into();
    }

    pub fn set_weight(&mut self, weight: impl Into<String>) {
        self.state.get_mut().fields.weight = weight.into();
    }

    pub fn set_height(&mut self, height: impl Into<String>) {
        self.state.get_mut().fields.height = height.into();
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.state.get_mut().fields.sex = sex;
    }

    pub fn set_unit_system(&mut self, unit_system: UnitSystem) {
        self.state.get_mut().fields.unit_system = unit_system;
    }

    pub fn set_activity(&mut self, activity: ActivityLevel) {
        self.state.get_mut().fields.activity = activity;
    }

    pub async fn fields(&self) -> FormFields {
        self.state.lock().await.fields.clone()
    }

    pub async fn view(&self) -> View {
        self.state.lock().await.view
    }

    fn next_token(&self) -> u64 {
        self.token.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.token.load(Ordering::SeqCst) == token
    }

    pub async fn submit(&self) -> Result<CalorieEstimate, SubmitError> {
        let input = self.state.lock().await.fields.to_input().map_err(|e| {
            debug!("Submission blocked: {}", e);
            e
        })?;

        let token = self.next_token();
        info!(
            "Requesting estimate #{} ({}, {}, activity {})",
            token,
            input.unit_system(),
            input.sex(),
            input.activity()
        );
        let result = self.client.estimate(&input).await;

        let mut state = self.state.lock().await;
        if !self.is_current(token) {
            match &result {
                Ok(_) => debug!("Discarding response to superseded request #{}", token),
                Err(e) => error!("Superseded request #{} failed: {}", token, e),
            }
            return Err(SubmitError::Superseded);
        }

        match result {
            Ok(estimate) => {
                info!("Estimated {} kcal/day", estimate.total_calories);
                state.view = View::Result(estimate);
                Ok(estimate)
            }
            Err(e) => {
                error!("Failed to get estimate: {}", e);
                Err(e.into())
            }
        }
    }

    /// Clears the form once the transition has played. Any request still in
    /// flight is discarded. A submission started during the transition takes
    /// over, and the form is left as that submission leaves it.
    pub async fn reset(&self) {
        let token = self.next_token();
        debug!("Resetting form (token #{})", token);
        time::sleep(self.reset_delay).await;

        let mut state = self.state.lock().await;
        if !self.is_current(token) {
            debug!("Reset #{} superseded by a newer submission", token);
            return;
        }
        *state = State::default();
        info!("Form reset");
    }
}
