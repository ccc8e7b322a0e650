//! Daily calorie estimation with the Mifflin-St Jeor equation.
//!
//! BMR = 10 × weight_kg + 6.25 × height_cm − 5 × age + s, where s is +5 for
//! men and −161 for women. The daily estimate is BMR scaled by the activity
//! factor. Results are rounded to the nearest 0.1 kcal.

use crate::biometrics::{BiometricInput, Sex, UnitSystem, ValidationError};

pub const KG_PER_LB: f64 = 0.453592;
pub const CM_PER_IN: f64 = 2.54;

const WEIGHT_COEFFICIENT: f64 = 10.0;
const HEIGHT_COEFFICIENT: f64 = 6.25;
const AGE_COEFFICIENT: f64 = -5.0;
const MALE_CONSTANT: f64 = 5.0;
const FEMALE_CONSTANT: f64 = -161.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CalorieEstimate {
    /// Estimated daily energy expenditure, kcal/day.
    pub total_calories: f64,
    /// Basal metabolic rate, kcal/day. Not every server reports it.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub bmr: Option<f64>,
}

/// Converts weight and height to kilograms and centimeters.
pub fn to_metric(weight: f64, height: f64, unit_system: UnitSystem) -> (f64, f64) {
    match unit_system {
        UnitSystem::Metric => (weight, height),
        UnitSystem::Imperial => (weight * KG_PER_LB, height * CM_PER_IN),
    }
}

/// Unrounded Mifflin-St Jeor BMR.
pub fn basal_metabolic_rate(input: &BiometricInput) -> f64 {
    let (weight_kg, height_cm) = to_metric(input.weight(), input.height(), input.unit_system());
    let sex_constant = match input.sex() {
        Sex::Male => MALE_CONSTANT,
        Sex::Female => FEMALE_CONSTANT,
    };

    WEIGHT_COEFFICIENT * weight_kg
        + HEIGHT_COEFFICIENT * height_cm
        + AGE_COEFFICIENT * input.age() as f64
        + sex_constant
}

/// Fails when the inputs are too large for the result to be representable.
pub fn estimate(input: &BiometricInput) -> Result<CalorieEstimate, ValidationError> {
    let bmr = basal_metabolic_rate(input);
    let total_calories = round_kcal(bmr * input.activity().factor());
    let bmr = round_kcal(bmr);

    if !total_calories.is_finite() || !bmr.is_finite() {
        return Err(ValidationError::InvalidInput(
            "weight and height are too large to produce an estimate".to_owned(),
        ));
    }

    Ok(CalorieEstimate {
        total_calories,
        bmr: Some(bmr),
    })
}

fn round_kcal(kcal: f64) -> f64 {
    (kcal * 10.0).round() / 10.0
}
