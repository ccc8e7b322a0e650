use std::{fmt, str::FromStr};

use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("activity factor {0} is not one of the supported levels")]
    InvalidActivityLevel(f64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(format!("Invalid sex \"{}\", expected male or female", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(format!(
                "Invalid unit system \"{}\", expected metric or imperial",
                s
            )),
        }
    }
}

/// Exercise frequency, carried on the wire as its BMR multiplier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light (1–3 days/week)",
            ActivityLevel::Moderate => "Moderate (3–5 days/week)",
            ActivityLevel::Active => "Active (6–7 days/week)",
            ActivityLevel::VeryActive => "Very Active (twice daily or physical job)",
        }
    }
}

impl From<ActivityLevel> for f64 {
    fn from(level: ActivityLevel) -> Self {
        level.factor()
    }
}

impl TryFrom<f64> for ActivityLevel {
    type Error = ValidationError;

    fn try_from(factor: f64) -> Result<Self, Self::Error> {
        ActivityLevel::iter()
            .find(|level| level.factor() == factor)
            .ok_or(ValidationError::InvalidActivityLevel(factor))
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.factor())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid activity factor \"{}\"", s))
            .and_then(|factor| ActivityLevel::try_from(factor).map_err(|e| e.to_string()))
    }
}

/// Request body accepted by the calculation endpoint, before validation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CalculationRequest {
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    pub sex: Sex,
    pub activity_factor: f64,
    pub unit_system: UnitSystem,
}

/// Validated biometrics. Weight and height are in the units of `unit_system`.
#[derive(Clone, Debug, PartialEq)]
pub struct BiometricInput {
    age: u32,
    weight: f64,
    height: f64,
    sex: Sex,
    activity: ActivityLevel,
    unit_system: UnitSystem,
}

impl BiometricInput {
    pub fn new(
        age: u32,
        weight: f64,
        height: f64,
        sex: Sex,
        activity: ActivityLevel,
        unit_system: UnitSystem,
    ) -> Result<Self, ValidationError> {
        if age == 0 {
            return Err(ValidationError::InvalidInput(
                "age must be a positive number of years".to_owned(),
            ));
        }
        check_positive("weight", weight)?;
        check_positive("height", height)?;

        Ok(Self {
            age,
            weight,
            height,
            sex,
            activity,
            unit_system,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn activity(&self) -> ActivityLevel {
        self.activity
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

impl TryFrom<CalculationRequest> for BiometricInput {
    type Error = ValidationError;

    fn try_from(request: CalculationRequest) -> Result<Self, Self::Error> {
        check_positive("age", request.age)?;
        if request.age.fract() != 0.0 || request.age > u32::MAX as f64 {
            return Err(ValidationError::InvalidInput(format!(
                "age must be a whole number of years, got {}",
                request.age
            )));
        }
        let activity = ActivityLevel::try_from(request.activity_factor)?;

        BiometricInput::new(
            request.age as u32,
            request.weight,
            request.height,
            request.sex,
            activity,
            request.unit_system,
        )
    }
}

impl From<&BiometricInput> for CalculationRequest {
    fn from(input: &BiometricInput) -> Self {
        Self {
            age: input.age as f64,
            weight: input.weight,
            height: input.height,
            sex: input.sex,
            activity_factor: input.activity.factor(),
            unit_system: input.unit_system,
        }
    }
}
