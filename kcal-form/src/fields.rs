use std::fmt;

use kcal_model::biometrics::{
    ActivityLevel, BiometricInput, CalculationRequest, Sex, UnitSystem,
};

use crate::SubmitError;

/// Numeric fields the user types in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Age,
    Weight,
    Height,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Age => write!(f, "age"),
            Field::Weight => write!(f, "weight"),
            Field::Height => write!(f, "height"),
        }
    }
}

/// Current contents of the form. `Default` is the blank form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub age: String,
    pub weight: String,
    pub height: String,
    pub sex: Sex,
    pub unit_system: UnitSystem,
    pub activity: ActivityLevel,
}

impl FormFields {
    pub fn age_prompt(&self) -> String {
        "Age (years)".to_owned()
    }

    pub fn weight_prompt(&self) -> String {
        format!("Weight ({})", self.unit_system.weight_unit())
    }

    pub fn height_prompt(&self) -> String {
        format!("Height ({})", self.unit_system.height_unit())
    }

    /// Builds the validated input, or explains which field stops submission.
    pub fn to_input(&self) -> Result<BiometricInput, SubmitError> {
        let age = required(Field::Age, &self.age)?;
        let weight = required(Field::Weight, &self.weight)?;
        let height = required(Field::Height, &self.height)?;

        let request = CalculationRequest {
            age: number(Field::Age, age)?,
            weight: number(Field::Weight, weight)?,
            height: number(Field::Height, height)?,
            sex: self.sex,
            activity_factor: self.activity.factor(),
            unit_system: self.unit_system,
        };

        Ok(BiometricInput::try_from(request)?)
    }
}

fn required(field: Field, text: &str) -> Result<&str, SubmitError> {
    let text = text.trim();
    if text.is_empty() {
        Err(SubmitError::MissingField(field))
    } else {
        Ok(text)
    }
}

fn number(field: Field, text: &str) -> Result<f64, SubmitError> {
    text.parse().map_err(|_| SubmitError::InvalidNumber(field))
}

#[cfg(test)]
mod tests {
    use kcal_model::biometrics::ValidationError;

    use super::*;

    fn filled(age: &str, weight: &str, height: &str) -> FormFields {
        FormFields {
            age: age.to_owned(),
            weight: weight.to_owned(),
            height: height.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn default_is_blank_metric_male_sedentary() {
        let fields = FormFields::default();

        assert_eq!(fields.age, "");
        assert_eq!(fields.weight, "");
        assert_eq!(fields.height, "");
        assert_eq!(fields.sex, Sex::Male);
        assert_eq!(fields.unit_system, UnitSystem::Metric);
        assert_eq!(fields.activity, ActivityLevel::Sedentary);
    }

    #[test]
    fn prompts_follow_unit_system() {
        let mut fields = FormFields::default();
        assert_eq!(fields.weight_prompt(), "Weight (kg)");
        assert_eq!(fields.height_prompt(), "Height (cm)");

        fields.unit_system = UnitSystem::Imperial;
        assert_eq!(fields.weight_prompt(), "Weight (lb)");
        assert_eq!(fields.height_prompt(), "Height (in)");
    }

    #[test]
    fn blank_fields_are_missing() {
        let test_data = [
            (filled("", "80", "180"), Field::Age),
            (filled("30", "", "180"), Field::Weight),
            (filled("30", "80", "  "), Field::Height),
            (filled("", "", ""), Field::Age),
            (filled("abc", "80", ""), Field::Height),
        ];

        for (i, (fields, expected)) in test_data.into_iter().enumerate() {
            match fields.to_input() {
                Err(SubmitError::MissingField(field)) => {
                    assert_eq!(field, expected, "Test case #{}", i)
                }
                other => panic!("Test case #{}: unexpected {:?}", i, other),
            }
        }
    }

    #[test]
    fn unparseable_fields_are_invalid_numbers() {
        let test_data = [
            (filled("thirty", "80", "180"), Field::Age),
            (filled("30", "80kg", "180"), Field::Weight),
            (filled("30", "80", "1,80"), Field::Height),
        ];

        for (i, (fields, expected)) in test_data.into_iter().enumerate() {
            match fields.to_input() {
                Err(SubmitError::InvalidNumber(field)) => {
                    assert_eq!(field, expected, "Test case #{}", i)
                }
                other => panic!("Test case #{}: unexpected {:?}", i, other),
            }
        }
    }

    #[test]
    fn out_of_range_numbers_fail_validation() {
        for fields in [
            filled("0", "80", "180"),
            filled("30.5", "80", "180"),
            filled("30", "-80", "180"),
            filled("30", "80", "0"),
        ] {
            assert!(matches!(
                fields.to_input(),
                Err(SubmitError::Invalid(ValidationError::InvalidInput(_)))
            ));
        }
    }

    #[test]
    fn complete_form_converts() {
        let mut fields = filled(" 40 ", "176.37", "70.87");
        fields.sex = Sex::Female;
        fields.unit_system = UnitSystem::Imperial;
        fields.activity = ActivityLevel::Light;

        let input = fields.to_input().unwrap();

        assert_eq!(input.age(), 40);
        assert_eq!(input.weight(), 176.37);
        assert_eq!(input.height(), 70.87);
        assert_eq!(input.sex(), Sex::Female);
        assert_eq!(input.unit_system(), UnitSystem::Imperial);
        assert_eq!(input.activity(), ActivityLevel::Light);
    }
}
