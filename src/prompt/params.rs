use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 100;
pub const DEFAULT_AGE: u8 = 30;

/// Sentinel profession meaning "keep the current clothes".
pub const NO_PROFESSION: &str = "None";

/// User-editable controls that drive instruction composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationParameters {
    target_age: u8,
    pub profession: String,
    pub background: String,
}

impl Default for TransformationParameters {
    fn default() -> Self {
        Self {
            target_age: DEFAULT_AGE,
            profession: NO_PROFESSION.to_string(),
            background: String::new(),
        }
    }
}

impl TransformationParameters {
    pub fn new(
        target_age: u8,
        profession: impl Into<String>,
        background: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        validate_age(target_age)?;
        Ok(Self {
            target_age,
            profession: profession.into(),
            background: background.into(),
        })
    }

    #[must_use]
    pub fn target_age(&self) -> u8 {
        self.target_age
    }

    /// Slider semantics: values outside [1, 100] snap to the nearest bound.
    pub fn set_age(&mut self, age: i64) {
        let clamped = age.clamp(i64::from(MIN_AGE), i64::from(MAX_AGE));
        self.target_age = u8::try_from(clamped).unwrap_or(DEFAULT_AGE);
    }

    /// True when an attire clause applies: non-blank and not the `None` sentinel.
    #[must_use]
    pub fn has_profession(&self) -> bool {
        !self.profession.eq_ignore_ascii_case(NO_PROFESSION) && !self.profession.trim().is_empty()
    }

    #[must_use]
    pub fn has_background(&self) -> bool {
        !self.background.trim().is_empty()
    }
}

pub fn validate_age(age: u8) -> Result<(), ConfigError> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "target age {age} is outside {MIN_AGE}..={MAX_AGE}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_controls() {
        let params = TransformationParameters::default();
        assert_eq!(params.target_age(), 30);
        assert_eq!(params.profession, "None");
        assert_eq!(params.background, "");
        assert!(!params.has_profession());
        assert!(!params.has_background());
    }

    #[test]
    fn new_rejects_out_of_range_age() {
        assert!(TransformationParameters::new(0, "Doctor", "").is_err());
        assert!(TransformationParameters::new(101, "Doctor", "").is_err());
        assert!(TransformationParameters::new(1, "Doctor", "").is_ok());
        assert!(TransformationParameters::new(100, "Doctor", "").is_ok());
    }

    #[test]
    fn set_age_clamps_to_slider_bounds() {
        let mut params = TransformationParameters::default();
        params.set_age(-5);
        assert_eq!(params.target_age(), 1);
        params.set_age(250);
        assert_eq!(params.target_age(), 100);
        params.set_age(45);
        assert_eq!(params.target_age(), 45);
    }

    #[test]
    fn none_sentinel_is_case_insensitive() {
        for profession in ["None", "none", "NONE", "nOnE", "", "   ", "\t"] {
            let params = TransformationParameters::new(30, profession, "").unwrap();
            assert!(!params.has_profession(), "{profession:?} should not count");
        }
        let params = TransformationParameters::new(30, "Chef", "").unwrap();
        assert!(params.has_profession());
    }
}
