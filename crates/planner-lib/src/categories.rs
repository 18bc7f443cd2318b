//! Categorical lookup tables shared by every request
//!
//! Code values match the tables the models were trained against and are
//! fixed at compile time. Classification is lenient: unknown inputs never
//! fail, each policy documents its own default.

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// Lenient decode; unrecognized input takes the `Low` default.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "Medium" => Self::Medium,
            "High" => Self::High,
            _ => Self::Low,
        }
    }

    /// Feature code fed to the models.
    pub fn code(self) -> f32 {
        match self {
            Self::Low => 0.0,
            Self::Medium => 1.0,
            Self::High => 2.0,
        }
    }

    /// TDEE multiplier for this activity level.
    pub fn factor(self) -> f64 {
        match self {
            Self::Low => 1.2,
            Self::Medium => 1.55,
            Self::High => 1.725,
        }
    }
}

/// Stated goal for the plan. Wire spellings carry a space
/// ("Lose Weight", "Gain Weight").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainWeight,
}

impl Goal {
    /// Lenient decode; unrecognized input takes the `Maintain` default.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "Lose Weight" => Self::LoseWeight,
            "Gain Weight" => Self::GainWeight,
            _ => Self::Maintain,
        }
    }

    /// Feature code fed to the models.
    pub fn code(self) -> f32 {
        match self {
            Self::LoseWeight => 0.0,
            Self::Maintain => 1.0,
            Self::GainWeight => 2.0,
        }
    }
}

/// Feature code for gender: "Male" 0, "Female" 1, unknown 0.
///
/// The BMR equation applies its own, different default (anything but the
/// literal "Male" takes the female branch); the two policies are kept
/// separate on purpose. See `metabolics::bmr`.
pub fn gender_code(raw: &str) -> f32 {
    match raw {
        "Male" => 0.0,
        "Female" => 1.0,
        _ => 0.0,
    }
}
