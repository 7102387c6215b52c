//! Closed-form health metric calculators.
//!
//! ```rust
//! use hfitness::calculators::{ActivityLevel, calculate_bmi, calculate_tdee};
//!
//! assert_eq!(calculate_bmi(70.0, 175.0), 22.86);
//! assert_eq!(calculate_tdee(1500.0, ActivityLevel::from_name("sedentary")), 1800.0);
//! ```

use htooling::{
    SchemaError, ToolError, ToolRegistry, required_f64, required_i64, required_string,
    tool_signature,
};
use serde_json::json;

/// Approximate energy stored in one kilogram of body fat.
pub const CALORIES_PER_KG_FAT: f64 = 7700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Result<Self, ToolError> {
        match value.trim().to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(ToolError::invalid_arguments(
                "Invalid gender. Expected 'male' or 'female'.",
            )),
        }
    }

    /// Anything other than "male" selects the female coefficients.
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::Female)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmrEquation {
    #[default]
    MifflinStJeor,
    HarrisBenedict,
}

impl BmrEquation {
    /// Unrecognized names select Harris-Benedict.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("mifflin_st_jeor") {
            Self::MifflinStJeor
        } else {
            Self::HarrisBenedict
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    SuperActive,
    Unknown,
}

impl ActivityLevel {
    pub fn from_name(name: &str) -> Self {
        match name {
            "sedentary" => Self::Sedentary,
            "lightly_active" => Self::LightlyActive,
            "moderately_active" => Self::ModeratelyActive,
            "very_active" => Self::VeryActive,
            "super_active" => Self::SuperActive,
            _ => Self::Unknown,
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::SuperActive => 1.9,
            Self::Unknown => 1.0,
        }
    }
}

/// Body Mass Index from kilograms and centimetres, rounded to two decimals.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: i64,
    gender: Gender,
    equation: BmrEquation,
) -> f64 {
    let age = age_years as f64;
    match (equation, gender) {
        (BmrEquation::MifflinStJeor, Gender::Male) => {
            10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + 5.0
        }
        (BmrEquation::MifflinStJeor, Gender::Female) => {
            10.0 * weight_kg + 6.25 * height_cm - 5.0 * age - 161.0
        }
        (BmrEquation::HarrisBenedict, Gender::Male) => {
            88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age
        }
        (BmrEquation::HarrisBenedict, Gender::Female) => {
            447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age
        }
    }
}

pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.factor()
}

/// Ideal body weight in kilograms for a height given in inches.
pub fn calculate_ibw(height_in: f64, gender: Gender) -> f64 {
    let base = match gender {
        Gender::Male => 50.0,
        Gender::Female => 45.5,
    };

    if height_in <= 60.0 {
        base
    } else {
        base + 2.3 * (height_in - 60.0)
    }
}

pub fn calculate_calories_to_lose_weight(desired_weight_loss_kg: f64) -> f64 {
    desired_weight_loss_kg * CALORIES_PER_KG_FAT
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Registers every calculator as a synchronous tool.
pub fn register_calculators(registry: &mut ToolRegistry) -> Result<(), SchemaError> {
    registry.register_sync_fn(
        tool_signature! {
            /// Calculate the Body Mass Index (BMI) for a person.
            ///
            /// :param weight: The weight of the person in kg
            /// :param height: The height of the person in cm
            fn calculate_bmi(weight: f64, height: f64)
        },
        |args, _ctx| {
            let bmi = calculate_bmi(required_f64(&args, "weight")?, required_f64(&args, "height")?);
            Ok(json!(bmi))
        },
    )?;

    registry.register_sync_fn(
        tool_signature! {
            /// Calculate the Basal Metabolic Rate (BMR) for a person.
            ///
            /// :param weight: The weight of the person in kg.
            /// :param height: The height of the person in cm.
            /// :param age: The age of the person in years.
            /// :param gender: The gender of the person ('male' or 'female')
            /// :param equation: The equation to use for BMR calculation ('harris_benedict' or 'mifflin_st_jeor')
            fn calculate_bmr(
                weight: f64,
                height: f64,
                age: i64,
                gender: String,
                equation: String = "mifflin_st_jeor",
            )
        },
        |args, _ctx| {
            let equation = match args.get("equation").and_then(|value| value.as_str()) {
                Some(name) => BmrEquation::from_name(name),
                None => BmrEquation::default(),
            };
            let bmr = calculate_bmr(
                required_f64(&args, "weight")?,
                required_f64(&args, "height")?,
                required_i64(&args, "age")?,
                Gender::parse_lenient(&required_string(&args, "gender")?),
                equation,
            );
            Ok(json!(bmr))
        },
    )?;

    registry.register_sync_fn(
        tool_signature! {
            /// Calculate the Total Daily Energy Expenditure (TDEE) for a person.
            ///
            /// :param bmr: The BMR of the person
            /// :param activity_level: The activity level of the person ('sedentary', 'lightly_active', 'moderately_active', 'very_active', 'super_active')
            fn calculate_tdee(bmr: f64, activity_level: String)
        },
        |args, _ctx| {
            let level = ActivityLevel::from_name(&required_string(&args, "activity_level")?);
            Ok(json!(calculate_tdee(required_f64(&args, "bmr")?, level)))
        },
    )?;

    registry.register_sync_fn(
        tool_signature! {
            /// Calculate the Ideal Body Weight (IBW).
            ///
            /// :param height: The height of the person in inches
            /// :param gender: The gender of the person ("male" or "female")
            fn calculate_ibw(height: f64, gender: String)
        },
        |args, _ctx| {
            let gender = Gender::parse(&required_string(&args, "gender")?)?;
            Ok(json!(calculate_ibw(required_f64(&args, "height")?, gender)))
        },
    )?;

    registry.register_sync_fn(
        tool_signature! {
            /// Calculate the number of calories required to lose a certain amount of weight.
            ///
            /// :param desired_weight_loss_kg: The amount of weight the person wants to lose, in kilograms
            fn calculate_calories_to_lose_weight(desired_weight_loss_kg: f64)
        },
        |args, _ctx| {
            let kg = required_f64(&args, "desired_weight_loss_kg")?;
            Ok(json!(calculate_calories_to_lose_weight(kg)))
        },
    )?;

    Ok(())
}
