//! Health, fitness and nutrition tools for the healthmate assistant.
//!
//! ```rust
//! use hfitness::{FitnessConfig, fitness_registry};
//!
//! let registry = fitness_registry(FitnessConfig::new("sk-test")).expect("tools should register");
//! assert!(registry.contains("calculate_bmr"));
//! assert!(registry.contains("get_meal_plan"));
//! assert_eq!(registry.len(), 8);
//! ```

pub mod calculators;
mod config;
mod error;
mod lookups;

use htooling::ToolRegistry;

pub use calculators::register_calculators;
pub use config::{
    DEFAULT_FITBIT_BASE_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_MEAL_PLAN_URL,
    DEFAULT_MODEL, DEFAULT_NUTRITION_URL, FitnessConfig,
};
pub use error::FitnessError;
pub use lookups::{FitnessClient, register_lookups};

pub const SYSTEM_PROMPT: &str = "\
This AI Assistant is a sophisticated software system powered by advanced language models.

Specializing in health, fitness, and nutrition tasks, the Assistant offers calculations for \
health metrics like Basal Metabolic Rate (BMR) and Total Daily Energy Expenditure (TDEE) using \
established equations. It can also retrieve nutritional information for various food items via \
external APIs.

The Assistant engages in meaningful conversations about health and nutrition, providing helpful \
responses and critical health metric values. This allows users to gain a better understanding of \
their energy expenditure and nutritional intake.

Continuously evolving, the Assistant improves its ability to provide accurate and informative \
responses. It processes large amounts of text, generates human-like responses, and offers \
detailed explanations about complex health metrics.

Whether you need to understand your daily energy expenditure, calculate your BMR, or obtain \
nutritional information about your meals, this Assistant is here to help. The primary goal is to \
promote a healthier lifestyle by making nutritional and metabolic information more accessible.";

/// Registers the calculators followed by the HTTP lookups.
pub fn register_fitness_tools(
    registry: &mut ToolRegistry,
    config: FitnessConfig,
) -> Result<(), FitnessError> {
    register_calculators(registry)?;
    register_lookups(registry, FitnessClient::new(config)?)?;
    Ok(())
}

pub fn fitness_registry(config: FitnessConfig) -> Result<ToolRegistry, FitnessError> {
    let mut registry = ToolRegistry::new();
    register_fitness_tools(&mut registry, config)?;
    Ok(registry)
}

pub mod prelude {
    pub use crate::{
        FitnessClient, FitnessConfig, FitnessError, SYSTEM_PROMPT, fitness_registry,
        register_fitness_tools,
    };
}
