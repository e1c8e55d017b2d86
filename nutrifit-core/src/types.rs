use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_CALORIES: u32 = 100;
pub const MAX_CALORIES: u32 = 2000;
pub const DEFAULT_CALORIES: u32 = 500;
pub const CALORIES_STEP: u32 = 50;

pub const MIN_COOKING_TIME_MINUTES: u32 = 15;
pub const MAX_COOKING_TIME_MINUTES: u32 = 120;
pub const DEFAULT_COOKING_TIME_MINUTES: u32 = 30;
pub const COOKING_TIME_STEP_MINUTES: u32 = 15;

/// File name offered for the downloadable result bundle.
pub const BUNDLE_FILE_NAME: &str = "recipe.json";

/// Cooking skill level of the person making the recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: &'static [SkillLevel] = &[
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownSkillLevel(s.to_string()))
    }
}

/// The fixed set of dietary restrictions the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
    #[serde(rename = "Dairy-Free")]
    DairyFree,
    Keto,
    Paleo,
}

impl DietaryRestriction {
    pub const ALL: &'static [DietaryRestriction] = &[
        DietaryRestriction::Vegetarian,
        DietaryRestriction::Vegan,
        DietaryRestriction::GlutenFree,
        DietaryRestriction::DairyFree,
        DietaryRestriction::Keto,
        DietaryRestriction::Paleo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "Vegetarian",
            DietaryRestriction::Vegan => "Vegan",
            DietaryRestriction::GlutenFree => "Gluten-Free",
            DietaryRestriction::DairyFree => "Dairy-Free",
            DietaryRestriction::Keto => "Keto",
            DietaryRestriction::Paleo => "Paleo",
        }
    }
}

impl fmt::Display for DietaryRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryRestriction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownDietaryRestriction(s.to_string()))
    }
}

/// Split multi-line free text into ingredients, one per non-blank line.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Everything the pipeline needs to know about one recipe submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    pub max_calories: u32,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub max_cooking_time_minutes: u32,
    #[serde(default)]
    pub skill_level: SkillLevel,
}

impl RecipeRequest {
    /// Create a request with the form's default limits.
    pub fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            max_calories: DEFAULT_CALORIES,
            dietary_restrictions: Vec::new(),
            max_cooking_time_minutes: DEFAULT_COOKING_TIME_MINUTES,
            skill_level: SkillLevel::default(),
        }
    }

    pub fn with_max_calories(mut self, max_calories: u32) -> Self {
        self.max_calories = max_calories;
        self
    }

    pub fn with_max_cooking_time(mut self, minutes: u32) -> Self {
        self.max_cooking_time_minutes = minutes;
        self
    }

    pub fn with_skill_level(mut self, skill_level: SkillLevel) -> Self {
        self.skill_level = skill_level;
        self
    }

    /// Set the restrictions, dropping repeats but keeping first-seen order.
    pub fn with_dietary_restrictions(
        mut self,
        restrictions: impl IntoIterator<Item = DietaryRestriction>,
    ) -> Self {
        self.dietary_restrictions.clear();
        for restriction in restrictions {
            if !self.dietary_restrictions.contains(&restriction) {
                self.dietary_restrictions.push(restriction);
            }
        }
        self
    }

    /// Check the request against the form's bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ingredients.iter().all(|i| i.trim().is_empty()) {
            return Err(ValidationError::EmptyIngredients);
        }

        if !(MIN_CALORIES..=MAX_CALORIES).contains(&self.max_calories) {
            return Err(ValidationError::CaloriesOutOfRange {
                value: self.max_calories,
                min: MIN_CALORIES,
                max: MAX_CALORIES,
            });
        }

        if !(MIN_COOKING_TIME_MINUTES..=MAX_COOKING_TIME_MINUTES)
            .contains(&self.max_cooking_time_minutes)
        {
            return Err(ValidationError::CookingTimeOutOfRange {
                value: self.max_cooking_time_minutes,
                min: MIN_COOKING_TIME_MINUTES,
                max: MAX_COOKING_TIME_MINUTES,
            });
        }

        Ok(())
    }
}

/// The two text blobs produced by one pipeline run.
///
/// Serializes to the download bundle `{"recipe": ..., "nutrition": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecipeResult {
    pub recipe: String,
    pub nutrition: String,
}

impl RecipeResult {
    /// Pretty-printed JSON document offered as `recipe.json`.
    pub fn to_bundle_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
