//! Agent personas that condition the model for each pipeline step.

use serde::{Deserialize, Serialize};

/// A named role/goal/backstory bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPersona {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl AgentPersona {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// Chef persona that writes the recipes.
    pub fn recipe_creator() -> Self {
        Self::new(
            "Recipe Creator",
            "Design low calorie and high protein recipes using the ingredients from the \
             ingredients list that taste good",
            "Former overweight individual turned nutritionist and expert chef, now helping \
             clients shed pounds while building muscle",
        )
    }

    /// Nutritionist persona that analyses the recipes.
    pub fn nutrition_expert() -> Self {
        Self::new(
            "Nutrition Expert",
            "Analyze recipe nutrition",
            "Certified nutritionist with recipe analysis expertise",
        )
    }
}

/// Render the system message that puts the model into `persona`.
pub fn render_persona_system_prompt(persona: &AgentPersona, expected_output: &str) -> String {
    format!(
        r#"You are {role}. {backstory}

Your personal goal is: {goal}

When you answer, produce: {expected_output}"#,
        role = persona.role,
        backstory = persona.backstory,
        goal = persona.goal,
        expected_output = expected_output
    )
}
