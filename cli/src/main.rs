mod generate;
mod prompts;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use nutrifit_core::types::{DEFAULT_CALORIES, DEFAULT_COOKING_TIME_MINUTES};
use nutrifit_core::{DietaryRestriction, GenerationSettings, RecipeRequest, SkillLevel};

#[derive(Parser)]
#[command(name = "nutrifit")]
#[command(about = "NutriFit CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered prompts without calling the model
    Prompts {
        #[command(flatten)]
        recipe: RecipeArgs,
    },
    /// Generate recipes and a nutrition analysis
    Generate {
        #[command(flatten)]
        recipe: RecipeArgs,
        /// Write the recipe.json bundle to this path
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Sampling temperature (defaults to NUTRIFIT_AI_TEMPERATURE)
        #[arg(long)]
        temperature: Option<f32>,
        /// Completion token cap (defaults to NUTRIFIT_AI_MAX_TOKENS)
        #[arg(long)]
        max_tokens: Option<u32>,
    },
}

/// The recipe form, as flags.
#[derive(Args, Debug, Clone)]
struct RecipeArgs {
    /// Ingredient to use (repeatable)
    #[arg(long = "ingredient", short = 'i', required = true)]
    ingredients: Vec<String>,
    /// Maximum calories per serving
    #[arg(long, default_value_t = DEFAULT_CALORIES)]
    max_calories: u32,
    /// Maximum total cooking time in minutes
    #[arg(long = "max-time", default_value_t = DEFAULT_COOKING_TIME_MINUTES)]
    max_cooking_time: u32,
    /// Beginner, Intermediate or Advanced
    #[arg(long = "skill", default_value_t = SkillLevel::default())]
    skill_level: SkillLevel,
    /// Dietary restriction (repeatable), e.g. Vegan or Gluten-Free
    #[arg(long = "restriction")]
    restrictions: Vec<DietaryRestriction>,
}

impl RecipeArgs {
    fn into_request(self) -> RecipeRequest {
        RecipeRequest::new(self.ingredients)
            .with_max_calories(self.max_calories)
            .with_max_cooking_time(self.max_cooking_time)
            .with_skill_level(self.skill_level)
            .with_dietary_restrictions(self.restrictions)
    }
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Prompts { recipe } => {
            prompts::print_prompts(&recipe.into_request())?;
        }
        Commands::Generate {
            recipe,
            output,
            temperature,
            max_tokens,
        } => {
            let settings = GenerationSettings {
                temperature,
                max_tokens,
            };
            generate::generate(&recipe.into_request(), settings, output.as_deref()).await?;
        }
    }

    Ok(())
}
