use agemorph::export::ExportFormat;
use agemorph::prompt::TransformationParameters;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// `agemorph` - age, dress and relocate the person in a photo with Gemini.
#[derive(Parser, Debug)]
#[command(name = "agemorph")]
#[command(version)]
#[command(about = "Re-imagine a portrait at another age, in another job, somewhere else.", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ~/.agemorph/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform one image and save the result
    Transform {
        /// Source image (any image/* file)
        #[arg(short, long)]
        image: PathBuf,

        #[command(flatten)]
        params: ParamArgs,

        /// Download encoding (defaults to the configured export format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Directory for the result (defaults to export.output_dir, then the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the instruction that would be sent for these parameters
    Prompt {
        #[command(flatten)]
        params: ParamArgs,
    },

    /// List profession suggestions, optionally filtered
    Professions {
        /// Case-insensitive substring to match
        query: Option<String>,
    },

    /// Interactive session: pick an image, tweak, generate, save
    Studio,

    /// Show the effective configuration
    Config,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Target age; clamped to 1..=100
    #[arg(short, long, allow_negative_numbers = true)]
    pub age: Option<i64>,

    /// Attire to dress the subject in ("None" keeps current clothes)
    #[arg(short, long)]
    pub profession: Option<String>,

    /// Background description (empty preserves the original)
    #[arg(short, long)]
    pub background: Option<String>,
}

impl ParamArgs {
    /// Overlay the flags that were given onto `params`.
    pub fn apply(&self, params: &mut TransformationParameters) {
        if let Some(age) = self.age {
            params.set_age(age);
        }
        if let Some(profession) = &self.profession {
            params.profession.clone_from(profession);
        }
        if let Some(background) = &self.background {
            params.background.clone_from(background);
        }
    }
}
