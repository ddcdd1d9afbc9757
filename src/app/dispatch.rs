use crate::cli::commands::{Cli, Commands, ParamArgs};
use agemorph::config::Config;
use agemorph::export::{ExportFormat, export_image};
use agemorph::llm::GeminiTransformer;
use agemorph::media::load_image;
use agemorph::prompt::{build_instruction, suggest};
use agemorph::session::{GenerateOutcome, LifecycleController};
use anyhow::{Result, bail};
use console::style;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::status::render_status;
use super::studio;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Transform {
            image,
            params,
            format,
            output,
        } => run_transform(&config, &image, &params, format, output).await,

        Commands::Prompt { params } => {
            let mut parameters = config.defaults.parameters()?;
            params.apply(&mut parameters);
            println!("{}", build_instruction(&parameters));
            Ok(())
        }

        Commands::Professions { query } => {
            for profession in suggest(query.as_deref().unwrap_or_default()) {
                println!("{profession}");
            }
            Ok(())
        }

        Commands::Studio => studio::run(config).await,

        Commands::Config => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}

/// Resolve where exports go: flag, then config, then the working directory.
fn output_dir(config: &Config, flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| config.export.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub(super) fn build_controller(config: &Config) -> Result<LifecycleController> {
    let transformer = GeminiTransformer::from_config(config);
    if !transformer.has_api_key() {
        bail!("{}", t!("errorMissingApiKey"));
    }
    Ok(LifecycleController::new(
        Arc::new(transformer),
        config.defaults.parameters()?,
    ))
}

async fn run_transform(
    config: &Config,
    image: &Path,
    params: &ParamArgs,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let source = match load_image(image).await {
        Ok(source) => source,
        Err(e) => bail!("{}: {e}", t!("errorInvalidImage")),
    };

    let controller = build_controller(config)?;
    controller.update_parameters(|p| params.apply(p));
    controller.select_source(source);

    println!("{} {}", style("…").cyan(), t!("generating"));
    let result = match controller.generate().await {
        GenerateOutcome::Completed(result) => result,
        GenerateOutcome::Failed(err) => bail!("{err}"),
        other => bail!("generation did not run: {other:?}"),
    };

    let format = format.unwrap_or(config.export.format);
    let exported = export_image(&result, format)?;
    let path = exported.save_to(&output_dir(config, output)).await?;
    info!(format = %format, "saved transformed image");
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        t!("saveImage"),
        style(path.display()).green()
    );
    Ok(())
}
