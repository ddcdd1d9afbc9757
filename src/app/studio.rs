//! Interactive terminal session over one [`LifecycleController`].

use agemorph::config::Config;
use agemorph::export::{AdvisorySlot, ExportFormat, export_image};
use agemorph::media::load_image;
use agemorph::prompt::{NO_PROFESSION, PROFESSIONS, TransformationParameters};
use agemorph::session::{GenerateOutcome, LifecycleController, SessionState};
use anyhow::Result;
use console::style;
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};

use super::dispatch::build_controller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SelectImage,
    Age,
    Profession,
    Background,
    Generate,
    Save(ExportFormat),
    StartOver,
    Quit,
}

impl Action {
    fn label(self) -> String {
        match self {
            Self::SelectImage => t!("selectImage").to_string(),
            Self::Age => t!("targetAge").to_string(),
            Self::Profession => t!("professionLabel").to_string(),
            Self::Background => t!("backgroundLabel").to_string(),
            Self::Generate => t!("generateImage").to_string(),
            Self::Save(ExportFormat::Png) => t!("saveAsPNG").to_string(),
            Self::Save(ExportFormat::Jpeg) => t!("saveAsJPG").to_string(),
            Self::StartOver => t!("startOver").to_string(),
            Self::Quit => t!("studio.quit").to_string(),
        }
    }
}

/// Actions offered for the current state. Generate is withheld while a
/// request is in flight and until a source exists.
fn available_actions(state: &SessionState) -> Vec<Action> {
    let mut actions = vec![
        Action::SelectImage,
        Action::Age,
        Action::Profession,
        Action::Background,
    ];
    if state.source().is_some() && !state.is_in_flight() {
        actions.push(Action::Generate);
    }
    if state.result().is_some() {
        actions.push(Action::Save(ExportFormat::Png));
        actions.push(Action::Save(ExportFormat::Jpeg));
    }
    actions.push(Action::StartOver);
    actions.push(Action::Quit);
    actions
}

fn profession_label(profession: &str) -> String {
    if profession == NO_PROFESSION {
        t!("professionNone").to_string()
    } else {
        profession.to_string()
    }
}

fn render(state: &SessionState, params: &TransformationParameters, advisory: &mut AdvisorySlot) {
    println!();
    println!("{}", style(t!("title")).cyan().bold());
    let stage = match state {
        SessionState::Empty => t!("studio.stage_empty").to_string(),
        SessionState::SourceSelected { source } => {
            format!("{} ({} bytes)", t!("awaitingGeneration"), source.len())
        }
        SessionState::InFlight { .. } => t!("generating").to_string(),
        SessionState::Completed { result, .. } => {
            format!("{} ({}, {} bytes)", t!("generated"), result.mime_type(), result.len())
        }
        SessionState::Failed { error, .. } => style(&error.message).red().to_string(),
    };
    println!("  {stage}");
    println!(
        "  {} {} · {} {} · {} {}",
        style(t!("targetAge")).dim(),
        params.target_age(),
        style(t!("professionLabel")).dim(),
        profession_label(&params.profession),
        style(t!("backgroundLabel")).dim(),
        if params.background.is_empty() {
            "-"
        } else {
            params.background.as_str()
        }
    );
    if let Some(message) = advisory.current() {
        println!("  {}", style(message).yellow());
    }
}

fn prompt_profession(current: &str) -> Result<String> {
    let mut items: Vec<String> = PROFESSIONS.iter().map(|p| profession_label(p)).collect();
    items.push(t!("studio.other_profession").to_string());
    let default = PROFESSIONS.iter().position(|p| *p == current).unwrap_or(0);

    let choice = Select::new()
        .with_prompt(format!("  {}", t!("professionLabel")))
        .items(&items)
        .default(default)
        .interact()?;

    if let Some(profession) = PROFESSIONS.get(choice) {
        return Ok((*profession).to_string());
    }
    let custom: String = Input::new()
        .with_prompt(format!("  {}", t!("professionPlaceholder")))
        .interact_text()?;
    Ok(custom)
}

pub async fn run(config: Config) -> Result<()> {
    let controller = build_controller(&config)?;
    let output_dir = config
        .export
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let mut advisory = AdvisorySlot::default();

    loop {
        let state = controller.snapshot();
        render(&state, &controller.parameters(), &mut advisory);

        let actions = available_actions(&state);
        let labels: Vec<String> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt(format!("  {}", t!("studio.choose")))
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::SelectImage => select_image(&controller, &mut advisory).await?,
            Action::Age => {
                let age: i64 = Input::new()
                    .with_prompt(format!("  {} (1-100)", t!("targetAge")))
                    .default(i64::from(controller.parameters().target_age()))
                    .interact_text()?;
                controller.update_parameters(|p| p.set_age(age));
            }
            Action::Profession => {
                let profession = prompt_profession(&controller.parameters().profession)?;
                controller.update_parameters(|p| p.profession = profession);
            }
            Action::Background => {
                let background: String = Input::new()
                    .with_prompt(format!("  {}", t!("backgroundPlaceholder")))
                    .allow_empty(true)
                    .interact_text()?;
                controller.update_parameters(|p| p.background = background);
            }
            Action::Generate => generate(&controller, &mut advisory).await,
            Action::Save(format) => {
                save(&controller, format, &output_dir, &mut advisory).await;
            }
            Action::StartOver => {
                controller.reset(true);
                advisory.clear();
            }
            Action::Quit => return Ok(()),
        }
    }
}

async fn select_image(controller: &LifecycleController, advisory: &mut AdvisorySlot) -> Result<()> {
    let path: String = Input::new()
        .with_prompt(format!("  {}", t!("studio.image_path")))
        .interact_text()?;
    match load_image(Path::new(path.trim())).await {
        Ok(source) => controller.select_source(source),
        Err(e) => {
            tracing::warn!("rejected image source: {e}");
            advisory.post(t!("errorInvalidImage"));
        }
    }
    Ok(())
}

async fn generate(controller: &LifecycleController, advisory: &mut AdvisorySlot) {
    println!("  {} {}", style("…").cyan(), t!("generating"));
    match controller.generate().await {
        GenerateOutcome::NoSource => advisory.post(t!("errorSelectImage")),
        GenerateOutcome::Completed(_)
        | GenerateOutcome::Failed(_)
        | GenerateOutcome::AlreadyInFlight
        | GenerateOutcome::Superseded => {}
    }
}

async fn save(
    controller: &LifecycleController,
    format: ExportFormat,
    output_dir: &Path,
    advisory: &mut AdvisorySlot,
) {
    let Some(result) = controller.result() else {
        return;
    };
    let saved = match export_image(&result, format) {
        Ok(exported) => exported.save_to(output_dir).await,
        Err(e) => Err(e),
    };
    match saved {
        Ok(path) => println!(
            "  {} {}",
            style("✓").green().bold(),
            style(path.display()).green()
        ),
        Err(e) => {
            tracing::warn!("export failed: {e}");
            advisory.post(t!("studio.export_failed"));
        }
    }
}
