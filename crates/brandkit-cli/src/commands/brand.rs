//! Handlers that read or edit the stored brand configuration.

use std::path::Path;

use anyhow::anyhow;
use brandkit_config::{
    AssetsPatch, BrandValue, BrandValuePatch, ColorValue, ColorsPatch, MetadataPatch, SpacingPatch,
    StrategyPatch, TypographyPatch, check_contrast, validate_imported_json,
};
use brandkit_store::ImportOutcome;
use serde::de::DeserializeOwned;

use crate::cli::{ContrastArgs, OutputFormat, PatchArgs, PatchSection, ValueCommand};
use crate::context::{AppContext, CliError, CliResult, read_input};
use crate::output::{render_configuration, render_contrast, render_findings, render_validation};

pub(crate) fn handle_show(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let config = ctx.current()?;
    render_configuration(config.as_ref(), format)
}

pub(crate) async fn handle_validate(file: &Path, format: OutputFormat) -> CliResult<()> {
    let input = read_input(file).await?;
    let result = validate_imported_json(&input);
    render_validation(&result, format)?;
    if result.valid {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{} rejected with {} issue(s)",
            file.display(),
            result.errors.len()
        )))
    }
}

pub(crate) async fn handle_import(ctx: &AppContext, file: &Path) -> CliResult<()> {
    match ctx.store.import_file(file).await {
        ImportOutcome::Imported => {
            ctx.persist().await?;
            println!("imported {}", file.display());
            Ok(())
        }
        ImportOutcome::Rejected(result) => {
            render_validation(&result, OutputFormat::Table)?;
            Err(CliError::validation(format!(
                "{} rejected: {}",
                file.display(),
                result.summary()
            )))
        }
        ImportOutcome::Superseded => Err(CliError::failure(anyhow!(
            "import of {} was superseded",
            file.display()
        ))),
        ImportOutcome::Failed { error } => Err(CliError::failure(anyhow!(error))),
    }
}

pub(crate) async fn handle_export(ctx: &AppContext, out: Option<&Path>) -> CliResult<()> {
    match out {
        Some(path) => {
            let written = ctx.store.export_to_file(path).await?;
            println!("exported to {}", written.display());
        }
        None => println!("{}", ctx.store.export_brand()?),
    }
    Ok(())
}

pub(crate) async fn handle_reset(ctx: &AppContext) -> CliResult<()> {
    ctx.store.reset();
    ctx.persist().await?;
    println!("brand configuration reset to defaults");
    Ok(())
}

pub(crate) async fn handle_patch(ctx: &AppContext, args: &PatchArgs) -> CliResult<()> {
    let input = read_input(&args.file).await?;
    match args.section {
        PatchSection::Colors => ctx.store.update_colors(&parse_patch::<ColorsPatch>(&input)?),
        PatchSection::Typography => {
            ctx.store
                .update_typography(&parse_patch::<TypographyPatch>(&input)?);
        }
        PatchSection::Spacing => ctx.store.update_spacing(&parse_patch::<SpacingPatch>(&input)?),
        PatchSection::Assets => ctx.store.update_assets(&parse_patch::<AssetsPatch>(&input)?),
        PatchSection::Metadata => {
            ctx.store
                .update_metadata(&parse_patch::<MetadataPatch>(&input)?);
        }
        PatchSection::Strategy => {
            ctx.store
                .update_strategy(&parse_patch::<StrategyPatch>(&input)?);
        }
    }
    ctx.persist().await?;
    println!("{} updated", section_label(args.section));
    Ok(())
}

pub(crate) async fn handle_value(ctx: &AppContext, command: ValueCommand) -> CliResult<()> {
    match command {
        ValueCommand::Add(args) => {
            let value = BrandValue::new(args.label, args.description);
            let id = value.id.clone();
            if !ctx.store.add_value(value) {
                return Err(CliError::validation(format!("brand value '{id}' already exists")));
            }
            ctx.persist().await?;
            println!("{id}");
        }
        ValueCommand::Remove(args) => {
            if !ctx.store.remove_value(&args.id) {
                return Err(unknown_value(&args.id));
            }
            ctx.persist().await?;
            println!("removed {}", args.id);
        }
        ValueCommand::Update(args) => {
            if args.label.is_none() && args.description.is_none() {
                return Err(CliError::validation(
                    "provide --label and/or --description to update a brand value",
                ));
            }
            let patch = BrandValuePatch {
                label: args.label,
                description: args.description,
            };
            if !ctx.store.update_value(&args.id, &patch) {
                return Err(unknown_value(&args.id));
            }
            ctx.persist().await?;
            println!("updated {}", args.id);
        }
    }
    Ok(())
}

pub(crate) fn handle_contrast(args: &ContrastArgs, format: OutputFormat) -> CliResult<()> {
    let foreground = ColorValue::new(args.foreground.as_str());
    let background = ColorValue::new(args.background.as_str());
    let report = check_contrast(&foreground, &background)
        .map_err(|err| CliError::validation(err.to_string()))?;
    render_contrast(&report, format)
}

pub(crate) fn handle_audit(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    render_findings(&ctx.store.audit_contrast(), format)
}

fn parse_patch<T: DeserializeOwned>(input: &str) -> CliResult<T> {
    serde_json::from_str(input)
        .map_err(|err| CliError::validation(format!("invalid patch document: {err}")))
}

fn unknown_value(id: &str) -> CliError {
    CliError::validation(format!("no brand value with id '{id}'"))
}

const fn section_label(section: PatchSection) -> &'static str {
    match section {
        PatchSection::Colors => "colors",
        PatchSection::Typography => "typography",
        PatchSection::Spacing => "spacing",
        PatchSection::Assets => "assets",
        PatchSection::Metadata => "metadata",
        PatchSection::Strategy => "strategy",
    }
}
