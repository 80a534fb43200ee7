//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use brandkit_config::{BrandConfiguration, ContrastFinding, ContrastReport, ValidationResult};
use brandkit_fonts::{FontDescriptor, FontPairing};
use brandkit_theme::ApplyReport;
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn render_configuration(
    config: &BrandConfiguration,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Table => {
            let metadata = &config.metadata;
            println!("name: {}", metadata.name);
            if !metadata.tagline.is_empty() {
                println!("tagline: {}", metadata.tagline);
            }
            println!("created: {}", metadata.created_at);
            println!("updated: {}", metadata.updated_at);
            let typography = &config.typography;
            println!(
                "fonts: heading {} / body {} / mono {}",
                typography.heading.name, typography.body.name, typography.mono.name
            );
            let chart = config
                .colors
                .chart
                .iter()
                .map(|color| color.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("chart: {chart}");
            if let Some(logo) = &config.assets.logo {
                println!("logo: {} (dark: {})", logo.light, logo.dark);
            }
            if let Some(strategy) = &config.strategy {
                if let Some(mission) = &strategy.mission {
                    println!("mission: {mission}");
                }
                for value in &strategy.values {
                    println!("value: {:<36} {}", value.id, value.label);
                }
                if !strategy.tone_of_voice.traits.is_empty() {
                    println!("tone: {}", strategy.tone_of_voice.traits.join(", "));
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn render_validation(result: &ValidationResult, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(result)?,
        OutputFormat::Table => {
            if result.valid {
                println!("valid");
            } else {
                println!("{:<22} {:<28} MESSAGE", "CODE", "FIELD");
                for issue in &result.errors {
                    println!("{:<22} {:<28} {}", issue.code, issue.field, issue.message);
                }
            }
        }
    }
    Ok(())
}

pub(crate) fn render_contrast(report: &ContrastReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            println!("ratio: {}", format_ratio(report.ratio));
            println!("level: {}", level_label(report));
        }
    }
    Ok(())
}

pub(crate) fn render_findings(findings: &[ContrastFinding], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(findings)?,
        OutputFormat::Table => {
            if findings.is_empty() {
                println!("all text pairs meet AA-normal");
                return Ok(());
            }
            println!(
                "{:<6} {:<12} {:<24} {:>8} LEVEL",
                "THEME", "BACKGROUND", "FOREGROUND", "RATIO"
            );
            for finding in findings {
                println!(
                    "{:<6} {:<12} {:<24} {:>8} {}",
                    finding.variant,
                    finding.background,
                    finding.foreground,
                    format_ratio(finding.report.ratio),
                    level_label(&finding.report)
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_fonts(fonts: &[&FontDescriptor], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(fonts)?,
        OutputFormat::Table => {
            println!("{:<22} {:<12} {:<7} WEIGHTS", "NAME", "CATEGORY", "ITALIC");
            for font in fonts {
                println!(
                    "{:<22} {:<12} {:<7} {}",
                    font.name,
                    font.category.as_str(),
                    if font.has_italic() { "yes" } else { "no" },
                    format_weights(font.weights)
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_pairings(pairings: &[FontPairing], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(pairings)?,
        OutputFormat::Table => {
            println!("{:<18} {:<16} DESCRIPTION", "HEADING", "BODY");
            for pairing in pairings {
                println!(
                    "{:<18} {:<16} {}",
                    pairing.heading, pairing.body, pairing.description
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn render_stylesheet(
    imports: &[String],
    css: &str,
    report: &ApplyReport,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "imports": imports,
            "css": css,
            "report": report,
        }))?,
        OutputFormat::Table => {
            for href in imports {
                println!("@import url(\"{}\");", css_string(href));
            }
            for failure in &report.font_errors {
                println!("/* font not loaded: {} */", comment_text(failure));
            }
            for name in &report.failed_variables {
                println!("/* variable rejected: {} */", comment_text(name));
            }
            print!("{css}");
        }
    }
    Ok(())
}

/// Body of a double-quoted CSS string.
fn css_string(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\a "),
            '\r' => escaped.push_str("\\d "),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Text that cannot close the comment it is placed in.
fn comment_text(raw: &str) -> String {
    raw.replace("*/", "* /").replace(['\n', '\r'], " ")
}

fn format_ratio(ratio: f64) -> String {
    format!("{ratio:.2}:1")
}

fn level_label(report: &ContrastReport) -> &'static str {
    report.level.map_or("none", |level| level.as_str())
}

fn format_weights(weights: &[u16]) -> String {
    match weights {
        [] => String::new(),
        [only] => only.to_string(),
        [first, .., last] if is_full_range(weights) => format!("{first}-{last}"),
        _ => weights
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn is_full_range(weights: &[u16]) -> bool {
    weights.windows(2).all(|pair| pair[1] == pair[0] + 100)
}
