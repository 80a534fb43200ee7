//! Argument parsing, logging setup, and command dispatch.

use std::path::PathBuf;
use std::time::Duration;

use brandkit_fonts::FontCategory;
use brandkit_telemetry::{LogFormat, LoggingConfig, init_logging};
use brandkit_theme::DEFAULT_PREVIEW_ID;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{Instrument, info_span};

use crate::commands::{brand, fonts, theme};
use crate::context::{AppContext, CliResult};

const DEFAULT_STORAGE_PATH: &str = "brand-dna.json";
const DEFAULT_CLI_LOG_LEVEL: &str = "warn";
const DEFAULT_FONT_TIMEOUT_SECS: u64 = 15;

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("BRANDKIT_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let span = info_span!("command", name = command_label(&cli.command));
    match dispatch(cli).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let format = cli.output;
    let storage = cli.storage;
    match cli.command {
        Command::Show => brand::handle_show(&AppContext::open(&storage).await?, format),
        Command::Validate(args) => brand::handle_validate(&args.file, format).await,
        Command::Import(args) => {
            brand::handle_import(&AppContext::open(&storage).await?, &args.file).await
        }
        Command::Export(args) => {
            let ctx = AppContext::open(&storage).await?;
            brand::handle_export(&ctx, args.out.as_deref()).await
        }
        Command::Reset => brand::handle_reset(&AppContext::open(&storage).await?).await,
        Command::Patch(args) => {
            brand::handle_patch(&AppContext::open(&storage).await?, &args).await
        }
        Command::Value(command) => {
            brand::handle_value(&AppContext::open(&storage).await?, command).await
        }
        Command::Contrast(args) => brand::handle_contrast(&args, format),
        Command::Audit => brand::handle_audit(&AppContext::open(&storage).await?, format),
        Command::Render(args) => {
            let ctx = AppContext::open(&storage).await?;
            let timeout = Duration::from_secs(cli.font_timeout_secs);
            theme::handle_render(&ctx, &args.preview_id, timeout, format).await
        }
        Command::Fonts(command) => match command {
            FontsCommand::List(args) => fonts::handle_list(args.category, format),
            FontsCommand::Search(args) => fonts::handle_search(&args.query, format),
            FontsCommand::Pairings => fonts::handle_pairings(format),
        },
    }
}

#[derive(Parser)]
#[command(name = "brandkit", about = "Inspect and edit a stored Brand DNA configuration")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "BRANDKIT_STORAGE",
        default_value = DEFAULT_STORAGE_PATH,
        help = "File holding the persisted brand record"
    )]
    storage: PathBuf,
    #[arg(
        long,
        global = true,
        env = "BRANDKIT_LOG_LEVEL",
        default_value = DEFAULT_CLI_LOG_LEVEL
    )]
    log_level: String,
    #[arg(
        long,
        global = true,
        env = "BRANDKIT_LOG_FORMAT",
        value_parser = parse_log_format,
        help = "Log format: json, pretty, or auto"
    )]
    log_format: Option<LogFormat>,
    #[arg(
        long,
        global = true,
        env = "BRANDKIT_FONT_TIMEOUT_SECS",
        default_value_t = DEFAULT_FONT_TIMEOUT_SECS
    )]
    font_timeout_secs: u64,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stored configuration.
    Show,
    /// Check an import document without touching storage.
    Validate(FileArgs),
    /// Replace the stored configuration with an import document.
    Import(FileArgs),
    /// Export the stored configuration.
    Export(ExportArgs),
    /// Replace the stored configuration with defaults.
    Reset,
    /// Merge a partial update for one section.
    Patch(PatchArgs),
    /// Edit strategy values.
    #[command(subcommand)]
    Value(ValueCommand),
    /// Contrast ratio between two HSL colors.
    Contrast(ContrastArgs),
    /// Text/surface pairs below AA-normal.
    Audit,
    /// Render the scoped preview stylesheet.
    Render(RenderArgs),
    /// Browse the font catalog.
    #[command(subcommand)]
    Fonts(FontsCommand),
}

#[derive(Subcommand)]
enum FontsCommand {
    List(FontListArgs),
    Search(FontSearchArgs),
    Pairings,
}

#[derive(Subcommand)]
pub(crate) enum ValueCommand {
    Add(ValueAddArgs),
    Remove(ValueRemoveArgs),
    Update(ValueUpdateArgs),
}

#[derive(Args)]
struct FileArgs {
    #[arg(help = "Path to a brand JSON document")]
    file: PathBuf,
}

#[derive(Args)]
struct ExportArgs {
    #[arg(long, help = "Write to this file instead of stdout")]
    out: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct PatchArgs {
    #[arg(value_enum)]
    pub(crate) section: PatchSection,
    #[arg(help = "Path to a JSON object holding the fields to change")]
    pub(crate) file: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PatchSection {
    Colors,
    Typography,
    Spacing,
    Assets,
    Metadata,
    Strategy,
}

#[derive(Args)]
pub(crate) struct ValueAddArgs {
    pub(crate) label: String,
    #[arg(default_value = "")]
    pub(crate) description: String,
}

#[derive(Args)]
pub(crate) struct ValueRemoveArgs {
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct ValueUpdateArgs {
    pub(crate) id: String,
    #[arg(long)]
    pub(crate) label: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
}

#[derive(Args)]
pub(crate) struct ContrastArgs {
    #[arg(help = "Foreground color as \"H S% L%\"")]
    pub(crate) foreground: String,
    #[arg(help = "Background color as \"H S% L%\"")]
    pub(crate) background: String,
}

#[derive(Args)]
struct RenderArgs {
    #[arg(long, env = "BRANDKIT_PREVIEW_ID", default_value = DEFAULT_PREVIEW_ID)]
    preview_id: String,
}

#[derive(Args)]
struct FontListArgs {
    #[arg(long, value_parser = parse_category)]
    category: Option<FontCategory>,
}

#[derive(Args)]
struct FontSearchArgs {
    query: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

fn parse_category(input: &str) -> Result<FontCategory, String> {
    input.parse::<FontCategory>().map_err(|err| err.to_string())
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Show => "show",
        Command::Validate(_) => "validate",
        Command::Import(_) => "import",
        Command::Export(_) => "export",
        Command::Reset => "reset",
        Command::Patch(_) => "patch",
        Command::Value(ValueCommand::Add(_)) => "value_add",
        Command::Value(ValueCommand::Remove(_)) => "value_remove",
        Command::Value(ValueCommand::Update(_)) => "value_update",
        Command::Contrast(_) => "contrast",
        Command::Audit => "audit",
        Command::Render(_) => "render",
        Command::Fonts(FontsCommand::List(_)) => "fonts_list",
        Command::Fonts(FontsCommand::Search(_)) => "fonts_search",
        Command::Fonts(FontsCommand::Pairings) => "fonts_pairings",
    }
}
