mod description;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use optkit_argparse::{HelpFormatter, parse};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

use crate::description::{DEFAULT_SPEC_NAME, LoadedSpec, load_spec};

/// Exit status for an argument vector the description rejects.
const PARSE_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "optkit")]
#[command(version, about = "Getopt-style parsing and help from a JSON command description", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an argument vector against the description
    Parse(ParseArgs),

    /// Print the usage line
    Usage(RenderArgs),

    /// Print the full help screen
    Help(RenderArgs),

    /// Validate the description and count its options
    Check(SpecArgs),
}

#[derive(Args)]
struct SpecArgs {
    /// Path to the JSON command description
    #[arg(
        short,
        long,
        env = "OPTKIT_SPEC",
        default_value = DEFAULT_SPEC_NAME,
        value_name = "FILE"
    )]
    spec: PathBuf,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    spec: SpecArgs,

    /// Wrap width in columns
    #[arg(short, long, env = "OPTKIT_WIDTH", value_name = "COLUMNS")]
    width: Option<usize>,
}

#[derive(Args)]
struct ParseArgs {
    #[command(flatten)]
    render: RenderArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Arguments to parse (put them after `--`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Shell,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => parse_command(args),
        Commands::Usage(args) => usage_command(args),
        Commands::Help(args) => help_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn formatter(width: Option<usize>) -> HelpFormatter {
    match width {
        Some(width) => HelpFormatter::new().with_width(width),
        None => HelpFormatter::new(),
    }
}

fn usage_line(loaded: &LoadedSpec, formatter: &HelpFormatter) -> String {
    match &loaded.spec.syntax {
        Some(syntax) => formatter.render_syntax_usage(formatter.width(), syntax),
        None => formatter.render_usage(formatter.width(), &loaded.spec.name, &loaded.options),
    }
}

fn help_text(loaded: &LoadedSpec, formatter: &HelpFormatter) -> Result<String> {
    let request = loaded.spec.help_request(&loaded.options);
    formatter
        .render_help(&request)
        .with_context(|| format!("failed to render help for {}", loaded.path.display()))
}

fn parse_command(args: ParseArgs) -> Result<ExitCode> {
    let loaded = load_spec(&args.render.spec.spec)?;
    let formatter = formatter(args.render.width);

    let cmd = match parse(&loaded.options, &args.args) {
        Ok(cmd) => cmd,
        Err(err) => {
            tracing::debug!(error = %err, "argument vector rejected");
            eprintln!("error: {err}");
            eprintln!("{}", usage_line(&loaded, &formatter));
            return Ok(ExitCode::from(PARSE_FAILURE));
        }
    };

    if loaded.spec.help && cmd.has_option("help") {
        print!("{}", help_text(&loaded, &formatter)?);
        return Ok(ExitCode::SUCCESS);
    }

    match args.format {
        Format::Json => println!("{}", output::to_json(&cmd)?),
        Format::Shell => println!("{}", output::to_shell(&cmd)),
    }
    Ok(ExitCode::SUCCESS)
}

fn usage_command(args: RenderArgs) -> Result<ExitCode> {
    let loaded = load_spec(&args.spec.spec)?;
    println!("{}", usage_line(&loaded, &formatter(args.width)));
    Ok(ExitCode::SUCCESS)
}

fn help_command(args: RenderArgs) -> Result<ExitCode> {
    let loaded = load_spec(&args.spec.spec)?;
    print!("{}", help_text(&loaded, &formatter(args.width))?);
    Ok(ExitCode::SUCCESS)
}

fn check_command(args: SpecArgs) -> Result<ExitCode> {
    let loaded = load_spec(&args.spec)?;
    println!(
        "OK: {} defines {} option(s)",
        loaded.path.display(),
        loaded.options.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
