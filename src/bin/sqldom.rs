//! sqldom — compile SQL DOM statements from the command line
//!
//! # Usage
//!
//! ```bash
//! # Compile a JSON statement for SQL Server
//! sqldom compile statement.json --dialect sqlserver
//!
//! # Keep the compiled plan and render it later with values
//! sqldom compile statement.json --plan > plan.json
//! sqldom render plan.json --values render.json
//!
//! # Quote an identifier
//! sqldom quote 'odd]name' --dialect sqlserver
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqldom::config::Settings;
use sqldom::prelude::*;
use sqldom::result::CompiledPlan;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqldom")]
#[command(version)]
#[command(about = "Compile SQL DOM statements for any supported dialect", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqldom compile select.json --dialect postgres
    sqldom compile select.json --values render.json
    sqldom render plan.json --values render.json
    sqldom dialects")]
struct Cli {
    /// Settings file (defaults to <config dir>/sqldom/config.toml)
    #[arg(short, long, global = true, env = "SQLDOM_CONFIG")]
    config: Option<PathBuf>,

    /// Log compiler activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON statement and print its SQL
    Compile {
        /// Statement file; `-` or nothing reads stdin
        input: Option<PathBuf>,

        /// Target dialect, overriding the settings file
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Render-time values (variants, placeholders, filter rows) as JSON
        #[arg(long)]
        values: Option<PathBuf>,

        /// Print the compiled plan as JSON instead of SQL
        #[arg(long)]
        plan: bool,
    },
    /// Render a compiled plan
    Render {
        /// Plan file; `-` or nothing reads stdin
        input: Option<PathBuf>,

        #[arg(long)]
        values: Option<PathBuf>,
    },
    /// List dialects and their capabilities
    Dialects,
    /// Quote or unquote an identifier
    Quote {
        name: String,

        #[arg(short, long)]
        dialect: Option<Dialect>,

        #[arg(short, long)]
        unquote: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sqldom=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;

    match &cli.command {
        Commands::Compile {
            input,
            dialect,
            values,
            plan,
        } => {
            if let Some(dialect) = dialect {
                settings.dialect = *dialect;
            }
            let statement: Statement =
                serde_json::from_str(&read_input(input.as_deref())?).context("invalid statement JSON")?;
            let compiler = SqlCompiler::from_settings(&settings)?;
            let result = compiler.compile(&statement, &settings.compiler)?;
            debug!(dialect = %settings.dialect, is_static = result.is_static(), "compile finished");

            if *plan {
                println!("{}", serde_json::to_string_pretty(&result.to_plan())?);
            } else {
                let config = load_values(values.as_deref())?;
                println!("{}", result.command_text(config.as_ref())?);
            }
        }
        Commands::Render { input, values } => {
            let plan: CompiledPlan =
                serde_json::from_str(&read_input(input.as_deref())?).context("invalid plan JSON")?;
            let result = CompilationResult::from_plan(plan);
            let config = load_values(values.as_deref())?;
            println!("{}", result.command_text(config.as_ref())?);
        }
        Commands::Dialects => show_dialects(),
        Commands::Quote {
            name,
            dialect,
            unquote,
        } => {
            if let Some(dialect) = dialect {
                settings.dialect = *dialect;
            }
            let translator = settings.translator();
            if *unquote {
                println!("{}", translator.unquote_identifier(name));
            } else {
                println!("{}", translator.quote_identifier(name));
            }
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn load_values(path: Option<&Path>) -> Result<Option<PostCompilerConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(serde_json::from_str(&text).context("invalid render values JSON")?))
}

fn show_dialects() {
    println!("{}", "Dialects".cyan().bold());
    println!();
    for dialect in Dialect::ALL {
        let caps = dialect.capabilities();
        let flags = [
            ("multicolumn IN", caps.multicolumn_in),
            ("join order", caps.explicit_join_order),
            ("sequences", caps.sequences),
            ("procedural", caps.procedural),
            ("cursors", caps.cursors),
            ("APPLY", caps.cross_apply),
        ];
        let supported: Vec<&str> = flags.iter().filter(|(_, on)| *on).map(|(name, _)| *name).collect();
        println!(
            "{:10} {:4} {}",
            dialect.name().yellow().bold(),
            caps.parameter_prefix.white(),
            supported.join(", ").dimmed()
        );
    }
}
