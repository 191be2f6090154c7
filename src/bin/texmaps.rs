//! texmaps CLI - inspect and validate formula settings resources

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use log::{Level, LevelFilter, Log, Metadata, Record};
#[cfg(feature = "cli")]
use std::io;
#[cfg(feature = "cli")]
use texmaps::{
    diagnostics::{check_settings, format_diagnostics},
    resources::{EmbeddedResourceProvider, StdResourceProvider},
    FormulaSettings, MappingKind, ParseOptions, SettingsError, SettingsSource, RESOURCE_NAME,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "texmaps")]
#[command(version)]
#[command(about = "Inspect and validate character mapping settings for math typesetting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Report every invalid entry instead of stopping at the first one
    #[arg(long, global = true)]
    keep_going: bool,

    /// Warn when an entry remaps a character that already has a value
    #[arg(long, global = true)]
    warn_overrides: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a settings file for problems (the built-in resource when omitted)
    Check {
        /// Settings file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print one table of the merged settings files
    Dump {
        /// Settings files, merged in order (the built-in resource when omitted)
        inputs: Vec<String>,

        /// Table to print
        #[arg(short, long, value_enum, default_value_t = Kind::Symbol)]
        kind: Kind,

        /// Print the table as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Show the symbol, formula and delimiter names of one character
    Lookup {
        /// The character to look up
        character: char,

        /// Settings files, merged in order (the built-in resource when omitted)
        inputs: Vec<String>,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    /// CharacterToSymbolMappings
    Symbol,
    /// CharacterToFormulaMappings
    Formula,
    /// CharacterToDelimiterMappings
    Delimiter,
}

#[cfg(feature = "cli")]
impl From<Kind> for MappingKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Symbol => MappingKind::Symbol,
            Kind::Formula => MappingKind::Formula,
            Kind::Delimiter => MappingKind::Delimiter,
        }
    }
}

/// Writes log records to stderr, filtered by `log::max_level()`
#[cfg(feature = "cli")]
struct StderrLogger;

#[cfg(feature = "cli")]
static LOGGER: StderrLogger = StderrLogger;

#[cfg(feature = "cli")]
impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        eprintln!("[texmaps] {}: {}", tag, record.args());
    }

    fn flush(&self) {}
}

#[cfg(feature = "cli")]
fn level_filter(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(feature = "cli")]
fn init_logging(cli: &Cli) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_filter(cli.quiet, cli.verbose));
    }
}

#[cfg(feature = "cli")]
fn parse_options(cli: &Cli) -> ParseOptions {
    ParseOptions {
        fail_fast: !cli.keep_going,
        warn_on_override: cli.warn_overrides,
    }
}

/// The file to check, or the built-in resource
#[cfg(feature = "cli")]
fn check_source(input: Option<&str>) -> Result<SettingsSource, SettingsError> {
    match input {
        Some(path) => SettingsSource::from_provider(&StdResourceProvider::new(), path),
        None => SettingsSource::from_provider(&EmbeddedResourceProvider, RESOURCE_NAME),
    }
}

/// Merge `inputs` in order, or load the built-in resource
#[cfg(feature = "cli")]
fn load_settings(
    inputs: &[String],
    options: &ParseOptions,
) -> Result<FormulaSettings, SettingsError> {
    if inputs.is_empty() {
        let provider = EmbeddedResourceProvider;
        return FormulaSettings::from_provider(&provider, &[RESOURCE_NAME], options);
    }
    let names: Vec<&str> = inputs.iter().map(String::as_str).collect();
    FormulaSettings::from_provider(&StdResourceProvider::new(), &names, options)
}

#[cfg(feature = "cli")]
fn fail(err: SettingsError) -> ! {
    for err in err.into_errors() {
        eprintln!("Error: {}", err);
    }
    std::process::exit(1);
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let options = parse_options(&cli);

    match cli.command {
        Commands::Check { input, no_color } => {
            let source = check_source(input.as_deref()).unwrap_or_else(|e| fail(e));
            let doc = source.document().unwrap_or_else(|e| fail(e));
            let result = check_settings(&doc);
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Dump { inputs, kind, json } => {
            let settings = load_settings(&inputs, &options).unwrap_or_else(|e| fail(e));
            let table = settings.table(kind.into());
            if json {
                print_json(table)?;
            } else {
                for (code, name) in table.iter() {
                    let shown = char::from_u32(u32::from(code))
                        .filter(|c| !c.is_control())
                        .map(String::from)
                        .unwrap_or_else(|| "?".to_string());
                    println!("{}\tU+{:04X}\t{}", shown, code, name);
                }
            }
        }

        Commands::Lookup { character, inputs } => {
            let settings = load_settings(&inputs, &options).unwrap_or_else(|e| fail(e));
            for kind in MappingKind::ALL {
                let name = settings.table(kind).get_char(character).unwrap_or("-");
                println!("{:<10} {}", kind, name);
            }
        }
    }

    Ok(())
}

#[cfg(all(feature = "cli", feature = "json"))]
fn print_json(table: &texmaps::MappingTable) -> io::Result<()> {
    let text = serde_json::to_string_pretty(table).map_err(io::Error::other)?;
    println!("{}", text);
    Ok(())
}

#[cfg(all(feature = "cli", not(feature = "json")))]
fn print_json(_table: &texmaps::MappingTable) -> io::Result<()> {
    eprintln!("JSON output not enabled. Build with --features json");
    std::process::exit(1);
}


#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texmaps --features cli");
    eprintln!("  texmaps check [FILE]");
}
