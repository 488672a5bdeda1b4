//! Football statistics CLI
//!
//! Normalizes scraped player and goalkeeper tables and unifies them into
//! clean CSV datasets.

use clap::{Parser, Subcommand};
use football::data::EntityKind;
use football::pipeline::TournamentInput;
use football::{Config, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "football")]
#[command(about = "Football statistics normalization and unification", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with default config
    Init,
    /// Normalize match-log files (YYYY_Name.csv) and unify them per entity
    Matches {
        /// player or goalkeeper
        #[arg(long, default_value = "player")]
        kind: EntityKind,
        /// Treat every file as belonging to this entity
        #[arg(long)]
        entity: Option<String>,
        /// Match-log CSV files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output CSV (defaults to <output_dir>/partidos_<kind>.csv)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Unify tournament summary files given as LABEL=PATH
    Tournaments {
        #[arg(required = true)]
        inputs: Vec<TournamentInput>,
        /// Output CSV (defaults to <output_dir>/jugadores_unificados.csv)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Combine the per-category files of a directory into one table
    Combine {
        /// Directory holding the category CSV files
        dir: String,
        /// Output CSV (defaults to the combined file inside the directory)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Extract rows from saved statistics pages
    Page {
        #[command(subcommand)]
        action: PageCommands,
    },
    /// Summarize a finished table
    Summary {
        /// Table to summarize
        file: String,
        /// player or goalkeeper; omit for combined category tables
        #[arg(long)]
        kind: Option<EntityKind>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum PageCommands {
    /// League statistics table with team/player attribution
    Stats {
        /// Saved HTML page
        file: String,
        /// Write the rows to this CSV
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Match-log table, normalized onto the entity schema
    Log {
        /// Saved HTML page, named like YYYY_Name.html
        file: String,
        /// player or goalkeeper
        #[arg(long, default_value = "player")]
        kind: EntityKind,
        /// Write the rows to this CSV
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Init => commands::init(&cli.config),
        Commands::Matches {
            kind,
            entity,
            files,
            output,
        } => commands::matches(&config, kind, entity, &files, output),
        Commands::Tournaments { inputs, output } => commands::tournaments(&config, &inputs, output),
        Commands::Combine { dir, output } => commands::combine(&config, &dir, output),
        Commands::Page { action } => match action {
            PageCommands::Stats { file, output } => commands::page_stats(&config, &file, output),
            PageCommands::Log { file, kind, output } => commands::page_log(&file, kind, output),
        },
        Commands::Summary { file, kind, format } => commands::summary(&file, kind, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use football::data::{read_table, write_table};
    use football::normalize::TeamLexicon;
    use football::pipeline::{self, CombinedSummary, SummaryReport};
    use football::unify::COMBINED_FILE_NAME;
    use indexmap::IndexMap;
    use std::path::Path;

    fn output_path(config: &Config, output: Option<String>, default_name: &str) -> PathBuf {
        output
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(&config.data.output_dir).join(default_name))
    }

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all(&config.data.output_dir)?;
        println!("Created {}/ directory", config.data.output_dir);

        println!("\nNext steps:");
        println!("  1. Edit {} to customize tournament ranks and team names", config_path);
        println!("  2. Run 'football matches --kind player 2024_Name.csv ...' to unify match logs");
        println!("  3. Run 'football tournaments \"Apertura 2025A=path.csv\" ...' to unify tournaments");

        Ok(())
    }

    pub fn matches(
        config: &Config,
        kind: EntityKind,
        entity: Option<String>,
        files: &[PathBuf],
        output: Option<String>,
    ) -> Result<()> {
        let groups = match entity {
            Some(name) => {
                let mut groups = IndexMap::new();
                groups.insert(name, files.to_vec());
                groups
            }
            None => pipeline::group_by_entity(files),
        };
        println!("Processing {} files for {} {}s", files.len(), groups.len(), kind);

        let default_name = match kind {
            EntityKind::Player => "partidos_jugadores.csv",
            EntityKind::Goalkeeper => "partidos_porteros.csv",
        };
        let output = output_path(config, output, default_name);
        let table = pipeline::process_entities_and_save(kind, &groups, &output)?;
        println!("Saved {} rows to {}\n", table.len(), output.display());

        print!("{}", SummaryReport::from_table(&table, kind));
        Ok(())
    }

    pub fn tournaments(config: &Config, inputs: &[TournamentInput], output: Option<String>) -> Result<()> {
        let output = output_path(config, output, "jugadores_unificados.csv");
        let unified = pipeline::unify_tournaments_and_save(inputs, &config.tournaments, &output)?;
        println!(
            "Unified {} tournaments into {} rows at {}",
            inputs.len(),
            unified.table.len(),
            output.display()
        );
        if !unified.conflicts.is_empty() {
            println!(
                "{} conflicting values were discarded (run with --verbose to list them)",
                unified.conflicts.len()
            );
        }
        Ok(())
    }

    pub fn combine(config: &Config, dir: &str, output: Option<String>) -> Result<()> {
        let output = output
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(dir).join(COMBINED_FILE_NAME));
        let combined = pipeline::combine_dir_and_save(dir, &config.combine, &output)?;
        println!("Saved combined table to {}\n", output.display());
        print!("{}", CombinedSummary::from_table(&combined));
        Ok(())
    }

    pub fn page_stats(config: &Config, file: &str, output: Option<String>) -> Result<()> {
        let lexicon = TeamLexicon::new(config.lexicon.team_indicators.clone());
        let table = pipeline::pages::stats_page_table(file, &lexicon)?;
        println!("Extracted {} rows from {}", table.len(), file);
        print!("{}", CombinedSummary::from_table(&table));
        if let Some(output) = output {
            write_table(&table, &output, &[])?;
        }
        Ok(())
    }

    pub fn page_log(file: &str, kind: EntityKind, output: Option<String>) -> Result<()> {
        let table = pipeline::pages::match_log_page_table(file, kind)?;
        println!("Extracted {} {} matches from {}", table.len(), kind, file);
        if let Some(output) = output {
            write_table(&table, &output, kind.schema().labels)?;
        }
        Ok(())
    }

    pub fn summary(file: &str, kind: Option<EntityKind>, format: OutputFormat) -> Result<()> {
        let table = read_table(file)?;
        match (kind, format) {
            (Some(kind), OutputFormat::Table) => print!("{}", SummaryReport::from_table(&table, kind)),
            (Some(kind), OutputFormat::Json) => {
                let report = SummaryReport::from_table(&table, kind);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            (None, OutputFormat::Table) => print!("{}", CombinedSummary::from_table(&table)),
            (None, OutputFormat::Json) => {
                let summary = CombinedSummary::from_table(&table);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        Ok(())
    }
}
