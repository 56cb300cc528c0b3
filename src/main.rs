use clap::{Parser, Subcommand};
use std::path::PathBuf;

use moyenne::catalog::Branch;
use moyenne::config::{load_config, resolve_catalog};
use moyenne::output;
use moyenne::tui::App;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 1;
const EXIT_IO: i32 = 2;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive grade entry with live averages (default if no subcommand)
    Tui,
    /// Print a branch's module and subject catalog
    Catalog {
        /// Branch identifier (iad, gl, gi, rt)
        branch: Option<String>,
    },
    /// List the known branches and their aggregation strategies
    Branches,
}

#[derive(Parser, Debug)]
#[command(name = "moyenne")]
#[command(about = "Semester average calculator for Master 1 students", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/moyenne/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Branch to open (iad, gl, gi, rt); unknown ids fall back to iad
    #[arg(short, long, global = true)]
    branch: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // Load config (optional at the default path)
    let config_path = cli.config.map(PathBuf::from);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Resolve the active branch: flag, then config, then the default.
    // Branch::parse is fail-soft on unknown identifiers.
    let branch_id = cli.branch.or_else(|| config.default_branch.clone());
    let branch = branch_id.as_deref().map(Branch::parse).unwrap_or_default();

    if cli.verbose {
        if let Some(ref id) = branch_id {
            if Branch::parse(id).id() != id.trim().to_ascii_lowercase() {
                eprintln!("Unknown branch '{}', using {}", id, branch.id());
            }
        }
        eprintln!("Branch: {} ({})", branch.id(), branch.label());
        eprintln!("Grade max: {}", config.grade_max());
    }

    match command {
        Commands::Tui => {
            let modules = match resolve_catalog(&config, branch) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if cli.verbose {
                let subjects: usize = modules.iter().map(|m| m.subjects.len()).sum();
                eprintln!("Catalog: {} modules, {} subjects", modules.len(), subjects);
            }

            let app = App::new(branch, modules, config, cli.verbose);
            if let Err(e) = moyenne::tui::run_tui(app).await {
                eprintln!("Terminal error: {}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Catalog {
            branch: catalog_branch,
        } => {
            let branch = catalog_branch
                .as_deref()
                .map(Branch::parse)
                .unwrap_or(branch);
            let modules = match resolve_catalog(&config, branch) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let use_colors = output::should_use_colors();
            println!("{}", output::format_catalog(branch, &modules, use_colors));
        }
        Commands::Branches => {
            let use_colors = output::should_use_colors();
            println!("{}", output::format_branch_list(use_colors));
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
