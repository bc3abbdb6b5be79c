mod find;
mod path;
mod prefixes;
mod resolve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fqcn",
    version,
    about = "Resolve PSR-4 namespaces to directories and discover the classes they contain",
    long_about = "fqcn reads a Composer project's PSR-4 autoload registrations, maps a namespace \
                  to the directories it lives in and lists the classes, interfaces and traits \
                  declared there, optionally filtered by a parent class or interface."
)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Mirror log output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a namespace to its existing directories
    Resolve {
        /// Namespace to resolve, e.g. 'App\Models'
        #[arg(value_name = "NAMESPACE")]
        namespace: String,
        /// Composer project root. Defaults to current directory.
        #[arg(long, value_name = "PROJECT_PATH")]
        project: Option<PathBuf>,
    },
    /// List the constructs declared under a namespace
    #[command(
        long_about = "Scans every directory the namespace resolves to and prints the fully-qualified \
                            names of the classes, interfaces and traits found there, sorted."
    )]
    Find {
        /// Namespace to search, e.g. 'App\Models'
        #[arg(value_name = "NAMESPACE")]
        namespace: String,
        /// Only keep subtypes of this class or interface
        #[arg(long, value_name = "FQCN")]
        instance_of: Option<String>,
        /// Composer project root. Defaults to current directory.
        #[arg(long, value_name = "PROJECT_PATH")]
        project: Option<PathBuf>,
    },
    /// Build the directory of a namespace relative to a known base directory
    Path {
        /// Directory that holds BASE_NAMESPACE
        #[arg(value_name = "BASE_DIR")]
        base_dir: PathBuf,
        /// Namespace represented by BASE_DIR
        #[arg(value_name = "BASE_NAMESPACE")]
        base_namespace: String,
        /// Namespace below BASE_NAMESPACE to locate
        #[arg(value_name = "TARGET_NAMESPACE")]
        target: String,
    },
    /// Show the registered PSR-4 prefixes
    Prefixes {
        /// Composer project root. Defaults to current directory.
        #[arg(long, value_name = "PROJECT_PATH")]
        project: Option<PathBuf>,
    },
}

fn project_root(project: Option<PathBuf>) -> PathBuf {
    project.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = fqcn_core::logging::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Resolve { namespace, project } => {
            resolve::run(&namespace, &project_root(project), cli.json)
        }
        Commands::Find {
            namespace,
            instance_of,
            project,
        } => find::run(
            &namespace,
            instance_of.as_deref(),
            &project_root(project),
            cli.json,
        ),
        Commands::Path {
            base_dir,
            base_namespace,
            target,
        } => path::run(&base_dir, &base_namespace, &target, cli.json),
        Commands::Prefixes { project } => prefixes::run(&project_root(project), cli.json),
    }
}

/// Print one value per line, or the whole list as JSON.
pub(crate) fn print_list<T: serde::Serialize + std::fmt::Display>(
    items: &[T],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{}", item);
        }
    }
    Ok(())
}
