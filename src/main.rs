// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use repostage::packages::RpmValidator;
use repostage::{ContentEnumerator, Propagator, StaticDirResolver};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "repostage")]
#[command(author, version, about = "Enumerate and propagate packages between yum repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all packages in a repository, grouped by architecture
    List {
        /// Logical repository name
        repository: String,
        /// Base directory containing one subdirectory per repository
        #[arg(short, long, default_value = "/var/lib/repostage/repos")]
        base_dir: String,
    },
    /// Move a package from one repository to another
    Propagate {
        /// Package file name (e.g. pkg-1.0-1.x86_64.rpm)
        package: String,
        /// Source repository name
        source: String,
        /// Destination repository name
        destination: String,
        /// Architecture partition shared by both repositories
        architecture: String,
        /// Replace an existing destination package instead of refusing
        #[arg(long)]
        overwrite: bool,
        /// Base directory containing one subdirectory per repository
        #[arg(short, long, default_value = "/var/lib/repostage/repos")]
        base_dir: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List {
            repository,
            base_dir,
        } => {
            info!("Listing repository: {}", repository);

            let resolver = StaticDirResolver::new(base_dir);
            let listing = ContentEnumerator::new(&resolver).list_packages(&repository)?;

            for entry in &listing.packages {
                println!("{}\t{}", entry.architecture, entry.path.display());
            }

            for failure in &listing.failed_partitions {
                warn!(
                    "Partition '{}' could not be listed: {}",
                    failure.architecture, failure.reason
                );
            }

            println!(
                "{} packages in repository '{}'",
                listing.packages.len(),
                repository
            );
            Ok(())
        }
        Commands::Propagate {
            package,
            source,
            destination,
            architecture,
            overwrite,
            base_dir,
        } => {
            let resolver = StaticDirResolver::new(base_dir);
            let validator = RpmValidator::new();

            let name = Propagator::new(&resolver, &validator)
                .allow_overwrite(overwrite)
                .propagate(&package, &source, &destination, &architecture)?;

            println!(
                "Propagated {} from {} to {} ({})",
                name, source, destination, architecture
            );
            println!("Remember to regenerate repository metadata for both repositories.");
            Ok(())
        }
    }
}
