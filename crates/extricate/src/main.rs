use std::fs::File;
use std::io::{BufWriter, Read, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use extricate_resolve::{PathMarkers, ResolveRequest};
use itertools::Itertools;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Determine the minimal set of project references a single method needs,
/// so the method can be extracted or relocated without breaking
/// compilation.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a method's project dependency set from a workspace snapshot
    ///
    /// Reads a snapshot JSON produced by the compiler front end and writes
    /// the dependency report: one project file path per line, sorted.
    Resolve {
        /// Path to the snapshot JSON (reads stdin if not specified)
        snapshot: Option<String>,

        /// File path of the project containing the method
        #[arg(long)]
        project: Option<String>,

        /// Name of the type declaring the method
        #[arg(long = "type")]
        type_name: Option<String>,

        /// Name of the method
        #[arg(long = "method")]
        method_name: Option<String>,

        /// Path-segment substring identifying the platform's reference
        /// assemblies
        #[arg(long, default_value = "dotnet/packs/")]
        platform_marker: String,

        /// Path-segment substring identifying the local package cache root
        #[arg(long, default_value = ".nuget/packages/")]
        package_cache_marker: String,

        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging. Output goes to stderr so the report
    // on stdout remains clean for piping. Default to warn, allowlist our
    // crates.
    const CRATES: &[&str] =
        &["extricate", "extricate_resolve", "extricate_schemas"];
    let level = cli.verbose.tracing_level_filter();
    let allowlist = CRATES.iter().map(|c| format!("{c}={level}")).join(",");
    let filter = EnvFilter::new(format!("warn,{allowlist}"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
        .init();

    match cli.command {
        Commands::Resolve {
            snapshot,
            project,
            type_name,
            method_name,
            platform_marker,
            package_cache_marker,
            output,
        } => {
            let request = ResolveRequest {
                project,
                type_name,
                method_name,
                markers: PathMarkers {
                    platform_runtime: platform_marker,
                    package_cache: package_cache_marker,
                },
            };

            // Lock stdin/stdout once up front rather than on each call.
            // Both must outlive their locks, so they are bound here first.
            let stdin = std::io::stdin();
            let reader: Box<dyn Read> = match snapshot {
                Some(path) => Box::new(File::open(path)?),
                None => Box::new(stdin.lock()),
            };
            let stdout = std::io::stdout();
            let mut writer: Box<dyn Write> = match output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(stdout.lock()),
            };
            extricate_resolve::run(reader, &mut *writer, &request)?;
            Ok(())
        }
    }
}
