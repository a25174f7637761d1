//! BECU converter CLI - regroup a transaction export by category
//!
//! # Main Commands
//!
//! ```bash
//! becu-convert convert export.csv -o grouped.csv   # Convert a file
//! becu-convert serve --port 3000                   # Start HTTP server
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! becu-convert parse export.csv    # Show parsed records as JSON
//! becu-convert group export.csv    # Show the category hierarchy as JSON
//! ```

use becu_convert::{convert_file, group_records, parse_records, read_file, ServerConfig};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "becu-convert")]
#[command(about = "Regroup a bank transaction CSV by parent category and category", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an export to the grouped CSV with subtotals
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse an export and output the records as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Group an export and output the hierarchy as JSON
    Group {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server
    Serve {
        /// Address to listen on (overrides BECU_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides BECU_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { input, output } => cmd_convert(&input, output.as_deref()),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Group { input, output } => cmd_group(&input, output.as_deref()),

        Commands::Serve { host, port } => cmd_serve(host, port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Converting: {}", input.display());

    let conversion = convert_file(input)?;
    let stats = &conversion.stats;
    eprintln!("   Records: {}", stats.record_count);
    eprintln!("   Parent categories: {}", stats.parent_count);
    eprintln!("   Categories: {}", stats.category_count);
    if stats.non_numeric_count > 0 {
        eprintln!("   ⚠️  Non-numeric amounts: {}", stats.non_numeric_count);
    }

    write_output(&conversion.csv, output)?;

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing: {}", input.display());

    let decoded = read_file(input)?;
    eprintln!("   Encoding: {}", decoded.encoding);

    let records = parse_records(&decoded.content);
    eprintln!("✅ Parsed {} records", records.len());

    let json = serde_json::to_string_pretty(&records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_group(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📦 Grouping: {}", input.display());

    let decoded = read_file(input)?;
    let records = parse_records(&decoded.content);
    eprintln!("   {} records", records.len());

    let grouped = group_records(records);
    eprintln!("   {} parent categories", grouped.len());

    let json = serde_json::to_string_pretty(&grouped)?;
    write_output(&json, output)?;

    Ok(())
}

async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?.with_overrides(host, port);
    becu_convert::server::start_server(config).await
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
