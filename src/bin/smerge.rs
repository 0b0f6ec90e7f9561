//! smerge - Struct Merge CLI tool
//!
//! A command line tool for merging and flattening YAML/JSON files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use struct_merge::value::{self, Value};
use struct_merge::{flatten, merge, DEFAULT_SEPARATOR};

#[derive(Debug, Parser)]
#[command(name = "smerge", version, about = "Merge and flatten YAML/JSON documents")]
struct Cli {
    /// Output location. Use '-' for stdout
    #[arg(short, long, global = true, default_value = "-")]
    output: String,

    /// Serialization of the result
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge two YAML/JSON files
    Merge {
        #[arg(long, value_name = "FILE")]
        lhs: PathBuf,

        #[arg(long, value_name = "FILE")]
        rhs: PathBuf,

        /// Map key whose values are merged as lists of records
        #[arg(long, value_name = "KEY")]
        coerce_key: Option<String>,
    },
    /// Flatten a YAML/JSON map into dotted key paths
    Flatten {
        file: PathBuf,

        #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
        separator: String,
    },
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let result = match cli.command {
        Command::Merge {
            lhs,
            rhs,
            coerce_key,
        } => merge_files(&lhs, &rhs, coerce_key.as_deref())?,
        Command::Flatten { file, separator } => flatten_file(&file, &separator)?,
    };

    let rendered = render(&result, cli.format)?;

    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?,
        )
    };
    write!(output, "{}", rendered)?;
    output.flush()?;

    Ok(())
}

fn read_value(file: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read file {:?}: {}", file, e))?;
    let parsed = value::from_yaml(&content)
        .map_err(|e| format!("Failed to parse file {:?}: {}", file, e))?;
    debug!(file = %file.display(), shape = %parsed.shape(), "loaded document");
    Ok(parsed)
}

fn merge_files(
    lhs_file: &Path,
    rhs_file: &Path,
    coerce_key: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let lhs = read_value(lhs_file)?;
    let rhs = read_value(rhs_file)?;

    let merged = merge(&lhs, &rhs, coerce_key).map_err(|e| format!("Merge failed: {}", e))?;
    Ok(merged)
}

fn flatten_file(file: &Path, separator: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let parsed = read_value(file)?;
    let map = parsed.as_map().ok_or_else(|| {
        format!(
            "Cannot flatten {:?}: expected a map at top level, got {}",
            file,
            parsed.shape()
        )
    })?;
    Ok(Value::Map(flatten(map, separator)))
}

fn render(result: &Value, format: Format) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        Format::Yaml => value::to_yaml(result)?,
        Format::Json => {
            let mut json = value::to_json_pretty(result)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_merge_args() {
        let cli = Cli::try_parse_from([
            "smerge",
            "merge",
            "--lhs",
            "a.yaml",
            "--rhs",
            "b.yaml",
            "--coerce-key",
            "tags",
            "-f",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.output, "-");
        match cli.command {
            Command::Merge {
                lhs,
                rhs,
                coerce_key,
            } => {
                assert_eq!(lhs, PathBuf::from("a.yaml"));
                assert_eq!(rhs, PathBuf::from("b.yaml"));
                assert_eq!(coerce_key.as_deref(), Some("tags"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_flatten_defaults() {
        let cli = Cli::try_parse_from(["smerge", "flatten", "doc.json"]).unwrap();
        assert_eq!(cli.format, Format::Yaml);
        match cli.command {
            Command::Flatten { file, separator } => {
                assert_eq!(file, PathBuf::from("doc.json"));
                assert_eq!(separator, ".");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_merge_requires_both_sides() {
        assert!(Cli::try_parse_from(["smerge", "merge", "--lhs", "a.yaml"]).is_err());
    }

    #[test]
    fn test_render_json() {
        let value = value::from_json(r#"{"a.b": 1}"#).unwrap();
        assert_eq!(render(&value, Format::Json).unwrap(), "{\n  \"a.b\": 1\n}\n");
    }
}
