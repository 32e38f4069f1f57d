//! Print the OpenAPI document.

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use issue_tracker::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

/// Dump the issue tracker's OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Indent JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();

    let rendered = match (cli.format, cli.pretty) {
        (Format::Json, false) => doc.to_json().wrap_err("serialise OpenAPI as JSON")?,
        (Format::Json, true) => doc
            .to_pretty_json()
            .wrap_err("serialise OpenAPI as pretty JSON")?,
        (Format::Yaml, _) => doc.to_yaml().wrap_err("serialise OpenAPI as YAML")?,
    };
    println!("{rendered}");
    Ok(())
}
