use anyhow::{anyhow, Result};
use clap::Args;
use pagekit_evaluator::{try_sanitize, SanitizeError};
use pagekit_parser::format_error;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// File containing the icon markup
    pub file: String,

    /// Icon size in pixels
    #[arg(short, long)]
    pub size: Option<i64>,

    /// Color substituted for currentColor
    #[arg(short, long)]
    pub color: Option<String>,
}

pub fn sanitize(args: SanitizeArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.file);
    let source = fs::read_to_string(&path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let markup = sanitize_source(&source, file_name, args.size, args.color.as_deref())?;
    println!("{}", markup);
    Ok(())
}

/// Sanitize `source`, turning parse failures into a report pointing at the
/// offending position
pub fn sanitize_source(source: &str, file_name: &str, size: Option<i64>, color: Option<&str>) -> Result<String> {
    try_sanitize(source, size, color).map_err(|e| match e {
        SanitizeError::Parse(parse_error) => {
            anyhow!("\n{}", format_error(source.trim(), file_name, &parse_error))
        }
        other => anyhow!(other),
    })
}
