use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use indexmap::IndexMap;
use pagekit_common::{CollectingSink, Diagnostic, DiagnosticLevel, TraitKey, TraitValue};
use pagekit_compiler_html::{compile_document, CompileOptions};
use pagekit_editor::{install, Document};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Snapshot file or directory of snapshot files
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Wrap each output in a full HTML page
    #[arg(long)]
    pub document: bool,
}

/// A persisted button: component type plus trait values by wire name
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFile {
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub traits: IndexMap<String, TraitValue>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = PathBuf::from(cwd).join(&args.path);

    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let mut options = config.output.clone();
    options.document |= args.document;

    let (root, files) = if input.is_file() {
        let root = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![input.clone()])
    } else {
        (input.clone(), find_snapshot_files(&input))
    };

    if files.is_empty() {
        println!("{}", "⚠️  No .json snapshot files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Rendering buttons...".bright_blue().bold());
        println!("Found {} files", files.len());
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&root).unwrap_or(file);
        match render_file(file, &config, &options) {
            Ok((html, diagnostics)) => {
                success_count += 1;
                let target = if args.stdout {
                    println!("{}", html);
                    "stdout".to_string()
                } else {
                    write_output(&out_dir, relative_path, &html)?
                };
                if !args.stdout {
                    println!("  {} {} → {}", "✓".green(), relative_path.display(), target);
                }
                for diagnostic in &diagnostics {
                    print_diagnostic(diagnostic);
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return Ok(());
    }

    println!();
    if error_count == 0 {
        println!("{} Rendered {} files successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Rendered {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn find_snapshot_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .filter(|entry| entry.file_name() != crate::config::DEFAULT_CONFIG_NAME)
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Render one snapshot file to HTML, returning the diagnostics it produced
pub fn render_file(path: &Path, config: &Config, options: &CompileOptions) -> Result<(String, Vec<Diagnostic>)> {
    let source = fs::read_to_string(path)?;
    render_source(&source, config, options)
}

pub fn render_source(source: &str, config: &Config, options: &CompileOptions) -> Result<(String, Vec<Diagnostic>)> {
    let file: RenderFile =
        serde_json::from_str(source).map_err(|e| anyhow!("Invalid snapshot file: {}", e))?;

    let traits = file
        .traits
        .into_iter()
        .map(|(name, value)| -> Result<(TraitKey, TraitValue)> { Ok((name.parse()?, value)) })
        .collect::<Result<Vec<_>>>()?;

    let sink = Rc::new(CollectingSink::new());
    let mut document = Document::with_sink(sink.clone());
    install(&mut document, &config.plugin)?;

    let type_name = file
        .component_type
        .unwrap_or_else(|| config.component_type.clone());
    let id = document.insert_with(&type_name, traits)?;
    document.run_pending();
    debug!(type_name = %type_name, instance = %id, "Rendered snapshot");

    let html = compile_document(&document, &[id], options)?;
    Ok((html, sink.take()))
}

fn write_output(out_dir: &Path, relative_path: &Path, html: &str) -> Result<String> {
    let output_file = out_dir.join(relative_path).with_extension("html");

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, html)?;

    Ok(output_file.display().to_string())
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    let label = match diagnostic.level {
        DiagnosticLevel::Error => "error".red().bold(),
        DiagnosticLevel::Warning => "warning".yellow().bold(),
        DiagnosticLevel::Info => "info".blue().bold(),
    };
    eprintln!(
        "      {}[{}] {}",
        label,
        diagnostic.code,
        diagnostic.message.dimmed()
    );
}
