//! redraft CLI - AI-assisted office document revision

mod chat;
mod config;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use chat::ChatGenerator;
use config::CliConfig;
use redraft::{
    lang, ChangeLog, Document, GenerateRequest, Passthrough, Redraft, RevisionSummary,
    TextGenerator, UnitOutcome,
};

#[derive(Parser)]
#[command(name = "redraft")]
#[command(author = "archambault")]
#[command(version)]
#[command(about = "Revise Word and PowerPoint documents with AI, preserving formatting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Revise every unit of a document under an instruction
    Revise {
        /// Input document (JSON object model)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Revision instruction, e.g. "make the tone more formal"
        #[arg(short, long)]
        instruction: String,

        /// Output file (defaults to <stem>_revised.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Directory for the plain-text change log
        #[arg(long, value_name = "DIR", default_value = "LOGS")]
        log_dir: PathBuf,

        /// Run without calling the model (reports every unit unchanged)
        #[arg(long)]
        dry_run: bool,

        /// Chat model name (overrides the config file)
        #[arg(long)]
        model: Option<String>,

        /// OpenAI-compatible endpoint base URL (overrides the config file)
        #[arg(long)]
        api_base: Option<String>,

        /// API key for the chat endpoint
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Trailing units fed to the generator as context
        #[arg(long)]
        context_units: Option<usize>,

        /// YAML configuration file (defaults to ./redraft.yaml when present)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit machine-readable JSON instead of the formatted view
        #[arg(long)]
        json: bool,
    },

    /// Dump the document's plain text
    Text {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Revise {
            input,
            instruction,
            output,
            log_dir,
            dry_run,
            model,
            api_base,
            api_key,
            context_units,
            config,
        } => cmd_revise(
            &input,
            &instruction,
            output.as_deref(),
            &log_dir,
            dry_run,
            model,
            api_base,
            api_key,
            context_units,
            config.as_deref(),
        ),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Text { input, output } => cmd_text(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Generator decorator that advances a progress bar per generated unit.
struct WithProgress<G> {
    inner: G,
    bar: ProgressBar,
}

impl<G: TextGenerator> TextGenerator for WithProgress<G> {
    fn generate(&self, request: &GenerateRequest<'_>) -> String {
        let out = self.inner.generate(request);
        self.bar.inc(1);
        out
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_revise(
    input: &Path,
    instruction: &str,
    output: Option<&Path>,
    log_dir: &Path,
    dry_run: bool,
    model: Option<String>,
    api_base: Option<String>,
    api_key: Option<String>,
    context_units: Option<usize>,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load(config_path)?;
    let model = model.unwrap_or(config.model);
    let api_base = api_base.unwrap_or(config.api_base);
    let context_units = context_units.unwrap_or(config.context.units);

    let mut document = Document::open(input)?;
    let document_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let language_code = document
        .metadata
        .language
        .clone()
        .or_else(|| lang::detect(&document.sample_text(10)).map(str::to_string));
    let language_name = language_code.as_deref().map(lang::language_name);

    println!("{} {}", "✓ Document loaded:".green(), document_name);
    println!("  Format: {}", document.format_name());
    println!("  Units: {}", document.unit_count());
    if let Some(ref name) = language_name {
        println!("  Language: {name}");
    }
    let media = document.media_count();
    if media > 0 {
        println!(
            "  {} {} embedded drawing(s): affected units are rewritten under media protection",
            "⚠".yellow(),
            media
        );
    }

    let mut change_log = ChangeLog::create(
        log_dir,
        &document_name,
        document.unit_count(),
        language_name.as_deref(),
    )?;

    let pending = document.units().iter().filter(|u| !u.is_blank()).count() as u64;
    let bar = ProgressBar::new(pending);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar.set_message("revising...");

    let summary = if dry_run {
        println!("{}", "Dry run: the model is not called.".yellow());
        run_revision(&mut document, instruction, Passthrough, bar, context_units, &mut change_log)?
    } else {
        let api_key = api_key.ok_or(
            "no API key: pass --api-key or set OPENAI_API_KEY (or use --dry-run)",
        )?;
        let generator = ChatGenerator::new(api_base, api_key, model, config.temperature);
        run_revision(&mut document, instruction, generator, bar, context_units, &mut change_log)?
    };

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{stem}_revised.json"))
    });
    document.save(&output)?;

    print_summary(&summary);
    println!("\n{} {}", "💾 Saved:".green(), output.display());
    println!("{} {}", "📝 Change log:".green(), change_log.path().display());

    Ok(())
}

fn run_revision<G: TextGenerator>(
    document: &mut Document,
    instruction: &str,
    generator: G,
    bar: ProgressBar,
    context_units: usize,
    change_log: &mut ChangeLog,
) -> Result<RevisionSummary, redraft::Error> {
    let generator = WithProgress {
        inner: generator,
        bar,
    };
    let summary = Redraft::new()
        .with_context_units(context_units)
        .with_sink(change_log)
        .revise_document(document, instruction, &generator)?;
    generator.bar.finish_with_message("done");
    Ok(summary)
}

fn print_summary(summary: &RevisionSummary) {
    println!("\n{}", "Revision Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Modified".bold(), summary.modified());
    println!("{}: {}", "Unchanged".bold(), summary.unchanged());
    if summary.reverted() > 0 {
        println!(
            "{}: {}",
            "Reverted (media)".bold().yellow(),
            summary.reverted()
        );
    }
    if summary.failed() > 0 {
        println!("{}: {}", "Failed".bold().red(), summary.failed());
        for report in &summary.reports {
            if let UnitOutcome::Failed(message) = &report.outcome {
                println!("  {} {}: {}", "✗".red(), report.label, message);
            }
        }
    }
    println!("{}: {}", "Skipped (blank)".bold(), summary.skipped());
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let document = Document::open(input)?;

    let language = document
        .metadata
        .language
        .clone()
        .or_else(|| lang::detect(&document.sample_text(10)).map(str::to_string));

    if json {
        let text = document.plain_text();
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "format": document.format_name(),
            "units": document.unit_count(),
            "words": text.split_whitespace().count(),
            "characters": text.chars().count(),
            "drawings": document.media_count(),
            "language": language,
            "metadata": document.metadata,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), document.format_name());
    println!("{}: {}", "Units".bold(), document.unit_count());

    if let Some(ref title) = document.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = document.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref modified) = document.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    if let Some(code) = language {
        println!("{}: {}", "Language".bold(), lang::language_name(&code));
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = document.plain_text();
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());
    println!("{}: {}", "Drawings".bold(), document.media_count());

    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let document = Document::open(input)?;
    let text = document.plain_text();

    match output {
        Some(path) => {
            std::fs::write(path, &text)?;
            println!("{} {}", "✓ Written:".green(), path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}
