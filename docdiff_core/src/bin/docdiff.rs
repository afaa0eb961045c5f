use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use docdiff_core::export::{render_html, ExportOptions};
use docdiff_core::extract::{default_registry, ExtractionService};
use docdiff_core::navigation::CollapsedState;
use docdiff_core::raster::{compare_image_files, PixelDiffOptions};
use docdiff_core::similarity::paragraph_similarities;
use docdiff_core::view::{placeholder_label, split_rows, unified_rows, SideRow, ViewMode, ViewRow};
use docdiff_core::{DiffDocument, DiffLine, DiffOptions, Formatter, LineKind, PairingStrategy};

#[derive(Parser)]
#[command(name = "docdiff", about = "Compare Markdown, text and PDF documents", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Line and word diff of two documents.
    Text(TextArgs),
    /// Pixel diff of two rendered page images.
    Pixels(PixelArgs),
    /// Paragraph similarity of two documents.
    Similarity(SimilarityArgs),
}

#[derive(clap::Args)]
struct TextArgs {
    /// Original document.
    old: Utf8PathBuf,
    /// Modified document.
    new: Utf8PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = TextFormat::Unified)]
    format: TextFormat,
    /// Side-by-side layout.
    #[arg(long)]
    split: bool,
    /// Unchanged lines kept around each change.
    #[arg(long, value_name = "N")]
    context: Option<usize>,
    /// Pair every line of a replaced block, not only the block boundary.
    #[arg(long)]
    greedy: bool,
    /// Normalize whitespace even for Markdown and text.
    #[arg(long)]
    normalize: bool,
    /// TOML file with diff options.
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,
    /// Write output here instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    output: Option<Utf8PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TextFormat {
    Unified,
    Json,
    Html,
}

#[derive(clap::Args)]
struct PixelArgs {
    /// Original page image.
    old: Utf8PathBuf,
    /// Modified page image.
    new: Utf8PathBuf,
    /// Matching threshold between 0 and 1.
    #[arg(long, default_value_t = 0.1)]
    threshold: f64,
    /// Where to write the diff image (PNG).
    #[arg(long, short, value_name = "DIFF_PNG")]
    output: Option<Utf8PathBuf>,
}

#[derive(clap::Args)]
struct SimilarityArgs {
    /// Original document.
    old: Utf8PathBuf,
    /// Modified document.
    new: Utf8PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = SimilarityFormat::Text)]
    format: SimilarityFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum SimilarityFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Text(args) => run_text(&args),
        Command::Pixels(args) => run_pixels(&args),
        Command::Similarity(args) => run_similarity(&args),
    }
}

fn init_tracing(verbose: u8) {
    let base_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => "warn",
            1 => "info,docdiff_core=info,docdiff_extractors=info",
            2 => "info,docdiff_core=debug,docdiff_extractors=debug",
            _ => "debug,docdiff_core=trace,docdiff_extractors=trace",
        }
        .to_string()
    });

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run_text(args: &TextArgs) -> Result<()> {
    let mut options = match &args.config {
        Some(path) => DiffOptions::load(path.as_std_path())
            .with_context(|| format!("failed to load config {path}"))?,
        None => DiffOptions::default(),
    };
    if let Some(context) = args.context {
        options = options.with_context_lines(context);
    }
    if args.greedy {
        options = options.with_pairing(PairingStrategy::Greedy);
    }
    if args.normalize {
        options = options.with_force_normalize(true);
    }

    let service = ExtractionService::new(default_registry());
    let original = service
        .load(args.old.as_std_path())
        .with_context(|| format!("failed to load {}", args.old))?;
    let modified = service
        .load(args.new.as_std_path())
        .with_context(|| format!("failed to load {}", args.new))?;

    let document = Formatter::new(options).compare(&original, &modified);
    let view_mode = if args.split {
        ViewMode::Split
    } else {
        ViewMode::Unified
    };

    let rendered = match args.format {
        TextFormat::Json => {
            serde_json::to_string_pretty(&document).context("failed to serialize diff")?
        }
        TextFormat::Html => render_html(
            &document,
            &ExportOptions::default()
                .with_names(&original.name, &modified.name)
                .with_view_mode(view_mode),
        ),
        TextFormat::Unified => render_terminal(&document, &original.name, view_mode),
    };

    emit(&rendered, args.output.as_ref())
}

fn run_pixels(args: &PixelArgs) -> Result<()> {
    let options = PixelDiffOptions::default().with_threshold(args.threshold);
    let diff = compare_image_files(args.old.as_std_path(), args.new.as_std_path(), &options)
        .with_context(|| format!("failed to compare {} and {}", args.old, args.new))?;

    if let Some(path) = &args.output {
        diff.image
            .save(path.as_std_path())
            .with_context(|| format!("failed to write {path}"))?;
    }

    println!(
        "{}x{}: {} differing pixels ({:.2}%)",
        diff.stats.width, diff.stats.height, diff.stats.diff_pixels, diff.stats.percent_diff
    );
    Ok(())
}

fn run_similarity(args: &SimilarityArgs) -> Result<()> {
    let service = ExtractionService::new(default_registry());
    let original = service
        .load(args.old.as_std_path())
        .with_context(|| format!("failed to load {}", args.old))?;
    let modified = service
        .load(args.new.as_std_path())
        .with_context(|| format!("failed to load {}", args.new))?;

    let report = paragraph_similarities(&original.text, &modified.text);
    match args.format {
        SimilarityFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
        SimilarityFormat::Text => {
            for (position, paragraph) in report.matches.iter().enumerate() {
                println!(
                    "{:>4}  {:>5.1}%  {}",
                    position + 1,
                    paragraph.similarity * 100.0,
                    first_line(&paragraph.original)
                );
            }
            println!("overall {:.1}%", report.overall * 100.0);
        }
    }
    Ok(())
}

fn render_terminal(document: &DiffDocument, original_name: &str, view_mode: ViewMode) -> String {
    let state = CollapsedState::all_collapsed(&document.lines);
    let mut out = String::new();
    let _ = writeln!(out, "--- {original_name}");
    let _ = writeln!(out, "+++ {}", document.file_name);
    let _ = writeln!(
        out,
        "{} additions, {} deletions",
        document.summary.additions, document.summary.deletions
    );

    match view_mode {
        ViewMode::Unified => {
            for row in unified_rows(document, &state) {
                match row {
                    ViewRow::Line { line, .. } => {
                        let old = line.old_line_number().map(|n| n.to_string());
                        let new = line.new_line_number().map(|n| n.to_string());
                        let _ = writeln!(
                            out,
                            "{:>5} {:>5} {}{}",
                            old.as_deref().unwrap_or(""),
                            new.as_deref().unwrap_or(""),
                            sign(line),
                            line.content()
                        );
                    }
                    ViewRow::Collapsed { count, .. } => {
                        let _ = writeln!(out, "@@ {} @@", placeholder_label(count));
                    }
                }
            }
        }
        ViewMode::Split => {
            let view = split_rows(document, &state);
            for (title, column) in [("original", &view.left), ("modified", &view.right)] {
                let _ = writeln!(out, "== {title} ==");
                for row in column {
                    match *row {
                        SideRow::Line { number, line, .. } => {
                            let _ = writeln!(out, "{number:>5} {}{}", sign(line), line.content());
                        }
                        SideRow::Collapsed { count, .. } => {
                            let _ = writeln!(out, "@@ {} @@", placeholder_label(count));
                        }
                    }
                }
            }
        }
    }
    out
}

const fn sign(line: &DiffLine) -> char {
    match line.kind() {
        LineKind::Added => '+',
        LineKind::Removed => '-',
        LineKind::Unchanged => ' ',
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn emit(rendered: &str, output: Option<&Utf8PathBuf>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, rendered).with_context(|| format!("failed to write {path}")),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}
