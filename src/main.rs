use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use srcview::config::Config;
use srcview::primitives::token::{Token, TokenStyle};
use srcview::services::tracing_setup;
use srcview::state::{ContentKind, ViewState};
use srcview::view::paint::PaintPlan;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Tokenize a source file or disassembly listing and lay it out
#[derive(Parser, Debug)]
#[command(name = "srcview")]
#[command(about = "Read-only source and disassembly viewer core", long_about = None)]
#[command(version)]
struct Args {
    /// File to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// How to tokenize the file (default: guessed from the extension)
    #[arg(long, value_enum)]
    kind: Option<ContentKind>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: stderr)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// First visible line (0-based)
    #[arg(long, value_name = "LINE")]
    top: Option<usize>,

    /// Also print the paint plan of the visible viewport
    #[arg(long)]
    paint: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    tokens: &'a [Token],
    #[serde(skip_serializing_if = "Option::is_none")]
    paint: Option<PaintPlan>,
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::load_or_default()),
    }
}

fn style_label(style: TokenStyle) -> String {
    if style.is_empty() {
        return "-".to_string();
    }
    let mut parts = Vec::new();
    if style.contains(TokenStyle::BOLD) {
        parts.push("bold");
    }
    if style.contains(TokenStyle::ITALIC) {
        parts.push("italic");
    }
    parts.join("|")
}

fn write_tokens_text(out: &mut impl Write, state: &ViewState) -> io::Result<()> {
    for token in state.tokens() {
        let snippet = state.buffer().text_lossy(token.range());
        writeln!(
            out,
            "{}..{} {} {} '{}'",
            token.start,
            token.end(),
            token.class.name(),
            style_label(token.style),
            snippet.escape_debug()
        )?;
    }
    Ok(())
}

fn write_paint_text(out: &mut impl Write, state: &ViewState, plan: &PaintPlan) -> io::Result<()> {
    writeln!(out, "--- paint (top line {}) ---", state.top_line())?;
    for line in &plan.lines {
        let label = line.number_label.as_deref().unwrap_or("");
        write!(out, "{:>6} y={}", label, line.y)?;
        if let Some(sel) = line.selection {
            write!(out, " selection={}+{}", sel.x, sel.width)?;
        }
        writeln!(out)?;
        for run in &line.runs {
            let text = state.buffer().text_lossy(run.range.clone());
            writeln!(
                out,
                "       x={} w={} {} {} '{}'",
                run.x,
                run.width,
                run.class.name(),
                run.color.to_hex(),
                text.escape_debug()
            )?;
        }
    }
    if let Some(caret) = plan.caret {
        writeln!(out, "caret x={} y={} h={}", caret.x, caret.y, caret.height)?;
    }
    Ok(())
}

fn run(args: &Args) -> AnyhowResult<()> {
    let config = load_config(args)?;
    let content = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let kind = args
        .kind
        .unwrap_or_else(|| ContentKind::from_path(&args.file));

    let mut state = ViewState::new(&config);
    state.resize(args.width, args.height);
    state.set_content(content, kind);
    if let Some(top) = args.top {
        state.set_top_line(top);
    }
    tracing::info!(
        file = %args.file.display(),
        ?kind,
        tokens = state.tokens().len(),
        "file tokenized"
    );

    let plan = args.paint.then(|| state.paint_viewport());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match args.format {
        OutputFormat::Json => {
            let output = JsonOutput {
                tokens: state.tokens(),
                paint: plan,
            };
            serde_json::to_writer_pretty(&mut out, &output)
                .context("Failed to write JSON output")?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            write_tokens_text(&mut out, &state)?;
            if let Some(plan) = &plan {
                write_paint_text(&mut out, &state, plan)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();
    tracing_setup::init_global(args.log_file.as_deref()).context("Failed to open log file")?;
    run(&args)
}
