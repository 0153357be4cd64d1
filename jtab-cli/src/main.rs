//! jtab CLI - Table views over JSON documents
//!
//! This binary provides command-line interfaces for:
//! - view: render an array inside a document as an aligned table
//! - export: serialize the projection as tab-separated text
//! - fetch: load a remote document and render it
//! - inspect: pretty-print the loaded document
//! - serve: run the CORS relay

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use jtab_core::{canonical_text, classify, JtabError, RenderMode};
use jtab_engine::SortDirection;
use jtab_relay::{fetch_json, start_relay_server, RelayConfig};
use jtab_session::DocumentSession;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "jtab")]
#[command(about = "Project arrays nested inside JSON documents as tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document's array as a table
    ///
    /// Examples:
    ///   jtab view data.json --path results.items
    ///   jtab view data.json --search error --sort time --desc
    ///   cat data.json | jtab view -
    View {
        /// Input file, or `-` for stdin
        input: PathBuf,
        /// Dotted path to the array inside the document
        #[arg(long, default_value = "")]
        path: String,
        /// Keep only rows with a cell containing this text (case-insensitive)
        #[arg(long, default_value = "")]
        search: String,
        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Output format (table, tsv, json)
        #[arg(long, value_enum, default_value_t = ViewFormat::Table)]
        format: ViewFormat,
    },
    /// Export the projection as tab-separated text
    Export {
        /// Input file, or `-` for stdin
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Dotted path to the array inside the document
        #[arg(long, default_value = "")]
        path: String,
        /// Keep only rows with a cell containing this text (case-insensitive)
        #[arg(long, default_value = "")]
        search: String,
        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Fetch a remote JSON document and render it
    ///
    /// Examples:
    ///   jtab fetch https://example.com/data.json --path results
    ///   jtab fetch https://example.com/data.json --progress --format tsv
    Fetch {
        /// Absolute http(s) URL of the document
        url: String,
        /// Dotted path to the array inside the document
        #[arg(long, default_value = "")]
        path: String,
        /// Keep only rows with a cell containing this text (case-insensitive)
        #[arg(long, default_value = "")]
        search: String,
        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Output format (table, tsv, json)
        #[arg(long, value_enum, default_value_t = ViewFormat::Table)]
        format: ViewFormat,
        /// Show a progress spinner while fetching
        #[arg(long)]
        progress: bool,
    },
    /// Pretty-print the whole document
    Inspect {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
    /// Run the CORS relay server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ViewFormat {
    Table,
    Tsv,
    Json,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            input,
            path,
            search,
            sort,
            desc,
            format,
        } => {
            let session = load_session(&input, &path, &search, sort.as_deref(), desc)?;
            render_projection(&session, format)?;
        }
        Commands::Export {
            input,
            output,
            path,
            search,
            sort,
            desc,
        } => {
            let session = load_session(&input, &path, &search, sort.as_deref(), desc)?;
            handle_export(&session, output.as_deref())?;
        }
        Commands::Fetch {
            url,
            path,
            search,
            sort,
            desc,
            format,
            progress,
        } => {
            handle_fetch(&url, &path, &search, sort.as_deref(), desc, format, progress)?;
        }
        Commands::Inspect { input } => {
            handle_inspect(&input)?;
        }
        Commands::Serve { bind, port } => {
            handle_serve(bind, port)?;
        }
    }

    Ok(())
}

/// Read the input, load it into a session, and apply the view state.
fn load_session(
    input: &Path,
    path: &str,
    search: &str,
    sort: Option<&str>,
    desc: bool,
) -> Result<DocumentSession, Box<dyn Error>> {
    let text = read_input(input)?;
    let mut session = DocumentSession::new();
    session.load_text(&text)?;
    apply_view_state(&mut session, path, search, sort, desc);
    Ok(session)
}

fn read_input(input: &Path) -> Result<String, Box<dyn Error>> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn apply_view_state(
    session: &mut DocumentSession,
    path: &str,
    search: &str,
    sort: Option<&str>,
    desc: bool,
) {
    session.set_path(path);
    session.set_search_term(search);
    if let Some(column) = sort {
        session.toggle_sort(column);
        if desc {
            session.toggle_sort(column);
        }
    }
}

fn render_projection(session: &DocumentSession, format: ViewFormat) -> Result<(), Box<dyn Error>> {
    if let Err(err) = session.project() {
        report_suggestions(session, &err);
        return Err(err.into());
    }

    let mut stdout = std::io::stdout().lock();
    match format {
        ViewFormat::Table => print_table(&mut stdout, session)?,
        ViewFormat::Tsv => writeln!(stdout, "{}", session.export_tsv()?)?,
        ViewFormat::Json => {
            let rows = session.project()?;
            let values: Vec<&Value> = rows.iter().map(|row| &row.value).collect();
            writeln!(stdout, "{}", serde_json::to_string_pretty(&values)?)?;
        }
    }
    Ok(())
}

/// When the path points at nothing tabular inside an object document, the
/// root keys are the likely fixes. Mirror them onto stderr.
fn report_suggestions(session: &DocumentSession, err: &JtabError) {
    if !matches!(err, JtabError::PathNotFound(_) | JtabError::NotAnArray) {
        return;
    }
    let suggestions = session.path_suggestions();
    if !suggestions.is_empty() {
        eprintln!("Array property suggestions: {}", suggestions.join(", "));
    }
}

fn print_table(writer: &mut dyn Write, session: &DocumentSession) -> Result<(), Box<dyn Error>> {
    let columns = session.columns()?;
    let rows = session.project()?;
    let sort = session.sort();

    // Header labels carry the sort indicator the way the column headers do.
    let labels: Vec<String> = columns
        .iter()
        .map(|column| {
            if sort.key.as_deref() == Some(column.as_str()) {
                let arrow = match sort.direction {
                    SortDirection::Ascending => "▲",
                    SortDirection::Descending => "▼",
                };
                format!("{} {}", column, arrow)
            } else {
                column.clone()
            }
        })
        .collect();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| display_cell(row.cell(column)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = labels.iter().map(|label| label.chars().count()).collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    write_table_row(writer, &labels, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_table_row(writer, &rule, &widths)?;
    for row in &cells {
        write_table_row(writer, row, &widths)?;
    }

    writeln!(
        writer,
        "Showing {} row{}",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" }
    )?;
    Ok(())
}

fn write_table_row(
    writer: &mut dyn Write,
    cells: &[String],
    widths: &[usize],
) -> Result<(), Box<dyn Error>> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}

/// Flatten one cell onto a single table line, dispatching on its render
/// mode: structured values show as compact JSON, text passes through with
/// delimiters folded (markup stays raw; the terminal is its own formatter).
fn display_cell(value: Option<&Value>) -> String {
    match classify(value) {
        RenderMode::Structured => match value {
            Some(structured) => serde_json::to_string(structured)
                .unwrap_or_else(|_| canonical_text(value)),
            None => canonical_text(value),
        },
        RenderMode::MarkupText | RenderMode::PlainText => {
            canonical_text(value).replace('\t', " ").replace('\n', " ")
        }
    }
}

fn handle_export(session: &DocumentSession, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    if let Err(err) = session.project() {
        report_suggestions(session, &err);
        return Err(err.into());
    }
    let tsv = session.export_tsv()?;
    let row_count = session.project()?.len();

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", tsv))?;
            let mut stderr = std::io::stderr().lock();
            writeln!(
                &mut stderr,
                "Exported {} row{} to {}",
                row_count,
                if row_count == 1 { "" } else { "s" },
                path.display()
            )?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", tsv)?;
        }
    }
    Ok(())
}

fn handle_fetch(
    url: &str,
    path: &str,
    search: &str,
    sort: Option<&str>,
    desc: bool,
    format: ViewFormat,
    progress: bool,
) -> Result<(), Box<dyn Error>> {
    init_tracing();
    let runtime = tokio::runtime::Runtime::new()?;
    let config = RelayConfig::default();

    let mut spinner = progress.then(|| create_spinner("Fetching document"));
    let fetched = runtime.block_on(fetch_json(url, &config));
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }

    let mut session = DocumentSession::new();
    session.load_value(fetched?);
    apply_view_state(&mut session, path, search, sort, desc);
    render_projection(&session, format)
}

fn handle_inspect(input: &Path) -> Result<(), Box<dyn Error>> {
    let text = read_input(input)?;
    let mut session = DocumentSession::new();
    session.load_text(&text)?;
    let mut stdout = std::io::stdout().lock();
    if let Some(pretty) = session.document_text() {
        writeln!(stdout, "{}", pretty)?;
    }
    Ok(())
}

fn handle_serve(bind: String, port: u16) -> Result<(), Box<dyn Error>> {
    init_tracing();
    let config = RelayConfig {
        bind_address: bind,
        port,
        ..RelayConfig::default()
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(start_relay_server(config))
        .map_err(|e| -> Box<dyn Error> { e.to_string().into() })?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
