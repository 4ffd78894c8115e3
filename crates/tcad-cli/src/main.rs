//! tcad: strict English prompts in, STL out

use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tcad_core::{CadConfig, ExportFormat, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Binary,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Ascii => ExportFormat::StlAscii,
            Format::Binary => ExportFormat::StlBinary,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tcad",
    version,
    about = "Build simple solids from prompts like 'cube 20mm' and export them as STL"
)]
struct Cli {
    /// Prompts to apply in order (read from stdin when none are given)
    prompts: Vec<String>,

    /// File with one prompt per line; blank lines and '#' comments are skipped
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Write the exported mesh here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// STL flavor for --output
    #[arg(short, long, value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Solid name written to ASCII STL
    #[arg(long)]
    name: Option<String>,

    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the model as JSON after all prompts
    #[arg(long)]
    dump_ir: bool,

    /// Resume from a saved session
    #[arg(long)]
    load: Option<PathBuf>,

    /// Save the session when done
    #[arg(long)]
    save: Option<PathBuf>,
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tcad_cli=info,tcad_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Keep prompt lines, dropping blanks and `#` comments
fn prompt_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn read_script(path: &Path) -> Result<Vec<String>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    Ok(prompt_lines(content.lines()))
}

fn read_stdin() -> Result<Vec<String>, String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }
    let lines = stdin
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("failed to read stdin: {e}"))?;
    Ok(prompt_lines(lines))
}

fn collect_prompts(cli: &Cli) -> Result<Vec<String>, String> {
    let mut prompts = Vec::new();
    if let Some(path) = &cli.script {
        prompts.extend(read_script(path)?);
    }
    prompts.extend(prompt_lines(&cli.prompts));
    if cli.script.is_none() && cli.prompts.is_empty() {
        prompts.extend(read_stdin()?);
    }
    Ok(prompts)
}

fn open_session(cli: &Cli) -> Result<Session, String> {
    let mut config = match &cli.config {
        Some(path) => CadConfig::load(path).map_err(|e| e.to_string())?,
        None => CadConfig::default(),
    };
    if let Some(name) = &cli.name {
        config.solid_name = name.clone();
    }

    let session = match &cli.load {
        Some(path) => Session::load(path, config),
        None => Session::with_config(config),
    };
    session.map_err(|e| e.to_string())
}

/// Run every prompt, then emit outputs. Returns the number of failures.
fn run(cli: &Cli) -> Result<usize, String> {
    let mut session = open_session(cli)?;
    let prompts = collect_prompts(cli)?;
    tracing::info!(count = prompts.len(), "Processing prompts");

    let mut failures = 0;
    for prompt in &prompts {
        if let Err(e) = session.submit(prompt) {
            eprintln!("error: {e}");
            failures += 1;
        }
    }

    if cli.dump_ir {
        let json = session.model().to_json().map_err(|e| e.to_string())?;
        println!("{json}");
    }

    if let Some(path) = &cli.output {
        match session.export(cli.format.into()) {
            Ok(bytes) => {
                std::fs::write(path, &bytes)
                    .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
                tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote STL");
            }
            Err(e) => {
                eprintln!("error: {e}");
                failures += 1;
            }
        }
    }

    if let Some(path) = &cli.save {
        session.save(path).map_err(|e| e.to_string())?;
        tracing::info!(path = %path.display(), "Saved session");
    }

    Ok(failures)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            tracing::warn!(failures, "Some prompts failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
