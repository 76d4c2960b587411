//! Command-line front end for the chart-of-accounts validator.
//!
//! Usage:
//!   coa-validator `<path>` [--text] [--log `<file>` | --save-log] [--json] [--details]

use anyhow::{Context, Result};
use clap::Parser;
use coa_validator::config::{AppConfig, Loader};
use coa_validator::core::layout::{ProcessingReport, ProcessingSummary};
use coa_validator::core::pdf_parser::{ExtractionError, LopdfExtractor, PageSource, TextPages};
use coa_validator::core::writer::{fatal_reason_text, TextLogWriter, Writer};
use coa_validator::utils::document_processor::DocumentProcessor;
use coa_validator::ProcessingResult;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const EXIT_NON_FATAL: u8 = 1;
const EXIT_FATAL: u8 = 2;
const EXIT_USAGE: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "coa-validator", version, about = "Validador de Plano de Contas")]
struct Cli {
    /// PDF report to validate (or a text dump with --text)
    path: PathBuf,

    /// Treat the input as pre-extracted text, pages separated by form feed
    #[arg(long)]
    text: bool,

    /// Export the error log to this file
    #[arg(long, value_name = "FILE", conflicts_with = "save_log")]
    log: Option<PathBuf>,

    /// Export the error log using the configured default file name
    #[arg(long)]
    save_log: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print every error record
    #[arg(long)]
    details: bool,

    /// Extra TOML configuration layered over the defaults
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override grammar.glued_token_max_len
    #[arg(long, value_name = "N")]
    glued_max_len: Option<u32>,

    /// Do not print per-page progress
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Erro: {:#}", e);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if let Some(max_len) = cli.glued_max_len {
        loader = loader.with_glued_token_max_len(max_len)?;
    }
    loader.build().context("Falha ao carregar a configuração")
}

fn open_source(path: &Path, text: bool) -> Result<Box<dyn PageSource>, ExtractionError> {
    if text {
        Ok(Box::new(TextPages::open(path)?))
    } else {
        Ok(Box::new(LopdfExtractor::open(path)?))
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let processor = DocumentProcessor::from_config(&config);
    let show_progress = config.progress.enabled && !cli.quiet && !cli.json;

    let report = match open_source(&cli.path, cli.text) {
        Ok(source) => {
            let report = processor.process_with_progress(&*source, |progress| {
                if show_progress {
                    eprintln!("{}", progress.message());
                }
            });
            if show_progress {
                eprintln!("Processamento concluído.");
            }
            report
        }
        Err(e) => {
            log::error!("Failed to open {}: {}", cli.path.display(), e);
            ProcessingReport {
                result: ProcessingResult::extraction_failure(None, e.to_string()),
                summary: ProcessingSummary::default(),
            }
        }
    };

    print_outcome(cli, &report)?;
    let result = report.result;

    export_log(cli, &config, &result)?;

    Ok(match result {
        ProcessingResult::Success => ExitCode::SUCCESS,
        ProcessingResult::NonFatal { .. } => ExitCode::from(EXIT_NON_FATAL),
        ProcessingResult::Fatal { .. } => ExitCode::from(EXIT_FATAL),
    })
}

fn print_outcome(cli: &Cli, report: &ProcessingReport) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match &report.result {
        ProcessingResult::Success => {
            println!("Todas as linhas possuem código e descrição conforme o esperado.");
        }
        ProcessingResult::NonFatal { records } => {
            println!("Foram encontrados {} erros não fatais (tokens grudados).", records.len());
        }
        ProcessingResult::Fatal { record, non_fatal } => {
            println!("{}", fatal_reason_text(record));
            if !non_fatal.is_empty() {
                println!("Antes da interrupção foram encontrados {} erros não fatais.", non_fatal.len());
            }
        }
    }

    let records = report.result.non_fatal_records();
    if cli.details && !records.is_empty() {
        println!("\nForam encontrados os seguintes erros:\n");
        for record in records {
            println!(
                "Página {}, Linha {}: {}\n Motivo: {}\n",
                record.page.unwrap_or_default(),
                record.line.unwrap_or_default(),
                record.content,
                record.message
            );
        }
    }
    Ok(())
}

fn export_log(cli: &Cli, config: &AppConfig, result: &ProcessingResult) -> Result<()> {
    let target = match (&cli.log, cli.save_log) {
        (Some(path), _) => path.clone(),
        (None, true) => config.report.file_name_at(chrono::Local::now()),
        (None, false) => return Ok(()),
    };

    if !result.has_records() {
        eprintln!("Nenhum erro para exportar.");
        return Ok(());
    }

    TextLogWriter
        .write_report(result, &target)
        .with_context(|| format!("Falha ao salvar {}", target.display()))?;
    eprintln!("Log de erros salvo em {}.", target.display());
    Ok(())
}
