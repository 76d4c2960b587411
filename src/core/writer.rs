use crate::{ErrorRecord, ProcessingResult, ReasonCode};
use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

const TITLE: &str = "Log de Erros da Validação do PDF";
const FATAL_HEADER: &str = "[ERRO FATAL ENCONTRADO]";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nenhum erro para exportar")]
    NothingToExport,

    #[error("Falha ao gravar o log de erros: {0}")]
    Io(#[from] std::io::Error),

    #[error("Falha ao montar o log de erros")]
    Format(#[from] fmt::Error),
}

/// Writer is responsible for persisting the error log of a validation run
pub trait Writer {
    /// Render `result` and write it to `out_path`, replacing any existing file.
    fn write_report<P: AsRef<Path>>(&self, result: &ProcessingResult, out_path: P) -> Result<(), ExportError>;
}

/// Plain-text error log in the layout the accounting team already reads.
pub struct TextLogWriter;

impl Writer for TextLogWriter {
    fn write_report<P: AsRef<Path>>(&self, result: &ProcessingResult, out_path: P) -> Result<(), ExportError> {
        let rendered = render_report(result)?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(out_path.as_ref())?;
        file.write_all(rendered.as_bytes())?;

        log::info!("Saved error log to file: {}", out_path.as_ref().display());
        Ok(())
    }
}

/// Description of the record that halted the run.
pub fn fatal_reason_text(record: &ErrorRecord) -> String {
    if record.reason == ReasonCode::ExtractionFailure {
        return match record.page {
            Some(page) => format!(
                "[FALHA NA EXTRAÇÃO] Erro ao ler o PDF (página {}): {}",
                page, record.message
            ),
            None => format!("[FALHA NA EXTRAÇÃO] Erro ao ler o PDF: {}", record.message),
        };
    }

    format!(
        "Erro fatal na página {}, linha {}: '{}'\nMotivo: {}",
        display_position(record.page),
        display_position(record.line),
        record.content,
        record.message
    )
}

/// Render the log, refusing when the run produced no records at all.
pub fn render_report(result: &ProcessingResult) -> Result<String, ExportError> {
    if !result.has_records() {
        return Err(ExportError::NothingToExport);
    }

    let mut out = String::new();
    write_sections(&mut out, result)?;
    Ok(out)
}

fn write_sections(out: &mut String, result: &ProcessingResult) -> fmt::Result {
    writeln!(out, "{}", TITLE)?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out)?;

    if let Some(record) = result.fatal_record() {
        writeln!(out, "{}", FATAL_HEADER)?;
        writeln!(out, "{}", "-".repeat(25))?;
        writeln!(out, "{}", fatal_reason_text(record))?;
        writeln!(out)?;
    }

    let non_fatal = result.non_fatal_records();
    if !non_fatal.is_empty() {
        writeln!(
            out,
            "[ERROS NÃO FATAIS (Tokens Grudados) - {} encontrados]",
            non_fatal.len()
        )?;
        writeln!(out, "{}", "-".repeat(45))?;
        for record in non_fatal {
            writeln!(
                out,
                "Página: {}, Linha Aprox.: {}",
                display_position(record.page),
                display_position(record.line)
            )?;
            writeln!(out, "  Conteúdo: {}", record.content)?;
            writeln!(out, "  Motivo: {}", record.message)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn display_position(value: Option<usize>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}
