use crate::refactoring::RefactoringReport;
use colored::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &RefactoringReport) -> anyhow::Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &RefactoringReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_summary(&mut self, report: &RefactoringReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "# Refactoring Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Files | {} |", summary.files)?;
        writeln!(self.writer, "| Methods | {} |", summary.methods)?;
        writeln!(self.writer, "| Attempted | {} |", summary.attempted)?;
        writeln!(self.writer, "| Resolved | {} |", summary.resolved)?;
        writeln!(self.writer, "| Failed | {} |", summary.failed)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_failures(&mut self, report: &RefactoringReport) -> anyhow::Result<()> {
        if !report.has_failures() {
            writeln!(self.writer, "All attempted refactorings were applied.")?;
            return Ok(());
        }

        writeln!(self.writer, "## Failed Refactorings")?;
        let mut current_smell = None;
        for (smell, path, methods) in report.failures.iter() {
            if current_smell != Some(smell) {
                writeln!(self.writer)?;
                writeln!(self.writer, "### {}", smell)?;
                writeln!(self.writer)?;
                current_smell = Some(smell);
            }
            for method in methods {
                writeln!(self.writer, "- `{}` in `{}`", method.name, path.display())?;
            }
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &RefactoringReport) -> anyhow::Result<()> {
        self.write_summary(report)?;
        self.write_failures(report)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &RefactoringReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "{}", "Refactoring Report".bold().blue())?;
        writeln!(
            self.writer,
            "  {} files, {} methods, {} attempted",
            summary.files, summary.methods, summary.attempted
        )?;
        writeln!(
            self.writer,
            "  {} {}   {} {}",
            "resolved:".green(),
            summary.resolved,
            "failed:".red(),
            summary.failed
        )?;

        for (smell, path, methods) in report.failures.iter() {
            writeln!(self.writer)?;
            writeln!(self.writer, "{} {}", smell.yellow().bold(), path.display())?;
            for method in methods {
                writeln!(self.writer, "  {} {}", "✗".red(), method.name)?;
            }
        }
        Ok(())
    }
}
