use crate::core::report::ReportLine;
use crossterm::style::Stylize;
use log::debug;
use std::io::{self, IsTerminal, Write};

pub struct ConsoleWriter<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleWriter<io::Stdout> {
    /// Writes to stdout, colouring only when it is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self::new(out, color)
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn write_lines(&mut self, lines: &[ReportLine]) -> anyhow::Result<()> {
        debug!("Writing {} report lines", lines.len());
        for line in lines {
            self.write_line(line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn write_line(&mut self, line: &ReportLine) -> anyhow::Result<()> {
        let text = line.to_string();
        if !self.color {
            writeln!(self.out, "{}", text)?;
            return Ok(());
        }

        match line {
            ReportLine::Heading(_) => writeln!(self.out, "{}", text.green().bold())?,
            ReportLine::NotFound(_) | ReportLine::Failed { .. } => {
                writeln!(self.out, "{}", text.red())?
            }
            ReportLine::Protected(_) => writeln!(self.out, "{}", text.yellow())?,
            ReportLine::Separator => writeln!(self.out, "{}", text.dim())?,
            ReportLine::Deleted(_) => writeln!(self.out, "{}", text)?,
        }
        Ok(())
    }

    /// Plain message outside the report structure.
    pub fn message(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_output() {
        let mut writer = ConsoleWriter::new(Vec::new(), false);
        writer
            .write_lines(&[
                ReportLine::Heading("a.cfg".to_string()),
                ReportLine::Deleted(PathBuf::from("/r/a.cfg")),
                ReportLine::Separator,
                ReportLine::NotFound("b.cfg".to_string()),
            ])
            .unwrap();

        let printed = String::from_utf8(writer.out).unwrap();
        assert_eq!(
            printed,
            "a.cfg file paths:\n/r/a.cfg\n==========\nNo file matching b.cfg found\n"
        );
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let mut writer = ConsoleWriter::new(Vec::new(), true);
        writer
            .write_line(&ReportLine::NotFound("b.cfg".to_string()))
            .unwrap();

        let printed = String::from_utf8(writer.out).unwrap();
        assert!(printed.contains("No file matching b.cfg found"));
    }
}
