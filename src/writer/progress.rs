//! Progress reporting for the tree writer

use std::io;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::document::SkipReason;

use super::WriteReport;

/// Callback for writer progress - receives each action as it happens.
///
/// All methods default to doing nothing.
pub trait WriteProgress {
    fn directory_created(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn file_written(&mut self, _path: &Path, _bytes: usize) -> io::Result<()> {
        Ok(())
    }

    fn entry_skipped(
        &mut self,
        _index: usize,
        _name: Option<&str>,
        _reason: &SkipReason,
    ) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, _report: &WriteReport) -> io::Result<()> {
        Ok(())
    }
}

/// Discards all progress.
pub struct SilentProgress;

impl WriteProgress for SilentProgress {}

/// Human-readable progress log, one line per action.
pub struct ConsoleProgress<W: WriteColor> {
    out: W,
}

impl ConsoleProgress<StandardStream> {
    pub fn stdout(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_tagged(&mut self, tag: &str, color: Color, text: &str) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.out, "{:>8}", tag)?;
        self.out.reset()?;
        writeln!(self.out, " {}", text)
    }
}

impl<W: WriteColor> WriteProgress for ConsoleProgress<W> {
    fn directory_created(&mut self, path: &Path) -> io::Result<()> {
        self.write_tagged("created", Color::Blue, &format!("{}/", path.display()))
    }

    fn file_written(&mut self, path: &Path, bytes: usize) -> io::Result<()> {
        self.write_tagged(
            "wrote",
            Color::Green,
            &format!("{} ({} bytes)", path.display(), bytes),
        )
    }

    fn entry_skipped(
        &mut self,
        index: usize,
        name: Option<&str>,
        reason: &SkipReason,
    ) -> io::Result<()> {
        let label = match name {
            Some(name) => format!("entry {} ({}): {}", index, name, reason),
            None => format!("entry {}: {}", index, reason),
        };
        self.write_tagged("skipped", Color::Yellow, &label)
    }

    fn finish(&mut self, report: &WriteReport) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{} files written, {} directories created, {} entries skipped",
            report.written.len(),
            report.created_dirs.len(),
            report.skipped.len()
        )?;
        self.out.flush()
    }
}
