//! Streaming output formatter
//!
//! This module provides `StreamingFormatter` which writes each tree line as
//! soon as the walker produces it, for use with `TreeWalker`.

use std::io::{self, Write};
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::stats::Counters;
use crate::style::LineStyle;
use crate::tree::{TreeLine, TreeOutput};

use super::config::OutputConfig;

/// Streaming output formatter - writes straight to stdout (or any
/// `WriteColor`) without buffering the tree.
pub struct StreamingFormatter<W: WriteColor = StandardStream> {
    config: OutputConfig,
    out: W,
}

impl StreamingFormatter<StandardStream> {
    /// The color decision is already made by the caller, so termcolor's own
    /// detection is bypassed.
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            config,
            out: StandardStream::stdout(choice),
        }
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    /// Format into an arbitrary writer, e.g. `termcolor::NoColor<Vec<u8>>`.
    pub fn with_writer(config: OutputConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_styled(&mut self, text: &str, style: LineStyle) -> io::Result<()> {
        if !self.config.use_color || style.is_plain() {
            return write!(self.out, "{}", text);
        }
        self.out.set_color(&style.color_spec())?;
        write!(self.out, "{}", text)?;
        self.out.reset()
    }
}

impl<W: WriteColor> TreeOutput for StreamingFormatter<W> {
    fn output_line(&mut self, line: &TreeLine) -> io::Result<()> {
        if !line.prefix.is_empty() {
            self.write_styled(&line.prefix, LineStyle::Branch)?;
        }
        self.write_styled(&line.name, line.style)?;

        if let Some(link) = &line.link {
            self.write_styled(" ->", LineStyle::Branch)?;
            if let Some(target) = &link.target {
                write!(self.out, " ")?;
                self.write_styled(target, link.style)?;
            }
        }

        if let Some(marker) = line.marker {
            write!(self.out, " ")?;
            self.write_styled(marker.text(), LineStyle::Warning)?;
        }
        writeln!(self.out)
    }

    fn finish(&mut self, counters: &Counters) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", counters.summary_line())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Marker;
    use termcolor::{Ansi, NoColor};

    fn plain() -> StreamingFormatter<NoColor<Vec<u8>>> {
        StreamingFormatter::with_writer(OutputConfig { use_color: false }, NoColor::new(Vec::new()))
    }

    fn text<W: WriteColor>(formatter: StreamingFormatter<W>, f: impl FnOnce(W) -> Vec<u8>) -> String {
        String::from_utf8(f(formatter.into_inner())).unwrap()
    }

    #[test]
    fn test_plain_lines_match_display() {
        let mut formatter = plain();
        let line = TreeLine::new(2, "|   +---".into(), "link".into(), LineStyle::Symlink)
            .with_link(Some("target".into()), LineStyle::Plain);
        formatter.output_line(&line).unwrap();

        let out = text(formatter, NoColor::into_inner);
        assert_eq!(out, format!("{}\n", line));
    }

    #[test]
    fn test_marker_written_after_name() {
        let mut formatter = plain();
        let line = TreeLine::new(1, "+---".into(), "loop".into(), LineStyle::Symlink)
            .with_link(Some(".".into()), LineStyle::Directory)
            .with_marker(Marker::RecursiveLink);
        formatter.output_line(&line).unwrap();

        let out = text(formatter, NoColor::into_inner);
        assert_eq!(out, "+---loop -> . [recursive, not followed]\n");
    }

    #[test]
    fn test_finish_prints_blank_line_and_summary() {
        let mut formatter = plain();
        let mut counters = Counters::new();
        counters.increment_directories();
        counters.increment_files();
        counters.increment_files();
        formatter.finish(&counters).unwrap();

        let out = text(formatter, NoColor::into_inner);
        assert_eq!(out, "\n1 directory, 2 files\n");
    }

    #[test]
    fn test_color_escapes_only_when_enabled() {
        let line = TreeLine::new(1, "+---".into(), "run.sh".into(), LineStyle::Executable);

        let mut colored =
            StreamingFormatter::with_writer(OutputConfig { use_color: true }, Ansi::new(Vec::new()));
        colored.output_line(&line).unwrap();
        let out = text(colored, Ansi::into_inner);
        assert!(out.contains("\x1b["));
        assert!(out.contains("run.sh"));

        let mut uncolored =
            StreamingFormatter::with_writer(OutputConfig { use_color: false }, Ansi::new(Vec::new()));
        uncolored.output_line(&line).unwrap();
        let out = text(uncolored, Ansi::into_inner);
        assert_eq!(out, "+---run.sh\n");
    }
}
