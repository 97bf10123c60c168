//! Style lookup for tree lines
//!
//! Styles are picked from the entry's classification only; nothing here
//! touches the filesystem or the counters.

use termcolor::{Color, ColorSpec};

use crate::tree::{Classification, ResolvedTarget, TargetKind};

/// How a piece of a tree line should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// No decoration
    #[default]
    Plain,
    /// Indentation and connectors (dim)
    Branch,
    /// The traversal root header
    Root,
    Directory,
    Executable,
    Archive,
    /// Link name
    Symlink,
    /// Link to a directory that is listed but not descended into
    DirectoryLink,
    /// Mode 777 directory or link target
    WorldWritable,
    /// Errors, broken links, cycle markers
    Warning,
}

impl LineStyle {
    /// Style for an entry's own name.
    pub fn for_classification(class: &Classification) -> Self {
        match class {
            Classification::RegularFile { archive: true } => LineStyle::Archive,
            Classification::RegularFile { archive: false } => LineStyle::Plain,
            Classification::ExecutableFile => LineStyle::Executable,
            Classification::Directory {
                world_writable: true,
            } => LineStyle::WorldWritable,
            Classification::Directory {
                world_writable: false,
            } => LineStyle::Directory,
            Classification::Symlink(_) => LineStyle::Symlink,
        }
    }

    /// Style for the text after `->`.
    pub fn for_target(target: &ResolvedTarget) -> Self {
        if target.world_writable() {
            return LineStyle::WorldWritable;
        }
        match target.kind {
            TargetKind::Directory => LineStyle::Directory,
            TargetKind::ExecutableFile => LineStyle::Executable,
            TargetKind::Symlink => LineStyle::Symlink,
            TargetKind::RegularFile { archive: true } => LineStyle::Archive,
            TargetKind::RegularFile { archive: false } => LineStyle::Plain,
        }
    }

    /// Terminal colors for this style.
    pub fn color_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            LineStyle::Plain => {}
            LineStyle::Branch => {
                spec.set_fg(Some(Color::White)).set_dimmed(true);
            }
            LineStyle::Root | LineStyle::Directory => {
                spec.set_bold(true);
            }
            LineStyle::Executable => {
                spec.set_fg(Some(Color::Green)).set_bold(true);
            }
            LineStyle::Archive => {
                spec.set_fg(Some(Color::Red));
            }
            LineStyle::Symlink => {
                spec.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            LineStyle::DirectoryLink => {
                spec.set_fg(Some(Color::Cyan))
                    .set_bold(true)
                    .set_underline(true);
            }
            LineStyle::WorldWritable => {
                spec.set_fg(Some(Color::Black)).set_bg(Some(Color::Green));
            }
            LineStyle::Warning => {
                spec.set_fg(Some(Color::Red)).set_bold(true);
            }
        }
        spec
    }

    /// Whether any attribute is set at all.
    pub fn is_plain(&self) -> bool {
        self.color_spec().is_none()
    }
}
