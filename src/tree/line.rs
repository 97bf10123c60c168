//! A single rendered line of the tree, before any terminal styling.

use std::fmt;

use crate::style::LineStyle;

/// Inline warning appended to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    InvalidEntry,
    InvalidTarget,
    RecursiveLink,
    OpenDirFailed,
}

impl Marker {
    pub fn text(&self) -> &'static str {
        match self {
            Marker::InvalidEntry => "[invalid file or directory]",
            Marker::InvalidTarget => "[invalid target]",
            Marker::RecursiveLink => "[recursive, not followed]",
            Marker::OpenDirFailed => "[failed to open directory]",
        }
    }
}

/// The `-> target` part of a link line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkText {
    /// Stored target text, `None` if it could not be read.
    pub target: Option<String>,
    pub style: LineStyle,
}

/// Everything a formatter needs to print one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub prefix: String,
    pub name: String,
    pub style: LineStyle,
    pub link: Option<LinkText>,
    pub marker: Option<Marker>,
}

impl TreeLine {
    pub fn new(depth: usize, prefix: String, name: String, style: LineStyle) -> Self {
        Self {
            depth,
            prefix,
            name,
            style,
            link: None,
            marker: None,
        }
    }

    pub fn with_link(mut self, target: Option<String>, style: LineStyle) -> Self {
        self.link = Some(LinkText { target, style });
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// Unstyled rendering, without the line terminator.
impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.name)?;
        if let Some(link) = &self.link {
            f.write_str(" ->")?;
            if let Some(target) = &link.target {
                write!(f, " {}", target)?;
            }
        }
        if let Some(marker) = self.marker {
            write!(f, " {}", marker.text())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line() {
        let line = TreeLine::new(1, "+---".into(), "readme.txt".into(), LineStyle::Plain);
        assert_eq!(line.to_string(), "+---readme.txt");
    }

    #[test]
    fn test_link_line() {
        let line = TreeLine::new(2, "|   +---".into(), "latest".into(), LineStyle::Symlink)
            .with_link(Some("v2.tar.gz".into()), LineStyle::Archive);
        assert_eq!(line.to_string(), "|   +---latest -> v2.tar.gz");
    }

    #[test]
    fn test_marker_lines() {
        let broken = TreeLine::new(1, "+---".into(), "broken".into(), LineStyle::Symlink)
            .with_link(Some("missing".into()), LineStyle::Warning)
            .with_marker(Marker::InvalidTarget);
        assert_eq!(broken.to_string(), "+---broken -> missing [invalid target]");

        let unreadable = TreeLine::new(1, "+---".into(), "odd".into(), LineStyle::Symlink)
            .with_link(None, LineStyle::Warning)
            .with_marker(Marker::InvalidTarget);
        assert_eq!(unreadable.to_string(), "+---odd -> [invalid target]");

        let locked = TreeLine::new(1, "+---".into(), "locked".into(), LineStyle::Warning)
            .with_marker(Marker::OpenDirFailed);
        assert_eq!(locked.to_string(), "+---locked [failed to open directory]");
    }
}
