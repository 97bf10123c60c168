//! TreeWalker - depth-first, symlink-aware traversal
//!
//! Entries are visited in directory-read order and streamed to a
//! `TreeOutput` as soon as they are classified. The only state shared across
//! recursive calls is the per-run `RunState` (visited ledger and counters),
//! passed down by `&mut`.
//!
//! Per-entry failures are returned as a `VisitOutcome` and absorbed by the
//! parent after a marker line has been printed; write failures on the output
//! are `io::Error`s and abort the whole run.

use std::fs::{self, ReadDir};
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{TreeError, VisitOutcome};
use crate::stats::Counters;
use crate::style::LineStyle;

use super::classify::{Classification, LinkInfo, classify};
use super::config::WalkerConfig;
use super::entry::{Entry, RenderContext, is_hidden_name, printable};
use super::line::{Marker, TreeLine};
use super::visited::VisitedSet;

/// Receives tree lines as they are produced.
pub trait TreeOutput {
    fn output_line(&mut self, line: &TreeLine) -> io::Result<()>;

    /// Called once after the traversal, even when the root failed.
    fn finish(&mut self, counters: &Counters) -> io::Result<()>;
}

/// What a finished run reports back.
#[derive(Debug)]
pub struct RunReport {
    pub counters: Counters,
    /// Outcome of the root entry. Failures below the root are absorbed.
    pub outcome: VisitOutcome,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// State that lives for one run and is visible to every recursive call.
struct RunState<'o, O: TreeOutput> {
    visited: VisitedSet,
    counters: Counters,
    output: &'o mut O,
}

impl<O: TreeOutput> RunState<'_, O> {
    fn emit(&mut self, line: TreeLine) -> io::Result<()> {
        self.output.output_line(&line)
    }
}

/// Recursive walker over a filesystem subtree.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk `root`, stream every line to `output`, then print the summary.
    pub fn walk<O: TreeOutput>(&self, root: &Path, output: &mut O) -> io::Result<RunReport> {
        info!(
            root = %root.display(),
            show_hidden = self.config.show_hidden,
            follow_symlink_dirs = self.config.follow_symlink_dirs,
            "starting traversal"
        );

        let mut state = RunState {
            visited: VisitedSet::new(),
            counters: Counters::new(),
            output,
        };
        let outcome = self.visit(&mut state, &Entry::root(root), &RenderContext::root(), false)?;
        state.output.finish(&state.counters)?;

        info!(
            directories = state.counters.directories(),
            files = state.counters.files(),
            dirs_entered = state.visited.len(),
            "traversal finished"
        );
        Ok(RunReport {
            counters: state.counters,
            outcome,
        })
    }

    fn visit<O: TreeOutput>(
        &self,
        state: &mut RunState<'_, O>,
        entry: &Entry,
        render: &RenderContext,
        followed_via_symlink: bool,
    ) -> io::Result<VisitOutcome> {
        if let Err(err) = entry.validate(followed_via_symlink) {
            return Ok(Err(err));
        }
        if !entry.is_root()
            && !followed_via_symlink
            && !self.config.show_hidden
            && entry.is_hidden()
        {
            return Ok(Ok(()));
        }

        let full_path = match entry.full_path() {
            Ok(path) => path,
            Err(err) => return Ok(Err(err)),
        };
        let prefix = match render.prefix(entry.depth()) {
            Ok(prefix) => prefix,
            Err(err) => return Ok(Err(err)),
        };

        // The link line was already printed; only its children remain.
        if followed_via_symlink {
            return self.list_followed(state, entry, &full_path, render);
        }

        let class = match classify(&full_path) {
            Ok(class) => class,
            Err(err) => {
                state.emit(
                    TreeLine::new(
                        entry.depth(),
                        prefix,
                        entry.display_name(),
                        LineStyle::Warning,
                    )
                    .with_marker(Marker::InvalidEntry),
                )?;
                return Ok(Err(err));
            }
        };

        let style = LineStyle::for_classification(&class);
        match class {
            Classification::Symlink(link) => {
                self.visit_link(state, entry, &full_path, prefix, render, link)
            }
            Classification::Directory { .. } => {
                self.visit_directory(state, entry, &full_path, prefix, style, render)
            }
            Classification::RegularFile { .. } | Classification::ExecutableFile => {
                state.emit(TreeLine::new(
                    entry.depth(),
                    prefix,
                    entry.display_name(),
                    style,
                ))?;
                state.counters.increment_files();
                Ok(Ok(()))
            }
        }
    }

    fn visit_link<O: TreeOutput>(
        &self,
        state: &mut RunState<'_, O>,
        entry: &Entry,
        full_path: &Path,
        prefix: String,
        render: &RenderContext,
        link: LinkInfo,
    ) -> io::Result<VisitOutcome> {
        let depth = entry.depth();
        let raw = link
            .raw_target
            .as_ref()
            .map(|target| printable(target.as_os_str()));

        let Some(target) = link.resolved else {
            state.emit(
                TreeLine::new(depth, prefix, entry.display_name(), LineStyle::Symlink)
                    .with_link(raw, LineStyle::Warning)
                    .with_marker(Marker::InvalidTarget),
            )?;
            state.counters.increment_files();
            return Ok(Err(TreeError::SymlinkUnresolvable {
                path: full_path.to_path_buf(),
            }));
        };
        let target_style = LineStyle::for_target(&target);

        if !target.is_dir() {
            state.emit(
                TreeLine::new(depth, prefix, entry.display_name(), LineStyle::Symlink)
                    .with_link(raw, target_style),
            )?;
            state.counters.increment_files();
            return Ok(Ok(()));
        }

        // A root link is followed once regardless of the option, so the tool
        // can be pointed at a link.
        if entry.is_root() {
            state.visited.test_and_insert(&target.canonical);
            state.emit(
                TreeLine::new(depth, prefix, entry.display_name(), LineStyle::Root)
                    .with_link(raw, target_style),
            )?;
            return self.visit(state, &Entry::followed(target.canonical, depth), render, true);
        }

        if !self.config.follow_symlink_dirs {
            state.emit(
                TreeLine::new(depth, prefix, entry.display_name(), LineStyle::DirectoryLink)
                    .with_link(raw, target_style),
            )?;
            state.counters.increment_directories();
            return Ok(Ok(()));
        }

        // Inserted before the directory is opened.
        if !state.visited.test_and_insert(&target.canonical) {
            debug!(
                link = %full_path.display(),
                target = %target.canonical.display(),
                "directory already entered, not following"
            );
            state.emit(
                TreeLine::new(depth, prefix, entry.display_name(), LineStyle::Symlink)
                    .with_link(raw, target_style)
                    .with_marker(Marker::RecursiveLink),
            )?;
            state.counters.increment_directories();
            return Ok(Ok(()));
        }

        debug!(
            link = %full_path.display(),
            target = %target.canonical.display(),
            "following directory link"
        );
        state.emit(
            TreeLine::new(depth, prefix, entry.display_name(), LineStyle::DirectoryLink)
                .with_link(raw, target_style),
        )?;
        state.counters.increment_directories();
        self.visit(state, &Entry::followed(target.canonical, depth), render, true)
    }

    fn visit_directory<O: TreeOutput>(
        &self,
        state: &mut RunState<'_, O>,
        entry: &Entry,
        full_path: &Path,
        prefix: String,
        style: LineStyle,
        render: &RenderContext,
    ) -> io::Result<VisitOutcome> {
        let depth = entry.depth();

        // Recorded before opening, so a link back to any enclosing directory
        // is caught on first sight.
        match fs::canonicalize(full_path) {
            Ok(canonical) => state.visited.insert(canonical),
            Err(err) => debug!(dir = %full_path.display(), error = %err, "cannot canonicalize directory"),
        }

        let read_dir = match fs::read_dir(full_path) {
            Ok(read_dir) => read_dir,
            Err(source) => {
                state.emit(
                    TreeLine::new(depth, prefix, entry.display_name(), LineStyle::Warning)
                        .with_marker(Marker::OpenDirFailed),
                )?;
                if !entry.is_root() {
                    state.counters.increment_directories();
                }
                return Ok(Err(TreeError::DirectoryOpenFailed {
                    path: full_path.to_path_buf(),
                    source,
                }));
            }
        };

        let header_style = if entry.is_root() && style == LineStyle::Directory {
            LineStyle::Root
        } else {
            style
        };
        state.emit(TreeLine::new(depth, prefix, entry.display_name(), header_style))?;
        if !entry.is_root() {
            state.counters.increment_directories();
        }

        self.visit_children(state, full_path, depth, read_dir, render)
    }

    /// Children of a followed directory link, drawn as if the link were the
    /// directory.
    fn list_followed<O: TreeOutput>(
        &self,
        state: &mut RunState<'_, O>,
        entry: &Entry,
        dir: &Path,
        render: &RenderContext,
    ) -> io::Result<VisitOutcome> {
        let depth = entry.depth();
        match fs::read_dir(dir) {
            Ok(read_dir) => self.visit_children(state, dir, depth, read_dir, render),
            Err(source) => {
                let prefix = match render.child(depth, false).and_then(|c| c.prefix(depth + 1)) {
                    Ok(prefix) => prefix,
                    Err(err) => return Ok(Err(err)),
                };
                state.emit(
                    TreeLine::new(
                        depth + 1,
                        prefix,
                        printable(dir.as_os_str()),
                        LineStyle::Warning,
                    )
                    .with_marker(Marker::OpenDirFailed),
                )?;
                Ok(Err(TreeError::DirectoryOpenFailed {
                    path: dir.to_path_buf(),
                    source,
                }))
            }
        }
    }

    fn visit_children<O: TreeOutput>(
        &self,
        state: &mut RunState<'_, O>,
        dir: &Path,
        depth: usize,
        read_dir: ReadDir,
        render: &RenderContext,
    ) -> io::Result<VisitOutcome> {
        // Read the whole listing first so the last visible sibling is known.
        let mut names = Vec::new();
        for dirent in read_dir {
            match dirent {
                Ok(dirent) => {
                    let name = dirent.file_name();
                    if !self.config.show_hidden && is_hidden_name(&name) {
                        continue;
                    }
                    names.push(name);
                }
                Err(err) => {
                    warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                }
            }
        }

        let total = names.len();
        for (i, name) in names.into_iter().enumerate() {
            let child_render = match render.child(depth, i + 1 < total) {
                Ok(child_render) => child_render,
                Err(err) => {
                    warn!(dir = %dir.display(), error = %err, "skipping entry");
                    continue;
                }
            };
            let child = Entry::child(dir, name, depth + 1);
            if let Err(err) = self.visit(state, &child, &child_render, false)? {
                match err {
                    TreeError::AllocationFailed { .. } => {
                        warn!(dir = %dir.display(), error = %err, "branch abandoned");
                    }
                    _ => debug!(error = %err, "entry failed, continuing with siblings"),
                }
            }
        }
        Ok(Ok(()))
    }
}
