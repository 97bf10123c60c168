//! Configuration types for the tree walker

/// The two traversal toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// List dotfiles (names starting with `.`, other than `.` itself).
    pub show_hidden: bool,
    /// Descend into symbolic links that point at directories. The root is
    /// always followed once even when this is off.
    pub follow_symlink_dirs: bool,
}

impl WalkerConfig {
    pub fn new(show_hidden: bool, follow_symlink_dirs: bool) -> Self {
        Self {
            show_hidden,
            follow_symlink_dirs,
        }
    }
}
