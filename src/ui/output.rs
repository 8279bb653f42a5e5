//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show every validation message.
    #[default]
    Normal,
    /// Show one line per validator.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows per-check detail lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
