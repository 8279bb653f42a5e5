//! Operating system detection.

/// Operating system the probe is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
    /// Any platform without a known IntelliJ layout (BSDs, wasm, ...).
    Other,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Human-readable platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Other => "unsupported platform",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_target_os() {
        let platform = Platform::current();
        if cfg!(target_os = "linux") {
            assert_eq!(platform, Platform::Linux);
        } else if cfg!(target_os = "macos") {
            assert_eq!(platform, Platform::MacOS);
        } else if cfg!(target_os = "windows") {
            assert_eq!(platform, Platform::Windows);
        }
    }

    #[test]
    fn names_are_distinct() {
        assert_eq!(Platform::MacOS.name(), "macOS");
        assert_ne!(Platform::Linux.name(), Platform::Windows.name());
    }
}
