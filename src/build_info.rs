//! Compile-time build information, shown by `nftuklas --version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `"<date> (<commit>)"`, as printed by the shell.
pub fn version_line() -> String {
    format!("{} ({})", BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_contains_both_parts() {
        let line = version_line();
        assert!(line.starts_with(BUILD_DATE));
        assert!(line.contains(BUILD_COMMIT));
    }
}
