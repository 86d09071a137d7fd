//! Output formatting utilities
//!
//! Everything here goes to stderr; stdout is reserved for the build summary.

use console::style;

/// Print a success message
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_contains_both_parts() {
        let line = key_value("buildTarget", "Android");
        assert!(line.contains("buildTarget"));
        assert!(line.contains("Android"));
        assert!(line.starts_with("  "));
    }
}
