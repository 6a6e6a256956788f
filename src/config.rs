//! Generator configuration, loadable from TOML.

use crate::errors::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Narrowest doc comment wrap column accepted.
pub const MIN_WRAP_WIDTH: usize = 40;

/// Settings that shape the generated header.
///
/// Every field has a default, so a TOML file only needs to name what it
/// overrides:
///
/// ```toml
/// guard = "MY_ASSERTS_H"
/// report_function = "my_assert_failed"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Header guard macro name.
    pub guard: String,
    /// Function every assertion macro expands to a call of.
    pub report_function: String,
    /// Terminator appended after the caller's message arguments.
    pub sentinel: String,
    /// Applied to `(expr)` to test whether an operation failed.
    pub failure_condition: String,
    /// Column at which doc comments wrap.
    pub wrap_width: usize,
    /// Header that defines `NULL`.
    pub null_header: String,
    /// Header that declares `strcmp` and `memcmp`.
    pub string_header: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            guard: "ASSERTIONS_H".into(),
            report_function: "assert_report".into(),
            sentinel: "(const char *) 0".into(),
            failure_condition: "< 0".into(),
            wrap_width: 78,
            null_header: "stddef.h".into(),
            string_header: "string.h".into(),
        }
    }
}

impl GeneratorConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> GenResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GenError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            GenError::Config { message, .. } => GenError::Config {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> GenResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| GenError::Config {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        Ok(config.normalized())
    }

    /// Clamp values that would make the output unreadable.
    pub fn normalized(mut self) -> Self {
        self.wrap_width = self.wrap_width.max(MIN_WRAP_WIDTH);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.guard, "ASSERTIONS_H");
        assert_eq!(config.wrap_width, 78);
        assert_eq!(config.null_header, "stddef.h");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml("guard = \"CHECKS_H\"\n").unwrap();
        assert_eq!(config.guard, "CHECKS_H");
        assert_eq!(config.report_function, "assert_report");
    }

    #[test]
    fn test_wrap_width_clamped() {
        let config = GeneratorConfig::from_toml("wrap_width = 10\n").unwrap();
        assert_eq!(config.wrap_width, MIN_WRAP_WIDTH);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = GeneratorConfig::from_toml("colour = \"blue\"\n").unwrap_err();
        assert!(matches!(err, GenError::Config { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
report_function = "ck_fail"
sentinel = "NULL"
"#
        )
        .unwrap();

        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.report_function, "ck_fail");
        assert_eq!(config.sentinel, "NULL");
        assert_eq!(config.guard, "ASSERTIONS_H");
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config = GeneratorConfig::load(Path::new("/nonexistent/assertgen.toml")).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "wrap_width = \"wide\"").unwrap();

        let err = GeneratorConfig::load(file.path()).unwrap_err();
        match err {
            GenError::Config { path, .. } => assert_eq!(path, file.path().display().to_string()),
            other => panic!("unexpected error: {}", other),
        }
    }
}
