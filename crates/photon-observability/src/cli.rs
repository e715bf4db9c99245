//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-photon-camera`, `--debug-photon-table`, etc.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Per-crate debug switches
///
/// # Example
/// ```rust
/// use photon_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-photon-camera".to_string()]);
/// assert!(flags.is_enabled("photon-camera"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`.
    /// `--debug-all` enables every known crate.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();

        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
                continue;
            }
            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }

        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string(), true);
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `DEBUG` if enabled for the crate, `INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create an `EnvFilter` directive string from the flags
    ///
    /// Tracing targets are module paths, so crate names are written with
    /// underscores: `"photon_camera=debug,info"`. Entries are sorted so the
    /// output is stable.
    pub fn to_filter_string(&self, base_level: &str) -> String {
        let mut crate_names: Vec<&String> = self.enabled_crates.keys().collect();
        crate_names.sort();

        let mut filters: Vec<String> = crate_names
            .into_iter()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .collect();
        filters.push(base_level.to_lowercase());
        filters.join(",")
    }
}

/// Parse debug flags from the process arguments and `PHOTON_DEBUG`
///
/// `PHOTON_DEBUG` is a comma-separated list of crate names, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("PHOTON_DEBUG") {
        apply_debug_env(&mut flags, &env_var);
    }
    flags
}

fn apply_debug_env(flags: &mut CrateDebugFlags, env_var: &str) {
    if env_var.trim() == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in env_var.split(',') {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            flags.enable(crate_name);
        }
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  PHOTON_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  PHOTON_DEBUG=all                               Enable debug for all crates

Examples:
  --debug-photon-camera
  --debug-photon-camera --debug-photon-table
  PHOTON_DEBUG=photon-camera,photon-serialization
"#,
        KNOWN_CRATES.join(", ")
    )
}
