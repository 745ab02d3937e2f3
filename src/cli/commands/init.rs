//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "loganon.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing loganon configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set input.path_pattern to the logs to anonymize");
                println!("  3. Adjust [pattern] and [pattern.fields] to your log format");
                println!("  4. Validate configuration: loganon validate-config");
                println!("  5. Preview: loganon run --dry-run");
                println!("  6. Run: loganon run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Sample configuration with the RADIUS defaults spelled out
    fn generate_config() -> String {
        r#"# loganon Configuration File
# Pseudonymizes named fields in line-oriented log files

# ============================================================================
# Application Configuration
# ============================================================================
[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

# Classify files and report what would be done, without writing
dry_run = false

# ============================================================================
# Input Configuration
# ============================================================================
[input]
# Glob pattern selecting candidate files
# Supports ${VAR} environment variable substitution
path_pattern = "/var/log/radius/radius.log*"

# Appended to each source path to name its output.
# Files already ending with this suffix are never processed.
suffix = "_anon"

# ============================================================================
# Line Pattern
# ============================================================================
[pattern]
# One named capture group per field to anonymize
regex = '.*\[(?P<login>.*)\].* cli (?P<ip>[0-9.]+).*'

# global: replace every occurrence of a captured value on the line
# anchored: replace only the captured spans
substitution = "global"

# Lines the pattern does not match: keep (write through) or drop
unmatched = "keep"

# Capture group -> transform
#   opaque: SHA-256 hex digest
#   ip:     remap each octet of a dotted quad as (v^5) mod 255
#   url:    keep scheme and host, digest the rest
[pattern.fields]
login = "opaque"
ip = "ip"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"

# Log rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
