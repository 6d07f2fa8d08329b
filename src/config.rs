// ABOUTME: Engine configuration with YAML parsing and serde defaults.
// ABOUTME: Tag key, artifact destination, remote tooling paths, and timeouts.

use crate::error::Result;
use crate::gate::CONTAINMENT_TAG;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for one containment invocation.
///
/// Every field has a default so an empty file (or no file) yields a working
/// engine; durations accept humane spellings like `10m` or `90s`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContainConfig {
    /// Tag key whose addition triggers containment.
    pub tag_key: String,

    /// Destination bucket for exfiltrated forensic artifacts.
    pub artifact_bucket: String,

    /// Directory on the target instance where artifacts are staged.
    pub forensics_dir: String,

    /// Command document used for remote shell execution.
    pub command_document: String,

    /// Memory-acquisition tool invoked on the target instance.
    pub memory_tool: String,

    /// Upper bound on waiting for any single remote command.
    #[serde(with = "humantime_serde")]
    pub command_timeout: Duration,

    /// Lifetime of generated pre-signed upload URLs.
    #[serde(with = "humantime_serde")]
    pub presign_ttl: Duration,

    /// Description stamped onto every evidence snapshot.
    pub snapshot_description: String,
}

impl Default for ContainConfig {
    fn default() -> Self {
        Self {
            tag_key: CONTAINMENT_TAG.to_string(),
            artifact_bucket: "ir-forensic-artifacts".to_string(),
            forensics_dir: "/forensics".to_string(),
            command_document: "AWS-RunShellScript".to_string(),
            memory_tool: "/usr/local/bin/avml".to_string(),
            command_timeout: Duration::from_secs(600),
            presign_ttl: Duration::from_secs(900),
            snapshot_description: "Created by security team incident response containment."
                .to_string(),
        }
    }
}

impl ContainConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = ContainConfig::default();
        assert_eq!(config.tag_key, "IR_Contained");
        assert_eq!(config.command_timeout, Duration::from_secs(600));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: ContainConfig =
            serde_yaml::from_str("artifact_bucket: evidence\ncommand_timeout: 2m\n").unwrap();
        assert_eq!(config.artifact_bucket, "evidence");
        assert_eq!(config.command_timeout, Duration::from_secs(120));
        assert_eq!(config.forensics_dir, "/forensics");
    }
}
