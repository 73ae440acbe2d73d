//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - Unknown XML fields are an error so typos do not silently fall back to defaults.
//! - A file that is not well-formed XML is ignored (debug log) and defaults apply.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::checksum::Algorithm;
use crate::platform::{set_dir_mode_0700, write_new_file_0600};
use crate::sniff::{FALLBACK_EXT_DEFAULT, SNIFF_PROGRAM_DEFAULT};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "algorithm")]
    algorithm: Option<String>,
    #[serde(rename = "fallback_ext")]
    fallback_ext: Option<String>,
    #[serde(rename = "sniff_program")]
    sniff_program: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "report")]
    report: Option<bool>,
}

/// Settings read from the file; `None` means "not set, keep the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub algorithm: Option<Algorithm>,
    pub fallback_ext: Option<String>,
    pub sniff_program: Option<String>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub report: Option<bool>,
}

impl FileSettings {
    /// Overlay the values that were set onto `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(a) = self.algorithm {
            cfg.algorithm = a;
        }
        if let Some(ext) = &self.fallback_ext {
            cfg.fallback_ext = ext.clone();
        }
        if let Some(prog) = &self.sniff_program {
            cfg.sniff_program = prog.clone();
        }
        if let Some(lvl) = &self.log_level {
            cfg.log_level = lvl.clone();
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(r) = self.report {
            cfg.report = r;
        }
    }
}

fn trimmed(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Read config from the default location (or `$RENAMER_CONFIG`).
/// Returns `Ok(None)` when the file does not exist or is not well-formed.
pub fn load_config_from_xml() -> Result<Option<FileSettings>> {
    let cfg_path = default_config_path()?;
    load_config_file(&cfg_path)
}

/// Read config from an explicit path.
pub fn load_config_file(cfg_path: &Path) -> Result<Option<FileSettings>> {
    if !cfg_path.exists() {
        debug!(path = %cfg_path.display(), "no config file");
        return Ok(None);
    }

    let content = fs::read_to_string(cfg_path)
        .with_context(|| format!("read config '{}'", cfg_path.display()))?;
    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("unknown field") {
                bail!("Unknown field in renamer config {}: {}", cfg_path.display(), msg);
            }
            debug!("Failed to parse config.xml at {}: {}", cfg_path.display(), msg);
            return Ok(None);
        }
    };

    let algorithm = match trimmed(parsed.algorithm) {
        Some(name) => Some(
            name.parse::<Algorithm>()
                .with_context(|| format!("in config '{}'", cfg_path.display()))?,
        ),
        None => None,
    };
    let log_level = trimmed(parsed.log_level).and_then(|s| LogLevel::parse(&s));

    Ok(Some(FileSettings {
        algorithm,
        fallback_ext: trimmed(parsed.fallback_ext),
        sniff_program: trimmed(parsed.sniff_program),
        log_level,
        log_file: trimmed(parsed.log_file).map(PathBuf::from),
        report: parsed.report,
    }))
}

/// Create a commented template config; refuses to overwrite or to follow
/// symlinked ancestors.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/renamer.log".into());

    let content = format!(
        "<!--\n  renamer configuration (XML)\n\n    algorithm      -> checksum used by %x: md2 | md5 | sha1 | sha256 | sha384 | sha512\n    fallback_ext   -> extension used by %g when the type is unknown\n    sniff_program  -> program run as `<program> --extension <path>` by %g\n    log_level      -> quiet | normal | info | debug\n    log_file       -> path to log file (optional)\n    report         -> print `old -> new` for each change (true/false)\n\n  CLI flags override XML values.\n-->\n<config>\n  <algorithm>{}</algorithm>\n  <fallback_ext>{}</fallback_ext>\n  <sniff_program>{}</sniff_program>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <report>true</report>\n</config>\n",
        Algorithm::default(),
        FALLBACK_EXT_DEFAULT,
        SNIFF_PROGRAM_DEFAULT,
        suggested_log
    );

    write_new_file_0600(path, content.as_bytes())
        .with_context(|| format!("write template config '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parse_full_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("config.xml");
        fs::write(
            &p,
            "<config>
               <algorithm> SHA-512 </algorithm>
               <fallback_ext>.bin</fallback_ext>
               <sniff_program>/usr/bin/file</sniff_program>
               <log_level>debug</log_level>
               <log_file>/tmp/renamer.log</log_file>
               <report>false</report>
             </config>",
        )
        .unwrap();
        let s = load_config_file(&p).unwrap().unwrap();
        assert_eq!(s.algorithm, Some(Algorithm::Sha512));
        assert_eq!(s.fallback_ext.as_deref(), Some(".bin"));
        assert_eq!(s.sniff_program.as_deref(), Some("/usr/bin/file"));
        assert_eq!(s.log_level, Some(LogLevel::Debug));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/renamer.log")));
        assert_eq!(s.report, Some(false));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert!(load_config_file(&dir.path().join("nope.xml")).unwrap().is_none());
    }

    #[test]
    fn unknown_field_is_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("config.xml");
        fs::write(&p, "<config><colour>red</colour></config>").unwrap();
        assert!(load_config_file(&p).is_err());
    }

    #[test]
    fn unknown_algorithm_is_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("config.xml");
        fs::write(&p, "<config><algorithm>crc32</algorithm></config>").unwrap();
        let err = load_config_file(&p).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::RenameError>(),
            Some(crate::RenameError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn apply_overlays_only_set_values() {
        let mut cfg = Config::default();
        let s = FileSettings {
            fallback_ext: Some(".mkv".into()),
            ..Default::default()
        };
        s.apply_to(&mut cfg);
        assert_eq!(cfg.fallback_ext, ".mkv");
        assert_eq!(cfg.algorithm, Algorithm::Sha256);
        assert!(cfg.report);
    }

    #[test]
    fn template_round_trips_and_never_overwrites() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("sub").join("config.xml");
        create_template_config(&p).unwrap();
        let s = load_config_file(&p).unwrap().unwrap();
        assert_eq!(s.algorithm, Some(Algorithm::Sha256));
        assert_eq!(s.fallback_ext.as_deref(), Some(".mp4"));
        assert!(create_template_config(&p).is_err());
    }
}
