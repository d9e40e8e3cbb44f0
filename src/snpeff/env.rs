//! Locating the snpEff jar and a usable Java runtime.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::{SnpEff, SnpEffError};

/// File name searched for in the working directory and on `PATH`
pub const SNPEFF_JAR: &str = "snpEff.jar";

/// Java installations tried after the one on `PATH`
pub const FALLBACK_JAVAS: [&str; 2] = [
    "/software/bin/java",
    "/software/pathogen/external/apps/usr/local/jdk1.7.0_21/bin/java",
];

/// Resolve the snpEff jar.
///
/// An explicit path wins, then `snpEff.jar` in the working directory, then
/// `snpEff.jar` on `PATH`. The result must be an existing file.
///
/// # Errors
///
/// Returns `SnpEffError::SnpEffNotFound` if nothing was found, or
/// `SnpEffError::MissingSnpEff` if the chosen path is not a file.
pub fn locate_snpeff(explicit: Option<&Path>) -> Result<PathBuf, SnpEffError> {
    let jar = if let Some(path) = explicit {
        path.to_path_buf()
    } else if Path::new(SNPEFF_JAR).is_file() {
        PathBuf::from(SNPEFF_JAR)
    } else if let Ok(path) = which::which(SNPEFF_JAR) {
        path
    } else {
        return Err(SnpEffError::SnpEffNotFound);
    };

    if !jar.is_file() {
        return Err(SnpEffError::MissingSnpEff(jar));
    }
    debug!("Using snpEff at '{}'", jar.display());
    Ok(jar)
}

/// Whether `java -Xmx10m -version` succeeds and reports an OpenJDK runtime
#[must_use]
pub fn java_version_ok(java: &Path) -> bool {
    let Ok(output) = Command::new(java).arg("-Xmx10m").arg("-version").output() else {
        return false;
    };
    if !output.status.success() {
        return false;
    }

    // Java prints its version banner on stderr
    let mut banner = String::from_utf8_lossy(&output.stderr).into_owned();
    banner.push_str(&String::from_utf8_lossy(&output.stdout));
    banner
        .lines()
        .next()
        .is_some_and(|first| first.starts_with("openjdk"))
}

/// Resolve the Java runtime.
///
/// An explicit path must pass [`java_version_ok`]. Otherwise `java` on
/// `PATH` and then each of [`FALLBACK_JAVAS`] is tried in turn.
///
/// # Errors
///
/// Returns `SnpEffError::WrongJava` if an explicit runtime is unsuitable, or
/// `SnpEffError::NoSuitableJava` if none of the candidates is usable.
pub fn locate_java(explicit: Option<&Path>) -> Result<PathBuf, SnpEffError> {
    if let Some(java) = explicit {
        if java_version_ok(java) {
            return Ok(java.to_path_buf());
        }
        return Err(SnpEffError::WrongJava(java.to_path_buf()));
    }

    let candidates = which::which("java")
        .into_iter()
        .chain(FALLBACK_JAVAS.iter().map(PathBuf::from));
    for java in candidates {
        if java_version_ok(&java) {
            debug!("Using '{}'", java.display());
            return Ok(java);
        }
    }
    Err(SnpEffError::NoSuitableJava)
}

impl SnpEff {
    /// Locate both executables, checking the jar before the runtime
    ///
    /// # Errors
    ///
    /// Returns the first discovery error encountered.
    pub fn discover(java: Option<&Path>, jar: Option<&Path>) -> Result<Self, SnpEffError> {
        let jar = locate_snpeff(jar)?;
        let java = locate_java(java)?;
        Ok(Self { java, jar })
    }
}
