//! Command-line contract with the external snpEff annotator.
//!
//! snpEff is a Java program run as a black box, twice per run:
//!
//! ```text
//! java -Xmx4g -jar snpEff.jar build {-gtf22|-gff3} -verbose data -c <config>
//! java -Xmx4g -jar snpEff.jar ann -nodownload -verbose -no-downstream -no-intergenic \
//!     -no-intron -no-upstream -no-utr -csvStats <out>.csv -stats <html> -c <config> data <vcf>
//! ```
//!
//! Only the exit status decides success. Whatever snpEff prints is either
//! streamed to the console or captured to files for later inspection.

pub mod env;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::types::AnnotationFormat;
use crate::database::GENOME_ID;

/// Heap ceiling for every snpEff invocation
pub const MAX_HEAP: &str = "-Xmx4g";

/// Feature classes left out of the annotation; only coding effects are wanted
pub const SUPPRESSED_FEATURES: [&str; 5] = [
    "-no-downstream",
    "-no-intergenic",
    "-no-intron",
    "-no-upstream",
    "-no-utr",
];

#[derive(Error, Debug)]
pub enum SnpEffError {
    #[error("Could not find snpEff.jar in PATH")]
    SnpEffNotFound,

    #[error("Could not find '{}'", .0.display())]
    MissingSnpEff(PathBuf),

    #[error("Could not find a suitable version of Java (OpenJDK)")]
    NoSuitableJava,

    #[error("Needs OpenJDK, '{}' isn't or couldn't be found", .0.display())]
    WrongJava(PathBuf),

    #[error("Problem building the database from your annotation file")]
    BuildDatabase,

    #[error("Problem annotating {}", .0.display())]
    Annotation(PathBuf),

    #[error("Failed to run '{}': {source}", .program.display())]
    Spawn {
        program: PathBuf,
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Where a snpEff output stream goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRouting {
    /// Stream to this process's stderr
    Console,
    /// Capture to a file, created or truncated before the process starts
    File(PathBuf),
}

impl OutputRouting {
    fn stdio(&self) -> io::Result<Stdio> {
        match self {
            // stdout may be carrying the annotated VCF, so never stream there
            Self::Console => Ok(Stdio::from(io::stderr())),
            Self::File(path) => Ok(Stdio::from(File::create(path)?)),
        }
    }
}

/// A located Java runtime and snpEff jar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpEff {
    pub java: PathBuf,
    pub jar: PathBuf,
}

impl SnpEff {
    pub fn new(java: impl Into<PathBuf>, jar: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            jar: jar.into(),
        }
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.java);
        cmd.arg(MAX_HEAP).arg("-jar").arg(&self.jar);
        cmd
    }

    /// `snpEff build` for the temporary database
    #[must_use]
    pub fn build_command(&self, format: AnnotationFormat, config: &Path) -> Command {
        let mut cmd = self.base_command();
        cmd.arg("build")
            .arg(format.build_flag())
            .arg("-verbose")
            .arg(GENOME_ID)
            .arg("-c")
            .arg(config);
        cmd
    }

    /// `snpEff ann` restricted to coding effects
    #[must_use]
    pub fn annotate_command(
        &self,
        vcf: &Path,
        config: &Path,
        stats_csv: &Path,
        stats_html: &Path,
    ) -> Command {
        let mut cmd = self.base_command();
        cmd.arg("ann")
            .arg("-nodownload")
            .arg("-verbose")
            .args(SUPPRESSED_FEATURES)
            .arg("-csvStats")
            .arg(stats_csv)
            .arg("-stats")
            .arg(stats_html)
            .arg("-c")
            .arg(config)
            .arg(GENOME_ID)
            .arg(vcf);
        cmd
    }

    /// Build the snpEff database described by `config`
    ///
    /// # Errors
    ///
    /// Returns `SnpEffError::BuildDatabase` if snpEff exits unsuccessfully,
    /// or `Spawn`/`Io` if it cannot be started.
    pub fn build_database(
        &self,
        format: AnnotationFormat,
        config: &Path,
        stdout: &OutputRouting,
        stderr: &OutputRouting,
    ) -> Result<(), SnpEffError> {
        let mut cmd = self.build_command(format, config);
        cmd.stdout(stdout.stdio()?).stderr(stderr.stdio()?);

        info!("Building snpeff database");
        debug!("Using the following command: '{}'", render(&cmd));
        if !self.wait(&mut cmd)?.success() {
            return Err(SnpEffError::BuildDatabase);
        }
        Ok(())
    }

    /// Annotate `vcf`, writing the annotated VCF to `output`
    ///
    /// # Errors
    ///
    /// Returns `SnpEffError::Annotation` if snpEff exits unsuccessfully,
    /// or `Spawn`/`Io` if it cannot be started.
    pub fn annotate(
        &self,
        vcf: &Path,
        config: &Path,
        output: &Path,
        stats_html: &Path,
        stderr: &OutputRouting,
    ) -> Result<(), SnpEffError> {
        let stats_csv = stats_csv_path(output);
        let mut cmd = self.annotate_command(vcf, config, &stats_csv, stats_html);
        cmd.stdout(File::create(output)?).stderr(stderr.stdio()?);

        info!("Annotating {}", vcf.display());
        debug!("Using the following command: '{}'", render(&cmd));
        debug!("writing output to {}", output.display());
        if !self.wait(&mut cmd)?.success() {
            return Err(SnpEffError::Annotation(vcf.to_path_buf()));
        }
        Ok(())
    }

    fn wait(&self, cmd: &mut Command) -> Result<ExitStatus, SnpEffError> {
        cmd.status().map_err(|source| SnpEffError::Spawn {
            program: self.java.clone(),
            source,
        })
    }
}

/// Summary CSV written by `snpEff ann` next to its output
#[must_use]
pub fn stats_csv_path(output: &Path) -> PathBuf {
    let mut path = output.as_os_str().to_owned();
    path.push(".csv");
    PathBuf::from(path)
}

/// Space-joined command line for logging
fn render(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
