//! End-to-end annotation run.
//!
//! ```text
//! extract contigs ─► validate ─► scratch database ─► snpEff build ─► snpEff ann
//!                                                                      │
//!                     dispose scratch ◄─ deliver outputs ◄─ classify ◄─┘
//! ```
//!
//! Validation fails before anything is written to disk. Once the scratch
//! database exists, every exit path disposes of it (or keeps it when asked).
//! Outputs reach the caller's destinations only after both snpEff steps
//! succeeded, and are removed again if delivery or disposal fails afterwards.
//! There are no retries.

pub mod finalize;

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::classify::{self, ErrorTally};
use crate::core::codon_table::{CodonTableError, CodonTableMap};
use crate::core::contig::ContigSet;
use crate::core::types::{AnnotationFormat, OutputDestination};
use crate::database::{genome_name, ScratchDatabase};
use crate::parsing::contigs;
use crate::snpeff::{stats_csv_path, OutputRouting, SnpEff, SnpEffError};
use crate::validation::{check_contigs, ValidationError, ValidationReport};

use self::finalize::Delivered;

/// Annotated VCF written by `snpEff ann`, inside the scratch directory
pub const OUTPUT_VCF: &str = "snpeff_output.vcf";
/// HTML report written by `snpEff ann`
pub const STATS_HTML: &str = "snpEff_summary.html";
pub const BUILD_STDOUT: &str = "snpeff_build_db.o";
pub const BUILD_STDERR: &str = "snpeff_build_db.e";
pub const ANNOTATE_STDERR: &str = "snpeff_annotate.e";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    SnpEff(#[from] SnpEffError),

    #[error(transparent)]
    CodonTable(#[from] CodonTableError),

    #[error("Failed to read '{}': {source}", .path.display())]
    Input { path: PathBuf, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    /// How the run ended, for callers deciding on messaging and exit status
    #[must_use]
    pub fn kind(&self) -> RunOutcome {
        match self {
            Self::Validation(ValidationError::MissingCodonTable) => RunOutcome::MissingCodonTable,
            Self::Validation(ValidationError::NoCommonContigs) => RunOutcome::NoCommonContigs,
            Self::Validation(ValidationError::UnknownCodingTable) => RunOutcome::UnknownCodingTable,
            Self::SnpEff(SnpEffError::BuildDatabase) => RunOutcome::BuildFailed,
            Self::SnpEff(SnpEffError::Annotation(_)) => RunOutcome::AnnotateFailed,
            Self::SnpEff(
                SnpEffError::SnpEffNotFound
                | SnpEffError::MissingSnpEff(_)
                | SnpEffError::NoSuitableJava
                | SnpEffError::WrongJava(_)
                | SnpEffError::Spawn { .. },
            ) => RunOutcome::EnvironmentUnavailable,
            Self::CodonTable(_) | Self::Input { .. } => RunOutcome::InvalidInput,
            Self::SnpEff(SnpEffError::Io(_)) | Self::Io(_) => RunOutcome::IoFailure,
        }
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Ok,
    MissingCodonTable,
    NoCommonContigs,
    UnknownCodingTable,
    BuildFailed,
    AnnotateFailed,
    /// No usable snpEff jar or Java runtime
    EnvironmentUnavailable,
    /// Unreadable input file or malformed codon table mapping
    InvalidInput,
    IoFailure,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "ok",
            Self::MissingCodonTable => "missing codon table",
            Self::NoCommonContigs => "no common contigs",
            Self::UnknownCodingTable => "unknown coding table",
            Self::BuildFailed => "database build failed",
            Self::AnnotateFailed => "annotation failed",
            Self::EnvironmentUnavailable => "environment unavailable",
            Self::InvalidInput => "invalid input",
            Self::IoFailure => "I/O failure",
        };
        f.write_str(name)
    }
}

/// Everything one run needs besides the located executables
#[derive(Debug, Clone)]
pub struct AnnotationRequest {
    pub vcf: PathBuf,
    pub annotation: PathBuf,
    pub codon_tables: CodonTableMap,
    pub output_vcf: OutputDestination,
    /// Overrides the default `<output>.csv` summary location
    pub summary_csv: Option<PathBuf>,
    /// Directory in which the scratch database is created
    pub scratch_parent: PathBuf,
    /// Stream snpEff's output to the console instead of scratch files
    pub debug: bool,
    /// Keep the scratch database after the run
    pub keep: bool,
}

impl AnnotationRequest {
    pub fn new(
        vcf: impl Into<PathBuf>,
        annotation: impl Into<PathBuf>,
        codon_tables: CodonTableMap,
        output_vcf: OutputDestination,
    ) -> Self {
        Self {
            vcf: vcf.into(),
            annotation: annotation.into(),
            codon_tables,
            output_vcf,
            summary_csv: None,
            scratch_parent: PathBuf::from("."),
            debug: false,
            keep: false,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub validation: ValidationReport,
    pub issues: ErrorTally,
    /// Where the summary CSV was delivered, if anywhere
    pub summary_csv: Option<PathBuf>,
    /// Scratch database location when it was kept
    pub retained_scratch: Option<PathBuf>,
}

/// Where snpEff's files go inside the scratch directory
#[derive(Debug, Clone)]
struct RunArtifacts {
    output_vcf: PathBuf,
    stats_html: PathBuf,
    build_stdout: OutputRouting,
    build_stderr: OutputRouting,
    annotate_stderr: OutputRouting,
}

impl RunArtifacts {
    fn new(root: &Path, debug: bool) -> Self {
        let route = |name: &str| {
            if debug {
                OutputRouting::Console
            } else {
                OutputRouting::File(root.join(name))
            }
        };
        Self {
            output_vcf: root.join(OUTPUT_VCF),
            stats_html: root.join(STATS_HTML),
            build_stdout: route(BUILD_STDOUT),
            build_stderr: route(BUILD_STDERR),
            annotate_stderr: route(ANNOTATE_STDERR),
        }
    }
}

/// Validate the inputs, run snpEff against a temporary database and deliver
/// the annotated VCF and summary CSV.
///
/// # Errors
///
/// Returns `PipelineError::Input` if an input cannot be read,
/// `PipelineError::Validation` if the inputs are inconsistent,
/// `PipelineError::SnpEff` if either snpEff step fails, or
/// `PipelineError::Io` for scratch directory and delivery failures.
pub fn annotate_vcf(
    snpeff: &SnpEff,
    request: &AnnotationRequest,
) -> Result<RunSummary, PipelineError> {
    let annotation_contigs = read_contigs(&request.annotation, contigs::annotation_contigs)?;
    let vcf_contigs = read_contigs(&request.vcf, contigs::vcf_contigs)?;
    let validation = check_contigs(&vcf_contigs, &annotation_contigs, &request.codon_tables)?;

    let format = AnnotationFormat::from_path(&request.annotation);
    debug!("Annotation file is {format}");
    let parent = fs::canonicalize(&request.scratch_parent)?;
    let database = ScratchDatabase::create(&parent, &request.annotation, format)?;

    let outcome = run_in_database(snpeff, request, &database, &vcf_contigs);
    let retained = finalize::dispose_scratch(database, request.keep);
    let (issues, summary_csv, delivered) = outcome?;
    let retained_scratch = match retained {
        Ok(retained) => retained,
        Err(e) => {
            delivered.rollback();
            return Err(e.into());
        }
    };

    Ok(RunSummary {
        validation,
        issues,
        summary_csv,
        retained_scratch,
    })
}

fn read_contigs(
    path: &Path,
    extract: fn(&Path) -> io::Result<ContigSet>,
) -> Result<ContigSet, PipelineError> {
    extract(path).map_err(|source| PipelineError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Build, annotate, classify and deliver; the scratch database is left for
/// the caller to dispose of
fn run_in_database(
    snpeff: &SnpEff,
    request: &AnnotationRequest,
    database: &ScratchDatabase,
    vcf_contigs: &ContigSet,
) -> Result<(ErrorTally, Option<PathBuf>, Delivered), PipelineError> {
    let genome = genome_name(&request.annotation);
    let config = database.write_config(&genome, vcf_contigs, &request.codon_tables)?;
    let artifacts = RunArtifacts::new(database.root(), request.debug);

    snpeff.build_database(
        database.format(),
        &config,
        &artifacts.build_stdout,
        &artifacts.build_stderr,
    )?;
    snpeff.annotate(
        &request.vcf,
        &config,
        &artifacts.output_vcf,
        &artifacts.stats_html,
        &artifacts.annotate_stderr,
    )?;

    let issues = {
        let mut annotated = File::open(&artifacts.output_vcf)?;
        classify::check_annotations(&mut annotated)
    };

    let mut delivered = Delivered::default();
    let summary_csv = finalize::deliver_summary(
        &stats_csv_path(&artifacts.output_vcf),
        &request.output_vcf,
        request.summary_csv.as_deref(),
    )?;
    if let Some(path) = &summary_csv {
        delivered.push(path);
    }

    if let Err(e) = finalize::deliver_vcf(&artifacts.output_vcf, &request.output_vcf) {
        delivered.rollback();
        return Err(e.into());
    }
    if let OutputDestination::File(path) = &request.output_vcf {
        delivered.push(path);
    }

    Ok((issues, summary_csv, delivered))
}
