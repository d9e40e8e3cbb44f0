//! # snpeff-wrapper
//!
//! Annotate a VCF with snpEff using a genome annotation (GFF3/GTF) that snpEff
//! has no prebuilt database for.
//!
//! snpEff will happily annotate variants against the wrong contigs or with
//! the wrong codon table without complaint. `snpeff-wrapper` checks the
//! inputs before anything runs, builds a throwaway snpEff database in a
//! scratch directory, runs snpEff restricted to coding effects, and scans the
//! output for problems snpEff reported but did not fail on.
//!
//! ## Features
//!
//! - **Consistency checks**: VCF contigs against the annotation file and the codon table mapping
//! - **Self-contained databases**: config with generated codon table definitions
//! - **Output checks**: counts of known snpEff warnings and errors, with explanations
//! - **Clean up**: the scratch directory is removed on every exit path unless kept
//!
//! ## Example
//!
//! ```rust,no_run
//! use snpeff_wrapper::{annotate_vcf, AnnotationRequest, CodonTableMap, OutputDestination, SnpEff};
//!
//! let snpeff = SnpEff::discover(None, None).unwrap();
//! let tables = CodonTableMap::parse("{default: Bacterial_and_Plant_Plastid}").unwrap();
//! let request = AnnotationRequest::new(
//!     "calls.vcf",
//!     "ecoli.gff",
//!     tables,
//!     OutputDestination::parse("annotated.vcf"),
//! );
//!
//! let summary = annotate_vcf(&snpeff, &request).unwrap();
//! for (issue, count) in summary.issues.iter() {
//!     println!("{issue}: {count}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Contig sets, codon tables and small shared types
//! - [`parsing`]: Line-oriented contig and annotated-record readers
//! - [`validation`]: Contig and codon table consistency checks
//! - [`database`]: Temporary snpEff database and config rendering
//! - [`snpeff`]: snpEff command-line contract and executable discovery
//! - [`classify`]: Known-issue scan of the annotated VCF
//! - [`pipeline`]: The end-to-end run and output delivery
//! - [`cli`]: Command-line interface implementation

pub mod classify;
pub mod cli;
pub mod core;
pub mod database;
pub mod parsing;
pub mod pipeline;
pub mod snpeff;
pub mod validation;

// Re-export commonly used types for convenience
pub use classify::{ErrorTally, KnownIssue};
pub use self::core::codon_table::{CodonTableMap, KnownCodonTable};
pub use self::core::contig::ContigSet;
pub use self::core::types::{AnnotationFormat, OutputDestination};
pub use pipeline::{annotate_vcf, AnnotationRequest, PipelineError, RunOutcome, RunSummary};
pub use snpeff::{SnpEff, SnpEffError};
pub use validation::{check_contigs, ValidationError, ValidationReport};
