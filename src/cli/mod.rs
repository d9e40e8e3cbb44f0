//! Command-line interface for snpeff-wrapper.
//!
//! ## Usage
//!
//! ```text
//! # Annotate against a bacterial GFF, writing the VCF to stdout
//! snpeff-wrapper calls.vcf ecoli.gff --coding-table '{default: Bacterial_and_Plant_Plastid}'
//!
//! # Per-contig codon tables, output to a file (summary goes to annotated.vcf.csv)
//! snpeff-wrapper calls.vcf genes.gtf.gz \
//!     --coding-table '{chr1: Standard, chrM: Vertebrate_Mitochondrial}' \
//!     -o annotated.vcf
//!
//! # Keep the temporary database and stream snpEff's logs for debugging
//! snpeff-wrapper calls.vcf ecoli.gff -t '{default: Standard}' -o out.vcf --keep --debug
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::core::codon_table::CodonTableMap;
use crate::core::types::OutputDestination;
use crate::pipeline::{annotate_vcf, AnnotationRequest, PipelineError, RunOutcome, RunSummary};
use crate::snpeff::SnpEff;

#[derive(Parser)]
#[command(name = "snpeff-wrapper")]
#[command(version)]
#[command(about = "Build a temporary snpEff database from a GFF/GTF file and annotate a VCF with it")]
#[command(
    long_about = "snpeff-wrapper checks that a VCF, a GFF/GTF annotation and a codon table assignment are consistent, builds a throwaway snpEff database, annotates the VCF with coding effects only and reports known problems found in the output.\n\nContigs are matched by exact name. A run is rejected when no VCF contig has annotation data, when a contig has no codon table, or when a codon table name is unknown."
)]
pub struct Cli {
    /// VCF to annotate
    pub vcf: PathBuf,

    /// Annotation file (.gff, .gff.gz, .gtf or .gtf.gz)
    pub annotation: PathBuf,

    /// Codon table per contig as YAML, e.g. '{default: Bacterial_and_Plant_Plastid}'
    #[arg(short = 't', long)]
    pub coding_table: String,

    /// Where to write the annotated VCF ('-' for stdout)
    #[arg(short, long, default_value = "-")]
    pub output_vcf: String,

    /// Where to write the snpEff summary CSV (default: <output-vcf>.csv)
    #[arg(long)]
    pub summary_csv: Option<PathBuf>,

    /// Path to snpEff.jar (default: ./snpEff.jar, then PATH)
    #[arg(long, env = "SNPEFF_JAR")]
    pub snpeff_exec: Option<PathBuf>,

    /// Java runtime used to run snpEff (must be OpenJDK)
    #[arg(long, env = "SNPEFF_JAVA")]
    pub java_exec: Option<PathBuf>,

    /// Directory in which the temporary database is created
    #[arg(long, default_value = ".")]
    pub tmp_dir: PathBuf,

    /// Keep the temporary database after the run
    #[arg(short, long)]
    pub keep: bool,

    /// Stream snpEff's output to the console and log debug messages
    #[arg(short, long)]
    pub debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute a full annotation run
///
/// # Errors
///
/// Returns an error if snpEff or Java cannot be found, the codon table
/// cannot be parsed, the inputs are inconsistent, or snpEff fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let summary = match annotate(&cli) {
        Ok(summary) => summary,
        Err(e) => {
            debug!("Run ended: {}", e.kind());
            return Err(e.into());
        }
    };
    debug!("Run ended: {}", RunOutcome::Ok);

    if cli.verbose {
        eprintln!(
            "Annotated {} -> {} ({} warnings before annotation, {} issue types in output)",
            cli.vcf.display(),
            OutputDestination::parse(&cli.output_vcf),
            summary.validation.warnings().len(),
            summary.issues.iter().count(),
        );
    }

    Ok(())
}

fn annotate(cli: &Cli) -> Result<RunSummary, PipelineError> {
    let snpeff = SnpEff::discover(cli.java_exec.as_deref(), cli.snpeff_exec.as_deref())?;
    let codon_tables = CodonTableMap::parse(&cli.coding_table)?;

    let mut request = AnnotationRequest::new(
        &cli.vcf,
        &cli.annotation,
        codon_tables,
        OutputDestination::parse(&cli.output_vcf),
    );
    request.summary_csv.clone_from(&cli.summary_csv);
    request.scratch_parent.clone_from(&cli.tmp_dir);
    request.debug = cli.debug;
    request.keep = cli.keep;

    annotate_vcf(&snpeff, &request)
}
