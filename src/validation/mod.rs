//! Consistency checks between the VCF, the annotation file and the codon
//! table mapping.
//!
//! Three independent checks run to completion before any verdict, so every
//! offending contig or table name is reported, not just the first:
//!
//! 1. **Codon table coverage**: without a `default` entry, every VCF contig
//!    needs its own codon table.
//! 2. **Annotation coverage**: VCF contigs missing from the annotation file
//!    are warned about. Partial overlap is tolerated, zero overlap is fatal.
//! 3. **Codon table names**: every table named in the mapping must be one
//!    snpEff knows.
//!
//! The first failing check, in that order, decides the error.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::core::codon_table::{is_known_codon_table, CodonTableMap};
use crate::core::contig::ContigSet;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Could not find coding tables for all contigs, see warnings for details")]
    MissingCodonTable,

    #[error("Could not find annotation data for any contigs, see warnings for details")]
    NoCommonContigs,

    #[error("Could not find coding table, see warnings for details")]
    UnknownCodingTable,
}

/// A non-fatal finding, logged before the verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// VCF contig with no codon table and no `default` entry
    MissingCodonTable(String),
    /// VCF contig absent from the annotation file
    MissingAnnotation(String),
    /// Codon table name snpEff does not know
    UnknownCodonTable(String),
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCodonTable(contig) => {
                write!(f, "Cannot annotate VCF, no coding table set for '{contig}'")
            }
            Self::MissingAnnotation(contig) => {
                write!(f, "Could not annotate contig '{contig}', no annotation data")
            }
            Self::UnknownCodonTable(name) => write!(f, "Could not find coding table '{name}'"),
        }
    }
}

/// Everything the three checks found
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// VCF contigs without a codon table
    pub missing_codon_tables: Vec<String>,
    /// VCF contigs without annotation data
    pub missing_annotations: Vec<String>,
    /// Unrecognised codon table names, one per mapping entry
    pub unknown_codon_tables: Vec<String>,
    vcf_contig_count: usize,
}

impl ValidationReport {
    /// Run all three checks without logging or failing
    #[must_use]
    pub fn compute(
        vcf_contigs: &ContigSet,
        annotation_contigs: &ContigSet,
        codon_tables: &CodonTableMap,
    ) -> Self {
        let missing_codon_tables = if codon_tables.has_wildcard() {
            Vec::new()
        } else {
            vcf_contigs
                .iter()
                .filter(|contig| !codon_tables.contains(contig))
                .map(str::to_string)
                .collect()
        };

        let missing_annotations = vcf_contigs
            .missing_from(annotation_contigs)
            .into_iter()
            .map(str::to_string)
            .collect();

        let unknown_codon_tables = codon_tables
            .table_names()
            .filter(|name| !is_known_codon_table(name))
            .map(str::to_string)
            .collect();

        Self {
            missing_codon_tables,
            missing_annotations,
            unknown_codon_tables,
            vcf_contig_count: vcf_contigs.len(),
        }
    }

    /// Warnings in check order
    #[must_use]
    pub fn warnings(&self) -> Vec<ValidationWarning> {
        let codon = self
            .missing_codon_tables
            .iter()
            .cloned()
            .map(ValidationWarning::MissingCodonTable);
        let annotation = self
            .missing_annotations
            .iter()
            .cloned()
            .map(ValidationWarning::MissingAnnotation);
        let names = self
            .unknown_codon_tables
            .iter()
            .cloned()
            .map(ValidationWarning::UnknownCodonTable);
        codon.chain(annotation).chain(names).collect()
    }

    /// True when no VCF contig has annotation data.
    ///
    /// A VCF without records shares nothing with the annotation either.
    #[must_use]
    pub fn no_common_contigs(&self) -> bool {
        self.missing_annotations.len() == self.vcf_contig_count
    }

    /// The first fatal condition in check order
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` for the first check that failed.
    pub fn verdict(&self) -> Result<(), ValidationError> {
        if !self.missing_codon_tables.is_empty() {
            return Err(ValidationError::MissingCodonTable);
        }
        if self.no_common_contigs() {
            return Err(ValidationError::NoCommonContigs);
        }
        if !self.unknown_codon_tables.is_empty() {
            return Err(ValidationError::UnknownCodingTable);
        }
        Ok(())
    }
}

/// Check that the contigs and codon tables are consistent, logging every
/// problem found before returning the verdict.
///
/// # Errors
///
/// Returns `ValidationError::MissingCodonTable`, `NoCommonContigs` or
/// `UnknownCodingTable` for the first check (in that order) that failed.
pub fn check_contigs(
    vcf_contigs: &ContigSet,
    annotation_contigs: &ContigSet,
    codon_tables: &CodonTableMap,
) -> Result<ValidationReport, ValidationError> {
    info!("Checking that the VCF and GTF/GFF contigs are consistent");

    let report = ValidationReport::compute(vcf_contigs, annotation_contigs, codon_tables);
    for warning in report.warnings() {
        warn!("{warning}");
    }
    report.verdict()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contigs(names: &[&str]) -> ContigSet {
        names.iter().copied().collect()
    }

    fn wildcard() -> CodonTableMap {
        [("default", "Standard")].into_iter().collect()
    }

    #[test]
    fn test_consistent_inputs() {
        let report =
            check_contigs(&contigs(&["chr1", "chr2"]), &contigs(&["chr1", "chr2"]), &wildcard())
                .unwrap();
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_wildcard_covers_every_contig() {
        let vcf = contigs(&["a", "b", "c", "unlisted"]);
        let report = ValidationReport::compute(&vcf, &vcf, &wildcard());
        assert!(report.missing_codon_tables.is_empty());
        assert!(report.verdict().is_ok());
    }

    #[test]
    fn test_partial_overlap_warns_once() {
        let report =
            check_contigs(&contigs(&["chr1", "chr2"]), &contigs(&["chr2", "chr3"]), &wildcard())
                .unwrap();
        assert_eq!(
            report.warnings(),
            vec![ValidationWarning::MissingAnnotation("chr1".to_string())]
        );
        assert_eq!(
            report.warnings()[0].to_string(),
            "Could not annotate contig 'chr1', no annotation data"
        );
    }

    #[test]
    fn test_zero_overlap_is_fatal() {
        let result = check_contigs(&contigs(&["chr1"]), &contigs(&["chr9"]), &wildcard());
        assert_eq!(result.unwrap_err(), ValidationError::NoCommonContigs);
    }

    #[test]
    fn test_missing_codon_table_is_fatal() {
        let tables: CodonTableMap = [("chr1", "Standard")].into_iter().collect();
        let vcf = contigs(&["chr1", "chr2", "chr3"]);
        let report = ValidationReport::compute(&vcf, &vcf, &tables);
        assert_eq!(report.missing_codon_tables, vec!["chr2", "chr3"]);
        assert_eq!(report.verdict(), Err(ValidationError::MissingCodonTable));
    }

    #[test]
    fn test_unknown_codon_table_is_fatal() {
        let tables: CodonTableMap = [("default", "NotARealTable")].into_iter().collect();
        let vcf = contigs(&["chr1"]);
        let report = ValidationReport::compute(&vcf, &vcf, &tables);
        assert_eq!(
            report.warnings(),
            vec![ValidationWarning::UnknownCodonTable("NotARealTable".to_string())]
        );
        assert_eq!(
            check_contigs(&vcf, &vcf, &tables).unwrap_err(),
            ValidationError::UnknownCodingTable
        );
    }

    #[test]
    fn test_all_checks_run_before_verdict() {
        // Every check fails; all warnings are present and the first check wins
        let tables: CodonTableMap = [("chrX", "Bogus")].into_iter().collect();
        let report = ValidationReport::compute(&contigs(&["chr1"]), &contigs(&["chr9"]), &tables);
        assert_eq!(
            report.warnings(),
            vec![
                ValidationWarning::MissingCodonTable("chr1".to_string()),
                ValidationWarning::MissingAnnotation("chr1".to_string()),
                ValidationWarning::UnknownCodonTable("Bogus".to_string()),
            ]
        );
        assert_eq!(report.verdict(), Err(ValidationError::MissingCodonTable));
    }

    #[test]
    fn test_vcf_without_records_is_rejected() {
        let report = ValidationReport::compute(&ContigSet::new(), &contigs(&["chr1"]), &wildcard());
        assert!(report.warnings().is_empty());
        assert_eq!(report.verdict(), Err(ValidationError::NoCommonContigs));
    }

    #[test]
    fn test_no_common_contigs_precedes_unknown_table() {
        let tables: CodonTableMap = [("default", "Bogus")].into_iter().collect();
        let report = ValidationReport::compute(&contigs(&["chr1"]), &contigs(&["chr9"]), &tables);
        assert_eq!(report.verdict(), Err(ValidationError::NoCommonContigs));
    }
}
