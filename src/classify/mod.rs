//! Scan snpEff output for known warning and error tokens.
//!
//! snpEff can exit successfully while still flagging systemic problems in
//! the `ANN` entries of individual records, for example a reference base that
//! disagrees with the annotation or a contig it never heard of. This pass
//! counts the records carrying each known token and turns non-zero counts
//! into warnings with a plain-language explanation. It never fails the run.
//!
//! A record without an `ANN` entry is scanned using the annotation text of
//! the previous annotated record, so it repeats that record's findings.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use tracing::{info, warn};

use crate::parsing::annotated_vcf::{AnnotatedRecord, AnnotatedVcfReader};

/// Problems snpEff reports inside `ANN` entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnownIssue {
    RefDoesNotMatchGenome,
    SequenceNotAvailable,
    TranscriptNoStartCodon,
    ChromosomeNotFound,
    OutOfChromosomeRange,
}

impl KnownIssue {
    pub const ALL: [Self; 5] = [
        Self::RefDoesNotMatchGenome,
        Self::SequenceNotAvailable,
        Self::TranscriptNoStartCodon,
        Self::ChromosomeNotFound,
        Self::OutOfChromosomeRange,
    ];

    /// Token as it appears in the annotated VCF
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::RefDoesNotMatchGenome => "WARNING_REF_DOES_NOT_MATCH_GENOME",
            Self::SequenceNotAvailable => "WARNING_SEQUENCE_NOT_AVAILABLE",
            Self::TranscriptNoStartCodon => "WARNING_TRANSCRIPT_NO_START_CODON",
            Self::ChromosomeNotFound => "ERROR_CHROMOSOME_NOT_FOUND",
            Self::OutOfChromosomeRange => "ERROR_OUT_OF_CHROMOSOME_RANGE",
        }
    }

    #[must_use]
    pub fn explanation(self) -> &'static str {
        match self {
            Self::RefDoesNotMatchGenome => {
                "The reference base in your VCF didn't match the base in the annotation file. \
                 Are you sure you have the right reference?"
            }
            Self::SequenceNotAvailable => {
                "A reference sequence was not available in your annotation file. \
                 Please check that a reference sequence is available for every contig in your VCF"
            }
            Self::TranscriptNoStartCodon => {
                "Start codon does not match any 'start' codon in the CodonTable. \
                 This usually indicates an error on the reference genome (or database) \
                 but could be also due to a misconfigured codon table for the genome."
            }
            Self::ChromosomeNotFound => {
                "A contig in your VCF could not be found in your annotation file. \
                 Are you sure that contigs use consistent names between your input data and the reference?"
            }
            Self::OutOfChromosomeRange => {
                "One of your variants appears to be in a position beyond the end of the reference sequence. \
                 Please check that your reference sequence matches your input data"
            }
        }
    }
}

impl fmt::Display for KnownIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Number of records carrying each known issue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTally {
    counts: BTreeMap<KnownIssue, usize>,
}

impl ErrorTally {
    /// Count every token present in one record's annotation text, once each
    pub fn record(&mut self, annotation: &str) {
        for issue in KnownIssue::ALL {
            if annotation.contains(issue.token()) {
                *self.counts.entry(issue).or_default() += 1;
            }
        }
    }

    #[must_use]
    pub fn count(&self, issue: KnownIssue) -> usize {
        self.counts.get(&issue).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Issues with a non-zero count
    pub fn iter(&self) -> impl Iterator<Item = (KnownIssue, usize)> + '_ {
        self.counts.iter().map(|(issue, count)| (*issue, *count))
    }
}

/// Tally issues across records, carrying annotation text over records
/// that have none of their own
pub fn tally_records<I>(records: I) -> ErrorTally
where
    I: IntoIterator<Item = AnnotatedRecord>,
{
    let mut tally = ErrorTally::default();
    let mut annotations = String::new();
    for record in records {
        // Carried-over text is only replaced by a record's own ANN entry.
        // Every record is scanned, including those with their own entry, so a
        // token counts once for its record and once per record inheriting it.
        if let Some(annotation) = record.annotation() {
            annotations = annotation.to_string();
        }
        tally.record(&annotations);
    }
    tally
}

/// Tally issues in an annotated VCF stream
///
/// # Errors
///
/// Returns an I/O error if the stream cannot be read.
pub fn scan_annotations<R: BufRead>(reader: R) -> io::Result<ErrorTally> {
    let records = AnnotatedVcfReader::new(reader).collect::<io::Result<Vec<_>>>()?;
    Ok(tally_records(records))
}

/// Log one warning per issue found, with its explanation
pub fn report(tally: &ErrorTally) {
    for (issue, count) in tally.iter() {
        warn!("{count} instances of '{issue}': {}", issue.explanation());
    }
    if !tally.is_empty() {
        warn!("There were problems during the annotation, please review the warnings for details");
    }
}

/// Rewind the annotated VCF, tally known issues and log them.
///
/// Read failures are logged and produce an empty tally; this check is
/// diagnostic only.
pub fn check_annotations<R: Read + Seek>(annotated_vcf: &mut R) -> ErrorTally {
    info!("Checking the annotated VCF for common issues");

    let tally = annotated_vcf
        .seek(SeekFrom::Start(0))
        .and_then(|_| scan_annotations(BufReader::new(annotated_vcf)));
    match tally {
        Ok(tally) => {
            report(&tally);
            tally
        }
        Err(e) => {
            warn!("Could not check the annotated VCF for common issues: {e}");
            ErrorTally::default()
        }
    }
}
