//! Minimal record reader for the VCF written by `snpEff ann`.
//!
//! snpEff adds meta lines that strict VCF readers reject, and the classifier
//! only needs the `ANN` entry of each record, so `##` lines are dropped and
//! the remaining lines are split on tabs.

use std::io::{self, BufRead, Lines};

/// Index of the INFO column in a VCF record
const INFO_COLUMN: usize = 7;

/// INFO key under which snpEff writes its annotations
pub const ANN_KEY: &str = "ANN";

/// One data line of an annotated VCF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord {
    pub info: Option<String>,
}

impl AnnotatedRecord {
    /// Parse a tab-delimited data line
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let info = line
            .split('\t')
            .nth(INFO_COLUMN)
            .filter(|info| !info.is_empty() && *info != ".")
            .map(str::to_string);
        Self { info }
    }

    /// Value of the `ANN` INFO entry, if the record has one
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.info.as_deref()?.split(';').find_map(|entry| {
            let (key, value) = entry.split_once('=')?;
            (key == ANN_KEY).then_some(value)
        })
    }
}

/// Iterator over the records of an annotated VCF, skipping all header lines
pub struct AnnotatedVcfReader<R> {
    lines: Lines<R>,
}

impl<R: BufRead> AnnotatedVcfReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for AnnotatedVcfReader<R> {
    type Item = io::Result<AnnotatedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            // `##` meta lines and the `#CHROM` column header
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            return Some(Ok(AnnotatedRecord::from_line(&line)));
        }
    }
}
