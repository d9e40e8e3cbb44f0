//! Line-oriented readers for the files this tool touches.
//!
//! - [`contigs`]: contig names from the first column of VCF and GTF/GFF files
//! - [`annotated_vcf`]: records and `ANN` entries from snpEff output
//!
//! Neither is a general VCF or GFF parser. Both treat the input as
//! tab-delimited text with `#`-prefixed header lines.

pub mod annotated_vcf;
pub mod contigs;
