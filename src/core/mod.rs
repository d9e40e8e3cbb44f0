//! Core data types shared by the validator, database builder and pipeline.
//!
//! - [`ContigSet`](contig::ContigSet): sorted, duplicate-free contig names from one file
//! - [`CodonTableMap`](codon_table::CodonTableMap): contig to codon table assignments
//! - [`KnownCodonTable`](codon_table::KnownCodonTable): the codon tables snpEff recognises
//! - [`AnnotationFormat`](types::AnnotationFormat): GTF vs GFF, decided once per run
//!
//! ## Contig Naming
//!
//! Contigs are compared by **exact name**. A VCF using `chr1` and an
//! annotation file using `1` share no contigs, and the run is rejected.

pub mod codon_table;
pub mod contig;
pub mod types;
