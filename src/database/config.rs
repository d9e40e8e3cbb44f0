//! Rendering of the snpEff config for a temporary database.
//!
//! The config names the genome directory `data`, lists the contigs to
//! recognise and assigns a codon table to each of them. Definitions of every
//! recognised codon table are included because a custom config replaces the
//! one shipped with snpEff.

use std::fmt::{self, Write};
use std::path::Path;

use crate::core::codon_table::{CodonTableMap, KnownCodonTable};
use crate::core::contig::ContigSet;

/// Genome directory inside the scratch database, also the genome id passed to snpEff
pub const GENOME_ID: &str = "data";

/// Genome name shown in snpEff reports.
///
/// Strips a trailing `.gff` or `.gff.gz` from the annotation path as given.
/// GTF names are left untouched.
#[must_use]
pub fn genome_name(annotation_path: &Path) -> String {
    let name = annotation_path.to_string_lossy();
    name.strip_suffix(".gff.gz")
        .or_else(|| name.strip_suffix(".gff"))
        .unwrap_or(&*name)
        .to_string()
}

/// Render the config file contents
///
/// # Errors
///
/// Returns `fmt::Error` only if formatting one of the values fails.
pub fn render_config(
    database_dir: &Path,
    genome_name: &str,
    vcf_contigs: &ContigSet,
    codon_tables: &CodonTableMap,
) -> Result<String, fmt::Error> {
    let mut config = String::new();
    write_entries(&mut config, database_dir, genome_name, vcf_contigs, codon_tables)?;
    Ok(config)
}

fn write_entries<W: Write>(
    out: &mut W,
    database_dir: &Path,
    genome_name: &str,
    vcf_contigs: &ContigSet,
    codon_tables: &CodonTableMap,
) -> fmt::Result {
    writeln!(out, "# Temporary snpEff database for {genome_name}")?;
    writeln!(out, "data.dir = {}", database_dir.display())?;
    writeln!(out)?;

    for table in KnownCodonTable::ALL {
        writeln!(out, "codon.{} : {}", table.name(), table.snpeff_codons())?;
    }
    writeln!(out)?;

    let chromosomes: Vec<&str> = vcf_contigs.iter().collect();
    writeln!(out, "{GENOME_ID}.genome : {genome_name}")?;
    writeln!(out, "{GENOME_ID}.chromosomes : {}", chromosomes.join(", "))?;
    for contig in vcf_contigs.iter() {
        if let Some(table) = codon_tables.table_for(contig) {
            writeln!(out, "{GENOME_ID}.{contig}.codonTable : {table}")?;
        }
    }
    Ok(())
}
