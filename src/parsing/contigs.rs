//! Line-oriented contig extraction for VCF and GTF/GFF files.
//!
//! Both formats are tab-delimited with the contig name in the first column
//! and `#`-prefixed header or comment lines. This is a syntactic scan only;
//! the rest of each line is never looked at.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::core::contig::ContigSet;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Open a text file, decompressing `.gz` files on the fly
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened.
pub fn open_text(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Collect first-column values from every non-comment line.
///
/// # Errors
///
/// Returns an I/O error if reading fails or a line is not valid UTF-8.
pub fn scan_contigs<R: BufRead>(reader: R) -> io::Result<ContigSet> {
    let mut contigs = ContigSet::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let contig = line.split('\t').next().unwrap_or_default().trim();
        contigs.insert(contig);
    }
    Ok(contigs)
}

/// Rewind a seekable source and collect its contigs.
///
/// The source is always scanned from its first byte, so the same handle
/// can be passed in more than once.
///
/// # Errors
///
/// Returns an I/O error if seeking or reading fails.
pub fn contigs_from_reader<R: Read + Seek>(source: &mut R) -> io::Result<ContigSet> {
    source.seek(SeekFrom::Start(0))?;
    scan_contigs(BufReader::new(source))
}

/// Collect the contigs referenced by an annotation (GTF/GFF) file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn annotation_contigs(path: &Path) -> io::Result<ContigSet> {
    tracing::debug!("Getting the contigs from the annotation file");
    scan_contigs(open_text(path)?)
}

/// Collect the contigs referenced by the records of a VCF file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
pub fn vcf_contigs(path: &Path) -> io::Result<ContigSet> {
    tracing::debug!("Getting the contigs from the VCF");
    scan_contigs(open_text(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};

    #[test]
    fn test_scan_vcf_records() {
        let vcf = "##fileformat=VCFv4.2\n\
                   ##contig=<ID=chr9,length=10>\n\
                   #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                   chr2\t10\t.\tA\tG\t50\tPASS\tDP=3\n\
                   chr1\t20\t.\tC\tT\t50\tPASS\tDP=3\n\
                   chr2\t30\t.\tG\tA\t50\tPASS\tDP=3\n";
        let contigs = scan_contigs(vcf.as_bytes()).unwrap();
        // Header-only contigs are not referenced by any record
        assert_eq!(contigs.iter().collect::<Vec<_>>(), vec!["chr1", "chr2"]);
    }

    #[test]
    fn test_scan_gff_features() {
        let gff = "##gff-version 3\n\
                   #!genome-build test\n\
                   NC_000913.3\tRefSeq\tgene\t190\t255\t.\t+\t.\tID=gene-b0001\n\
                   plasmid1\tRefSeq\tCDS\t337\t2799\t.\t+\t0\tID=cds-1\n\
                   NC_000913.3\tRefSeq\tCDS\t190\t255\t.\t+\t0\tID=cds-0\n";
        let contigs = scan_contigs(gff.as_bytes()).unwrap();
        assert_eq!(
            contigs.iter().collect::<Vec<_>>(),
            vec!["NC_000913.3", "plasmid1"]
        );
    }

    #[test]
    fn test_first_column_is_trimmed_and_blank_lines_skipped() {
        let text = "chr1 \tx\n\n  \nchr1\ty\n";
        let contigs = scan_contigs(text.as_bytes()).unwrap();
        assert_eq!(contigs.iter().collect::<Vec<_>>(), vec!["chr1"]);
    }

    #[test]
    fn test_reader_is_rewound_before_scanning() {
        let mut source = Cursor::new(b"chrB\t1\nchrA\t2\n".to_vec());
        let first = contigs_from_reader(&mut source).unwrap();
        let second = contigs_from_reader(&mut source).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_gzipped_annotation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.gff.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all(b"##gff-version 3\nctg1\tsrc\tgene\t1\t9\t.\t+\t.\tID=g1\n")
            .unwrap();
        encoder.finish().unwrap();

        let contigs = annotation_contigs(&path).unwrap();
        assert_eq!(contigs.iter().collect::<Vec<_>>(), vec!["ctg1"]);
    }
}
