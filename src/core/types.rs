use std::fmt;
use std::path::{Path, PathBuf};

/// Annotation file flavour, decided once from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFormat {
    /// GTF 2.2 (`.gtf`, `.gtf.gz`)
    Gtf,
    /// GFF3, and anything that is not recognisably GTF
    Gff,
}

impl AnnotationFormat {
    /// Classify an annotation file by its name.
    ///
    /// Only `.gtf` (any case) and `.gtf.gz` are GTF; every other name,
    /// including names without an extension, is treated as GFF.
    ///
    /// ```
    /// use snpeff_wrapper::AnnotationFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(AnnotationFormat::from_path(Path::new("genes.gtf.gz")), AnnotationFormat::Gtf);
    /// assert_eq!(AnnotationFormat::from_path(Path::new("genes.gff3")), AnnotationFormat::Gff);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let name = path.to_string_lossy();
        if name.to_lowercase().ends_with(".gtf") || name.ends_with(".gtf.gz") {
            Self::Gtf
        } else {
            Self::Gff
        }
    }

    /// Extension used for the copied `genes.*` file in the scratch database
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gtf => "gtf",
            Self::Gff => "gff",
        }
    }

    /// Flag passed to `snpEff build`
    #[must_use]
    pub fn build_flag(self) -> &'static str {
        match self {
            Self::Gtf => "-gtf22",
            Self::Gff => "-gff3",
        }
    }
}

impl fmt::Display for AnnotationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gtf => write!(f, "GTF"),
            Self::Gff => write!(f, "GFF"),
        }
    }
}

/// Where a final output is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    /// `-` means standard output, anything else is a file path
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for OutputDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gtf_detection() {
        for name in ["genes.gtf", "genes.GTF", "dir/genes.gtf.gz"] {
            assert_eq!(
                AnnotationFormat::from_path(Path::new(name)),
                AnnotationFormat::Gtf,
                "{name}"
            );
        }
    }

    #[test]
    fn test_everything_else_is_gff() {
        for name in ["genes.gff", "genes.gff.gz", "genes.gff3", "genes", "genes.gtf.bz2"] {
            assert_eq!(
                AnnotationFormat::from_path(Path::new(name)),
                AnnotationFormat::Gff,
                "{name}"
            );
        }
    }

    #[test]
    fn test_flag_and_extension_agree() {
        let gtf = AnnotationFormat::from_path(Path::new("a.gtf.gz"));
        assert_eq!(gtf.build_flag(), "-gtf22");
        assert_eq!(gtf.extension(), "gtf");

        let gff = AnnotationFormat::from_path(Path::new("a.gff.gz"));
        assert_eq!(gff.build_flag(), "-gff3");
        assert_eq!(gff.extension(), "gff");
    }

    #[test]
    fn test_output_destination_parse() {
        assert_eq!(OutputDestination::parse("-"), OutputDestination::Stdout);
        assert_eq!(
            OutputDestination::parse("out.vcf"),
            OutputDestination::File(PathBuf::from("out.vcf"))
        );
    }
}
