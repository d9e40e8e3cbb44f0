//! Shared fixtures: small inputs and a fake `java` that mimics snpEff.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const VCF: &str = "##fileformat=VCFv4.2\n\
##contig=<ID=chr1,length=1000>\n\
##contig=<ID=chr2,length=1000>\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
chr1\t100\t.\tA\tG\t50\tPASS\tDP=10\n\
chr1\t200\t.\tC\tT\t50\tPASS\tDP=12\n\
chr2\t300\t.\tG\tA\t50\tPASS\tDP=8\n";

pub const GFF: &str = "##gff-version 3\n\
chr1\ttest\tgene\t50\t400\t.\t+\t.\tID=gene1\n\
chr1\ttest\tCDS\t50\t400\t.\t+\t0\tID=cds1;Parent=gene1\n\
chr2\ttest\tgene\t250\t600\t.\t-\t.\tID=gene2\n";

/// How the fake snpEff behaves
pub struct FakeSnpEff {
    pub build_exit: i32,
    pub annotate_exit: i32,
    /// Value appended to every record as `ANN=<value>`
    pub annotation: String,
}

impl Default for FakeSnpEff {
    fn default() -> Self {
        Self {
            build_exit: 0,
            annotate_exit: 0,
            annotation: "G|missense_variant|MODERATE|gene1".to_string(),
        }
    }
}

impl FakeSnpEff {
    /// Write an executable `java` script into `dir`.
    ///
    /// `-version` reports OpenJDK. `build` checks the scratch layout, echoes
    /// its format flag and exits with `build_exit`. `ann` writes the summary
    /// CSV and prints the input VCF with an `ANN` entry added to each record.
    pub fn install(&self, dir: &Path) -> PathBuf {
        let script = format!(
            r##"#!/bin/sh
if [ "$2" = "-version" ]; then
    echo 'openjdk version "17.0.8" 2023-07-18' >&2
    exit 0
fi
case "$4" in
    build)
        config="$9"
        [ -f "$config" ] || exit 3
        ls "$(dirname "$config")"/data/genes.* >/dev/null || exit 4
        echo "build $5"
        exit {build_exit}
        ;;
    ann)
        prev=""
        for arg in "$@"; do
            if [ "$prev" = "-csvStats" ]; then csv="$arg"; fi
            prev="$arg"
            vcf="$arg"
        done
        echo "# Summary table" > "$csv"
        sed -e '/^#/!s/$/;ANN={annotation}/' "$vcf"
        exit {annotate_exit}
        ;;
esac
exit 2
"##,
            build_exit = self.build_exit,
            annotate_exit = self.annotate_exit,
            annotation = self.annotation,
        );

        let path = dir.join("java");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}

/// Test workspace holding the inputs, a fake snpEff jar and the fake java
pub struct Workspace {
    pub dir: tempfile::TempDir,
    pub vcf: PathBuf,
    pub annotation: PathBuf,
    pub jar: PathBuf,
    pub java: PathBuf,
}

impl Workspace {
    pub fn new(annotation_name: &str, fake: &FakeSnpEff) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let vcf = dir.path().join("calls.vcf");
        let annotation = dir.path().join(annotation_name);
        let jar = dir.path().join("snpEff.jar");
        fs::write(&vcf, VCF).unwrap();
        fs::write(&annotation, GFF).unwrap();
        fs::write(&jar, b"PK").unwrap();
        let java = fake.install(dir.path());
        Self {
            dir,
            vcf,
            annotation,
            jar,
            java,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Scratch directories left behind in the workspace
    pub fn scratch_dirs(&self) -> Vec<PathBuf> {
        fs::read_dir(self.path())
            .unwrap()
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_dir()
                    && path
                        .file_name()
                        .is_some_and(|n| n.to_string_lossy().starts_with("snpeff_data_dir_"))
            })
            .collect()
    }
}

/// Lines that are not headers
pub fn record_count(text: &str) -> usize {
    text.lines().filter(|line| !line.starts_with('#')).count()
}
