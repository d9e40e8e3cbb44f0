//! Temporary snpEff database.
//!
//! Layout, relative to a uniquely named scratch directory:
//!
//! ```text
//! snpeff_data_dir_XXXXXX/
//! ├── config
//! └── data/
//!     └── genes.gtf | genes.gff
//! ```
//!
//! The scratch directory is owned by a [`TempDir`] guard, so it disappears on
//! every exit path unless [`ScratchDatabase::dispose`] is asked to keep it.

pub mod config;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::core::codon_table::CodonTableMap;
use crate::core::contig::ContigSet;
use crate::core::types::AnnotationFormat;

pub use config::{genome_name, render_config, GENOME_ID};

/// Prefix of every scratch directory
pub const SCRATCH_PREFIX: &str = "snpeff_data_dir_";

/// Name of the generated config file
pub const CONFIG_FILE: &str = "config";

/// A scratch directory laid out the way snpEff expects
#[derive(Debug)]
pub struct ScratchDatabase {
    dir: TempDir,
    format: AnnotationFormat,
}

impl ScratchDatabase {
    /// Create a fresh scratch directory under `parent` and copy the
    /// annotation file into it unmodified.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created or the
    /// annotation file cannot be copied.
    pub fn create(
        parent: &Path,
        annotation_path: &Path,
        format: AnnotationFormat,
    ) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(parent)?;
        debug!("Creating directory {} for temporary database", dir.path().display());

        let database = Self { dir, format };
        let data_dir = database.data_dir();
        debug!("data_dir: {}", data_dir.display());
        create_data_dir(&data_dir)?;
        fs::copy(annotation_path, database.genes_path())?;

        Ok(database)
    }

    /// Scratch root
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn format(&self) -> AnnotationFormat {
        self.format
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root().join(GENOME_ID)
    }

    /// Copied annotation file, `data/genes.gtf` or `data/genes.gff`
    #[must_use]
    pub fn genes_path(&self) -> PathBuf {
        self.data_dir()
            .join(format!("genes.{}", self.format.extension()))
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root().join(CONFIG_FILE)
    }

    /// Render and write the config file, returning its path
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the config cannot be written.
    pub fn write_config(
        &self,
        genome_name: &str,
        vcf_contigs: &ContigSet,
        codon_tables: &CodonTableMap,
    ) -> io::Result<PathBuf> {
        let path = self.config_path();
        let content = render_config(self.root(), genome_name, vcf_contigs, codon_tables)
            .map_err(io::Error::other)?;
        debug!("Writing config to {}", path.display());
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Delete the scratch directory, or keep it and return where it is
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be removed.
    pub fn dispose(self, keep: bool) -> io::Result<Option<PathBuf>> {
        if keep {
            return Ok(Some(self.dir.keep()));
        }
        debug!("Deleting temporary files from {}", self.root().display());
        self.dir.close()?;
        Ok(None)
    }
}

#[cfg(unix)]
fn create_data_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_data_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
