//! Delivery of the final outputs and disposal of the scratch database.
//!
//! Nothing here runs until snpEff has finished successfully. Every file placed
//! at a caller's destination is recorded in [`Delivered`], and removed again if
//! a later step fails, so a failed run leaves no partial outputs behind. A VCF
//! already streamed to stdout cannot be taken back, which is why it goes last.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::types::OutputDestination;
use crate::database::ScratchDatabase;
use crate::snpeff::stats_csv_path;

/// Move a file, copying when a rename is impossible (e.g. across filesystems)
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    if let Err(e) = fs::copy(from, to) {
        // A failed copy can leave a truncated file behind
        if to.exists() {
            let _ = fs::remove_file(to);
        }
        return Err(e);
    }
    fs::remove_file(from)
}

/// Outputs already placed at the caller's destinations
#[derive(Debug, Default)]
pub struct Delivered {
    paths: Vec<PathBuf>,
}

impl Delivered {
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Remove every delivered file after a later failure
    pub fn rollback(self) {
        for path in self.paths {
            warn!("Removing {} after a failed run", path.display());
            if let Err(e) = fs::remove_file(&path) {
                warn!("Could not remove {}: {e}", path.display());
            }
        }
    }
}

/// Move the annotated VCF to its destination, or stream it to stdout
///
/// # Errors
///
/// Returns an I/O error if the file cannot be moved, read or written.
pub fn deliver_vcf(annotated_vcf: &Path, destination: &OutputDestination) -> io::Result<()> {
    match destination {
        OutputDestination::Stdout => {
            info!("Writing output to stdout");
            // stdout cannot be moved onto, so the whole file goes through memory
            let content = fs::read(annotated_vcf)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&content)?;
            stdout.flush()
        }
        OutputDestination::File(path) => {
            info!(
                "Moving annotated VCF from {} to {}",
                annotated_vcf.display(),
                path.display()
            );
            move_file(annotated_vcf, path)
        }
    }
}

/// Move the summary CSV next to the output VCF (`<output>.csv`) or to an
/// explicit path, returning where it went.
///
/// When the VCF is streamed to stdout and no explicit path is given the CSV
/// stays in the scratch directory.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be moved.
pub fn deliver_summary(
    summary_csv: &Path,
    vcf_destination: &OutputDestination,
    explicit: Option<&Path>,
) -> io::Result<Option<PathBuf>> {
    let target = match (explicit, vcf_destination) {
        (Some(path), _) => path.to_path_buf(),
        (None, OutputDestination::File(vcf)) => stats_csv_path(vcf),
        (None, OutputDestination::Stdout) => {
            info!("Not writing the summary CSV, the annotated VCF went to stdout");
            return Ok(None);
        }
    };

    if !summary_csv.is_file() {
        warn!("snpEff did not write a summary CSV to {}", summary_csv.display());
        return Ok(None);
    }

    info!(
        "Moving summary CSV from {} to {}",
        summary_csv.display(),
        target.display()
    );
    move_file(summary_csv, &target)?;
    Ok(Some(target))
}

/// Delete the scratch database unless it should be kept for debugging
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be removed.
pub fn dispose_scratch(database: ScratchDatabase, keep: bool) -> io::Result<Option<PathBuf>> {
    let retained = database.dispose(keep)?;
    if let Some(path) = &retained {
        info!("You can find the temporary files in '{}'", path.display());
    }
    Ok(retained)
}
