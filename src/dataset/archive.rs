//! Zip extraction for downloaded dataset archives.

use std::fs::File;
use std::path::Path;

use crate::error::Error;

/// Extract a zip archive's full contents into a directory.
///
/// The directory structure stored in the archive is preserved. Entries whose
/// names would escape `dest_dir` are skipped.
pub(super) fn unzip_to_dir(zip_path: &Path, dest_dir: &Path) -> Result<(), Error> {
    let file = File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|err| Error::Extraction {
        archive: zip_path.to_path_buf(),
        message: err.to_string(),
    })?;
    std::fs::create_dir_all(dest_dir)?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|err| Error::Extraction {
            archive: zip_path.to_path_buf(),
            message: err.to_string(),
        })?;
        let outpath = match entry.enclosed_name() {
            Some(path) => dest_dir.join(path),
            None => continue,
        };
        if entry.name().ends_with('/') {
            std::fs::create_dir_all(&outpath)?;
            continue;
        }
        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&outpath)?;
        std::io::copy(&mut entry, &mut outfile)?;
    }
    Ok(())
}
