//! Download and unpack zip-archived datasets into a project directory.
//!
//! Layout under the project root:
//! `datasets/__archives__/<name>.zip` holds the cached download and
//! `datasets/<name>/` holds the extracted contents.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use url::Url;

use crate::error::Error;
use crate::http_client;

mod archive;

/// Top-level directory for extracted datasets.
const DATASETS_DIR: &str = "datasets";
/// Nested cache directory for downloaded archives.
const ARCHIVES_DIR: &str = "__archives__";
/// Minimum length for a dataset name after trimming.
const MIN_NAME_LEN: usize = 3;

/// Derived cache and extraction paths for one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    /// Cached archive file, `<root>/datasets/__archives__/<name>.zip`.
    pub archive_path: PathBuf,
    /// Extraction directory, `<root>/datasets/<name>/`.
    pub extract_dir: PathBuf,
}

impl DatasetLayout {
    /// Resolve the layout for a normalized dataset name under a project root.
    pub fn resolve(project_root: &Path, normalized_name: &str) -> Self {
        let datasets_dir = project_root.join(DATASETS_DIR);
        Self {
            archive_path: datasets_dir
                .join(ARCHIVES_DIR)
                .join(format!("{normalized_name}.zip")),
            extract_dir: datasets_dir.join(normalized_name),
        }
    }
}

/// Canonical dataset identifier: lowercase with spaces replaced by underscores.
pub fn normalize_dataset_name(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}

/// Download a zip-archived dataset and extract it under `project_root`.
///
/// The archive is cached at `datasets/__archives__/<name>.zip` (overwriting
/// any previous download of the same name) and extracted into
/// `datasets/<name>/`. Returns `project_root` on success. A cached archive
/// that fails extraction is left in place.
pub fn fetch_and_unpack(
    project_root: &Path,
    source_url: &str,
    dataset_name: &str,
) -> Result<PathBuf, Error> {
    let parsed = Url::parse(source_url.trim())
        .map_err(|err| Error::Validation(format!("'source_url' must be a valid url: {err}")))?;
    if !parsed.has_host() {
        return Err(Error::Validation(
            "'source_url' must include a host".to_string(),
        ));
    }
    if dataset_name.trim().len() < MIN_NAME_LEN {
        return Err(Error::Validation(format!(
            "'dataset_name' must be at least {MIN_NAME_LEN} characters"
        )));
    }

    let name = normalize_dataset_name(dataset_name);
    let layout = DatasetLayout::resolve(project_root, &name);
    if let Some(cache_dir) = layout.archive_path.parent() {
        std::fs::create_dir_all(cache_dir)?;
    }

    debug!(url = %parsed, dataset = %name, "downloading dataset archive");
    // Response status is not checked; an error page saved here fails at
    // extraction instead.
    let response = match http_client::agent().get(parsed.as_str()).call() {
        Ok(response) | Err(ureq::Error::Status(_, response)) => response,
        Err(err) => {
            return Err(Error::Transfer {
                url: parsed.to_string(),
                message: err.to_string(),
            });
        }
    };

    let mut file = File::create(&layout.archive_path)?;
    let bytes = http_client::copy_response_to_writer(response, &mut file)?;
    debug!(
        path = %layout.archive_path.display(),
        bytes,
        "saved dataset archive"
    );

    archive::unzip_to_dir(&layout.archive_path, &layout.extract_dir)?;
    info!(
        dataset = %name,
        dir = %layout.extract_dir.display(),
        "dataset ready"
    );
    Ok(project_root.to_path_buf())
}
