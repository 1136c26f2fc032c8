//! Data source — where the supplementary archive lives and how to read it.
//!
//! The data directory is plain configuration handed in by the caller; this
//! module never derives it from the environment.
//!
//! ```text
//! DATA_URL ──download──► <data_dir>/data.zip ──unzip──► data/DataS4_disease_pairs.tsv ──► Table
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::table::{Table, TableLoader};
use crate::Result;

/// Supplementary datasets S1–S4 of Menche, J., *et al.* (2015).
pub const DATA_URL: &str =
    "http://science.sciencemag.org/highwire/filestream/628238/field_highwire_adjunct_files/1/Datasets_S1-S4.zip";

/// File name of the archive inside the data directory.
pub const ARCHIVE_FILE: &str = "data.zip";

/// Archive member holding the disease-pair table.
pub const ARCHIVE_MEMBER: &str = "data/DataS4_disease_pairs.tsv";

/// Location of the dataset on disk, and where to fetch it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    data_dir: PathBuf,
    url: String,
}

impl DataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            url: DATA_URL.to_string(),
        }
    }

    /// Override the download URL (mirrors, tests).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(ARCHIVE_FILE)
    }

    pub fn is_downloaded(&self) -> bool {
        self.archive_path().is_file()
    }

    /// Read the disease-pair table out of the local archive.
    pub fn open_table(&self, loader: &TableLoader) -> Result<Table> {
        load_archive(&self.archive_path(), loader)
    }

    /// Fetch the archive unless it is already present (or `force` is set).
    ///
    /// Writes to a `.part` file first so an interrupted download never
    /// leaves a truncated archive behind.
    #[cfg(feature = "download")]
    pub fn ensure_downloaded(&self, force: bool) -> Result<PathBuf> {
        use tracing::info;

        use crate::Error;

        let path = self.archive_path();
        if !force && path.is_file() {
            debug!(path = %path.display(), "archive already present");
            return Ok(path);
        }

        std::fs::create_dir_all(&self.data_dir)?;
        info!(url = %self.url, "downloading disease-pair archive");

        let response = reqwest::blocking::get(&self.url)
            .map_err(|e| Error::Download(format!("{}: {e}", self.url)))?;
        if !response.status().is_success() {
            return Err(Error::Download(format!("{}: HTTP {}", self.url, response.status())));
        }
        let bytes = response
            .bytes()
            .map_err(|e| Error::Download(format!("{}: {e}", self.url)))?;

        let partial = path.with_extension("zip.part");
        std::fs::write(&partial, &bytes)?;
        std::fs::rename(&partial, &path)?;

        info!(path = %path.display(), bytes = bytes.len(), "archive saved");
        Ok(path)
    }
}

/// Open `path` as a zip archive and parse [`ARCHIVE_MEMBER`] with `loader`.
pub fn load_archive(path: &Path, loader: &TableLoader) -> Result<Table> {
    debug!(path = %path.display(), member = ARCHIVE_MEMBER, "opening archive");
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let member = archive.by_name(ARCHIVE_MEMBER)?;
    loader.load(member)
}
