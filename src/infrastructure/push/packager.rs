//! Zap packaging - zips the app folder for upload

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::policies::EventFilter;
use crate::domain::ports::PushError;

/// Extension of packaged apps
pub const ZAP_EXTENSION: &str = "zap";

/// A packaged app. The archive is deleted when this value is dropped.
#[derive(Debug)]
pub struct Package {
    path: PathBuf,
    files: usize,
    bytes: u64,
    _dir: TempDir,
}

impl Package {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of files in the archive
    pub fn files(&self) -> usize {
        self.files
    }

    /// Archive size in bytes
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Name an app is uploaded under: the final component of its folder.
pub fn app_name(app_path: &Path) -> Result<String, PushError> {
    app_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PushError::Package(format!("no app name in {}", app_path.display())))
}

/// Zip every file under `app_path` that `filter` does not ignore into
/// `<app-name>.zap` inside a fresh temporary directory.
pub fn package_app(app_path: &Path, filter: &EventFilter) -> Result<Package, PushError> {
    let name = app_name(app_path)?;
    let dir = tempfile::Builder::new().prefix("appix-").tempdir()?;
    let path = dir.path().join(format!("{name}.{ZAP_EXTENSION}"));

    let mut zip = ZipWriter::new(BufWriter::new(File::create(&path)?));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let root = app_path.to_path_buf();
    let walk_filter = filter.clone();
    let walker = WalkBuilder::new(app_path)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| match entry.path().strip_prefix(&root) {
            Ok(rel) => rel.as_os_str().is_empty() || !walk_filter.should_ignore(rel),
            Err(_) => false,
        })
        .build();

    let mut files = 0;
    for entry in walker {
        let entry = entry.map_err(|e| PushError::Package(e.to_string()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(app_path) else {
            continue;
        };

        zip.start_file(archive_name(rel), options)
            .map_err(|e| PushError::Package(e.to_string()))?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        files += 1;
    }

    let mut writer = zip
        .finish()
        .map_err(|e| PushError::Package(e.to_string()))?;
    writer.flush()?;
    drop(writer);

    let bytes = std::fs::metadata(&path)?.len();
    log::debug!("packaged {files} files into {} ({bytes} bytes)", path.display());

    Ok(Package {
        path,
        files,
        bytes,
        _dir: dir,
    })
}

/// Archive entry name: relative path with `/` separators.
fn archive_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
