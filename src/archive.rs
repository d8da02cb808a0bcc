//! Zip archive creation, extraction, and listing.
//!
//! Operations are synchronous; the UI runs each one on a background task
//! and receives the outcome over a channel (see `ui::archive_panel`).

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{AppError, Result};

/// One entry enumerated from an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub is_dir: bool,
}

/// Outcome of a create or extract operation.
#[derive(Debug, Clone)]
pub struct ArchiveResult {
    pub archive_path: PathBuf,
    pub entries: usize,
    pub duration_secs: f64,
}

impl ArchiveResult {
    /// Get summary message.
    pub fn summary(&self) -> String {
        format!(
            "{} entries in {} (took {:.1}s)",
            self.entries,
            self.archive_path.display(),
            self.duration_secs
        )
    }
}

/// Create a zip archive from a mix of files and folders.
///
/// Files land at the archive root under their file name; folders are
/// added recursively, keeping paths relative to the folder's parent.
pub fn create_archive<F>(items: &[PathBuf], dest: &Path, mut on_progress: F) -> Result<ArchiveResult>
where
    F: FnMut(f32, &str),
{
    if items.is_empty() {
        return Err(AppError::validation("No files or folders selected"));
    }

    let start = std::time::Instant::now();
    let file = File::create(dest)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    for (idx, item) in items.iter().enumerate() {
        on_progress(
            idx as f32 / items.len() as f32,
            &format!("Adding {}", item.display()),
        );

        if item.is_dir() {
            let base = item.parent().unwrap_or(Path::new(""));
            entries += add_dir_recursive(&mut writer, item, base, options)?;
        } else {
            let name = item
                .file_name()
                .ok_or_else(|| AppError::validation(format!("Invalid path: {}", item.display())))?
                .to_string_lossy()
                .into_owned();
            writer.start_file(name, options)?;
            let mut reader = File::open(item)?;
            io::copy(&mut reader, &mut writer)?;
            entries += 1;
        }
    }

    writer.finish()?;
    on_progress(1.0, "Archive written");

    Ok(ArchiveResult {
        archive_path: dest.to_path_buf(),
        entries,
        duration_secs: start.elapsed().as_secs_f64(),
    })
}

/// Add a directory tree to the archive, names relative to `base`.
fn add_dir_recursive(
    writer: &mut ZipWriter<File>,
    dir: &Path,
    base: &Path,
    options: SimpleFileOptions,
) -> Result<usize> {
    let rel = dir.strip_prefix(base).unwrap_or(dir);
    writer.add_directory(format!("{}/", rel.display()), options)?;
    let mut entries = 1usize;

    let mut children: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    children.sort();

    for child in children {
        if child.is_dir() {
            entries += add_dir_recursive(writer, &child, base, options)?;
        } else {
            let rel = child.strip_prefix(base).unwrap_or(&child);
            writer.start_file(rel.to_string_lossy().replace('\\', "/"), options)?;
            let mut reader = File::open(&child)?;
            io::copy(&mut reader, writer)?;
            entries += 1;
        }
    }

    Ok(entries)
}

/// Extract an archive into `dest`, preserving directory structure.
///
/// Entries whose names would escape `dest` (absolute or `..` paths) are
/// rejected.
pub fn extract_archive<F>(src: &Path, dest: &Path, mut on_progress: F) -> Result<ArchiveResult>
where
    F: FnMut(f32, &str),
{
    let start = std::time::Instant::now();
    let file = File::open(src)?;
    let mut archive = ZipArchive::new(file)?;
    std::fs::create_dir_all(dest)?;

    let total = archive.len();
    for i in 0..total {
        let mut entry = archive.by_index(i)?;
        let Some(rel) = entry.enclosed_name() else {
            return Err(AppError::validation(format!(
                "Archive entry '{}' escapes the output directory",
                entry.name()
            )));
        };
        let out_path = dest.join(rel);

        on_progress(i as f32 / total.max(1) as f32, &format!("Extracting {}", entry.name()));

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut out_file = File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
        }
    }

    on_progress(1.0, "Extraction complete");

    Ok(ArchiveResult {
        archive_path: src.to_path_buf(),
        entries: total,
        duration_secs: start.elapsed().as_secs_f64(),
    })
}

/// Enumerate entries without extracting.
pub fn list_entries(src: &Path) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(src)?;
    let mut archive = ZipArchive::new(file)?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        entries.push(ArchiveEntry {
            path: entry.name().to_string(),
            is_dir: entry.is_dir(),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_progress(_: f32, _: &str) {}

    #[test]
    fn test_create_extract_round_trip_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();

        // Source tree: one loose file, one folder with a nested file.
        let loose = dir.path().join("notes.txt");
        std::fs::write(&loose, b"top level").unwrap();

        let folder = dir.path().join("data");
        std::fs::create_dir_all(folder.join("inner")).unwrap();
        std::fs::write(folder.join("a.bin"), [0u8, 1, 2, 255, 254]).unwrap();
        std::fs::write(folder.join("inner/b.txt"), b"nested contents").unwrap();

        let zip_path = dir.path().join("archive.zip");
        let result = create_archive(&[loose.clone(), folder.clone()], &zip_path, no_progress).unwrap();
        assert!(result.entries >= 4); // file + 2 dirs + 2 files

        let out = dir.path().join("out");
        extract_archive(&zip_path, &out, no_progress).unwrap();

        assert_eq!(std::fs::read(out.join("notes.txt")).unwrap(), b"top level");
        assert_eq!(
            std::fs::read(out.join("data/a.bin")).unwrap(),
            vec![0u8, 1, 2, 255, 254]
        );
        assert_eq!(
            std::fs::read(out.join("data/inner/b.txt")).unwrap(),
            b"nested contents"
        );
    }

    #[test]
    fn test_list_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.txt");
        std::fs::write(&file, b"1").unwrap();

        let zip_path = dir.path().join("single.zip");
        create_archive(&[file], &zip_path, no_progress).unwrap();

        let entries = list_entries(&zip_path).unwrap();
        assert_eq!(
            entries,
            vec![ArchiveEntry {
                path: "one.txt".to_string(),
                is_dir: false,
            }]
        );
    }

    #[test]
    fn test_create_rejects_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("empty.zip");
        assert!(create_archive(&[], &zip_path, no_progress).is_err());
    }

    #[test]
    fn test_extract_missing_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract_archive(Path::new("/nonexistent.zip"), dir.path(), no_progress).is_err());
    }
}
