use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::conversion::DataFormat;
use crate::parser::filter::is_format_file;

/// Find input files of `format` in a directory. If recursive is true, use walkdir;
/// otherwise list the top level only. Results are sorted by path.
pub fn find_input_files(
    dir: &Path,
    format: DataFormat,
    recursive: bool,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if is_format_file(path, format) {
                files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if is_format_file(&path, format) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
