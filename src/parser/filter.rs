use std::path::Path;

use crate::conversion::DataFormat;

/// Return true if the path is an existing file whose extension matches `format`
pub fn is_format_file(path: &Path, format: DataFormat) -> bool {
    path.is_file() && DataFormat::from_path(path) == Some(format)
}
