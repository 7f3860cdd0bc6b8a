//! Log file handle shared by the file layer

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Opens the configured log file, creating parent directories first.
///
/// The returned handle is shared; `Arc<File>` implements `MakeWriter`.
pub fn open_log_writer(config: &FileConfig) -> Result<Arc<File>, LoggerError> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    Ok(Arc::new(open_log_file(&config.path, config.append)?))
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(path)
}
