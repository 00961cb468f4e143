//! Thin filesystem wrappers that attach the offending path to any error.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .context(format!("Unable to create directory {}", path.display()))
}

pub(crate) fn file(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).context(format!("Unable to create file {}", path.display()))
}

pub(crate) fn write_all(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let mut f = file(path)?;
    f.write_all(data.as_ref())
        .context(format!("Unable to write data to {}", path.display()))
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).context(format!("Unable to read file {}", path.display()))
}

pub(crate) fn copy(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<u64> {
    let (from, to) = (from.as_ref(), to.as_ref());
    std::fs::copy(from, to).context(format!(
        "Unable to copy {} to {}",
        from.display(),
        to.display()
    ))
}
