use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Removes [`std::io::Error`] values from a [`Result`] that have the
/// [`std::io::ErrorKind::NotFound`] error kind by replacing them with the default value for `T`.
pub fn default_on_not_found<T: Default>(result: io::Result<T>) -> io::Result<T> {
    match result {
        Err(io_error) => match io_error.kind() {
            io::ErrorKind::NotFound => Ok(T::default()),
            _ => Err(io_error),
        },
        other => other,
    }
}

/// Writes `contents` to `path`, fsyncing the file before returning.
///
/// Used anywhere a write needs to be durable before the caller considers it "done" (e.g. layer
/// metadata files, which a later, possibly crash-prone phase relies on).
pub fn write_file_fsynced(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_ref())?;
    file.sync_all()
}
