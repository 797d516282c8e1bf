//! Writing fixtures to the output directory.

use camino::{Utf8Path, Utf8PathBuf};

use super::OutputError;

/// Write `bytes` verbatim to `output_dir/file_name`, creating the directory
/// first. An existing file is replaced.
pub fn write_output(
    output_dir: &Utf8Path,
    file_name: &str,
    bytes: &[u8],
) -> Result<Utf8PathBuf, OutputError> {
    fs_err::create_dir_all(output_dir.as_std_path())?;
    let path = output_dir.join(file_name);
    fs_err::write(path.as_std_path(), bytes)?;
    tracing::trace!(%path, bytes = bytes.len(), "wrote fixture");
    Ok(path)
}
