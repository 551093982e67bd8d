use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::store::StoreError;

pub const DOWNLOAD_FILE_NAME: &str = "words.json";

/// Write an exported word list to `dir/words.json`. The bytes go to a temp
/// file first so a failed write never leaves a partial export behind.
pub fn save_download(dir: &Path, bytes: &[u8]) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(DOWNLOAD_FILE_NAME);
    let tmp_path = path.with_extension("part");

    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path)
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    Ok(path)
}
