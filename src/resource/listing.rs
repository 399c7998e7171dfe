use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Reads the names of the visible entries of `dir`, sorted byte-wise.
///
/// Entries whose name starts with `.` are skipped. Names are returned
/// unchanged, whether or not they are valid UTF-8.
pub async fn read_listing(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if name.as_encoded_bytes().starts_with(b".") {
            continue;
        }
        names.push(name);
    }

    names.sort_unstable_by(|a, b| a.as_encoded_bytes().cmp(b.as_encoded_bytes()));
    Ok(names)
}
