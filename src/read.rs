use std::path::Path;

/// Files larger than this are skipped unless configured otherwise.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// How many leading bytes are checked for NUL when sniffing binary content.
const BINARY_SNIFF_LEN: usize = 8192;

/// Source of file contents for the crawler.
///
/// Implementations return `None` instead of failing: missing files, I/O
/// errors, oversized files and binary content are all "nothing to expand".
pub trait SourceReader {
    fn read(&self, path: &Path, max_size: u64) -> Option<String>;
}

impl<F> SourceReader for F
where
    F: Fn(&Path, u64) -> Option<String>,
{
    fn read(&self, path: &Path, max_size: u64) -> Option<String> {
        self(path, max_size)
    }
}

/// Reads from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path, max_size: u64) -> Option<String> {
        let meta = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };
        if !meta.is_file() {
            tracing::debug!("Skipping {}: not a regular file", path.display());
            return None;
        }
        if meta.len() > max_size {
            tracing::debug!(
                "Skipping {}: {} bytes exceeds limit of {}",
                path.display(),
                meta.len(),
                max_size
            );
            return None;
        }

        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };
        if is_binary(&bytes) {
            tracing::debug!("Skipping {}: binary content", path.display());
            return None;
        }
        match String::from_utf8(bytes) {
            Ok(mut content) => {
                if content.starts_with('\u{feff}') {
                    content.drain(..'\u{feff}'.len_utf8());
                }
                Some(content)
            }
            Err(_) => {
                tracing::debug!("Skipping {}: not valid UTF-8", path.display());
                None
            }
        }
    }
}

fn is_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}
