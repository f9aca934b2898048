use std::path::Path;

/// Outcome of checking a candidate path on disk.
///
/// Permission errors, missing entries and directories all collapse into
/// `NotFound`; resolvers move on to the next candidate either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Found,
    NotFound,
}

/// Check whether `path` names an existing regular file (symlinks followed).
pub fn probe(path: &Path) -> Probe {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Probe::Found,
        _ => Probe::NotFound,
    }
}

/// Check whether anything (file or directory) exists at `path`.
pub fn exists(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}

/// Return the first project-relative candidate that exists as a file under `root`.
pub fn first_existing<I>(root: &Path, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    candidates.into_iter().find(|candidate| {
        let outcome = probe(&root.join(candidate));
        tracing::trace!("probe {candidate}: {outcome:?}");
        outcome == Probe::Found
    })
}
