use crate::errors::Result;
use std::io::Write;

/// Write collected files, one project-relative path per line.
pub fn write_collect_text<W: Write>(writer: &mut W, files: &[String]) -> Result<()> {
    for file in files {
        writeln!(writer, "{file}")?;
    }
    Ok(())
}
