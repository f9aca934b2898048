use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    // Loaded files
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    // Resolved settings
    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.sorted_entries() {
        let value = get_value_for_key(config, key);
        writeln!(w, "  {}: {} <- {}", key, value, source)?;
    }

    Ok(())
}

fn get_value_for_key(config: &ResolvedConfig, key: &str) -> String {
    let imports = &config.imports;
    match key {
        "imports.enabled" => imports.enabled.to_string(),
        "imports.max_depth" => imports.max_depth.to_string(),
        "imports.max_file_size" => imports.max_file_size.to_string(),
        "imports.strategy" => imports.strategy.to_string(),
        "imports.ignore" => format!("{:?}", imports.ignore_patterns),
        _ => "(unknown)".to_string(),
    }
}
