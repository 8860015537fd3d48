//! Markdown export of the notes collection.

use crate::models::Note;
use crate::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Write one `<title>.md` file per note into `out_dir`, returning the paths written.
///
/// File names are derived from the display title with path separators and
/// other reserved characters replaced; clashes get a ` (n)` suffix.
pub fn export_markdown(notes: &[Note], out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;

    let mut used = HashSet::new();
    let mut written = Vec::with_capacity(notes.len());
    for note in notes {
        let stem = unique_stem(&safe_file_stem(note.display_title()), &mut used);
        let path = out_dir.join(format!("{stem}.md"));
        std::fs::write(&path, render_markdown(note))?;
        written.push(path);
    }

    log::info!(
        "event=export module=export status=ok notes={} dir={}",
        written.len(),
        out_dir.display()
    );
    Ok(written)
}

fn render_markdown(note: &Note) -> String {
    let mut content = format!("# {}\n\n", note.display_title());
    content.push_str(&note.content);
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

fn safe_file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let stem = stem.trim_matches('.').to_string();
    if stem.is_empty() {
        "note".to_string()
    } else {
        stem
    }
}

fn unique_stem(base: &str, used: &mut HashSet<String>) -> String {
    let mut stem = base.to_string();
    let mut suffix = 1;
    while !used.insert(stem.to_lowercase()) {
        stem = format!("{} ({})", base, suffix);
        suffix += 1;
    }
    stem
}
