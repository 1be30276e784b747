use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Build output and dotfiles never hold workspace descriptors.
pub fn is_relevant_path(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if name.starts_with('.') {
            return false;
        }
        // Maven build output.
        if name == "target" {
            return false;
        }
    }
    true
}

/// Build descriptors under `root` whose file name is one of `names`.
///
/// Deepest paths come first so that leaf modules are populated before the
/// parents they inherit from.
pub fn discover_descriptors(root: &Path, names: &[String]) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkBuilder::new(root)
        .filter_entry(|entry| entry.depth() == 0 || is_relevant_path(entry.path()))
        .build()
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            let name = path.file_name()?.to_str()?;
            if path.is_file() && names.iter().any(|n| n == name) {
                return Some(path.to_path_buf());
            }
            None
        })
        .collect();

    found.sort_by(|a, b| {
        b.components()
            .count()
            .cmp(&a.components().count())
            .then_with(|| a.cmp(b))
    });
    found
}
