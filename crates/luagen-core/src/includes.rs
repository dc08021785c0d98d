//! Include resolution and type location.
//!
//! Candidate declaration files are discovered from the `#include` directives of
//! the seed files. Library includes (`#include <libabyss/...>`) resolve against
//! the library root, quoted includes against the including file's directory.
//! Other angle-bracket includes (system and third-party headers) are skipped.

use crate::error::LuagenResult;
use crate::settings::SourceLayout;
use crate::source::SourceProvider;
use once_cell::sync::Lazy;
use path_clean::PathClean;
use regex::Regex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

static INCLUDE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*#\s*include\s+([<"'])([^>"']+)[>"']"#).unwrap());

/// Ordered, deduplicated set of candidate declaration files.
#[derive(Debug)]
pub struct IncludeResolver {
    library_root: PathBuf,
    library_prefix: String,
    transitive: bool,
    candidates: Vec<PathBuf>,
}

impl IncludeResolver {
    pub fn new(layout: &SourceLayout) -> Self {
        Self {
            library_root: layout.library_root_path(),
            library_prefix: layout.library_prefix.clone(),
            transitive: layout.transitive_includes,
            candidates: Vec::new(),
        }
    }

    /// Adds the includes of `seed` (and, in transitive mode, of every resolved
    /// include that exists) to the candidate set.
    pub fn load(&mut self, source: &dyn SourceProvider, seed: &Path) -> LuagenResult<()> {
        let mut queue = VecDeque::from([seed.to_path_buf()]);
        let mut scanned = vec![seed.to_path_buf()];

        while let Some(file) = queue.pop_front() {
            let text = source.read(&file)?;
            for include in self.resolve_includes(&file, &text) {
                if self.transitive && !scanned.contains(&include) && source.exists(&include) {
                    scanned.push(include.clone());
                    queue.push_back(include.clone());
                }
                if !self.candidates.contains(&include) {
                    tracing::trace!(include = %include.display(), from = %file.display(), "Include candidate");
                    self.candidates.push(include);
                }
            }
        }

        tracing::debug!(
            seed = %seed.display(),
            candidates = self.candidates.len(),
            "Loaded include candidates"
        );
        Ok(())
    }

    /// Resolved paths of the include directives in `text`, in file order.
    pub fn resolve_includes(&self, file: &Path, text: &str) -> Vec<PathBuf> {
        text.lines()
            .filter_map(|line| {
                let caps = INCLUDE_PATTERN.captures(line)?;
                let delimiter = caps.get(1)?.as_str();
                let target = caps.get(2)?.as_str().trim();
                self.resolve(file, delimiter, target)
            })
            .collect()
    }

    fn resolve(&self, file: &Path, delimiter: &str, target: &str) -> Option<PathBuf> {
        if delimiter == "<" {
            if !target.starts_with(&self.library_prefix) {
                return None;
            }
            return Some(self.library_root.join(target).clean());
        }

        let dir = file.parent().unwrap_or_else(|| Path::new(""));
        Some(dir.join(target).clean())
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }
}

/// Returns the first candidate containing `class <name> ` or `struct <name> `.
///
/// The trailing space keeps `Sprite` from matching `SpriteFont`; forward
/// declarations (`class Sprite;`) never match.
pub fn locate_type(
    source: &dyn SourceProvider,
    candidates: &[PathBuf],
    name: &str,
) -> LuagenResult<Option<PathBuf>> {
    let class_marker = format!("class {name} ");
    let struct_marker = format!("struct {name} ");

    for candidate in candidates {
        let text = source.read(candidate)?;
        if text
            .lines()
            .any(|line| line.contains(&class_marker) || line.contains(&struct_marker))
        {
            return Ok(Some(candidate.clone()));
        }
    }
    Ok(None)
}
