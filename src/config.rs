//! Run parameters for a generation pass.

use specgen_core::{Placeholder, TemplateSyntax};
use std::path::{Path, PathBuf};

/// Everything a [`Generator`](crate::Generator) needs to know about one run.
///
/// ```
/// use specgen::GeneratorConfig;
///
/// let config = GeneratorConfig::new("src/main/templates", "target/generated")
///     .with_incremental(false)
///     .with_threads(Some(4));
/// assert!(!config.incremental);
/// assert_eq!(config.extension, "java");
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root of the template tree.
    pub template_root: PathBuf,
    /// Root of the generated tree. Files with the template extension under it
    /// that no template claims are deleted.
    pub output_root: PathBuf,
    /// Skip outputs that are newer than their template.
    pub incremental: bool,
    /// Log every output written or kept, not only the totals.
    pub verbose: bool,
    /// Stop at the first error instead of reporting all of them.
    pub fail_fast: bool,
    /// Worker threads; `None` uses one per core.
    pub threads: Option<usize>,
    /// Extension of template and output files, without the dot.
    pub extension: String,
    /// Prefix each output with a generated-file comment.
    pub header: bool,
    pub syntax: TemplateSyntax,
}

impl GeneratorConfig {
    pub fn new(template_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            output_root: output_root.into(),
            incremental: true,
            verbose: false,
            fail_fast: false,
            threads: None,
            extension: "java".to_string(),
            header: true,
            syntax: TemplateSyntax::default(),
        }
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_syntax(mut self, syntax: TemplateSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Whether `path` has the configured extension.
    pub fn has_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }

    /// Whether `path` is a template: the configured extension and a file name
    /// mentioning the primary placeholder.
    pub fn is_template(&self, path: &Path) -> bool {
        self.has_extension(path)
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.syntax.mentions(n, Placeholder::Primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::new("t", "o");
        assert!(config.incremental);
        assert!(config.header);
        assert!(!config.fail_fast);
        assert_eq!(config.threads, None);
        assert_eq!(config.syntax, TemplateSyntax::default());
    }

    #[test]
    fn extension_without_dot() {
        let config = GeneratorConfig::new("t", "o").with_extension(".kt");
        assert_eq!(config.extension, "kt");
        assert!(config.has_extension(Path::new("a/B.kt")));
        assert!(!config.has_extension(Path::new("a/B.java")));
    }

    #[test]
    fn template_detection() {
        let config = GeneratorConfig::new("t", "o");
        assert!(config.is_template(Path::new("com/x/KTypeArrayList.java")));
        assert!(config.is_template(Path::new("KTypeVTypeHashMap.java")));
        assert!(!config.is_template(Path::new("BitMixer.java")));
        assert!(!config.is_template(Path::new("VTypeOnly.java")));
        assert!(!config.is_template(Path::new("KTypeNotes.txt")));
    }
}
