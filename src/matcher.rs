/// Extensions of MPS artifacts: per-model files, per-root files and their
/// metadata, languages and solutions.
const MPS_EXTENSIONS: [&str; 5] = [".mps", ".mpsr", ".model", ".mpl", ".msd"];

/// Immutable set of filename suffixes that mark a file as interesting.
///
/// Matching is a case-sensitive suffix comparison on the path exactly as the
/// GitHub API reports it. `Foo.MPS` or backslash-separated paths are not
/// normalized and will not match.
#[derive(Debug, Clone)]
pub struct PatternSet {
    suffixes: &'static [&'static str],
}

impl PatternSet {
    pub fn mps() -> Self {
        Self {
            suffixes: &MPS_EXTENSIONS,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.suffixes.iter().any(|suffix| path.ends_with(suffix))
    }

    /// First filename that matches, in input order.
    pub fn first_match<'a, S: AsRef<str>>(&self, files: &'a [S]) -> Option<&'a str> {
        files.iter().map(|file| file.as_ref()).find(|path| self.matches(path))
    }

    #[allow(dead_code)]
    pub fn any_match<S: AsRef<str>>(&self, files: &[S]) -> bool {
        self.first_match(files).is_some()
    }
}
