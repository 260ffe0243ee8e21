use serde::{Deserialize, Serialize};

/// File extensions treated as source code when weighing changes.
const CODE_EXTENSIONS: &[&str] = &[
    "py", "pyx", "pyi", "ipynb", "rs", "c", "cc", "cpp", "cxx", "h", "hpp", "cu", "cuh", "java", "kt", "scala", "go", "js", "jsx", "ts",
    "tsx", "rb", "php", "swift", "m", "mm", "cs", "r", "jl", "lua", "sh", "bash", "zsh", "ps1", "sql",
];

/// Repository activity captured at ingest time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub contributors: Vec<Contributor>,
    pub changes: Vec<ChangeRequest>,
    pub direct_commits: Vec<FileChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub commits: u64,
}

/// A change request (pull/merge request) against the artifact's repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeRequest {
    pub merged: bool,
    pub approved: bool,
    pub files: Vec<FileChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    #[serde(default)]
    pub additions: u64,
}

impl FileChange {
    /// Whether this change touches source code rather than weights, data, or docs.
    #[must_use]
    pub fn is_code(&self) -> bool {
        let file_name = self.path.rsplit(['/', '\\']).next().unwrap_or_default();
        file_name
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && CODE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
    }
}

impl ChangeRequest {
    /// Lines added to source files by this change.
    #[must_use]
    pub fn code_additions(&self) -> u64 {
        code_additions(&self.files)
    }
}

/// Lines added to source files across a set of file changes.
#[must_use]
pub fn code_additions(files: &[FileChange]) -> u64 {
    files.iter().filter(|f| f.is_code()).map(|f| f.additions).sum()
}
