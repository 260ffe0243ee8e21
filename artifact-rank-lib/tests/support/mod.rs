//! Shared fixtures for the integration tests.

use artifact_rank_lib::Host;
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

pub const MIB: u64 = 1_048_576;

/// A small registry snapshot: a model, its fine-tune, a dataset, a two-node cycle, and
/// one record with no name that normalization rejects.
pub fn registry_json() -> String {
    serde_json::json!([
        {
            "id": "bert-base-uncased",
            "name": "bert-base-uncased",
            "type": "model",
            "version": "1.0.0",
            "url": "https://huggingface.co/google-bert/bert-base-uncased",
            "readme": "# BERT\n## Installation\npip install transformers\n## Usage\n```python\nfrom transformers import pipeline\n```\n## Evaluation\n| task | score |\n|---|---|\n| glue | 79.6 |\n",
            "license": "Apache-2.0",
            "size_bytes": 400 * MIB,
            "datasets": ["bookcorpus"],
            "code_repository": "https://github.com/google-research/bert",
            "activity": {
                "contributors": [{"login": "a", "commits": 40}, {"login": "b", "commits": 35}, {"login": "c", "commits": 25}],
                "changes": [
                    {"merged": true, "approved": true, "files": [{"path": "modeling.py", "additions": 300}]},
                    {"merged": true, "approved": false, "files": [{"path": "tokenizer.py", "additions": 100}]}
                ]
            }
        },
        {
            "id": "bookcorpus",
            "name": "bookcorpus",
            "type": "dataset",
            "size_bytes": 100 * MIB,
            "readme": "Collected from unpublished books. Train split only."
        },
        {
            "id": "distilbert",
            "name": "distilbert",
            "type": "model",
            "version": "1.2.0",
            "base_model": "google-bert/bert-base-uncased",
            "size_bytes": 250 * MIB,
            "demo_outcome": "runs_with_changes"
        },
        {
            "id": "broken",
            "type": "model"
        },
        {
            "id": "loop-a",
            "name": "loop-a",
            "type": "code",
            "base_model": "loop-b",
            "size_bytes": MIB
        },
        {
            "id": "loop-b",
            "name": "loop-b",
            "type": "code",
            "base_model": "loop-a",
            "size_bytes": 2 * MIB
        }
    ])
    .to_string()
}

/// Write the registry snapshot into a fresh temporary directory.
pub fn write_registry() -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::try_from(dir.path().join("registry.json")).unwrap();
    fs::write(&path, registry_json()).unwrap();
    (dir, path)
}

/// Test host that captures output to in-memory buffers.
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

impl TestHost {
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }

    pub fn output_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output_buf).unwrap()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
