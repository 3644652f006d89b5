//! Common test utilities and helpers

use rowdiff::parser::parse_table;
use rowdiff::{ParsedTable, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture for creating temporary input files
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a test file with raw string content
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a test JSON file from a serde_json value
    pub fn create_json(&self, name: &str, data: &serde_json::Value) -> Result<PathBuf> {
        self.create_file(name, &serde_json::to_string_pretty(data)?)
    }

    /// Parse a file previously created in this fixture
    pub fn parse(&self, name: &str) -> Result<ParsedTable> {
        let content = fs::read(self.root().join(name))?;
        parse_table(name, &content)
    }
}

/// Canonical comparison inputs used across the suite
pub mod sample_data {
    /// Two id-keyed rows: 1/a and 2/b
    pub fn left_csv() -> &'static str {
        "id,name\n1,a\n2,b\n"
    }

    /// Two id-keyed rows: 2/b and 3/c
    pub fn right_csv() -> &'static str {
        "id,name\n2,b\n3,c\n"
    }

    pub fn left_json() -> serde_json::Value {
        serde_json::json!([
            {"id": "1", "name": "a"},
            {"id": "2", "name": "b"}
        ])
    }
}
