use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{KnowledgeError, Result};


/// Raw text of one domain document, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub content: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}


/// Where the knowledge documents come from. Implementations do one read per
/// call and never retry.
pub trait KnowledgeSource: Send + Sync {
    fn describe(&self) -> String;

    /// Documents in merge order.
    fn read(&self) -> Result<Vec<SourceDocument>>;
}


/// Files and directories of `*.json` documents. Directory contents are read
/// in file-name order.
#[derive(Debug, Clone)]
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    fn collect(path: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        let meta = fs::metadata(path).map_err(|e| KnowledgeError::io(path, e))?;
        if !meta.is_dir() {
            out.push(path.to_path_buf());
            return Ok(());
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(path)
            .map_err(|e| KnowledgeError::io(path, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();
        out.extend(entries);
        Ok(())
    }
}

impl KnowledgeSource for FileSource {
    fn describe(&self) -> String {
        let paths: Vec<String> = self.paths.iter().map(|p| p.display().to_string()).collect();
        format!("files[{}]", paths.join(", "))
    }

    fn read(&self) -> Result<Vec<SourceDocument>> {
        let mut files = Vec::new();
        for path in &self.paths {
            Self::collect(path, &mut files)?;
        }

        if files.is_empty() {
            return Err(KnowledgeError::LoadFailed(format!(
                "no knowledge documents found in {}",
                self.describe()
            )));
        }

        files
            .into_iter()
            .map(|file| {
                let content =
                    fs::read_to_string(&file).map_err(|e| KnowledgeError::io(&file, e))?;
                debug!("Read knowledge document {} ({} bytes)", file.display(), content.len());
                Ok(SourceDocument::new(file.display().to_string(), content))
            })
            .collect()
    }
}


/// Documents held in memory, e.g. compiled into the binary with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<SourceDocument>,
}

impl StaticSource {
    pub fn new(documents: Vec<SourceDocument>) -> Self {
        Self { documents }
    }

    pub fn single(name: &str, content: &str) -> Self {
        Self::new(vec![SourceDocument::new(name, content)])
    }
}

impl KnowledgeSource for StaticSource {
    fn describe(&self) -> String {
        format!("static[{} documents]", self.documents.len())
    }

    fn read(&self) -> Result<Vec<SourceDocument>> {
        Ok(self.documents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_reads_json_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_sales.json"), "{}").unwrap();
        fs::write(dir.path().join("a_forecast.json"), "{\"terms\":{}}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = FileSource::new(vec![dir.path().to_path_buf()]).read().unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].name.ends_with("a_forecast.json"));
        assert!(docs[1].name.ends_with("b_sales.json"));
        assert_eq!(docs[0].content, "{\"terms\":{}}");
    }

    #[test]
    fn test_explicit_files_keep_listed_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("z.json");
        let second = dir.path().join("a.json");
        fs::write(&first, "1").unwrap();
        fs::write(&second, "2").unwrap();

        let docs = FileSource::new(vec![first, second]).read().unwrap();
        let contents: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["1", "2"]);
    }

    #[test]
    fn test_missing_path_is_io_error() {
        let source = FileSource::new(vec![PathBuf::from("/nonexistent/knowledge")]);
        assert!(matches!(source.read(), Err(KnowledgeError::Io { .. })));
    }

    #[test]
    fn test_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(vec![dir.path().to_path_buf()]);
        assert!(matches!(source.read(), Err(KnowledgeError::LoadFailed(_))));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::single("inline", "{}");
        assert_eq!(source.read().unwrap(), vec![SourceDocument::new("inline", "{}")]);
        assert_eq!(source.describe(), "static[1 documents]");
    }
}
