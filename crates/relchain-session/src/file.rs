//! File-backed session store: one JSON object on disk.
//!
//! Every write replaces the whole document through a temp file and a
//! rename, so a reader never observes a half-written session.

use crate::error::SessionError;
use crate::store::SessionStore;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session state persisted as a single JSON object keyed by session key.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole document. A missing file is an empty session.
    pub fn load(&self) -> Result<BTreeMap<String, Value>, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(SessionError::Io(format!("{}: {e}", self.path.display()))),
        };
        let text = std::str::from_utf8(&bytes).map_err(|_| {
            SessionError::Corrupt(format!(
                "{}: contains non-UTF-8 byte sequence(s)",
                self.path.display()
            ))
        })?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(text)
            .map_err(|e| SessionError::Parse(format!("{}: {e}", self.path.display())))
    }

    fn persist(&self, values: &BTreeMap<String, Value>) -> Result<(), SessionError> {
        let path = self.path.as_path();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::Io(format!("{}: {e}", parent.display())))?;
        }

        let tmp_path = tmp_write_path(path);
        let write_result = (|| -> Result<(), SessionError> {
            let file = File::create(&tmp_path)
                .map_err(|e| SessionError::Io(format!("{}: {e}", tmp_path.display())))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, values)
                .map_err(|e| SessionError::Serialize(e.to_string()))?;
            writeln!(writer)
                .and_then(|()| writer.flush())
                .map_err(|e| SessionError::Io(format!("{}: {e}", tmp_path.display())))?;
            let file = writer
                .into_inner()
                .map_err(|e| SessionError::Io(format!("{}: {e}", tmp_path.display())))?;
            file.sync_all()
                .map_err(|e| SessionError::Io(format!("{}: {e}", tmp_path.display())))?;
            Ok(())
        })();

        if let Err(error) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(error);
        }

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            SessionError::Io(format!(
                "{} -> {}: {e}",
                tmp_path.display(),
                path.display()
            ))
        })?;

        tracing::debug!(path = %path.display(), keys = values.len(), "session file written");
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
        Ok(self.load()?.remove(key))
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), SessionError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>, SessionError> {
        let mut values = self.load()?;
        let previous = values.remove(key);
        if previous.is_some() {
            self.persist(&values)?;
        }
        Ok(previous)
    }
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_path(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "relchain-session-{prefix}-{}-{unique}.json",
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_is_an_empty_session() {
        let store = FileSessionStore::new(temp_path("missing"));
        assert!(store.load().expect("load").is_empty());
        assert_eq!(store.get("anything").expect("get"), None);
    }

    #[test]
    fn values_persist_across_instances() {
        let path = temp_path("persist");
        let mut store = FileSessionStore::new(&path);
        store.put("relation:x", json!({"entries": []})).expect("put");
        store.put("other", json!(3)).expect("put");

        let reopened = FileSessionStore::new(&path);
        assert_eq!(
            reopened.get("relation:x").expect("get"),
            Some(json!({"entries": []}))
        );

        let mut reopened = reopened;
        assert_eq!(reopened.remove("other").expect("remove"), Some(json!(3)));
        assert_eq!(FileSessionStore::new(&path).get("other").expect("get"), None);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_non_utf8_payload() {
        let path = temp_path("non-utf8");
        fs::write(&path, [0xff, 0xfe, 0xfd]).expect("fixture should write");

        match FileSessionStore::new(&path).load() {
            Err(SessionError::Corrupt(message)) => assert!(message.contains("non-UTF-8")),
            other => panic!("expected corrupt session error, got {other:?}"),
        }

        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_malformed_json() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").expect("fixture should write");

        assert!(matches!(
            FileSessionStore::new(&path).load(),
            Err(SessionError::Parse(_))
        ));

        let _ = fs::remove_file(path);
    }
}
