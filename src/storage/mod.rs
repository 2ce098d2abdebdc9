//! Key/value persistence for drafts.
//!
//! The on-disk layout mirrors a browser's local storage: one JSON document
//! per key, `<dir>/<key>.json`, with an optional byte quota over all keys.

pub mod log;

use crate::errors::{AppError, AppResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait Storage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

fn check_quota(quota: Option<u64>, used_by_others: u64, value: &str) -> AppResult<()> {
    if let Some(quota) = quota {
        let needed = used_by_others + value.len() as u64;
        if needed > quota {
            return Err(AppError::QuotaExceeded { needed, quota });
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<u64>,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            quota: None,
        }
    }

    /// `0` disables the quota.
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota = (bytes > 0).then_some(bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn used_by_others(&self, key: &str) -> AppResult<u64> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let own = self.path_for(key);
        let mut total = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path != own && path.extension().is_some_and(|e| e == "json") {
                total += fs::metadata(&path)?.len();
            }
        }
        Ok(total)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("cannot read {}: {e}", path.display())))
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        check_quota(self.quota, self.used_by_others(key)?, value)?;

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                AppError::Storage(format!("cannot write {}: {e}", path.display()))
            })
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Process-local storage, handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    quota: Option<u64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: u64) -> Self {
        Self {
            items: RefCell::default(),
            quota: Some(bytes),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let others: u64 = self
            .items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        check_quota(self.quota, others, value)?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
