// File: src/persistence.rs
use crate::core::registry::{normalize_name, CipherRegistry};
use crate::core::substitution::{CipherRecord, LearnedTransform};
use crate::error::StoreError;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// On-disk shape of the store: cipher name to its flat record.
type StoredCiphers = BTreeMap<String, CipherRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Json,
    Bincode,
}

impl StoreFormat {
    /// `.bin` files are bincode; everything else is JSON.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => StoreFormat::Bincode,
            _ => StoreFormat::Json,
        }
    }
}

pub fn save_to_disk(registry: &CipherRegistry, path: &Path) -> Result<(), StoreError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let stored: StoredCiphers = registry
        .learned()
        .map(|cipher| (cipher.name.clone(), cipher.to_record()))
        .collect();

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        match StoreFormat::for_path(path) {
            StoreFormat::Json => serde_json::to_writer(&mut writer, &stored)?,
            StoreFormat::Bincode => bincode::serialize_into(&mut writer, &stored)?,
        }
        writer.flush()?;
    }

    temp_file.persist(path)?;
    debug!(path = %path.display(), ciphers = stored.len(), "saved cipher store");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<CipherRegistry, StoreError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let stored: StoredCiphers = match StoreFormat::for_path(path) {
        StoreFormat::Json => serde_json::from_reader(reader)?,
        StoreFormat::Bincode => bincode::deserialize_from(reader)?,
    };

    let mut registry = CipherRegistry::new();
    for (key, record) in stored {
        let name = normalize_name(&key);
        if name.is_empty() {
            warn!(cipher = %key, "skipping stored cipher with a blank name");
            continue;
        }
        if name != key {
            warn!(cipher = %key, normalized = %name, "normalized stored cipher name");
        }
        if let Err(e) = registry.insert(&name, LearnedTransform::from_record(record)) {
            warn!(cipher = %name, error = %e, "skipping stored cipher");
        }
    }
    debug!(path = %path.display(), ciphers = registry.len(), "loaded cipher store");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::learn;

    fn sample_registry() -> CipherRegistry {
        let mut registry = CipherRegistry::new();
        registry
            .insert("velo", learn("love", "velo").unwrap())
            .unwrap();
        registry
            .insert(
                "swap",
                learn("ab", "ba").unwrap().with_description("swaps a and b"),
            )
            .unwrap();
        registry
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let registry = sample_registry();
        save_to_disk(&registry, &path).unwrap();
        assert_eq!(load_from_disk(&path).unwrap(), registry);
    }

    #[test]
    fn bincode_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.bin");
        let registry = sample_registry();
        save_to_disk(&registry, &path).unwrap();
        assert_eq!(load_from_disk(&path).unwrap(), registry);
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");
        save_to_disk(&CipherRegistry::new(), &path).unwrap();
        assert!(path.exists());
        assert!(load_from_disk(&path).unwrap().is_empty());
    }

    #[test]
    fn reads_pair_list_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{"flip":{"name":"flip","description":"Custom learned cipher",
                "pattern":[["a","b"],["b","a"]],
                "reversePattern":[["b","a"],["a","b"]]}}"#,
        )
        .unwrap();
        let registry = load_from_disk(&path).unwrap();
        let cipher = registry.get("flip").unwrap();
        assert_eq!(cipher.forward().get(&'a'), Some(&'b'));
    }

    #[test]
    fn builtin_named_records_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{"rot13":{"name":"rot13","description":"x","pattern":[],"reversePattern":[]},
                "ok":{"name":"ok","description":"y","pattern":[],"reversePattern":[]}}"#,
        )
        .unwrap();
        let registry = load_from_disk(&path).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("ok").is_some());
    }

    #[test]
    fn stored_names_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{"My Cipher":{"name":"My Cipher","description":"x","pattern":[],"reversePattern":[]},
                "  ":{"name":"","description":"y","pattern":[],"reversePattern":[]}}"#,
        )
        .unwrap();
        let registry = load_from_disk(&path).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("My Cipher").is_none());
        assert_eq!(registry.get("my_cipher").map(|c| c.name.as_str()), Some("my_cipher"));
    }

    #[test]
    fn corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(load_from_disk(&path), Err(StoreError::Json(_))));
        assert!(matches!(
            load_from_disk(&dir.path().join("missing.json")),
            Err(StoreError::Io(_))
        ));
    }
}
