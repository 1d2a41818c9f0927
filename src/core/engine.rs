use crate::config::EngineConfig;
use crate::core::chain::{apply_decode, apply_encode};
use crate::core::registry::{self, normalize_name, CipherRegistry};
use crate::core::substitution::LearnedTransform;
use crate::error::{CipherError, StoreError};
use crate::learning::{CipherExample, LearningEngine};
use crate::persistence::{load_from_disk, save_to_disk};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// The registry is the only state; everything else is configuration.
pub struct CipherEngine {
    registry: CipherRegistry,
    learning_engine: LearningEngine,
    store_path: Option<PathBuf>,
}

impl CipherEngine {
    pub fn new() -> Self {
        Self {
            registry: CipherRegistry::new(),
            learning_engine: LearningEngine::new(),
            store_path: None,
        }
    }

    /// Loads the configured store, falling back to an empty registry.
    pub fn with_config(config: &EngineConfig) -> Self {
        let mut engine = Self::from_file_or_new(&config.store_path);
        if config.strict_learning {
            engine.learning_engine = LearningEngine::strict();
        }
        engine
    }

    pub fn from_file_or_new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let registry = match load_from_disk(path) {
            Ok(registry) => registry,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                CipherRegistry::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read cipher store, starting empty");
                CipherRegistry::new()
            }
        };
        Self {
            registry,
            learning_engine: LearningEngine::new(),
            store_path: Some(path.to_path_buf()),
        }
    }

    pub fn registry(&self) -> &CipherRegistry {
        &self.registry
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    pub fn encode<S: AsRef<str>>(&self, text: &str, chain: &[S]) -> Result<String, CipherError> {
        apply_encode(text, chain, &self.registry)
    }

    pub fn decode<S: AsRef<str>>(&self, text: &str, chain: &[S]) -> Result<String, CipherError> {
        apply_decode(text, chain, &self.registry)
    }

    /// Learns a cipher from one example and registers it under the normalized
    /// form of `name`, replacing any cipher already there.
    pub fn learn_cipher(
        &mut self,
        name: &str,
        original: &str,
        encoded: &str,
        description: Option<&str>,
    ) -> Result<&LearnedTransform, CipherError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(CipherError::InvalidName(name));
        }
        if original.trim().is_empty() || encoded.trim().is_empty() {
            return Err(CipherError::EmptyExample);
        }

        let example = CipherExample {
            original: original.to_string(),
            encoded: encoded.to_string(),
        };
        let mut cipher = self.learning_engine.learn(&example)?;
        if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
            cipher = cipher.with_description(description);
        }

        if self.registry.insert(&name, cipher)?.is_some() {
            info!(cipher = %name, "replaced learned cipher");
        } else {
            info!(cipher = %name, "learned new cipher");
        }
        self.registry
            .get(&name)
            .ok_or(CipherError::UnknownTransform(name))
    }

    pub fn remove_cipher(&mut self, name: &str) -> Option<LearnedTransform> {
        self.registry.remove(&normalize_name(name))
    }

    pub fn describe(&self, id: &str) -> Result<String, CipherError> {
        registry::describe(id, &self.registry)
    }

    pub fn available(&self) -> Vec<String> {
        self.registry.available()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.store_path {
            save_to_disk(&self.registry, path)
        } else {
            Ok(()) // Don't error if no path is set
        }
    }
}

impl Default for CipherEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InferenceError;

    #[test]
    fn learn_then_encode_through_chain() {
        let mut engine = CipherEngine::new();
        engine
            .learn_cipher("My Cipher", "love", "velo", None)
            .unwrap();
        assert_eq!(engine.encode("love", &["my_cipher"]).unwrap(), "velo");

        let chain = ["my_cipher", "caesar", "shifter"];
        let encoded = engine.encode("Love you", &chain).unwrap();
        assert_eq!(engine.decode(&encoded, &chain).unwrap(), "Love you");
    }

    #[test]
    fn failed_learning_registers_nothing() {
        let mut engine = CipherEngine::new();
        let err = engine.learn_cipher("bad", "aa", "bc", None).unwrap_err();
        assert!(matches!(
            err,
            CipherError::Inference(InferenceError::InconsistentPattern { .. })
        ));
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn description_is_optional() {
        let mut engine = CipherEngine::new();
        engine.learn_cipher("a", "x", "y", Some("  ")).unwrap();
        engine.learn_cipher("b", "x", "y", Some("x to y")).unwrap();
        assert_eq!(engine.describe("a").unwrap(), "Custom learned cipher");
        assert_eq!(engine.describe("b").unwrap(), "x to y");
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut engine = CipherEngine::new();
        assert_eq!(
            engine.learn_cipher("   ", "a", "b", None).unwrap_err(),
            CipherError::InvalidName(String::new())
        );
    }

    #[test]
    fn blank_examples_are_rejected() {
        let mut engine = CipherEngine::new();
        assert_eq!(
            engine.learn_cipher("empty", "", "", None).unwrap_err(),
            CipherError::EmptyExample
        );
        assert_eq!(
            engine.learn_cipher("spaces", "   ", "   ", None).unwrap_err(),
            CipherError::EmptyExample
        );
        assert_eq!(
            engine.learn_cipher("half", "abc", " ", None).unwrap_err(),
            CipherError::EmptyExample
        );
        assert!(engine.registry().is_empty());
        assert_eq!(engine.available().len(), 5);
        assert!(engine.encode("Hello", &["empty"]).is_err());
    }

    #[test]
    fn hand_edited_store_keys_can_be_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            r#"{"My Cipher":{"name":"My Cipher","description":"x","pattern":[["a","b"]],"reversePattern":[["b","a"]]}}"#,
        )
        .unwrap();
        let mut engine = CipherEngine::from_file_or_new(&path);
        assert_eq!(engine.available().last().map(String::as_str), Some("my_cipher"));
        assert!(engine.remove_cipher("My Cipher").is_some());
        assert!(engine.registry().is_empty());
    }

    #[test]
    fn strict_config_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            store_path: dir.path().join("store.json"),
            strict_learning: true,
        };
        let mut engine = CipherEngine::with_config(&config);
        assert!(engine.learn_cipher("dup", "ab", "xx", None).is_err());
    }

    #[test]
    fn store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut engine = CipherEngine::from_file_or_new(&path);
        assert!(engine.registry().is_empty());
        engine.learn_cipher("velo", "love", "velo", None).unwrap();
        engine.save().unwrap();

        let reloaded = CipherEngine::from_file_or_new(&path);
        assert_eq!(reloaded.encode("Love", &["velo"]).unwrap(), "Velo");
        assert_eq!(reloaded.registry().len(), 1);
    }

    #[test]
    fn corrupt_store_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "garbage").unwrap();
        let engine = CipherEngine::from_file_or_new(&path);
        assert!(engine.registry().is_empty());
        assert_eq!(engine.store_path(), Some(path.as_path()));
    }

    #[test]
    fn save_without_path_is_a_no_op() {
        assert!(CipherEngine::new().save().is_ok());
    }
}
