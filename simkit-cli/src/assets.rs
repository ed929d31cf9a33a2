use std::path::PathBuf;

use simkit_core::AssetCache;

/// Circuit artifacts the simulator needs before it can generate proofs.
const SEMAPHORE_ARTIFACTS: [&str; 2] = ["semaphore.wasm", "semaphore.zkey"];

/// Asset cache backed by a local directory.
///
/// The CLI does not download anything itself: a missing artifact is reported so the
/// user can fetch it.
pub struct DirectoryAssetCache {
    directory: PathBuf,
}

impl DirectoryAssetCache {
    pub const fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    fn missing(&self) -> Vec<&'static str> {
        SEMAPHORE_ARTIFACTS
            .into_iter()
            .filter(|name| !self.directory.join(name).is_file())
            .collect()
    }
}

impl AssetCache for DirectoryAssetCache {
    fn is_populated(&self) -> bool {
        self.missing().is_empty()
    }

    fn request_download(&self) {
        tracing::warn!(
            directory = %self.directory.display(),
            missing = ?self.missing(),
            "semaphore artifacts are not cached"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_once_every_artifact_exists() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DirectoryAssetCache::new(dir.path().to_path_buf());
        assert!(!cache.is_populated());

        std::fs::write(dir.path().join("semaphore.wasm"), b"wasm").unwrap();
        assert_eq!(cache.missing(), vec!["semaphore.zkey"]);

        std::fs::write(dir.path().join("semaphore.zkey"), b"zkey").unwrap();
        assert!(cache.is_populated());
    }
}
