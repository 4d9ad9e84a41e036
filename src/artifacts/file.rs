//! JSON file artifact store.
//!
//! Each chain ID maps to `<root>/<chain_id>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::artifacts::{ArtifactError, ArtifactResult, ArtifactStore, NetworkArtifact};

/// File-based artifact store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    root: PathBuf,
}

impl FileArtifactStore {
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of the record for `chain_id`.
    pub fn path_for(&self, chain_id: &str) -> ArtifactResult<PathBuf> {
        let valid = !chain_id.is_empty()
            && chain_id != "."
            && chain_id != ".."
            && !chain_id.contains(['/', '\\']);
        if !valid {
            return Err(ArtifactError::InvalidChainId(chain_id.to_string()));
        }
        Ok(self.root.join(format!("{chain_id}.json")))
    }
}

impl ArtifactStore for FileArtifactStore {
    fn read(&self, chain_id: &str) -> ArtifactResult<NetworkArtifact> {
        let path = self.path_for(chain_id)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No artifact yet, starting empty");
                return Ok(NetworkArtifact::new());
            }
            Err(source) => {
                return Err(ArtifactError::Io {
                    chain_id: chain_id.to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
            chain_id: chain_id.to_string(),
            source,
        })
    }

    fn write(&self, artifact: &NetworkArtifact, chain_id: &str) -> ArtifactResult<()> {
        let path = self.path_for(chain_id)?;
        let io_err = |source| ArtifactError::Io {
            chain_id: chain_id.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(io_err)?;

        let mut body = serde_json::to_string_pretty(artifact).map_err(|source| ArtifactError::Parse {
            chain_id: chain_id.to_string(),
            source,
        })?;
        body.push('\n');

        let tmp = self.root.join(format!(".{chain_id}.json.tmp"));
        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;

        tracing::info!(path = %path.display(), "Artifact written");
        Ok(())
    }
}
