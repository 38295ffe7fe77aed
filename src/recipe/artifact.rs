use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

use super::Recipe;
use crate::error::ArchiveError;

/// On-disk container for a collection of recipes.
///
/// The desktop app keeps its library as JSON; the binary form is the
/// compact snapshot used for backup/export. Both go through the same serde
/// model, so the two formats are interchangeable representations of the
/// same archive.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RecipeArchive {
    pub recipes: Vec<Recipe>,
}

impl RecipeArchive {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Saves the archive to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArchiveError> {
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| ArchiveError::Encode(e.to_string()))?;
        let mut file = fs::File::create(path).map_err(|e| ArchiveError::Io {
            path: path.to_string(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| ArchiveError::Io {
            path: path.to_string(),
            source: e,
        })?;
        Ok(())
    }

    /// Loads an archive from a file.
    pub fn from_file(path: &str) -> Result<Self, ArchiveError> {
        let mut file = fs::File::open(path).map_err(|e| ArchiveError::Io {
            path: path.to_string(),
            source: e,
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| ArchiveError::Io {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes an archive from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        decode_from_slice(bytes, standard())
            .map(|(archive, _)| archive) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| ArchiveError::Decode(e.to_string()))
    }

    /// Renders the archive as the JSON the desktop app keeps on disk.
    pub fn to_json_string(&self) -> Result<String, ArchiveError> {
        serde_json::to_string_pretty(self).map_err(|e| ArchiveError::Encode(e.to_string()))
    }

    /// Parses an archive from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, ArchiveError> {
        serde_json::from_str(json).map_err(|e| ArchiveError::Decode(e.to_string()))
    }
}
