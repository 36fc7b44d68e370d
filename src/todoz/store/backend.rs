use crate::error::{Result, TodozError};

/// Abstract interface for raw key-value storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while [`super::Persistence`] handles the "what" (keys, encoding, recovery).
///
/// All methods take `&self`; backends that keep state use interior
/// mutability since todoz is single-threaded.
pub trait StorageBackend {
    /// Read the bytes stored under `key`, exactly as stored.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_bytes(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Read the value under `key` as text. Bytes that aren't UTF-8 are an error.
    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.read_bytes(key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| TodozError::Store(format!("{} is not valid UTF-8", key))),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.write_bytes(key, value.as_bytes())
    }
}
