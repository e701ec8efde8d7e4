use crate::Result;

pub mod memory_storage;
pub mod model;
pub mod sqlite_storage;

/// Durable key-value store the upload tracker mirrors its list into.
///
/// Values are opaque UTF-8 strings; reading a key that was never written
/// yields `Ok(None)`.
pub trait Storage {
    const KV_TABLE_NAME: &'static str = "KeyValueStore";
    const KV_T_KEY_COL: &'static str = "KEY";
    const KV_T_VALUE_COL: &'static str = "VALUE";
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}
