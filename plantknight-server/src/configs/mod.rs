mod schema;
mod settings;
mod storage;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

pub use schema::SchemaManager;
pub use settings::{Database, LanguageModel, Logger, PlantApi, Server, Settings};
pub use storage::Storage;

/// Resolves a relative path against the working directory.
pub(crate) fn normalize_path(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = path.as_ref();

    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
