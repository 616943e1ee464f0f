use crate::common::{Error, Result};
use config::{Config, Environment};
use std::fs;
use std::sync::OnceLock;

/// Fixed compile-time page size. All frames, and every `DiskManager`
/// read/write, operate on buffers of exactly this size.
pub const RUSTY_DB_PAGE_SIZE_BYTES: usize = 4096;

struct Settings {
    data_dir: String,
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Directory database files are stored in. Defaults to `rustydb_data` in the
/// current working directory; overridable via the `RUSTYDB_DATA_DIR`
/// environment variable.
pub fn data_dir() -> &'static str {
    &SETTINGS
        .get_or_init(|| load_settings().expect("unable to load configuration"))
        .data_dir
}

fn load_settings() -> Result<Settings> {
    let cfg = Config::builder()
        .set_default("data_dir", "rustydb_data")
        .map_err(|err| Error::Config(err.to_string()))?
        .add_source(Environment::with_prefix("RUSTYDB"))
        .build()
        .map_err(|err| Error::Config(err.to_string()))?;

    let data_dir: String = cfg
        .get("data_dir")
        .map_err(|err| Error::Config(err.to_string()))?;

    fs::create_dir_all(&data_dir)?;

    Ok(Settings { data_dir })
}
