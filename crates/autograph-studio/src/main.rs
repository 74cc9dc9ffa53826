use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use autograph_engine::logging::{init_logging, LoggingConfig};
use autograph_pad::PadApplication;
use autograph_record::{DirStore, RecordSource};

/// Directory holding `<token>.json` signatures.
const STORE_ENV: &str = "AUTOGRAPH_STORE";
const DEFAULT_STORE: &str = "signatures";

/// Usage: `autograph-studio [record-id]`
///
/// Without an id the pad opens for signing and `Enter` saves under
/// `signature`. With an id the stored signature is replayed and a new
/// signature saves over it.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let dir = env::var_os(STORE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE));
    let store = DirStore::open(&dir)
        .with_context(|| format!("failed to open signature store at {}", dir.display()))?;
    log::info!("signature store: {}", store.root().display());

    let mut app = PadApplication::new()
        .title("Autograph Studio")
        .size(720.0, 320.0);

    if let Some(id) = env::args().nth(1) {
        let record = store
            .fetch(&id)
            .with_context(|| format!("failed to load signature {id:?}"))?
            .with_context(|| format!("no signature {id:?} in {}", dir.display()))?;
        log::info!("replaying {id:?} ({} strokes)", record.len());
        app = app.token(id).replay(record);
    }

    app.store(store).run()
}
