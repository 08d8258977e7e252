use bashly::Config;
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `--trace` wins over `BASHLY_LOG`, which wins over `log_level` from the
/// config file.
pub(crate) fn init(config: &Config, trace: bool) -> Result<(), String> {
    let filter = if trace {
        EnvFilter::new("bashly=trace")
    } else {
        EnvFilter::try_from_env("BASHLY_LOG").unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match &config.log_directory {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {}", dir.display(), e))?;
            let path = dir.join("bashly.log");
            let file = File::create(&path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(io::stderr).try_init(),
    };

    installed.map_err(|e| format!("cannot install logger: {}", e))
}
