// The terminal belongs to the UI, so everything goes to a file.
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "eventdesk.log";
pub const PANIC_FILE: &str = "eventdesk_panic.log";

pub fn log_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var("EVENTDESK_LOG_DIR") {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "eventdesk", "eventdesk").map(|p| p.data_dir().to_path_buf())
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str) -> Result<PathBuf> {
    let dir = log_dir().ok_or_else(|| anyhow!("no home directory for logs"))?;
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("{}", e))?;

    Ok(path)
}

pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Some(dir) = log_dir()
            && let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(PANIC_FILE))
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));
}
