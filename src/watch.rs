//! File watching for auto-reconversion
//!
//! Watches a single input file and re-runs the conversion callback on
//! every change. Events are drained from a channel and handled
//! sequentially, so two conversions of the same input can never
//! overlap; a debounce window swallows the duplicate events editors
//! emit for one save. Process interrupt is the only cancellation.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::utils::error::{ConversionError, ConversionResult};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watch `path` and invoke `on_change` after each modification. A
/// failing conversion is reported through `on_error` and watching
/// continues. Blocks until the watcher channel closes.
pub fn watch_file<F, E>(path: &Path, mut on_change: F, mut on_error: E) -> ConversionResult<()>
where
    F: FnMut() -> ConversionResult<()>,
    E: FnMut(&ConversionError),
{
    let watch_dir: PathBuf = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let target = path.canonicalize()?;

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())
        .map_err(|e| ConversionError::io(e.to_string()))?;
    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| ConversionError::io(e.to_string()))?;

    let mut last_run = Instant::now() - DEBOUNCE;

    // Events queue on the channel while a conversion is in flight, so
    // conversions of the same input are strictly serialized.
    for received in rx {
        let event = match received {
            Ok(event) => event,
            Err(_) => continue,
        };
        if !event.kind.is_modify() && !event.kind.is_create() {
            continue;
        }
        let is_target = event
            .paths
            .iter()
            .any(|p| p.canonicalize().map(|c| c == target).unwrap_or(false));
        if !is_target || last_run.elapsed() < DEBOUNCE {
            continue;
        }

        if let Err(e) = on_change() {
            on_error(&e);
        }
        last_run = Instant::now();
    }

    Ok(())
}
