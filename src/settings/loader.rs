//! Settings loading and hot-reloading.
//!
//! Settings live as `.ron` files in a directory (normally `data/settings`).
//! If multiple files are present the first successfully parsed `Settings`
//! wins; if none parse, defaults are used. A `notify`-based watcher flips a
//! shared flag when a file under the directory is modified, and
//! [`check_settings_changes`] reloads the resource when it sees the flag.

use bevy::prelude::{warn, Res, ResMut, Resource};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::settings::Settings;

/// Directory scanned for settings files, relative to the working directory.
pub const SETTINGS_DIR: &str = "data/settings";

/// File-watcher resource for settings hot-reload.
#[derive(Resource)]
pub struct SettingsWatcher {
    /// Shared flag set to `true` when a watched file changes.
    pub changed: Arc<Mutex<bool>>,
    _watcher: Option<RecommendedWatcher>, // handle kept alive to keep the OS watch registered
}

impl SettingsWatcher {
    /// Watcher without an active OS watch. Fallback for platforms or
    /// environments where `notify` setup fails; hot-reload simply never
    /// triggers.
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }
}

/// Load settings from `path` (directory). The first `.ron` file that parses
/// as `Settings` is used; files that fail to parse are skipped with a
/// warning. Defaults are returned when nothing parses or the directory is
/// missing.
///
/// # Arguments
/// * `path` - Directory to scan for `.ron` settings files.
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Settings::defaults();
    };

    for entry in entries.flatten() {
        let file = entry.path();
        if file.extension().is_none_or(|ext| ext != "ron") {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&file) else {
            continue;
        };
        match ron::from_str::<Settings>(&content) {
            Ok(settings) => return settings,
            Err(e) => {
                eprintln!("Failed to parse {}: {e:?}", file.display());
            }
        }
    }

    Settings::defaults()
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Arguments
/// * `path` - Directory to watch for `.ron` file modifications.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or the path cannot be registered.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Canonicalize so event paths can be filtered against the watched root
    let watched_path: PathBuf =
        std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    std::fs::canonicalize(p)
                        .unwrap_or_else(|_| p.clone())
                        .starts_with(&watched_path)
                });
                if relevant {
                    match changed_clone.lock() {
                        Ok(mut flag) => *flag = true,
                        Err(poisoned) => *poisoned.into_inner() = true,
                    }
                }
            }
            Err(e) => eprintln!("Watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(SettingsWatcher {
        changed,
        _watcher: Some(watcher),
    })
}

/// Reload the settings resource when the watcher reports a change.
///
/// Register as an `Update` system; the controller rig picks the new values
/// up through `apply_controller_settings`.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    let mut flag = match watcher.changed.lock() {
        Ok(flag) => flag,
        Err(poisoned) => {
            warn!("settings watcher mutex poisoned, recovering");
            poisoned.into_inner()
        }
    };
    if *flag {
        println!("Settings changed, reloading...");
        *settings = load_settings_from_dir(SETTINGS_DIR);
        *flag = false;
    }
}
