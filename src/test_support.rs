use crate::config::Config;
use crate::context::{LIBRARY_DIR_NAME, LibraryContext};
use crate::prompt::{Prompt, PromptType};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Sets or clears one environment variable for the guard's lifetime.
pub(crate) struct EnvGuard {
    key: &'static str,
    previous: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let previous = std::env::var_os(key);
        // SAFETY: guarded by ENV_LOCK and #[serial]; no other test thread touches the env.
        unsafe { std::env::set_var(key, value) };
        Self {
            key,
            previous,
            _lock: lock,
        }
    }

    pub(crate) fn unset(key: &'static str) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let previous = std::env::var_os(key);
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
        Self {
            key,
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: see `set`; the lock is still held here.
        unsafe {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }
}

/// A scratch library with default config for user `tester`.
pub(crate) fn create_test_library() -> (TempDir, LibraryContext) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join(LIBRARY_DIR_NAME);
    std::fs::create_dir_all(&root).unwrap();

    let ctx = LibraryContext::at(&root).unwrap();
    let config = Config {
        user: "tester".to_string(),
        ..Config::default()
    };
    std::fs::write(ctx.config_path(), config.to_yaml().unwrap()).unwrap();

    (temp_dir, ctx)
}

pub(crate) fn prompt(id: &str, prompt_type: PromptType, title: &str, content: &str) -> Prompt {
    Prompt {
        id: id.to_string(),
        prompt_type,
        title: title.to_string(),
        content: content.to_string(),
        category: None,
        copy_count: None,
    }
}
