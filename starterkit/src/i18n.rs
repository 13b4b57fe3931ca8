//! Locale message catalogs.
//!
//! Each locale's messages are built by layering the application's
//! message tree over the starter's core tree.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Merge `overlay` into `base`.
///
/// Objects are merged key by key, recursively. Anything else (strings,
/// numbers, arrays) from `overlay` replaces the value in `base`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

/// A selectable locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfo {
    pub code: String,
    pub name: String,
}

struct CatalogState {
    locales: Vec<LocaleInfo>,
    messages: HashMap<String, Value>,
    current: String,
    fallback: String,
}

impl CatalogState {
    fn lookup(&self, locale: &str, key: &str) -> Option<String> {
        let mut node = self.messages.get(locale)?;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        match node {
            Value::String(message) => Some(message.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

/// Messages for every known locale plus the current selection.
///
/// Cheap to clone; clones share messages and the selected locale, so
/// switching locale through one clone switches it everywhere.
///
/// The locale given to [`LocaleCatalog::new`] is selected even before its
/// messages are added. Until then [`current`](Self::current) returns
/// `None` and lookups use the fallback locale. [`set_locale`](Self::set_locale)
/// only accepts codes that have been added.
#[derive(Clone)]
pub struct LocaleCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl LocaleCatalog {
    pub fn new(locale: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState {
                locales: Vec::new(),
                messages: HashMap::new(),
                current: locale.into(),
                fallback: fallback.into(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a locale whose messages are `app` merged over `core`.
    ///
    /// Adding a code twice replaces its name and messages.
    pub fn add_locale(
        &self,
        code: impl Into<String>,
        name: impl Into<String>,
        core: Value,
        app: Value,
    ) -> &Self {
        let code = code.into();
        let info = LocaleInfo {
            code: code.clone(),
            name: name.into(),
        };
        let messages = deep_merge(core, app);

        let mut state = self.write();
        match state.locales.iter_mut().find(|l| l.code == code) {
            Some(existing) => *existing = info,
            None => state.locales.push(info),
        }
        state.messages.insert(code, messages);
        drop(state);
        self
    }

    /// All known locales, in the order they were added.
    pub fn available(&self) -> Vec<LocaleInfo> {
        self.read().locales.clone()
    }

    /// Code of the selected locale.
    pub fn locale(&self) -> String {
        self.read().current.clone()
    }

    /// The selected locale, if its messages have been added.
    pub fn current(&self) -> Option<LocaleInfo> {
        let state = self.read();
        state.locales.iter().find(|l| l.code == state.current).cloned()
    }

    /// Switch locale. Unknown codes are rejected and return false.
    pub fn set_locale(&self, code: &str) -> bool {
        let mut state = self.write();
        if !state.messages.contains_key(code) {
            log::warn!("unknown locale '{code}'");
            return false;
        }
        state.current = code.to_string();
        true
    }

    /// Message for a dotted key like `"auth.login.title"`.
    ///
    /// Looks in the selected locale, then the fallback locale, and finally
    /// returns the key itself.
    pub fn translate(&self, key: &str) -> String {
        let state = self.read();
        state
            .lookup(&state.current, key)
            .or_else(|| state.lookup(&state.fallback, key))
            .unwrap_or_else(|| key.to_string())
    }
}

impl std::fmt::Debug for LocaleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("LocaleCatalog")
            .field("current", &state.current)
            .field("fallback", &state.fallback)
            .field("locales", &state.locales)
            .finish()
    }
}
