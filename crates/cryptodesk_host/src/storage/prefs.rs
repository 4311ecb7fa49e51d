//! Preference storage contracts and adapters.
//!
//! Preferences are small JSON documents stored as text per key, the same shape the browser host
//! keeps in `localStorage`.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for lightweight preference values.
pub trait PrefsStore {
    /// Loads the raw JSON text stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON text stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that never retains anything. Used when the host has no storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store. Clones share the same underlying map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Creates a store seeded with raw JSON entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<_, _>>();
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }
}

/// Loads and deserializes a typed preference value.
///
/// # Errors
///
/// Returns an error when the store fails or the stored JSON does not match `T`.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| format!("pref `{key}`: {e}"))?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize + ?Sized>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| format!("pref `{key}`: {e}"))?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_store_overwrites_entries() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        block_on(store_obj.save_pref("cryptodesk.theme", "\"dark\"")).expect("save");
        block_on(store_obj.save_pref("cryptodesk.theme", "\"light\"")).expect("overwrite");
        assert_eq!(
            block_on(store_obj.load_pref("cryptodesk.theme")).expect("load"),
            Some("\"light\"".to_string())
        );
        assert_eq!(
            block_on(store_obj.load_pref("cryptodesk.other")).expect("load missing"),
            None
        );
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryPrefsStore::with_entries([("b", "1"), ("a", "2")]);
        let clone = store.clone();
        block_on(clone.save_pref("c", "3")).expect("save");
        assert_eq!(store.keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn typed_helpers_handle_flag_maps() {
        let store = MemoryPrefsStore::default();
        let mut flags = BTreeMap::new();
        flags.insert("REWARDS".to_string(), true);
        flags.insert("SENTINEL".to_string(), false);

        block_on(save_pref_with(&store, "flags", &flags)).expect("save typed");
        let loaded: Option<BTreeMap<String, bool>> =
            block_on(load_pref_with(&store, "flags")).expect("load typed");
        assert_eq!(loaded, Some(flags));

        let missing: Option<BTreeMap<String, bool>> =
            block_on(load_pref_with(&store, "absent")).expect("load missing");
        assert_eq!(missing, None);
    }

    #[test]
    fn typed_load_reports_key_on_malformed_json() {
        let store = MemoryPrefsStore::with_entries([("flags", "{not json")]);
        let err = block_on(load_pref_with::<_, BTreeMap<String, bool>>(&store, "flags"))
            .expect_err("malformed payload");
        assert!(err.starts_with("pref `flags`"));
    }

    #[test]
    fn noop_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        block_on(store_obj.save_pref("k", "{}")).expect("save");
        assert_eq!(block_on(store_obj.load_pref("k")).expect("load"), None);
    }
}
