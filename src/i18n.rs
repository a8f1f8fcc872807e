//! Translation lookup passed explicitly to whatever needs it.
//!
//! Components receive an [`I18n`] instead of reaching for an ambient
//! translation function. Without a translator every lookup falls back to the
//! key (for [`I18n::t`]) or to the supplied default text (for [`I18n::tt`]).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Resolves a translation key to display text.
///
/// Implementations return `id` unchanged when they have no translation.
pub trait Translate {
    fn translate(&self, id: &str, args: &[&str]) -> String;
}

/// Returns every key as its own translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translate for IdentityTranslator {
    fn translate(&self, id: &str, _args: &[&str]) -> String {
        id.to_owned()
    }
}

impl<F> Translate for F
where
    F: Fn(&str, &[&str]) -> String,
{
    fn translate(&self, id: &str, args: &[&str]) -> String {
        self(id, args)
    }
}

/// Key to message table; `{0}`, `{1}`, ... in a message are replaced by the
/// positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(HashMap<String, String>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.0.insert(id.into(), message.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Translate for Catalog {
    fn translate(&self, id: &str, args: &[&str]) -> String {
        let Some(message) = self.0.get(id) else {
            return id.to_owned();
        };
        args.iter()
            .enumerate()
            .fold(message.clone(), |text, (index, arg)| {
                text.replace(&format!("{{{index}}}"), arg)
            })
    }
}

/// Handle to an optional translator, cheap to clone and hand down.
#[derive(Clone, Default)]
pub struct I18n {
    translator: Option<Arc<dyn Translate + Send + Sync>>,
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

impl I18n {
    pub fn new(translator: impl Translate + Send + Sync + 'static) -> Self {
        Self {
            translator: Some(Arc::new(translator)),
        }
    }

    /// An instance with no translator.
    pub const fn untranslated() -> Self {
        Self { translator: None }
    }

    /// Translates `id`, which doubles as the fallback text.
    pub fn t(&self, id: &str, args: &[&str]) -> String {
        match &self.translator {
            Some(translator) => translator.translate(id, args),
            None => id.to_owned(),
        }
    }

    /// Translates `id`, falling back to `default` when there is no
    /// translator or it has nothing for `id`.
    pub fn tt(&self, default: &str, id: &str, args: &[&str]) -> String {
        let Some(translator) = &self.translator else {
            return default.to_owned();
        };
        let value = translator.translate(id, args);
        if value == id { default.to_owned() } else { value }
    }
}
