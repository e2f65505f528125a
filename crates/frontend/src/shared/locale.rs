//! Active UI language.
//!
//! The choice is kept in `localStorage` under `app_locale` and mirrored onto
//! the `<html>` element as `lang` and `dir`, so the whole page flips between
//! right-to-left Arabic and left-to-right English.

use contracts::shared::i18n::{t, Locale};
use leptos::prelude::*;

use crate::shared::storage;

const LOCALE_KEY: &str = "app_locale";

#[derive(Clone, Copy)]
pub struct LocaleContext {
    pub locale: RwSignal<Locale>,
}

impl LocaleContext {
    /// Stored choice, Arabic when nothing was stored
    pub fn restore() -> Self {
        let locale = storage::get(LOCALE_KEY)
            .map(|code| Locale::from_code(&code))
            .unwrap_or_default();
        apply_to_document(locale);
        Self {
            locale: RwSignal::new(locale),
        }
    }

    pub fn get(&self) -> Locale {
        self.locale.get()
    }

    pub fn set(&self, locale: Locale) {
        storage::set(LOCALE_KEY, locale.code());
        apply_to_document(locale);
        self.locale.set(locale);
    }

    pub fn toggle(&self) {
        self.set(self.locale.get_untracked().toggled());
    }

    /// Message in the active language; tracks the locale signal
    pub fn t(&self, key: &'static str) -> &'static str {
        t(self.locale.get(), key)
    }
}

fn apply_to_document(locale: Locale) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    if root.set_attribute("lang", locale.code()).is_err()
        || root.set_attribute("dir", locale.dir().as_str()).is_err()
    {
        log::warn!("Failed to apply locale '{}' to <html>", locale.code());
    }
}

pub fn use_locale() -> LocaleContext {
    use_context::<LocaleContext>().expect("LocaleContext not found")
}
