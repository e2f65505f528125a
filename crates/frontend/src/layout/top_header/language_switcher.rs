use crate::shared::icons::icon;
use crate::shared::locale::use_locale;
use leptos::prelude::*;

/// Button showing the other language; switches the whole UI and text direction
#[component]
pub fn LanguageSwitcher() -> impl IntoView {
    let locale = use_locale();

    view! {
        <button class="language-switcher" on:click=move |_| locale.toggle()>
            {icon("globe")}
            <span>{move || locale.get().toggled().native_name()}</span>
        </button>
    }
}
