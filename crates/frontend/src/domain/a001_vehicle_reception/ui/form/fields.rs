//! Labelled inputs with an inline error line.

use contracts::shared::options::{options, OptionKind};
use leptos::prelude::*;

use crate::shared::locale::use_locale;

#[component]
pub fn TextField(
    label_key: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder_key: Option<&'static str>,
    #[prop(optional)] step: Option<&'static str>,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="form-group" class:form-group--invalid=move || error.get().is_some()>
            <label>{move || locale.t(label_key)}</label>
            <input
                type=input_type
                step=step
                placeholder=move || placeholder_key.map(|k| locale.t(k))
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || error.get().map(|msg| view! { <div class="field-error">{msg}</div> })}
        </div>
    }
}

#[component]
pub fn TextAreaField(
    label_key: &'static str,
    placeholder_key: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="form-group form-group--wide">
            <label>{move || locale.t(label_key)}</label>
            <textarea
                rows="3"
                placeholder=move || locale.t(placeholder_key)
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

/// Dropdown over one option list; labels follow the active locale, stored
/// values do not
#[component]
pub fn ChoiceField(
    kind: OptionKind,
    label_key: &'static str,
    placeholder_key: &'static str,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(into)] error: Signal<Option<&'static str>>,
) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="form-group" class:form-group--invalid=move || error.get().is_some()>
            <label>{move || locale.t(label_key)}</label>
            <select
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">{move || locale.t(placeholder_key)}</option>
                {move || {
                    options(kind, locale.get())
                        .into_iter()
                        .map(|opt| {
                            let selected = value.get_untracked() == opt.value;
                            view! {
                                <option value=opt.value selected=selected>{opt.label}</option>
                            }
                        })
                        .collect_view()
                }}
            </select>
            {move || error.get().map(|msg| view! { <div class="field-error">{msg}</div> })}
        </div>
    }
}
