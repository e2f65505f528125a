use crate::shared::icons::icon;
use leptos::prelude::*;

/// One dashboard figure; `value` is `None` while loading
#[component]
pub fn StatCard(
    #[prop(into)] label: Signal<&'static str>,
    icon_name: &'static str,
    #[prop(into)] value: Signal<Option<String>>,
    /// Optional line below the value
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{move || label.get()}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "\u{2014}".to_string())}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}
