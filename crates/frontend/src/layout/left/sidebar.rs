use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use crate::shared::locale::use_locale;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let locale = use_locale();

    view! {
        <nav class="sidebar">
            {Page::ALL
                .into_iter()
                .map(|page| {
                    view! {
                        <button
                            class="sidebar__item"
                            class:sidebar__item--active=move || ctx.page.get() == page
                            on:click=move |_| ctx.navigate(page)
                        >
                            <span class="sidebar__icon">{icon(page.icon())}</span>
                            <span class="sidebar__label">{move || locale.t(page.label_key())}</span>
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
