use crate::shared::icons::icon;
use crate::shared::locale::use_locale;
use leptos::prelude::*;

/// Previous / next controls over 1-based pages
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<u64>,
    #[prop(into)] total_pages: Signal<u64>,
    #[prop(into)] total_count: Signal<u64>,
    on_page_change: Callback<u64>,
) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() <= 1
                title=move || locale.t("table.prev")
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!(
                    "{} {} {} {} ({})",
                    locale.t("table.page"),
                    current_page.get(),
                    locale.t("table.of"),
                    total_pages.get().max(1),
                    total_count.get()
                )}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page.get() >= total_pages.get()
                title=move || locale.t("table.next")
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
