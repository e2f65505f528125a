use leptos::prelude::*;

/// Title row of a page with optional action buttons on the end side
#[component]
pub fn PageHeader(
    #[prop(into)] title: Signal<&'static str>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <h1 class="page-header__title">{move || title.get()}</h1>
            <div class="page-header__actions">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
