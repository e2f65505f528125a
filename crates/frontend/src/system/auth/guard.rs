use leptos::prelude::*;

use super::context::use_auth;
use crate::shared::locale::use_locale;

/// Renders `children` only for administrators
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let locale = use_locale();

    view! {
        <Show
            when=move || auth_state.get().is_admin()
            fallback=move || view! { <div class="notice">{move || locale.t("auth.adminOnly")}</div> }
        >
            {children()}
        </Show>
    }
}
