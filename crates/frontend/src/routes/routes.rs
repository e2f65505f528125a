use crate::dashboards::d401_reception_stats::ui::dashboard::ReceptionStatsDashboard;
use crate::dashboards::d402_period_report::ui::dashboard::ReportsPage;
use crate::domain::a001_vehicle_reception::ui::form::ReceptionFormPage;
use crate::domain::a001_vehicle_reception::ui::list::ReceptionList;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Runs once when the layout is created
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                (move || match ctx.page.get() {
                    Page::Dashboard => view! { <ReceptionStatsDashboard /> }.into_any(),
                    Page::NewReception => view! { <ReceptionFormPage /> }.into_any(),
                    Page::Receptions => view! { <ReceptionList /> }.into_any(),
                    Page::Reports => view! { <ReportsPage /> }.into_any(),
                })
                .into_any()
            }
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
