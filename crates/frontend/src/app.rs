use std::sync::Arc;

use crate::domain::a001_vehicle_reception::gateway::{HttpReceptionGateway, SharedGateway};
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::locale::LocaleContext;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Restores the stored language and sets `lang`/`dir` on <html>
    provide_context(LocaleContext::restore());
    provide_context(AppGlobalContext::new());

    let gateway: SharedGateway = Arc::new(HttpReceptionGateway::new());
    provide_context(gateway);

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppRoutes />
            </AuthProvider>
        </ConfigProvider>
    }
}
