//! Receptions table with server-side filters, sorting and paging.

pub mod state;

use contracts::domain::a001_vehicle_reception::VehicleReception;
use contracts::shared::i18n::weekday_label;
use contracts::shared::options::{label_for, OptionKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

use self::state::{ListState, SortColumn};
use crate::domain::a001_vehicle_reception::api;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::{format_date, format_quantity, format_time};
use crate::shared::icons::icon;
use crate::shared::locale::use_locale;
use crate::system::auth::context::use_auth;

#[component]
pub fn ReceptionList() -> impl IntoView {
    let locale = use_locale();
    let (auth_state, _) = use_auth();
    let state = RwSignal::new(ListState::default());
    let (items, set_items) = signal(Vec::<VehicleReception>::new());
    let (total, set_total) = signal(0u64);
    let (pages, set_pages) = signal(0u64);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        let query = state.get_untracked().to_query();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_page(&query).await {
                Ok(page) => {
                    set_total.set(page.total);
                    set_pages.set(page.pages);
                    set_items.set(page.items);
                }
                Err(e) => {
                    log::error!("Failed to load receptions: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    // Reload whenever anything that goes into the query changes
    Effect::new(move |_| {
        state.track();
        load();
    });

    let delete = move |id: uuid::Uuid| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(locale.t("common.confirmDelete")).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete(id).await {
                Ok(()) => load(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let can_delete = move |r: &VehicleReception| {
        let auth = auth_state.get();
        auth.is_admin()
            || auth.user_info.map(|u| u.id) == r.created_by
    };

    let sort_header = move |column: SortColumn, label_key: &'static str| {
        view! {
            <th class="sortable" on:click=move |_| state.update(|s| s.sort_on(column))>
                {move || locale.t(label_key)}
                {move || state.with(|s| s.sort_marker(column))}
            </th>
        }
    };

    view! {
        <div class="page">
            <PageHeader title=Signal::derive(move || locale.t("nav.receptions"))>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                    {icon("refresh")}
                    {move || locale.t("common.refresh")}
                </Button>
            </PageHeader>

            <div class="filter-panel">
                <input
                    type="text"
                    placeholder=move || locale.t("table.filterCompany")
                    prop:value=move || state.with(|s| s.company_filter.clone())
                    on:change=move |ev| state.update(|s| s.set_company(event_target_value(&ev)))
                />
                <input
                    type="text"
                    placeholder=move || locale.t("table.filterWaterType")
                    prop:value=move || state.with(|s| s.water_type_filter.clone())
                    on:change=move |ev| state.update(|s| s.set_water_type(event_target_value(&ev)))
                />
                <label>
                    {move || locale.t("table.dateFrom")}
                    <input
                        type="date"
                        prop:value=move || state.with(|s| s.date_from.clone())
                        on:change=move |ev| state.update(|s| s.set_date_from(event_target_value(&ev)))
                    />
                </label>
                <label>
                    {move || locale.t("table.dateTo")}
                    <input
                        type="date"
                        prop:value=move || state.with(|s| s.date_to.clone())
                        on:change=move |ev| state.update(|s| s.set_date_to(event_target_value(&ev)))
                    />
                </label>
            </div>

            {move || error.get().map(|e| view! {
                <div class="error-message">{locale.t("common.error")} ": " {e}</div>
            })}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>{move || locale.t("table.receptionNumber")}</th>
                        {sort_header(SortColumn::Date, "form.date")}
                        <th>{move || locale.t("table.day")}</th>
                        {sort_header(SortColumn::CompanyName, "form.company")}
                        <th>{move || locale.t("form.waterType")}</th>
                        <th>{move || locale.t("table.vehicles")}</th>
                        {sort_header(SortColumn::TotalQuantity, "form.quantity")}
                        <th>{move || locale.t("form.arrivalTime")}</th>
                        <th>{move || locale.t("form.departureTime")}</th>
                        {sort_header(SortColumn::CreatedAt, "table.createdAt")}
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show
                        when=move || !items.get().is_empty()
                        fallback=move || view! {
                            <tr>
                                <td colspan="11" class="empty-row">
                                    {move || if loading.get() { locale.t("common.loading") } else { locale.t("common.noData") }}
                                </td>
                            </tr>
                        }
                    >
                        <For
                            each=move || items.get()
                            key=|r| (r.id, r.metadata.version)
                            children=move |r: VehicleReception| {
                                let id = r.id.value();
                                let deletable = can_delete(&r);
                                view! {
                                    <tr>
                                        <td><code>{r.reception_number.clone()}</code></td>
                                        <td>{format_date(&r.date)}</td>
                                        <td>{move || weekday_label(locale.get(), &r.day_of_week)}</td>
                                        <td>{
                                            let name = r.company_name.clone();
                                            move || label_for(OptionKind::Company, locale.get(), &name)
                                        }</td>
                                        <td>{
                                            let water = r.water_type.clone();
                                            move || label_for(OptionKind::WaterType, locale.get(), &water)
                                        }</td>
                                        <td>{r.number_of_vehicles}</td>
                                        <td class="numeric">{format_quantity(r.total_quantity)}</td>
                                        <td>{format_time(&r.arrival_time)}</td>
                                        <td>{format_time(&r.departure_time)}</td>
                                        <td>{r.metadata.created_at.format("%d.%m.%Y %H:%M").to_string()}</td>
                                        <td>
                                            <Show when=move || deletable>
                                                <button
                                                    class="btn-danger btn-small"
                                                    title=move || locale.t("common.delete")
                                                    on:click=move |_| delete(id)
                                                >
                                                    {icon("trash")}
                                                </button>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </Show>
                </tbody>
            </table>

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page))
                total_pages=pages
                total_count=total
                on_page_change=Callback::new(move |page: u64| state.update(|s| s.page = page))
            />
        </div>
    }
}
