use contracts::dashboards::d401_reception_stats::dto::{ReceptionStats, ReceptionStatsQuery};
use contracts::shared::options::{label_for, OptionKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::dashboards::d401_reception_stats::api;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::date_utils::format_quantity;
use crate::shared::locale::use_locale;

fn non_blank(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Totals for an optional date range; empty bounds mean all time
#[component]
pub fn ReceptionStatsDashboard() -> impl IntoView {
    let locale = use_locale();
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());
    let (stats, set_stats) = signal(None::<ReceptionStats>);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let query = ReceptionStatsQuery {
            date_from: non_blank(date_from.get()),
            date_to: non_blank(date_to.get()),
        };
        set_error.set(None);
        spawn_local(async move {
            match api::get_stats(&query).await {
                Ok(data) => set_stats.set(Some(data)),
                Err(e) => {
                    log::error!("Failed to load reception stats: {}", e);
                    set_stats.set(None);
                    set_error.set(Some(e));
                }
            }
        });
    });

    let figure = move |f: fn(&ReceptionStats) -> String| {
        Signal::derive(move || stats.with(|s| s.as_ref().map(f)))
    };

    view! {
        <div class="page dashboard">
            <PageHeader title=Signal::derive(move || locale.t("nav.dashboard"))>
                <label>
                    {move || locale.t("table.dateFrom")}
                    <input
                        type="date"
                        prop:value=move || date_from.get()
                        on:change=move |ev| date_from.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    {move || locale.t("table.dateTo")}
                    <input
                        type="date"
                        prop:value=move || date_to.get()
                        on:change=move |ev| date_to.set(event_target_value(&ev))
                    />
                </label>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="error-message">{locale.t("common.error")} ": " {e}</div>
            })}

            <div class="stat-grid">
                <StatCard
                    label=Signal::derive(move || locale.t("dashboard.totalReceptions"))
                    icon_name="file-text"
                    value=figure(|s| s.total_receptions.to_string())
                />
                <StatCard
                    label=Signal::derive(move || locale.t("dashboard.totalVehicles"))
                    icon_name="truck"
                    value=figure(|s| s.total_vehicles.to_string())
                />
                <StatCard
                    label=Signal::derive(move || locale.t("dashboard.totalQuantity"))
                    icon_name="droplet"
                    value=figure(|s| format_quantity(s.total_quantity))
                />
                <StatCard
                    label=Signal::derive(move || locale.t("dashboard.companies"))
                    icon_name="building"
                    value=figure(|s| s.companies.len().to_string())
                />
            </div>

            <div class="dashboard__lists">
                <section class="card">
                    <h3>{move || locale.t("dashboard.companies")}</h3>
                    <ul>
                        {move || {
                            let lang = locale.get();
                            stats.with(|s| {
                                s.iter()
                                    .flat_map(|s| s.companies.iter())
                                    .map(|c| view! { <li>{label_for(OptionKind::Company, lang, c)}</li> })
                                    .collect_view()
                            })
                        }}
                    </ul>
                </section>
                <section class="card">
                    <h3>{move || locale.t("dashboard.waterTypes")}</h3>
                    <ul>
                        {move || {
                            let lang = locale.get();
                            stats.with(|s| {
                                s.iter()
                                    .flat_map(|s| s.water_types.iter())
                                    .map(|w| view! { <li>{label_for(OptionKind::WaterType, lang, w)}</li> })
                                    .collect_view()
                            })
                        }}
                    </ul>
                </section>
            </div>
        </div>
    }
}
