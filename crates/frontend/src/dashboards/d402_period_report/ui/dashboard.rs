use contracts::dashboards::d402_period_report::dto::{
    BreakdownEntry, ReportRequest, ReportSummary, ReportSummaryQuery, ReportType,
};
use contracts::shared::i18n::{t, Locale};
use contracts::shared::options::{label_for, OptionKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;
use thaw::{Button, ButtonAppearance};

use crate::dashboards::d402_period_report::api;
use crate::dashboards::d403_financial_report::ui::dashboard::FinancialReport;
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::{format_quantity, iso_date, month_start, today};
use crate::shared::download::download_csv;
use crate::shared::icons::icon;
use crate::shared::locale::use_locale;
use crate::system::auth::guard::RequireAdmin;

fn non_blank(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

fn report_type_key(kind: ReportType) -> &'static str {
    match kind {
        ReportType::Daily => "reports.daily",
        ReportType::Weekly => "reports.weekly",
        ReportType::Monthly => "reports.monthly",
    }
}

fn parse_report_type(value: &str) -> ReportType {
    match value {
        "weekly" => ReportType::Weekly,
        "monthly" => ReportType::Monthly,
        _ => ReportType::Daily,
    }
}

/// Period inputs shared by the summary and the export
#[derive(Clone, Copy)]
struct PeriodForm {
    start: RwSignal<String>,
    end: RwSignal<String>,
    company: RwSignal<String>,
    water_type: RwSignal<String>,
    report_type: RwSignal<ReportType>,
}

impl PeriodForm {
    fn new() -> Self {
        let now = today();
        Self {
            start: RwSignal::new(iso_date(month_start(now))),
            end: RwSignal::new(iso_date(now)),
            company: RwSignal::new(String::new()),
            water_type: RwSignal::new(String::new()),
            report_type: RwSignal::new(ReportType::default()),
        }
    }

    fn summary_query(&self) -> ReportSummaryQuery {
        ReportSummaryQuery {
            start_date: self.start.get_untracked(),
            end_date: self.end.get_untracked(),
            company_filter: non_blank(self.company.get_untracked()),
            water_type_filter: non_blank(self.water_type.get_untracked()),
        }
    }

    fn export_request(&self) -> ReportRequest {
        let q = self.summary_query();
        ReportRequest {
            start_date: q.start_date,
            end_date: q.end_date,
            report_type: self.report_type.get_untracked(),
            company_filter: q.company_filter,
            water_type_filter: q.water_type_filter,
        }
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let locale = use_locale();
    let form = PeriodForm::new();
    let (summary, set_summary) = signal(None::<ReportSummary>);
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let load_summary = move || {
        let query = form.summary_query();
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::get_summary(&query).await {
                Ok(data) => set_summary.set(Some(data)),
                Err(e) => set_error.set(Some(e)),
            }
            set_busy.set(false);
        });
    };

    let export = move || {
        let request = form.export_request();
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::generate(&request).await.and_then(|(name, content)| {
                let fallback = format!(
                    "vehicle_reception_{}_report_{}_{}.csv",
                    request.report_type.as_str(),
                    request.start_date.replace('-', ""),
                    request.end_date.replace('-', "")
                );
                download_csv(&content, &name.unwrap_or(fallback))
            });
            if let Err(e) = result {
                log::error!("Report export failed: {}", e);
                set_error.set(Some(e));
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="page reports">
            <PageHeader title=Signal::derive(move || locale.t("reports.title")) />

            <section class="card">
                <div class="filter-panel">
                    <label>
                        {move || locale.t("reports.startDate")}
                        <input
                            type="date"
                            prop:value=move || form.start.get()
                            on:change=move |ev| form.start.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        {move || locale.t("reports.endDate")}
                        <input
                            type="date"
                            prop:value=move || form.end.get()
                            on:change=move |ev| form.end.set(event_target_value(&ev))
                        />
                    </label>
                    <input
                        type="text"
                        placeholder=move || locale.t("table.filterCompany")
                        prop:value=move || form.company.get()
                        on:input=move |ev| form.company.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder=move || locale.t("table.filterWaterType")
                        prop:value=move || form.water_type.get()
                        on:input=move |ev| form.water_type.set(event_target_value(&ev))
                    />
                    <label>
                        {move || locale.t("reports.type")}
                        <select on:change=move |ev| form.report_type.set(parse_report_type(&event_target_value(&ev)))>
                            {[ReportType::Daily, ReportType::Weekly, ReportType::Monthly]
                                .into_iter()
                                .map(|kind| view! {
                                    <option
                                        value=kind.as_str()
                                        selected=move || form.report_type.get() == kind
                                    >
                                        {move || locale.t(report_type_key(kind))}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </label>
                </div>
                <div class="form-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=busy
                        on_click=move |_| load_summary()
                    >
                        {move || locale.t("reports.summary")}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=busy
                        on_click=move |_| export()
                    >
                        {icon("download")}
                        {move || locale.t("reports.download")}
                    </Button>
                </div>
            </section>

            {move || error.get().map(|e| view! {
                <div class="error-message">{locale.t("common.error")} ": " {e}</div>
            })}

            {move || {
                let lang = locale.get();
                summary.get().map(|s| view! { <SummaryView summary=s locale=lang /> })
            }}

            <RequireAdmin>
                <FinancialReport />
            </RequireAdmin>
        </div>
    }
}

fn breakdown_table(
    entries: BTreeMap<String, BreakdownEntry>,
    kind: OptionKind,
    title_key: &'static str,
    locale: Locale,
) -> impl IntoView {
    let rows = entries
        .into_iter()
        .map(|(name, e)| view! {
            <tr>
                <td>{label_for(kind, locale, &name)}</td>
                <td class="numeric">{e.receptions}</td>
                <td class="numeric">{e.vehicles}</td>
                <td class="numeric">{format_quantity(e.quantity)}</td>
            </tr>
        })
        .collect_view();

    view! {
        <section class="card">
            <h3>{t(locale, title_key)}</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        <th></th>
                        <th>{t(locale, "reports.count")}</th>
                        <th>{t(locale, "table.vehicles")}</th>
                        <th>{t(locale, "form.quantity")}</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </section>
    }
}

#[component]
fn SummaryView(summary: ReportSummary, locale: Locale) -> impl IntoView {
    let ReportSummary {
        period,
        totals,
        averages,
        breakdowns,
    } = summary;

    view! {
        <section class="card report-summary">
            <div class="report-summary__period">
                {period.start_date} " \u{2192} " {period.end_date}
                " (" {t(locale, "reports.days")} ": " {period.days} ")"
            </div>
            <div class="stat-grid">
                <div class="stat-card">
                    <div class="stat-card__label">{t(locale, "dashboard.totalReceptions")}</div>
                    <div class="stat-card__value">{totals.receptions}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-card__label">{t(locale, "dashboard.totalVehicles")}</div>
                    <div class="stat-card__value">{totals.vehicles}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-card__label">{t(locale, "dashboard.totalQuantity")}</div>
                    <div class="stat-card__value">{format_quantity(totals.quantity)}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-card__label">{t(locale, "reports.vehiclesPerDay")}</div>
                    <div class="stat-card__value">{format_quantity(averages.vehicles_per_day)}</div>
                </div>
                <div class="stat-card">
                    <div class="stat-card__label">{t(locale, "reports.quantityPerDay")}</div>
                    <div class="stat-card__value">{format_quantity(averages.quantity_per_day)}</div>
                </div>
            </div>
        </section>
        {breakdown_table(breakdowns.companies, OptionKind::Company, "dashboard.companies", locale)}
        {breakdown_table(breakdowns.water_types, OptionKind::WaterType, "dashboard.waterTypes", locale)}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_type() {
        assert_eq!(parse_report_type("weekly"), ReportType::Weekly);
        assert_eq!(parse_report_type("monthly"), ReportType::Monthly);
        assert_eq!(parse_report_type("daily"), ReportType::Daily);
        assert_eq!(parse_report_type(""), ReportType::Daily);
    }
}
