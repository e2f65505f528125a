use contracts::dashboards::d403_financial_report::dto::{
    CompanyRatesResponse, FinancialReportRequest, FinancialReportSummary,
};
use contracts::shared::i18n::{t, Locale};
use contracts::shared::options::{label_for, OptionKind};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

use crate::dashboards::d403_financial_report::api;
use crate::shared::date_utils::{format_quantity, iso_date, month_start, today};
use crate::shared::download::download_csv;
use crate::shared::icons::icon;
use crate::shared::locale::use_locale;

/// Cost per company over a period, priced with the configured rates.
/// Rendered only for administrators.
#[component]
pub fn FinancialReport() -> impl IntoView {
    let locale = use_locale();
    let now = today();
    let start = RwSignal::new(iso_date(month_start(now)));
    let end = RwSignal::new(iso_date(now));
    let company = RwSignal::new(String::new());
    let (summary, set_summary) = signal(None::<FinancialReportSummary>);
    let (rates, set_rates) = signal(None::<CompanyRatesResponse>);
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    spawn_local(async move {
        match api::get_company_rates().await {
            Ok(data) => set_rates.set(Some(data)),
            Err(e) => log::error!("Failed to load company rates: {}", e),
        }
    });

    let request = move || {
        let company = company.get_untracked().trim().to_string();
        FinancialReportRequest {
            start_date: start.get_untracked(),
            end_date: end.get_untracked(),
            company_filter: (!company.is_empty()).then_some(company),
        }
    };

    let load_summary = move || {
        let req = request();
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::get_summary(&req).await {
                Ok(data) => set_summary.set(Some(data)),
                Err(e) => set_error.set(Some(e)),
            }
            set_busy.set(false);
        });
    };

    let export = move || {
        let req = request();
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::generate(&req).await.and_then(|(name, content)| {
                let fallback = format!(
                    "financial_report_{}_{}.csv",
                    req.start_date.replace('-', ""),
                    req.end_date.replace('-', "")
                );
                download_csv(&content, &name.unwrap_or(fallback))
            });
            if let Err(e) = result {
                log::error!("Financial export failed: {}", e);
                set_error.set(Some(e));
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="card financial-report">
            <h2>{move || locale.t("reports.financial")}</h2>
            <div class="filter-panel">
                <label>
                    {move || locale.t("reports.startDate")}
                    <input
                        type="date"
                        prop:value=move || start.get()
                        on:change=move |ev| start.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    {move || locale.t("reports.endDate")}
                    <input
                        type="date"
                        prop:value=move || end.get()
                        on:change=move |ev| end.set(event_target_value(&ev))
                    />
                </label>
                <input
                    type="text"
                    placeholder=move || locale.t("table.filterCompany")
                    prop:value=move || company.get()
                    on:input=move |ev| company.set(event_target_value(&ev))
                />
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

            {move || error.get().map(|e| view! {
                <div class="error-message">{locale.t("common.error")} ": " {e}</div>
            })}

            {move || {
                let lang = locale.get();
                summary.get().map(|s| summary_table(s, lang))
            }}

            {move || {
                let lang = locale.get();
                rates.get().map(|r| rates_table(r, lang))
            }}
        </section>
    }
}

fn summary_table(summary: FinancialReportSummary, locale: Locale) -> impl IntoView {
    let rows = summary
        .companies
        .into_iter()
        .map(|c| view! {
            <tr>
                <td>{label_for(OptionKind::Company, locale, &c.company_name)}</td>
                <td class="numeric">{c.reception_count}</td>
                <td class="numeric">{format_quantity(c.total_volume_m3)}</td>
                <td class="numeric">{format_quantity(c.rate_per_m3)}</td>
                <td>{c.currency.code()}</td>
                <td class="numeric">{format_quantity(c.total_cost)}</td>
            </tr>
        })
        .collect_view();

    let currency_totals = summary
        .totals_by_currency
        .into_iter()
        .map(|(code, amount)| view! {
            <li><strong>{code}</strong> " " {format_quantity(amount)}</li>
        })
        .collect_view();

    view! {
        <div class="financial-report__summary">
            <div class="report-summary__period">
                {summary.period_start} " \u{2192} " {summary.period_end}
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{t(locale, "form.company")}</th>
                        <th>{t(locale, "reports.count")}</th>
                        <th>{t(locale, "reports.volume")}</th>
                        <th>{t(locale, "reports.rate")}</th>
                        <th>{t(locale, "reports.currency")}</th>
                        <th>{t(locale, "reports.cost")}</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
                <tfoot>
                    <tr>
                        <td colspan="2">{t(locale, "reports.total")}</td>
                        <td class="numeric">{format_quantity(summary.total_volume_m3)}</td>
                        <td colspan="2"></td>
                        <td class="numeric">{format_quantity(summary.total_cost)}</td>
                    </tr>
                </tfoot>
            </table>
            <h3>{t(locale, "reports.totalsByCurrency")}</h3>
            <ul>{currency_totals}</ul>
        </div>
    }
}

fn rates_table(rates: CompanyRatesResponse, locale: Locale) -> impl IntoView {
    let rows = rates
        .rates
        .into_iter()
        .map(|r| {
            let water = r
                .water_type
                .as_deref()
                .map(|w| label_for(OptionKind::WaterType, locale, w))
                .unwrap_or_else(|| t(locale, "reports.anyWaterType").to_string());
            view! {
                <tr>
                    <td>{label_for(OptionKind::Company, locale, &r.company_name)}</td>
                    <td>{water}</td>
                    <td class="numeric">{format_quantity(r.rate)}</td>
                    <td>{r.currency.code()}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="financial-report__rates">
            <h3>{t(locale, "reports.rates")}</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{t(locale, "form.company")}</th>
                        <th>{t(locale, "form.waterType")}</th>
                        <th>{t(locale, "reports.rate")}</th>
                        <th>{t(locale, "reports.currency")}</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <p class="hint">
                {t(locale, "reports.defaultRate")} ": "
                {format_quantity(rates.default_rate)} " " {rates.default_currency.code()}
            </p>
        </div>
    }
}
