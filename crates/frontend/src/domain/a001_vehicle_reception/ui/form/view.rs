use contracts::domain::a001_vehicle_reception::{FieldKey, FormPhase, ReceptionCreate};
use contracts::shared::i18n::{t, Locale};
use contracts::shared::options::{is_other, label_for, OptionKind};
use leptos::prelude::*;

use super::fields::{ChoiceField, TextAreaField, TextField};
use super::view_model::ReceptionFormViewModel;
use crate::domain::a001_vehicle_reception::gateway::use_gateway;
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::{format_date, format_quantity, format_time};
use crate::shared::icons::icon;
use crate::shared::locale::use_locale;

#[component]
pub fn ReceptionFormPage() -> impl IntoView {
    let vm = ReceptionFormViewModel::new();
    let locale = use_locale();
    // Memo so that typing does not rebuild the page
    let phase = Memo::new(move |_| vm.phase());

    view! {
        <div class="page reception-form">
            <PageHeader title=Signal::derive(move || locale.t("form.addNewEnhanced")) />

            {move || match phase.get() {
                FormPhase::Submitted => view! { <SuccessBanner vm=vm /> }.into_any(),
                FormPhase::AwaitingConfirmation | FormPhase::Submitting => {
                    view! { <ConfirmationSummary vm=vm /> }.into_any()
                }
                FormPhase::Editing | FormPhase::Validating => view! { <Editor vm=vm /> }.into_any(),
            }}

            <FailureDialog vm=vm />
        </div>
    }
}

#[component]
fn Editor(vm: ReceptionFormViewModel) -> impl IntoView {
    let locale = use_locale();
    let err = move |key: FieldKey| Signal::derive(move || vm.error(key, locale.get()));
    let time_err = move |key: FieldKey| {
        Signal::derive(move || vm.error(key, locale.get()).or_else(|| vm.time_order_error(locale.get())))
    };

    let vehicle_count = Memo::new(move |_| vm.vehicle_count());
    let company = Signal::derive(move || vm.field(|d| &d.company_name));
    let water_type = Signal::derive(move || vm.field(|d| &d.water_type));

    view! {
        <form
            class="reception-form__body"
            on:submit=move |ev: leptos::ev::SubmitEvent| {
                ev.prevent_default();
                vm.review();
            }
        >
            <section class="card">
                <h3>{move || locale.t("form.receptionSummary")}</h3>
                <div class="form-grid">
                    <TextField
                        label_key="form.date"
                        input_type="date"
                        value=Signal::derive(move || vm.field(|d| &d.date))
                        on_input=Callback::new(move |v: String| vm.edit(|d| d.date = v))
                        error=err(FieldKey::Date)
                    />
                    <ChoiceField
                        kind=OptionKind::Company
                        label_key="form.company"
                        placeholder_key="form.selectCompany"
                        value=company
                        on_change=Callback::new(move |v: String| vm.edit(|d| d.company_name = v))
                        error=err(FieldKey::Company)
                    />
                    <Show when=move || is_other(&company.get())>
                        <TextField
                            label_key="form.customCompany"
                            value=Signal::derive(move || vm.field(|d| &d.custom_company))
                            on_input=Callback::new(move |v: String| vm.set_custom_company(v))
                            error=Signal::derive(|| None::<&'static str>)
                        />
                    </Show>
                    <ChoiceField
                        kind=OptionKind::WaterType
                        label_key="form.waterType"
                        placeholder_key="form.selectWaterType"
                        value=water_type
                        on_change=Callback::new(move |v: String| vm.edit(|d| d.water_type = v))
                        error=err(FieldKey::WaterType)
                    />
                    <Show when=move || is_other(&water_type.get())>
                        <TextField
                            label_key="form.customWaterType"
                            value=Signal::derive(move || vm.field(|d| &d.custom_water_type))
                            on_input=Callback::new(move |v: String| vm.set_custom_water_type(v))
                            error=Signal::derive(|| None::<&'static str>)
                        />
                    </Show>
                    <TextField
                        label_key="form.arrivalTime"
                        input_type="time"
                        value=Signal::derive(move || vm.field(|d| &d.arrival_time))
                        on_input=Callback::new(move |v: String| vm.edit(|d| d.arrival_time = v))
                        error=time_err(FieldKey::ArrivalTime)
                    />
                    <TextField
                        label_key="form.departureTime"
                        input_type="time"
                        value=Signal::derive(move || vm.field(|d| &d.departure_time))
                        on_input=Callback::new(move |v: String| vm.edit(|d| d.departure_time = v))
                        error=time_err(FieldKey::DepartureTime)
                    />
                    <TextField
                        label_key="form.exitTime"
                        input_type="time"
                        value=Signal::derive(move || vm.field(|d| &d.exit_time_drilling))
                        on_input=Callback::new(move |v: String| vm.edit(|d| d.exit_time_drilling = v))
                        error=err(FieldKey::ExitTime)
                    />
                    <TextField
                        label_key="form.invoiceNumber"
                        value=Signal::derive(move || vm.field(|d| &d.invoice_number))
                        on_input=Callback::new(move |v: String| vm.edit(|d| d.invoice_number = v))
                        error=Signal::derive(|| None::<&'static str>)
                    />
                    <TextField
                        label_key="form.cuttingBoxes"
                        input_type="number"
                        step="any"
                        value=Signal::derive(move || vm.field(|d| &d.cutting_boxes_amount))
                        on_input=Callback::new(move |v: String| vm.edit(|d| d.cutting_boxes_amount = v))
                        error=err(FieldKey::CuttingBoxes)
                    />
                    <div class="form-group total-quantity">
                        <label>
                            {move || locale.t("form.quantity")}
                            " (" {move || locale.t("form.autoCalculated")} ")"
                        </label>
                        <div class="total-quantity__value">
                            {move || format_quantity(vm.total_quantity())} " m³"
                        </div>
                    </div>
                </div>
                <TextAreaField
                    label_key="form.notes"
                    placeholder_key="form.notesPlaceholder"
                    value=Signal::derive(move || vm.field(|d| &d.notes))
                    on_input=Callback::new(move |v: String| vm.edit(|d| d.notes = v))
                />
            </section>

            <section class="card">
                <div class="card__header">
                    <h3>
                        {move || locale.t("form.vehicleDetails")}
                        " (" {move || vehicle_count.get()} ")"
                    </h3>
                    <button type="button" class="btn-secondary" on:click=move |_| vm.add_vehicle()>
                        {icon("plus")}
                        {move || locale.t("form.addVehicle")}
                    </button>
                </div>
                {move || {
                    (0..vehicle_count.get())
                        .map(|index| view! { <VehicleEntry vm=vm index=index /> })
                        .collect_view()
                }}
            </section>

            <div class="form-actions">
                <button type="submit" class="btn-primary">{move || locale.t("form.review")}</button>
            </div>
        </form>
    }
}

#[component]
fn VehicleEntry(vm: ReceptionFormViewModel, index: usize) -> impl IntoView {
    let locale = use_locale();
    let err = move |key: FieldKey| Signal::derive(move || vm.error(key, locale.get()));

    view! {
        <div class="vehicle-entry">
            <div class="vehicle-entry__header">
                <span class="vehicle-entry__title">
                    {icon("truck")}
                    {move || locale.t("form.vehicle")} " " {index + 1}
                </span>
                <Show when=move || { vm.vehicle_count() > 1 }>
                    <button
                        type="button"
                        class="btn-danger btn-small"
                        on:click=move |_| vm.remove_vehicle(index)
                    >
                        {icon("trash")}
                        {move || locale.t("form.removeVehicle")}
                    </button>
                </Show>
            </div>
            <div class="form-grid">
                <TextField
                    label_key="form.vehicleNumber"
                    value=Signal::derive(move || vm.vehicle_field(index, |v| &v.vehicle_number))
                    on_input=Callback::new(move |s: String| vm.edit_vehicle(index, |v| v.vehicle_number = s))
                    error=err(FieldKey::VehicleNumber(index))
                />
                <ChoiceField
                    kind=OptionKind::VehicleType
                    label_key="form.vehicleType"
                    placeholder_key="form.selectVehicleType"
                    value=Signal::derive(move || vm.vehicle_field(index, |v| &v.vehicle_type))
                    on_change=Callback::new(move |s: String| vm.edit_vehicle(index, |v| v.vehicle_type = s))
                    error=err(FieldKey::VehicleType(index))
                />
                <TextField
                    label_key="form.driverName"
                    value=Signal::derive(move || vm.vehicle_field(index, |v| &v.driver_name))
                    on_input=Callback::new(move |s: String| vm.edit_vehicle(index, |v| v.driver_name = s))
                    error=err(FieldKey::DriverName(index))
                />
                <TextField
                    label_key="form.carBrand"
                    value=Signal::derive(move || vm.vehicle_field(index, |v| &v.car_brand))
                    on_input=Callback::new(move |s: String| vm.edit_vehicle(index, |v| v.car_brand = s))
                    error=err(FieldKey::CarBrand(index))
                />
                <TextField
                    label_key="form.vehicleQuantity"
                    input_type="number"
                    step="any"
                    value=Signal::derive(move || vm.vehicle_field(index, |v| &v.vehicle_quantity))
                    on_input=Callback::new(move |s: String| vm.edit_vehicle(index, |v| v.vehicle_quantity = s))
                    error=err(FieldKey::VehicleQuantity(index))
                />
            </div>
        </div>
    }
}

fn summary_rows(payload: &ReceptionCreate, locale: Locale) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("form.date", format_date(&payload.date)),
        (
            "form.company",
            label_for(OptionKind::Company, locale, &payload.company_name),
        ),
        (
            "form.waterType",
            label_for(OptionKind::WaterType, locale, &payload.water_type),
        ),
        ("form.totalVehicles", payload.vehicles.len().to_string()),
        ("form.quantity", format!("{} m³", format_quantity(payload.total_quantity))),
    ];
    let optional = [
        ("form.arrivalTime", format_time(&payload.arrival_time)),
        ("form.departureTime", format_time(&payload.departure_time)),
        ("form.exitTime", format_time(&payload.exit_time_drilling)),
        ("form.invoiceNumber", payload.invoice_number.clone().unwrap_or_default()),
        (
            "form.cuttingBoxes",
            payload
                .cutting_boxes_amount
                .map(format_quantity)
                .unwrap_or_default(),
        ),
        ("form.notes", payload.notes.clone().unwrap_or_default()),
    ];
    rows.extend(optional.into_iter().filter(|(_, v)| !v.is_empty()));
    rows
}

#[component]
fn ConfirmationSummary(vm: ReceptionFormViewModel) -> impl IntoView {
    let locale = use_locale();
    let gateway = use_gateway();
    let submitting = move || vm.phase() == FormPhase::Submitting;

    view! {
        <section class="card confirmation">
            <h3>{move || locale.t("form.confirmSubmission")}</h3>
            {move || {
                let lang = locale.get();
                vm.pending().map(|payload| {
                    let rows = summary_rows(&payload, lang)
                        .into_iter()
                        .map(|(key, value)| view! {
                            <div class="confirmation__row">
                                <span class="confirmation__label">{t(lang, key)}</span>
                                <span class="confirmation__value">{value}</span>
                            </div>
                        })
                        .collect_view();
                    let vehicles = payload
                        .vehicles
                        .into_iter()
                        .map(|v| view! {
                            <tr>
                                <td>{v.vehicle_order}</td>
                                <td>{v.vehicle_number}</td>
                                <td>{label_for(OptionKind::VehicleType, lang, &v.vehicle_type)}</td>
                                <td>{v.driver_name}</td>
                                <td>{v.car_brand}</td>
                                <td>{format_quantity(v.vehicle_quantity)}</td>
                            </tr>
                        })
                        .collect_view();
                    view! {
                        <div class="confirmation__rows">{rows}</div>
                        <h4>{t(lang, "form.vehiclesList")}</h4>
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>"#"</th>
                                    <th>{t(lang, "form.vehicleNumber")}</th>
                                    <th>{t(lang, "form.vehicleType")}</th>
                                    <th>{t(lang, "form.driverName")}</th>
                                    <th>{t(lang, "form.carBrand")}</th>
                                    <th>{t(lang, "form.vehicleQuantity")}</th>
                                </tr>
                            </thead>
                            <tbody>{vehicles}</tbody>
                        </table>
                    }
                })
            }}
            <div class="form-actions">
                <button
                    class="btn-secondary"
                    disabled=submitting
                    on:click=move |_| vm.back_to_edit()
                >
                    {move || locale.t("common.back")}
                </button>
                <button
                    class="btn-primary"
                    disabled=submitting
                    on:click=move |_| vm.confirm(gateway.clone())
                >
                    {move || if submitting() { locale.t("form.saving") } else { locale.t("form.create") }}
                </button>
            </div>
        </section>
    }
}

#[component]
fn SuccessBanner(vm: ReceptionFormViewModel) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="success-banner">
            {icon("check")}
            <div class="success-banner__text">
                <strong>{move || locale.t("form.created")}</strong>
                <span>
                    {move || locale.t("form.receptionNumber")} ": "
                    <code>{move || vm.reception_number().unwrap_or_default()}</code>
                </span>
            </div>
            <button class="btn-primary" on:click=move |_| vm.start_over()>
                {move || locale.t("form.newAnother")}
            </button>
        </div>
    }
}

/// Blocks the page until dismissed; the draft stays as it was
#[component]
fn FailureDialog(vm: ReceptionFormViewModel) -> impl IntoView {
    let locale = use_locale();

    view! {
        <Show when=move || vm.failure_open.get()>
            <div class="modal-overlay">
                <div class="modal modal--error" role="alertdialog">
                    <h3>{icon("alert")} {move || locale.t("form.submitFailed")}</h3>
                    <p>{move || vm.failure_message().unwrap_or_default()}</p>
                    <div class="form-actions">
                        <button class="btn-primary" on:click=move |_| vm.failure_open.set(false)>
                            {move || locale.t("common.back")}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
