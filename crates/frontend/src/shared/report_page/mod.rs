//! Generic report page: fetch, normalize, filter, total, export.
//!
//! A report is described by a [`ReportDefinition`]; this component holds
//! all the behavior, so report modules only declare columns, filters and
//! their fetcher.

pub mod definition;
pub mod filters;

pub use definition::{DeleteFuture, FilterField, ReportDefinition, RowsFuture, ServerParams};

use contracts::shared::business_info::BusinessInfo;
use contracts::shared::query::ReportQuery;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reports::{
    aggregate, export_and_download, filter_rows, normalize_rows, trigger_download, DocumentMeta,
    ExportArtifact, ExportFormat, ExportPhase, ExportSession, PdfFont, ReportRow,
};
use thaw::*;

use crate::shared::api_utils::{abort_on_cleanup, get_bytes, resource_url, LatestRequest};
use crate::shared::business_info::fetch_business_info;
use crate::shared::components::{FilterPanel, FilterTag, TableTotalsRow};
use crate::shared::config::config;
use crate::shared::export::BrowserDownload;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal::{AlertModal, ConfirmModal};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use filters::{build_criteria, build_query, describe, FilterInputs, InputPart};

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn document_meta(business: BusinessInfo) -> DocumentMeta {
    let export = config().export;
    let mut meta = DocumentMeta::new(business, today());
    meta.sheet_name = export.sheet_name();
    meta.signatures = export.signature_labels;
    meta.font = Some(PdfFont::bundled());
    meta
}

/// Numbers row loads; only the newest one may publish its result
#[derive(Debug, Default)]
struct LoadSequence(u64);

impl LoadSequence {
    fn start(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Text naming `row` in the delete confirmation
fn row_name(d: &ReportDefinition, row: &ReportRow) -> String {
    let Some(delete) = d.delete else {
        return String::new();
    };
    match (d.spec.column_by_key(delete.name_key), row.get(delete.name_key)) {
        (Some(col), Some(value)) => col.display(value, &d.spec.format),
        _ => row.id.clone().unwrap_or_default(),
    }
}

/// One text box of the filter form
#[component]
fn FilterBox(
    inputs: RwSignal<FilterInputs>,
    key: &'static str,
    part: InputPart,
    #[prop(optional)]
    input_type: &'static str,
    #[prop(optional)]
    placeholder: &'static str,
) -> impl IntoView {
    let input_type = if input_type.is_empty() { "text" } else { input_type };
    let value = move || {
        inputs.with(|m| m.get(key).map(|i| part.get(i).to_string()).unwrap_or_default())
    };

    view! {
        <input
            class="input filter-panel__input"
            type=input_type
            placeholder=placeholder
            prop:value=value
            on:input=move |ev| {
                let text = event_target_value(&ev);
                inputs.update(|m| part.set(m.entry(key).or_default(), text));
            }
        />
    }
}

#[component]
fn FilterFieldInput(field: FilterField, inputs: RwSignal<FilterInputs>) -> impl IntoView {
    let key = field.key();
    let control = match field {
        FilterField::Contains { .. } => view! {
            <FilterBox inputs=inputs key=key part=InputPart::Text placeholder="Contains..." />
        }
        .into_any(),
        FilterField::Range { .. } => view! {
            <FilterBox inputs=inputs key=key part=InputPart::Min placeholder="Min" />
            <span class="filter-panel__dash">"to"</span>
            <FilterBox inputs=inputs key=key part=InputPart::Max placeholder="Max" />
        }
        .into_any(),
        FilterField::DateRange { .. } => view! {
            <FilterBox inputs=inputs key=key part=InputPart::From input_type="date" />
            <span class="filter-panel__dash">"to"</span>
            <FilterBox inputs=inputs key=key part=InputPart::To input_type="date" />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label class="form__label">{field.label()}</label>
            <div class="form__row">{control}</div>
        </div>
    }
}

#[component]
pub fn ReportPage(definition: ReportDefinition) -> impl IntoView {
    let mut definition = definition;
    definition.spec.format.currency = config().export.currency;
    for key in definition.unknown_filter_keys() {
        log::warn!("report '{}': filter '{}' has no column", definition.page_id, key);
    }
    let page_id = format!("{}--{}", definition.page_id, PAGE_CAT_LIST);
    let def = StoredValue::new(definition);

    let abort = StoredValue::new_local(abort_on_cleanup());
    let row_request = LatestRequest::new();
    let load_sequence = StoredValue::new(LoadSequence::default());

    let rows = RwSignal::new(Vec::<ReportRow>::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let alert = RwSignal::new(None::<String>);
    let phase = RwSignal::new(ExportPhase::Idle);
    let business = RwSignal::new(BusinessInfo::default());
    let is_filter_expanded = RwSignal::new(true);
    let pending_delete = RwSignal::new(None::<(String, String)>);

    let inputs = RwSignal::new(FilterInputs::new());
    let search = RwSignal::new(String::new());
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());
    let days = RwSignal::new(String::new());

    let criteria = Memo::new(move |_| {
        let inputs = inputs.get();
        let search = search.get();
        def.with_value(|d| build_criteria(&d.filters, &inputs, &search))
    });
    let filtered = Memo::new(move |_| {
        let criteria = criteria.get();
        rows.with(|rows| def.with_value(|d| filter_rows(&d.spec, rows, &criteria)))
    });
    let totals = Memo::new(move |_| filtered.with(|shown| def.with_value(|d| aggregate(&d.spec, shown))));
    let active_filters_count = Signal::derive(move || criteria.with(|c| c.active_count()));
    let is_busy = Signal::derive(move || phase.get().is_busy());

    let query = Memo::new(move |_| {
        let (from, to, days) = (date_from.get(), date_to.get(), days.get());
        def.with_value(|d| build_query(&d.base_query, d.server_params, &from, &to, &days))
    });

    let load = move |query: ReportQuery| {
        is_loading.set(true);
        error.set(None);
        let fetch = def.with_value(|d| d.fetch);
        let signal = row_request.next();
        let Some(ticket) = load_sequence.try_update_value(LoadSequence::start) else {
            return;
        };
        spawn_local(async move {
            let result = fetch(query, signal).await;
            let current = load_sequence.try_with_value(|seq| seq.is_current(ticket));
            if current != Some(true) {
                return;
            }
            match result {
                Ok(items) => {
                    let normalized = def.with_value(|d| normalize_rows(&d.spec, &items));
                    log::debug!(
                        "{}: loaded {} records",
                        def.with_value(|d| d.page_id),
                        normalized.len()
                    );
                    rows.set(normalized);
                }
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::warn!("{}: {}", def.with_value(|d| d.page_id), e);
                    error.set(Some(e.to_string()));
                }
            }
            is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load(query.get());
    });

    // store details for the PDF header; a failure only costs the header
    Effect::new(move |_| {
        let signal = abort.get_value();
        spawn_local(async move {
            match fetch_business_info(signal).await {
                Ok(info) => business.set(info),
                Err(e) if e.is_aborted() => {}
                Err(e) => log::warn!("business info unavailable: {}", e),
            }
        });
    });

    let run_export = move |format: ExportFormat| {
        if phase.get_untracked().is_busy() {
            return;
        }
        phase.set(ExportPhase::Encoding);
        spawn_local(async move {
            // let the busy state paint before encoding
            TimeoutFuture::new(0).await;
            let shown = filtered.get_untracked();
            let totals = totals.get_untracked();
            let meta = document_meta(business.get_untracked());
            let result = def.with_value(|d| {
                let totals = (!d.spec.total_keys.is_empty()).then_some(&totals);
                BrowserDownload::new().and_then(|mut target| {
                    export_and_download(
                        &mut target,
                        |p| phase.set(p),
                        format,
                        &d.spec,
                        &shown,
                        totals,
                        &meta,
                    )
                })
            });
            if let Err(e) = result {
                phase.set(ExportPhase::Idle);
                alert.set(Some(e.to_string()));
            }
        });
    };

    let download_server_excel = move || {
        let Some(name) = def.with_value(|d| d.server_excel) else {
            return;
        };
        if phase.get_untracked().is_busy() {
            return;
        }
        let url = resource_url(&format!("/api/reports/{}/excel/", name), &query.get_untracked());
        let fallback_name = def.with_value(|d| ExportFormat::Xlsx.file_name(&d.spec, today()));
        let signal = abort.get_value();
        spawn_local(async move {
            let mut session = ExportSession::start(move |p| phase.set(p));
            match get_bytes(&url, signal.as_ref(), "Failed to download the report").await {
                Ok((bytes, filename)) => {
                    session.triggering();
                    let artifact = ExportArtifact {
                        filename: filename.unwrap_or(fallback_name),
                        mime: ExportFormat::Xlsx.mime(),
                        bytes,
                    };
                    let result = BrowserDownload::new()
                        .and_then(|mut target| trigger_download(&mut target, &artifact));
                    if let Err(e) = result {
                        alert.set(Some(e.to_string()));
                    }
                }
                Err(e) if e.is_aborted() => {}
                Err(e) => alert.set(Some(e.to_string())),
            }
        });
    };

    let confirm_delete = Callback::new(move |(id, name): (String, String)| {
        let Some(delete) = def.with_value(|d| d.delete) else {
            return;
        };
        spawn_local(async move {
            match (delete.run)(id.clone()).await {
                Ok(()) => {
                    log::info!("deleted '{}' ({})", name, id);
                    rows.update(|rows| rows.retain(|row| row.id.as_deref() != Some(id.as_str())));
                }
                Err(e) => alert.set(Some(e.to_string())),
            }
        });
    });

    let clear_filters = move |_| {
        inputs.set(FilterInputs::new());
        search.set(String::new());
    };

    let (title, headers, numeric, has_delete, formats, server_params, has_server_excel) =
        def.with_value(|d| {
            let mut numeric = Vec::new();
            if d.spec.serial_label.is_some() {
                numeric.push(true);
            }
            numeric.extend(d.spec.columns.iter().map(|c| c.kind.is_numeric()));
            (
                d.meta.title,
                d.spec.header_labels(),
                numeric,
                d.delete.is_some(),
                d.formats.clone(),
                d.server_params,
                d.server_excel.is_some(),
            )
        });

    let server_inputs = match server_params {
        ServerParams::None => None,
        ServerParams::DateRange => Some(
            view! {
                <div class="page__params">
                    <label class="form__label">"From"</label>
                    <input
                        class="input"
                        type="date"
                        prop:value=move || date_from.get()
                        on:change=move |ev| date_from.set(event_target_value(&ev))
                    />
                    <label class="form__label">"To"</label>
                    <input
                        class="input"
                        type="date"
                        prop:value=move || date_to.get()
                        on:change=move |ev| date_to.set(event_target_value(&ev))
                    />
                </div>
            }
            .into_any(),
        ),
        ServerParams::ExpiryWindow { default_days } => Some(
            view! {
                <div class="page__params">
                    <label class="form__label">"Expiring within (days)"</label>
                    <input
                        class="input input--narrow"
                        type="number"
                        min="1"
                        placeholder=default_days.to_string()
                        prop:value=move || days.get()
                        on:change=move |ev| days.set(event_target_value(&ev))
                    />
                </div>
            }
            .into_any(),
        ),
    };

    let export_buttons = move || {
        let formats = formats.clone();
        view! {
            <Flex gap=FlexGap::Small>
                {formats
                    .into_iter()
                    .map(|format| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=is_busy
                            on_click=move |_| run_export(format)
                        >
                            {icon("download")}
                            {format.label()}
                        </Button>
                    })
                    .collect_view()}
                {has_server_excel.then(|| view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_busy
                        on_click=move |_| download_server_excel()
                    >
                        {icon("download")}
                        "Server Excel"
                    </Button>
                })}
                <Show when=move || is_busy.get()>
                    <Spinner size=SpinnerSize::Small label="Downloading..." />
                </Show>
            </Flex>
        }
    };

    let filter_content = move || {
        view! {
            <div class="filter-panel__fields">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |text: String| search.set(text))
                />
                {def.with_value(|d| {
                    d.filters
                        .iter()
                        .map(|field| view! { <FilterFieldInput field=*field inputs=inputs /> })
                        .collect_view()
                })}
            </div>
        }
    };

    let filter_tags = move || {
        view! {
            <Flex gap=FlexGap::Small>
                {move || {
                    let inputs_now = inputs.get();
                    def.with_value(|d| {
                        d.filters
                            .iter()
                            .filter_map(|field| {
                                let key = field.key();
                                let label = describe(field, inputs_now.get(key)?)?;
                                Some(view! {
                                    <FilterTag
                                        label=label
                                        on_remove=Callback::new(move |_| {
                                            inputs.update(|m| {
                                                m.remove(key);
                                            });
                                        })
                                    />
                                })
                            })
                            .collect_view()
                    })
                }}
                <Show when=move || { active_filters_count.get() > 0 }>
                    <Button appearance=ButtonAppearance::Subtle on_click=clear_filters>
                        "Clear all"
                    </Button>
                </Show>
            </Flex>
        }
    };

    let numeric = StoredValue::new(numeric);
    let headers = StoredValue::new(headers);
    let body_rows = move || {
        let shown = filtered.get();
        def.with_value(|d| {
            shown
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    let cells = d.spec.display_row(index, row);
                    let delete_cell = has_delete.then(|| {
                        let target = row.id.clone().map(|id| (id, row_name(d, row)));
                        view! {
                            <TableCell>
                                {target.map(|target| view! {
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| pending_delete.set(Some(target.clone()))
                                    >
                                        {icon("trash")}
                                    </Button>
                                })}
                            </TableCell>
                        }
                    });
                    view! {
                        <TableRow>
                            {cells
                                .into_iter()
                                .zip(numeric.get_value())
                                .map(|(text, is_numeric)| {
                                    let class = if is_numeric {
                                        "table__cell--right"
                                    } else {
                                        "table__cell--multiline"
                                    };
                                    view! { <TableCell class=class>{text}</TableCell> }
                                })
                                .collect_view()}
                            {delete_cell}
                        </TableRow>
                    }
                })
                .collect_view()
        })
    };

    let has_totals = def.with_value(|d| !d.spec.total_keys.is_empty());
    let totals_spec = StoredValue::new(def.with_value(|d| d.spec.clone()));

    view! {
        <PageFrame page_id=page_id category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title}</h1>
                    <Badge>{move || filtered.with(|f| f.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    {server_inputs}
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || is_loading.get())
                        on_click=move |_| load(query.get_untracked())
                    >
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=active_filters_count
                    actions=export_buttons
                    filter_content=filter_content
                    filter_tags=filter_tags
                />

                {move || error.get().map(|e| view! {
                    <div class="alert alert--error">
                        {icon("alert-triangle")}
                        <span>{e}</span>
                    </div>
                })}

                <Show
                    when=move || !is_loading.get()
                    fallback=|| view! { <Spinner label="Loading..." /> }
                >
                    <Show
                        when=move || !filtered.with(|f| f.is_empty())
                        fallback=move || view! {
                            <div class="table__empty">
                                {move || if rows.with(|r| r.is_empty()) {
                                    "No records"
                                } else {
                                    "No records match the filters"
                                }}
                            </div>
                        }
                    >
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    {headers
                                        .get_value()
                                        .into_iter()
                                        .map(|h| view! { <TableHeaderCell>{h.clone()}</TableHeaderCell> })
                                        .collect_view()}
                                    {has_delete.then(|| view! { <TableHeaderCell>""</TableHeaderCell> })}
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {body_rows}
                                {has_totals.then(|| view! {
                                    <TableTotalsRow
                                        spec=totals_spec.get_value()
                                        totals=totals
                                        trailing=usize::from(has_delete)
                                    />
                                })}
                            </TableBody>
                        </Table>
                    </Show>
                </Show>
            </div>

            <AlertModal title="Something went wrong" message=alert />
            <ConfirmModal
                title="Delete record"
                pending=pending_delete
                describe=|(_, name): &(String, String)| format!("Delete {}? This cannot be undone.", name)
                on_confirm=confirm_delete
            />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_load_is_current() {
        let mut seq = LoadSequence::default();
        let first = seq.start();
        let second = seq.start();
        assert!(seq.is_current(second));
        // the earlier query answering late must not replace newer rows
        assert!(!seq.is_current(first));
    }

    #[test]
    fn test_document_meta_embeds_a_rupee_font() {
        let meta = document_meta(BusinessInfo::default());
        assert!(meta.font.is_some());
    }
}
