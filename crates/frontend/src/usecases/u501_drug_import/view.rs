use contracts::usecases::u501_drug_import::DrugImportResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use super::{api, PAGE_ID};
use crate::layout::global_context::AppGlobalContext;
use crate::projections::p904_drug_catalogue;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_USECASE};

const ACCEPTED: &[&str] = &["xlsx", "xls", "csv"];

/// Rejection message for a file the backend would not parse
fn check_file_name(name: &str) -> Result<(), String> {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if ACCEPTED.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(format!("'{}' is not a spreadsheet (.xlsx, .xls or .csv)", name))
    }
}

#[component]
pub fn DrugImportWidget() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let file = StoredValue::new_local(None::<File>);
    let file_name = RwSignal::new(None::<String>);
    let is_uploading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let result = RwSignal::new(None::<DrugImportResponse>);

    let on_pick = move |ev: leptos::ev::Event| {
        error.set(None);
        result.set(None);
        let picked = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        match picked {
            Some(f) => match check_file_name(&f.name()) {
                Ok(()) => {
                    file_name.set(Some(f.name()));
                    file.set_value(Some(f));
                }
                Err(message) => {
                    file_name.set(None);
                    file.set_value(None);
                    error.set(Some(message));
                }
            },
            None => {
                file_name.set(None);
                file.set_value(None);
            }
        }
    };

    let upload = move || {
        if is_uploading.get_untracked() {
            return;
        }
        let Some(f) = file.get_value() else {
            error.set(Some("Choose a spreadsheet first".to_string()));
            return;
        };
        is_uploading.set(true);
        error.set(None);
        result.set(None);
        spawn_local(async move {
            match api::upload_drugs(f).await {
                Ok(response) => {
                    log::info!("{}: {}", PAGE_ID, response.summary());
                    result.set(Some(response));
                }
                Err(e) => {
                    log::warn!("{}: {}", PAGE_ID, e);
                    error.set(Some(e.to_string()));
                }
            }
            is_uploading.set(false);
        });
    };

    let can_upload = Signal::derive(move || file_name.with(Option::is_some) && !is_uploading.get());

    view! {
        <PageFrame page_id=format!("{}--{}", PAGE_ID, PAGE_CAT_USECASE) category=PAGE_CAT_USECASE>
            <div class="page__header">
                <h1 class="page__title">"Import Drugs"</h1>
            </div>

            <p class="page__hint">
                "Upload the drug catalogue as an Excel or CSV file. Existing drugs are updated, new ones are added."
            </p>

            <div class="import__picker">
                <label class="import__file">
                    {icon("upload")}
                    <input
                        type="file"
                        accept=".xlsx,.xls,.csv"
                        on:change=on_pick
                        disabled=move || is_uploading.get()
                    />
                    <span>{move || file_name.get().unwrap_or_else(|| "Choose file...".to_string())}</span>
                </label>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| upload()
                    disabled=Signal::derive(move || !can_upload.get())
                >
                    {move || if is_uploading.get() { "Uploading..." } else { "Upload" }}
                </Button>
                <Show when=move || is_uploading.get()>
                    <Spinner size=SpinnerSize::Small />
                </Show>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            {move || result.get().map(|r| {
                let problems = (!r.errors.is_empty()).then(|| {
                    let items = r.errors.iter().map(|e| view! { <li>{e.clone()}</li> }).collect_view();
                    view! {
                        <div class="import__problems">
                            <strong>{format!("{} rows need attention", r.errors.len())}</strong>
                            <ul>{items}</ul>
                        </div>
                    }
                });
                view! {
                    <div class="alert alert--success">{r.summary()}</div>
                    {problems}
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| ctx.open_page(p904_drug_catalogue::PAGE_ID)
                    >
                        "View drug catalogue"
                    </Button>
                }
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_file_name() {
        assert!(check_file_name("drugs.xlsx").is_ok());
        assert!(check_file_name("Drugs.XLS").is_ok());
        assert!(check_file_name("stock.2024.csv").is_ok());
        assert!(check_file_name("drugs.pdf").is_err());
        assert!(check_file_name("drugs").is_err());
    }
}
