use contracts::shared::api_error::FetchError;
use contracts::usecases::u501_drug_import::DrugImportResponse;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::shared::api_utils::{api_url, post_form};

/// Upload a catalogue spreadsheet as the multipart field `file`
pub async fn upload_drugs(file: File) -> Result<DrugImportResponse, FetchError> {
    let form = FormData::new().map_err(js_failure)?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(js_failure)?;
    post_form(&api_url("/api/inventory/drugs/import/"), form, None, "Failed to import drugs").await
}

fn js_failure(e: JsValue) -> FetchError {
    FetchError::Network(format!("{:?}", e))
}
