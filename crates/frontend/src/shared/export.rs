//! Browser side of report downloads: blob, object URL, hidden anchor.

use reports::{DownloadTarget, ExportArtifact, ExportError};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

/// [`DownloadTarget`] over the current document
pub struct BrowserDownload {
    document: Document,
}

impl BrowserDownload {
    pub fn new() -> Result<Self, ExportError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ExportError::Download("No document object".to_string()))?;
        Ok(Self { document })
    }
}

fn js_err(what: &str, e: wasm_bindgen::JsValue) -> ExportError {
    ExportError::Download(format!("{}: {:?}", what, e))
}

impl DownloadTarget for BrowserDownload {
    type Anchor = HtmlAnchorElement;

    fn create_object_url(&mut self, artifact: &ExportArtifact) -> Result<String, ExportError> {
        let data = js_sys::Uint8Array::from(artifact.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&data);

        let properties = BlobPropertyBag::new();
        properties.set_type(artifact.mime);

        let blob = Blob::new_with_buffer_source_sequence_and_options(&parts, &properties)
            .map_err(|e| js_err("Failed to create blob", e))?;
        Url::create_object_url_with_blob(&blob).map_err(|e| js_err("Failed to create object URL", e))
    }

    fn attach_anchor(&mut self, url: &str, filename: &str) -> Result<HtmlAnchorElement, ExportError> {
        let anchor = self
            .document
            .create_element("a")
            .map_err(|e| js_err("Failed to create anchor", e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|e| js_err("Failed to cast to anchor", e.into()))?;

        anchor.set_href(url);
        anchor.set_download(filename);
        anchor
            .style()
            .set_property("display", "none")
            .map_err(|e| js_err("Failed to set style", e))?;

        self.document
            .body()
            .ok_or_else(|| ExportError::Download("No body element".to_string()))?
            .append_child(&anchor)
            .map_err(|e| js_err("Failed to append anchor", e))?;
        Ok(anchor)
    }

    fn click(&mut self, anchor: &HtmlAnchorElement) {
        anchor.click();
    }

    fn detach_anchor(&mut self, anchor: HtmlAnchorElement) -> Result<(), ExportError> {
        anchor.remove();
        Ok(())
    }

    fn revoke_object_url(&mut self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("failed to revoke object URL: {:?}", e);
        }
    }
}
