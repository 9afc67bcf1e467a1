use super::*;

use pipeforge_client_core::notice::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME};
use web_sys::HtmlAnchorElement;

/// The six collaborator elements the controller is constructed over. All must
/// exist at bind time; a missing one fails the boot instead of leaving a
/// partially wired page.
pub(super) struct PageElements {
    pub(super) generate_btn: HtmlElement,
    pub(super) code_output: HtmlTextAreaElement,
    pub(super) copy_btn: HtmlElement,
    pub(super) download_btn: HtmlElement,
    pub(super) task_description: HtmlTextAreaElement,
    pub(super) tool_guide: HtmlElement,
}

pub(super) fn bind_page_elements() -> Result<(Document, PageElements), String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;

    let elements = PageElements {
        generate_btn: require_html_element(&document, GENERATE_BUTTON_ID)?,
        code_output: require_text_area(&document, CODE_OUTPUT_ID)?,
        copy_btn: require_html_element(&document, COPY_BUTTON_ID)?,
        download_btn: require_html_element(&document, DOWNLOAD_BUTTON_ID)?,
        task_description: require_text_area(&document, TASK_DESCRIPTION_ID)?,
        tool_guide: require_html_element(&document, TOOL_GUIDE_ID)?,
    };
    Ok((document, elements))
}

fn require_html_element(document: &Document, id: &str) -> Result<HtmlElement, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing page element #{id}"))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| format!("page element #{id} is not HtmlElement"))
}

fn require_text_area(document: &Document, id: &str) -> Result<HtmlTextAreaElement, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing page element #{id}"))?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| format!("page element #{id} is not HtmlTextAreaElement"))
}

/// Packages the current output text as a plain-text blob and triggers the
/// browser save prompt through a synthetic anchor click.
pub(super) fn offer_download(document: &Document, text: &str) -> Result<(), String> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(DOWNLOAD_MIME);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "failed to build download blob".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "failed to create download url".to_string())?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "failed to create download anchor".to_string())?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "download anchor is not HtmlAnchorElement".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(DOWNLOAD_FILE_NAME);

    let body = document
        .body()
        .ok_or_else(|| "document body is unavailable".to_string())?;
    let _ = body.append_child(&anchor);
    anchor.click();
    let _ = body.remove_child(&anchor);
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
