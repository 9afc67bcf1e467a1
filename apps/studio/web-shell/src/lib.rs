//! Browser entry point for the Pipeforge studio page.
//!
//! The shell binds the six server-rendered page elements, wires the four
//! event sources (page-ready, generate, copy, download) to the client-core
//! controller logic, and performs the two fetches through gloo-net. All
//! handlers run on the UI event loop; in-flight requests are never cancelled,
//! and stale generation responses are discarded by ticket.

#[cfg(target_arch = "wasm32")]
mod shell_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    mod dom;
    mod network;

    use std::cell::RefCell;

    use pipeforge_client_core::controller::{
        GenerateOutcome, GuideOutcome, RequestSequencer, render_generate_outcome,
        render_guide_outcome, validate_task_description,
    };
    use pipeforge_client_core::notice::Notice;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::wasm_bindgen;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, HtmlElement, HtmlTextAreaElement};

    use self::dom::{PageElements, bind_page_elements, offer_download};
    use self::network::{fetch_tool_guide, post_generate_code};
    use crate::shell_constants::*;

    thread_local! {
        static GENERATE_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> =
            RefCell::new(None);
        static COPY_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> =
            RefCell::new(None);
        static DOWNLOAD_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> =
            RefCell::new(None);
        static GENERATE_SEQUENCER: RefCell<RequestSequencer> =
            RefCell::new(RequestSequencer::default());
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(error) = boot() {
            log_diagnostic(&format!("studio shell failed to start: {error}"));
        }
    }

    fn boot() -> Result<(), String> {
        let (document, elements) = bind_page_elements()?;
        attach_handlers(&document, &elements);

        let tool_guide = elements.tool_guide.clone();
        spawn_local(async move {
            load_guide(&tool_guide).await;
        });
        Ok(())
    }

    fn attach_handlers(document: &Document, elements: &PageElements) {
        GENERATE_CLICK_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let task_description = elements.task_description.clone();
            let code_output = elements.code_output.clone();
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                submit_generate_from_input(&task_description, &code_output);
            }));
            let _ = elements
                .generate_btn
                .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            *slot.borrow_mut() = Some(callback);
        });

        COPY_CLICK_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let document = document.clone();
            let code_output = elements.code_output.clone();
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                copy_output_to_clipboard(&document, &code_output);
            }));
            let _ = elements
                .copy_btn
                .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            *slot.borrow_mut() = Some(callback);
        });

        DOWNLOAD_CLICK_HANDLER.with(|slot| {
            if slot.borrow().is_some() {
                return;
            }
            let document = document.clone();
            let code_output = elements.code_output.clone();
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                if let Err(error) = offer_download(&document, &code_output.value()) {
                    log_diagnostic(&format!("download failed: {error}"));
                }
            }));
            let _ = elements
                .download_btn
                .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            *slot.borrow_mut() = Some(callback);
        });
    }

    /// Page-ready guide fetch: one request, no retry.
    async fn load_guide(tool_guide: &HtmlElement) {
        let outcome = fetch_tool_guide().await;
        if let GuideOutcome::Unavailable { detail } = &outcome {
            log_diagnostic(&format!("tool guide load failed: {detail}"));
        }
        tool_guide.set_text_content(Some(&render_guide_outcome(&outcome)));
    }

    fn submit_generate_from_input(
        task_description: &HtmlTextAreaElement,
        code_output: &HtmlTextAreaElement,
    ) {
        let raw = task_description.value();
        let task = match validate_task_description(&raw) {
            Ok(task) => task.to_string(),
            Err(_) => {
                alert(Notice::EmptyTaskDescription.text());
                return;
            }
        };

        code_output.set_value(Notice::GenerateWorking.text());
        let ticket = GENERATE_SEQUENCER.with(|sequencer| sequencer.borrow_mut().begin());

        let code_output = code_output.clone();
        spawn_local(async move {
            let outcome = post_generate_code(&task).await;
            let still_current =
                GENERATE_SEQUENCER.with(|sequencer| sequencer.borrow().is_current(ticket));
            if !still_current {
                return;
            }
            if let GenerateOutcome::TransportFailed { detail } = &outcome {
                log_diagnostic(&format!("generate request failed: {detail}"));
            }
            code_output.set_value(&render_generate_outcome(&outcome));
        });
    }

    /// Copies the full output text via the host clipboard primitive. A copy
    /// failure is not detected; the confirmation always follows.
    fn copy_output_to_clipboard(document: &Document, code_output: &HtmlTextAreaElement) {
        code_output.select();
        let _ = document.exec_command("copy");
        alert(Notice::CopySucceeded.text());
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn log_diagnostic(message: &str) {
        web_sys::console::error_1(&JsValue::from_str(message));
    }
}
