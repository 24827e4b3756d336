use crate::models::ReportDraft;
use crate::models::{PollutionType, Severity};
use crate::platform::{DioxusUi, WebApp};
use crate::services::{ImageSelection, SubmitOutcome};
use crate::ui::Ui;
use dioxus::prelude::*;
use dioxus_i18n::t;
use image_staging::{resolve_mime, PreviewGrid, SelectedFile};
use std::rc::Rc;

/// New-report form; the location comes from the map
#[component]
pub fn ReportForm() -> Element {
    let app = use_context::<Rc<WebApp>>();
    let ui = use_context::<DioxusUi>();

    let mut description = use_signal(String::new);
    let mut pollution_type = use_signal(String::new);
    let mut severity = use_signal(String::new);
    let mut selection = use_signal(ImageSelection::default);
    let mut submitting = use_signal(|| false);

    // Managers may clear staged files (reset, reload) and the label follows the language
    {
        let app = app.clone();
        let mut labelled_in = use_signal(|| ui.language());
        use_effect(move || {
            ui.revision();
            let language = ui.language();
            let staged = app.state.borrow().selected_files().len();
            if staged != selection.peek().previews.len()
                || selection.peek().label.is_empty()
                || *labelled_in.peek() != language
            {
                selection.set(app.images.update_preview());
                labelled_in.set(language);
            }
        });
    }

    ui.revision();
    let location = app.state.borrow().selected_location();
    let location_label = match location {
        Some(c) => {
            let (lat, lng) = c.to_fixed();
            format!("{}, {}", lat, lng)
        }
        None => t!("location-none"),
    };

    let on_files = {
        let app = app.clone();
        move |evt: FormEvent| {
            let app = app.clone();
            async move {
                let mut files = Vec::new();
                for file in evt.files() {
                    let mime_type = resolve_mime(&file.name(), file.content_type());
                    if !app.images.accepts(&file.name(), &mime_type, file.size()) {
                        continue;
                    }
                    match file.read_bytes().await {
                        Ok(bytes) => files.push(SelectedFile::new(
                            file.name(),
                            Some(mime_type),
                            bytes.to_vec(),
                        )),
                        Err(e) => log::warn!("Could not read {}: {:?}", file.name(), e),
                    }
                }
                selection.set(app.select_images(files));
            }
        }
    };

    let on_submit = {
        let app = app.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let app = app.clone();
            async move {
                if submitting() {
                    return;
                }
                submitting.set(true);
                let draft = ReportDraft::from_form(&description(), &pollution_type(), &severity());
                if app.submit(&draft).await == SubmitOutcome::Submitted {
                    description.set(String::new());
                    pollution_type.set(String::new());
                    severity.set(String::new());
                    selection.set(app.images.update_preview());
                }
                submitting.set(false);
            }
        }
    };

    let on_open = {
        let app = app.clone();
        move |src: String| app.images.open_popup(src)
    };

    let on_remove = {
        let app = app.clone();
        move |index: usize| selection.set(app.images.remove_image(index))
    };

    rsx! {
        form {
            id: "report-form",
            class: "panel",
            onsubmit: on_submit,
            h2 { style: "margin-top: 0; color: #0066cc;", {t!("form-title")} }

            label { r#for: "description", {t!("description-label")} }
            textarea {
                id: "description",
                rows: "3",
                placeholder: t!("description-placeholder"),
                value: "{description}",
                oninput: move |e| description.set(e.value()),
            }

            label { r#for: "pollution_type", {t!("pollution-type-label")} }
            select {
                id: "pollution_type",
                value: "{pollution_type}",
                onchange: move |e| pollution_type.set(e.value()),
                option { value: "", {t!("not-specified")} }
                for kind in PollutionType::all() {
                    option { key: "{kind.as_str()}", value: kind.as_str(), {ui.translate(kind.as_str())} }
                }
            }

            label { r#for: "severity", {t!("severity-label")} }
            select {
                id: "severity",
                value: "{severity}",
                onchange: move |e| severity.set(e.value()),
                option { value: "", {t!("not-specified")} }
                for level in Severity::all() {
                    option { key: "{level.as_str()}", value: level.as_str(), {ui.translate(level.as_str())} }
                }
            }

            label { {t!("location-label")} }
            div {
                class: if location.is_some() { "location-box selected" } else { "location-box" },
                "{location_label}"
            }

            label { r#for: "images", {t!("images-label")} }
            input {
                id: "images",
                r#type: "file",
                accept: "image/jpeg,image/png,image/gif",
                multiple: true,
                onchange: on_files,
            }
            div { id: "file-status", class: "file-status", "{selection().label}" }
            PreviewGrid {
                items: selection().previews,
                on_open,
                on_remove,
                remove_label: ui.translate("remove-image"),
            }

            button {
                class: "btn btn-submit",
                r#type: "submit",
                disabled: submitting(),
                {t!("submit-btn")}
            }
        }
    }
}
