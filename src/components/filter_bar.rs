use crate::models::{PollutionType, ReportFilter, Severity};
use crate::platform::{DioxusUi, WebApp};
use crate::ui::Ui;
use dioxus::prelude::*;
use dioxus_i18n::t;
use std::rc::Rc;

#[component]
pub fn FilterBar() -> Element {
    let app = use_context::<Rc<WebApp>>();
    let ui = use_context::<DioxusUi>();
    let mut pollution_type = use_signal(String::new);
    let mut severity = use_signal(String::new);
    let mut days = use_signal(String::new);

    let apply = move |_| {
        let app = app.clone();
        let filter = ReportFilter::from_form(&pollution_type(), &severity(), &days());
        spawn(async move { app.filter(&filter).await });
    };

    rsx! {
        div {
            class: "panel filter-bar",
            select {
                value: "{pollution_type}",
                onchange: move |e| pollution_type.set(e.value()),
                option { value: "", {t!("filter-all-types")} }
                for kind in PollutionType::all() {
                    option { key: "{kind.as_str()}", value: kind.as_str(), {ui.translate(kind.as_str())} }
                }
            }
            select {
                value: "{severity}",
                onchange: move |e| severity.set(e.value()),
                option { value: "", {t!("filter-all-severities")} }
                for level in Severity::all() {
                    option { key: "{level.as_str()}", value: level.as_str(), {ui.translate(level.as_str())} }
                }
            }
            select {
                value: "{days}",
                onchange: move |e| days.set(e.value()),
                option { value: "", {t!("filter-any-time")} }
                option { value: "1", {t!("filter-last-day")} }
                option { value: "7", {t!("filter-last-week")} }
                option { value: "30", {t!("filter-last-month")} }
            }
            button { class: "btn", onclick: apply, {t!("apply-filters")} }
        }
    }
}
