use crate::platform::DioxusUi;
use crate::services::statistics_manager::distribution_rows;
use crate::ui::Ui;
use dioxus::prelude::*;
use dioxus_i18n::t;

#[component]
pub fn StatisticsDialog() -> Element {
    let ui = use_context::<DioxusUi>();
    let Some(stats) = ui.statistics() else {
        return rsx! {};
    };

    let types = distribution_rows(&stats.pollution_types, |k| ui.translate(k));
    let severities = distribution_rows(&stats.severity_distribution, |k| ui.translate(k));

    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| ui.close_statistics(),
            div {
                class: "dialog statistics-content",
                onclick: move |e| e.stop_propagation(),
                h2 { style: "color: #0066cc; margin-top: 0;", {t!("statistics")} }
                h3 { {t!("report-stats")} }
                p {
                    {t!("total-reports")}
                    ": "
                    strong { "{stats.total_reports}" }
                }

                DistributionSection { heading: t!("pollution-type-dist"), rows: types }
                DistributionSection { heading: t!("severity-dist"), rows: severities }

                div {
                    style: "text-align: center; margin-top: 16px;",
                    button { class: "btn", onclick: move |_| ui.close_statistics(), {t!("ok")} }
                }
            }
        }
    }
}

/// Heading and list of one distribution; the heading shows even without rows
#[component]
fn DistributionSection(heading: String, rows: Vec<(String, u64)>) -> Element {
    rsx! {
        h4 { "{heading}" }
        ul {
            for (label, count) in rows {
                li { key: "{label}", "{label}: {count}" }
            }
        }
    }
}
