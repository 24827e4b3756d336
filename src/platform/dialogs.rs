use crate::i18n::Language;
use crate::ui::{Alert, Ui};
use dioxus::prelude::*;
use dioxus_i18n::prelude::I18n;
use report_api::Statistics;
use std::collections::VecDeque;
use tokio::sync::oneshot;

/// A dialog waiting to be shown or answered
pub struct PendingDialog {
    pub alert: Alert,
    reply: Option<oneshot::Sender<bool>>,
}

/// [`Ui`] backed by signals the components render from
#[derive(Clone, Copy)]
pub struct DioxusUi {
    loading: Signal<bool>,
    dialogs: Signal<VecDeque<PendingDialog>>,
    statistics: Signal<Option<Statistics>>,
    image: Signal<Option<String>>,
    revision: Signal<u64>,
    language: Signal<Language>,
    i18n: I18n,
}

impl DioxusUi {
    /// Must run inside a component scope (the signals belong to it)
    pub fn new(i18n: I18n, language: Language) -> Self {
        Self {
            loading: Signal::new(false),
            dialogs: Signal::new(VecDeque::new()),
            statistics: Signal::new(None),
            image: Signal::new(None),
            revision: Signal::new(0),
            language: Signal::new(language),
            i18n,
        }
    }

    pub fn loading(&self) -> bool {
        (self.loading)()
    }

    /// The dialog currently on screen
    pub fn current_dialog(&self) -> Option<Alert> {
        self.dialogs.read().front().map(|d| d.alert.clone())
    }

    /// Closes the front dialog, answering it if someone waits
    pub fn close_dialog(&self, confirmed: bool) {
        let mut dialogs = self.dialogs;
        let closed = dialogs.write().pop_front();
        if let Some(reply) = closed.and_then(|d| d.reply) {
            let _ = reply.send(confirmed);
        }
    }

    pub fn statistics(&self) -> Option<Statistics> {
        (self.statistics)()
    }

    pub fn close_statistics(&self) {
        let mut statistics = self.statistics;
        statistics.set(None);
    }

    pub fn image(&self) -> Option<String> {
        (self.image)()
    }

    /// Bumped whenever managers touch form state; read it to re-render
    pub fn revision(&self) -> u64 {
        (self.revision)()
    }

    pub fn language(&self) -> Language {
        (self.language)()
    }

    pub fn set_language(&self, language: Language) {
        let mut i18n = self.i18n;
        i18n.set_language(language.id());
        let mut current = self.language;
        current.set(language);
        log::info!("UI language set to {:?}", language);
    }

    fn push(&self, alert: Alert, reply: Option<oneshot::Sender<bool>>) {
        let mut dialogs = self.dialogs;
        dialogs.write().push_back(PendingDialog { alert, reply });
    }
}

impl Ui for DioxusUi {
    fn translate(&self, key: &str) -> String {
        match self.i18n.try_translate(key) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Missing translation for {}: {:?}", key, e);
                key.to_string()
            }
        }
    }

    fn set_loading_visible(&self, visible: bool) {
        let mut loading = self.loading;
        loading.set(visible);
    }

    fn show_alert(&self, alert: Alert) {
        self.push(alert, None);
    }

    async fn ask(&self, alert: Alert) -> bool {
        let (tx, rx) = oneshot::channel();
        self.push(alert, Some(tx));
        rx.await.unwrap_or(false)
    }

    fn show_statistics(&self, statistics: Statistics) {
        let mut slot = self.statistics;
        slot.set(Some(statistics));
    }

    fn show_image(&self, src: Option<String>) {
        let mut slot = self.image;
        slot.set(src);
    }

    fn state_changed(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }
}
