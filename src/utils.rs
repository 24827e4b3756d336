use crate::state::{Shared, StateManager};
use crate::ui::{Alert, Text, Ui};
use image_staging::{ImageError, ImageRules};
use std::rc::Rc;

pub use image_staging::format_file_size;

/// Cross-cutting helpers: loading indicator, dialogs, localization, validation
pub struct Utils<U: Ui> {
    state: Shared<StateManager>,
    ui: Rc<U>,
    rules: Rc<ImageRules>,
}

impl<U: Ui> Clone for Utils<U> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            ui: self.ui.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<U: Ui> Utils<U> {
    pub fn new(state: Shared<StateManager>, ui: Rc<U>, rules: ImageRules) -> Self {
        Self {
            state,
            ui,
            rules: Rc::new(rules),
        }
    }

    pub fn state(&self) -> &Shared<StateManager> {
        &self.state
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn rules(&self) -> &ImageRules {
        &self.rules
    }

    pub fn t(&self, key: &str) -> String {
        self.ui.translate(key)
    }

    pub fn resolve(&self, text: &Text) -> String {
        text.resolve(|k| self.t(k))
    }

    pub fn show_loading(&self) {
        self.state.borrow_mut().set_loading(true);
        self.ui.set_loading_visible(true);
    }

    pub fn hide_loading(&self) {
        if !self.state.borrow().is_loading() {
            return;
        }
        self.state.borrow_mut().set_loading(false);
        self.ui.set_loading_visible(false);
    }

    pub fn show_alert(&self, alert: Alert) {
        self.ui.show_alert(alert);
    }

    pub fn show_error(&self, text: Text) {
        self.ui.show_alert(Alert::error(text));
    }

    pub async fn ask(&self, alert: Alert) -> bool {
        self.ui.ask(alert).await
    }

    pub fn validate_meta(&self, mime_type: &str, size: u64) -> Result<(), ImageError> {
        image_staging::validate_meta(mime_type, size, &self.rules)
    }
}

/// Escapes text for interpolation into HTML markup
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeUi;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="alert('x')"> & co"#),
            "&lt;img src=x onerror=&quot;alert(&#039;x&#039;)&quot;&gt; &amp; co"
        );
        assert_eq!(escape_html("تلوث نفطي"), "تلوث نفطي");
    }

    #[test]
    fn test_loading_toggles_state_and_ui() {
        let ui = Rc::new(FakeUi::default());
        let utils = Utils::new(StateManager::shared(), ui.clone(), ImageRules::default());

        utils.show_loading();
        assert!(utils.state().borrow().is_loading());
        assert_eq!(ui.loading_visible(), Some(true));

        utils.hide_loading();
        assert!(!utils.state().borrow().is_loading());
        assert_eq!(ui.loading_visible(), Some(false));
    }

    #[test]
    fn test_t_falls_back_to_key() {
        let utils = Utils::new(
            StateManager::shared(),
            Rc::new(FakeUi::default()),
            ImageRules::default(),
        );
        assert_eq!(utils.t("no-such-key"), "no-such-key");
        assert_eq!(
            utils.resolve(&Text::KeyDetail("geo-error-prefix", "boom".into())),
            "geo-error-prefix boom"
        );
    }
}
