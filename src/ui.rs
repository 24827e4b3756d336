use report_api::Statistics;

/// A user-facing string, resolved through the active locale at display time
#[derive(Debug, Clone, PartialEq)]
pub enum Text {
    Key(&'static str),
    Raw(String),
    /// Translated key followed by untranslated detail, e.g. a browser error
    KeyDetail(&'static str, String),
}

impl Text {
    pub fn resolve(&self, translate: impl Fn(&str) -> String) -> String {
        match self {
            Text::Key(key) => translate(key),
            Text::Raw(s) => s.clone(),
            Text::KeyDetail(key, detail) => format!("{} {}", translate(key), detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertIcon {
    Success,
    Warning,
    Error,
}

impl AlertIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            AlertIcon::Success => "✅",
            AlertIcon::Warning => "⚠️",
            AlertIcon::Error => "❌",
        }
    }
}

/// Content of a modal dialog
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: Text,
    pub text: Text,
    pub icon: AlertIcon,
    /// Outside click and escape do not close the dialog
    pub require_manual: bool,
    /// Shows a cancel button next to OK
    pub cancelable: bool,
}

impl Alert {
    pub fn new(title: Text, text: Text, icon: AlertIcon) -> Self {
        Self {
            title,
            text,
            icon,
            require_manual: false,
            cancelable: false,
        }
    }

    pub fn error(text: Text) -> Self {
        Self::new(Text::Key("error"), text, AlertIcon::Error)
    }

    /// Success dialog the user has to dismiss explicitly
    pub fn success(title: &'static str, text: &'static str) -> Self {
        Self {
            require_manual: true,
            ..Self::new(Text::Key(title), Text::Key(text), AlertIcon::Success)
        }
    }

    pub fn confirm(title: &'static str, text: &'static str) -> Self {
        Self {
            cancelable: true,
            ..Self::new(Text::Key(title), Text::Key(text), AlertIcon::Warning)
        }
    }
}

/// Presentation surface the managers talk to
#[allow(async_fn_in_trait)]
pub trait Ui {
    /// Looks up a localized message; unknown keys come back unchanged
    fn translate(&self, key: &str) -> String;

    fn set_loading_visible(&self, visible: bool);

    /// Shows a dialog without waiting for it
    fn show_alert(&self, alert: Alert);

    /// Shows a dialog and resolves once it is closed; `true` when confirmed
    async fn ask(&self, alert: Alert) -> bool;

    fn show_statistics(&self, statistics: Statistics);

    /// Opens the full-size image overlay, or closes it with `None`
    fn show_image(&self, src: Option<String>);

    /// Form state (location, staged files) changed outside a component
    fn state_changed(&self);
}
