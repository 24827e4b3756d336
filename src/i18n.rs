use dioxus_i18n::prelude::*;
use serde::{Deserialize, Serialize};
use unic_langid::{langid, LanguageIdentifier};

/// UI languages shipped with the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Unknown tags fall back to Arabic, like a page without `lang`
    pub fn from_tag(tag: &str) -> Self {
        match tag.split(['-', '_']).next().map(str::to_lowercase).as_deref() {
            Some("en") => Language::English,
            _ => Language::Arabic,
        }
    }

    pub fn id(&self) -> LanguageIdentifier {
        match self {
            Language::Arabic => langid!("ar"),
            Language::English => langid!("en-US"),
        }
    }

    pub fn dir(&self) -> &'static str {
        match self {
            Language::Arabic => "rtl",
            Language::English => "ltr",
        }
    }
}

/// Initialize i18n configuration with both locales, starting in `language`
pub fn init_i18n(language: Language) -> I18nConfig {
    I18nConfig::new(language.id())
        .with_locale(Locale::new_static(
            langid!("ar"),
            include_str!("../locales/ar.ftl"),
        ))
        .with_locale(Locale::new_static(
            langid!("en-US"),
            include_str!("../locales/en-US.ftl"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_tag() {
        assert_eq!(Language::from_tag("en-GB"), Language::English);
        assert_eq!(Language::from_tag("EN"), Language::English);
        assert_eq!(Language::from_tag("ar_DZ"), Language::Arabic);
        assert_eq!(Language::from_tag(""), Language::Arabic);
        assert_eq!(Language::from_tag("fr"), Language::Arabic);
    }

    #[test]
    fn test_locales_define_same_keys() {
        fn keys(ftl: &str) -> Vec<&str> {
            let mut keys: Vec<&str> = ftl
                .lines()
                .filter(|l| !l.starts_with('#') && !l.starts_with(' '))
                .filter_map(|l| l.split_once(" = ").map(|(k, _)| k.trim()))
                .collect();
            keys.sort_unstable();
            keys
        }
        assert_eq!(
            keys(include_str!("../locales/ar.ftl")),
            keys(include_str!("../locales/en-US.ftl"))
        );
    }
}
