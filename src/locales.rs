//! User-facing strings in English and Russian

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub fn short_code(self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Russian => "RU",
        }
    }
}

/// One message in every supported language
pub struct LocalesMap {
    pub en: &'static str,
    pub ru: &'static str,
}

impl LocalesMap {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.en,
            Language::Russian => self.ru,
        }
    }
}

pub const MODAL_TITLE: LocalesMap = LocalesMap {
    en: "Editor builds",
    ru: "Сборки редактора",
};

pub const MODAL_SUBTITLE: LocalesMap = LocalesMap {
    en: "Download the editor build that matches your game version.",
    ru: "Скачайте сборку редактора, подходящую вашей версии игры.",
};

pub const DOWNLOAD_EDITOR: LocalesMap = LocalesMap {
    en: "Download the editor",
    ru: "Скачать редактор",
};

pub const PAGE_BLURB: LocalesMap = LocalesMap {
    en: "Tools and editor builds for the Unreal Engine port of S.T.A.L.K.E.R.",
    ru: "Инструменты и сборки редактора для порта S.T.A.L.K.E.R. на Unreal Engine",
};

pub const ERROR_PREFIX: LocalesMap = LocalesMap {
    en: "Error",
    ru: "Ошибка",
};

pub const NO_BUILDS: LocalesMap = LocalesMap {
    en: "No builds published yet",
    ru: "Сборки пока не опубликованы",
};

pub const CLOSE: LocalesMap = LocalesMap {
    en: "Close",
    ru: "Закрыть",
};

const LOCALE_LANGUAGE_CODES: [(&[&str], Language); 2] = [
    (&["ru", "rus"], Language::Russian),
    (&["en", "eng"], Language::English),
];

fn parse_locale_token(token: &str) -> Option<Language> {
    let normalized = token
        .split(|c| matches!(c, '.' | '@'))
        .next()
        .unwrap_or(token)
        .replace('-', "_")
        .to_ascii_lowercase();
    let language_code = normalized.split('_').next().unwrap_or(&normalized);

    LOCALE_LANGUAGE_CODES.iter().find_map(|(codes, language)| {
        codes
            .iter()
            .any(|code| *code == language_code)
            .then_some(*language)
    })
}

/// Picks the startup language from the usual locale env vars, English otherwise
pub fn detect_system_language() -> Language {
    for var in ["LC_ALL", "LANGUAGE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            for token in value.split(':') {
                if let Some(language) = parse_locale_token(token) {
                    return language;
                }
            }
        }
    }

    Language::English
}

#[cfg(test)]
mod tests {
    use super::{parse_locale_token, Language, MODAL_TITLE};

    #[test]
    fn parses_supported_languages_from_locale_tokens() {
        let samples = [
            ("en_US.UTF-8", Language::English),
            ("ru_RU.UTF-8", Language::Russian),
            ("ru-RU", Language::Russian),
            ("rus_RU", Language::Russian),
            ("eng_US", Language::English),
        ];

        for (token, expected) in samples {
            assert_eq!(parse_locale_token(token), Some(expected));
        }
    }

    #[test]
    fn ignores_unknown_language_tokens() {
        assert_eq!(parse_locale_token("de_DE"), None);
        assert_eq!(parse_locale_token(""), None);
    }

    #[test]
    fn lookup_resolves_per_language() {
        assert_eq!(MODAL_TITLE.get(Language::English), "Editor builds");
        assert_eq!(MODAL_TITLE.get(Language::Russian), "Сборки редактора");
    }
}
