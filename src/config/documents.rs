use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One configured document reference, as listed in `docs.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Unique identifier across the whole menu.
    pub key: String,
    /// Document path relative to the active language's content path.
    pub file: String,
    /// Key of the parent entry. A key that matches nothing makes this a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Display titles keyed by language code.
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    /// Styled description shown in the detail panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl MenuEntry {
    /// Title for `lang`, falling back to the file name when no title exists.
    pub fn title(&self, lang: &str) -> &str {
        self.titles
            .get(lang)
            .map(String::as_str)
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.file)
    }
}

/// One selectable language, as listed in `languages.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    pub code: String,
    /// Content directory holding this language's documents.
    pub path: String,
    /// Label shown in the language picker.
    pub name: String,
}

/// UI string keys every `ui.yaml` must provide.
pub const REQUIRED_UI_KEYS: [&str; 3] = ["documentation", "home", "examples"];

/// The `ui.yaml` table: element identifier -> language code -> text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiStrings {
    pub ui: BTreeMap<String, BTreeMap<String, String>>,
}

impl UiStrings {
    /// Returns the first required key the table does not define.
    pub fn missing_key(&self) -> Option<&'static str> {
        REQUIRED_UI_KEYS
            .into_iter()
            .find(|key| !self.ui.contains_key(*key))
    }

    /// Looks up the text of `element` in `lang`.
    pub fn get(&self, element: &str, lang: &str) -> Option<&str> {
        self.ui
            .get(element)
            .and_then(|by_lang| by_lang.get(lang))
            .map(String::as_str)
    }

    /// Like [`UiStrings::get`], falling back to the element identifier.
    pub fn text<'a>(&'a self, element: &'a str, lang: &str) -> &'a str {
        self.get(element, lang).unwrap_or(element)
    }
}
