use crate::application::ports::Translator;
use std::collections::HashMap;

const ENGLISH: &[(&str, &str)] = &[
    (
        "core.errorsyncblocked",
        "This {{$a}} cannot be synchronised right now because of an ongoing process. Please try again later. If the problem persists, try restarting the app.",
    ),
    (
        "core.networkerrormsg",
        "There was a problem connecting to the site. Please check your connection and try again.",
    ),
    (
        "core.warningofflinedatadeleted",
        "Offline data from {{component}} '{{name}}' has been deleted. {{error}}",
    ),
    ("addon.mod_assign.modulename", "Assignment"),
    (
        "addon.mod_assign.warningsubmissionmodified",
        "The user submission was modified on the site.",
    ),
    (
        "addon.mod_assign.warningsubmissiongrademodified",
        "The user submission grade was modified on the site.",
    ),
];

/// Translation table with `{{param}}` placeholders.
///
/// Unknown keys translate to themselves so a missing string stays visible.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    strings: HashMap<String, String>,
}

impl StaticCatalog {
    pub fn english() -> Self {
        Self::from_pairs(ENGLISH.iter().copied())
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let strings = pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { strings }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Translator for StaticCatalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.strings.get(key) else {
            return key.to_string();
        };

        params
            .iter()
            .fold(template.clone(), |text, (name, value)| {
                text.replace(&format!("{{{{{name}}}}}"), value)
            })
    }
}
