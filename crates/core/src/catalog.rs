use std::collections::HashSet;

use log::{info, warn};

use crate::api::AutomationApi;
use crate::automation::Automation;
use crate::error::Result;
use crate::view::SelectorOption;

/// Label of the leading "no selection" entry of the selector.
pub const PLACEHOLDER_LABEL: &str = "Select an automation...";

/// The automations offered by the server. Replaced wholesale on every load,
/// never edited in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    automations: Vec<Automation>,
}

impl Catalog {
    #[must_use]
    pub fn new(automations: Vec<Automation>) -> Self {
        warn_on_duplicate_ids(&automations);
        Self { automations }
    }

    /// Fetches a fresh catalog.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the fetch does not succeed; nothing is
    /// partially loaded.
    pub fn load<A: AutomationApi>(api: &A) -> Result<Self> {
        let automations = api.list_automations()?;
        info!("Loaded catalog with {} automations", automations.len());
        Ok(Self::new(automations))
    }

    #[must_use]
    pub fn automations(&self) -> &[Automation] {
        &self.automations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.automations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.automations.is_empty()
    }

    /// First automation with this id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Automation> {
        self.automations.iter().find(|automation| automation.id == id)
    }

    /// The placeholder entry followed by one entry per automation.
    #[must_use]
    pub fn selector_options(&self) -> Vec<SelectorOption> {
        std::iter::once(SelectorOption {
            value: String::new(),
            label: PLACEHOLDER_LABEL.to_string(),
        })
        .chain(self.automations.iter().map(|automation| SelectorOption {
            value: automation.id.clone(),
            label: automation.name.clone(),
        }))
        .collect()
    }
}

fn warn_on_duplicate_ids(automations: &[Automation]) {
    let mut ids = HashSet::new();
    for automation in automations {
        if !ids.insert(automation.id.as_str()) {
            warn!(
                "Found a non-unique automation ID `{}`, only the first is selectable",
                automation.id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn automation(id: &str, name: &str) -> Automation {
        Automation {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            parameters: vec![],
        }
    }

    #[test]
    fn test_selector_options_start_with_placeholder() {
        let catalog = Catalog::new(vec![
            automation("organize", "File Organizer"),
            automation("backup", "Data Backup"),
        ]);

        let options = catalog.selector_options();
        assert_eq!(options.len(), 3);
        assert!(options[0].is_placeholder());
        assert_eq!(options[0].label, PLACEHOLDER_LABEL);
        assert_eq!(options[1].value, "organize");
        assert_eq!(options[1].label, "File Organizer");
        assert_eq!(options[2].value, "backup");
    }

    #[test]
    fn test_empty_catalog_has_only_placeholder() {
        let options = Catalog::default().selector_options();
        assert_eq!(options.len(), 1);
        assert!(options[0].is_placeholder());
    }

    #[test]
    fn test_find_returns_first_match() {
        let catalog = Catalog::new(vec![
            automation("dup", "First"),
            automation("dup", "Second"),
        ]);
        assert_eq!(catalog.find("dup").unwrap().name, "First");
        assert!(catalog.find("missing").is_none());
        assert!(catalog.find("").is_none());
    }
}
