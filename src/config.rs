//! Config mapping – the placeholder values for one run.
//!
//! Values come from the process environment (after an optional `.env` file
//! has been loaded). The set of names is fixed; anything outside it is not a
//! variable as far as the template engine is concerned.

use std::collections::BTreeMap;
use std::env;

use chrono::Local;
use log::debug;

/// Every environment-backed placeholder name, in display order.
pub const ENV_VARIABLES: [&str; 20] = [
    "NAME",
    "LOCATION",
    "EMAIL",
    "PHONE",
    "LINKEDIN",
    "GITHUB",
    "PORTFOLIO",
    "HIRING_MANAGER_NAME",
    "JOB_TITLE",
    "APPLYING_COMPANY",
    "FIELD_OF_EXPERTISE",
    "GENERAL_PROJECT_TYPE",
    "COMPANY_GOAL_OR_MISSION",
    "SHORT_PROJECT_OR_IMPACT",
    "TECH_STACK",
    "WHAT_ATTRACTS_YOU",
    "POSITIVE_NOTE_ABOUT_COMPANY",
    "KEY_PROJECT",
    "CONTRIBUTION_SUMMARY",
    "CURRENT_COMPANY",
];

/// Generated placeholder holding today's date.
pub const CURRENT_DATE: &str = "current_date";

/// Format used for [`CURRENT_DATE`], e.g. `October 19, 2026`.
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// Flat mapping from placeholder name to optional value.
///
/// Built once at start-up and passed by reference to each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, Option<String>>,
}

impl Variables {
    /// Load a `.env` file from the working directory (if any), then read every
    /// name in [`ENV_VARIABLES`] from the environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => debug!("ignoring .env: {e}"),
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the mapping from an arbitrary lookup, stamping today's date.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let today = Local::now().format(DATE_FORMAT).to_string();
        let mut values: BTreeMap<String, Option<String>> = ENV_VARIABLES
            .iter()
            .map(|name| (name.to_string(), lookup(name)))
            .collect();
        values.insert(CURRENT_DATE.to_string(), Some(today));
        Self { values }
    }

    /// A mapping where every known name is present but unset.
    pub fn empty() -> Self {
        let values = ENV_VARIABLES
            .iter()
            .chain(std::iter::once(&CURRENT_DATE))
            .map(|name| (name.to_string(), None))
            .collect();
        Self { values }
    }

    /// Set (or add) a value.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), Some(value.into()));
        self
    }

    /// Mark a name as known but unset.
    pub fn without(mut self, name: &str) -> Self {
        self.values.insert(name.to_string(), None);
        self
    }

    /// Whether `name` is one of the configured placeholder names.
    pub fn is_known(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The value of `name`, treating the empty string as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Whether `name` has a non-empty value.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Known names without a usable value.
    pub fn unset_names(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, v)| v.as_deref().map_or(true, str::is_empty))
            .map(|(k, _)| k.as_str())
    }
}
