//! Per-account, per-coin restore settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::coin::RestoreSettingType;

/// Setting values keyed by [`RestoreSettingType`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestoreSettings(BTreeMap<RestoreSettingType, String>);

impl RestoreSettings {
    /// Creates empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings holding only a birthday height
    pub fn with_birthday_height(height: impl Into<String>) -> Self {
        let mut settings = Self::new();
        settings.insert(RestoreSettingType::BirthdayHeight, height);
        settings
    }

    /// Returns the value stored for `key`
    pub fn get(&self, key: RestoreSettingType) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// Stores `value` under `key`, replacing any previous value
    pub fn insert(&mut self, key: RestoreSettingType, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    /// Returns true if a value is stored for `key`
    pub fn contains(&self, key: RestoreSettingType) -> bool {
        self.0.contains_key(&key)
    }

    /// Birthday height, if set
    pub fn birthday_height(&self) -> Option<&str> {
        self.get(RestoreSettingType::BirthdayHeight)
    }

    /// Returns true if no setting is stored
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of settings stored
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the stored settings
    pub fn iter(&self) -> impl Iterator<Item = (RestoreSettingType, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Overwrites values with those present in `newer`, keeping the rest
    pub fn merge(&mut self, newer: &RestoreSettings) {
        for (key, value) in newer.iter() {
            self.insert(key, value);
        }
    }
}

impl FromIterator<(RestoreSettingType, String)> for RestoreSettings {
    fn from_iter<I: IntoIterator<Item = (RestoreSettingType, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
