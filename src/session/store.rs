//! In-memory user profile store

use crate::session::profile::UserProfile;
use std::collections::BTreeMap;

/// Profiles keyed by user identifier, in the form they are persisted
pub type ProfileMap = BTreeMap<String, UserProfile>;

/// Owned mapping from user identifier to profile
///
/// Profiles are created on first lookup with the configured default
/// language and are never removed.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    profiles: ProfileMap,
    default_language: String,
}

impl SessionStore {
    /// Create an empty store
    pub fn new(default_language: impl Into<String>) -> Self {
        Self::from_profiles(ProfileMap::new(), default_language)
    }

    /// Create a store around previously persisted profiles
    pub fn from_profiles(profiles: ProfileMap, default_language: impl Into<String>) -> Self {
        Self {
            profiles,
            default_language: default_language.into(),
        }
    }

    /// Fetch a profile, creating a default one on first access
    ///
    /// # Examples
    ///
    /// ```
    /// use lingobot::session::SessionStore;
    ///
    /// let mut store = SessionStore::new("en");
    /// store.get_or_create("1234").input_counter += 1;
    /// assert_eq!(store.get_or_create("1234").input_counter, 1);
    /// assert_eq!(store.len(), 1);
    /// ```
    pub fn get_or_create(&mut self, user_id: &str) -> &mut UserProfile {
        let default_language = &self.default_language;
        self.profiles
            .entry(user_id.to_string())
            .or_insert_with(|| {
                tracing::debug!("Creating profile for new user {}", user_id);
                UserProfile::new(default_language.clone())
            })
    }

    /// Look up a profile without creating it
    pub fn get(&self, user_id: &str) -> Option<&UserProfile> {
        self.profiles.get(user_id)
    }

    /// Number of known users
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no user has been seen yet
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// All profiles, for persisting
    pub fn profiles(&self) -> &ProfileMap {
        &self.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new("en");
        assert!(store.is_empty());
        assert!(store.get("1234").is_none());
    }

    #[test]
    fn test_get_or_create_uses_default_language() {
        let mut store = SessionStore::new("fr");
        let profile = store.get_or_create("42");
        assert_eq!(profile.lang_selected, "fr");
        assert_eq!(profile.session_counter, 0);
    }

    #[test]
    fn test_get_or_create_returns_existing_profile() {
        let mut store = SessionStore::new("en");
        store.get_or_create("a").msg_output = "hello".to_string();
        assert_eq!(store.get_or_create("a").msg_output, "hello");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_profiles_keeps_existing() {
        let mut profiles = ProfileMap::new();
        let mut profile = UserProfile::new("en");
        profile.total_sessions = 4;
        profiles.insert("u".to_string(), profile);

        let mut store = SessionStore::from_profiles(profiles, "en");
        assert_eq!(store.get_or_create("u").total_sessions, 4);
        store.get_or_create("v");
        assert_eq!(store.profiles().len(), 2);
    }
}
