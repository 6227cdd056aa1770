//! Profile look on the account page
//!
//! The account page never writes the profile. It reads the stored record
//! once for the theme colors and the nickname.

use pawprint_core::{Theme, ThemeVars};
use pawprint_store::{KeyValueStore, ProfileRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountTheme {
    pub theme: Theme,
    /// Nickname, or the placeholder when none is set
    pub nick: String,
}

impl AccountTheme {
    /// Read from the stored profile; an absent or broken record gives the
    /// unstyled page and the placeholder nickname
    pub fn load<S: KeyValueStore>(profiles: &ProfileRepository<S>) -> Self {
        let (profile, _) = profiles.load();
        Self {
            theme: profile.theme(),
            nick: profile.display_nick().to_string(),
        }
    }

    /// Style variables to apply, if any color is set
    pub fn vars(&self) -> Option<ThemeVars> {
        self.theme.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawprint_core::Profile;
    use pawprint_store::MemoryStore;

    #[test]
    fn test_no_profile() {
        let theme = AccountTheme::load(&ProfileRepository::new(MemoryStore::new()));
        assert_eq!(theme.nick, "Nickname");
        assert!(theme.vars().is_none());
    }

    #[test]
    fn test_colors_and_nick() {
        let mut repo = ProfileRepository::new(MemoryStore::new());
        let mut profile = Profile::default();
        profile.set_nick("Pixel");
        profile.accent = "#ff0066".to_string();
        profile.bg_color = "#000000".to_string();
        repo.save(&profile).unwrap();

        let theme = AccountTheme::load(&repo);
        assert_eq!(theme.nick, "Pixel");

        let vars = theme.vars().unwrap();
        assert_eq!(vars.accent.as_deref(), Some("#ff0066"));
        assert_eq!(vars.bg_1, "#000000");
        assert_eq!(vars.bg_2, "#1f1f1f");
        assert_eq!(vars.gradient(), "linear-gradient(180deg, #000000, #1f1f1f)");
    }
}
