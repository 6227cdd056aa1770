//! Short user-facing messages
//!
//! Failures that never propagate still tell the user something. Front ends
//! decide how to show these; the core only picks which one applies.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AccountSaved,
    ProfileSaved,
    SaveFailed,
    GeolocationUnsupported,
    DetectingLocation,
    LocationUnavailable,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AccountSaved => "Account saved",
            Self::ProfileSaved => "Profile saved",
            Self::SaveFailed => "Save failed",
            Self::GeolocationUnsupported => "Geolocation not supported",
            Self::DetectingLocation => "Detecting nearby cities — please allow location access",
            Self::LocationUnavailable => "Location blocked or unavailable",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_notices_name_the_record() {
        assert_eq!(Notice::ProfileSaved.to_string(), "Profile saved");
        assert_eq!(Notice::AccountSaved.to_string(), "Account saved");
        assert_eq!(Notice::SaveFailed.to_string(), "Save failed");
    }
}
