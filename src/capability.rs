//! ALFA Media Gate - Capabilities
//!
//! Runtime permissions guarding the camera and the gallery.

use std::fmt;

/// Request code shared by the camera permission and the capture activity
pub const REQUEST_CAMERA: i32 = 1;

/// Request code shared by the storage permission and the picker activity
pub const REQUEST_GALLERY: i32 = 2;

/// Gated device capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Camera access
    Camera,
    /// Read access to shared storage (gallery)
    ReadStorage,
}

impl Capability {
    /// All capabilities, in request-code order
    pub const ALL: [Capability; 2] = [Capability::Camera, Capability::ReadStorage];

    /// Android manifest permission name
    pub fn permission(&self) -> &'static str {
        match self {
            Capability::Camera => "android.permission.CAMERA",
            Capability::ReadStorage => "android.permission.READ_EXTERNAL_STORAGE",
        }
    }

    /// Request code used when asking for this permission
    pub fn request_code(&self) -> i32 {
        match self {
            Capability::Camera => REQUEST_CAMERA,
            Capability::ReadStorage => REQUEST_GALLERY,
        }
    }

    /// Reverse lookup by request code
    pub fn from_request_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.request_code() == code)
    }

    /// Downstream operation unlocked by this capability
    pub fn media_kind(&self) -> MediaKind {
        match self {
            Capability::Camera => MediaKind::Camera,
            Capability::ReadStorage => MediaKind::Gallery,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.permission())
    }
}

/// Permission state as last reported by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// Never queried
    #[default]
    Unknown,
    /// Granted
    Granted,
    /// Denied, but the OS still lets us ask again
    DeniedSoft,
    /// Denied for good, only the settings page can fix it
    DeniedHard,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        *self == PermissionState::Granted
    }
}

/// Single entry of a permission-result callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantResult {
    Granted,
    Denied,
}

/// External media operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Capture a photo with the device camera
    Camera,
    /// Pick an existing image from the gallery
    Gallery,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Camera, MediaKind::Gallery];

    /// Capability that gates this operation
    pub fn capability(&self) -> Capability {
        match self {
            MediaKind::Camera => Capability::Camera,
            MediaKind::Gallery => Capability::ReadStorage,
        }
    }

    /// Fixed request code routing the activity result
    pub fn request_code(&self) -> i32 {
        self.capability().request_code()
    }

    pub fn from_request_code(code: i32) -> Option<Self> {
        Capability::from_request_code(code).map(|c| c.media_kind())
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Camera => f.write_str("camera"),
            MediaKind::Gallery => f.write_str("gallery"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_code_lookup() {
        for cap in Capability::ALL {
            assert_eq!(Capability::from_request_code(cap.request_code()), Some(cap));
            assert_eq!(cap.media_kind().capability(), cap);
        }
        assert_eq!(Capability::from_request_code(42), None);
        assert_eq!(MediaKind::from_request_code(REQUEST_GALLERY), Some(MediaKind::Gallery));
    }
}
