//! ALFA Media Gate - Platform Interfaces
//!
//! Everything the core needs from the OS. The Android shell implements these
//! on top of ActivityCompat / startActivityForResult; tests use fakes.

use std::sync::Arc;

use crate::capability::Capability;
use crate::error::MediaResult;
use crate::gate::RationalePrompt;
use crate::payload::{CorrelationToken, DisplayImage};

/// Runtime permission subsystem
pub trait PermissionHost {
    /// Is the permission granted right now
    fn check_permission(&self, capability: Capability) -> bool;

    /// Should an explanation be shown before asking again
    fn should_show_rationale(&self, capability: Capability) -> bool;

    /// Start an asynchronous permission request. The answer arrives through
    /// `MediaController::on_request_permissions_result` with the same code.
    fn request_permission(&self, capability: Capability, request_code: i32);

    /// Present the two-button rationale dialog
    fn show_rationale(&self, prompt: &RationalePrompt);

    /// Open the settings page of this application
    fn open_app_settings(&self) -> MediaResult<()>;
}

/// External activity launcher
pub trait ActivityHost {
    /// Start the image capture activity
    fn launch_capture(&self, token: CorrelationToken) -> MediaResult<()>;

    /// Start the content picker restricted to `mime_filter`
    fn launch_picker(&self, mime_filter: &str, token: CorrelationToken) -> MediaResult<()>;
}

/// Surface showing the current image
pub trait DisplaySink {
    fn show(&self, image: &DisplayImage);
}

/// Transient user notices (toasts)
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// Bundle of platform collaborators handed to the controller
#[derive(Clone)]
pub struct Shell {
    pub permissions: Arc<dyn PermissionHost>,
    pub activities: Arc<dyn ActivityHost>,
    pub display: Arc<dyn DisplaySink>,
    pub notifier: Arc<dyn Notifier>,
}
