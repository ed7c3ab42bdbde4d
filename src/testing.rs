//! Scriptable platform fake shared by the unit tests.

use std::collections::HashSet;
use std::sync::Arc;
use parking_lot::Mutex;

use crate::capability::Capability;
use crate::error::{MediaError, MediaResult};
use crate::gate::RationalePrompt;
use crate::payload::{CorrelationToken, DisplayImage};
use crate::platform::{ActivityHost, DisplaySink, Notifier, PermissionHost, Shell};

/// Recorded platform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CheckPermission(Capability),
    ShouldShowRationale(Capability),
    RequestPermission(Capability, i32),
    ShowRationale(Capability),
    OpenSettings,
    LaunchCapture(CorrelationToken),
    LaunchPicker(String, CorrelationToken),
}

#[derive(Default)]
pub struct FakeShell {
    granted: Mutex<HashSet<Capability>>,
    rationale: Mutex<HashSet<Capability>>,
    settings_missing: Mutex<bool>,
    launch_broken: Mutex<bool>,
    calls: Mutex<Vec<Call>>,
    shown: Mutex<Vec<DisplayImage>>,
    notices: Mutex<Vec<String>>,
}

impl FakeShell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Shell backed entirely by this fake
    pub fn shell(fake: &Arc<Self>) -> Shell {
        Shell {
            permissions: fake.clone(),
            activities: fake.clone(),
            display: fake.clone(),
            notifier: fake.clone(),
        }
    }

    pub fn grant(&self, capability: Capability) {
        self.granted.lock().insert(capability);
    }

    pub fn revoke(&self, capability: Capability) {
        self.granted.lock().remove(&capability);
    }

    pub fn allow_rationale(&self, capability: Capability) {
        self.rationale.lock().insert(capability);
    }

    pub fn set_settings_available(&self, available: bool) {
        *self.settings_missing.lock() = !available;
    }

    pub fn set_launch_broken(&self, broken: bool) {
        *self.launch_broken.lock() = broken;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Tokens of every capture/picker launch, in order
    pub fn launches(&self) -> Vec<CorrelationToken> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                Call::LaunchCapture(t) | Call::LaunchPicker(_, t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn shown(&self) -> Vec<DisplayImage> {
        self.shown.lock().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn launch_result(&self) -> MediaResult<()> {
        if *self.launch_broken.lock() {
            Err(MediaError::ActivityLaunchFailed("no activity found".into()))
        } else {
            Ok(())
        }
    }
}

impl PermissionHost for FakeShell {
    fn check_permission(&self, capability: Capability) -> bool {
        self.record(Call::CheckPermission(capability));
        self.granted.lock().contains(&capability)
    }

    fn should_show_rationale(&self, capability: Capability) -> bool {
        self.record(Call::ShouldShowRationale(capability));
        self.rationale.lock().contains(&capability)
    }

    fn request_permission(&self, capability: Capability, request_code: i32) {
        self.record(Call::RequestPermission(capability, request_code));
    }

    fn show_rationale(&self, prompt: &RationalePrompt) {
        self.record(Call::ShowRationale(prompt.capability));
    }

    fn open_app_settings(&self) -> MediaResult<()> {
        self.record(Call::OpenSettings);
        if *self.settings_missing.lock() {
            Err(MediaError::ActivityLaunchFailed("settings activity not found".into()))
        } else {
            Ok(())
        }
    }
}

impl ActivityHost for FakeShell {
    fn launch_capture(&self, token: CorrelationToken) -> MediaResult<()> {
        self.launch_result()?;
        self.record(Call::LaunchCapture(token));
        Ok(())
    }

    fn launch_picker(&self, mime_filter: &str, token: CorrelationToken) -> MediaResult<()> {
        self.launch_result()?;
        self.record(Call::LaunchPicker(mime_filter.to_string(), token));
        Ok(())
    }
}

impl DisplaySink for FakeShell {
    fn show(&self, image: &DisplayImage) {
        self.shown.lock().push(image.clone());
    }
}

impl Notifier for FakeShell {
    fn notice(&self, message: &str) {
        self.notices.lock().push(message.to_string());
    }
}
