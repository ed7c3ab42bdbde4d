//! ALFA Media Gate - Permission Gate
//!
//! Decides whether a gated action may run now, needs an explanation first, or
//! has to wait for an asynchronous permission request.

use std::collections::HashMap;
use std::sync::Arc;

use crate::capability::{Capability, GrantResult, PermissionState};
use crate::platform::PermissionHost;

/// Explanation shown when a permission was turned off
pub const RATIONALE_MESSAGE: &str = "It seems like you have turned off permission required for this feature. It can be enable under App settings.";

/// What the caller should do after `ensure`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Permission granted, run the action now
    Proceed,
    /// Explain why the permission is needed
    ShowRationale,
    /// Ask the OS for the permission
    RequestPermission,
}

/// Outcome of a permission-result callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionResolution {
    /// Granted, re-run the gated action for this capability
    Resume(Capability),
    /// Denied (explicitly or by an empty result)
    Denied {
        capability: Capability,
        /// The OS will not ask again, settings page only
        permanent: bool,
    },
    /// Not one of our request codes
    Ignored,
}

/// Two-button rationale dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalePrompt {
    pub capability: Capability,
    pub message: String,
    pub positive: String,
    pub negative: String,
}

impl RationalePrompt {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            message: RATIONALE_MESSAGE.into(),
            positive: "Go to Settings".into(),
            negative: "cancel".into(),
        }
    }
}

/// Button picked in the rationale dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationaleChoice {
    GoToSettings,
    Cancel,
}

/// Permission Gate
pub struct PermissionGate {
    /// OS permission subsystem
    host: Arc<dyn PermissionHost>,
    /// Last state reported by the OS
    states: HashMap<Capability, PermissionState>,
    /// Outstanding requests by request code
    in_flight: HashMap<i32, Capability>,
    /// Capability whose rationale is on screen
    explaining: Option<Capability>,
}

impl PermissionGate {
    pub fn new(host: Arc<dyn PermissionHost>) -> Self {
        Self {
            host,
            states: HashMap::new(),
            in_flight: HashMap::new(),
            explaining: None,
        }
    }

    /// Current state of a capability
    pub fn state(&self, capability: Capability) -> PermissionState {
        self.states.get(&capability).copied().unwrap_or_default()
    }

    /// Capability whose rationale dialog is showing
    pub fn explaining(&self) -> Option<Capability> {
        self.explaining
    }

    /// Is a permission request outstanding for this capability
    pub fn is_requesting(&self, capability: Capability) -> bool {
        self.in_flight.contains_key(&capability.request_code())
    }

    /// Decide how to proceed with a gated action
    pub fn ensure(&mut self, capability: Capability) -> GateDecision {
        if self.host.check_permission(capability) {
            self.states.insert(capability, PermissionState::Granted);
            return GateDecision::Proceed;
        }

        if self.host.should_show_rationale(capability) {
            self.states.insert(capability, PermissionState::DeniedSoft);
            log::debug!("{} denied before, showing rationale", capability);
            GateDecision::ShowRationale
        } else {
            // Revoked since the last check
            if self.state(capability).is_granted() {
                self.states.insert(capability, PermissionState::Unknown);
            }
            GateDecision::RequestPermission
        }
    }

    /// Present the rationale dialog for a capability
    pub fn explain(&mut self, capability: Capability) -> RationalePrompt {
        let prompt = RationalePrompt::new(capability);
        self.host.show_rationale(&prompt);
        self.explaining = Some(capability);
        prompt
    }

    /// Handle the button picked in the rationale dialog
    pub fn on_rationale_choice(&mut self, choice: RationaleChoice) {
        let capability = self.explaining.take();

        match choice {
            RationaleChoice::GoToSettings => {
                if let Err(e) = self.host.open_app_settings() {
                    log::warn!("Could not open app settings: {}", e);
                }
            }
            RationaleChoice::Cancel => {
                log::debug!("Rationale dismissed for {:?}", capability);
            }
        }
    }

    /// Ask the OS for a permission
    pub fn request(&mut self, capability: Capability) {
        let code = capability.request_code();
        if self.in_flight.insert(code, capability).is_some() {
            log::debug!("Re-requesting {} while a request is outstanding", capability);
        }
        self.host.request_permission(capability, code);
    }

    /// Resolve a permission-result callback.
    ///
    /// An empty `grants` list counts as a denial.
    pub fn on_permission_result(&mut self, request_code: i32, grants: &[GrantResult]) -> PermissionResolution {
        let capability = match Capability::from_request_code(request_code) {
            Some(capability) => capability,
            None => {
                log::warn!("Ignoring permission result for unknown request code {}", request_code);
                return PermissionResolution::Ignored;
            }
        };

        if self.in_flight.remove(&request_code).is_none() {
            log::debug!("Permission result for {} without a recorded request", capability);
        }

        let granted = grants.first() == Some(&GrantResult::Granted);

        // Only resume if the OS still agrees at this point
        if granted && self.host.check_permission(capability) {
            self.states.insert(capability, PermissionState::Granted);
            return PermissionResolution::Resume(capability);
        }

        let permanent = !self.host.should_show_rationale(capability);
        let state = if permanent {
            PermissionState::DeniedHard
        } else {
            PermissionState::DeniedSoft
        };
        self.states.insert(capability, state);

        PermissionResolution::Denied { capability, permanent }
    }
}
