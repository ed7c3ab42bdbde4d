//! ALFA Media Gate - Media Controller
//!
//! Owns the displayed image and wires the three user actions (download,
//! camera, gallery) through the permission gate and the acquisition flow.
//! Everything here runs on the UI thread; the only background work is the
//! remote fetch, whose result comes back through an event channel.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::capability::{GrantResult, MediaKind};
use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};
use crate::fetch::RemoteFetcher;
use crate::flow::MediaAcquisitionFlow;
use crate::gate::{GateDecision, PermissionGate, PermissionResolution, RationaleChoice};
use crate::payload::{CorrelationToken, DisplayImage, ResultPayload};
use crate::platform::{DisplaySink, Notifier, Shell};

/// Notice shown after a denied permission request
pub const NOTICE_PERMISSION_DENIED: &str = "Permission denied!";

/// Notice shown when the OS will not ask again
pub const NOTICE_PERMISSION_SETTINGS: &str = "Permission denied! It can be enabled under App settings.";

/// Notice shown when the remote image could not be loaded
pub const NOTICE_DOWNLOAD_FAILED: &str = "Image download failed";

/// Notice shown when an activity returned unusable data
pub const NOTICE_INVALID_RESULT: &str = "Could not load the selected image";

/// Notice for any other failure
pub const NOTICE_OPERATION_FAILED: &str = "Something went wrong";

/// Work handed back to the UI thread
#[derive(Debug)]
pub enum UiEvent {
    RemoteImage {
        url: String,
        result: MediaResult<image::DynamicImage>,
    },
}

/// Media Controller
pub struct MediaController {
    gate: PermissionGate,
    flow: MediaAcquisitionFlow,
    fetcher: RemoteFetcher,
    display: Arc<dyn DisplaySink>,
    notifier: Arc<dyn Notifier>,
    /// Image currently on screen
    displayed: Option<DisplayImage>,
    /// Runtime for background fetches
    runtime: Handle,
    events_tx: UnboundedSender<UiEvent>,
    events_rx: UnboundedReceiver<UiEvent>,
}

impl MediaController {
    pub fn new(shell: Shell, config: &MediaConfig, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            gate: PermissionGate::new(shell.permissions),
            flow: MediaAcquisitionFlow::with_picker_mime(shell.activities, &config.picker_mime),
            fetcher: RemoteFetcher::new(),
            display: shell.display,
            notifier: shell.notifier,
            displayed: None,
            runtime,
            events_tx,
            events_rx,
        }
    }

    /// Image currently on screen
    pub fn displayed(&self) -> Option<&DisplayImage> {
        self.displayed.as_ref()
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    pub fn flow(&self) -> &MediaAcquisitionFlow {
        &self.flow
    }

    // ═══════════════════════════════════════════════════════════════════════
    // USER ACTIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Download button: fetch in the background, apply in `process_events`
    pub fn on_download_clicked(&self, url: &str) -> JoinHandle<()> {
        let fetcher = self.fetcher.clone();
        let events = self.events_tx.clone();
        let url = url.to_string();

        self.runtime.spawn(async move {
            let result = fetcher.fetch(&url).await;
            if events.send(UiEvent::RemoteImage { url, result }).is_err() {
                log::debug!("Controller gone, dropping fetch result");
            }
        })
    }

    /// Camera button
    pub fn on_camera_clicked(&mut self) {
        self.acquire(MediaKind::Camera);
    }

    /// Gallery button
    pub fn on_gallery_clicked(&mut self) {
        self.acquire(MediaKind::Gallery);
    }

    /// Button picked in the rationale dialog
    pub fn on_rationale_choice(&mut self, choice: RationaleChoice) {
        self.gate.on_rationale_choice(choice);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // OS CALLBACKS
    // ═══════════════════════════════════════════════════════════════════════

    /// Permission request answered
    pub fn on_request_permissions_result(&mut self, request_code: i32, grants: &[GrantResult]) {
        match self.gate.on_permission_result(request_code, grants) {
            PermissionResolution::Resume(capability) => self.launch(capability.media_kind()),
            PermissionResolution::Denied { capability, permanent } => {
                let err = if permanent {
                    MediaError::PermissionPermanentlyDenied(capability)
                } else {
                    MediaError::PermissionDenied(capability)
                };
                log::info!("{}", err);
                self.notifier.notice(notice_for(&err));
            }
            PermissionResolution::Ignored => {}
        }
    }

    /// External activity finished
    pub fn on_activity_result(
        &mut self,
        token: CorrelationToken,
        result_code: i32,
        payload: Option<&ResultPayload>,
    ) {
        let outcome = match self.flow.on_result(token, result_code, payload) {
            Some(outcome) => outcome,
            None => return,
        };

        match outcome.into_result() {
            Ok(image) => self.present(image),
            Err(e) if e.is_silent() => log::debug!("Activity {}: {}", token, e),
            Err(e) => {
                log::warn!("Activity {} failed: {}", token, e);
                self.notifier.notice(notice_for(&e));
            }
        }
    }

    /// Apply results posted by background work. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    fn acquire(&mut self, kind: MediaKind) {
        let capability = kind.capability();

        match self.gate.ensure(capability) {
            GateDecision::Proceed => self.launch(kind),
            GateDecision::ShowRationale => {
                self.gate.explain(capability);
            }
            GateDecision::RequestPermission => self.gate.request(capability),
        }
    }

    fn launch(&mut self, kind: MediaKind) {
        if let Err(e) = self.flow.launch(kind) {
            log::warn!("Could not launch {}: {}", kind, e);
        }
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::RemoteImage { url, result } => match result {
                Ok(img) => {
                    log::info!("Downloaded {}", url);
                    self.present(DisplayImage::Bitmap(img));
                }
                Err(e) => {
                    log::error!("Download of {} failed: {}", url, e);
                    self.notifier.notice(notice_for(&e));
                }
            },
        }
    }

    fn present(&mut self, image: DisplayImage) {
        log::debug!("Showing {}", image.describe());
        self.display.show(&image);
        self.displayed = Some(image);
    }
}

/// User-facing text for a recoverable error
fn notice_for(err: &MediaError) -> &'static str {
    match err {
        MediaError::PermissionPermanentlyDenied(_) => NOTICE_PERMISSION_SETTINGS,
        MediaError::PermissionDenied(_) => NOTICE_PERMISSION_DENIED,
        MediaError::InvalidResultPayload(_) => NOTICE_INVALID_RESULT,
        MediaError::FetchFailed(_) => NOTICE_DOWNLOAD_FAILED,
        _ => NOTICE_OPERATION_FAILED,
    }
}
