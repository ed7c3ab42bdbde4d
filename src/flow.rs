//! ALFA Media Gate - Media Acquisition Flow
//!
//! Launches the external capture/picker activities and turns their results
//! into display-ready images.

use std::collections::HashMap;
use std::sync::Arc;

use crate::capability::MediaKind;
use crate::error::{MediaError, MediaResult};
use crate::payload::{CorrelationToken, DisplayImage, ResultPayload, EXTRA_THUMBNAIL, RESULT_OK};
use crate::platform::ActivityHost;

/// MIME filter for the gallery picker
pub const IMAGE_MIME_FILTER: &str = "image/*";

/// Turns a successful result payload into something displayable
type Extractor = fn(&ResultPayload) -> MediaResult<DisplayImage>;

/// Launched operation waiting for its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionRequest {
    pub kind: MediaKind,
    pub token: CorrelationToken,
}

/// Result of an external media operation
#[derive(Debug)]
pub enum AcquisitionOutcome {
    Success(DisplayImage),
    Cancelled,
    Failed(MediaError),
}

impl AcquisitionOutcome {
    /// Cancellation becomes `OperationCancelled`
    pub fn into_result(self) -> MediaResult<DisplayImage> {
        match self {
            AcquisitionOutcome::Success(image) => Ok(image),
            AcquisitionOutcome::Cancelled => Err(MediaError::OperationCancelled),
            AcquisitionOutcome::Failed(e) => Err(e),
        }
    }
}

/// Media Acquisition Flow
pub struct MediaAcquisitionFlow {
    /// OS activity launcher
    host: Arc<dyn ActivityHost>,
    /// Picker MIME filter
    picker_mime: String,
    /// Result handlers by request code
    extractors: HashMap<i32, Extractor>,
    /// Most recent launch per kind
    pending: HashMap<MediaKind, AcquisitionRequest>,
    /// Launch counter
    sequence: u64,
}

impl MediaAcquisitionFlow {
    pub fn new(host: Arc<dyn ActivityHost>) -> Self {
        Self::with_picker_mime(host, IMAGE_MIME_FILTER)
    }

    pub fn with_picker_mime(host: Arc<dyn ActivityHost>, picker_mime: &str) -> Self {
        let mut extractors: HashMap<i32, Extractor> = HashMap::new();
        extractors.insert(MediaKind::Camera.request_code(), extract_thumbnail);
        extractors.insert(MediaKind::Gallery.request_code(), extract_picked_uri);

        Self {
            host,
            picker_mime: picker_mime.to_string(),
            extractors,
            pending: HashMap::new(),
            sequence: 0,
        }
    }

    /// Request currently waiting for a result
    pub fn pending(&self, kind: MediaKind) -> Option<&AcquisitionRequest> {
        self.pending.get(&kind)
    }

    /// Start an external operation.
    ///
    /// Supersedes any earlier launch of the same kind; its result will be
    /// ignored when it arrives. A failed launch leaves nothing pending.
    pub fn launch(&mut self, kind: MediaKind) -> MediaResult<AcquisitionRequest> {
        self.sequence += 1;
        let token = CorrelationToken::new(kind, self.sequence);

        let launched = match kind {
            MediaKind::Camera => self.host.launch_capture(token),
            MediaKind::Gallery => self.host.launch_picker(&self.picker_mime, token),
        };

        if let Err(e) = launched {
            if let Some(previous) = self.pending.remove(&kind) {
                log::debug!("{} launch failed, dropping {}", kind, previous.token);
            }
            return Err(match e {
                MediaError::ActivityLaunchFailed(_) => e,
                other => MediaError::ActivityLaunchFailed(other.to_string()),
            });
        }

        let request = AcquisitionRequest { kind, token };
        if let Some(previous) = self.pending.insert(kind, request) {
            log::debug!("{} launch {} supersedes {}", kind, token, previous.token);
        }

        log::info!("Launched {} ({})", kind, token);
        Ok(request)
    }

    /// Reconcile an activity result with its launch.
    ///
    /// Returns `None` when the token does not match the latest launch of its
    /// kind (stale, duplicate or unknown); such results are dropped.
    pub fn on_result(
        &mut self,
        token: CorrelationToken,
        result_code: i32,
        payload: Option<&ResultPayload>,
    ) -> Option<AcquisitionOutcome> {
        let kind = match token.kind() {
            Some(kind) => kind,
            None => {
                log::warn!("Ignoring activity result with unknown request code {}", token.request_code);
                return None;
            }
        };

        match self.pending.get(&kind) {
            Some(request) if request.token == token => {}
            Some(request) => {
                log::debug!("Dropping stale {} result {} (expecting {})", kind, token, request.token);
                return None;
            }
            None => {
                log::debug!("Dropping {} result {} with nothing pending", kind, token);
                return None;
            }
        }
        self.pending.remove(&kind);

        if result_code != RESULT_OK {
            return Some(AcquisitionOutcome::Cancelled);
        }

        let extractor = match self.extractors.get(&token.request_code) {
            Some(extractor) => extractor,
            None => {
                return Some(AcquisitionOutcome::Failed(MediaError::InvalidResultPayload(
                    format!("no handler for request code {}", token.request_code),
                )))
            }
        };

        let empty = ResultPayload::default();
        match extractor(payload.unwrap_or(&empty)) {
            Ok(image) => Some(AcquisitionOutcome::Success(image)),
            Err(e) => Some(AcquisitionOutcome::Failed(e)),
        }
    }
}

/// Camera: thumbnail bitmap embedded in the extras
fn extract_thumbnail(payload: &ResultPayload) -> MediaResult<DisplayImage> {
    payload
        .bitmap(EXTRA_THUMBNAIL)
        .map(|img| DisplayImage::Bitmap(img.clone()))
        .map_err(MediaError::InvalidResultPayload)
}

/// Gallery: URI of the picked image, resolved later by the display
fn extract_picked_uri(payload: &ResultPayload) -> MediaResult<DisplayImage> {
    payload
        .data
        .clone()
        .map(DisplayImage::Uri)
        .ok_or_else(|| MediaError::InvalidResultPayload("picker returned no data uri".into()))
}
