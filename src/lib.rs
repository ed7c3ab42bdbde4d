//! # ALFA Media Gate
//!
//! Permission-gated image acquisition: camera capture, gallery pick and
//! remote download, reconciled into a single displayed image.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    ALFA MEDIA GATE                       │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────┐  │
//! │  │  DOWNLOAD   │  │   CAMERA    │  │    GALLERY      │  │
//! │  └──────┬──────┘  └──────┬──────┘  └────────┬────────┘  │
//! │         │                │                   │           │
//! │         │         ┌──────┴───────────────────┴────────┐ │
//! │         │         │         PERMISSION GATE            │ │
//! │         │         │  proceed / rationale / request     │ │
//! │         │         └──────────────────┬─────────────────┘ │
//! │  ┌──────┴──────┐  ┌──────────────────┴─────────────────┐ │
//! │  │ REMOTE FETCH│  │      MEDIA ACQUISITION FLOW        │ │
//! │  │ (tokio task)│  │  token → extractor dispatch table  │ │
//! │  └──────┬──────┘  └──────────────────┬─────────────────┘ │
//! │         └───────────┐   ┌────────────┘                   │
//! │                ┌────┴───┴────┐                           │
//! │                │   DISPLAY   │  (UI thread only)         │
//! │                └─────────────┘                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Platform Model
//!
//! - OS permission, activity, display and toast facilities are traits
//!   ([`platform`]) implemented by the host shell
//! - All bookkeeping lives on the UI thread, no locks
//! - Remote fetches run on tokio and post results back over a channel
//! - Nothing here is fatal: every failure ends as a log line or a notice

pub mod capability;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod flow;
pub mod gate;
pub mod payload;
pub mod platform;
pub mod storage;

#[cfg(feature = "android")]
pub mod android;

#[cfg(test)]
pub(crate) mod testing;

pub use capability::{Capability, GrantResult, MediaKind, PermissionState};
pub use config::MediaConfig;
pub use controller::MediaController;
pub use error::{MediaError, MediaResult};
pub use fetch::RemoteFetcher;
pub use flow::{AcquisitionOutcome, AcquisitionRequest, MediaAcquisitionFlow};
pub use gate::{GateDecision, PermissionGate, PermissionResolution, RationaleChoice};
pub use payload::{ContentUri, CorrelationToken, DisplayImage, ResultPayload};
pub use platform::Shell;

/// ALFA Media Gate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
