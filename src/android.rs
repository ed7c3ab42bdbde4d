//! ALFA Media Gate - Android JNI Bindings
//!
//! Exposes the non-interactive operations to Kotlin/Java via JNI. The
//! permission and activity flow stays in the shell, driven through
//! `MediaController`.

#![cfg(feature = "android")]

use jni::JNIEnv;
use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jbyteArray, jstring, JNI_FALSE, JNI_TRUE};
use parking_lot::Mutex;
use std::path::PathBuf;

use crate::config::MediaConfig;
use crate::fetch::{encode_png, RemoteFetcher};
use crate::error::MediaResult;
use crate::storage;

// Configuration shared by all calls
static CONFIG: Mutex<Option<MediaConfig>> = parking_lot::const_mutex(None);

fn current_config() -> MediaConfig {
    CONFIG.lock().clone().unwrap_or_default()
}

/// Fetch on a private runtime, the caller is already off the UI thread
fn fetch_png(url: &str) -> MediaResult<Vec<u8>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let img = runtime.block_on(RemoteFetcher::new().fetch(url))?;
    encode_png(&img)
}

/// Apply a JSON configuration
#[no_mangle]
pub extern "system" fn Java_dev_alfa_media_NativeMedia_configure(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jboolean {
    let json: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return JNI_FALSE,
    };

    match MediaConfig::from_json(&json) {
        Ok(config) => {
            *CONFIG.lock() = Some(config);
            JNI_TRUE
        }
        Err(e) => {
            log::warn!("Rejected configuration: {}", e);
            JNI_FALSE
        }
    }
}

/// Download and decode an image, returned PNG-encoded (null on failure)
#[no_mangle]
pub extern "system" fn Java_dev_alfa_media_NativeMedia_fetchImage(
    mut env: JNIEnv,
    _class: JClass,
    url: JString,
) -> jbyteArray {
    let url: String = match env.get_string(&url) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let url = if url.is_empty() { current_config().image_url } else { url };

    match fetch_png(&url) {
        Ok(data) => match env.byte_array_from_slice(&data) {
            Ok(arr) => arr.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::error!("Download of {} failed: {}", url, e);
            std::ptr::null_mut()
        }
    }
}

/// Target path for a new photo under the package files directory
#[no_mangle]
pub extern "system" fn Java_dev_alfa_media_NativeMedia_photoFilePath(
    mut env: JNIEnv,
    _class: JClass,
    base: JString,
) -> jstring {
    let base: String = match env.get_string(&base) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let config = current_config();
    let name = storage::timestamped_photo_name(chrono::Local::now());
    let path = storage::photo_file_path(&PathBuf::from(base), &config.pictures_subfolder, &name);

    match env.new_string(path.to_string_lossy()) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Authority to pass to the file provider when sharing a photo path
#[no_mangle]
pub extern "system" fn Java_dev_alfa_media_NativeMedia_fileProviderAuthority(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    match env.new_string(current_config().file_provider_authority) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}
