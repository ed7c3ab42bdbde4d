//! ALFA Media Gate - Remote Image Fetch
//!
//! Downloads and decodes an image. Meant to run on a tokio worker, never on
//! the thread that owns the display.

use std::io::Cursor;
use image::DynamicImage;
use reqwest::Client;

use crate::error::{MediaError, MediaResult};

/// HTTP image fetcher
#[derive(Debug, Clone, Default)]
pub struct RemoteFetcher {
    client: Client,
}

impl RemoteFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET `url`, read the whole body and decode it
    pub async fn fetch(&self, url: &str) -> MediaResult<DynamicImage> {
        log::debug!("Fetching {} on {:?}", url, std::thread::current().name());

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        image::load_from_memory(&bytes)
            .map_err(|e| MediaError::FetchFailed(format!("{} is not a decodable image: {}", url, e)))
    }
}

/// Encode a decoded image as PNG
pub fn encode_png(img: &DynamicImage) -> MediaResult<Vec<u8>> {
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| MediaError::EncodeFailed(e.to_string()))?;
    Ok(output)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::GenericImageView;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single HTTP response on a local port, return its URL
    pub(crate) async fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/image.png", addr)
    }

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        encode_png(&DynamicImage::new_rgb8(width, height)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_decodes_image() {
        let url = serve_once("200 OK", png_bytes(32, 16)).await;
        let img = RemoteFetcher::new().fetch(&url).await.unwrap();
        assert_eq!(img.dimensions(), (32, 16));
    }

    #[tokio::test]
    async fn test_fetch_non_image_fails() {
        let url = serve_once("200 OK", b"<html>not an image</html>".to_vec()).await;
        let err = RemoteFetcher::new().fetch(&url).await.unwrap_err();
        assert!(matches!(err, MediaError::FetchFailed(_)));
        assert!(err.is_user_visible());
    }

    #[tokio::test]
    async fn test_fetch_http_error_fails() {
        let url = serve_once("404 Not Found", Vec::new()).await;
        let err = RemoteFetcher::new().fetch(&url).await.unwrap_err();
        assert!(matches!(err, MediaError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = RemoteFetcher::new()
            .fetch(&format!("http://{}/gone.jpg", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FetchFailed(_)));
    }
}
