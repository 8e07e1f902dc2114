//! Background download of the avatar and banner images.
//!
//! Each URL is fetched once on its own thread and decoded into RGBA so the
//! UI thread only has to upload a texture.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

/// Longest edge kept after decoding. Banners are wide, avatars small.
const MAX_EDGE: u32 = 1024;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
enum ImageError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Tracks in-flight, finished and failed image downloads by URL.
#[derive(Default)]
pub struct ImageLoader {
    pending: HashMap<String, mpsc::Receiver<Option<ImageData>>>,
    ready: HashMap<String, ImageData>,
    failed: HashSet<String>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start fetching `url` unless it is already known.
    pub fn request(&mut self, url: &str) {
        if self.ready.contains_key(url) || self.pending.contains_key(url) || self.failed.contains(url)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let owned = url.to_string();
        std::thread::spawn(move || {
            let result = match fetch_and_decode(&owned) {
                Ok(data) => Some(data),
                Err(e) => {
                    log::warn!("Image {} unavailable: {}", owned, e);
                    None
                }
            };
            let _ = tx.send(result);
        });

        self.pending.insert(url.to_string(), rx);
    }

    /// Collect finished downloads. Call once per frame.
    pub fn poll(&mut self) {
        let mut done = Vec::new();
        for (url, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Some(data)) => {
                    self.ready.insert(url.clone(), data);
                    done.push(url.clone());
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                    self.failed.insert(url.clone());
                    done.push(url.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for url in done {
            self.pending.remove(&url);
        }
    }

    /// Hand over a decoded image. Subsequent calls for the same URL return
    /// `None`; the caller keeps the texture.
    pub fn take(&mut self, url: &str) -> Option<ImageData> {
        self.ready.remove(url)
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains_key(url)
    }
}

fn fetch_and_decode(url: &str) -> Result<ImageData, ImageError> {
    let resp = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?
        .get(url)
        .send()?;

    if !resp.status().is_success() {
        return Err(ImageError::Status(resp.status().as_u16()));
    }

    let bytes = resp.bytes()?;
    Ok(decode(&bytes)?)
}

fn decode(bytes: &[u8]) -> Result<ImageData, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > MAX_EDGE || img.height() > MAX_EDGE {
        img.resize(MAX_EDGE, MAX_EDGE, image::imageops::FilterType::Triangle)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
