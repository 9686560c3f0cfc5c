use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::backend::{BackendRef, TextureHandle};

/// Decoded 8-bit RGBA pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRgba8 {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageRgba8 {
    /// 1×1 opaque white, bound whenever no texture is available.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![255; 4],
        }
    }

    /// Levels in a full mip chain down to 1×1.
    pub fn mip_level_count(&self) -> u32 {
        32 - self.width.max(self.height).max(1).leading_zeros()
    }

    /// Next mip level: half the size in each dimension (at least 1), each
    /// texel the rounded mean of the up to 2×2 texels it covers.
    pub fn downsample(&self) -> Self {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);

        for y in 0..height {
            for x in 0..width {
                let mut sum = [0u32; 4];
                let mut n = 0u32;
                for sy in (y * 2)..(y * 2 + 2).min(self.height) {
                    for sx in (x * 2)..(x * 2 + 2).min(self.width) {
                        let i = ((sy * self.width + sx) * 4) as usize;
                        if let Some(texel) = self.pixels.get(i..i + 4) {
                            for (acc, &c) in sum.iter_mut().zip(texel) {
                                *acc += u32::from(c);
                            }
                            n += 1;
                        }
                    }
                }
                let n = n.max(1);
                pixels.extend(sum.map(|acc| ((acc + n / 2) / n) as u8));
            }
        }

        Self { width, height, pixels }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureLoadError {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for TextureLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load texture {}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for TextureLoadError {}

/// Turns an image file into RGBA8 pixels.
pub trait ImageDecoder {
    fn decode(&mut self, path: &Path) -> Result<ImageRgba8, TextureLoadError>;
}

/// Decoder backed by the `image` crate (PNG, JPEG, BMP).
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&mut self, path: &Path) -> Result<ImageRgba8, TextureLoadError> {
        let img = image::open(path).map_err(|e| TextureLoadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(ImageRgba8 {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

/// Path-keyed texture cache.
///
/// A path is decoded and uploaded at most once; later loads return the
/// cached handle. Every cached texture is deleted on `cleanup` or drop.
pub struct TextureCache {
    backend: BackendRef,
    decoder: Box<dyn ImageDecoder>,
    entries: HashMap<PathBuf, TextureHandle>,
}

impl TextureCache {
    pub fn new(backend: BackendRef) -> Self {
        Self::with_decoder(backend, Box::new(ImageCrateDecoder))
    }

    pub fn with_decoder(backend: BackendRef, decoder: Box<dyn ImageDecoder>) -> Self {
        Self {
            backend,
            decoder,
            entries: HashMap::new(),
        }
    }

    /// Returns the texture for `path`, decoding and uploading it on first use.
    ///
    /// Decode failures are logged and yield `None`; nothing is cached for the
    /// failed path, so a later call retries.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Option<TextureHandle> {
        let path = path.as_ref();
        if let Some(&handle) = self.entries.get(path) {
            log::debug!("texture cache hit: {}", path.display());
            return Some(handle);
        }

        match self.decoder.decode(path) {
            Ok(image) => {
                let handle = self.backend.borrow_mut().create_texture(&image);
                log::debug!(
                    "texture loaded: {} ({}x{})",
                    path.display(),
                    image.width,
                    image.height
                );
                self.entries.insert(path.to_path_buf(), handle);
                Some(handle)
            }
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }

    /// Deletes `handle` and evicts whichever path mapped to it.
    pub fn delete(&mut self, handle: TextureHandle) {
        let before = self.entries.len();
        self.entries.retain(|_, h| *h != handle);
        if self.entries.len() != before {
            self.backend.borrow_mut().delete_texture(handle);
        }
    }

    /// Deletes every cached texture.
    pub fn cleanup(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let mut backend = self.backend.borrow_mut();
        for (_, handle) in self.entries.drain() {
            backend.delete_texture(handle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for TextureCache {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingBackend;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct CountingDecoder {
        calls: Rc<Cell<u32>>,
    }

    impl ImageDecoder for CountingDecoder {
        fn decode(&mut self, path: &Path) -> Result<ImageRgba8, TextureLoadError> {
            self.calls.set(self.calls.get() + 1);
            if path.extension().is_some_and(|e| e == "png") {
                Ok(ImageRgba8 {
                    width: 2,
                    height: 1,
                    pixels: vec![0; 8],
                })
            } else {
                Err(TextureLoadError {
                    path: path.to_path_buf(),
                    message: "unsupported".into(),
                })
            }
        }
    }

    #[test]
    fn mip_chain_ends_at_one_texel() {
        let image = ImageRgba8 {
            width: 4,
            height: 2,
            pixels: vec![0; 32],
        };
        assert_eq!(image.mip_level_count(), 3);
        assert_eq!(ImageRgba8::white().mip_level_count(), 1);

        let level1 = image.downsample();
        assert_eq!((level1.width, level1.height), (2, 1));
        let level2 = level1.downsample();
        assert_eq!((level2.width, level2.height), (1, 1));
        assert_eq!(level2.pixels.len(), 4);
    }

    #[test]
    fn downsample_averages_each_block() {
        // 2×2 checker of black and white, plus an odd third column.
        let image = ImageRgba8 {
            width: 3,
            height: 2,
            pixels: vec![
                0, 0, 0, 255, 255, 255, 255, 255, 10, 20, 30, 40, //
                255, 255, 255, 255, 0, 0, 0, 255, 50, 60, 70, 80,
            ],
        };
        let half = image.downsample();
        assert_eq!((half.width, half.height), (1, 1));
        assert_eq!(half.pixels, vec![128, 128, 128, 255]);
    }

    fn cache() -> (Rc<RefCell<RecordingBackend>>, TextureCache, Rc<Cell<u32>>) {
        let rec = Rc::new(RefCell::new(RecordingBackend::new()));
        let calls = Rc::new(Cell::new(0));
        let backend: BackendRef = rec.clone();
        let cache = TextureCache::with_decoder(backend, Box::new(CountingDecoder { calls: calls.clone() }));
        (rec, cache, calls)
    }

    // ── caching ───────────────────────────────────────────────────────────

    #[test]
    fn same_path_returns_same_handle_with_one_decode() {
        let (rec, mut cache, calls) = cache();

        let a = cache.load("wall.png");
        let b = cache.load("wall.png");

        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(calls.get(), 1);
        assert_eq!(rec.borrow().live_textures(), 1);
    }

    #[test]
    fn distinct_paths_get_distinct_handles() {
        let (_rec, mut cache, _) = cache();
        assert_ne!(cache.load("a.png"), cache.load("b.png"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn decode_failure_yields_none_and_is_not_cached() {
        let (rec, mut cache, calls) = cache();

        assert_eq!(cache.load("broken.tga"), None);
        assert_eq!(cache.load("broken.tga"), None);

        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
        assert_eq!(rec.borrow().live_textures(), 0);
    }

    // ── eviction ──────────────────────────────────────────────────────────

    #[test]
    fn delete_evicts_and_next_load_decodes_again() {
        let (rec, mut cache, calls) = cache();

        let first = cache.load("wall.png").unwrap();
        cache.delete(first);
        assert_eq!(rec.borrow().live_textures(), 0);

        let second = cache.load("wall.png").unwrap();
        assert_ne!(first, second);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn deleting_unknown_handle_is_a_noop() {
        let (rec, mut cache, _) = cache();
        cache.load("wall.png");
        cache.delete(TextureHandle::from_raw(999));
        assert_eq!(cache.len(), 1);
        assert!(rec.borrow().errors().is_empty());
    }

    #[test]
    fn cleanup_and_drop_release_everything_once() {
        let (rec, mut cache, _) = cache();
        cache.load("a.png");
        cache.load("b.png");

        cache.cleanup();
        assert_eq!(rec.borrow().live_textures(), 0);

        drop(cache);
        assert!(rec.borrow().errors().is_empty());
    }
}
