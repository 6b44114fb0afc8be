//! Font loading shared by both backends
//!
//! One file is read once; fontdue parses its own copy and swash borrows the
//! shared bytes through [`SwashFace`].

use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use swash::{CacheKey, FontRef};

/// Places a regular sans or mono face usually lives
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// A parsed font plus the raw bytes both backends read from
pub struct LoadedFont {
    data: Arc<Vec<u8>>,
    /// Offset of the face inside `data` (non-zero for collections)
    offset: u32,
    key: CacheKey,
    fontdue: Arc<fontdue::Font>,
}

impl LoadedFont {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let data = Arc::new(data);

        let fontdue = fontdue::Font::from_bytes(data.as_slice(), fontdue::FontSettings::default())
            .map_err(|e| Error::Font(e.to_string()))?;

        let swash = FontRef::from_index(&data, 0)
            .ok_or_else(|| Error::Font("swash could not parse face 0".to_string()))?;
        let (offset, key) = (swash.offset, swash.key);

        Ok(Self {
            data,
            offset,
            key,
            fontdue: Arc::new(fontdue),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let font = Self::from_bytes(data)?;
        log::info!("Loaded font {}", path.display());
        Ok(font)
    }

    /// Load from `path` if given, otherwise probe the usual system locations
    pub fn locate(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_path(path);
        }

        for candidate in SYSTEM_FONT_CANDIDATES {
            let candidate = Path::new(candidate);
            if !candidate.exists() {
                continue;
            }
            match Self::from_path(candidate) {
                Ok(font) => return Ok(font),
                Err(e) => log::warn!("Skipping {}: {}", candidate.display(), e),
            }
        }

        Err(Error::FontNotFound {
            tried: SYSTEM_FONT_CANDIDATES.len(),
        })
    }

    pub fn fontdue(&self) -> Arc<fontdue::Font> {
        Arc::clone(&self.fontdue)
    }

    /// Shared handle to the raw bytes
    pub fn data(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.data)
    }
}

/// Owned swash face: keeps the bytes alive so a backend can hand out
/// `FontRef`s without borrowing the [`LoadedFont`]
#[derive(Clone)]
pub struct SwashFace {
    data: Arc<Vec<u8>>,
    offset: u32,
    key: CacheKey,
}

impl SwashFace {
    pub fn new(font: &LoadedFont) -> Self {
        Self {
            data: font.data(),
            offset: font.offset,
            key: font.key,
        }
    }

    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        }
    }
}
