//! Image gallery layout and lightbox navigation for detail pages.

use serde::Serialize;

pub const MAX_GRID_TILES: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryTile {
    pub index: usize,
    pub image: String,
    /// `"+N more"` on the last tile when images were left out of the grid.
    pub overlay: Option<String>,
    /// Indicator the lightbox shows when opened from this tile.
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum GalleryLayout {
    None,
    Single { image: String },
    Grid { tiles: Vec<GalleryTile>, total: usize },
}

impl GalleryLayout {
    pub fn build(images: &[String]) -> Self {
        match images {
            [] => GalleryLayout::None,
            [only] => GalleryLayout::Single { image: only.clone() },
            _ => {
                let total = images.len();
                let hidden = total.saturating_sub(MAX_GRID_TILES);
                let tiles = images
                    .iter()
                    .take(MAX_GRID_TILES)
                    .enumerate()
                    .map(|(index, image)| GalleryTile {
                        index,
                        image: image.clone(),
                        overlay: (hidden > 0 && index == MAX_GRID_TILES - 1)
                            .then(|| format!("+{hidden} more")),
                        position: Lightbox::new(total)
                            .opened_at(index)
                            .indicator()
                            .unwrap_or_default(),
                    })
                    .collect();
                GalleryLayout::Grid { tiles, total }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum LightboxState {
    Closed,
    Open(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowRight,
    ArrowLeft,
}

impl LightboxKey {
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Escape" => Some(LightboxKey::Escape),
            "ArrowRight" => Some(LightboxKey::ArrowRight),
            "ArrowLeft" => Some(LightboxKey::ArrowLeft),
            _ => None,
        }
    }
}

/// Lightbox over `len` images. Navigation wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    state: LightboxState,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Lightbox { len, state: LightboxState::Closed }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn opened_at(mut self, index: usize) -> Self {
        self.open(index);
        self
    }

    pub fn open(&mut self, index: usize) {
        if index < self.len {
            self.state = LightboxState::Open(index);
        }
    }

    pub fn close(&mut self) {
        self.state = LightboxState::Closed;
    }

    pub fn next(&mut self) {
        if let LightboxState::Open(i) = self.state {
            self.state = LightboxState::Open((i + 1) % self.len);
        }
    }

    pub fn previous(&mut self) {
        if let LightboxState::Open(i) = self.state {
            self.state = LightboxState::Open((i + self.len - 1) % self.len);
        }
    }

    /// Keys are ignored while closed.
    pub fn handle_key(&mut self, key: LightboxKey) {
        if self.state == LightboxState::Closed {
            return;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::ArrowRight => self.next(),
            LightboxKey::ArrowLeft => self.previous(),
        }
    }

    /// `"i / N"`, 1-based.
    pub fn indicator(&self) -> Option<String> {
        match self.state {
            LightboxState::Open(i) => Some(format!("{} / {}", i + 1, self.len)),
            LightboxState::Closed => None,
        }
    }
}
