//! Frequency-radius maps.

use std::collections::HashMap;
use std::rc::Rc;

use crate::luma::{self, LumaImage};

/// Euclidean distance, in samples, from each cell to the spectrum centre.
///
/// The centre is `(width / 2, height / 2)`, where the zero frequency lands
/// after the centre shift. The centre cell itself holds 1 rather than 0, so
/// the map can be inverted for 1/f synthesis. Every other cell is already at
/// least 1 away.
#[derive(Debug, Clone)]
pub struct RadiusMap {
    radii: LumaImage,
}

impl RadiusMap {
    /// Compute the map for a `width` x `height` spectrum.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let cx = (width / 2) as f64;
        let cy = (height / 2) as f64;
        let radii = luma::from_fn(width, height, |x, y| {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            (dx * dx + dy * dy).sqrt().max(1.0)
        });
        Self { radii }
    }

    /// Map width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.radii.width()
    }

    /// Map height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.radii.height()
    }

    /// Radius at `(x, y)`.
    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.radii.buf()[y * self.radii.width() + x]
    }

    /// The underlying grid of radii.
    #[must_use]
    pub fn as_grid(&self) -> &LumaImage {
        &self.radii
    }
}

/// Radius maps keyed by shape.
///
/// Maps depend on nothing but the grid shape, so a batch of equally sized
/// images computes each map once.
#[derive(Debug, Default)]
pub struct RadiusCache {
    maps: HashMap<(usize, usize), Rc<RadiusMap>>,
}

impl RadiusCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map for `width` x `height`, computed on first request.
    pub fn get(&mut self, width: usize, height: usize) -> Rc<RadiusMap> {
        Rc::clone(
            self.maps
                .entry((width, height))
                .or_insert_with(|| Rc::new(RadiusMap::new(width, height))),
        )
    }

    /// Number of distinct shapes cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
