use std::ops::Range;

pub const MAX_SPLIT_FACTOR: usize = 4;

/// Rectangular block of pixels rendered by one worker.
/// Rows and columns are half-open ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Tile {
    pub fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Largest factor up to `MAX_SPLIT_FACTOR` dividing `height`, at least 1.
pub fn split_factor(height: usize) -> usize {
    let mut factor = MAX_SPLIT_FACTOR;
    while factor > 1 && height % factor != 0 {
        factor -= 1;
    }
    factor
}

/// Cuts `0..len` into at most `parts` contiguous bands.
/// The remainder of an uneven split goes to the leading bands.
pub fn bands(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.min(len);
    if parts == 0 {
        return Vec::new();
    }
    let base = len / parts;
    let remainder = len % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let size = base + usize::from(i < remainder);
            let band = start..start + size;
            start += size;
            band
        })
        .collect()
}

/// Row and column bands whose cross product tiles a `width` x `height` grid.
#[derive(Debug, Clone)]
pub struct TileGrid {
    pub row_bands: Vec<Range<usize>>,
    pub col_bands: Vec<Range<usize>>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> TileGrid {
        let factor = split_factor(height);
        TileGrid {
            row_bands: bands(height, factor),
            col_bands: bands(width, factor),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.row_bands.len() * self.col_bands.len()
    }

    /// Tiles in row-major order: `index = row_band * col_bands.len() + col_band`.
    pub fn tiles(&self) -> Vec<Tile> {
        self.row_bands
            .iter()
            .flat_map(|rows| {
                self.col_bands.iter().map(move |cols| Tile {
                    rows: rows.clone(),
                    cols: cols.clone(),
                })
            })
            .collect()
    }
}
