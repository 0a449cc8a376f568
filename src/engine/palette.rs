//! Palette cycling.
//!
//! Element `i` of a decorated feature uses colour `i mod len` of its
//! palette. Palettes are validated non-empty at construction, so lookups
//! on animation state never see an empty slice.

use crate::types::Colour;

/// Index into a palette of `len` colours for element `index`.
///
/// Returns `None` for an empty palette.
pub fn palette_index(index: usize, len: usize) -> Option<usize> {
    index.checked_rem(len)
}

/// Colour for element `index`, cycling through `palette`.
pub fn cycle(palette: &[Colour], index: usize) -> Option<&Colour> {
    palette_index(index, palette.len()).map(|i| &palette[i])
}
