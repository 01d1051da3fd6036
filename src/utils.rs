/// Parse image dimensions written as `WIDTHxHEIGHT` (e.g. `256x128`) into a
/// `(height, width)` shape.
pub fn parse_dims(s: &str) -> Result<Shape, String> {
    let (w, h) = s.split_once(['x', 'X'])
        .ok_or_else(|| format!("Could not find 'x' when parsing dimensions '{s}'"))?;
    let parse = |n: &str| n.trim().parse::<usize>()
        .map_err(|e| format!("Bad dimension '{n}' in '{s}': {e}"));
    let (width, height) = (parse(w)?, parse(h)?);
    if width == 0 || height == 0 {
        return Err(format!("Image dimensions must be positive, got '{s}'"))
    }
    Ok((height, width))
}

/// Smallest integer span which covers the diagonal of an image of this shape
pub fn diagonal_span((height, width): Shape) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let span = (height as f64).hypot(width as f64).ceil() as u32;
    span
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}

// ----- Imports ------------------------------------------------------------------------------------------
use crate::Shape;
