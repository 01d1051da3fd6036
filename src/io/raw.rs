//! Read / write images as raw little-endian `f32`, row by row

/// Write `data` to `path`, one little-endian `f32` per datum
pub fn write(data: impl Iterator<Item = f32>, path: &Path) -> std::io::Result<()> {
    let mut buf = BufWriter::new(File::create(path)?);
    for datum in data {
        buf.write_all(&datum.to_le_bytes())?;
    }
    buf.flush()
}

type IORes<T> = std::io::Result<T>;

/// Lazily read little-endian `f32`s from `path`. A trailing partial value is
/// ignored.
pub fn read<'a>(path: &Path) -> IORes<impl Iterator<Item = IORes<f32>> + 'a> {
    let mut buf = BufReader::new(File::open(path)?);
    let mut bytes = [0; 4];

    Ok(std::iter::from_fn(move || {
        use std::io::ErrorKind::UnexpectedEof;
        match buf.read_exact(&mut bytes) {
            Ok(()) => Some(Ok(f32::from_le_bytes(bytes))),
            Err(e) if e.kind() == UnexpectedEof => None,
            Err(e) => Some(Err(e)),
        }
    }))
}

/// Write `image` in row-major order, narrowing to `f32`
pub fn write_image(image: &ImageData, path: &Path) -> Result<()> {
    #[allow(clippy::cast_possible_truncation)]
    write(image.iter().map(|&v| v as f32), path)?;
    Ok(())
}

/// Read an image of the given `(height, width)` from `path`
pub fn read_image(path: &Path, (height, width): Shape) -> Result<ImageData> {
    let data: Vec<Intensity> = read(path)?
        .map(|v| v.map(Intensity::from))
        .collect::<IORes<_>>()?;
    let expected = height * width;
    if data.len() != expected {
        return Err(Error::ShapeMismatch { expected, actual: data.len() })
    }
    ImageData::from_shape_vec((height, width), data)
        .map_err(|_| Error::ShapeMismatch { expected, actual: expected })
}

// ----- Imports ------------------------------------------------------------------------------------------
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::{Error, ImageData, Intensity, Result, Shape};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn raw_values_survive_the_disk() -> std::io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("values.raw");
        let original = vec![1.5_f32, -4.25, 0.0, 7e-3];
        write(original.iter().copied(), &path)?;
        let reloaded: Vec<f32> = read(&path)?.collect::<IORes<_>>()?;
        assert_eq!(original, reloaded);
        Ok(())
    }

    #[test]
    fn image_keeps_row_major_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("image.raw");
        let image = ImageData::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        write_image(&image, &path)?;
        assert_eq!(std::fs::metadata(&path)?.len(), 6 * 4);
        assert_eq!(read_image(&path, (2, 3))?, image);
        Ok(())
    }

    #[test]
    fn wrong_dimensions_are_reported() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("image.raw");
        write([0.0_f32; 10].into_iter(), &path)?;
        match read_image(&path, (3, 3)) {
            Err(Error::ShapeMismatch { expected: 9, actual: 10 }) => Ok(()),
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = read_image(&dir.path().join("absent.raw"), (1, 1));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
