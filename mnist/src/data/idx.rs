//! Reader for the IDX format the MNIST files are distributed in.
//!
//! An IDX file is a big-endian header followed by the raw payload. The header's magic number is
//! `0x0000TTNN`, where `TT` is the element type and `NN` the amount of dimensions, each dimension
//! size following as a `u32`. Only unsigned byte payloads (`TT = 0x08`) are supported.

use std::{fs, path::Path};

use ndarray::{Array1, Array2};

use crate::{Result, RunErr};

const UNSIGNED_BYTE: u8 = 0x08;

/// A decoded IDX payload.
#[derive(Debug, Clone, PartialEq)]
pub struct IdxArray {
    pub dims: Vec<usize>,
    pub data: Vec<u8>,
}

fn read_be_u32(bytes: &[u8], offset: &mut usize) -> Option<u32> {
    let word = bytes.get(*offset..*offset + 4)?;
    *offset += 4;
    Some(u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
}

/// Decodes an IDX buffer.
///
/// # Returns
/// The dimensions and payload, or a message describing why the buffer isn't valid.
pub fn parse(bytes: &[u8]) -> std::result::Result<IdxArray, String> {
    let mut offset = 0;
    let magic = read_be_u32(bytes, &mut offset).ok_or("missing magic number")?;

    let [hi, lo, kind, ndims] = magic.to_be_bytes();
    if hi != 0 || lo != 0 || kind != UNSIGNED_BYTE {
        return Err(format!("bad magic number {magic:#010x}"));
    }

    let dims = (0..ndims)
        .map(|_| read_be_u32(bytes, &mut offset).map(|d| d as usize))
        .collect::<Option<Vec<_>>>()
        .ok_or("truncated header")?;

    let len = dims
        .iter()
        .try_fold(1_usize, |acc, &d| acc.checked_mul(d))
        .ok_or("dimension sizes overflow")?;
    let end = offset.checked_add(len).ok_or("dimension sizes overflow")?;

    let Some(data) = bytes.get(offset..end) else {
        return Err(format!(
            "truncated payload, expected {len} bytes but only {} are left",
            bytes.len() - offset
        ));
    };

    Ok(IdxArray {
        dims,
        data: data.to_vec(),
    })
}

/// Reads an IDX file, checking it has exactly `ndims` dimensions.
fn read(path: &Path, ndims: usize) -> Result<IdxArray> {
    let bytes = fs::read(path)?;
    let idx_err = |msg| RunErr::Idx {
        path: path.to_path_buf(),
        msg,
    };

    let array = parse(&bytes).map_err(idx_err)?;
    if array.dims.len() != ndims {
        return Err(idx_err(format!(
            "expected {ndims} dimensions, got {}",
            array.dims.len()
        )));
    }

    Ok(array)
}

/// Loads an image file into a matrix with one flattened image per row.
///
/// # Arguments
/// * `path` - The path of an `idx3-ubyte` file.
/// * `scale_pixels` - Whether to map the intensities from `0..=255` to `[0, 1]`.
pub fn load_images(path: &Path, scale_pixels: bool) -> Result<Array2<f32>> {
    let IdxArray { dims, data } = read(path, 3)?;
    let scale = if scale_pixels { 255. } else { 1. };

    let pixels = data.into_iter().map(|p| p as f32 / scale).collect();
    let images = Array2::from_shape_vec((dims[0], dims[1] * dims[2]), pixels)
        .map_err(mlp::MlErr::from)?;

    Ok(images)
}

/// Loads a label file.
pub fn load_labels(path: &Path) -> Result<Array1<usize>> {
    let IdxArray { data, .. } = read(path, 1)?;
    Ok(data.into_iter().map(usize::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(dims: &[u32], data: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0, 0, UNSIGNED_BYTE, dims.len() as u8];
        for d in dims {
            bytes.extend(d.to_be_bytes());
        }
        bytes.extend(data);
        bytes
    }

    #[test]
    fn parses_header_and_payload() {
        let bytes = encode(&[2, 3], &[1, 2, 3, 4, 5, 6]);
        let array = parse(&bytes).unwrap();

        assert_eq!(array.dims, vec![2, 3]);
        assert_eq!(array.data, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn ignores_trailing_bytes() {
        let bytes = encode(&[2], &[7, 8, 9]);
        assert_eq!(parse(&bytes).unwrap().data, vec![7, 8]);
    }

    #[test]
    fn bad_magic() {
        let mut bytes = encode(&[1], &[0]);
        bytes[2] = 0x0D;
        assert!(parse(&bytes).unwrap_err().contains("magic"));

        assert!(parse(&[0, 0]).is_err());
    }

    #[test]
    fn truncated() {
        let bytes = encode(&[4], &[1, 2]);
        assert!(parse(&bytes).unwrap_err().contains("truncated payload"));

        let mut bytes = encode(&[2, 2], &[]);
        bytes.truncate(10);
        assert_eq!(parse(&bytes).unwrap_err(), "truncated header");
    }

    #[test]
    fn oversized_dimensions() {
        let bytes = encode(&[u32::MAX; 3], &[1, 2, 3]);
        assert_eq!(parse(&bytes).unwrap_err(), "dimension sizes overflow");
    }

    #[test]
    fn loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images.idx3-ubyte");
        let labels = dir.path().join("labels.idx1-ubyte");
        fs::write(&images, encode(&[2, 2, 2], &[0, 255, 51, 102, 1, 2, 3, 4])).unwrap();
        fs::write(&labels, encode(&[2], &[7, 3])).unwrap();

        let x = load_images(&images, false).unwrap();
        assert_eq!(x.dim(), (2, 4));
        assert_eq!(x.row(0).to_vec(), vec![0., 255., 51., 102.]);

        let x = load_images(&images, true).unwrap();
        assert_eq!(x[[0, 0]], 0.);
        assert_eq!(x[[0, 1]], 1.);
        assert!((x[[0, 2]] - 0.2).abs() < 1e-6);

        assert_eq!(load_labels(&labels).unwrap().to_vec(), vec![7, 3]);
    }

    #[test]
    fn wrong_dimensionality() {
        let dir = tempfile::tempdir().unwrap();
        let labels = dir.path().join("labels.idx1-ubyte");
        fs::write(&labels, encode(&[2], &[7, 3])).unwrap();

        let err = load_images(&labels, false).unwrap_err();
        assert!(matches!(err, RunErr::Idx { .. }));
    }
}
