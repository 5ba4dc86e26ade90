//! Text persistence of weight matrices.
//!
//! Each matrix is stored in its own file, one row per line, with values separated by a single
//! space. Values are written in Rust's shortest round-trip scientific notation, so reading a
//! file back yields the exact same `f32`s.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use ndarray::{Array2, ArrayView2};

use crate::{MlErr, Result, arch::Network, arch::activations::ActFn};

/// Returns the path of the weights between layer `i` and `i + 1` of a network with the given
/// hidden activation. Layers are numbered from one in file names.
pub fn weights_path(dir: &Path, act_fn: ActFn, i: usize) -> PathBuf {
    dir.join(format!("weights_{}_{}", act_fn.name(), i + 1))
}

/// Writes `m` as whitespace delimited text.
pub fn write_matrix<W: Write>(mut writer: W, m: ArrayView2<f32>) -> Result<()> {
    for row in m.rows() {
        let line: Vec<_> = row.iter().map(|v| format!("{v:e}")).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }

    writer.flush()?;
    Ok(())
}

/// Reads a matrix written by `write_matrix`. Blank lines are skipped.
///
/// # Returns
/// The matrix or a `MalformedMatrix` error naming the 1-based line at fault.
pub fn read_matrix<R: BufRead>(reader: R) -> Result<Array2<f32>> {
    let mut values = Vec::new();
    let mut ncols = None;
    let mut nrows = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|v| v.parse::<f32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| MlErr::MalformedMatrix {
                line: i + 1,
                msg: e.to_string(),
            })?;

        match ncols {
            None => ncols = Some(row.len()),
            Some(n) if n != row.len() => {
                return Err(MlErr::MalformedMatrix {
                    line: i + 1,
                    msg: format!("expected {n} values, got {}", row.len()),
                });
            }
            Some(_) => {}
        }

        values.extend(row);
        nrows += 1;
    }

    let Some(ncols) = ncols else {
        return Err(MlErr::MalformedMatrix {
            line: 0,
            msg: "no rows".into(),
        });
    };

    Ok(Array2::from_shape_vec((nrows, ncols), values)?)
}

/// Writes every weight matrix of `network` into `dir`, creating it if needed.
pub fn save_weights(network: &Network, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    for (i, weights) in network.all_weights().enumerate() {
        let file = File::create(weights_path(dir, network.act_fn(), i))?;
        write_matrix(BufWriter::new(file), weights)?;
    }

    Ok(())
}

/// Reads the `num_links` weight matrices saved for a network with the given activation.
pub fn load_weights(dir: &Path, act_fn: ActFn, num_links: usize) -> Result<Vec<Array2<f32>>> {
    (0..num_links)
        .map(|i| {
            let file = File::open(weights_path(dir, act_fn, i))?;
            read_matrix(BufReader::new(file))
        })
        .collect()
}
