//! Plain-text raster format
//!
//! Header lines of `key: value` pairs followed by one line of
//! whitespace-separated cells per row:
//!
//! ```text
//! rows: 2
//! cols: 3
//! null: *
//! 1 0 *
//! 0 1 1
//! ```
//!
//! `rows` and `cols` are required. `north`, `south`, `east`, `west`, `type`
//! and `multiplier` are accepted and ignored, since analysis is purely
//! index-based.

use crate::io::configuration::{NULL_TOKEN, OUTPUT_PRECISION};
use crate::io::error::{AnalysisError, Result};
use crate::io::raster::{CategoryRaster, RasterSink};
use ndarray::Array2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const IGNORED_KEYS: [&str; 6] = ["north", "south", "east", "west", "type", "multiplier"];

/// Load an ASCII grid from disk
///
/// # Errors
///
/// Returns an error if the file can't be read or isn't a valid grid
pub fn read_ascii_grid(path: &Path) -> Result<CategoryRaster> {
    let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::FileSystem {
        path: path.to_path_buf(),
        operation: "read raster",
        source: e,
    })?;
    parse_ascii_grid(&text, path)
}

/// Parse ASCII grid text; `path` is only used in error messages
///
/// # Errors
///
/// Returns an error if the header is incomplete, a cell isn't an integer
/// or the null token, or the cell count doesn't match `rows × cols`
pub fn parse_ascii_grid(text: &str, path: &Path) -> Result<CategoryRaster> {
    let parse_error = |line: usize, reason: String| AnalysisError::RasterParse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut rows = None;
    let mut cols = None;
    let mut null_token = NULL_TOKEN.to_string();
    let mut cells = Vec::new();
    let mut last_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        last_line = line_number;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if cells.is_empty() {
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim().to_ascii_lowercase();
                let value = value.trim();
                match key.as_str() {
                    "rows" => rows = Some(parse_dimension(value, line_number, &parse_error)?),
                    "cols" => cols = Some(parse_dimension(value, line_number, &parse_error)?),
                    "null" => null_token = value.to_string(),
                    other if IGNORED_KEYS.contains(&other) => {}
                    other => {
                        return Err(parse_error(line_number, format!("unknown header '{other}'")));
                    }
                }
                continue;
            }
        }

        for token in line.split_whitespace() {
            let cell = if token == null_token {
                None
            } else {
                Some(token.parse::<i32>().map_err(|e| {
                    parse_error(line_number, format!("invalid cell '{token}': {e}"))
                })?)
            };
            cells.push(cell);
        }
    }

    let rows = rows.ok_or_else(|| parse_error(last_line, "missing 'rows' header".into()))?;
    let cols = cols.ok_or_else(|| parse_error(last_line, "missing 'cols' header".into()))?;
    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| parse_error(last_line, format!("grid size {rows}x{cols} overflows")))?;
    let found = cells.len();
    if found != expected {
        return Err(parse_error(
            last_line,
            format!("expected {expected} cells for {rows}x{cols}, found {found}"),
        ));
    }
    let cells = Array2::from_shape_vec((rows, cols), cells)
        .map_err(|e| parse_error(last_line, format!("cannot shape {rows}x{cols} grid: {e}")))?;

    Ok(CategoryRaster::new(cells))
}

fn parse_dimension(
    value: &str,
    line: usize,
    parse_error: &impl Fn(usize, String) -> AnalysisError,
) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|e| parse_error(line, format!("invalid dimension '{value}': {e}")))
}

/// Streams result rows as an ASCII grid
pub struct AsciiGridWriter<W: Write> {
    out: W,
    path: PathBuf,
    dims: (usize, usize),
    next_row: usize,
}

impl AsciiGridWriter<BufWriter<File>> {
    /// Create the output file, including missing parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file can't be created
    pub fn create(path: &Path, dims: (usize, usize)) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AnalysisError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = File::create(path).map_err(|e| AnalysisError::FileSystem {
            path: path.to_path_buf(),
            operation: "create raster",
            source: e,
        })?;

        Self::new(BufWriter::new(file), path, dims)
    }
}

impl<W: Write> AsciiGridWriter<W> {
    /// Wrap a writer and emit the header; `path` labels errors
    ///
    /// # Errors
    ///
    /// Returns an error if the header can't be written
    pub fn new(out: W, path: &Path, dims: (usize, usize)) -> Result<Self> {
        let mut writer = Self {
            out,
            path: path.to_path_buf(),
            dims,
            next_row: 0,
        };
        let header = format!("rows: {}\ncols: {}\nnull: {NULL_TOKEN}\n", dims.0, dims.1);
        writer.write(header.as_bytes())?;
        Ok(writer)
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.out
            .write_all(bytes)
            .map_err(|e| AnalysisError::FileSystem {
                path: self.path.clone(),
                operation: "write raster",
                source: e,
            })
    }
}

impl<W: Write> RasterSink for AsciiGridWriter<W> {
    fn put_row(&mut self, row: usize, values: &[Option<f64>]) -> Result<()> {
        if row != self.next_row || row >= self.dims.0 {
            return Err(AnalysisError::RowOutOfRange {
                row,
                rows: self.dims.0,
            });
        }
        if values.len() != self.dims.1 {
            return Err(AnalysisError::DimensionMismatch {
                what: "output row",
                expected: (1, self.dims.1),
                found: (1, values.len()),
            });
        }

        let line = values
            .iter()
            .map(|value| {
                value.map_or_else(
                    || NULL_TOKEN.to_string(),
                    |v| format!("{v:.precision$}", precision = OUTPUT_PRECISION),
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        self.write(line.as_bytes())?;
        self.write(b"\n")?;
        self.next_row += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.next_row != self.dims.0 {
            return Err(AnalysisError::RowOutOfRange {
                row: self.next_row,
                rows: self.dims.0,
            });
        }
        self.out.flush().map_err(|e| AnalysisError::FileSystem {
            path: self.path.clone(),
            operation: "flush raster",
            source: e,
        })
    }
}
