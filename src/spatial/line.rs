//! Integer line rasterization between two grid cells
//!
//! Bresenham stepping along the dominant axis. Steep lines are walked with
//! rows and columns transposed and transposed back on output, and endpoints
//! are ordered along the dominant axis before stepping, so the walk from
//! `a` to `b` visits the same cells as the walk from `b` to `a`.

use std::iter::FusedIterator;

/// Iterator over the cells of a rasterized segment, endpoints included
#[derive(Debug, Clone)]
pub struct LineCells {
    steep: bool,
    major: i64,
    major_end: i64,
    minor: i64,
    minor_step: i64,
    delta_major: i64,
    delta_minor: i64,
    error: i64,
    done: bool,
}

/// Rasterize the segment between two `[row, col]` cells
///
/// Always succeeds; identical endpoints yield a single cell.
pub fn rasterize_line(from: [i64; 2], to: [i64; 2]) -> LineCells {
    let [mut r1, mut c1] = from;
    let [mut r2, mut c2] = to;

    // Columns are the natural x axis; a line is steep when it moves more in rows
    let steep = (r2 - r1).abs() > (c2 - c1).abs();
    if steep {
        std::mem::swap(&mut r1, &mut c1);
        std::mem::swap(&mut r2, &mut c2);
    }
    if c1 > c2 {
        std::mem::swap(&mut c1, &mut c2);
        std::mem::swap(&mut r1, &mut r2);
    }

    let delta_major = c2 - c1;
    LineCells {
        steep,
        major: c1,
        major_end: c2,
        minor: r1,
        minor_step: if r1 < r2 { 1 } else { -1 },
        delta_major,
        delta_minor: (r2 - r1).abs(),
        error: delta_major / 2,
        done: false,
    }
}

impl Iterator for LineCells {
    type Item = [i64; 2];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let cell = if self.steep {
            [self.major, self.minor]
        } else {
            [self.minor, self.major]
        };

        if self.major == self.major_end {
            self.done = true;
        } else {
            self.major += 1;
            self.error -= self.delta_minor;
            if self.error < 0 {
                self.minor += self.minor_step;
                self.error += self.delta_major;
            }
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            (self.major_end - self.major + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LineCells {}

impl FusedIterator for LineCells {}
