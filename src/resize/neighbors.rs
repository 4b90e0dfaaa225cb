//! Corner enumeration for multilinear interpolation.
//!
//! Every output element is surrounded by `2^rank` source points: per dimension
//! either the floor or the ceil of its continuous source coordinate. A corner
//! is identified by an integer whose bit `d` selects floor (0) or ceil (1) for
//! dimension `d`, so the last dimension owns the most significant bit.

use super::policy::{clamp_coord, CoordTransform, NearestMode};
use crate::error::{ResizeError, ResizeResult};
use crate::shape::StaticShape;

/// Floor/ceil source indices and interpolation weights of every output
/// element, per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborIndexTable {
    /// `corners[dim][bit][element]`
    corners: Vec<[Vec<usize>; 2]>,
    /// `deltas[dim][element]`, each in `[0, 1)`.
    deltas: Vec<Vec<f32>>,
    elements: usize,
}

impl NeighborIndexTable {
    /// Computes the table for resizing `in_lens` to `out_shape`.
    pub fn build(
        in_lens: &[usize],
        out_shape: &StaticShape,
        scales: &[f64],
        transform: CoordTransform,
    ) -> Self {
        let rank = out_shape.rank();
        let elements = out_shape.elements();
        let out_lens = out_shape.lens();
        let mut corners = vec![[vec![0usize; elements], vec![0usize; elements]]; rank];
        let mut deltas = vec![vec![0f32; elements]; rank];

        out_shape.for_each_index(|coords, e| {
            for d in 0..rank {
                let x = transform.apply(in_lens[d], out_lens[d], coords[d], scales[d]);
                let lo = NearestMode::Floor.apply(in_lens[d], x);
                let hi = NearestMode::Ceil.apply(in_lens[d], x);
                corners[d][0][e] = lo;
                corners[d][1][e] = hi;
                deltas[d][e] = (clamp_coord(in_lens[d], x) - lo as f64) as f32;
            }
        });

        Self {
            corners,
            deltas,
            elements,
        }
    }

    /// Builds a table from precomputed parts. Every inner vector must hold
    /// `elements` entries.
    pub fn from_parts(corners: Vec<[Vec<usize>; 2]>, deltas: Vec<Vec<f32>>, elements: usize) -> Self {
        debug_assert_eq!(corners.len(), deltas.len());
        Self {
            corners,
            deltas,
            elements,
        }
    }

    pub fn rank(&self) -> usize {
        self.corners.len()
    }

    /// Number of output elements.
    pub fn elements(&self) -> usize {
        self.elements
    }

    /// Source indices along `dim` for the floor (`bit == 0`) or ceil
    /// (`bit == 1`) corner.
    pub fn corner(&self, dim: usize, bit: usize) -> &[usize] {
        &self.corners[dim][bit]
    }

    pub fn delta(&self, dim: usize) -> &[f32] {
        &self.deltas[dim]
    }
}

/// Flat source offsets of every corner of every output element.
///
/// The result holds `2^rank` contiguous blocks of `table.elements()` offsets,
/// in ascending corner order. The blending step relies on this layout: the
/// upper half of the blocks are the ceil corners of the last dimension.
pub fn calc_neighbor_points(
    table: &NeighborIndexTable,
    in_shape: &StaticShape,
    op: &str,
) -> ResizeResult<Vec<usize>> {
    let n_bits = table.rank();
    if n_bits >= usize::BITS as usize {
        return Err(ResizeError::DimensionOverflow {
            op: op.to_string(),
            rank: n_bits,
            max: usize::BITS as usize,
        });
    }

    let m_elements = table.elements();
    let corners = 1usize << n_bits;
    let total = checked_len::<usize>(corners.checked_mul(m_elements), "neighbor table", op)?;
    let mut offsets = Vec::with_capacity(total);
    let mut indices = vec![0usize; n_bits];

    for v in 0..corners {
        for e in 0..m_elements {
            for (d, index) in indices.iter_mut().enumerate() {
                *index = table.corner(d, (v >> d) & 1)[e];
            }
            offsets.push(in_shape.index(&indices));
        }
    }

    Ok(offsets)
}

/// Validates an element count of `T` against the allocation limit of
/// `isize::MAX` bytes. `None` stands for an overflowed count.
pub(crate) fn checked_len<T>(
    count: Option<usize>,
    what: &'static str,
    op: &str,
) -> ResizeResult<usize> {
    let limit = isize::MAX as usize / std::mem::size_of::<T>().max(1);
    count
        .filter(|&n| n <= limit)
        .ok_or_else(|| ResizeError::TooManyElements {
            op: op.to_string(),
            what,
        })
}
