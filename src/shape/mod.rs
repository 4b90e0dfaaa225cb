//! Tensor shapes as seen by the lowering.
//!
//! A [`Shape`] may contain dynamic dimensions ([`Expr::Var`]). Index arithmetic
//! only makes sense once every dimension is known, so it lives on
//! [`StaticShape`], obtained through [`Shape::as_static`] or
//! [`Shape::to_static`].

pub mod expr;

pub use expr::Expr;

/// Element type of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    F32,
    F64,
    I32,
    I64,
}

impl DType {
    /// Integer-typed scale/size arguments are read as explicit output sizes.
    pub fn is_integer(&self) -> bool {
        matches!(self, DType::I32 | DType::I64)
    }
}

/// Element type plus one [`Expr`] per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dtype: DType,
    dims: Vec<Expr>,
}

impl Shape {
    pub fn new(dtype: DType, dims: Vec<Expr>) -> Self {
        Self { dtype, dims }
    }

    /// A fully static shape.
    pub fn from_lens(dtype: DType, lens: &[usize]) -> Self {
        Self {
            dtype,
            dims: lens.iter().map(|&l| Expr::Const(l)).collect(),
        }
    }

    /// A rank-0 shape. Unset optional ONNX inputs show up with this shape.
    pub fn scalar(dtype: DType) -> Self {
        Self {
            dtype,
            dims: Vec::new(),
        }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn dims(&self) -> &[Expr] {
        &self.dims
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns true if any dimension is only known at run time.
    pub fn is_dynamic(&self) -> bool {
        self.dims.iter().any(|d| !d.is_const())
    }

    /// The static view of this shape, or `None` if a dimension is dynamic.
    pub fn as_static(&self) -> Option<StaticShape> {
        let lens = self
            .dims
            .iter()
            .map(Expr::as_const)
            .collect::<Option<Vec<_>>>()?;
        Some(StaticShape::new(self.dtype, lens))
    }

    /// Replaces every dynamic dimension with `fill`.
    pub fn to_static(&self, fill: usize) -> StaticShape {
        let lens = self
            .dims
            .iter()
            .map(|d| d.as_const().unwrap_or(fill))
            .collect();
        StaticShape::new(self.dtype, lens)
    }
}

impl From<StaticShape> for Shape {
    fn from(shape: StaticShape) -> Self {
        Shape::from_lens(shape.dtype, &shape.lens)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dims = self
            .dims
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{:?}[{}]", self.dtype, dims)
    }
}

/// A shape whose dimensions are all known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticShape {
    dtype: DType,
    lens: Vec<usize>,
    strides: Vec<usize>,
}

impl StaticShape {
    pub fn new(dtype: DType, lens: Vec<usize>) -> Self {
        let strides = row_major_strides(&lens);
        Self {
            dtype,
            lens,
            strides,
        }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn lens(&self) -> &[usize] {
        &self.lens
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rank(&self) -> usize {
        self.lens.len()
    }

    /// Total number of elements.
    pub fn elements(&self) -> usize {
        self.lens.iter().product()
    }

    /// Flat row-major offset of `coords`.
    pub fn index(&self, coords: &[usize]) -> usize {
        debug_assert_eq!(coords.len(), self.rank());
        coords
            .iter()
            .zip(&self.strides)
            .map(|(c, s)| c * s)
            .sum()
    }

    /// Calls `f(coords, flat_index)` for every element in row-major order.
    pub fn for_each_index<F>(&self, mut f: F)
    where
        F: FnMut(&[usize], usize),
    {
        let total = self.elements();
        let mut coords = vec![0usize; self.rank()];
        for flat in 0..total {
            f(&coords, flat);
            // odometer increment, last axis fastest
            for axis in (0..coords.len()).rev() {
                coords[axis] += 1;
                if coords[axis] < self.lens[axis] {
                    break;
                }
                coords[axis] = 0;
            }
        }
    }
}

fn row_major_strides(lens: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; lens.len()];
    for i in (0..lens.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * lens[i + 1];
    }
    strides
}
