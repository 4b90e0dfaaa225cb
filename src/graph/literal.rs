use crate::shape::{DType, StaticShape};

/// Backing buffer of a [`Literal`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralData {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

impl LiteralData {
    pub fn len(&self) -> usize {
        match self {
            LiteralData::F32(v) => v.len(),
            LiteralData::F64(v) => v.len(),
            LiteralData::I32(v) => v.len(),
            LiteralData::I64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            LiteralData::F32(_) => DType::F32,
            LiteralData::F64(_) => DType::F64,
            LiteralData::I32(_) => DType::I32,
            LiteralData::I64(_) => DType::I64,
        }
    }
}

/// An immutable constant tensor embedded in the IR.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    shape: StaticShape,
    data: LiteralData,
}

impl Literal {
    /// Pairs `data` with the given dimensions. The element type is taken from
    /// the buffer.
    pub fn new(lens: Vec<usize>, data: LiteralData) -> Self {
        debug_assert_eq!(
            lens.iter().product::<usize>(),
            data.len(),
            "literal buffer does not match its shape"
        );
        Self {
            shape: StaticShape::new(data.dtype(), lens),
            data,
        }
    }

    pub fn from_f32(lens: Vec<usize>, values: Vec<f32>) -> Self {
        Self::new(lens, LiteralData::F32(values))
    }

    pub fn from_i32(lens: Vec<usize>, values: Vec<i32>) -> Self {
        Self::new(lens, LiteralData::I32(values))
    }

    pub fn from_i64(lens: Vec<usize>, values: Vec<i64>) -> Self {
        Self::new(lens, LiteralData::I64(values))
    }

    pub fn shape(&self) -> &StaticShape {
        &self.shape
    }

    pub fn data(&self) -> &LiteralData {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The values widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match &self.data {
            LiteralData::F32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            LiteralData::F64(v) => v.clone(),
            LiteralData::I32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            LiteralData::I64(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }

    /// The values read as non-negative lengths; negative entries become 0 and
    /// floats are truncated.
    pub fn to_usize_vec(&self) -> Vec<usize> {
        match &self.data {
            LiteralData::I32(v) => v.iter().map(|&x| x.max(0) as usize).collect(),
            LiteralData::I64(v) => v.iter().map(|&x| x.max(0) as usize).collect(),
            _ => self
                .to_f64_vec()
                .into_iter()
                .map(|x| x.max(0.0) as usize)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_dtype_follows_buffer() {
        let lit = Literal::from_i64(vec![3], vec![1, 2, 3]);
        assert_eq!(lit.shape().dtype(), DType::I64);
        assert_eq!(lit.shape().lens(), &[3]);
        assert_eq!(lit.to_usize_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_to_f64_vec() {
        let lit = Literal::from_f32(vec![2], vec![1.5, 2.0]);
        assert_eq!(lit.to_f64_vec(), vec![1.5, 2.0]);
    }

    #[test]
    fn test_to_usize_vec_clamps_negative() {
        let lit = Literal::from_i32(vec![2], vec![-4, 7]);
        assert_eq!(lit.to_usize_vec(), vec![0, 7]);
    }

    #[test]
    fn test_empty_literal() {
        let lit = Literal::from_f32(vec![0], vec![]);
        assert!(lit.is_empty());
    }
}
