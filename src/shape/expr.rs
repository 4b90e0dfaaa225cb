/// A single dimension of a tensor shape.
///
/// `Const` dimensions are known while lowering; `Var` dimensions are only
/// resolved when the graph runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Const(usize),
    Var(String),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{c}"),
            Expr::Var(v) => write!(f, "{v}"),
        }
    }
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Self::Var(name.to_string())
    }

    pub fn as_const(&self) -> Option<usize> {
        match self {
            Expr::Const(c) => Some(*c),
            Expr::Var(_) => None,
        }
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }
}

impl From<usize> for Expr {
    fn from(value: usize) -> Self {
        Expr::Const(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::var(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Expr::Const(4), "4")]
    #[case(Expr::var("batch"), "batch")]
    fn test_display(#[case] expr: Expr, #[case] expected: &str) {
        assert_eq!(expr.to_string(), expected);
    }

    #[test]
    fn test_as_const() {
        assert_eq!(Expr::from(3usize).as_const(), Some(3));
        assert_eq!(Expr::from("n").as_const(), None);
        assert!(!Expr::var("n").is_const());
    }
}
