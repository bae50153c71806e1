/// A location in the source buffer, resolved lazily from a byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub index: usize,
}

impl Location {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// 1-based line and column for this location within `source`.
    pub fn line_column(&self, source: &str) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;
        for ch in source[..self.index.min(source.len())].chars() {
            if ch == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_line_and_column() {
        let src = "int x;\nint y;\n";
        assert_eq!(Location::new(0).line_column(src), (1, 1));
        assert_eq!(Location::new(7).line_column(src), (2, 1));
        assert_eq!(Location::new(11).line_column(src), (2, 5));
    }
}
