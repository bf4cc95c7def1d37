/// Selection as a byte range over a control's value, normalized so `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SelectionRange {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl SelectionRange {
    #[inline]
    pub(crate) fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// The selected text. Panics if the range is not on char boundaries of `value`.
    #[inline]
    pub(crate) fn slice<'a>(&self, value: &'a str) -> &'a str {
        &value[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_and_slices() {
        let range = SelectionRange::new(5, 0);
        assert_eq!((range.start, range.end), (0, 5));
        assert_eq!(range.slice("hello world"), "hello");
        assert_eq!(SelectionRange::new(3, 3).slice("hello"), "");
    }
}
