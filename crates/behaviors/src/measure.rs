/// Measures the height a textarea's content needs once its own height is reset.
pub trait ContentMeasurer {
    fn content_height(&self, value: &str) -> f32;
}

impl<F> ContentMeasurer for F
where
    F: Fn(&str) -> f32,
{
    fn content_height(&self, value: &str) -> f32 {
        self(value)
    }
}

/// Fixed line height, no wrapping: `lines * line_height + vertical_padding`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMeasurer {
    pub line_height: f32,
    pub vertical_padding: f32,
}

impl Default for LineMeasurer {
    fn default() -> Self {
        // 14px monospace at line-height 1.5, 12px padding top and bottom.
        Self {
            line_height: 21.0,
            vertical_padding: 24.0,
        }
    }
}

impl ContentMeasurer for LineMeasurer {
    fn content_height(&self, value: &str) -> f32 {
        let lines = value.split('\n').count().max(1);
        lines as f32 * self.line_height + self.vertical_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_including_trailing_empty_one() {
        let m = LineMeasurer::default();
        assert_eq!(m.content_height(""), 45.0);
        assert_eq!(m.content_height("a"), 45.0);
        assert_eq!(m.content_height("a\nb\n"), 3.0 * 21.0 + 24.0);
    }

    #[test]
    fn closures_are_measurers() {
        let fixed = |_: &str| 480.0_f32;
        assert_eq!(fixed.content_height("anything"), 480.0);
    }
}
