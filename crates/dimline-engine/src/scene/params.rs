use crate::paint::Rgb;

/// Visual parameters of an arrow, in pixels.
///
/// Negative sizes are not rejected; they flip the corresponding offsets and
/// produce a visibly wrong arrow.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArrowParameters {
    /// Full width of the shaft.
    pub shaft_pixel_width: f32,
    /// Clearance between the arrowhead base and the shaft's round cap.
    pub shaft_pixel_offset: f32,
    /// Full width of an arrowhead at its base.
    pub arrow_pixel_width: f32,
    /// Distance from an arrowhead tip to its base corners.
    pub arrow_pixel_height: f32,
    pub color: Rgb,
}

impl ArrowParameters {
    pub const DEFAULT: Self = Self {
        shaft_pixel_width: 10.0,
        shaft_pixel_offset: 3.0,
        arrow_pixel_width: 30.0,
        arrow_pixel_height: 50.0,
        color: Rgb::BLACK,
    };

    /// Overwrites the fields present in `patch`.
    pub fn apply(&mut self, patch: &ArrowParametersPatch) {
        if let Some(v) = patch.shaft_pixel_width {
            self.shaft_pixel_width = v;
        }
        if let Some(v) = patch.shaft_pixel_offset {
            self.shaft_pixel_offset = v;
        }
        if let Some(v) = patch.arrow_pixel_width {
            self.arrow_pixel_width = v;
        }
        if let Some(v) = patch.arrow_pixel_height {
            self.arrow_pixel_height = v;
        }
        if let Some(v) = patch.color {
            self.color = v;
        }
    }
}

impl Default for ArrowParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Partial [`ArrowParameters`]; absent fields keep their current value.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ArrowParametersPatch {
    pub shaft_pixel_width: Option<f32>,
    pub shaft_pixel_offset: Option<f32>,
    pub arrow_pixel_width: Option<f32>,
    pub arrow_pixel_height: Option<f32>,
    pub color: Option<Rgb>,
}

impl ArrowParametersPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shaft_pixel_width(mut self, v: f32) -> Self {
        self.shaft_pixel_width = Some(v);
        self
    }

    pub fn shaft_pixel_offset(mut self, v: f32) -> Self {
        self.shaft_pixel_offset = Some(v);
        self
    }

    pub fn arrow_pixel_width(mut self, v: f32) -> Self {
        self.arrow_pixel_width = Some(v);
        self
    }

    pub fn arrow_pixel_height(mut self, v: f32) -> Self {
        self.arrow_pixel_height = Some(v);
        self
    }

    pub fn color(mut self, v: Rgb) -> Self {
        self.color = Some(v);
        self
    }

    /// Returns `base` with this patch applied.
    pub fn merged_over(&self, mut base: ArrowParameters) -> ArrowParameters {
        base.apply(self);
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_yields_defaults() {
        assert_eq!(ArrowParametersPatch::new().merged_over(ArrowParameters::DEFAULT), ArrowParameters::default());
    }

    #[test]
    fn patch_overrides_only_given_fields() {
        let p = ArrowParametersPatch::new()
            .shaft_pixel_width(4.0)
            .color(Rgb::WHITE)
            .merged_over(ArrowParameters::DEFAULT);
        assert_eq!(p.shaft_pixel_width, 4.0);
        assert_eq!(p.color, Rgb::WHITE);
        assert_eq!(p.arrow_pixel_width, 30.0);
        assert_eq!(p.arrow_pixel_height, 50.0);
        assert_eq!(p.shaft_pixel_offset, 3.0);
    }
}
