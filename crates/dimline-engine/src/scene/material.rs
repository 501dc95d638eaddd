use glam::{Mat4, Vec2, Vec3};

use crate::coords::Resolution;
use crate::paint::Rgb;
use crate::scene::shapes::arrowhead::ArrowheadCmd;
use crate::scene::shapes::shaft::ShaftCmd;
use crate::scene::{ArrowParameters, DrawCmd};

/// Partial update pushed into a [`Material`] before each draw.
///
/// Every field is optional; absent fields leave the previous value in place.
/// `width`/`height` additionally ignore zero, which is what a minimized
/// window reports.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct MaterialUpdate {
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Anchored endpoint.
    pub start: Option<Vec3>,
    /// Opposite endpoint.
    pub end: Option<Vec3>,
    pub shaft_pixel_width: Option<f32>,
    pub shaft_pixel_offset: Option<f32>,
    pub arrow_pixel_width: Option<f32>,
    pub arrow_pixel_height: Option<f32>,
    pub color: Option<Rgb>,
}

impl MaterialUpdate {
    /// Update carrying every field of `params`.
    pub fn from_parameters(params: &ArrowParameters) -> Self {
        Self {
            shaft_pixel_width: Some(params.shaft_pixel_width),
            shaft_pixel_offset: Some(params.shaft_pixel_offset),
            arrow_pixel_width: Some(params.arrow_pixel_width),
            arrow_pixel_height: Some(params.arrow_pixel_height),
            color: Some(params.color),
            ..Self::default()
        }
    }

    pub fn with_viewport(mut self, viewport: Option<Resolution>) -> Self {
        if let Some(v) = viewport {
            self.width = Some(v.width);
            self.height = Some(v.height);
        }
        self
    }

    pub fn with_endpoints(mut self, start: Vec3, end: Vec3) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

/// Shader parameters of one shaft instance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShaftMaterial {
    pub resolution: Resolution,
    pub start: Vec3,
    pub end: Vec3,
    pub shaft_pixel_width: f32,
    pub shaft_pixel_offset: f32,
    /// Needed to place the cap against the arrowhead's curved base.
    pub arrow_pixel_size: Vec2,
    pub color: Rgb,
}

impl Default for ShaftMaterial {
    fn default() -> Self {
        let p = ArrowParameters::DEFAULT;
        Self {
            resolution: Resolution::default(),
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            shaft_pixel_width: p.shaft_pixel_width,
            shaft_pixel_offset: p.shaft_pixel_offset,
            arrow_pixel_size: Vec2::new(p.arrow_pixel_width, p.arrow_pixel_height),
            color: p.color,
        }
    }
}

impl ShaftMaterial {
    pub fn update(&mut self, u: &MaterialUpdate) -> &mut Self {
        self.resolution = self.resolution.merged(u.width, u.height);
        if let Some(v) = u.start {
            self.start = v;
        }
        if let Some(v) = u.end {
            self.end = v;
        }
        if let Some(v) = u.shaft_pixel_width {
            self.shaft_pixel_width = v;
        }
        if let Some(v) = u.shaft_pixel_offset {
            self.shaft_pixel_offset = v;
        }
        if let Some(v) = u.arrow_pixel_width {
            self.arrow_pixel_size.x = v;
        }
        if let Some(v) = u.arrow_pixel_height {
            self.arrow_pixel_size.y = v;
        }
        if let Some(v) = u.color {
            self.color = v;
        }
        self
    }

    pub fn snapshot(&self, view_proj: Mat4, model: Mat4) -> ShaftCmd {
        ShaftCmd {
            view_proj,
            model,
            anchor: self.start,
            far: self.end,
            resolution: self.resolution,
            width: self.shaft_pixel_width,
            offset: self.shaft_pixel_offset,
            arrow_size: self.arrow_pixel_size,
            color: self.color,
        }
    }
}

/// Shader parameters of one arrowhead instance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArrowheadMaterial {
    pub resolution: Resolution,
    pub start: Vec3,
    pub end: Vec3,
    pub arrow_pixel_size: Vec2,
    pub color: Rgb,
}

impl Default for ArrowheadMaterial {
    fn default() -> Self {
        let p = ArrowParameters::DEFAULT;
        Self {
            resolution: Resolution::default(),
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            arrow_pixel_size: Vec2::new(p.arrow_pixel_width, p.arrow_pixel_height),
            color: p.color,
        }
    }
}

impl ArrowheadMaterial {
    /// Shaft-only fields in `u` are ignored.
    pub fn update(&mut self, u: &MaterialUpdate) -> &mut Self {
        self.resolution = self.resolution.merged(u.width, u.height);
        if let Some(v) = u.start {
            self.start = v;
        }
        if let Some(v) = u.end {
            self.end = v;
        }
        if let Some(v) = u.arrow_pixel_width {
            self.arrow_pixel_size.x = v;
        }
        if let Some(v) = u.arrow_pixel_height {
            self.arrow_pixel_size.y = v;
        }
        if let Some(v) = u.color {
            self.color = v;
        }
        self
    }

    pub fn snapshot(&self, view_proj: Mat4, model: Mat4) -> ArrowheadCmd {
        ArrowheadCmd {
            view_proj,
            model,
            anchor: self.start,
            far: self.end,
            resolution: self.resolution,
            size: self.arrow_pixel_size,
            color: self.color,
        }
    }
}

/// Per-renderable shader parameter set.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Material {
    Shaft(ShaftMaterial),
    Arrowhead(ArrowheadMaterial),
}

impl Material {
    pub fn update(&mut self, u: &MaterialUpdate) {
        match self {
            Material::Shaft(m) => {
                m.update(u);
            }
            Material::Arrowhead(m) => {
                m.update(u);
            }
        }
    }

    pub fn resolution(&self) -> Resolution {
        match self {
            Material::Shaft(m) => m.resolution,
            Material::Arrowhead(m) => m.resolution,
        }
    }

    /// Freezes the current values into a draw command.
    pub fn snapshot(&self, view_proj: Mat4, model: Mat4) -> DrawCmd {
        match self {
            Material::Shaft(m) => DrawCmd::Shaft(m.snapshot(view_proj, model)),
            Material::Arrowhead(m) => DrawCmd::Arrowhead(m.snapshot(view_proj, model)),
        }
    }
}
