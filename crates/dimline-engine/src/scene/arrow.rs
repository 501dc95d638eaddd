use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::coords::Resolution;
use crate::geometry::{anchored_transform, segment_direction};

use super::{
    ArrowError, ArrowParameters, ArrowParametersPatch, ArrowheadMaterial, DrawCmd, DrawList,
    FrameView, Material, MaterialUpdate, SceneNode, ShaftMaterial,
};

/// The four renderables of an arrow.
///
/// End parts are anchored at `end` and see the endpoints swapped, so each one
/// builds its own joint without knowing about the other half.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ArrowPart {
    StartShaft,
    EndShaft,
    StartArrowhead,
    EndArrowhead,
}

impl ArrowPart {
    /// Submission order.
    pub const ALL: [ArrowPart; 4] = [
        ArrowPart::StartShaft,
        ArrowPart::EndShaft,
        ArrowPart::StartArrowhead,
        ArrowPart::EndArrowhead,
    ];

    #[inline]
    pub fn is_start(self) -> bool {
        matches!(self, ArrowPart::StartShaft | ArrowPart::StartArrowhead)
    }

    #[inline]
    pub fn is_shaft(self) -> bool {
        matches!(self, ArrowPart::StartShaft | ArrowPart::EndShaft)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// One drawable unit: coarse model transform + its own shader parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    part: ArrowPart,
    model: Mat4,
    material: Material,
}

impl Renderable {
    fn new(part: ArrowPart) -> Self {
        let material = if part.is_shaft() {
            Material::Shaft(ShaftMaterial::default())
        } else {
            Material::Arrowhead(ArrowheadMaterial::default())
        };
        Self { part, model: Mat4::IDENTITY, material }
    }

    #[inline]
    pub fn part(&self) -> ArrowPart {
        self.part
    }

    #[inline]
    pub fn model(&self) -> Mat4 {
        self.model
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }
}

/// Double-headed dimensioning arrow between two world-space points.
///
/// Lifecycle: construct, mutate endpoints or parameters any number of times,
/// drop. Every frame the host refreshes each part right before drawing it,
/// either one at a time through [`refresh`](Self::refresh) or all four through
/// [`SceneNode::record`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowEntity {
    start: Vec3,
    end: Vec3,
    parameters: ArrowParameters,
    renderables: [Renderable; 4],
}

impl ArrowEntity {
    /// Builds an arrow from `start` to `end`, with `patch` merged over
    /// [`ArrowParameters::DEFAULT`].
    ///
    /// `initial_resolution` seeds every renderable so later refreshes may omit
    /// the viewport.
    pub fn new(
        start: Vec3,
        end: Vec3,
        patch: ArrowParametersPatch,
        initial_resolution: Resolution,
    ) -> Result<Self, ArrowError> {
        if !initial_resolution.is_valid() {
            return Err(ArrowError::NotInitialized);
        }
        let (direction, length) = checked_direction(start, end)?;

        let mut arrow = Self {
            start,
            end,
            parameters: patch.merged_over(ArrowParameters::DEFAULT),
            renderables: ArrowPart::ALL.map(Renderable::new),
        };
        arrow.update_transforms(direction, length);
        for part in ArrowPart::ALL {
            arrow.push_parameters(part, Some(initial_resolution));
        }

        log::debug!("arrow created: {start} -> {end} ({length:.3} units)");
        Ok(arrow)
    }

    #[inline]
    pub fn start(&self) -> Vec3 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Moves both endpoints and recomputes the coarse transforms.
    ///
    /// A degenerate segment is rejected and the arrow is left untouched.
    pub fn set_endpoints(&mut self, start: Vec3, end: Vec3) -> Result<(), ArrowError> {
        let (direction, length) = checked_direction(start, end).inspect_err(|e| {
            log::warn!("rejected arrow endpoints: {e}");
        })?;
        self.start = start;
        self.end = end;
        self.update_transforms(direction, length);
        Ok(())
    }

    #[inline]
    pub fn parameters(&self) -> &ArrowParameters {
        &self.parameters
    }

    /// Direct access to the parameters; changes show up on the next refresh.
    #[inline]
    pub fn parameters_mut(&mut self) -> &mut ArrowParameters {
        &mut self.parameters
    }

    pub fn set_parameters(&mut self, parameters: ArrowParameters) {
        self.parameters = parameters;
    }

    pub fn apply_parameters(&mut self, patch: &ArrowParametersPatch) {
        self.parameters.apply(patch);
    }

    #[inline]
    pub fn renderable(&self, part: ArrowPart) -> &Renderable {
        &self.renderables[part.index()]
    }

    #[inline]
    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    /// Pre-draw hook for one part.
    ///
    /// Pushes the viewport (if any), the part's endpoint pair and the current
    /// parameters into its material, then freezes the result.
    pub fn refresh(
        &mut self,
        part: ArrowPart,
        viewport: Option<Resolution>,
        camera: &dyn Camera,
    ) -> DrawCmd {
        self.push_parameters(part, viewport);
        let r = &self.renderables[part.index()];
        r.material.snapshot(camera.view_projection_matrix(), r.model)
    }

    fn push_parameters(&mut self, part: ArrowPart, viewport: Option<Resolution>) {
        let (anchor, far) = if part.is_start() {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        let update = MaterialUpdate::from_parameters(&self.parameters)
            .with_viewport(viewport)
            .with_endpoints(anchor, far);
        self.renderables[part.index()].material.update(&update);
    }

    fn update_transforms(&mut self, direction: Vec3, length: f32) {
        for r in &mut self.renderables {
            r.model = match r.part {
                ArrowPart::StartShaft => anchored_transform(self.start, direction, length),
                ArrowPart::EndShaft => anchored_transform(self.end, -direction, length),
                ArrowPart::StartArrowhead => anchored_transform(self.start, direction, 1.0),
                ArrowPart::EndArrowhead => anchored_transform(self.end, -direction, 1.0),
            };
        }
    }
}

impl SceneNode for ArrowEntity {
    fn record(&mut self, view: &FrameView<'_>, list: &mut DrawList) {
        for part in ArrowPart::ALL {
            let cmd = self.refresh(part, view.viewport, view.camera);
            list.push(part, cmd);
        }
    }
}

fn checked_direction(start: Vec3, end: Vec3) -> Result<(Vec3, f32), ArrowError> {
    segment_direction(start, end).ok_or(ArrowError::InvalidGeometry { start, end })
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec4};

    use super::*;
    use crate::camera::LookAtCamera;
    use crate::paint::Rgb;
    use crate::geometry::{CANONICAL_AXIS, joint_inset, ndc, ndc_to_pixel};

    const RES: Resolution = Resolution::new(800.0, 600.0);

    fn assert_close(a: f32, b: f32, tol: f32) {
        assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
    }

    fn assert_close2(a: Vec2, b: Vec2, tol: f32) {
        assert!((a - b).length() <= tol, "{a:?} != {b:?} (tol {tol})");
    }

    fn clip_to_pixel(clip: Vec4, res: Resolution) -> Vec2 {
        ndc_to_pixel(ndc(clip), res)
    }

    /// Orthographic framing of `x in [-0.5, 1.5]`, `y in [-0.75, 0.75]` on a 4:3 target.
    fn ortho_camera(res: Resolution) -> LookAtCamera {
        LookAtCamera::orthographic(0.75, res.aspect_ratio(), 0.1, 100.0).looking_at(
            Vec3::new(0.5, 0.0, 5.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::Y,
        )
    }

    fn perspective_camera(res: Resolution, distance: f32) -> LookAtCamera {
        LookAtCamera::perspective(60.0, res.aspect_ratio(), 0.1, 10_000.0).looking_at(
            Vec3::new(0.5, 0.3, distance),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::Y,
        )
    }

    fn unit_arrow(patch: ArrowParametersPatch) -> ArrowEntity {
        ArrowEntity::new(Vec3::ZERO, Vec3::X, patch, RES).unwrap()
    }

    fn shaft_pixel_width(cmd: &DrawCmd, res: Resolution) -> f32 {
        let a = clip_to_pixel(cmd.vertex(Vec2::new(-1.0, 0.0)).clip, res);
        let b = clip_to_pixel(cmd.vertex(Vec2::new(1.0, 0.0)).clip, res);
        (a - b).length()
    }

    fn arrowhead_footprint(cmd: &DrawCmd, res: Resolution) -> (f32, f32) {
        let left = clip_to_pixel(cmd.vertex(Vec2::new(-1.0, 1.0)).clip, res);
        let right = clip_to_pixel(cmd.vertex(Vec2::new(1.0, 1.0)).clip, res);
        let tip = clip_to_pixel(cmd.vertex(Vec2::new(0.0, 0.0)).clip, res);
        let base = clip_to_pixel(cmd.vertex(Vec2::new(0.0, 1.0)).clip, res);
        ((left - right).length(), (tip - base).length())
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn degenerate_segment_is_rejected() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let err = ArrowEntity::new(p, p, ArrowParametersPatch::new(), RES).unwrap_err();
        assert_eq!(err, ArrowError::InvalidGeometry { start: p, end: p });
    }

    #[test]
    fn missing_resolution_is_not_initialized() {
        let err = ArrowEntity::new(Vec3::ZERO, Vec3::X, ArrowParametersPatch::new(), Resolution::default())
            .unwrap_err();
        assert_eq!(err, ArrowError::NotInitialized);
    }

    #[test]
    fn degenerate_update_leaves_arrow_untouched() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let before = arrow.clone();
        let p = Vec3::splat(4.0);
        assert!(matches!(arrow.set_endpoints(p, p), Err(ArrowError::InvalidGeometry { .. })));
        assert_eq!(arrow, before);
    }

    #[test]
    fn arrow_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ArrowEntity>();
    }

    #[test]
    fn endpoints_are_copied() {
        let mut start = Vec3::ZERO;
        let arrow = ArrowEntity::new(start, Vec3::X, ArrowParametersPatch::new(), RES).unwrap();
        start.x = 10.0;
        assert_eq!(arrow.start(), Vec3::ZERO);
        assert_ne!(arrow.start(), start);
    }

    // ── coarse transforms ─────────────────────────────────────────────────

    #[test]
    fn shaft_transforms_span_the_segment() {
        let start = Vec3::new(1.0, -2.0, 0.5);
        let end = Vec3::new(-3.0, 4.0, 2.0);
        let arrow = ArrowEntity::new(start, end, ArrowParametersPatch::new(), RES).unwrap();

        let m = arrow.renderable(ArrowPart::StartShaft).model();
        assert!((m.transform_point3(Vec3::ZERO) - start).length() < 1e-4);
        assert!((m.transform_point3(CANONICAL_AXIS) - end).length() < 1e-4);

        let m = arrow.renderable(ArrowPart::EndShaft).model();
        assert!((m.transform_point3(Vec3::ZERO) - end).length() < 1e-4);
        assert!((m.transform_point3(CANONICAL_AXIS) - start).length() < 1e-4);
    }

    #[test]
    fn arrowhead_transforms_point_outward() {
        let arrow = unit_arrow(ArrowParametersPatch::new());
        let m = arrow.renderable(ArrowPart::StartArrowhead).model();
        assert!((m.transform_point3(Vec3::ZERO) - Vec3::ZERO).length() < 1e-5);
        assert!((m.transform_vector3(CANONICAL_AXIS) - Vec3::X).length() < 1e-5);

        let m = arrow.renderable(ArrowPart::EndArrowhead).model();
        assert!((m.transform_point3(Vec3::ZERO) - Vec3::X).length() < 1e-5);
        assert!((m.transform_vector3(CANONICAL_AXIS) - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn set_endpoints_recomputes_transforms() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        arrow.set_endpoints(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 5.0)).unwrap();
        let m = arrow.renderable(ArrowPart::StartShaft).model();
        assert!((m.transform_point3(CANONICAL_AXIS) - Vec3::new(0.0, 1.0, 5.0)).length() < 1e-4);

        assert_eq!(arrow.renderables().len(), 4);
        for r in arrow.renderables() {
            let anchor = if r.part().is_start() { arrow.start() } else { arrow.end() };
            assert!((r.model().transform_point3(Vec3::ZERO) - anchor).length() < 1e-4);
        }
    }

    // ── reference scenario ────────────────────────────────────────────────

    #[test]
    fn reference_scenario_800x600() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cam = ortho_camera(RES);

        let start_shaft = arrow.refresh(ArrowPart::StartShaft, Some(RES), &cam);
        let end_shaft = arrow.refresh(ArrowPart::EndShaft, Some(RES), &cam);

        // Halves meet at the screen midpoint and together span the segment.
        assert_close2(start_shaft.vertex(Vec2::new(0.0, 0.0)).pixel, Vec2::new(200.0, 300.0), 1e-3);
        assert_close2(start_shaft.vertex(Vec2::new(0.0, 1.0)).pixel, Vec2::new(400.0, 300.0), 1e-3);
        assert_close2(end_shaft.vertex(Vec2::new(0.0, 0.0)).pixel, Vec2::new(600.0, 300.0), 1e-3);
        assert_close2(end_shaft.vertex(Vec2::new(0.0, 1.0)).pixel, Vec2::new(400.0, 300.0), 1e-3);

        assert_close(shaft_pixel_width(&start_shaft, RES), 10.0, 1e-3);
        assert_close(shaft_pixel_width(&end_shaft, RES), 10.0, 1e-3);

        for part in [ArrowPart::StartArrowhead, ArrowPart::EndArrowhead] {
            let cmd = arrow.refresh(part, Some(RES), &cam);
            let (w, h) = arrowhead_footprint(&cmd, RES);
            assert_close(w, 30.0, 1e-3);
            assert_close(h, 50.0, 1e-3);
        }

        let start_head = arrow.refresh(ArrowPart::StartArrowhead, Some(RES), &cam);
        let end_head = arrow.refresh(ArrowPart::EndArrowhead, Some(RES), &cam);
        // Tips on the endpoints, bodies inside the segment.
        assert_close2(start_head.vertex(Vec2::ZERO).pixel, Vec2::new(200.0, 300.0), 1e-3);
        assert_close2(start_head.vertex(Vec2::new(0.0, 1.0)).pixel, Vec2::new(250.0, 300.0), 1e-3);
        assert_close2(end_head.vertex(Vec2::ZERO).pixel, Vec2::new(600.0, 300.0), 1e-3);
        assert_close2(end_head.vertex(Vec2::new(0.0, 1.0)).pixel, Vec2::new(550.0, 300.0), 1e-3);
        assert!(start_head.covers(Vec2::new(210.0, 300.0)));
        assert!(!start_head.covers(Vec2::new(190.0, 300.0)));
        assert!(end_head.covers(Vec2::new(590.0, 300.0)));
        assert!(!end_head.covers(Vec2::new(610.0, 300.0)));
    }

    #[test]
    fn doubled_resolution_keeps_pixel_sizes() {
        let hi = Resolution::new(1600.0, 1200.0);
        let mut lo_arrow = unit_arrow(ArrowParametersPatch::new());
        let mut hi_arrow = ArrowEntity::new(Vec3::ZERO, Vec3::X, ArrowParametersPatch::new(), hi).unwrap();

        for part in ArrowPart::ALL {
            assert_eq!(lo_arrow.renderable(part).model(), hi_arrow.renderable(part).model());
        }

        let lo = lo_arrow.refresh(ArrowPart::StartShaft, Some(RES), &ortho_camera(RES));
        let hi_cmd = hi_arrow.refresh(ArrowPart::StartShaft, Some(hi), &ortho_camera(hi));
        assert_close(shaft_pixel_width(&lo, RES), 10.0, 1e-3);
        assert_close(shaft_pixel_width(&hi_cmd, hi), 10.0, 1e-3);

        let half = |cmd: &DrawCmd| {
            (cmd.vertex(Vec2::new(0.0, 1.0)).pixel - cmd.vertex(Vec2::ZERO).pixel).length()
        };
        assert_close(half(&lo), 200.0, 1e-2);
        assert_close(half(&hi_cmd), 400.0, 1e-2);
    }

    // ── pixel-size invariance ─────────────────────────────────────────────

    #[test]
    fn shaft_width_is_invariant_to_camera_distance() {
        for res in [RES, Resolution::new(1920.0, 1080.0), Resolution::new(300.0, 900.0)] {
            let mut arrow = ArrowEntity::new(Vec3::ZERO, Vec3::X, ArrowParametersPatch::new(), res).unwrap();
            for distance in [1.0, 2.5, 10.0, 50.0, 100.0, 400.0, 1000.0] {
                let cam = perspective_camera(res, distance);
                for part in [ArrowPart::StartShaft, ArrowPart::EndShaft] {
                    let cmd = arrow.refresh(part, Some(res), &cam);
                    assert_close(shaft_pixel_width(&cmd, res), 10.0, 1e-2);
                    // Also at the far end of the half quad, which sits at a different depth.
                    let a = clip_to_pixel(cmd.vertex(Vec2::new(-1.0, 1.0)).clip, res);
                    let b = clip_to_pixel(cmd.vertex(Vec2::new(1.0, 1.0)).clip, res);
                    assert_close((a - b).length(), 10.0, 1e-2);
                }
            }
        }
    }

    #[test]
    fn arrowhead_footprint_is_invariant_to_distance_and_aspect() {
        for res in [RES, Resolution::new(1920.0, 1080.0), Resolution::new(300.0, 900.0)] {
            let mut arrow = ArrowEntity::new(Vec3::ZERO, Vec3::X, ArrowParametersPatch::new(), res).unwrap();
            for distance in [1.0, 10.0, 100.0, 1000.0] {
                let cam = perspective_camera(res, distance);
                for part in [ArrowPart::StartArrowhead, ArrowPart::EndArrowhead] {
                    let cmd = arrow.refresh(part, Some(res), &cam);
                    let (w, h) = arrowhead_footprint(&cmd, res);
                    assert_close(w, 30.0, 1e-2);
                    assert_close(h, 50.0, 1e-2);
                }
            }
        }
    }

    #[test]
    fn vertex_pixel_matches_clip_position() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cam = perspective_camera(RES, 3.0);
        for part in ArrowPart::ALL {
            let cmd = arrow.refresh(part, Some(RES), &cam);
            for local in [Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0)] {
                let v = cmd.vertex(local);
                assert_close2(clip_to_pixel(v.clip, RES), v.pixel, 1e-2);
            }
        }
    }

    // ── joint ─────────────────────────────────────────────────────────────

    fn frame(arrow: &mut ArrowEntity) -> Vec<DrawCmd> {
        let cam = ortho_camera(RES);
        ArrowPart::ALL.map(|part| arrow.refresh(part, Some(RES), &cam)).to_vec()
    }

    #[test]
    fn shaft_and_arrowhead_never_overlap() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cmds = frame(&mut arrow);
        let (shafts, heads) = cmds.split_at(2);

        let mut shaft_pixels = 0;
        let mut head_pixels = 0;
        for ix in 0..=520 {
            for iy in 0..=120 {
                let p = Vec2::new(180.0 + ix as f32 * 0.5, 270.0 + iy as f32 * 0.5);
                let shaft = shafts.iter().any(|c| c.covers(p));
                let head = heads.iter().any(|c| c.covers(p));
                assert!(!(shaft && head), "pixel {p:?} drawn by shaft and arrowhead");
                shaft_pixels += shaft as u32;
                head_pixels += head as u32;
            }
        }
        assert!(shaft_pixels > 0);
        assert!(head_pixels > 0);
    }

    #[test]
    fn shaft_halves_do_not_overlap() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cmds = frame(&mut arrow);
        for ix in 0..100 {
            let p = Vec2::new(350.5 + ix as f32, 302.0);
            assert!(cmds[0].covers(p) != cmds[1].covers(p), "pixel {p:?}");
        }
    }

    #[test]
    fn centerline_clearance_equals_shaft_offset() {
        for offset in [0.0, 3.0, 8.0] {
            let mut arrow = unit_arrow(ArrowParametersPatch::new().shaft_pixel_offset(offset));
            let cmds = frame(&mut arrow);
            let (shaft, head) = (&cmds[0], &cmds[2]);

            let inset = joint_inset(Vec2::new(30.0, 50.0));
            let at = |x: f32| Vec2::new(200.0 + x, 300.0);

            assert!(head.covers(at(inset - 0.25)));
            assert!(!head.covers(at(inset + 0.25)));
            assert!(shaft.covers(at(inset + offset + 0.25)));
            assert!(!shaft.covers(at(inset + offset - 0.25)));
        }
    }

    #[test]
    fn shaft_cap_is_rounded() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cmds = frame(&mut arrow);
        let shaft = &cmds[0];
        let DrawCmd::Shaft(s) = shaft else { panic!("expected shaft") };
        let c = s.joint_center();
        // Cap tip on the centerline, but not at the corner of the quad next to it.
        assert!(shaft.covers(c - Vec2::new(4.5, 0.0)));
        assert!(!shaft.covers(c + Vec2::new(-4.5, 4.5)));
        assert!(shaft.covers(c + Vec2::new(0.5, 4.5)));
    }

    // ── parameters ────────────────────────────────────────────────────────

    #[test]
    fn zero_width_shaft_is_invisible() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new().shaft_pixel_width(0.0));
        let cmds = frame(&mut arrow);
        assert_close(shaft_pixel_width(&cmds[0], RES), 0.0, 1e-4);
        for ix in 0..=400 {
            let p = Vec2::new(200.0 + ix as f32, 300.0);
            assert!(!cmds[0].covers(p) && !cmds[1].covers(p));
        }
        let (w, h) = arrowhead_footprint(&cmds[2], RES);
        assert_close(w, 30.0, 1e-3);
        assert_close(h, 50.0, 1e-3);
        assert!(cmds[2].covers(Vec2::new(210.0, 300.0)));
    }

    #[test]
    fn parameter_changes_apply_on_next_refresh() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cam = ortho_camera(RES);
        arrow.parameters_mut().shaft_pixel_width = 4.0;
        let cmd = arrow.refresh(ArrowPart::StartShaft, None, &cam);
        assert_close(shaft_pixel_width(&cmd, RES), 4.0, 1e-3);

        arrow.apply_parameters(&ArrowParametersPatch::new().arrow_pixel_height(20.0));
        let cmd = arrow.refresh(ArrowPart::EndArrowhead, None, &cam);
        assert_close(arrowhead_footprint(&cmd, RES).1, 20.0, 1e-3);
    }

    #[test]
    fn replaced_parameters_apply_on_next_refresh() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cam = ortho_camera(RES);
        let red = Rgb::new(1.0, 0.0, 0.0);
        arrow.set_parameters(ArrowParameters {
            shaft_pixel_width: 2.0,
            arrow_pixel_width: 12.0,
            arrow_pixel_height: 16.0,
            color: red,
            ..ArrowParameters::DEFAULT
        });
        assert_eq!(arrow.parameters().arrow_pixel_width, 12.0);

        let DrawCmd::Shaft(shaft) = arrow.refresh(ArrowPart::EndShaft, None, &cam) else {
            panic!("expected shaft command");
        };
        assert_eq!(shaft.color, red);
        assert_close(shaft_pixel_width(&DrawCmd::Shaft(shaft), RES), 2.0, 1e-3);

        let head = arrow.refresh(ArrowPart::StartArrowhead, None, &cam);
        let (w, h) = arrowhead_footprint(&head, RES);
        assert_close(w, 12.0, 1e-3);
        assert_close(h, 16.0, 1e-3);
    }

    #[test]
    fn refresh_without_viewport_keeps_last_resolution() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cam = ortho_camera(RES);
        assert_eq!(arrow.renderable(ArrowPart::StartShaft).material().resolution(), RES);

        let bigger = Resolution::new(1024.0, 768.0);
        arrow.refresh(ArrowPart::StartShaft, Some(bigger), &cam);
        arrow.refresh(ArrowPart::StartShaft, None, &cam);
        assert_eq!(arrow.renderable(ArrowPart::StartShaft).material().resolution(), bigger);
        // Other parts keep their own copy.
        assert_eq!(arrow.renderable(ArrowPart::EndShaft).material().resolution(), RES);
    }

    // ── symmetry ──────────────────────────────────────────────────────────

    #[test]
    fn swapping_endpoints_mirrors_the_arrow() {
        let s = Vec3::new(-0.3, 0.2, 0.4);
        let e = Vec3::new(1.1, -0.6, -0.2);
        let mut a = ArrowEntity::new(s, e, ArrowParametersPatch::new(), RES).unwrap();
        let mut b = ArrowEntity::new(e, s, ArrowParametersPatch::new(), RES).unwrap();
        let cam = perspective_camera(RES, 4.0);

        let pairs = [
            (ArrowPart::EndArrowhead, ArrowPart::StartArrowhead),
            (ArrowPart::StartArrowhead, ArrowPart::EndArrowhead),
            (ArrowPart::EndShaft, ArrowPart::StartShaft),
        ];
        for (pa, pb) in pairs {
            let ca = a.refresh(pa, Some(RES), &cam);
            let cb = b.refresh(pb, Some(RES), &cam);
            for local in [Vec2::new(-1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.5)] {
                let va = ca.vertex(local);
                let vb = cb.vertex(local);
                assert!((va.clip - vb.clip).length() < 1e-4);
            }
            assert_eq!(ca, cb);
        }
    }

    // ── degenerate projection ─────────────────────────────────────────────

    #[test]
    fn end_on_view_produces_finite_vertices() {
        let mut arrow = ArrowEntity::new(Vec3::ZERO, Vec3::NEG_Z, ArrowParametersPatch::new(), RES).unwrap();
        let cam = LookAtCamera::perspective(60.0, RES.aspect_ratio(), 0.1, 100.0)
            .looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        for part in ArrowPart::ALL {
            let cmd = arrow.refresh(part, Some(RES), &cam);
            for local in [Vec2::new(-1.0, 0.0), Vec2::new(1.0, 1.0)] {
                let v = cmd.vertex(local);
                assert!(v.clip.is_finite() && v.pixel.is_finite());
            }
        }
    }

    // ── scene node ────────────────────────────────────────────────────────

    #[test]
    fn record_pushes_all_parts_in_order() {
        let mut arrow = unit_arrow(ArrowParametersPatch::new());
        let cam = ortho_camera(RES);
        let mut list = DrawList::new();
        arrow.record(&FrameView::new(Some(RES), &cam), &mut list);

        let parts: Vec<_> = list.iter().map(|i| i.part).collect();
        assert_eq!(parts, ArrowPart::ALL.to_vec());
        assert!(matches!(list.items()[0].cmd, DrawCmd::Shaft(_)));
        assert!(matches!(list.items()[3].cmd, DrawCmd::Arrowhead(_)));
    }
}
