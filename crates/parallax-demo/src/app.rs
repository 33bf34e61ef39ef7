use std::path::Path;

use parallax_engine::camera::{Camera, FrameView};
use parallax_engine::core::{App, AppControl, FrameCtx};
use parallax_engine::input::{InputEvent, InputFrame};
use parallax_engine::render::ImageData;
use parallax_engine::scene::{Object, ObjectManager};
use parallax_engine::wgpu;

use crate::config::DemoConfig;
use crate::controls::{action_for_key, ControlAction, ShadingMode};

/// The brick-wall scene: one camera, one textured quad, keyboard + mouse controls.
pub struct ParallaxDemo {
    config: DemoConfig,
    camera: Camera,
    objects: ObjectManager,
    shading: ShadingMode,
    wall: usize,
    title_dirty: bool,
}

impl ParallaxDemo {
    pub fn new(config: DemoConfig) -> Self {
        let diffuse = load_or_fallback(
            &config.asset_path(&config.diffuse_texture),
            ImageData::solid_color(1, 1, [180, 90, 60, 255]),
        );
        let normal_map = load_or_fallback(
            &config.asset_path(&config.normal_texture),
            ImageData::flat_normal_map(),
        );
        let depth_map = load_or_fallback(
            &config.asset_path(&config.depth_texture),
            ImageData::flat_depth_map(),
        );

        let mut wall = Object::new();
        wall.make_textured_quad(diffuse, normal_map, depth_map);
        wall.set_depth_scale(config.initial_depth_scale);
        wall.set_light_position(config.light_position);

        let mut objects = ObjectManager::new();
        let wall = objects.add_object(wall);

        Self {
            config,
            camera: Camera::new(),
            objects,
            shading: ShadingMode::default(),
            wall,
            title_dirty: true,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn objects(&self) -> &ObjectManager {
        &self.objects
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    /// Replays this frame's events in arrival order: pointer motion turns the
    /// camera, key presses run their bindings.
    ///
    /// Leaving the window or losing focus drops the mouse-look anchor so the
    /// view does not jump when the pointer comes back elsewhere.
    pub fn handle_input(&mut self, input: &InputFrame) -> AppControl {
        for event in &input.events {
            match event {
                InputEvent::PointerMoved(mv) => self.camera.mouse_look(mv.x, mv.y),
                InputEvent::PointerLeft | InputEvent::Focused(false) => {
                    self.camera.reset_mouse_look();
                }
                _ => {
                    let Some(action) = event.key_press().and_then(action_for_key) else {
                        continue;
                    };
                    if self.apply_action(action) == AppControl::Exit {
                        return AppControl::Exit;
                    }
                }
            }
        }

        AppControl::Continue
    }

    pub fn apply_action(&mut self, action: ControlAction) -> AppControl {
        let speed = self.config.camera_speed;
        let step = self.config.depth_scale_step;

        match action {
            ControlAction::Quit => {
                log::info!("quit requested");
                return AppControl::Exit;
            }
            ControlAction::MoveForward => self.camera.move_forward(speed),
            ControlAction::MoveBackward => self.camera.move_backward(speed),
            ControlAction::MoveLeft => self.camera.move_left(speed),
            ControlAction::MoveRight => self.camera.move_right(speed),
            ControlAction::MoveUp => self.camera.move_up(speed),
            ControlAction::MoveDown => self.camera.move_down(speed),
            ControlAction::IncreaseDepthScale => self.adjust_wall_depth(step),
            ControlAction::DecreaseDepthScale => self.adjust_wall_depth(-step),
            ControlAction::SetShading(mode) => {
                if mode != self.shading {
                    log::info!("shading mode: {mode:?}");
                    self.title_dirty = true;
                }
                self.shading = mode;
            }
        }

        AppControl::Continue
    }

    /// Applies the shading mode, re-places the wall and refreshes every
    /// object's uniforms for a `width`×`height` drawable.
    pub fn prepare_frame(&mut self, width: u32, height: u32) -> FrameView {
        let flags = self.shading.flags();
        let (position, scale) = (self.config.wall_position, self.config.wall_scale);

        if let Some(wall) = self.objects.object_mut(self.wall) {
            wall.set_shading(flags);

            let t = wall.transform_mut();
            t.load_identity();
            t.translate(position.x, position.y, position.z);
            t.scale(scale.x, scale.y, scale.z);
        }

        let frame = FrameView::new(&self.camera, &self.config.projection, width, height);
        self.objects.update_all(&frame);
        frame
    }

    fn adjust_wall_depth(&mut self, delta: f32) {
        if let Some(wall) = self.objects.object_mut(self.wall) {
            wall.adjust_depth_scale(delta);
            self.title_dirty = true;
        }
    }

    /// Window title reflecting the current shading mode and depth scale.
    pub fn title(&self) -> String {
        let depth = self
            .objects
            .object(self.wall)
            .map(|w| w.depth_scale())
            .unwrap_or_default();
        format!("Parallax Mapping - {:?} (depth scale {depth:.2})", self.shading)
    }

    fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.config.clear_color;
        wgpu::Color { r, g, b, a }
    }
}

impl App for ParallaxDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.handle_input(ctx.input_frame) == AppControl::Exit {
            return AppControl::Exit;
        }

        if std::mem::take(&mut self.title_dirty) {
            ctx.runtime.set_title(self.title());
        }

        let (width, height) = ctx.drawable_size();
        self.prepare_frame(width, height);

        let clear = self.clear_color();
        let objects = &mut self.objects;
        ctx.render(|rctx, target| objects.render_all(rctx, target, clear))
    }
}

/// Loads an image, logging and substituting `fallback` on any failure.
fn load_or_fallback(path: &Path, fallback: ImageData) -> ImageData {
    match ImageData::from_file(path) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("{err}; using a {}x{} placeholder", fallback.width, fallback.height);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_engine::glam::Vec3;
    use parallax_engine::input::{Key, KeyState, Modifiers, PointerMoveEvent};

    fn demo() -> ParallaxDemo {
        let config = DemoConfig::default()
            .with_asset_dir_override(Some("/nonexistent/parallax-assets".into()));
        ParallaxDemo::new(config)
    }

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn missing_assets_fall_back_to_placeholders() {
        let d = demo();
        assert_eq!(d.objects().len(), 1);
        let wall = d.objects().object(0).unwrap();
        assert_eq!(wall.geometry().index_count(), 6);
        assert_eq!(wall.depth_scale(), 0.05);
    }

    #[test]
    fn movement_uses_configured_speed() {
        let mut d = demo();
        d.apply_action(ControlAction::MoveForward);
        assert!(d.camera().eye_position().abs_diff_eq(Vec3::new(0.0, 0.0, 4.5), 1e-6));

        d.apply_action(ControlAction::MoveUp);
        d.apply_action(ControlAction::MoveRight);
        assert!(d.camera().eye_position().abs_diff_eq(Vec3::new(0.5, 0.5, 4.5), 1e-6));
    }

    #[test]
    fn arrow_keys_adjust_depth_scale() {
        let mut d = demo();
        d.apply_action(ControlAction::IncreaseDepthScale);
        let wall = d.objects().object(0).unwrap();
        assert!((wall.depth_scale() - 0.06).abs() < 1e-6);

        for _ in 0..20 {
            d.apply_action(ControlAction::DecreaseDepthScale);
        }
        assert_eq!(d.objects().object(0).unwrap().depth_scale(), 0.0);
    }

    #[test]
    fn escape_exits() {
        let mut d = demo();
        let mut frame = InputFrame::default();
        frame.push_event(press(Key::W));
        frame.push_event(press(Key::Escape));
        assert_eq!(d.handle_input(&frame), AppControl::Exit);
    }

    #[test]
    fn number_keys_change_shading_on_next_frame() {
        let mut d = demo();
        let mut frame = InputFrame::default();
        frame.push_event(press(Key::Digit4));
        assert_eq!(d.handle_input(&frame), AppControl::Continue);
        assert_eq!(d.shading(), ShadingMode::ParallaxSelfShadowed);

        d.prepare_frame(1280, 720);
        let u = d.objects().object(0).unwrap().uniforms();
        assert_eq!(u.flags, [1, 1, 1, 0]);
    }

    #[test]
    fn pointer_motion_turns_the_camera() {
        let mut d = demo();
        let mut frame = InputFrame::default();
        frame.push_event(InputEvent::PointerMoved(PointerMoveEvent { x: 100.0, y: 100.0 }));
        frame.push_event(InputEvent::PointerMoved(PointerMoveEvent { x: 90.0, y: 100.0 }));
        d.handle_input(&frame);

        let view = d.camera().view_direction();
        assert!(view.x < 0.0, "yawed left, got {view:?}");
        assert!(view.y.abs() < 1e-6);
    }

    #[test]
    fn title_tracks_mode_and_depth() {
        let mut d = demo();
        assert_eq!(d.title(), "Parallax Mapping - NormalMapped (depth scale 0.05)");

        d.title_dirty = false;
        d.apply_action(ControlAction::SetShading(ShadingMode::Parallax));
        d.apply_action(ControlAction::IncreaseDepthScale);
        assert!(d.title_dirty);
        assert_eq!(d.title(), "Parallax Mapping - Parallax (depth scale 0.06)");
    }

    fn pointer_at(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn leaving_the_window_drops_the_look_anchor() {
        for lost in [InputEvent::PointerLeft, InputEvent::Focused(false)] {
            let mut d = demo();
            let mut frame = InputFrame::default();
            frame.push_event(pointer_at(100.0, 100.0));
            frame.push_event(lost);
            frame.push_event(pointer_at(400.0, 300.0));
            d.handle_input(&frame);

            // The re-entry sample only re-anchors; the view is unchanged.
            assert!(d.camera().view_direction().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        }
    }

    #[test]
    fn focus_gain_keeps_the_look_anchor() {
        let mut d = demo();
        let mut frame = InputFrame::default();
        frame.push_event(pointer_at(100.0, 100.0));
        frame.push_event(InputEvent::Focused(true));
        frame.push_event(pointer_at(90.0, 100.0));
        d.handle_input(&frame);

        assert!(d.camera().view_direction().x < 0.0);
    }

    #[test]
    fn prepare_frame_places_the_wall() {
        let mut d = demo();
        // Stray transforms from a previous frame are discarded.
        d.objects
            .object_mut(0)
            .unwrap()
            .transform_mut()
            .rotate(1.0, 0.0, 1.0, 0.0);

        let frame = d.prepare_frame(1280, 720);
        let wall = d.objects().object(0).unwrap();
        let m = wall.transform().matrix();

        assert!(m.transform_point3(Vec3::ZERO).abs_diff_eq(Vec3::new(0.0, 0.0, -8.0), 1e-6));
        assert!(m.transform_point3(Vec3::X).abs_diff_eq(Vec3::new(2.0, 0.0, -8.0), 1e-6));
        assert_eq!(wall.uniforms().projection, frame.projection.to_cols_array_2d());
        assert_eq!(wall.uniforms().view_pos, [0.0, 0.0, 5.0, 1.0]);
    }
}
