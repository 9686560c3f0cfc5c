use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coords::{ColorRgba, Viewport};
use crate::core::AppControl;
use crate::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, ScrollDelta};
use crate::math::{Camera, Transform};

use super::config::EngineConfig;

/// Tracked objects, selected by modes `1..=OBJECT_COUNT`.
pub const OBJECT_COUNT: usize = 3;

pub const MOVE_STEP: f32 = 0.1;
pub const SCALE_STEP: f32 = 0.1;
pub const MIN_SCALE: f32 = 0.1;
pub const ROTATE_STEP_DEG: f32 = 1.0;
pub const CAMERA_STEP: f32 = 0.1;

pub const DEFAULT_BACKGROUND: ColorRgba = ColorRgba::new(0.1, 0.2, 0.3, 1.0);
pub const GREY_BACKGROUND: ColorRgba = ColorRgba::grey(0.2);

/// Typing this forces a black background.
const BLACK_COMMAND: &str = "black";

/// Absolute placement of one tracked object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ObjectParams {
    pub x: f32,
    pub y: f32,
    /// Degrees.
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    pub scale: f32,
}

impl ObjectParams {
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
            scale: 1.0,
        }
    }

    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Fresh transform: translate, then rotate, then scale.
    pub fn transform(&self) -> Transform {
        let mut t = Transform::new();
        t.translate(self.x, self.y);
        t.rotate(self.rot_x, self.rot_y, self.rot_z);
        t.scale(self.scale);
        t
    }
}

impl Default for ObjectParams {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

/// Mutable engine state driven by input.
///
/// Key presses and auto-repeats both apply, except Space and G which act
/// once per physical press.
pub struct EngineState {
    background: ColorRgba,
    text: String,
    mode: usize,
    objects: [ObjectParams; OBJECT_COUNT],
    light_pos: Vec3,
    camera: Camera,
    cursor_tints_background: bool,
    rng: StdRng,
}

impl EngineState {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &EngineConfig, rng: StdRng) -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            text: String::new(),
            mode: 1,
            objects: [
                ObjectParams::at(-1.5, 0.0),
                ObjectParams::at(0.0, 0.0),
                ObjectParams::at(1.5, 0.0).with_scale(0.6),
            ],
            light_pos: config.light_position,
            camera: Camera::default(),
            cursor_tints_background: config.cursor_tints_background,
            rng,
        }
    }

    #[inline]
    pub fn background(&self) -> ColorRgba {
        self.background
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Active mode, `1..=OBJECT_COUNT`.
    #[inline]
    pub fn mode(&self) -> usize {
        self.mode
    }

    /// Switches mode; values outside `1..=OBJECT_COUNT` are ignored.
    pub fn set_mode(&mut self, mode: usize) {
        if (1..=OBJECT_COUNT).contains(&mode) {
            if mode != self.mode {
                log::debug!("mode {} -> {mode}", self.mode);
            }
            self.mode = mode;
        } else {
            log::debug!("mode {mode} ignored");
        }
    }

    /// Parameters of the object selected by `mode`.
    pub fn object(&self, mode: usize) -> Option<&ObjectParams> {
        mode.checked_sub(1).and_then(|i| self.objects.get(i))
    }

    pub fn objects(&self) -> &[ObjectParams; OBJECT_COUNT] {
        &self.objects
    }

    #[inline]
    pub fn light_pos(&self) -> Vec3 {
        self.light_pos
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Per-frame fixups that do not wait for input.
    pub fn begin_frame(&mut self) {
        if self.text == BLACK_COMMAND {
            self.background = ColorRgba::black();
        }
    }

    /// Applies one input event. `viewport` scales cursor tinting.
    pub fn handle_event(&mut self, event: &InputEvent, viewport: Viewport) -> AppControl {
        match event {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat,
                ..
            } => return self.handle_key(*key, *repeat),

            InputEvent::Text(text) => {
                self.text.extend(text.chars().filter(|c| !c.is_control()));
            }

            InputEvent::PointerButton {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                ..
            } => self.randomize_background(),

            InputEvent::PointerMoved { x, y } if self.cursor_tints_background && viewport.is_valid() => {
                self.background = ColorRgba::new(x / viewport.width, y / viewport.height, 0.5, 1.0);
            }

            InputEvent::Scroll(delta) => {
                let (dx, dy) = match delta {
                    ScrollDelta::Line { x, y } | ScrollDelta::Pixel { x, y } => (x, y),
                };
                log::debug!("scroll ({dx}, {dy})");
            }

            _ => {}
        }
        AppControl::Continue
    }

    fn handle_key(&mut self, key: Key, repeat: bool) -> AppControl {
        if let Some(digit) = key.digit() {
            self.set_mode(digit as usize);
            return AppControl::Continue;
        }

        let active = &mut self.objects[self.mode - 1];
        match key {
            Key::Escape => return AppControl::Exit,

            Key::ArrowLeft => active.x -= MOVE_STEP,
            Key::ArrowRight => active.x += MOVE_STEP,
            Key::ArrowUp => active.y += MOVE_STEP,
            Key::ArrowDown => active.y -= MOVE_STEP,

            Key::Equal | Key::NumpadAdd => active.scale += SCALE_STEP,
            Key::Minus | Key::NumpadSubtract => active.scale = (active.scale - SCALE_STEP).max(MIN_SCALE),

            Key::W => active.rot_x += ROTATE_STEP_DEG,
            Key::S => active.rot_x -= ROTATE_STEP_DEG,
            Key::Q => active.rot_y += ROTATE_STEP_DEG,
            Key::E => active.rot_y -= ROTATE_STEP_DEG,
            Key::A => active.rot_z += ROTATE_STEP_DEG,
            Key::D => active.rot_z -= ROTATE_STEP_DEG,

            Key::J => self.camera.move_by(Vec3::new(0.0, CAMERA_STEP, 0.0)),
            Key::K => self.camera.move_by(Vec3::new(0.0, -CAMERA_STEP, 0.0)),
            Key::L => self.camera.move_by(Vec3::new(CAMERA_STEP, 0.0, 0.0)),
            Key::N => self.camera.move_by(Vec3::new(-CAMERA_STEP, 0.0, 0.0)),
            Key::M => self.camera.move_by(Vec3::new(0.0, 0.0, CAMERA_STEP)),
            Key::B => self.camera.move_by(Vec3::new(0.0, 0.0, -CAMERA_STEP)),

            Key::Space if !repeat => self.randomize_background(),
            Key::G if !repeat => self.background = GREY_BACKGROUND,

            Key::Backspace => {
                self.text.pop();
            }

            _ => {}
        }
        AppControl::Continue
    }

    fn randomize_background(&mut self) {
        self.background = ColorRgba::new(
            self.rng.gen_range(0.0..1.0),
            self.rng.gen_range(0.0..1.0),
            self.rng.gen_range(0.0..1.0),
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    const VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

    fn state() -> EngineState {
        EngineState::with_rng(&EngineConfig::default(), StdRng::seed_from_u64(7))
    }

    fn press(s: &mut EngineState, key: Key) -> AppControl {
        s.handle_event(
            &InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
                modifiers: Modifiers::default(),
            },
            VIEWPORT,
        )
    }

    fn repeat(s: &mut EngineState, key: Key) {
        s.handle_event(
            &InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: true,
                modifiers: Modifiers::default(),
            },
            VIEWPORT,
        );
    }

    fn type_text(s: &mut EngineState, text: &str) {
        s.handle_event(&InputEvent::Text(text.into()), VIEWPORT);
    }

    // ── transforms ────────────────────────────────────────────────────────

    #[test]
    fn object_transform_is_translate_rotate_scale() {
        let p = ObjectParams {
            x: 1.0,
            y: 2.0,
            rot_x: 10.0,
            rot_y: 20.0,
            rot_z: 30.0,
            scale: 0.5,
        };

        let mut expected = Transform::new();
        expected.translate(1.0, 2.0);
        expected.rotate(10.0, 20.0, 30.0);
        expected.scale(0.5);

        assert_eq!(p.transform(), expected);
        // Built fresh each call.
        assert_eq!(p.transform(), p.transform());
    }

    // ── modes ─────────────────────────────────────────────────────────────

    #[test]
    fn input_only_moves_the_active_object() {
        let mut s = state();
        let before = *s.objects();

        press(&mut s, Key::Digit2);
        for key in [Key::ArrowRight, Key::ArrowUp, Key::W, Key::Q, Key::D, Key::Equal] {
            press(&mut s, key);
        }

        let after = s.objects();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);

        let moved = after[1];
        assert!((moved.x - 0.1).abs() < 1e-6);
        assert!((moved.y - 0.1).abs() < 1e-6);
        assert_eq!((moved.rot_x, moved.rot_y, moved.rot_z), (1.0, 1.0, -1.0));
        assert!((moved.scale - 1.1).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_digits_are_ignored() {
        let mut s = state();
        press(&mut s, Key::Digit3);
        press(&mut s, Key::Digit0);
        press(&mut s, Key::Digit7);
        assert_eq!(s.mode(), 3);
        assert!(s.object(0).is_none());
        assert!(s.object(4).is_none());
    }

    #[test]
    fn scale_never_drops_below_floor() {
        let mut s = state();
        for _ in 0..20 {
            press(&mut s, Key::Minus);
        }
        repeat(&mut s, Key::NumpadSubtract);
        assert_eq!(s.objects()[0].scale, MIN_SCALE);
    }

    #[test]
    fn repeat_keeps_rotating() {
        let mut s = state();
        press(&mut s, Key::A);
        repeat(&mut s, Key::A);
        repeat(&mut s, Key::A);
        assert_eq!(s.objects()[0].rot_z, 3.0);
    }

    #[test]
    fn each_rotation_key_turns_one_degree_on_its_axis() {
        let cases = [
            (Key::W, [1.0, 0.0, 0.0]),
            (Key::S, [-1.0, 0.0, 0.0]),
            (Key::Q, [0.0, 1.0, 0.0]),
            (Key::E, [0.0, -1.0, 0.0]),
            (Key::A, [0.0, 0.0, 1.0]),
            (Key::D, [0.0, 0.0, -1.0]),
        ];

        for (key, expected) in cases {
            let mut s = state();
            press(&mut s, key);
            let o = s.objects()[0];
            assert_eq!([o.rot_x, o.rot_y, o.rot_z], expected, "{key:?}");
            assert_eq!((o.x, o.y), (-1.5, 0.0), "{key:?}");
        }
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn each_camera_key_pans_its_axis() {
        let cases = [
            (Key::J, Vec3::new(0.0, CAMERA_STEP, 0.0)),
            (Key::K, Vec3::new(0.0, -CAMERA_STEP, 0.0)),
            (Key::L, Vec3::new(CAMERA_STEP, 0.0, 0.0)),
            (Key::N, Vec3::new(-CAMERA_STEP, 0.0, 0.0)),
            (Key::M, Vec3::new(0.0, 0.0, CAMERA_STEP)),
            (Key::B, Vec3::new(0.0, 0.0, -CAMERA_STEP)),
        ];

        for (key, delta) in cases {
            let mut s = state();
            let eye = s.camera().eye();
            let target = s.camera().target();

            press(&mut s, key);

            assert!((s.camera().eye() - (eye + delta)).length() < 1e-6, "{key:?}");
            assert!((s.camera().target() - (target + delta)).length() < 1e-6, "{key:?}");
        }
    }

    #[test]
    fn camera_pan_ignores_mode_and_keeps_direction() {
        let mut s = state();
        let dir = s.camera().target() - s.camera().eye();
        let objects = *s.objects();

        press(&mut s, Key::J);
        press(&mut s, Key::L);
        press(&mut s, Key::B);

        assert!((s.camera().eye() - Vec3::new(0.1, 0.1, 2.9)).length() < 1e-6);
        assert!(((s.camera().target() - s.camera().eye()) - dir).length() < 1e-6);
        assert_eq!(*s.objects(), objects);
    }

    // ── background ────────────────────────────────────────────────────────

    #[test]
    fn black_text_forces_black_until_edited() {
        let mut s = state();
        type_text(&mut s, "black");
        s.begin_frame();
        assert_eq!(s.background(), ColorRgba::black());

        press(&mut s, Key::Space);
        s.begin_frame();
        assert_eq!(s.background(), ColorRgba::black());

        press(&mut s, Key::Backspace);
        assert_eq!(s.text(), "blac");
        press(&mut s, Key::Space);
        s.begin_frame();
        assert_ne!(s.background(), ColorRgba::black());
    }

    #[test]
    fn control_characters_are_not_typed() {
        let mut s = state();
        type_text(&mut s, "a\u{8}\rb");
        assert_eq!(s.text(), "ab");
    }

    #[test]
    fn g_resets_to_grey() {
        let mut s = state();
        press(&mut s, Key::Space);
        press(&mut s, Key::G);
        assert_eq!(s.background(), GREY_BACKGROUND);
    }

    #[test]
    fn held_space_randomizes_once() {
        let mut s = state();
        press(&mut s, Key::Space);
        let first = s.background();
        repeat(&mut s, Key::Space);
        assert_eq!(s.background(), first);
    }

    #[test]
    fn left_click_randomizes() {
        let mut s = state();
        s.handle_event(
            &InputEvent::PointerButton {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 5.0,
                y: 5.0,
            },
            VIEWPORT,
        );
        assert_ne!(s.background(), DEFAULT_BACKGROUND);
    }

    #[test]
    fn cursor_tint_is_opt_in() {
        let moved = InputEvent::PointerMoved { x: 640.0, y: 200.0 };

        let mut s = state();
        s.handle_event(&moved, VIEWPORT);
        assert_eq!(s.background(), DEFAULT_BACKGROUND);

        let config = EngineConfig {
            cursor_tints_background: true,
            ..EngineConfig::default()
        };
        let mut s = EngineState::with_rng(&config, StdRng::seed_from_u64(1));
        s.handle_event(&moved, VIEWPORT);
        assert_eq!(s.background(), ColorRgba::new(0.5, 0.25, 0.5, 1.0));
    }

    #[test]
    fn escape_exits() {
        let mut s = state();
        assert_eq!(press(&mut s, Key::Escape), AppControl::Exit);
        assert_eq!(press(&mut s, Key::W), AppControl::Continue);
    }
}
