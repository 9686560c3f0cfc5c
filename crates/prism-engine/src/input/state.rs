use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers};

/// What the platform translator needs between events: winit reports neither
/// the cursor position on a click nor the modifiers on a key press.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Pointer position in physical pixels; `None` outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Folds `ev` into the tracked state and queues it on `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,
            InputEvent::PointerMoved { x, y } | InputEvent::PointerButton { x, y, .. } => {
                self.pointer_pos = Some((*x, *y));
            }
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Scroll(_) | InputEvent::Text(_) | InputEvent::Focused(_) => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState};

    #[test]
    fn pointer_tracks_moves_clicks_and_leave() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 10.0, y: 20.0 });
        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));

        state.apply_event(
            &mut frame,
            InputEvent::PointerButton {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 30.0,
                y: 40.0,
            },
        );
        assert_eq!(state.pointer_pos, Some((30.0, 40.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn modifiers_follow_changes_and_key_events() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };

        state.apply_event(&mut frame, InputEvent::ModifiersChanged(shift));
        assert!(state.modifiers.shift);

        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::A,
                state: KeyState::Pressed,
                repeat: false,
                modifiers: Modifiers::default(),
            },
        );
        assert_eq!(state.modifiers, Modifiers::default());
    }

    #[test]
    fn every_event_is_queued_in_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::Text("b".into()));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        state.apply_event(&mut frame, InputEvent::Text("k".into()));

        assert_eq!(
            frame.events,
            vec![
                InputEvent::Text("b".into()),
                InputEvent::Focused(false),
                InputEvent::Text("k".into()),
            ]
        );

        frame.clear();
        assert!(frame.events.is_empty());
    }
}
