//! Steering input
//!
//! The simulation only sees a 2D axis. [`InputAggregator`] folds the host's
//! pointer, touch and keyboard events into one, with priority
//! pointer > touch > keys.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use crate::consts::DRAG_RADIUS;

/// Anything that can be asked for the current steering axis
pub trait InputProvider {
    /// Current axis, or `None` when the source has nothing to report
    fn axis(&mut self) -> Option<Vec2>;
}

/// Missing and non-finite components become 0; the rest are clamped to [-1, 1]
pub fn sanitize_axis(axis: Option<Vec2>) -> Vec2 {
    let Some(axis) = axis else {
        return Vec2::ZERO;
    };
    let clean = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(clean(axis.x), clean(axis.y))
}

/// Arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

/// An active drag: where it started and the axis it currently maps to
#[derive(Debug, Clone, Copy)]
struct Drag {
    id: u32,
    origin: Vec2,
    axis: Vec2,
}

impl Drag {
    fn start(id: u32, origin: Vec2) -> Self {
        Self {
            id,
            origin,
            axis: Vec2::ZERO,
        }
    }

    fn update(&mut self, pos: Vec2, radius: f32) {
        self.axis = ((pos - self.origin) / radius).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }
}

/// Drag-anywhere steering plus arrow keys
#[derive(Debug, Clone)]
pub struct InputAggregator {
    pointer: Option<Drag>,
    touch: Option<Drag>,
    keys: KeyState,
    drag_radius: f32,
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(DRAG_RADIUS)
    }
}

impl InputAggregator {
    /// `drag_radius` is the drag distance (px) that maps to full input
    pub fn new(drag_radius: f32) -> Self {
        Self {
            pointer: None,
            touch: None,
            keys: KeyState::default(),
            drag_radius: drag_radius.max(1.0),
        }
    }

    /// Only the first pointer down is tracked
    pub fn pointer_down(&mut self, id: u32, pos: Vec2) {
        if self.pointer.is_none() {
            self.pointer = Some(Drag::start(id, pos));
        }
    }

    pub fn pointer_move(&mut self, id: u32, pos: Vec2) {
        if let Some(drag) = self.pointer.as_mut().filter(|d| d.id == id) {
            drag.update(pos, self.drag_radius);
        }
    }

    pub fn pointer_up(&mut self, id: u32) {
        if self.pointer.is_some_and(|d| d.id == id) {
            self.pointer = None;
        }
    }

    pub fn touch_start(&mut self, pos: Vec2) {
        self.touch = Some(Drag::start(0, pos));
    }

    pub fn touch_move(&mut self, pos: Vec2) {
        if let Some(drag) = self.touch.as_mut() {
            drag.update(pos, self.drag_radius);
        }
    }

    pub fn touch_end(&mut self) {
        self.touch = None;
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.keys.up = pressed,
            Key::Down => self.keys.down = pressed,
            Key::Left => self.keys.left = pressed,
            Key::Right => self.keys.right = pressed,
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.pointer = None;
        self.touch = None;
        self.keys = KeyState::default();
    }

    /// Combined axis; diagonals are scaled by 1/√2
    pub fn current_axis(&self) -> Vec2 {
        let mut axis = if let Some(drag) = self.pointer.or(self.touch) {
            drag.axis
        } else {
            let k = self.keys;
            let x = k.right as i8 - k.left as i8;
            let y = k.down as i8 - k.up as i8;
            Vec2::new(x as f32, y as f32)
        };
        if axis.x != 0.0 && axis.y != 0.0 {
            axis *= FRAC_1_SQRT_2;
        }
        axis
    }
}

impl InputProvider for InputAggregator {
    fn axis(&mut self) -> Option<Vec2> {
        Some(self.current_axis())
    }
}
