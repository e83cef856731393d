//! Input translation
//!
//! Turns raw key and touch events into `Intent`s for the current play mode.
//! The host owns the DOM listeners; this module only sees plain values, so
//! it is fully testable off the browser.

use std::collections::HashSet;

use crate::sim::{Intent, PlayMode};

/// Default minimum swipe length in CSS pixels
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 30.0;

/// Logical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Pause,
    Confirm,
}

impl Key {
    /// Map a `KeyboardEvent.code` to a logical key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "ArrowUp" | "KeyW" => Some(Key::Up),
            "ArrowDown" | "KeyS" => Some(Key::Down),
            "Space" => Some(Key::Space),
            "Escape" | "KeyP" => Some(Key::Pause),
            "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }
}

/// Raw host input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
    TouchStart { x: f32, y: f32 },
    TouchMove { x: f32, y: f32 },
    TouchEnd { x: f32, y: f32 },
    TouchCancel,
}

/// Classified touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
}

impl Gesture {
    /// Classify a touch delta by its dominant axis (screen y grows downward)
    pub fn classify(dx: f32, dy: f32, threshold: f32) -> Self {
        if dx.abs().max(dy.abs()) < threshold {
            return Gesture::Tap;
        }
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Gesture::SwipeRight } else { Gesture::SwipeLeft }
        } else if dy > 0.0 {
            Gesture::SwipeDown
        } else {
            Gesture::SwipeUp
        }
    }
}

/// Stateful key/touch to intent translator
#[derive(Debug, Clone)]
pub struct InputAdapter {
    mode: PlayMode,
    swipe_threshold: f32,
    held: HashSet<Key>,
    touch_origin: Option<(f32, f32)>,
}

impl InputAdapter {
    pub fn new(mode: PlayMode, swipe_threshold: f32) -> Self {
        let swipe_threshold = if swipe_threshold.is_finite() && swipe_threshold > 0.0 {
            swipe_threshold
        } else {
            log::warn!(
                "Invalid swipe threshold {}, using {}",
                swipe_threshold,
                DEFAULT_SWIPE_THRESHOLD
            );
            DEFAULT_SWIPE_THRESHOLD
        };
        Self {
            mode,
            swipe_threshold,
            held: HashSet::new(),
            touch_origin: None,
        }
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        self.clear_held();
    }

    /// Forget held keys and any touch in progress (focus loss)
    pub fn clear_held(&mut self) {
        self.held.clear();
        self.touch_origin = None;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Translate one event; `None` if it means nothing in this mode
    pub fn translate(&mut self, event: &InputEvent) -> Option<Intent> {
        match *event {
            InputEvent::KeyDown { key, repeat } => {
                // Auto-repeat and already-held keys never stack
                if !self.held.insert(key) || repeat {
                    return None;
                }
                self.key_down(key)
            }
            InputEvent::KeyUp { key } => {
                self.held.remove(&key);
                self.key_up(key)
            }
            InputEvent::TouchStart { x, y } => {
                self.touch_origin = Some((x, y));
                None
            }
            // Only the start and end points matter
            InputEvent::TouchMove { .. } => None,
            InputEvent::TouchEnd { x, y } => {
                let (ox, oy) = self.touch_origin.take()?;
                let gesture = Gesture::classify(x - ox, y - oy, self.swipe_threshold);
                self.gesture(gesture)
            }
            InputEvent::TouchCancel => {
                self.touch_origin = None;
                None
            }
        }
    }

    fn key_down(&self, key: Key) -> Option<Intent> {
        match (key, self.mode) {
            (Key::Left, _) => Some(Intent::ShiftLane(-1)),
            (Key::Right, _) => Some(Intent::ShiftLane(1)),
            (Key::Pause, _) => Some(Intent::TogglePause),
            (Key::Confirm, _) => Some(Intent::Start),
            (Key::Up | Key::Space, PlayMode::Classic) => Some(Intent::Jump),
            (Key::Down, PlayMode::Classic) => Some(Intent::Duck(true)),
            (Key::Up, PlayMode::FreeRoam) => Some(Intent::ShiftDepth(-1)),
            (Key::Down, PlayMode::FreeRoam) => Some(Intent::ShiftDepth(1)),
            (Key::Space, PlayMode::FreeRoam) => Some(Intent::Jump),
            (Key::Up | Key::Down | Key::Space, PlayMode::LanesOnly) => None,
        }
    }

    fn key_up(&self, key: Key) -> Option<Intent> {
        match (key, self.mode) {
            (Key::Down, PlayMode::Classic) => Some(Intent::Duck(false)),
            _ => None,
        }
    }

    fn gesture(&self, gesture: Gesture) -> Option<Intent> {
        match (gesture, self.mode) {
            (Gesture::SwipeLeft, _) => Some(Intent::ShiftLane(-1)),
            (Gesture::SwipeRight, _) => Some(Intent::ShiftLane(1)),
            (Gesture::SwipeUp | Gesture::Tap, PlayMode::Classic) => Some(Intent::Jump),
            (Gesture::SwipeDown, PlayMode::Classic) => Some(Intent::DuckTap),
            (Gesture::SwipeUp, PlayMode::FreeRoam) => Some(Intent::ShiftDepth(-1)),
            (Gesture::SwipeDown, PlayMode::FreeRoam) => Some(Intent::ShiftDepth(1)),
            (Gesture::Tap, PlayMode::FreeRoam) => Some(Intent::Jump),
            (_, PlayMode::LanesOnly) => None,
        }
    }
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(PlayMode::default(), DEFAULT_SWIPE_THRESHOLD)
    }
}
