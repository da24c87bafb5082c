//! Platform abstraction layer
//!
//! Host callbacks (key presses, window resize, focus loss) arrive whenever the
//! browser fires them. They are pushed onto an [`EventQueue`] and only applied
//! at the start of the next frame, so a step always sees one consistent input
//! snapshot.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::sim::{Action, Bounds, Controls, Key};

/// A raw host event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Resize { width: f32, height: f32 },
    /// Window lost focus; key-up events will never arrive
    Blur,
}

/// Shared single-consumer event queue.
///
/// Cloning shares the same queue, so each host callback can own a handle.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: InputEvent) {
        self.events.borrow_mut().push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&self) -> Vec<InputEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

/// Input state owned by the frame loop
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub controls: Controls,
    pub bounds: Bounds,
}

impl FrameInput {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            controls: Controls::new(),
            bounds,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.controls.key_down(key),
            InputEvent::KeyUp(key) => self.controls.key_up(key),
            InputEvent::Resize { width, height } => {
                log::debug!("Viewport resized to {}x{}", width, height);
                self.bounds = Bounds::new(width, height);
            }
            InputEvent::Blur => self.controls.release_all(),
        }
    }

    /// Apply everything queued since the last frame and return this frame's actions
    pub fn begin_frame(&mut self, queue: &EventQueue) -> Vec<Action> {
        for event in queue.drain() {
            self.apply(event);
        }
        self.controls.frame_actions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_shared_between_clones() {
        let queue = EventQueue::new();
        let handle = queue.clone();
        handle.push(InputEvent::KeyDown(Key::Up));
        handle.push(InputEvent::KeyUp(Key::Up));
        assert_eq!(
            queue.drain(),
            vec![InputEvent::KeyDown(Key::Up), InputEvent::KeyUp(Key::Up)]
        );
        assert!(handle.drain().is_empty());
    }

    #[test]
    fn test_held_thrust_key_fires_once_across_frames() {
        let queue = EventQueue::new();
        let mut input = FrameInput::new(Bounds::new(800.0, 600.0));
        queue.push(InputEvent::KeyDown(Key::Up));
        assert_eq!(input.begin_frame(&queue), vec![Action::Thrust]);
        assert!(input.begin_frame(&queue).is_empty());
        queue.push(InputEvent::KeyUp(Key::Up));
        assert!(input.begin_frame(&queue).is_empty());
    }

    #[test]
    fn test_resize_updates_bounds() {
        let queue = EventQueue::new();
        let mut input = FrameInput::new(Bounds::new(800.0, 600.0));
        queue.push(InputEvent::Resize {
            width: 1024.0,
            height: 768.0,
        });
        input.begin_frame(&queue);
        assert_eq!(input.bounds, Bounds::new(1024.0, 768.0));
    }

    #[test]
    fn test_blur_releases_held_keys() {
        let queue = EventQueue::new();
        let mut input = FrameInput::new(Bounds::new(800.0, 600.0));
        queue.push(InputEvent::KeyDown(Key::Left));
        assert_eq!(input.begin_frame(&queue), vec![Action::RotateLeft]);
        queue.push(InputEvent::Blur);
        assert!(input.begin_frame(&queue).is_empty());
    }
}
