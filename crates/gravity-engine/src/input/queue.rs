/// Input event types the simulation understands.
/// Coordinates are screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel with the cursor at (x, y). Positive `delta` zooms out.
    Wheel { delta: f32, x: f32, y: f32 },
    /// A command from the UI layer (buttons, sliders, ...).
    /// `kind` identifies the command; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them at the
/// start of the next frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta: -120.0, x: 5.0, y: 5.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_keeps_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        q.push(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        let events = q.drain();
        assert_eq!(events[0], InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        assert!(matches!(events[1], InputEvent::PointerUp { .. }));
    }
}
