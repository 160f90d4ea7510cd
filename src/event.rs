use crossterm::event::KeyEvent;

/// Events driving the viewer loop.
#[derive(Debug)]
pub enum Event {
    /// Sent at a regular interval; finished background loads are applied.
    Tick,
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized and needs a redraw.
    Resize,
}
