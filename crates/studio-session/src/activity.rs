/// User input that counts as activity for the inactivity timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    PointerMove,
    KeyPress,
    Click,
}
