use std::cell::Cell;

use bitflags::bitflags;

bitflags! {
    /// Flags indicating what a widget needs before the next frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Size or position may change
        const NEEDS_LAYOUT = 0b01;
        /// Visual appearance changed
        const NEEDS_PAINT  = 0b10;
    }
}

thread_local! {
    static FRAME_REQUESTED: Cell<bool> = const { Cell::new(true) };
}

/// Ask the host to produce another frame.
pub fn request_frame() {
    FRAME_REQUESTED.with(|flag| flag.set(true));
}

/// Consume the pending frame request.
pub fn take_frame_request() -> bool {
    FRAME_REQUESTED.with(|flag| flag.replace(false))
}
