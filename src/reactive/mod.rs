pub mod effect;
pub mod invalidation;
pub mod maybe_dyn;
pub mod owner;
pub mod runtime;
pub mod signal;

use std::sync::atomic::{AtomicU64, Ordering};

pub use effect::{Effect, create_effect};
pub use invalidation::{ChangeFlags, request_frame, take_frame_request};
pub use maybe_dyn::{IntoMaybeDyn, MaybeDyn};
pub use owner::{OwnerId, current_owner, dispose_owner, on_cleanup, with_owner};
pub use runtime::batch;
pub use signal::{ReadSignal, Signal, WriteSignal, create_signal};

/// Unique identifier for a widget instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId(u64);

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

impl WidgetId {
    pub fn next() -> Self {
        WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}
