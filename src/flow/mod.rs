//! Selection workflow orchestration

pub mod events;
pub mod selection;

pub use events::{CallbackHandle, FlowCallback, FlowEvent};
pub use selection::{FlowState, SelectionFlow};
