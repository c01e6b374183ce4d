//! The assistance controller — the widget's lifecycle state machine.
//!
//! The controller owns one [`LifecycleState`](lessonaid_core::LifecycleState)
//! and moves it through **Idle → Loading → Answered | Errored**:
//!
//! 1. **Ask**: validate the endpoint, enter `Loading`
//! 2. **Assemble** the context payload from the widget props
//! 3. **Call** the assistance service through the configured transport
//! 4. **Apply** the result, unless a newer ask, a reset, or teardown
//!    happened while the call was in flight
//!
//! The presentation layer renders from [`AssistanceController::request_view`]
//! and [`AssistanceController::response_view`] and calls back into the
//! controller's methods.

pub mod controller;
pub mod props;

#[cfg(test)]
mod test_helpers;

pub use controller::{AskOutcome, AssistanceController};
pub use props::WidgetProps;
