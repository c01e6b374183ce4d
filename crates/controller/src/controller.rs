//! The assistance controller implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use lessonaid_config::AppConfig;
use lessonaid_core::error::AssistError;
use lessonaid_core::state::{DebugInfo, LifecycleState, Phase, RequestView, ResponseView};
use lessonaid_core::transport::Transport;
use lessonaid_service::{
    CallParams, HttpTransport, call_ai_service, format_error_message, prepare_context_data,
    resolve_endpoint, validate_endpoint,
};
use tracing::{debug, info, warn};

use crate::props::WidgetProps;

/// What happened to one call of [`AssistanceController::ask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    /// The result was applied; the controller is now in this phase.
    Applied(Phase),
    /// The endpoint is invalid; nothing was sent.
    Rejected,
    /// A newer ask or a reset happened while this call was in flight.
    Superseded,
    /// The controller was torn down.
    Abandoned,
}

struct Inner {
    state: LifecycleState,
    /// Bumped by every ask, reset, and teardown. A resolution applies only
    /// if the generation it started with is still current.
    generation: u64,
    abandoned: bool,
}

/// One widget instance's request lifecycle.
///
/// All methods take `&self`; the state sits behind a mutex that is never
/// held across the network call.
pub struct AssistanceController {
    props: WidgetProps,

    /// Resolved once at construction
    endpoint: String,

    /// Query used when the props carry no request message
    default_query: String,

    /// Whether `debug_info` returns anything
    diagnostics: bool,

    transport: Arc<dyn Transport>,

    inner: Mutex<Inner>,
}

impl AssistanceController {
    /// Create a controller. The endpoint is fixed here: the prop override if
    /// present, otherwise the configured default.
    pub fn new(props: WidgetProps, config: &AppConfig, transport: Arc<dyn Transport>) -> Self {
        let endpoint = resolve_endpoint(props.api_endpoint.as_deref(), config);
        Self {
            props,
            endpoint,
            default_query: config.widget.default_query.clone(),
            diagnostics: config.diagnostics,
            transport,
            inner: Mutex::new(Inner {
                state: LifecycleState::default(),
                generation: 0,
                abandoned: false,
            }),
        }
    }

    /// Create a controller that talks HTTP.
    pub fn with_http(props: WidgetProps, config: &AppConfig) -> Result<Self, AssistError> {
        let transport = Arc::new(HttpTransport::from_config(config)?);
        Ok(Self::new(props, config, transport))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn props(&self) -> &WidgetProps {
        &self.props
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Ask for assistance.
    ///
    /// Never refuses because another ask is in flight. Instead only the
    /// most recently started ask may apply its result.
    pub async fn ask(&self) -> AskOutcome {
        let generation = {
            let mut inner = self.lock();
            if inner.abandoned {
                return AskOutcome::Abandoned;
            }

            if !validate_endpoint(&self.endpoint) {
                let err = AssistError::Configuration(format!(
                    "invalid assistance endpoint '{}'",
                    self.endpoint
                ));
                warn!(endpoint = %self.endpoint, "Ask rejected: invalid endpoint");
                inner.state.reject(format_error_message(&err));
                return AskOutcome::Rejected;
            }

            inner.generation += 1;
            inner.state.begin_ask();
            inner.generation
        };

        let context = prepare_context_data(&self.props.context_inputs());
        debug!(
            generation,
            fields = ?context.keys().collect::<Vec<_>>(),
            "Prepared context data"
        );

        let result = call_ai_service(
            self.transport.as_ref(),
            CallParams {
                context_data: &context,
                api_endpoint: &self.endpoint,
                course_id: self.props.course_id.as_deref(),
                user_query: self.props.query(&self.default_query),
            },
        )
        .await;

        let mut inner = self.lock();
        if inner.abandoned {
            warn!(generation, "Controller torn down before the reply arrived, dropping it");
            return AskOutcome::Abandoned;
        }
        if inner.generation != generation {
            warn!(
                generation,
                current = inner.generation,
                "Dropping reply from superseded ask"
            );
            return AskOutcome::Superseded;
        }

        let succeeded = result.is_success();
        inner.state.finish(result);
        let phase = inner.state.phase();

        if succeeded {
            info!(
                generation,
                request_id = inner.state.request_id.as_deref().unwrap_or("-"),
                "Assistance answered"
            );
        } else {
            warn!(generation, error = %inner.state.error, "Assistance failed");
        }

        AskOutcome::Applied(phase)
    }

    /// The response view's "ask again". Same as [`Self::ask`].
    pub async fn ask_again(&self) -> AskOutcome {
        self.ask().await
    }

    /// Back to `Idle`. Any in-flight ask is discarded when it resolves.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state.reset();
        debug!("Controller reset");
    }

    /// Set the error field to `message` (empty to dismiss) without touching
    /// the answer or `has_asked`.
    pub fn clear_error(&self, message: &str) {
        self.lock().state.clear_error(message);
    }

    /// Mark the instance as gone and drop its state. Pending and future
    /// asks become no-ops.
    pub fn teardown(&self) {
        let mut inner = self.lock();
        inner.abandoned = true;
        inner.generation += 1;
        inner.state.reset();
        debug!("Controller torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.lock().abandoned
    }

    pub fn state(&self) -> LifecycleState {
        self.lock().state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().state.phase()
    }

    /// Whether the ask affordance is offered.
    pub fn ask_available(&self) -> bool {
        self.lock().state.ask_available()
    }

    pub fn request_view(&self) -> RequestView {
        let inner = self.lock();
        RequestView {
            is_loading: inner.state.is_loading,
            has_asked: inner.state.has_asked && !inner.state.has_error(),
            message: self.props.request_message.clone(),
            button_text: self.props.button_text.clone(),
            disabled: false,
        }
    }

    pub fn response_view(&self) -> ResponseView {
        let inner = self.lock();
        ResponseView {
            response: inner.state.response.clone(),
            error: inner.state.error.clone(),
            is_loading: inner.state.is_loading,
            show_actions: self.props.show_response_actions,
            allow_copy: self.props.allow_copy,
            allow_download: self.props.allow_download,
        }
    }

    /// Lifecycle snapshot for the debug panel; `None` unless diagnostics
    /// are enabled.
    pub fn debug_info(&self) -> Option<DebugInfo> {
        if !self.diagnostics {
            return None;
        }
        let inner = self.lock();
        Some(DebugInfo {
            course_id: self.props.course_id.clone(),
            unit_id: self.props.unit_id.clone(),
            sequence_id: self.props.sequence.as_ref().and_then(|s| s.id.clone()),
            endpoint: self.endpoint.clone(),
            request_id: inner.state.request_id.clone(),
            has_asked: inner.state.has_asked,
            has_error: inner.state.has_error(),
        })
    }
}
