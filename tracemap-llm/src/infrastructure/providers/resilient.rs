//! Circuit breaker around an LlmProvider
//!
//! Requests are never retried: each call reaches the inner provider at most
//! once. The breaker only stops calls from leaving while the upstream is known
//! to be failing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use tracemap_core::config::LlmResilienceConfig;

use crate::domain::{CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo};

/// Circuit breaker settings
#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    /// Consecutive provider failures before the circuit opens
    pub circuit_breaker_threshold: u32,
    /// Time before an open circuit lets a trial call through
    pub circuit_breaker_timeout: Duration,
    /// Trial requests allowed while half-open
    pub half_open_max_requests: u32,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self::from(&LlmResilienceConfig::default())
    }
}

impl From<&LlmResilienceConfig> for ResilienceConfig {
    fn from(config: &LlmResilienceConfig) -> Self {
        Self {
            circuit_breaker_threshold: config.circuit_breaker_threshold.max(1),
            circuit_breaker_timeout: Duration::from_secs(config.circuit_breaker_timeout_secs),
            half_open_max_requests: config.half_open_max_requests.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

struct CircuitBreakerState {
    state: CircuitState,
    failure_count: u32,
    last_failure_time: Option<Instant>,
    half_open_requests: u32,
}

/// Wraps any LlmProvider with a circuit breaker
///
/// A call that is dropped before the inner provider answers (for example by
/// an outer `tokio::time::timeout`) is recorded as a failure, so a cancelled
/// half-open trial call reopens the circuit instead of holding its trial slot.
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tracemap_llm::{GoogleAIProvider, ResilientProvider};
/// use tracemap_llm::infrastructure::providers::ResilienceConfig;
///
/// let inner = Arc::new(GoogleAIProvider::new("api-key", "gemini-1.5-flash"));
/// let provider = ResilientProvider::new(inner, ResilienceConfig::default());
/// ```
pub struct ResilientProvider {
    inner: Arc<dyn LlmProvider>,
    config: ResilienceConfig,
    circuit_state: Mutex<CircuitBreakerState>,
}

/// Settles one admitted call; records a failure if dropped unsettled.
struct InFlightCall<'a> {
    breaker: &'a ResilientProvider,
    settled: bool,
}

impl InFlightCall<'_> {
    fn settle(mut self, result: &Result<CompletionResponse, LlmError>) {
        self.settled = true;
        match result {
            Ok(_) => self.breaker.on_success(),
            Err(e) if e.counts_against_provider() => self.breaker.on_failure(),
            Err(_) => self.breaker.on_neutral(),
        }
    }
}

impl Drop for InFlightCall<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Provider call cancelled before completion, counting as failure");
            self.breaker.on_failure();
        }
    }
}

impl ResilientProvider {
    pub fn new(provider: Arc<dyn LlmProvider>, config: ResilienceConfig) -> Self {
        Self {
            inner: provider,
            config,
            circuit_state: Mutex::new(CircuitBreakerState {
                state: CircuitState::Closed,
                failure_count: 0,
                last_failure_time: None,
                half_open_requests: 0,
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CircuitBreakerState> {
        self.circuit_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Current breaker state
    pub fn state(&self) -> CircuitState {
        self.lock_state().state
    }

    fn open_error(&self) -> LlmError {
        LlmError::CircuitOpen {
            circuit: self.inner.info().id.to_string(),
        }
    }

    fn can_execute(&self) -> Result<(), LlmError> {
        let mut state = self.lock_state();

        match state.state {
            CircuitState::Closed => Ok(()),
            CircuitState::Open => {
                let cooled_down = state
                    .last_failure_time
                    .is_some_and(|t| t.elapsed() >= self.config.circuit_breaker_timeout);
                if cooled_down {
                    debug!("Circuit breaker transitioning to half-open");
                    state.state = CircuitState::HalfOpen;
                    state.half_open_requests = 1;
                    Ok(())
                } else {
                    Err(self.open_error())
                }
            }
            CircuitState::HalfOpen => {
                if state.half_open_requests < self.config.half_open_max_requests {
                    state.half_open_requests += 1;
                    Ok(())
                } else {
                    Err(self.open_error())
                }
            }
        }
    }

    fn on_success(&self) {
        let mut state = self.lock_state();

        if state.state == CircuitState::HalfOpen {
            debug!("Circuit breaker closing after successful trial call");
        }
        state.state = CircuitState::Closed;
        state.failure_count = 0;
        state.half_open_requests = 0;
    }

    fn on_failure(&self) {
        let mut state = self.lock_state();

        state.failure_count += 1;
        state.last_failure_time = Some(Instant::now());

        match state.state {
            CircuitState::Closed => {
                if state.failure_count >= self.config.circuit_breaker_threshold {
                    warn!(
                        failures = state.failure_count,
                        threshold = self.config.circuit_breaker_threshold,
                        "Circuit breaker opening due to failures"
                    );
                    state.state = CircuitState::Open;
                }
            }
            CircuitState::HalfOpen => {
                debug!("Circuit breaker reopening after failed trial call");
                state.state = CircuitState::Open;
                state.half_open_requests = 0;
            }
            CircuitState::Open => {}
        }
    }

    /// A request-side error says nothing about upstream health; free the trial slot.
    fn on_neutral(&self) {
        let mut state = self.lock_state();

        if state.state == CircuitState::HalfOpen {
            state.half_open_requests = state.half_open_requests.saturating_sub(1);
        }
    }
}

#[async_trait]
impl LlmProvider for ResilientProvider {
    fn info(&self) -> ProviderInfo {
        self.inner.info()
    }

    fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.can_execute()?;

        let call = InFlightCall {
            breaker: self,
            settled: false,
        };
        let result = self.inner.complete(request).await;
        call.settle(&result);

        result
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StopReason, Usage};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FailingProvider {
        calls: AtomicU32,
        error: LlmError,
    }

    #[async_trait]
    impl LlmProvider for FailingProvider {
        fn info(&self) -> ProviderInfo {
            ProviderInfo {
                id: "failing",
                name: "Failing",
                version: "test",
            }
        }

        fn default_model(&self) -> &str {
            "none"
        }

        async fn complete(&self, _: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(self.error.clone())
        }
    }

    fn breaker(inner: Arc<FailingProvider>, threshold: u32, cooldown: Duration) -> ResilientProvider {
        ResilientProvider::new(
            inner,
            ResilienceConfig {
                circuit_breaker_threshold: threshold,
                circuit_breaker_timeout: cooldown,
                half_open_max_requests: 1,
            },
        )
    }

    #[test]
    fn test_config_from_settings() {
        let config = ResilienceConfig::from(&LlmResilienceConfig::default());
        assert_eq!(config.circuit_breaker_threshold, 5);
        assert_eq!(config.circuit_breaker_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_no_retries_on_failure() {
        let inner = Arc::new(FailingProvider {
            calls: AtomicU32::new(0),
            error: LlmError::network("connection reset"),
        });
        let provider = breaker(inner.clone(), 5, Duration::from_secs(30));

        let result = provider.complete(CompletionRequest::new().with_user("x")).await;
        assert!(result.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_opens_after_threshold_and_fails_fast() {
        let inner = Arc::new(FailingProvider {
            calls: AtomicU32::new(0),
            error: LlmError::ServiceUnavailable("down".to_string()),
        });
        let provider = breaker(inner.clone(), 2, Duration::from_secs(30));

        for _ in 0..2 {
            let _ = provider.complete(CompletionRequest::new().with_user("x")).await;
        }
        assert_eq!(provider.state(), CircuitState::Open);

        let err = provider
            .complete(CompletionRequest::new().with_user("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::CircuitOpen { .. }));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_half_open_trial_after_cooldown() {
        let inner = Arc::new(FailingProvider {
            calls: AtomicU32::new(0),
            error: LlmError::network("refused"),
        });
        let provider = breaker(inner.clone(), 1, Duration::ZERO);

        let _ = provider.complete(CompletionRequest::new().with_user("x")).await;
        assert_eq!(provider.state(), CircuitState::Open);

        // Zero cooldown: the next call is let through as a trial call and reopens the circuit
        let _ = provider.complete(CompletionRequest::new().with_user("x")).await;
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.state(), CircuitState::Open);
    }

    #[tokio::test]
    async fn test_request_errors_do_not_trip_breaker() {
        let inner = Arc::new(FailingProvider {
            calls: AtomicU32::new(0),
            error: LlmError::InvalidRequest("bad".to_string()),
        });
        let provider = breaker(inner.clone(), 1, Duration::from_secs(30));

        let _ = provider.complete(CompletionRequest::new().with_user("x")).await;
        assert_eq!(provider.state(), CircuitState::Closed);
    }

    /// Fails the first call, hangs on the second, answers every later one
    struct FlakyProvider {
        calls: AtomicU32,
    }

    #[async_trait]
    impl LlmProvider for FlakyProvider {
        fn info(&self) -> ProviderInfo {
            ProviderInfo {
                id: "flaky",
                name: "Flaky",
                version: "test",
            }
        }

        fn default_model(&self) -> &str {
            "none"
        }

        async fn complete(&self, _: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            match self.calls.fetch_add(1, Ordering::SeqCst) {
                0 => Err(LlmError::network("connection reset")),
                1 => std::future::pending().await,
                _ => Ok(CompletionResponse {
                    id: "ok".to_string(),
                    model: "none".to_string(),
                    text: "The identifier matches common administrative patterns.".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                    created: None,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_cancelled_half_open_trial_reopens_and_recovers() {
        let inner = Arc::new(FlakyProvider {
            calls: AtomicU32::new(0),
        });
        let provider = ResilientProvider::new(
            inner.clone(),
            ResilienceConfig {
                circuit_breaker_threshold: 1,
                circuit_breaker_timeout: Duration::from_millis(10),
                half_open_max_requests: 1,
            },
        );

        let first = provider.complete(CompletionRequest::new().with_user("x")).await;
        assert!(first.is_err());
        assert_eq!(provider.state(), CircuitState::Open);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let trial = tokio::time::timeout(
            Duration::from_millis(50),
            provider.complete(CompletionRequest::new().with_user("x")),
        )
        .await;
        assert!(trial.is_err());
        assert_eq!(provider.state(), CircuitState::Open);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let recovered = provider
            .complete(CompletionRequest::new().with_user("x"))
            .await;
        assert!(recovered.is_ok());
        assert_eq!(provider.state(), CircuitState::Closed);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancelled_calls_count_toward_threshold() {
        let inner = Arc::new(FlakyProvider {
            calls: AtomicU32::new(1),
        });
        let provider = ResilientProvider::new(
            inner,
            ResilienceConfig {
                circuit_breaker_threshold: 1,
                circuit_breaker_timeout: Duration::from_secs(30),
                half_open_max_requests: 1,
            },
        );

        let hung = tokio::time::timeout(
            Duration::from_millis(20),
            provider.complete(CompletionRequest::new().with_user("x")),
        )
        .await;
        assert!(hung.is_err());
        assert_eq!(provider.state(), CircuitState::Open);
    }

    #[tokio::test]
    async fn test_request_error_during_trial_frees_the_slot() {
        let inner = Arc::new(FailingProvider {
            calls: AtomicU32::new(0),
            error: LlmError::InvalidRequest("bad".to_string()),
        });
        let provider = breaker(inner.clone(), 1, Duration::ZERO);
        provider.on_failure();
        assert_eq!(provider.state(), CircuitState::Open);

        for _ in 0..3 {
            let err = provider
                .complete(CompletionRequest::new().with_user("x"))
                .await
                .unwrap_err();
            assert!(matches!(err, LlmError::InvalidRequest(_)));
        }
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }
}
