//! Generate-or-fallback access to the text-generation backend.
//!
//! Every piece of generated prose in the report goes through
//! [`TextGenerator::generate_or`]. The backend is optional: without one
//! (offline mode, no LLM config) every call returns its fallback. Backend
//! errors, empty answers and timeouts are logged and also end in the
//! fallback, so callers never see a failure.

use crate::api::AskAsync;
use crate::utils::truncate_for_log;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

/// Default upper bound for a single generation call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

pub struct TextGenerator<T> {
    backend: Option<T>,
    call_timeout: Duration,
    deadline: Option<Instant>,
}

impl<T> TextGenerator<T> {
    pub fn new(backend: T) -> Self {
        Self {
            backend: Some(backend),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            deadline: None,
        }
    }

    /// A generator without backend; every call yields its fallback.
    pub fn offline() -> Self {
        Self {
            backend: None,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            deadline: None,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Run-level deadline. Calls in flight when it passes are abandoned and
    /// later calls return immediately.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }
}

impl<T> TextGenerator<T>
where
    T: AskAsync<Response = String>,
{
    /// Ask the backend. `None` when there is no backend, the call fails or
    /// times out, or the answer is blank.
    pub async fn generate(&self, prompt: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;

        let now = Instant::now();
        let mut limit = now + self.call_timeout;
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                debug!("Generation deadline passed; skipping call");
                return None;
            }
            limit = limit.min(deadline);
        }

        match timeout_at(limit, backend.ask(prompt)).await {
            Ok(Ok(answer)) => {
                let answer = answer.trim();
                if answer.is_empty() {
                    warn!("Text generation returned an empty answer; using fallback");
                    None
                } else {
                    debug!(answer = %truncate_for_log(answer, 200), "Generated text");
                    Some(answer.to_string())
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Text generation failed; using fallback");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.call_timeout.as_millis(),
                    "Text generation timed out; using fallback"
                );
                None
            }
        }
    }

    /// [`Self::generate`], or `fallback` when nothing usable came back.
    pub async fn generate_or(&self, prompt: &str, fallback: String) -> String {
        self.generate(prompt).await.unwrap_or(fallback)
    }
}

#[cfg(test)]
pub(crate) mod stubs {
    //! Deterministic backends for tests.

    use crate::api::AskAsync;
    use std::cell::Cell;
    use std::error::Error;
    use std::rc::Rc;
    use std::time::Duration;

    /// Answers with a fixed prefix plus the first prompt line.
    #[derive(Debug, Clone)]
    pub struct Echo;

    impl AskAsync for Echo {
        type Response = String;

        async fn ask(&self, text: &str) -> Result<String, Box<dyn Error>> {
            Ok(format!("echo: {}", text.lines().next().unwrap_or_default()))
        }
    }

    #[derive(Debug, Clone)]
    pub struct Canned(pub &'static str);

    impl AskAsync for Canned {
        type Response = String;

        async fn ask(&self, _text: &str) -> Result<String, Box<dyn Error>> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Debug, Clone)]
    pub struct Failing;

    impl AskAsync for Failing {
        type Response = String;

        async fn ask(&self, _text: &str) -> Result<String, Box<dyn Error>> {
            Err("connection refused".into())
        }
    }

    /// Counts concurrent calls; the shared cell holds the highest count seen.
    #[derive(Debug, Default)]
    pub struct InFlight {
        current: Cell<usize>,
        peak: Rc<Cell<usize>>,
    }

    impl InFlight {
        pub fn new() -> (Self, Rc<Cell<usize>>) {
            let stub = Self::default();
            let peak = Rc::clone(&stub.peak);
            (stub, peak)
        }
    }

    impl AskAsync for InFlight {
        type Response = String;

        async fn ask(&self, _text: &str) -> Result<String, Box<dyn Error>> {
            self.current.set(self.current.get() + 1);
            self.peak.set(self.peak.get().max(self.current.get()));
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.current.set(self.current.get() - 1);
            Ok("answer".to_string())
        }
    }

    /// Sleeps before answering.
    #[derive(Debug, Clone)]
    pub struct Slow(pub Duration);

    impl AskAsync for Slow {
        type Response = String;

        async fn ask(&self, _text: &str) -> Result<String, Box<dyn Error>> {
            tokio::time::sleep(self.0).await;
            Ok("too late".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::stubs::*;
    use super::*;

    #[tokio::test]
    async fn test_offline_returns_fallback() {
        let generator = TextGenerator::<Echo>::offline();
        assert!(!generator.is_available());
        assert_eq!(generator.generate("hi").await, None);
        assert_eq!(generator.generate_or("hi", "fb".into()).await, "fb");
    }

    #[tokio::test]
    async fn test_answer_is_trimmed() {
        let generator = TextGenerator::new(Canned("  insight \n"));
        assert_eq!(generator.generate("x").await.as_deref(), Some("insight"));
    }

    #[tokio::test]
    async fn test_blank_answer_is_absent() {
        let generator = TextGenerator::new(Canned("   "));
        assert_eq!(generator.generate_or("x", "fb".into()).await, "fb");
    }

    #[tokio::test]
    async fn test_failure_returns_fallback() {
        let generator = TextGenerator::new(Failing);
        assert_eq!(generator.generate_or("x", "fb".into()).await, "fb");
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_timeout_returns_fallback() {
        let generator = TextGenerator::new(Slow(Duration::from_secs(10)))
            .with_call_timeout(Duration::from_secs(1));
        assert_eq!(generator.generate_or("x", "fb".into()).await, "fb");
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_caps_call() {
        let generator = TextGenerator::new(Slow(Duration::from_secs(10)))
            .with_deadline(Instant::now() + Duration::from_secs(2));
        let started = Instant::now();
        assert_eq!(generator.generate("x").await, None);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_skips_backend() {
        let generator = TextGenerator::new(Echo).with_deadline(Instant::now());
        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(generator.generate("x").await, None);
    }

    #[tokio::test]
    async fn test_echo_answers() {
        let generator = TextGenerator::new(Echo);
        assert_eq!(
            generator.generate("first\nsecond").await.as_deref(),
            Some("echo: first")
        );
    }
}
