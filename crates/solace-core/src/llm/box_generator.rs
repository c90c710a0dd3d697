//! BoxReplyGenerator -- object-safe dynamic dispatch wrapper for ReplyGenerator.
//!
//! 1. Define an object-safe `ReplyGeneratorDyn` trait with boxed futures
//! 2. Blanket-impl `ReplyGeneratorDyn` for all `T: ReplyGenerator`
//! 3. `BoxReplyGenerator` wraps `Box<dyn ReplyGeneratorDyn>` and delegates

use futures_util::future::BoxFuture;

use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

use super::generator::ReplyGenerator;

/// Object-safe version of [`ReplyGenerator`] with boxed futures.
pub trait ReplyGeneratorDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn input_mode(&self) -> InputMode;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, GenerationFailure>>;
}

impl<T: ReplyGenerator> ReplyGeneratorDyn for T {
    fn name(&self) -> &str {
        ReplyGenerator::name(self)
    }

    fn model(&self) -> &str {
        ReplyGenerator::model(self)
    }

    fn input_mode(&self) -> InputMode {
        ReplyGenerator::input_mode(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, GenerationFailure>> {
        Box::pin(self.generate(request))
    }
}

/// Type-erased reply generator for backend selection by configuration.
///
/// Since `ReplyGenerator` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxReplyGenerator` erases the concrete type and implements
/// `ReplyGenerator` itself, so sessions can be generic over either.
pub struct BoxReplyGenerator {
    inner: Box<dyn ReplyGeneratorDyn>,
}

impl BoxReplyGenerator {
    /// Wrap a concrete `ReplyGenerator` in a type-erased box.
    pub fn new<T: ReplyGenerator + 'static>(generator: T) -> Self {
        Self {
            inner: Box::new(generator),
        }
    }
}

impl ReplyGenerator for BoxReplyGenerator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    fn input_mode(&self) -> InputMode {
        self.inner.input_mode()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        self.inner.generate_boxed(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl ReplyGenerator for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        fn input_mode(&self) -> InputMode {
            InputMode::SinglePrompt
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
            Ok(request.input.to_prompt())
        }
    }

    #[tokio::test]
    async fn test_box_delegates_to_inner() {
        let boxed = BoxReplyGenerator::new(Echo);
        assert_eq!(ReplyGenerator::name(&boxed), "echo");
        assert_eq!(ReplyGenerator::model(&boxed), "echo-1");
        assert_eq!(ReplyGenerator::input_mode(&boxed), InputMode::SinglePrompt);

        let reply = ReplyGenerator::generate(&boxed, &GenerationRequest::prompt("hello"))
            .await
            .unwrap();
        assert_eq!(reply, "hello");
    }
}
