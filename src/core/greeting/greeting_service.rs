//! A service for greeting someone.

use serde::Deserialize;
use tracing::instrument;

/// The message given when no name was submitted.
pub const PROMPT: &str = "Please enter a name.";

/// A submitted greeting form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GreetingRequest {
    /// The name as submitted, without any trimming.
    #[serde(rename = "name", default)]
    raw_name: Option<String>,
}

impl GreetingRequest {
    /// Constructs a new [`GreetingRequest`].
    pub fn new(raw_name: Option<String>) -> Self {
        Self { raw_name }
    }

    /// The submitted name, if any.
    pub fn raw_name(&self) -> Option<&str> {
        self.raw_name.as_deref()
    }
}

impl From<&str> for GreetingRequest {
    fn from(name: &str) -> Self {
        Self::new(Some(name.to_string()))
    }
}

/// The outcome of a [`GreetingRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GreetingResult {
    message: String,
}

impl GreetingResult {
    /// The message to show.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Takes the message out of the result.
    pub fn into_message(self) -> String {
        self.message
    }
}

/// Returns a greeting based on someone's name.
#[instrument(ret)]
pub fn greet(name: &str) -> String {
    format!("Hello, {name}!")
}

/// Greets the submitted name, or asks for one if it is absent or empty.
///
/// Only emptiness is checked. A name of only whitespace is still greeted,
/// but a warning is logged for it.
#[instrument(ret)]
pub fn respond(request: &GreetingRequest) -> GreetingResult {
    let message = match request.raw_name() {
        Some(name) if !name.is_empty() => {
            if name.trim().is_empty() {
                tracing::warn!(len = name.len(), "greeting a name that is only whitespace");
            }
            greet(name)
        }
        _ => PROMPT.to_string(),
    };
    GreetingResult { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greet_wraps_name() {
        assert_eq!("Hello, World!", greet("World"));
    }

    #[test]
    fn present_name_is_greeted() {
        let result = respond(&GreetingRequest::from("Alice"));
        assert_eq!("Hello, Alice!", result.message());
    }

    #[test]
    fn missing_name_prompts() {
        let result = respond(&GreetingRequest::new(None));
        assert_eq!(PROMPT, result.message());
    }

    #[test]
    fn empty_name_prompts() {
        let result = respond(&GreetingRequest::from(""));
        assert_eq!("Please enter a name.", result.into_message());
    }

    #[test]
    fn whitespace_name_is_not_trimmed() {
        let result = respond(&GreetingRequest::from("   "));
        assert_eq!("Hello,    !", result.message());
    }

    #[test]
    fn name_is_kept_verbatim() {
        let result = respond(&GreetingRequest::from(" Bob & <Eve> "));
        assert_eq!("Hello,  Bob & <Eve> !", result.message());
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Counts the warnings logged while responding to `name`.
    fn warnings_for(name: &str) -> usize {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            respond(&GreetingRequest::from(name));
        });
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        logs.lines().filter(|line| line.contains("WARN")).count()
    }

    #[test]
    fn whitespace_name_logs_a_warning() {
        assert_eq!(1, warnings_for("   "));
    }

    #[test]
    fn regular_name_logs_no_warning() {
        assert_eq!(0, warnings_for("Alice"));
        assert_eq!(0, warnings_for(""));
    }
}
