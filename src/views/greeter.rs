//! The greeter page: a form asking for a name, and the greeting it produced.

use askama::Template;
use axum::{response::Html, Form, Router};
use axum_extra::{
    extract::WithRejection,
    routing::{RouterExt, TypedPath},
};
use tracing::instrument;

use crate::{
    core::greeting::greeting_service::{self, GreetingRequest},
    infra::{
        error::{ApiResult, ClientError},
        state::AppState,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().typed_get(show).typed_post(submit)
}

/// The greeter page. The greeting is only shown when there is one.
#[derive(Template, Clone, Debug, Default, PartialEq, Eq)]
#[template(path = "greeter.html")]
pub struct GreeterTemplate {
    message: Option<String>,
}

impl GreeterTemplate {
    /// Constructs the page, leaving out empty messages.
    pub fn new(message: Option<&str>) -> Self {
        Self {
            message: message.filter(|m| !m.is_empty()).map(str::to_string),
        }
    }
}

/// Renders the greeter page as html.
pub fn render(message: Option<&str>) -> Result<String, askama::Error> {
    GreeterTemplate::new(message).render()
}

#[derive(TypedPath)]
#[typed_path("/", rejection(ClientError))]
pub struct GreeterPath;

/// Display the empty form.
pub async fn show(_: GreeterPath) -> ApiResult<Html<String>> {
    Ok(Html(render(None)?))
}

/// Greet the submitted name.
#[instrument(skip_all)]
pub async fn submit(
    _: GreeterPath,
    WithRejection(Form(request), _): WithRejection<Form<GreetingRequest>, ClientError>,
) -> ApiResult<Html<String>> {
    let result = greeting_service::respond(&request);
    Ok(Html(render(Some(result.message()))?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_has_no_greeting() {
        let html = render(None).unwrap();
        assert!(html.contains("<title>Greeter App</title>"));
        assert!(html.contains("<h1>Greeter</h1>"));
        assert!(html.contains(r#"<input type="text" id="name" name="name">"#));
        assert!(html.contains(r#"type="submit""#));
        assert!(!html.contains(r#"id="greeting""#));
    }

    #[test]
    fn empty_message_is_not_shown() {
        assert_eq!(render(None).unwrap(), render(Some("")).unwrap());
    }

    #[test]
    fn message_is_shown_without_padding() {
        let html = render(Some("Hello, World!")).unwrap();
        assert!(html.contains(r#"<p id="greeting">Hello, World!</p>"#));
    }

    #[test]
    fn message_is_escaped() {
        let html = render(Some("Hello, <b>Tom & Jerry</b>!")).unwrap();
        assert!(html.contains(r#"<p id="greeting">Hello, &lt;b&gt;Tom &amp; Jerry&lt;/b&gt;!</p>"#));
    }

    #[test]
    fn rendering_is_idempotent() {
        let first = render(Some("Hello, Alice!")).unwrap();
        let second = render(Some("Hello, Alice!")).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn show_renders_empty_form() {
        let Html(page) = show(GreeterPath).await.unwrap();
        assert_eq!(render(None).unwrap(), page);
    }

    #[tokio::test]
    async fn submit_greets_name() {
        let Html(page) = submit(
            GreeterPath,
            WithRejection(Form(GreetingRequest::from("World")), Default::default()),
        )
        .await
        .unwrap();
        assert_eq!(render(Some("Hello, World!")).unwrap(), page);
    }

    #[tokio::test]
    async fn submit_without_name_prompts() {
        let Html(page) = submit(
            GreeterPath,
            WithRejection(Form(GreetingRequest::default()), Default::default()),
        )
        .await
        .unwrap();
        assert_eq!(render(Some(greeting_service::PROMPT)).unwrap(), page);
    }
}
