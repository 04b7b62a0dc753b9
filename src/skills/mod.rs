//! The three command-line skills, as library functions over any [`Provider`].
//!
//! [`Provider`]: crate::providers::base::Provider

pub mod image_reader;
pub mod transcriber;
pub mod web_researcher;

use anyhow::Result;

use crate::providers::base::Reply;
use crate::providers::utils::{content_text, format_api_error};

/// Turn the outcome of a non-streamed call into the line printed on stdout.
/// API failures and transport errors are rendered as text, not propagated.
pub(crate) fn render_reply(reply: Result<Reply>) -> String {
    match reply {
        Ok(Reply::Success { content, .. }) => content_text(&content),
        Ok(Reply::Failure { code, message }) => format_api_error(&code, &message),
        Err(err) => format!("Error: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::base::Usage;
    use anyhow::anyhow;
    use serde_json::json;

    #[test]
    fn test_render_success() {
        let reply = Reply::Success {
            content: json!([{"text": "hello"}]),
            usage: Usage::default(),
        };
        assert_eq!(render_reply(Ok(reply)), "hello");
    }

    #[test]
    fn test_render_failure() {
        let reply = Reply::Failure {
            code: "400".to_string(),
            message: "bad request".to_string(),
        };
        assert_eq!(render_reply(Ok(reply)), "API Error 400: bad request");
    }

    #[test]
    fn test_render_transport_error() {
        let err = anyhow!("connection refused").context("Request to http://x failed");
        assert_eq!(
            render_reply(Err(err)),
            "Error: Request to http://x failed: connection refused"
        );
    }
}
