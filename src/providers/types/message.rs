use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::content::{ContentPart, MessageContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn new(role: Role, content: MessageContent) -> Result<Self> {
        let msg = Self { role, content };
        msg.validate()?;
        Ok(msg)
    }

    fn validate(&self) -> Result<()> {
        match &self.content {
            MessageContent::Parts(parts) if parts.is_empty() => {
                Err(anyhow!("Message must include at least one content part"))
            }
            _ => Ok(()),
        }
    }

    /// Plain-text user message.
    pub fn user(text: &str) -> Result<Self> {
        Self::new(Role::User, MessageContent::Text(text.to_string()))
    }

    /// User message built from multimodal parts.
    pub fn user_parts(parts: Vec<ContentPart>) -> Result<Self> {
        Self::new(Role::User, MessageContent::Parts(parts))
    }

    /// Log-friendly rendering; media parts show only their size.
    pub fn summary(&self) -> String {
        let body = match &self.content {
            MessageContent::Text(text) => format!("content:text\n{}", text),
            MessageContent::Parts(parts) => parts
                .iter()
                .map(ContentPart::summary)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        format!("message:{:?}\n{}", self.role, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message() -> Result<()> {
        let message = Message::user("abcd")?;
        assert_eq!(message.role, Role::User);
        assert_eq!(serde_json::to_value(&message)?, json!({"role": "user", "content": "abcd"}));
        Ok(())
    }

    #[test]
    fn test_user_parts_message() -> Result<()> {
        let message = Message::user_parts(vec![ContentPart::Audio(
            "data:audio/mpeg;base64,AA==".to_string(),
        )])?;
        assert_eq!(
            serde_json::to_value(&message)?,
            json!({"role": "user", "content": [{"audio": "data:audio/mpeg;base64,AA=="}]})
        );
        Ok(())
    }

    #[test]
    fn test_message_validation() {
        assert!(Message::user_parts(vec![]).is_err());
        assert!(Message::new(Role::User, MessageContent::Parts(vec![])).is_err());
        assert!(Message::user_parts(vec![ContentPart::text("fine")]).is_ok());
    }

    #[test]
    fn test_summary() -> Result<()> {
        let message = Message::user("hello")?;
        assert_eq!(message.summary(), "message:User\ncontent:text\nhello");
        Ok(())
    }

    #[test]
    fn test_summary_of_parts_omits_media_payload() -> Result<()> {
        let message = Message::user_parts(vec![
            ContentPart::Image("data:image/png;base64,QUJD".to_string()),
            ContentPart::text("What is this?"),
        ])?;
        let summary = message.summary();
        assert_eq!(
            summary,
            "message:User\ncontent:image (26 bytes)\ncontent:text\nWhat is this?"
        );
        assert!(!summary.contains("QUJD"));
        Ok(())
    }
}
