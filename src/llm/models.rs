use serde::{Deserialize, Serialize};

/// One prior exchange in a conversation, supplied by the client on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ConversationTurn {
    User {
        #[serde(default)]
        content: String,
    },
    Assistant {
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sql: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
}

#[cfg(test)]
impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        ConversationTurn::User {
            content: content.into(),
        }
    }

    pub fn assistant(sql: impl Into<String>, explanation: impl Into<String>) -> Self {
        let explanation = explanation.into();
        ConversationTurn::Assistant {
            content: explanation.clone(),
            sql: Some(sql.into()),
            explanation: Some(explanation),
        }
    }
}

// Input data for SQL generation
#[derive(Debug, Clone, Copy)]
pub struct SqlGenerationInput<'a> {
    pub question: &'a str,
    pub schema: &'a str,
    /// Already truncated to the configured window, oldest first
    pub history: &'a [ConversationTurn],
}

// Output from SQL generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlGenerationOutput {
    pub sql: String,
    #[serde(default)]
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn turns_deserialize_from_client_history() {
        let turns: Vec<ConversationTurn> = serde_json::from_value(json!([
            {"role": "user", "content": "Top rated movies"},
            {"role": "assistant", "sql": "SELECT 1", "explanation": "Lists movies"},
            {"role": "assistant", "content": "plain reply"}
        ]))
        .unwrap();

        assert_eq!(turns[0], ConversationTurn::user("Top rated movies"));
        assert_eq!(
            turns[1],
            ConversationTurn::Assistant {
                content: String::new(),
                sql: Some("SELECT 1".to_string()),
                explanation: Some("Lists movies".to_string()),
            }
        );
        assert!(matches!(
            &turns[2],
            ConversationTurn::Assistant { sql: None, .. }
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = serde_json::from_value::<ConversationTurn>(json!({"role": "system", "content": "x"}));
        assert!(parsed.is_err());
    }
}
