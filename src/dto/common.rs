use serde::Serialize;

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A message for the front-end to show once
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

/// Envelope for every successful response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub messages: Vec<FlashMessage>,
    pub data: Option<T>,
    /// Page the front-end should go to next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            messages: Vec::new(),
            data: Some(data),
            redirect: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::success(data).with_message(FlashLevel::Success, message)
    }

    pub fn with_message(mut self, level: FlashLevel, text: impl Into<String>) -> Self {
        self.messages.push(FlashMessage {
            level,
            text: text.into(),
        });
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = FlashMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::success(json!({"id": 3}))
            .with_message(FlashLevel::Warning, "Invalid promo code")
            .with_message(FlashLevel::Success, "Ride finished")
            .redirect_to("/review/3/");

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["id"], 3);
        assert_eq!(value["messages"][0]["level"], "warning");
        assert_eq!(value["messages"][1]["text"], "Ride finished");
        assert_eq!(value["redirect"], "/review/3/");
    }

    #[test]
    fn test_redirect_omitted_when_unset() {
        let value = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert!(value.get("redirect").is_none());
        assert_eq!(value["messages"], json!([]));
    }
}
