use serde_json::Value;

/// The body of a query response, after the attempt to read it as JSON.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Structured(Value),
    Raw(String),
}

impl ResponseBody {
    pub fn parse(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => ResponseBody::Structured(value),
            Err(_) => ResponseBody::Raw(body),
        }
    }

    /// Render the body for display.
    ///
    /// Structured bodies are pretty-printed with two-space indentation in the
    /// order the server sent the keys. Raw bodies are returned unmodified.
    pub fn render(&self) -> String {
        match self {
            ResponseBody::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Raw(text) => text.clone(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ResponseBody::Structured(_))
    }
}
