use serde::Serialize;

/// Standard response envelope: success flag, code, message and optional payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    /// Successful envelope without payload (create/update/delete)
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: 200,
            message: Some(message.into()),
            data: None,
        }
    }
}
