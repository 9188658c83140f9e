use serde::Serialize;

pub const NO_OFFERS_MESSAGE: &str = "No offers available for this user.";

/// The four-field record returned to callers whatever the feed called them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedOffer {
    pub name: String,
    pub link: String,
    pub payout: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer: Option<NormalizedOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn offer(offer: NormalizedOffer) -> Self {
        Self {
            success: true,
            offer: Some(offer),
            message: None,
            error: None,
        }
    }

    pub fn no_offers() -> Self {
        Self {
            success: false,
            offer: None,
            message: Some(NO_OFFERS_MESSAGE.to_string()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            offer: None,
            message: None,
            error: Some(error.into()),
        }
    }
}
