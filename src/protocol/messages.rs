//! Request and reply message types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Request kind tag for an exchange request.
pub const PAWN_CODE: &str = "PAWN";
/// Reply tag for an accepted offer.
pub const ACCEPT_CODE: &str = "ACCEPT";
/// Reply tag for a rejected offer.
pub const REJECT_CODE: &str = "REJECT";

/// The kind of request carried by an [`Offer`].
///
/// Anything other than `PAWN` is kept verbatim so it can be logged, but the
/// router never acts on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestKind {
    /// Exchange one unit for another.
    Pawn,
    /// Any unrecognized tag, including the empty one.
    Unsupported(String),
}

impl Default for RequestKind {
    fn default() -> Self {
        RequestKind::Unsupported(String::new())
    }
}

impl From<String> for RequestKind {
    fn from(code: String) -> Self {
        if code == PAWN_CODE {
            RequestKind::Pawn
        } else {
            RequestKind::Unsupported(code)
        }
    }
}

impl From<RequestKind> for String {
    fn from(kind: RequestKind) -> Self {
        match kind {
            RequestKind::Pawn => PAWN_CODE.to_string(),
            RequestKind::Unsupported(code) => code,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Pawn => f.write_str(PAWN_CODE),
            RequestKind::Unsupported(code) => f.write_str(code),
        }
    }
}

/// An offer made by a client: the value it hands over and the minimum value
/// it wants back.
///
/// Missing fields decode to their defaults, so `{"code":"PAWN"}` is an offer
/// of 0 demanding 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Offer {
    #[serde(rename = "code")]
    pub kind: RequestKind,
    pub offer: i64,
    pub demand: i64,
}

impl Offer {
    /// Create an exchange request.
    pub fn pawn(offer: i64, demand: i64) -> Self {
        Self {
            kind: RequestKind::Pawn,
            offer,
            demand,
        }
    }
}

/// Result tag of an [`Answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerCode {
    Accept,
    Reject,
}

impl AnswerCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerCode::Accept => ACCEPT_CODE,
            AnswerCode::Reject => REJECT_CODE,
        }
    }
}

/// The reply to an [`Offer`].
///
/// `value` is only present on acceptance and is omitted from the encoding
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub code: AnswerCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl Answer {
    /// An accepted answer handing `value` back to the caller.
    pub fn accept(value: i64) -> Self {
        Self {
            code: AnswerCode::Accept,
            value: Some(value),
        }
    }

    /// A rejection. Carries no value.
    pub fn reject() -> Self {
        Self {
            code: AnswerCode::Reject,
            value: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.code == AnswerCode::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_decodes_with_code_field() {
        let offer: Offer = serde_json::from_str(r#"{"code":"PAWN","offer":7,"demand":1}"#).unwrap();
        assert_eq!(offer, Offer::pawn(7, 1));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let offer: Offer = serde_json::from_str(r#"{"code":"PAWN","demand":1}"#).unwrap();
        assert_eq!(offer.offer, 0);
        assert_eq!(offer.demand, 1);

        let offer: Offer = serde_json::from_str("{}").unwrap();
        assert_eq!(offer.kind, RequestKind::Unsupported(String::new()));
    }

    #[test]
    fn unknown_code_is_kept() {
        let offer: Offer = serde_json::from_str(r#"{"code":"SELL","offer":3}"#).unwrap();
        assert_eq!(offer.kind, RequestKind::Unsupported("SELL".into()));
        assert_eq!(offer.kind.to_string(), "SELL");
    }

    #[test]
    fn rejection_omits_value() {
        let json = serde_json::to_string(&Answer::reject()).unwrap();
        assert_eq!(json, r#"{"code":"REJECT"}"#);

        let json = serde_json::to_string(&Answer::accept(0)).unwrap();
        assert_eq!(json, r#"{"code":"ACCEPT","value":0}"#);
    }
}
