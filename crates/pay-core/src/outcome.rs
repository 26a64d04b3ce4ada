//! # Result Codes and Outcomes
//!
//! The gateway reports every payment and details call with a result code.
//! Once the shopper is back from an out-of-band authentication, the code is
//! collapsed into one of four terminal outcomes, each with its own page.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result code of a `/payments` or `/payments/details` call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultCode {
    Authorised,
    PartiallyAuthorised,
    Pending,
    Received,
    Refused,
    Cancelled,
    Error,
    RedirectShopper,
    IdentifyShopper,
    ChallengeShopper,
    PresentToShopper,
    AuthenticationFinished,
    AuthenticationNotRequired,
    /// Any code this build does not know about, kept verbatim
    Unknown(String),
}

impl ResultCode {
    pub fn as_str(&self) -> &str {
        match self {
            ResultCode::Authorised => "Authorised",
            ResultCode::PartiallyAuthorised => "PartiallyAuthorised",
            ResultCode::Pending => "Pending",
            ResultCode::Received => "Received",
            ResultCode::Refused => "Refused",
            ResultCode::Cancelled => "Cancelled",
            ResultCode::Error => "Error",
            ResultCode::RedirectShopper => "RedirectShopper",
            ResultCode::IdentifyShopper => "IdentifyShopper",
            ResultCode::ChallengeShopper => "ChallengeShopper",
            ResultCode::PresentToShopper => "PresentToShopper",
            ResultCode::AuthenticationFinished => "AuthenticationFinished",
            ResultCode::AuthenticationNotRequired => "AuthenticationNotRequired",
            ResultCode::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for ResultCode {
    fn from(raw: &str) -> Self {
        match raw {
            "Authorised" => ResultCode::Authorised,
            "PartiallyAuthorised" => ResultCode::PartiallyAuthorised,
            "Pending" => ResultCode::Pending,
            "Received" => ResultCode::Received,
            "Refused" => ResultCode::Refused,
            "Cancelled" => ResultCode::Cancelled,
            "Error" => ResultCode::Error,
            "RedirectShopper" => ResultCode::RedirectShopper,
            "IdentifyShopper" => ResultCode::IdentifyShopper,
            "ChallengeShopper" => ResultCode::ChallengeShopper,
            "PresentToShopper" => ResultCode::PresentToShopper,
            "AuthenticationFinished" => ResultCode::AuthenticationFinished,
            "AuthenticationNotRequired" => ResultCode::AuthenticationNotRequired,
            other => ResultCode::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ResultCode {
    fn from(raw: String) -> Self {
        ResultCode::from(raw.as_str())
    }
}

impl From<ResultCode> for String {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a redirect-completed payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Pending,
    Failed,
    Error,
}

impl Outcome {
    /// Map a result code to its outcome. A missing code is an error.
    pub fn from_result_code(code: Option<&ResultCode>) -> Self {
        match code {
            Some(ResultCode::Authorised) => Outcome::Success,
            Some(ResultCode::Pending) | Some(ResultCode::Received) => Outcome::Pending,
            Some(ResultCode::Refused) => Outcome::Failed,
            _ => Outcome::Error,
        }
    }

    /// Suffix appended to `/result`
    pub fn suffix(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Pending => "pending",
            Outcome::Failed => "failed",
            Outcome::Error => "error",
        }
    }

    /// Location the shopper is redirected to
    pub fn redirect_path(&self) -> String {
        format!("/result{}", self.suffix())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome_of(raw: &str) -> Outcome {
        Outcome::from_result_code(Some(&ResultCode::from(raw)))
    }

    #[test]
    fn test_authorised_is_success() {
        assert_eq!(outcome_of("Authorised"), Outcome::Success);
    }

    #[test]
    fn test_pending_and_received_are_pending() {
        assert_eq!(outcome_of("Pending"), Outcome::Pending);
        assert_eq!(outcome_of("Received"), Outcome::Pending);
    }

    #[test]
    fn test_refused_is_failed() {
        assert_eq!(outcome_of("Refused"), Outcome::Failed);
    }

    #[test]
    fn test_everything_else_is_error() {
        for raw in [
            "Cancelled",
            "Error",
            "PartiallyAuthorised",
            "RedirectShopper",
            "ChallengeShopper",
            "AuthenticationFinished",
            "SomeBrandNewCode",
        ] {
            assert_eq!(outcome_of(raw), Outcome::Error, "{raw}");
        }
        assert_eq!(Outcome::from_result_code(None), Outcome::Error);
    }

    #[test]
    fn test_redirect_paths() {
        assert_eq!(Outcome::Success.redirect_path(), "/resultsuccess");
        assert_eq!(Outcome::Pending.redirect_path(), "/resultpending");
        assert_eq!(Outcome::Failed.redirect_path(), "/resultfailed");
        assert_eq!(Outcome::Error.redirect_path(), "/resulterror");
    }

    #[test]
    fn test_unknown_code_keeps_raw_value() {
        let code: ResultCode = serde_json::from_str("\"Frobnicated\"").unwrap();
        assert_eq!(code, ResultCode::Unknown("Frobnicated".into()));
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"Frobnicated\"");
    }
}
