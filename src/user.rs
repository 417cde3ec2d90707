use serde::{Deserialize, Serialize};

/// Accepted one-time password
///
/// This is a demo stand-in, there is no delivery channel and no secret behind it
pub const DEMO_OTP: &str = "1234";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub mobile_number: String,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum SessionState {
    Anonymous,
    Unverified,
    Verified,
}

impl User {
    pub fn unverified(mobile_number: impl Into<String>) -> Self {
        Self { mobile_number: mobile_number.into(), is_verified: false }
    }
}

impl SessionState {
    pub fn of(user: Option<&User>) -> Self {
        match user {
            None => Self::Anonymous,
            Some(user) if user.is_verified => Self::Verified,
            Some(_) => Self::Unverified,
        }
    }
}

/// 10 digits, starting with 6, 7, 8 or 9
#[uniffi::export]
pub fn is_valid_mobile_number(mobile_number: &str) -> bool {
    let bytes = mobile_number.as_bytes();

    bytes.len() == 10
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_number_format() {
        assert!(is_valid_mobile_number("9876543210"));
        assert!(is_valid_mobile_number("6000000000"));

        assert!(!is_valid_mobile_number("5876543210"));
        assert!(!is_valid_mobile_number("987654321"));
        assert!(!is_valid_mobile_number("98765432100"));
        assert!(!is_valid_mobile_number("98765x3210"));
        assert!(!is_valid_mobile_number(""));
    }

    #[test]
    fn test_session_state() {
        assert_eq!(SessionState::of(None), SessionState::Anonymous);

        let mut user = User::unverified("9876543210");
        assert_eq!(SessionState::of(Some(&user)), SessionState::Unverified);

        user.is_verified = true;
        assert_eq!(SessionState::of(Some(&user)), SessionState::Verified);
    }

    #[test]
    fn test_user_json_layout() {
        let json = serde_json::to_string(&User::unverified("9876543210")).unwrap();
        assert_eq!(json, r#"{"mobileNumber":"9876543210","isVerified":false}"#);
    }
}
