use serde::{Deserialize, Serialize};

/// Destination of a withdrawal, kept verbatim on the transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub bank_name: String,
    pub account_number: String,
    pub ifsc_code: String,
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Error, thiserror::Error)]
pub enum BankDetailsError {
    #[error("bank name is required")]
    MissingBankName,

    #[error("account number must be 9 to 18 digits")]
    InvalidAccountNumber,

    #[error("IFSC code must look like ABCD0123456")]
    InvalidIfscCode,
}

impl BankDetails {
    pub fn validate(&self) -> Result<(), BankDetailsError> {
        if self.bank_name.trim().is_empty() {
            return Err(BankDetailsError::MissingBankName);
        }

        let account_number = self.account_number.as_bytes();
        if !(9..=18).contains(&account_number.len())
            || !account_number.iter().all(u8::is_ascii_digit)
        {
            return Err(BankDetailsError::InvalidAccountNumber);
        }

        if !is_valid_ifsc_code(&self.ifsc_code) {
            return Err(BankDetailsError::InvalidIfscCode);
        }

        Ok(())
    }
}

/// 4 letter bank code, a literal `0`, then a 6 character branch code
fn is_valid_ifsc_code(ifsc_code: &str) -> bool {
    let bytes = ifsc_code.as_bytes();
    if bytes.len() != 11 {
        return false;
    }

    let (bank, rest) = bytes.split_at(4);
    let (zero, branch) = rest.split_at(1);

    bank.iter().all(u8::is_ascii_uppercase)
        && zero == b"0"
        && branch.iter().all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit())
}

#[uniffi::export]
fn bank_details_validate(bank_details: BankDetails) -> Result<(), BankDetailsError> {
    bank_details.validate()
}
