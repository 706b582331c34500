//! # 受信者識別子の正規化
//!
//! 呼び出し元が渡す組織番号・個人番号を Altinn 3 のアドレス形式に揃える。
//!
//! | 入力 | `CountryCode`（DD） | `Urn`（OED） |
//! |------|--------------------|--------------|
//! | `""` | `""` | `""` |
//! | `urn:altinn:...` | そのまま | そのまま |
//! | `:` を含む | そのまま | そのまま |
//! | 9 桁の数字 | `0192:123456785` | `urn:altinn:organization:identifier-no:123456785` |
//! | 11 桁の数字 | そのまま | `urn:altinn:person:identifier-no:01010112345` |
//! | その他 | そのまま | そのまま |
//!
//! 判定できない値はエラーにせず、そのまま送って Altinn 側の検証に任せる。

use crate::DomainError;

const URN_PREFIX: &str = "urn:altinn:";
const PERSON_URN_PREFIX: &str = "urn:altinn:person:identifier-no:";
const ORGANIZATION_URN_PREFIX: &str = "urn:altinn:organization:identifier-no:";

/// 既定の国コード（ノルウェーの組織番号）
pub const DEFAULT_COUNTRY_CODE: &str = "0192";

/// 国コードの形式（3〜4 桁の数字）を検証する
pub fn validate_country_code(country_code: &str) -> Result<(), DomainError> {
    if !(3..=4).contains(&country_code.len()) || !country_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidSetting {
            name:   "country_code",
            reason: format!("must be 3 or 4 digits, got {country_code:?}"),
        });
    }
    Ok(())
}

/// 受信者の正規化戦略
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientFormatter {
    /// 9 桁の組織番号に `{country_code}:` を付ける
    CountryCode { country_code: String },
    /// 個人番号・組織番号を URN に変換する
    Urn,
}

impl Default for RecipientFormatter {
    fn default() -> Self {
        Self::CountryCode {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl RecipientFormatter {
    pub fn country_code(country_code: impl Into<String>) -> Self {
        Self::CountryCode {
            country_code: country_code.into(),
        }
    }

    /// 受信者識別子を正規化する
    pub fn format(&self, recipient: &str) -> String {
        if recipient.is_empty() || is_preformatted(recipient) {
            return recipient.to_string();
        }

        match self {
            Self::CountryCode { country_code } if is_digits(recipient, 9) => {
                format!("{country_code}:{recipient}")
            }
            Self::Urn if is_digits(recipient, 11) => format!("{PERSON_URN_PREFIX}{recipient}"),
            Self::Urn if is_digits(recipient, 9) => {
                format!("{ORGANIZATION_URN_PREFIX}{recipient}")
            }
            _ => recipient.to_string(),
        }
    }
}

/// URN、または `国コード:番号` 形式になっているか
fn is_preformatted(recipient: &str) -> bool {
    let has_urn_prefix = recipient
        .get(..URN_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(URN_PREFIX));

    has_urn_prefix || recipient.contains(':')
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
