//! # コレスポンデンスクライアント設定
//!
//! 環境変数から Altinn 3 / Maskinporten の接続設定を読み込む。
//! 値はすべて読み込み時に検証し、不備があれば [`ConfigError`] を返す。
//!
//! | 変数 | 内容 | 既定値 |
//! |------|------|--------|
//! | `ALTINN_RESOURCE_ID` | リソース ID | `ALTINN_CORRESPONDENCE_SETTINGS` がなければ必須 |
//! | `ALTINN_CORRESPONDENCE_SETTINGS` | `"resourceId,sender"` 形式の設定 | - |
//! | `ALTINN_ENVIRONMENT` | `development` / `staging` / `production` | `development` |
//! | `ALTINN_BASE_URL` | ベース URL の上書き | 環境ごとの URL |
//! | `ALTINN_COUNTRY_CODE` | 国コード（3〜4 桁） | `0192` |
//! | `ALTINN_IGNORE_RESERVATION` | KRR の予約を無視するか | `true` |
//! | `ALTINN_PRODUCT_LINE` | `dd` / `oed` | `dd` |
//! | `ALTINN_REQUEST_TIMEOUT_SECS` | 1 試行あたりのタイムアウト秒数 | `100` |
//! | `MASKINPORTEN_CLIENT_ID` | クライアント ID | 必須 |
//! | `MASKINPORTEN_ENVIRONMENT` | トークン発行環境 | 必須 |
//! | `MASKINPORTEN_ENCODED_JWK` | Base64 エンコード済み JWK | - |

use std::{env, str::FromStr, time::Duration};

use oed_domain::{
    DomainError,
    product_line::ProductLine,
    recipient::{DEFAULT_COUNTRY_CODE, RecipientFormatter, validate_country_code},
};
use oed_infra::auth::MaskinportenSettings;
use strum::{Display, EnumString};
use thiserror::Error;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

/// Altinn の接続先環境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApiEnvironment {
    /// ローカル開発（TT02 を使う）
    #[default]
    Development,
    /// TT02
    Staging,
    Production,
}

impl ApiEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Development | Self::Staging => "https://platform.tt02.altinn.no",
            Self::Production => "https://platform.altinn.no",
        }
    }
}

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {reason}")]
    Invalid {
        name:   &'static str,
        reason: String,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// コレスポンデンスクライアントの設定
#[derive(Debug, Clone)]
pub struct CorrespondenceConfig {
    pub resource_id:        String,
    /// 送信者名の既定値（`ALTINN_CORRESPONDENCE_SETTINGS` の 2 番目の値）
    pub default_sender:     Option<String>,
    pub environment:        ApiEnvironment,
    pub base_url:           String,
    pub country_code:       String,
    pub ignore_reservation: bool,
    pub product_line:       ProductLine,
    pub request_timeout:    Duration,
    pub maskinporten:       MaskinportenSettings,
}

impl CorrespondenceConfig {
    /// `.env` を読み込んだうえで環境変数から設定を読み込む
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    ///
    /// テストでプロセスの環境変数を書き換えずに済むよう、取得元を差し替えられる。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let (settings_resource_id, default_sender) =
            match get("ALTINN_CORRESPONDENCE_SETTINGS") {
                Some(settings) => {
                    let (resource_id, sender) = parse_resource_settings(&settings)?;
                    (Some(resource_id), Some(sender))
                }
                None => (None, None),
            };
        let resource_id = get("ALTINN_RESOURCE_ID")
            .or(settings_resource_id)
            .ok_or(ConfigError::Missing("ALTINN_RESOURCE_ID"))?;

        let environment: ApiEnvironment =
            parse_or_default("ALTINN_ENVIRONMENT", get("ALTINN_ENVIRONMENT"))?;
        let base_url = match get("ALTINN_BASE_URL") {
            Some(url) => {
                Url::parse(&url).map_err(|e| ConfigError::Invalid {
                    name:   "ALTINN_BASE_URL",
                    reason: e.to_string(),
                })?;
                url
            }
            None => environment.base_url().to_string(),
        };

        let country_code =
            get("ALTINN_COUNTRY_CODE").unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        validate_country_code(&country_code)?;

        let ignore_reservation = match get("ALTINN_IGNORE_RESERVATION") {
            Some(value) => parse_bool("ALTINN_IGNORE_RESERVATION", &value)?,
            None => true,
        };
        let product_line: ProductLine =
            parse_or_default("ALTINN_PRODUCT_LINE", get("ALTINN_PRODUCT_LINE"))?;
        let request_timeout = match get("ALTINN_REQUEST_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(value.trim().parse().map_err(|_| {
                ConfigError::Invalid {
                    name:   "ALTINN_REQUEST_TIMEOUT_SECS",
                    reason: format!("秒数として解釈できません: {value}"),
                }
            })?),
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let maskinporten = MaskinportenSettings {
            client_id:   get("MASKINPORTEN_CLIENT_ID")
                .ok_or(ConfigError::Missing("MASKINPORTEN_CLIENT_ID"))?,
            environment: get("MASKINPORTEN_ENVIRONMENT")
                .ok_or(ConfigError::Missing("MASKINPORTEN_ENVIRONMENT"))?,
            encoded_jwk: get("MASKINPORTEN_ENCODED_JWK"),
        };

        Ok(Self {
            resource_id,
            default_sender,
            environment,
            base_url,
            country_code,
            ignore_reservation,
            product_line,
            request_timeout,
            maskinporten,
        })
    }

    /// 製品ラインと国コードから決まる受信者の正規化戦略
    pub fn recipient_formatter(&self) -> RecipientFormatter {
        self.product_line.recipient_formatter(&self.country_code)
    }
}

/// `"resourceId,sender"` 形式の設定を分解する
///
/// カンマ区切りでちょうど 2 つの空でない値を持つこと。
pub fn parse_resource_settings(settings: &str) -> Result<(String, String), ConfigError> {
    let invalid = || ConfigError::Invalid {
        name:   "ALTINN_CORRESPONDENCE_SETTINGS",
        reason: "'resourceId,sender' の形式で指定してください".to_string(),
    };

    let mut parts = settings.split(',').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(resource_id), Some(sender), None) if !resource_id.is_empty() && !sender.is_empty() => {
            Ok((resource_id.to_string(), sender.to_string()))
        }
        _ => Err(invalid()),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            reason: format!("true / false で指定してください: {value}"),
        }),
    }
}

fn parse_or_default<T>(name: &'static str, value: Option<String>) -> Result<T, ConfigError>
where
    T: FromStr + Default,
{
    match value {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("解釈できない値です: {value}"),
        }),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    // テスト間で環境変数の競合を避けるため、
    // 取得関数を差し替えて検証する

    fn load(vars: &[(&str, &str)]) -> Result<CorrespondenceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CorrespondenceConfig::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("ALTINN_RESOURCE_ID", "oed-correspondence"),
        ("MASKINPORTEN_CLIENT_ID", "client-1"),
        ("MASKINPORTEN_ENVIRONMENT", "test"),
    ];

    #[test]
    fn test_必須項目だけで既定値が埋まる() {
        let config = load(&REQUIRED).unwrap();

        assert_eq!(config.resource_id, "oed-correspondence");
        assert_eq!(config.environment, ApiEnvironment::Development);
        assert_eq!(config.base_url, "https://platform.tt02.altinn.no");
        assert_eq!(config.country_code, "0192");
        assert!(config.ignore_reservation);
        assert_eq!(config.product_line, ProductLine::Dd);
        assert_eq!(config.request_timeout, Duration::from_secs(100));
        assert_eq!(config.default_sender, None);
    }

    #[test]
    fn test_本番環境は本番のベースurlを使う() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ALTINN_ENVIRONMENT", "Production"));

        let config = load(&vars).unwrap();

        assert_eq!(config.base_url, "https://platform.altinn.no");
    }

    #[test]
    fn test_ベースurlは上書きできる() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ALTINN_BASE_URL", "http://127.0.0.1:8080"));

        assert_eq!(load(&vars).unwrap().base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_設定文字列からリソースidと送信者を読み込む() {
        let config = load(&[
            ("ALTINN_CORRESPONDENCE_SETTINGS", "dd-resource, Digitalt dødsbo"),
            ("MASKINPORTEN_CLIENT_ID", "client-1"),
            ("MASKINPORTEN_ENVIRONMENT", "test"),
        ])
        .unwrap();

        assert_eq!(config.resource_id, "dd-resource");
        assert_eq!(config.default_sender.as_deref(), Some("Digitalt dødsbo"));
    }

    #[test]
    fn test_リソースidがなければエラー() {
        let err = load(&REQUIRED[1..]).unwrap_err();

        assert!(matches!(err, ConfigError::Missing("ALTINN_RESOURCE_ID")));
    }

    #[test]
    fn test_maskinportenのクライアントidがなければエラー() {
        let err = load(&[REQUIRED[0], REQUIRED[2]]).unwrap_err();

        assert!(matches!(err, ConfigError::Missing("MASKINPORTEN_CLIENT_ID")));
    }

    #[test]
    fn test_不正な国コードはエラー() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ALTINN_COUNTRY_CODE", "19"));

        let err = load(&vars).unwrap_err();

        assert!(matches!(err, ConfigError::Domain(DomainError::InvalidSetting { .. })));
    }

    #[test]
    fn test_oed製品ラインはurn戦略を使う() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ALTINN_PRODUCT_LINE", "OED"));

        let config = load(&vars).unwrap();

        assert_eq!(config.recipient_formatter(), RecipientFormatter::Urn);
    }

    #[test]
    fn test_不正な真偽値はエラー() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("ALTINN_IGNORE_RESERVATION", "kanskje"));

        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_設定文字列の形式を検証する() {
        assert!(parse_resource_settings("resource,sender").is_ok());
        assert!(parse_resource_settings("resource").is_err());
        assert!(parse_resource_settings("resource,").is_err());
        assert!(parse_resource_settings("a,b,c").is_err());
    }
}
