//! # 製品ライン
//!
//! 同じ送信パイプラインを DD（Digitalt Dødsbo）と OED の 2 つの製品ラインで共有する。
//! 製品ラインごとの違いは受信者の正規化戦略と送信者参照のプレフィックスだけ。

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::recipient::RecipientFormatter;

/// 製品ライン
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProductLine {
    #[default]
    Dd,
    Oed,
}

impl ProductLine {
    /// 導出する送信者参照のプレフィックス
    pub fn senders_reference_prefix(self) -> &'static str {
        match self {
            Self::Dd => "EXT_DD_SHIP_",
            Self::Oed => "EXT_OED_SHIP_",
        }
    }

    /// この製品ラインの受信者正規化戦略
    pub fn recipient_formatter(self, country_code: &str) -> RecipientFormatter {
        match self {
            Self::Dd => RecipientFormatter::country_code(country_code),
            Self::Oed => RecipientFormatter::Urn,
        }
    }
}
