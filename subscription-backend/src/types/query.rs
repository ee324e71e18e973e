use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// 一覧取得のデフォルト件数
pub const DEFAULT_LIST_LIMIT: u64 = 50;
/// 一覧取得の最大件数
pub const MAX_LIST_LIMIT: u64 = 1000;

/// 空文字列を「未指定」として扱うデシリアライザ
///
/// クエリパラメータ `?from=` のような空値をフィルタなしとして扱う。
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// LIMIT / OFFSET の組
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

impl Page {
    /// 正の値が明示された場合のみ limit を上書きする（上限あり）。
    /// 負の offset はバリデーションで弾かれる前提で、ここでは 0 に寄せる
    pub fn resolve(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit
            .filter(|l| *l > 0)
            .map_or(DEFAULT_LIST_LIMIT, |l| (l as u64).min(MAX_LIST_LIMIT));
        let offset = offset.filter(|o| *o >= 0).map_or(0, |o| o as u64);
        Self { limit, offset }
    }
}
