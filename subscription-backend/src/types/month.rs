// src/types/month.rs

//! 月単位の日付（MonthDate）
//!
//! ワイヤ形式は `MM-YYYY`、保存形式はその月の1日（`YYYY-MM-01`）です。
//! 期間フィルタの終端には月末日（`last_day`）を使い、最終月全体を含めます。

use chrono::{Datelike, Days, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `MM-YYYY` のみを受け付ける（月は01〜12、年は4桁）
static MONTH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])-([0-9]{4})$").expect("Invalid month regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthParseError {
    #[error("invalid month '{0}', expected MM-YYYY")]
    InvalidFormat(String),
}

/// 日にちを持たない暦月。内部的には月初日を保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDate(NaiveDate);

impl MonthDate {
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let invalid = || MonthParseError::InvalidFormat(s.to_string());

        let caps = MONTH_REGEX.captures(s).ok_or_else(invalid)?;
        let month: u32 = caps[1].parse().map_err(|_| invalid())?;
        let year: i32 = caps[2].parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// 任意の日付をその月に丸める（DBから読み出した値の変換用）
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    /// 保存形式: 月の1日
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// 月末日（翌月1日の前日）
    pub fn last_day(&self) -> NaiveDate {
        // 年は4桁に限定しているので範囲外にはならない
        self.0 + Months::new(1) - Days::new(1)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

/// 期間フィルタ `to` の月末日を返す
pub fn end_of_range_month(s: &str) -> Result<NaiveDate, MonthParseError> {
    MonthDate::parse(s).map(|month| month.last_day())
}

impl fmt::Display for MonthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

impl FromStr for MonthDate {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<MonthDate> for NaiveDate {
    fn from(month: MonthDate) -> Self {
        month.first_day()
    }
}

impl Serialize for MonthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
