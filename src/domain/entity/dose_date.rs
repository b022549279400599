//! 接種日時の値オブジェクト。
//!
//! API では ISO-8601 文字列で受け取り、タイムゾーンなしのタイムスタンプとして保存する。
//! オフセット付きの入力は UTC に変換してから保持する。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid isoformat string: '{0}'")]
pub struct DoseDateError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DoseDate(NaiveDateTime);

impl DoseDate {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for DoseDate {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

// `YYYY-MM-DDTHH` (オフセット付きを含む) を `YYYY-MM-DDTHH:00` に展開する
fn expand_hour_only(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    if bytes.len() < 13 || !matches!(bytes[10], b'T' | b' ') {
        return None;
    }
    if !bytes[11..13].iter().all(u8::is_ascii_digit) {
        return None;
    }
    match bytes.get(13) {
        None | Some(b'+' | b'-' | b'Z') => Some(format!("{}:00{}", &s[..13], &s[13..])),
        Some(_) => None,
    }
}

fn parse_dose_date(s: &str) -> Option<NaiveDateTime> {
    if let Some(dt) = parse_naive_datetime(s) {
        return Some(dt);
    }

    // 日付のみの場合は 00:00:00 とみなす
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    if let Some(dt) = s.strip_suffix('Z').and_then(parse_naive_datetime) {
        return Some(dt);
    }

    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.naive_utc())
}

impl FromStr for DoseDate {
    type Err = DoseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dose_date(s)
            .or_else(|| expand_hour_only(s).and_then(|expanded| parse_dose_date(&expanded)))
            .map(Self)
            .ok_or_else(|| DoseDateError(s.to_string()))
    }
}

/// `YYYY-MM-DD HH:MM:SS` 形式で出力する。マイクロ秒は 0 でない場合のみ付与する。
impl fmt::Display for DoseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))?;
        let micros = self.0.nanosecond() / 1_000;
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        Ok(())
    }
}
