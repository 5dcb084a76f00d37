// Copyright 2025 Aptdeal Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Transaction record normalization and rendering.
//!
//! Converts raw upstream items into uniform [`TransactionRecord`]s, applies
//! the apartment-name filter and the display bound, and renders a numbered
//! Korean-language listing. Every step here is deterministic: the same
//! payload always renders byte-identical text.
//!
//! Prices arrive as comma-grouped strings denominated in 만원 (ten thousand
//! won). [`format_price`] re-groups parseable values and passes anything
//! else through verbatim.

use crate::payload::{ApiResponse, RawDealItem, Scalar};

/// Sentinel shown for any missing source field.
pub const NO_INFO: &str = "정보 없음";

/// Currency-unit suffix appended to parseable prices.
pub const PRICE_UNIT: &str = "만원";

/// Default maximum number of records rendered in one response.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// Deal date split into display components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

/// A normalized transaction record; all fields are display strings with
/// [`NO_INFO`] substituted for anything the upstream omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub name: String,
    pub price_text: String,
    pub area_sqm: String,
    pub floor: String,
    pub deal_date: DealDate,
    pub build_year: String,
}

/// Region and period labels for message rendering.
#[derive(Debug, Clone, Copy)]
pub struct ListingContext<'a> {
    pub region_label: &'a str,
    pub year: &'a str,
    pub month: &'a str,
}

fn field_text(value: &Option<Scalar>) -> String {
    match value {
        Some(scalar) => {
            let text = scalar.as_text();
            if text.is_empty() {
                NO_INFO.to_string()
            } else {
                text
            }
        }
        None => NO_INFO.to_string(),
    }
}

impl TransactionRecord {
    pub fn from_raw(raw: &RawDealItem) -> Self {
        Self {
            name: field_text(&raw.apartment),
            price_text: format_price(&field_text(&raw.deal_amount)),
            area_sqm: field_text(&raw.area),
            floor: field_text(&raw.floor),
            deal_date: DealDate {
                year: field_text(&raw.deal_year),
                month: field_text(&raw.deal_month),
                day: field_text(&raw.deal_day),
            },
            build_year: field_text(&raw.build_year),
        }
    }

    /// The price as an integer in 만원, when [`format_price`] managed to
    /// parse it; `None` for verbatim passthrough values.
    pub fn price_amount(&self) -> Option<i64> {
        let digits = self.price_text.strip_suffix(PRICE_UNIT)?;
        digits.replace(',', "").parse().ok()
    }
}

/// Normalize a full upstream response into ordered records. Absent body or
/// items container yields an empty list, which the caller reports as a
/// valid no-data result.
pub fn records_from_response(response: ApiResponse) -> Vec<TransactionRecord> {
    let Some(body) = response.body else {
        return Vec::new();
    };
    let Some(items) = body.items else {
        return Vec::new();
    };
    items
        .into_items()
        .iter()
        .map(TransactionRecord::from_raw)
        .collect()
}

/// Keep records whose name contains `filter` as a case-sensitive substring.
pub fn filter_by_name(
    records: Vec<TransactionRecord>,
    filter: &str,
) -> Vec<TransactionRecord> {
    records
        .into_iter()
        .filter(|r| r.name.contains(filter))
        .collect()
}

/// Strip comma grouping and surrounding whitespace, parse as an integer,
/// and re-render with comma grouping plus the 만원 suffix. Unparseable
/// input is returned verbatim.
pub fn format_price(raw: &str) -> String {
    let cleaned = raw.trim().replace(',', "");
    match cleaned.parse::<i64>() {
        Ok(amount) => format!("{}{}", group_thousands(amount), PRICE_UNIT),
        Err(_) => raw.to_string(),
    }
}

/// Comma-group an integer: 85000 -> "85,000".
pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Message for a valid query that returned zero records.
pub fn no_data_message(ctx: &ListingContext<'_>) -> String {
    format!(
        "{} {}년 {}월 아파트 매매 실거래가 데이터가 없습니다.",
        ctx.region_label, ctx.year, ctx.month
    )
}

/// Message for a name filter that excluded every available record. Distinct
/// from [`no_data_message`]: the period did have `total` deals.
pub fn no_match_for_filter_message(
    ctx: &ListingContext<'_>,
    filter: &str,
    total: usize,
) -> String {
    format!(
        "'{}'에 해당하는 거래가 없습니다. ({} {}년 {}월 전체 {}건)",
        filter, ctx.region_label, ctx.year, ctx.month, total
    )
}

/// Render records as a numbered listing bounded by `limit`, preserving
/// input order. Notes the truncation when more records were available, and
/// closes with a first-vs-last price delta when both endpoints parsed.
pub fn render_listing(
    records: &[TransactionRecord],
    ctx: &ListingContext<'_>,
    limit: usize,
) -> String {
    let total = records.len();
    let shown = &records[..total.min(limit)];

    let mut out = format!(
        "{} {}년 {}월 아파트 매매 실거래가 ({}건)\n",
        ctx.region_label, ctx.year, ctx.month, total
    );
    if total > shown.len() {
        out.push_str(&format!(
            "전체 {}건 중 처음 {}건을 표시합니다.\n",
            total,
            shown.len()
        ));
    }

    for (i, record) in shown.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_record(i + 1, record));
        out.push('\n');
    }

    if let Some(summary) = delta_summary(shown) {
        out.push('\n');
        out.push_str(&summary);
        out.push('\n');
    }

    out
}

fn render_record(index: usize, record: &TransactionRecord) -> String {
    format!(
        "{}. {}\n   거래금액: {}\n   전용면적: {}\n   층: {}\n   거래일: {}\n   건축년도: {}",
        index,
        record.name,
        record.price_text,
        with_unit(&record.area_sqm, "㎡"),
        with_unit(&record.floor, "층"),
        render_date(&record.deal_date),
        with_unit(&record.build_year, "년"),
    )
}

fn with_unit(value: &str, unit: &str) -> String {
    if value == NO_INFO {
        value.to_string()
    } else {
        format!("{value}{unit}")
    }
}

fn render_date(date: &DealDate) -> String {
    if date.year == NO_INFO && date.month == NO_INFO && date.day == NO_INFO {
        return NO_INFO.to_string();
    }
    format!("{}년 {}월 {}일", date.year, date.month, date.day)
}

/// First-vs-last price movement across the shown records. `None` unless at
/// least two records are shown and both endpoint prices parsed.
fn delta_summary(shown: &[TransactionRecord]) -> Option<String> {
    if shown.len() < 2 {
        return None;
    }
    let first = shown.first()?.price_amount()?;
    let last = shown.last()?.price_amount()?;
    let delta = last - first;
    let sign = if delta >= 0 { "+" } else { "-" };
    Some(format!(
        "가격 변동: 첫 거래 {}{} → 마지막 거래 {}{} ({}{}{})",
        group_thousands(first),
        PRICE_UNIT,
        group_thousands(last),
        PRICE_UNIT,
        sign,
        group_thousands(delta.abs()),
        PRICE_UNIT,
    ))
}
