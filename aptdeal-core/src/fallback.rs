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

//! Sample-data fallback.
//!
//! When the upstream cannot be queried (no credential, or the call failed)
//! the tool serves two fixed illustrative records instead of real data. The
//! output is always tagged with the reason, so the caller can tell a
//! missing credential from an upstream outage and neither from real data.

use crate::normalize::{
    filter_by_name, format_price, render_listing, DealDate, ListingContext,
    TransactionRecord, DEFAULT_DISPLAY_LIMIT,
};

/// Why the fallback path was taken. The two reasons carry distinct
/// disclosure headers and must not be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredential,
    UpstreamFailure,
}

impl FallbackReason {
    pub fn disclosure(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential => {
                "⚠️ 국토교통부 API 키가 설정되지 않아 샘플 데이터를 표시합니다.\n\
                 MOLIT_SERVICE_KEY 환경 변수를 설정하면 실제 실거래가를 조회합니다."
            }
            FallbackReason::UpstreamFailure => {
                "⚠️ 실거래가 API 호출에 실패하여 샘플 데이터를 표시합니다.\n\
                 잠시 후 다시 시도해 주세요."
            }
        }
    }
}

fn placeholder_name(apartment_name: Option<&str>) -> &str {
    apartment_name.unwrap_or("샘플아파트")
}

/// Exactly two deterministic placeholder records, parameterized only by the
/// requested apartment name and period.
pub fn sample_records(
    apartment_name: Option<&str>,
    year: &str,
    month: &str,
) -> Vec<TransactionRecord> {
    let base = placeholder_name(apartment_name);
    vec![
        TransactionRecord {
            name: format!("{base} 1단지"),
            price_text: format_price("85,000"),
            area_sqm: "84.97".to_string(),
            floor: "12".to_string(),
            deal_date: DealDate {
                year: year.to_string(),
                month: month.to_string(),
                day: "15".to_string(),
            },
            build_year: "2015".to_string(),
        },
        TransactionRecord {
            name: format!("{base} 2단지"),
            price_text: format_price("92,500"),
            area_sqm: "101.94".to_string(),
            floor: "7".to_string(),
            deal_date: DealDate {
                year: year.to_string(),
                month: month.to_string(),
                day: "28".to_string(),
            },
            build_year: "2018".to_string(),
        },
    ]
}

/// Render the full fallback response: disclosure header plus the sample
/// listing, run through the same name filter and renderer as real data.
pub fn render(
    reason: FallbackReason,
    ctx: &ListingContext<'_>,
    apartment_name: Option<&str>,
) -> String {
    let mut records = sample_records(apartment_name, ctx.year, ctx.month);
    if let Some(filter) = apartment_name {
        records = filter_by_name(records, filter);
    }
    format!(
        "{}\n\n{}",
        reason.disclosure(),
        render_listing(&records, ctx, DEFAULT_DISPLAY_LIMIT)
    )
}
