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

//! Free-text address matching against the region table.
//!
//! Input may be a full address ("서울특별시 서초구 반포동 ..."), a bare
//! district name, or anything in between. Both sides are normalized by
//! stripping whitespace and lowercasing; a region matches when its
//! normalized name is a substring of the normalized input.
//!
//! When several region names occur in one input, the first entry in table
//! definition order wins. This tie-break is documented behavior, not an
//! accident: callers relying on overlapping names must account for it.

use crate::region::RegionIndex;

/// A region resolved from free text for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegion {
    pub code: String,
    pub matched_name: String,
}

/// Number of example regions shown in the no-match guidance message.
const GUIDANCE_SAMPLE_LEN: usize = 8;

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve free-form address text to a region, or `None` when no table
/// entry's name occurs in the input.
pub fn resolve(input: &str) -> Option<ResolvedRegion> {
    let haystack = normalize(input);
    RegionIndex::entries()
        .find(|entry| haystack.contains(&normalize(entry.name)))
        .map(|entry| ResolvedRegion {
            code: entry.code.to_string(),
            matched_name: entry.name.to_string(),
        })
}

/// Guidance text for unresolvable input, listing a bounded sample of
/// supported regions rather than the full table.
pub fn no_match_message(input: &str) -> String {
    let samples = RegionIndex::sample_names(GUIDANCE_SAMPLE_LEN).join(", ");
    format!(
        "'{input}'에서 지원하는 지역을 찾지 못했습니다.\n\
         지역명을 포함해 다시 입력해 주세요. 지원 지역 예시: {samples} 등"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_district_name_resolves() {
        let region = resolve("서초구").unwrap();
        assert_eq!(region.code, "11650");
        assert_eq!(region.matched_name, "서초구");
    }

    #[test]
    fn full_address_resolves() {
        let region = resolve("서울특별시 강남구 테헤란로 123").unwrap();
        assert_eq!(region.code, "11680");
    }

    #[test]
    fn whitespace_inside_name_is_ignored() {
        let region = resolve("서 초 구 어딘가").unwrap();
        assert_eq!(region.matched_name, "서초구");
    }

    #[test]
    fn first_table_entry_wins_on_multiple_matches() {
        // 종로구 precedes 중구 in the table, regardless of position in the input.
        let region = resolve("중구 옆 종로구").unwrap();
        assert_eq!(region.matched_name, "종로구");
    }

    #[test]
    fn unknown_region_is_none_not_error() {
        assert!(resolve("제주도 서귀포시").is_none());
    }

    #[test]
    fn guidance_lists_bounded_sample() {
        let msg = no_match_message("화성 표면");
        assert!(msg.contains("화성 표면"));
        assert!(msg.contains("종로구"));
        // Full table must not be dumped.
        assert!(!msg.contains("여주시"));
    }
}
