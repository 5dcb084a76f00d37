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

//! Administrative region code table.
//!
//! Maps human-readable district names to the 5-digit LAWD codes the Ministry
//! of Land (MOLIT) open API expects in its `LAWD_CD` parameter. The table is
//! static data assigned by the registry's own coding scheme; it is never
//! mutated at runtime.
//!
//! Table order is significant: the address matcher iterates entries in
//! definition order and the first match wins (see [`crate::matcher`]).

/// A single district entry: display name and its LAWD code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionEntry {
    pub name: &'static str,
    pub code: &'static str,
}

/// Supported districts: Seoul's 25 gu followed by Gyeonggi's cities.
pub const REGIONS: &[RegionEntry] = &[
    // Seoul
    RegionEntry { name: "종로구", code: "11110" },
    RegionEntry { name: "중구", code: "11140" },
    RegionEntry { name: "용산구", code: "11170" },
    RegionEntry { name: "성동구", code: "11200" },
    RegionEntry { name: "광진구", code: "11215" },
    RegionEntry { name: "동대문구", code: "11230" },
    RegionEntry { name: "중랑구", code: "11260" },
    RegionEntry { name: "성북구", code: "11290" },
    RegionEntry { name: "강북구", code: "11305" },
    RegionEntry { name: "도봉구", code: "11320" },
    RegionEntry { name: "노원구", code: "11350" },
    RegionEntry { name: "은평구", code: "11380" },
    RegionEntry { name: "서대문구", code: "11410" },
    RegionEntry { name: "마포구", code: "11440" },
    RegionEntry { name: "양천구", code: "11470" },
    RegionEntry { name: "강서구", code: "11500" },
    RegionEntry { name: "구로구", code: "11530" },
    RegionEntry { name: "금천구", code: "11545" },
    RegionEntry { name: "영등포구", code: "11560" },
    RegionEntry { name: "동작구", code: "11590" },
    RegionEntry { name: "관악구", code: "11620" },
    RegionEntry { name: "서초구", code: "11650" },
    RegionEntry { name: "강남구", code: "11680" },
    RegionEntry { name: "송파구", code: "11710" },
    RegionEntry { name: "강동구", code: "11740" },
    // Gyeonggi
    RegionEntry { name: "수원시", code: "41110" },
    RegionEntry { name: "성남시", code: "41130" },
    RegionEntry { name: "의정부시", code: "41150" },
    RegionEntry { name: "안양시", code: "41170" },
    RegionEntry { name: "부천시", code: "41190" },
    RegionEntry { name: "광명시", code: "41210" },
    RegionEntry { name: "평택시", code: "41220" },
    RegionEntry { name: "동두천시", code: "41250" },
    RegionEntry { name: "안산시", code: "41270" },
    RegionEntry { name: "고양시", code: "41280" },
    RegionEntry { name: "과천시", code: "41290" },
    RegionEntry { name: "구리시", code: "41310" },
    RegionEntry { name: "남양주시", code: "41360" },
    RegionEntry { name: "오산시", code: "41370" },
    RegionEntry { name: "시흥시", code: "41390" },
    RegionEntry { name: "군포시", code: "41410" },
    RegionEntry { name: "의왕시", code: "41430" },
    RegionEntry { name: "하남시", code: "41450" },
    RegionEntry { name: "용인시", code: "41460" },
    RegionEntry { name: "파주시", code: "41480" },
    RegionEntry { name: "이천시", code: "41500" },
    RegionEntry { name: "안성시", code: "41550" },
    RegionEntry { name: "김포시", code: "41570" },
    RegionEntry { name: "화성시", code: "41590" },
    RegionEntry { name: "광주시", code: "41610" },
    RegionEntry { name: "양주시", code: "41630" },
    RegionEntry { name: "포천시", code: "41650" },
    RegionEntry { name: "여주시", code: "41670" },
];

/// Read-only view over [`REGIONS`].
pub struct RegionIndex;

impl RegionIndex {
    /// Exact-name lookup. A miss is `None`, not an error.
    pub fn lookup(name: &str) -> Option<&'static str> {
        REGIONS.iter().find(|e| e.name == name).map(|e| e.code)
    }

    /// All entries in table definition order.
    pub fn entries() -> impl Iterator<Item = &'static RegionEntry> {
        REGIONS.iter()
    }

    /// A bounded prefix of region names, used for guidance messages.
    pub fn sample_names(n: usize) -> Vec<&'static str> {
        REGIONS.iter().take(n).map(|e| e.name).collect()
    }
}
