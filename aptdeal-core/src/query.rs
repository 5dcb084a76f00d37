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

//! Upstream query construction.

use chrono::{Datelike, Local};

/// One month's transaction query for a single region.
///
/// Year and month default to the current local calendar values when the
/// caller omits them. Caller-supplied values are passed through verbatim:
/// malformed input surfaces as an upstream empty or failure result, not as
/// a local validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub region_code: String,
    pub year: String,
    pub month: String,
}

impl TransactionQuery {
    pub fn new(region_code: impl Into<String>, year: Option<&str>, month: Option<&str>) -> Self {
        let now = Local::now();
        let year = year
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{:04}", now.year()));
        let month = month
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{:02}", now.month()));
        Self {
            region_code: region_code.into(),
            year,
            month,
        }
    }

    /// The 6-digit `DEAL_YMD` value: year and month concatenated.
    pub fn year_month(&self) -> String {
        format!("{}{}", self.year, self.month)
    }
}
