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

//! Aptdeal core: address-to-region resolution and transaction-record
//! normalization for Korean apartment real-transaction prices.
//!
//! This crate holds the pure domain pipeline and performs no I/O:
//!
//! - [`region`]: the static district-name → LAWD-code table
//! - [`matcher`]: free-text address matching against that table
//! - [`query`]: per-request query construction with current-month defaults
//! - [`payload`]: serde model of the MOLIT response, absorbing its
//!   single-vs-array item shape at the deserialization boundary
//! - [`normalize`]: record normalization, filtering, bounding, rendering
//! - [`fallback`]: disclosed sample data for the degradation path
//!
//! The MCP shell and the upstream HTTP client live in `aptdeal-server`.

pub mod fallback;
pub mod matcher;
pub mod normalize;
pub mod payload;
pub mod query;
pub mod region;

pub use fallback::FallbackReason;
pub use matcher::ResolvedRegion;
pub use normalize::{ListingContext, TransactionRecord, DEFAULT_DISPLAY_LIMIT};
pub use payload::{ApiResponse, Envelope};
pub use query::TransactionQuery;
pub use region::{RegionEntry, RegionIndex};
