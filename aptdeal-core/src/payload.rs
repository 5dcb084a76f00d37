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

//! Serde model of the MOLIT apartment-trade response.
//!
//! The upstream payload is loosely typed in two ways this module absorbs at
//! the deserialization boundary so nothing downstream has to shape-check:
//!
//! - `body.items.item` is a single object for one result and an array for
//!   many ([`OneOrMany`]); when there is no data at all the API writes
//!   `items: ""` ([`ItemsField::Empty`]).
//! - Individual field values arrive as strings or bare numbers depending on
//!   the field and the serializer mood ([`Scalar`]).
//!
//! Every record field is optional; absence is tolerated, never fatal.

use serde::Deserialize;

/// Top-level envelope: `{ "response": { header, body } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub response: Option<ApiResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub header: Option<ApiHeader>,
    #[serde(default)]
    pub body: Option<ApiBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiHeader {
    #[serde(rename = "resultCode", default)]
    pub result_code: Option<Scalar>,
    #[serde(rename = "resultMsg", default)]
    pub result_msg: Option<Scalar>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiBody {
    #[serde(default)]
    pub items: Option<ItemsField>,
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<Scalar>,
}

/// The duck-typed items container.
///
/// `Wrapped` covers `{ "item": <object or array> }`; `Empty` catches the
/// `""` (or null) the API writes when the region/month has no deals.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemsField {
    Wrapped {
        #[serde(default)]
        item: Option<OneOrMany<RawDealItem>>,
    },
    Empty(serde_json::Value),
}

impl ItemsField {
    /// Collapse both shapes into an ordered item list; empty on no data.
    pub fn into_items(self) -> Vec<RawDealItem> {
        match self {
            ItemsField::Wrapped { item: Some(item) } => item.into_vec(),
            _ => Vec::new(),
        }
    }
}

/// One-vs-many normalization for the upstream's single-object result shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// A field value that may be serialized as a string or a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// Render as trimmed display text.
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Text(s) => s.trim().to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
        }
    }
}

/// One raw transaction record as the registry ships it. Field names are the
/// registry's own (Korean) keys; any of them may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDealItem {
    #[serde(rename = "아파트", default)]
    pub apartment: Option<Scalar>,
    #[serde(rename = "거래금액", default)]
    pub deal_amount: Option<Scalar>,
    #[serde(rename = "전용면적", default)]
    pub area: Option<Scalar>,
    #[serde(rename = "층", default)]
    pub floor: Option<Scalar>,
    #[serde(rename = "년", default)]
    pub deal_year: Option<Scalar>,
    #[serde(rename = "월", default)]
    pub deal_month: Option<Scalar>,
    #[serde(rename = "일", default)]
    pub deal_day: Option<Scalar>,
    #[serde(rename = "건축년도", default)]
    pub build_year: Option<Scalar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Envelope {
        serde_json::from_str(json).expect("valid payload")
    }

    #[test]
    fn single_object_item_becomes_one_record() {
        let envelope = parse(
            r#"{"response":{"header":{"resultCode":"00"},"body":{"items":{"item":
                {"아파트":"래미안","거래금액":"85,000","층":12}},"totalCount":1}}}"#,
        );
        let body = envelope.response.unwrap().body.unwrap();
        let items = body.items.unwrap().into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].apartment.as_ref().unwrap().as_text(), "래미안");
    }

    #[test]
    fn array_item_keeps_order_and_count() {
        let envelope = parse(
            r#"{"response":{"body":{"items":{"item":[
                {"아파트":"가"},{"아파트":"나"},{"아파트":"다"}]}}}}"#,
        );
        let items = envelope
            .response
            .unwrap()
            .body
            .unwrap()
            .items
            .unwrap()
            .into_items();
        let names: Vec<_> = items
            .iter()
            .map(|i| i.apartment.as_ref().unwrap().as_text())
            .collect();
        assert_eq!(names, vec!["가", "나", "다"]);
    }

    #[test]
    fn empty_string_items_means_no_data() {
        let envelope = parse(r#"{"response":{"body":{"items":"","totalCount":0}}}"#);
        let items = envelope.response.unwrap().body.unwrap().items.unwrap();
        assert!(items.into_items().is_empty());
    }

    #[test]
    fn absent_items_container_tolerated() {
        let envelope = parse(r#"{"response":{"body":{"totalCount":0}}}"#);
        assert!(envelope.response.unwrap().body.unwrap().items.is_none());
    }

    #[test]
    fn numeric_and_string_scalars_both_accepted() {
        let envelope = parse(
            r#"{"response":{"body":{"items":{"item":
                {"층":12,"전용면적":84.97,"년":"2024"}}}}}"#,
        );
        let items = envelope
            .response
            .unwrap()
            .body
            .unwrap()
            .items
            .unwrap()
            .into_items();
        assert_eq!(items[0].floor.as_ref().unwrap().as_text(), "12");
        assert_eq!(items[0].area.as_ref().unwrap().as_text(), "84.97");
        assert_eq!(items[0].deal_year.as_ref().unwrap().as_text(), "2024");
    }
}
