//! Response bodies of the backend and the serde helpers needed to read them.
//!
//! The backend builds its metadata from the RFC index XML, so numeric fields
//! such as `year` and `pages` often arrive as strings. Topic maps are ordered
//! by weight on the server and that order is kept here.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::domain::{SearchResult, Term, Topic, TopicSet};

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopicsResponse {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub k: u32,
    #[serde(default)]
    pub topics: OrderedMap<f64>,
    #[serde(default)]
    pub words: OrderedMap<Vec<Term>>,
    #[serde(default)]
    pub docs: OrderedMap<Vec<SearchResult>>,
}

impl TopicsResponse {
    /// Joins the three per-topic maps into one list of topics.
    ///
    /// Keys missing from any of the maps are returned separately and left out
    /// of the set. Order follows `topics`.
    pub fn into_topic_set(self, doc_id: &str) -> (TopicSet, Vec<String>) {
        let Self {
            k,
            topics,
            mut words,
            mut docs,
        } = self;

        let mut kept = Vec::with_capacity(topics.len());
        let mut dropped = Vec::new();

        for (key, weight) in topics.0 {
            match (words.take(&key), docs.take(&key)) {
                (Some(words), Some(docs)) => kept.push(Topic {
                    key,
                    weight,
                    words,
                    docs,
                }),
                _ => dropped.push(key),
            }
        }

        let strays = words.0.into_iter().map(|(key, _)| key);
        for key in strays.chain(docs.0.into_iter().map(|(key, _)| key)) {
            if !dropped.contains(&key) {
                dropped.push(key);
            }
        }

        let set = TopicSet {
            doc_id: doc_id.to_string(),
            k,
            topics: kept,
        };
        (set, dropped)
    }
}

/// A JSON object read into a vector so key order survives.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn take(&mut self, key: &str) -> Option<V> {
        let index = self.0.iter().position(|(candidate, _)| candidate == key)?;
        Some(self.0.remove(index).1)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(StringOrNumber::Str(text)) => text,
        Some(StringOrNumber::Int(number)) => number.to_string(),
        Some(StringOrNumber::Float(number)) => number.to_string(),
    })
}

pub fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(StringOrNumber::Str(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0);
            }
            text.parse::<u32>()
                .map_err(|_| de::Error::custom(format!("expected a page count, got {text:?}")))
        }
        Some(StringOrNumber::Int(number)) => u32::try_from(number)
            .map_err(|_| de::Error::custom(format!("count out of range: {number}"))),
        Some(StringOrNumber::Float(number)) => {
            if number.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&number) {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Ok(number as u32)
            } else {
                Err(de::Error::custom(format!("count out of range: {number}")))
            }
        }
    }
}
