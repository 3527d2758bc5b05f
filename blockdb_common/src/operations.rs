//! Write operations accepted by the database service
//!
//! Each [`Operation`] knows the endpoint it is posted to ([`Operation::path`])
//! and serializes as the bare request body, so it can be handed straight to
//! `reqwest::RequestBuilder::json`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

/// **The kind of a write operation**
///
/// Selects the endpoint path that an [`Operation`] is posted to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Set,
    Increase,
    Update,
    Batch,
}

impl OperationKind {
    /// The endpoint path, relative to a server's base URL.
    pub fn path(&self) -> &'static str {
        match self {
            OperationKind::Set => "set",
            OperationKind::Increase => "increase",
            OperationKind::Update => "update",
            OperationKind::Batch => "batch",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Body of `POST /set`
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SetBody {
    #[serde(rename = "ref")]
    pub reference: String,
    pub value: Value,
}

/// Body of `POST /increase`
///
/// Maps a ref to the signed delta it should be increased by.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct IncreaseBody {
    pub diff: BTreeMap<String, i64>,
}

/// Body of `POST /update`
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UpdateBody {
    pub data: BTreeMap<String, Value>,
}

/// A single entry of a batch, tagged with its `op` name
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum BatchEntry {
    Set(SetBody),
    Increase(IncreaseBody),
    Update(UpdateBody),
}

/// Body of `POST /batch`
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BatchBody {
    pub batch_list: Vec<BatchEntry>,
}

/// **A write operation: a kind plus its JSON body**
///
/// Serializes untagged, i.e., as the body alone; the kind travels in the URL.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operation {
    Set(SetBody),
    Increase(IncreaseBody),
    Update(UpdateBody),
    Batch(BatchBody),
}

impl Operation {
    pub fn set(reference: &str, value: Value) -> Self {
        Operation::Set(SetBody {
            reference: reference.to_string(),
            value,
        })
    }

    /// Later pairs overwrite earlier ones with the same ref.
    pub fn increase<'a>(diff: impl IntoIterator<Item = (&'a str, i64)>) -> Self {
        Operation::Increase(IncreaseBody {
            diff: diff.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        })
    }

    /// Later pairs overwrite earlier ones with the same ref.
    pub fn update<'a>(data: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        Operation::Update(UpdateBody {
            data: data.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        })
    }

    pub fn batch(batch_list: Vec<BatchEntry>) -> Self {
        Operation::Batch(BatchBody { batch_list })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Set(_) => OperationKind::Set,
            Operation::Increase(_) => OperationKind::Increase,
            Operation::Update(_) => OperationKind::Update,
            Operation::Batch(_) => OperationKind::Batch,
        }
    }

    pub fn path(&self) -> &'static str {
        self.kind().path()
    }
}

fn batch_set(reference: &str, value: Value) -> BatchEntry {
    BatchEntry::Set(SetBody {
        reference: reference.to_string(),
        value,
    })
}

/// **The fixed set of sample operations used by the load tester**
///
/// Covers every kind, including deep refs, nested objects, arrays,
/// duplicate keys (last one wins) and a mixed batch.
pub fn sample_operations() -> Vec<Operation> {
    vec![
        Operation::set("test/comeonnnnnnn", json!("testme")),
        Operation::set("test/comeonnnnnnn", json!("no meeeee")),
        Operation::set("test/comeon/nnnnnn", json!("through")),
        Operation::set("test/comeonnnnnnn/new", json!({"new": "path"})),
        Operation::set(
            "test/builed/some/deep",
            json!({"place": {"next": 1, "level": "down"}}),
        ),
        Operation::set("test/builed/heliii", json!({"range": [1, 2, 3, 1, 4, 5]})),
        Operation::set(
            "test/b/u/i/l/e/d/hel",
            json!({"range": [1, 4, 5], "another": [234]}),
        ),
        Operation::set("test/b/u/i/l/e/d/hel", json!("very nested")),
        Operation::set("test/b/u/i/l/e/d/hel", json!({"1": 2, "3": 4, "5": 6})),
        Operation::set("test/new/final/path", json!({"neste": [1, 2, 3, 4, 5]})),
        Operation::set(
            "test/new/final/path",
            json!({"more": {"now": 12, "hellloooo": 123}}),
        ),
        Operation::increase([
            ("test/increase/first/level", 10),
            ("test/increase/first/level2", 20),
        ]),
        Operation::increase([
            ("test/increase/second/level/deeper", 20),
            ("test/increase/second/level/deeper", 1000),
        ]),
        Operation::increase([("test/increase", 1)]),
        Operation::increase([("test/new", 1), ("test/b", 30)]),
        Operation::increase([("test/increase", -10000), ("test/increase", 10000)]),
        Operation::increase([("test/b/u", 10000)]),
        Operation::increase([("test/builed/some/deep/place/next", 100002)]),
        Operation::update([
            ("test/increase/first/level", json!(10)),
            ("test/increase/first/level2", json!(20)),
        ]),
        Operation::update([
            ("test/increase/second/level/deeper", json!(20)),
            ("test/increase/second/level/deeper", json!(1000)),
        ]),
        Operation::update([("test/increase", json!(1))]),
        Operation::update([("test/new", json!(1)), ("test/b", json!(30))]),
        Operation::update([
            ("test/increase", json!(10000)),
            ("test/increase", json!(10000)),
        ]),
        Operation::update([("test/b/u", json!(10000))]),
        Operation::update([("test/builed/some/deep/place/next", json!(100002))]),
        Operation::batch(vec![
            batch_set("test/comeonnnnnnn", json!("testme")),
            BatchEntry::Update(UpdateBody {
                data: BTreeMap::from([("test/b/u".to_string(), json!(10000))]),
            }),
        ]),
        Operation::batch(vec![batch_set("test/comeonnnnnnn", json!("no meeeee"))]),
        Operation::batch(vec![batch_set("test/comeon/nnnnnn", json!("through"))]),
        Operation::batch(vec![batch_set(
            "test/comeonnnnnnn/new",
            json!({"new": "path"}),
        )]),
        Operation::batch(vec![batch_set(
            "test/builed/some/deep",
            json!({"place": {"next": 1, "level": "down"}}),
        )]),
        Operation::batch(vec![batch_set(
            "test/builed/heliii",
            json!({"range": [1, 2, 3, 1, 4, 5]}),
        )]),
        Operation::batch(vec![batch_set(
            "test/b/u/i/l/e/d/hel",
            json!({"range": [1, 4, 5], "another": [234]}),
        )]),
        Operation::batch(vec![batch_set("test/b/u/i/l/e/d/hel", json!("very nested"))]),
        Operation::batch(vec![batch_set(
            "test/b/u/i/l/e/d/hel",
            json!({"1": 2, "3": 4, "5": 6}),
        )]),
        Operation::batch(vec![batch_set(
            "test/new/final/path",
            json!({"neste": [1, 2, 3, 4, 5]}),
        )]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_operation_counts() {
        let ops = sample_operations();
        let count = |kind: OperationKind| ops.iter().filter(|op| op.kind() == kind).count();

        assert_eq!(35, ops.len());
        assert_eq!(11, count(OperationKind::Set));
        assert_eq!(7, count(OperationKind::Increase));
        assert_eq!(7, count(OperationKind::Update));
        assert_eq!(10, count(OperationKind::Batch));
    }

    #[test]
    fn test_paths() {
        assert_eq!("set", Operation::set("a", json!(1)).path());
        assert_eq!("increase", Operation::increase([("a", 1)]).path());
        assert_eq!("update", Operation::update([("a", json!(1))]).path());
        assert_eq!("batch", Operation::batch(vec![]).path());
        assert_eq!("batch", OperationKind::Batch.to_string());
    }

    #[test]
    fn test_set_serializes_as_bare_body() {
        let op = Operation::set("test/builed/heliii", json!({"range": [1, 2]}));
        assert_eq!(
            json!({"ref": "test/builed/heliii", "value": {"range": [1, 2]}}),
            serde_json::to_value(&op).unwrap()
        );
    }

    #[test]
    fn test_duplicate_refs_keep_last_value() {
        let op = Operation::increase([("test/increase", -10000), ("test/increase", 10000)]);
        assert_eq!(
            json!({"diff": {"test/increase": 10000}}),
            serde_json::to_value(&op).unwrap()
        );
    }

    #[test]
    fn test_batch_entries_are_tagged_with_op() {
        let ops = sample_operations();
        let first_batch = ops
            .iter()
            .find(|op| op.kind() == OperationKind::Batch)
            .unwrap();

        assert_eq!(
            json!({"batch_list": [
                {"op": "set", "ref": "test/comeonnnnnnn", "value": "testme"},
                {"op": "update", "data": {"test/b/u": 10000}},
            ]}),
            serde_json::to_value(first_batch).unwrap()
        );
    }

    #[test]
    fn test_bodies_deserialize_into_the_right_kind() {
        for op in sample_operations() {
            let text = serde_json::to_string(&op).unwrap();
            let parsed: Operation = serde_json::from_str(&text).unwrap();
            assert_eq!(op.kind(), parsed.kind(), "{text}");
        }
    }
}
