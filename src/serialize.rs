use serde::{ser::SerializeSeq as _, Serialize, Serializer};

use crate::{node::NestedNode, NestedSet};

/// A set serializes as the array of its nodes in collection order.
impl<N> Serialize for NestedSet<N>
where
    N: NestedNode + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let inner = self.lock();
        let mut seq = serializer.serialize_seq(Some(inner.nodes.len()))?;
        for key in &inner.nodes {
            seq.serialize_element(&inner.arena[*key])?;
        }
        seq.end()
    }
}

impl<N> NestedSet<N>
where
    N: NestedNode + Serialize,
{
    /// Pretty JSON array of the nodes, two-space indented
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test::{sample_set, Sample};

    #[test]
    fn insertion_order_until_sorted() {
        let Sample { set, .. } = sample_set();

        let value: serde_json::Value = serde_json::from_str(&set.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!([
                { "id": 0, "node_name": "R", "level": 0, "left": 0, "right": 7 },
                { "id": 1, "node_name": "A", "level": 1, "left": 1, "right": 4 },
                { "id": 2, "node_name": "B", "level": 1, "left": 5, "right": 6 },
                { "id": 3, "node_name": "C", "level": 2, "left": 2, "right": 3 },
            ])
        );

        set.branch(None);
        let ids: Vec<u64> = serde_json::to_value(&set)
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|node| node["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1, 3, 2]);
    }

    #[test]
    fn pretty_indent() {
        let Sample { set, .. } = sample_set();
        let json = set.to_json().unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": 0,"));
    }
}
