use num::Num;
use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{SparseVector, TagId};

impl<N> Serialize for SparseVector<N>
where
    N: Num + Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // フィールドは nnz, entries とする
        let mut state = serializer.serialize_struct("SparseVector", 2)?;
        state.serialize_field("nnz", &(self.nnz() as u64))?;
        let entries: Vec<(TagId, N)> = self.iter().collect();
        state.serialize_field("entries", &entries)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SparseVector<N>
where
    N: Num + Deserialize<'de> + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SparseVectorData<N> {
            nnz: u64,
            entries: Vec<(TagId, N)>,
        }

        let data = SparseVectorData::deserialize(deserializer)?;
        if data.nnz as usize != data.entries.len() {
            return Err(DeError::custom("SparseVector deserialize error: nnz and entries length mismatch"));
        }
        if data.entries.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(DeError::custom("SparseVector deserialize error: entries must be strictly ascending by tag"));
        }

        Ok(data.entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_cbor_preserves_entries() {
        let vec: SparseVector<f32> = [(12, 0.6), (3, 0.8)].into_iter().collect();
        let bytes = serde_cbor::to_vec(&vec).unwrap();
        let de: SparseVector<f32> = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(de, vec);
        assert_eq!(de.tags(), &[3, 12]);
    }

    #[test]
    fn serde_rejects_nnz_mismatch() {
        let bad = serde_json::json!({ "nnz": 3, "entries": [[1, 0.5], [2, 0.5]] });
        let res = serde_json::from_value::<SparseVector<f32>>(bad);
        assert!(res.is_err());
    }

    #[test]
    fn serde_rejects_unsorted_entries() {
        let bad = serde_json::json!({ "nnz": 2, "entries": [[5, 0.5], [2, 0.5]] });
        let res = serde_json::from_value::<SparseVector<f32>>(bad);
        assert!(res.is_err());
    }
}
