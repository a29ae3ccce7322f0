//! Structural JSON equality and duplicate detection.
use crate::numeric;
use ahash::{AHashMap, AHasher};
use serde_json::{Map, Value};
use std::hash::{Hash, Hasher};

/// Structural equality under JSON semantics: kinds must match, objects are
/// key-set equal, arrays are positionally equal, numbers compare as exact
/// rationals.
#[inline]
pub fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Null, Value::Null) => true,
        (Value::Number(left), Value::Number(right)) => numeric::equal(left, right),
        (Value::Array(left), Value::Array(right)) => equal_arrays(left, right),
        (Value::Object(left), Value::Object(right)) => equal_objects(left, right),
        (_, _) => false,
    }
}

#[inline]
pub(crate) fn equal_arrays(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| equal(a, b))
}

#[inline]
pub(crate) fn equal_objects(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    // Map iteration is key-ordered, so a single zip compares key sets and
    // values at once.
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|((ka, va), (kb, vb))| ka == kb && equal(va, vb))
}

// Based on the implementation proposed by Sven Marnach:
// https://stackoverflow.com/questions/60882381/what-is-the-fastest-correct-way-to-detect-that-there-are-no-duplicates-in-a-json
struct HashedValue<'a>(&'a Value);

impl PartialEq for HashedValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        equal(self.0, other.0)
    }
}

impl Eq for HashedValue<'_> {}

impl Hash for HashedValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::Null => state.write_u32(3_221_225_473), // chosen randomly
            Value::Bool(item) => item.hash(state),
            Value::Number(item) => {
                // Hash through the f64 view so numerically equal literals
                // (`1`, `1.0`, `1e0`) land in the same bucket; exactness is
                // restored by `eq` above.
                if let Some(number) = item.as_f64() {
                    number.to_bits().hash(state);
                } else if let Some(number) = item.as_u64() {
                    number.hash(state);
                } else if let Some(number) = item.as_i64() {
                    number.hash(state);
                }
            }
            Value::String(item) => item.hash(state),
            Value::Array(items) => {
                for item in items {
                    HashedValue(item).hash(state);
                }
            }
            Value::Object(items) => {
                let mut hash = 0;
                for (key, value) in items {
                    // We have no way of building a new hasher of type `H`,
                    // so we hardcode using the default hasher of a hash map.
                    let mut item_hasher = AHasher::default();
                    key.hash(&mut item_hasher);
                    HashedValue(value).hash(&mut item_hasher);
                    hash ^= item_hasher.finish();
                }
                state.write_u64(hash);
            }
        }
    }
}

// Empirically calculated threshold after which the search resorts to
// hashing. Calculated for an array of mixed types; large homogeneous arrays
// of primitive values might be processed faster with different thresholds,
// but this one gives a good baseline for the common case.
const ITEMS_SIZE_THRESHOLD: usize = 15;

/// Find the earliest pair of structurally equal items, scanning second
/// indexes in ascending order. Returns `(i, j)` with `i < j`.
pub(crate) fn find_duplicate(items: &[Value]) -> Option<(usize, usize)> {
    if items.len() <= ITEMS_SIZE_THRESHOLD {
        for second in 1..items.len() {
            for first in 0..second {
                if equal(&items[first], &items[second]) {
                    return Some((first, second));
                }
            }
        }
        None
    } else {
        let mut seen = AHashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(&first) = seen.get(&HashedValue(item)) {
                return Some((first, index));
            }
            seen.insert(HashedValue(item), index);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{equal, find_duplicate, ITEMS_SIZE_THRESHOLD};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(1), &json!(1.0))]
    #[test_case(&json!([2]), &json!([2.0]))]
    #[test_case(&json!([-3]), &json!([-3.0]))]
    #[test_case(&json!({"a": 1}), &json!({"a": 1.0}))]
    #[test_case(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1}))]
    fn are_equal(left: &Value, right: &Value) {
        assert!(equal(left, right));
        assert!(equal(right, left));
    }

    #[test_case(&json!(1), &json!(2.0))]
    #[test_case(&json!([]), &json!(["foo"]))]
    #[test_case(&json!([-3]), &json!([-4.0]))]
    #[test_case(&json!({"a": 1}), &json!({"a": 1.0, "b": 2}))]
    #[test_case(&json!(null), &json!(0))]
    fn are_not_equal(left: &Value, right: &Value) {
        assert!(!equal(left, right));
    }

    #[test_case(&[] => None; "empty array")]
    #[test_case(&[json!(1)] => None; "one element")]
    #[test_case(&[json!(1), json!(2)] => None; "two unique")]
    #[test_case(&[json!(1), json!(1.0)] => Some((0, 1)); "number forms")]
    #[test_case(&[json!(1), json!(2), json!(1), json!(2)] => Some((0, 2)); "earliest pair wins")]
    #[test_case(&[json!({"a": 1, "b": 2}), json!(3), json!({"b": 2, "a": 1})] => Some((0, 2)); "objects ignore key order")]
    fn duplicates(items: &[Value]) -> Option<(usize, usize)> {
        find_duplicate(items)
    }

    #[test]
    fn duplicates_above_hashing_threshold() {
        let mut items = (0..ITEMS_SIZE_THRESHOLD as i64 + 5)
            .map(|i| json!(i))
            .collect::<Vec<_>>();
        assert_eq!(find_duplicate(&items), None);
        let last = items.len() - 1;
        items[last] = json!(2.0);
        assert_eq!(find_duplicate(&items), Some((2, last)));
    }
}
