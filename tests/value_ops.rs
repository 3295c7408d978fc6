//! End-to-end checks of the structural operations, combining the generic
//! sequence/mapping helpers with the `Value` tree.

use pacer::{
    chunk, compact, deep_clone, deep_equal, difference, flatten, flatten_deep, intersection, omit,
    pick, ChunkError, Value,
};
use std::collections::BTreeMap;

fn nested_sample() -> Value {
    Value::Map(BTreeMap::from([
        ("name".to_string(), Value::Str("pacer".into())),
        (
            "tags".to_string(),
            Value::Seq(vec![Value::Str("debounce".into()), Value::Str("throttle".into())]),
        ),
        (
            "meta".to_string(),
            Value::Map(BTreeMap::from([
                ("stars".to_string(), Value::Int(42)),
                ("ratio".to_string(), Value::Float(0.5)),
                ("archived".to_string(), Value::Bool(false)),
            ])),
        ),
    ]))
}

#[test]
fn chunk_spec_example() {
    assert_eq!(
        chunk(&[1, 2, 3, 4, 5], 2).unwrap(),
        vec![vec![1, 2], vec![3, 4], vec![5]],
    );
}

#[test]
fn chunk_rejects_zero_size() {
    assert_eq!(chunk::<i32>(&[1], 0), Err(ChunkError::ZeroSize));
    assert_eq!(
        chunk::<i32>(&[1], 0).unwrap_err().to_string(),
        "chunk size must be greater than 0",
    );
}

#[test]
fn deep_flatten_spec_example() {
    // [[1,[2,3]],[4]] -> [1,2,3,4]
    let nested = vec![
        Value::Seq(vec![
            Value::Int(1),
            Value::Seq(vec![Value::Int(2), Value::Int(3)]),
        ]),
        Value::Seq(vec![Value::Int(4)]),
    ];
    assert_eq!(
        flatten_deep(&nested),
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)],
    );

    // The single-level variant keeps the inner nesting.
    assert_eq!(
        flatten(&nested),
        vec![
            Value::Int(1),
            Value::Seq(vec![Value::Int(2), Value::Int(3)]),
            Value::Int(4),
        ],
    );
}

#[test]
fn deep_equal_ignores_map_key_order_but_not_seq_order() {
    let a = Value::Map(BTreeMap::from([
        ("a".to_string(), Value::Int(1)),
        (
            "b".to_string(),
            Value::Seq(vec![Value::Int(1), Value::Int(2)]),
        ),
    ]));
    let b = Value::Map(BTreeMap::from([
        (
            "b".to_string(),
            Value::Seq(vec![Value::Int(1), Value::Int(2)]),
        ),
        ("a".to_string(), Value::Int(1)),
    ]));
    assert!(deep_equal(&a, &b));

    let c = Value::Map(BTreeMap::from([
        ("a".to_string(), Value::Int(1)),
        (
            "b".to_string(),
            Value::Seq(vec![Value::Int(2), Value::Int(1)]),
        ),
    ]));
    assert!(!deep_equal(&a, &c));

    let different_value = Value::Map(BTreeMap::from([("a".to_string(), Value::Int(2))]));
    let just_a = Value::Map(BTreeMap::from([("a".to_string(), Value::Int(1))]));
    assert!(!deep_equal(&just_a, &different_value));
}

#[test]
fn deep_clone_produces_detached_equal_tree() {
    let original = nested_sample();
    let mut clone = deep_clone(&original);
    assert!(deep_equal(&clone, &original));

    // Mutate every level of the clone.
    if let Value::Map(entries) = &mut clone {
        if let Some(Value::Seq(tags)) = entries.get_mut("tags") {
            tags.clear();
        }
        if let Some(Value::Map(meta)) = entries.get_mut("meta") {
            meta.insert("stars".to_string(), Value::Int(0));
        }
    }

    assert!(!deep_equal(&clone, &original));
    assert!(deep_equal(&original, &nested_sample()), "original untouched");
}

#[test]
fn pick_and_omit_spec_examples() {
    let map = BTreeMap::from([
        ("a".to_string(), 1),
        ("b".to_string(), 2),
        ("c".to_string(), 3),
    ]);
    let keys = ["a".to_string(), "c".to_string()];

    assert_eq!(
        pick(&map, &keys),
        BTreeMap::from([("a".to_string(), 1), ("c".to_string(), 3)]),
    );
    assert_eq!(omit(&map, &keys), BTreeMap::from([("b".to_string(), 2)]));
}

#[test]
fn difference_and_intersection_spec_examples() {
    assert_eq!(difference(&[1, 2, 3], &[2]), vec![1, 3]);
    assert_eq!(intersection(&[1, 2, 3], &[2, 3, 4]), vec![2, 3]);
}

#[test]
fn set_ops_work_over_values() {
    let a = vec![Value::Int(1), Value::Str("x".into()), Value::Int(1)];
    let b = vec![Value::Int(1)];
    assert_eq!(
        difference(&a, &b),
        vec![Value::Str("x".into())],
    );
    assert_eq!(
        intersection(&a, &b),
        vec![Value::Int(1), Value::Int(1)],
    );
}

#[test]
fn compact_is_idempotent_over_values() {
    let items = vec![
        Value::Null,
        Value::Int(0),
        Value::Int(7),
        Value::Str(String::new()),
        Value::Bool(false),
        Value::Seq(vec![Value::Null]),
    ];
    let once = compact(&items);
    let twice = compact(&once);
    assert_eq!(once, twice);
    assert_eq!(once, vec![Value::Int(7), Value::Seq(vec![Value::Null])]);
}

#[test]
fn operations_compose_without_sharing_state() {
    // chunk the flattened tags, then diff against a blocklist.
    let tags = vec![
        Value::Seq(vec![Value::Str("a".into()), Value::Str("b".into())]),
        Value::Str("c".into()),
    ];
    let flat = flatten_deep(&tags);
    let groups = chunk(&flat, 2).unwrap();
    assert_eq!(groups.len(), 2);

    let kept = difference(&flat, &[Value::Str("b".into())]);
    assert_eq!(kept, vec![Value::Str("a".into()), Value::Str("c".into())]);

    // Inputs untouched throughout.
    assert_eq!(tags.len(), 2);
    assert_eq!(flat.len(), 3);
}
