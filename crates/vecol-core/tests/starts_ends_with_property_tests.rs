//! Property-based equivalence tests for `startsWith`/`endsWith`.
//!
//! Every tier variant and every haystack/needle encoding must agree with a
//! plain slice comparison.

use proptest::{
    collection::vec,
    prelude::{any, prop_assert_eq, prop_oneof, Just, Strategy},
    proptest,
    test_runner::{Config as ProptestConfig, FileFailurePersistence},
};
use vecol_core::functions::starts_ends_with::execute_for_target;
use vecol_core::functions::{execute_function, Context, MatchMode, Prefix, Suffix};
use vecol_core::{
    Column, ColumnFixedString, ColumnString, FunctionEndsWith, FunctionStartsWith, TargetArch,
};

const PROP_CASES: u32 = 256;
const PROP_MAX_SHRINK_ITERS: u32 = 2048;

/// Small alphabet so prefixes and suffixes actually collide.
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![Just(b'a'), Just(b'b'), Just(0_u8), any::<u8>()];
    vec(byte, 0..12)
}

fn rows_strategy() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<Vec<u8>>)> {
    (0_usize..40).prop_flat_map(|rows| (vec(bytes_strategy(), rows), vec(bytes_strategy(), rows)))
}

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: PROP_CASES,
        max_shrink_iters: PROP_MAX_SHRINK_ITERS,
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "starts-ends-with-regressions",
        ))),
        ..ProptestConfig::default()
    }
}

fn fixed_width(values: &[Vec<u8>]) -> usize {
    values.iter().map(Vec::len).max().unwrap_or(0).max(1)
}

/// Fixed-width values as the kernel sees them: zero-padded to the width.
fn padded(values: &[Vec<u8>], n: usize) -> Vec<Vec<u8>> {
    values
        .iter()
        .map(|v| {
            let mut p = v.clone();
            p.resize(n, 0);
            p
        })
        .collect()
}

fn encodings(values: &[Vec<u8>]) -> Vec<(Column, Vec<Vec<u8>>)> {
    let n = fixed_width(values);
    vec![
        (
            Column::String(ColumnString::from_strings(values)),
            values.to_vec(),
        ),
        (
            Column::FixedString(ColumnFixedString::from_strings(n, values).unwrap()),
            padded(values, n),
        ),
    ]
}

fn as_u8(column: Column) -> Vec<u8> {
    match column {
        Column::UInt8(c) => c.into_data(),
        Column::Const(c) => as_u8(c.convert_to_full_column()),
        other => panic!("unexpected result column {}", other.family_name()),
    }
}

fn check_all_encodings<M: MatchMode>(
    haystacks: &[Vec<u8>],
    needles: &[Vec<u8>],
    reference: fn(&[u8], &[u8]) -> bool,
) {
    let rows = haystacks.len();
    for (haystack, h_values) in encodings(haystacks) {
        for (needle, n_values) in encodings(needles) {
            let expected: Vec<u8> = h_values
                .iter()
                .zip(&n_values)
                .map(|(h, n)| u8::from(reference(h, n)))
                .collect();
            for arch in TargetArch::ALL {
                let actual =
                    as_u8(execute_for_target::<M>(arch, &haystack, &needle, rows).unwrap());
                assert_eq!(
                    actual,
                    expected,
                    "{} {} x {} on {arch}",
                    M::NAME,
                    haystack.family_name(),
                    needle.family_name()
                );
            }
        }
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn test_starts_with_matches_reference((haystacks, needles) in rows_strategy()) {
        check_all_encodings::<Prefix>(&haystacks, &needles, <[u8]>::starts_with);
    }

    #[test]
    fn test_ends_with_matches_reference((haystacks, needles) in rows_strategy()) {
        check_all_encodings::<Suffix>(&haystacks, &needles, <[u8]>::ends_with);
    }

    #[test]
    fn test_const_needle_matches_materialized(
        haystacks in vec(bytes_strategy(), 0..40),
        needle in bytes_strategy(),
    ) {
        let rows = haystacks.len();
        let haystack = Column::String(ColumnString::from_strings(&haystacks));
        let constant = Column::const_string(&needle, rows);
        let full = constant.convert_to_full_column_if_const();

        let function = FunctionStartsWith::create(&Context::default());
        let via_const = as_u8(execute_function(&function, &[&haystack, &constant], rows).unwrap());
        let via_full = as_u8(execute_function(&function, &[&haystack, &full], rows).unwrap());
        prop_assert_eq!(via_const, via_full);
    }

    #[test]
    fn test_const_haystack_matches_materialized(
        haystack in bytes_strategy(),
        needles in vec(bytes_strategy(), 0..40),
    ) {
        let rows = needles.len();
        let constant = Column::const_string(&haystack, rows);
        let full = constant.convert_to_full_column_if_const();
        let needle = Column::String(ColumnString::from_strings(&needles));

        let function = FunctionEndsWith::create(&Context::default());
        let via_const = as_u8(execute_function(&function, &[&constant, &needle], rows).unwrap());
        let via_full = as_u8(execute_function(&function, &[&full, &needle], rows).unwrap());
        prop_assert_eq!(via_const, via_full);
    }

    #[test]
    fn test_all_const_broadcasts_single_answer(
        haystack in bytes_strategy(),
        needle in bytes_strategy(),
        rows in 0_usize..64,
    ) {
        let function = FunctionStartsWith::create(&Context::default());
        let result = execute_function(
            &function,
            &[&Column::const_string(&haystack, rows), &Column::const_string(&needle, rows)],
            rows,
        )
        .unwrap();
        prop_assert_eq!(result.len(), rows);
        let expected = vec![u8::from(haystack.starts_with(&needle)); rows];
        prop_assert_eq!(as_u8(result), expected);
    }
}
