//! Property-based tests for the failure index
//!
//! These tests verify invariants that should hold for all inputs:
//! - Merging never loses or invents failures
//! - The empty index is a merge identity
//! - Merge is associative
//! - Multi-file runs equal the merge of single-file runs
//! - Only failing methods that carry the handled smell are recorded

use proptest::prelude::*;
use smellfix::{
    CodeSmellName, FailureIndex, FailureIndexBuilder, FnStrategy, MethodModel, MethodsByPath,
    Refactoring, StrategyRegistry,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn smell() -> impl Strategy<Value = CodeSmellName> {
    prop::sample::select(CodeSmellName::ALL.to_vec())
}

fn method() -> impl Strategy<Value = MethodModel> {
    ("[a-z][a-zA-Z0-9]{0,8}", prop::collection::vec(smell(), 0..3)).prop_map(|(name, smells)| {
        smells
            .into_iter()
            .fold(MethodModel::new(name), MethodModel::with_smell)
    })
}

fn path() -> impl Strategy<Value = PathBuf> {
    "[a-c]{1,2}\\.java".prop_map(PathBuf::from)
}

fn failure_index() -> impl Strategy<Value = FailureIndex> {
    prop::collection::vec((smell(), path(), method()), 0..20).prop_map(|records| {
        let builder = FailureIndexBuilder::new();
        for (smell, path, method) in records {
            builder.record(smell, &path, method);
        }
        builder.finish()
    })
}

/// Strategy outcome is derived from the method name so it is reproducible.
fn name_based_refactoring() -> Refactoring {
    Refactoring::new(StrategyRegistry::new().with_strategy(FnStrategy::new(
        CodeSmellName::LongMethod,
        "extract method",
        |_, method| Ok(method.name.len() % 2 == 0),
    )))
}

/// Order inside one list is not deterministic under concurrency. Methods may
/// share a name, so the whole value is the sort key.
fn sort_lists(index: &mut BTreeMap<String, BTreeMap<PathBuf, Vec<MethodModel>>>) {
    for paths in index.values_mut() {
        for methods in paths.values_mut() {
            methods.sort_by(|a, b| (&a.name, &a.code_smells).cmp(&(&b.name, &b.code_smells)));
        }
    }
}

proptest! {
    /// Property: merging preserves the total number of failures
    #[test]
    fn prop_merge_preserves_failure_count(a in failure_index(), b in failure_index()) {
        let expected = a.total_failures() + b.total_failures();
        prop_assert_eq!(a.merge(b).total_failures(), expected);
    }

    /// Property: empty index is a left and right identity
    #[test]
    fn prop_empty_is_identity(a in failure_index()) {
        prop_assert_eq!(a.clone().merge(FailureIndex::new()), a.clone());
        prop_assert_eq!(FailureIndex::new().merge(a.clone()), a);
    }

    /// Property: (a + b) + c == a + (b + c)
    #[test]
    fn prop_merge_is_associative(
        a in failure_index(),
        b in failure_index(),
        c in failure_index()
    ) {
        let left = a.clone().merge(b.clone()).merge(c.clone());
        let right = a.merge(b.merge(c));
        prop_assert_eq!(left, right);
    }

    /// Property: every (smell, path) key of the merge comes from one of the sides
    #[test]
    fn prop_merge_keys_are_union(a in failure_index(), b in failure_index()) {
        let merged = a.clone().merge(b.clone());
        for (smell, path, methods) in merged.iter() {
            let left = a.get(smell, path).map_or(0, <[_]>::len);
            let right = b.get(smell, path).map_or(0, <[_]>::len);
            prop_assert_eq!(methods.len(), left + right);
        }
    }

    /// Property: only failing methods with the handled smell are recorded,
    /// and successful ones lose the smell
    #[test]
    fn prop_single_run_records_exactly_the_failures(
        methods in prop::collection::vec(method(), 0..30)
    ) {
        let mut methods = methods;
        let before = methods.clone();
        let index = name_based_refactoring()
            .refactor(Path::new("Figure.java"), &mut methods)
            .unwrap();

        let expected_failures: Vec<&MethodModel> = before
            .iter()
            .filter(|m| m.has_smell(CodeSmellName::LongMethod) && m.name.len() % 2 == 1)
            .collect();
        prop_assert_eq!(index.total_failures(), expected_failures.len());

        for (before, after) in before.iter().zip(methods.iter()) {
            let resolved = before.has_smell(CodeSmellName::LongMethod) && before.name.len() % 2 == 0;
            prop_assert_eq!(after.has_smell(CodeSmellName::LongMethod), before.has_smell(CodeSmellName::LongMethod) && !resolved);
        }
    }

    /// Property: a multi-file run equals merging independent single-file runs
    #[test]
    fn prop_multi_run_equals_merged_single_runs(
        files in prop::collection::hash_map(path(), prop::collection::vec(method(), 0..6), 0..4)
    ) {
        let refactoring = name_based_refactoring();

        let mut all: MethodsByPath = files.clone();
        let combined = refactoring.refactor_all(&mut all).unwrap();

        let mut separate: MethodsByPath = files;
        let mut merged = FailureIndex::new();
        for (path, methods) in separate.iter_mut() {
            let mut single = refactoring.refactor(path, methods).unwrap().into_inner();
            sort_lists(&mut single);
            merged = merged.merge(FailureIndex::from(single));
        }

        let mut combined = combined.into_inner();
        sort_lists(&mut combined);

        prop_assert_eq!(FailureIndex::from(combined), merged);
        prop_assert_eq!(all, separate);
    }
}

#[test]
fn test_same_name_methods_compare_equal_after_sorting() {
    let refactoring = Refactoring::new(StrategyRegistry::new().with_strategy(FnStrategy::new(
        CodeSmellName::LongMethod,
        "yielding",
        |_, _| {
            std::thread::yield_now();
            Ok(false)
        },
    )))
    .with_parallel(smellfix::ParallelConfig::new().with_jobs(4));

    let build = || {
        let methods: Vec<MethodModel> = CodeSmellName::ALL
            .iter()
            .take(6)
            .map(|smell| {
                MethodModel::new("a")
                    .with_smell(CodeSmellName::LongMethod)
                    .with_smell(*smell)
            })
            .collect();
        let mut files = MethodsByPath::new();
        files.insert(PathBuf::from("a.java"), methods);
        files
    };

    for _ in 0..50 {
        let mut first = refactoring.refactor_all(&mut build()).unwrap().into_inner();
        let mut second = refactoring.refactor_all(&mut build()).unwrap().into_inner();
        sort_lists(&mut first);
        sort_lists(&mut second);
        assert_eq!(first, second);
    }
}
