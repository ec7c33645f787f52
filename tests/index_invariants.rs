//! Consistency of the inverted index under arbitrary batch sequences.

use std::collections::BTreeMap;

use proptest::prelude::*;
use xiphos::document::Document;
use xiphos::error::Result;
use xiphos::index::Index;
use xiphos::search::{Bm25Params, ModelKind, SearchModel};

/// Term → (document id → term frequency), ordered for comparison.
type Snapshot = BTreeMap<String, BTreeMap<String, u32>>;

const VOCABULARY: &[&str] = &["cat", "dog", "bird", "fish", "sat", "ran", "mat", "log"];

fn doc(id: &str, words: &[&str]) -> Document {
    Document::from_terms(
        id,
        words.join(" "),
        words.iter().map(|word| word.to_string()).collect(),
    )
}

fn all_models() -> Vec<SearchModel> {
    ModelKind::ALL
        .iter()
        .map(|&kind| SearchModel::new(kind, Bm25Params::default()))
        .collect()
}

fn snapshot(index: &Index) -> Snapshot {
    index
        .terms()
        .map(|(term, info)| {
            let postings = info
                .doc_ids()
                .map(|id| (id.to_string(), index.document(id).map_or(0, |d| d.tf_raw(term))))
                .collect();
            (term.to_string(), postings)
        })
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Add(Vec<(u8, Vec<usize>)>),
    Delete(Vec<u8>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let words = prop::collection::vec(0..VOCABULARY.len(), 0..6);
    prop_oneof![
        prop::collection::vec((0u8..8, words), 1..5).prop_map(Op::Add),
        prop::collection::vec(0u8..10, 1..4).prop_map(Op::Delete),
    ]
}

fn apply(index: &mut Index, op: &Op) -> Result<()> {
    match op {
        Op::Add(batch) => index.add_batch(
            batch
                .iter()
                .map(|(id, words)| {
                    let words: Vec<&str> = words.iter().map(|&w| VOCABULARY[w]).collect();
                    doc(&format!("d{id}"), &words)
                })
                .collect(),
        ),
        Op::Delete(ids) => {
            let ids: Vec<String> = ids.iter().map(|id| format!("d{id}")).collect();
            index.delete_batch(&ids)
        }
    }
}

proptest! {
    #[test]
    fn prop_document_frequency_matches_postings(ops in prop::collection::vec(op_strategy(), 1..20)) {
        let mut index = Index::new(all_models());
        for op in &ops {
            apply(&mut index, op).unwrap();
            index.check_invariants().unwrap();

            for (term, info) in index.terms() {
                prop_assert!(!info.is_empty(), "term {} has no documents", term);
                let containing = index
                    .documents()
                    .values()
                    .filter(|document| document.tf_raw(term) > 0)
                    .count();
                prop_assert_eq!(info.document_frequency(), containing);
            }
        }
    }

    #[test]
    fn prop_deleting_everything_empties_the_index(
        ops in prop::collection::vec(op_strategy(), 1..20),
        reverse in any::<bool>(),
    ) {
        let mut index = Index::new(all_models());
        for op in &ops {
            apply(&mut index, op).unwrap();
        }

        let mut ids: Vec<String> = index.documents().keys().cloned().collect();
        ids.sort();
        if reverse {
            ids.reverse();
        }
        for id in &ids {
            index.delete_document(id).unwrap();
        }

        prop_assert!(index.is_empty());
        prop_assert_eq!(index.term_count(), 0);
    }

    #[test]
    fn prop_replace_equals_delete_then_add(
        old in prop::collection::vec(0..VOCABULARY.len(), 0..6),
        new in prop::collection::vec(0..VOCABULARY.len(), 0..6),
    ) {
        let old: Vec<&str> = old.iter().map(|&w| VOCABULARY[w]).collect();
        let new: Vec<&str> = new.iter().map(|&w| VOCABULARY[w]).collect();
        let other = doc("other", &["cat", "mat"]);

        let mut replaced = Index::new(all_models());
        replaced.add_batch(vec![other.clone(), doc("d1", &old)]).unwrap();
        replaced.add_document(doc("d1", &new)).unwrap();

        let mut rebuilt = Index::new(all_models());
        rebuilt.add_batch(vec![other, doc("d1", &old)]).unwrap();
        rebuilt.delete_document("d1").unwrap();
        rebuilt.add_document(doc("d1", &new)).unwrap();

        prop_assert_eq!(snapshot(&replaced), snapshot(&rebuilt));
        prop_assert_eq!(
            replaced.document("d1").map(|d| d.text().to_string()),
            rebuilt.document("d1").map(|d| d.text().to_string())
        );
    }
}

#[test]
fn test_readding_deleted_id_leaves_no_residue() -> Result<()> {
    let mut index = Index::new(all_models());
    index.add_batch(vec![doc("d1", &["cat", "sat"]), doc("d2", &["dog", "sat"])])?;

    index.delete_document("d1")?;
    index.add_document(doc("d1", &["fish", "ran"]))?;

    assert!(index.term("cat").is_none());
    assert_eq!(index.term("sat").map(|info| info.document_frequency()), Some(1));
    assert!(!index.term("sat").is_some_and(|info| info.contains("d1")));
    assert!(index.term("fish").is_some_and(|info| info.contains("d1")));
    index.check_invariants()?;

    Ok(())
}

#[test]
fn test_collection_frequency_tracks_log_weights() -> Result<()> {
    let mut index = Index::default();
    index.add_batch(vec![doc("d1", &["cat", "cat"]), doc("d2", &["cat"])])?;

    let expected = (1.0 + 2f64.ln()) + 1.0;
    let info = index.term("cat").expect("cat is indexed");
    assert!((info.collection_frequency() - expected).abs() < 1e-12);

    index.delete_document("d1")?;
    let info = index.term("cat").expect("cat is still indexed");
    assert!((info.collection_frequency() - 1.0).abs() < 1e-12);

    Ok(())
}
