//! Property tests for the graph builder.
//!
//! Rows are drawn from a small disease vocabulary (so pairs repeat and nodes
//! get reused) with separations that include NaN and empty labels.

use ddr_bel::builder;
use ddr_bel::model::SEPARATION_KEY;
use ddr_bel::{AssociationGraph, Row, Table, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        8 => prop::sample::select(vec![
            "Asthma", "Diabetes", "Obesity", "Influenza", "Common Cold", "Gout",
        ])
        .prop_map(str::to_string),
    ]
}

fn separation() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(f64::NAN),
        9 => -2.0f64..2.0,
    ]
}

fn row() -> impl Strategy<Value = Row> {
    (label(), label(), separation()).prop_map(|(a, b, s)| Row::pair(a, b, s))
}

fn table() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(row(), 0..40)
}

/// (source name, target name, s_AB bits) per edge, in creation order.
fn edge_list(graph: &AssociationGraph) -> Vec<(String, String, u64)> {
    graph
        .edges()
        .map(|e| {
            let (a, b) = graph.endpoints(e).unwrap();
            let s = e.annotation(SEPARATION_KEY).and_then(Value::as_float).unwrap();
            (a.name.clone(), b.name.clone(), s.to_bits())
        })
        .collect()
}

proptest! {
    #[test]
    fn build_is_deterministic(rows in table(), threshold in -2.0f64..2.0) {
        let table = Table::new(rows);
        let g1 = builder::build(&table, threshold);
        let g2 = builder::build(&table, threshold);
        prop_assert_eq!(g1.count_nodes(), g2.count_nodes());
        prop_assert_eq!(edge_list(&g1), edge_list(&g2));
    }

    #[test]
    fn threshold_is_monotone(rows in table(), t1 in -2.0f64..2.0, t2 in -2.0f64..2.0) {
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let table = Table::new(rows);
        let strict = builder::build(&table, lo);
        let loose = builder::build(&table, hi);
        prop_assert!(strict.count_edges() <= loose.count_edges());
        prop_assert!(strict.count_nodes() <= loose.count_nodes());
    }

    #[test]
    fn empty_labels_never_appear(rows in table(), threshold in -2.0f64..2.0) {
        let table = Table::new(rows);
        let graph = builder::build(&table, threshold);
        for (_, node) in graph.nodes() {
            prop_assert!(!node.name.is_empty());
        }
    }

    #[test]
    fn retained_edges_satisfy_filter(rows in table(), threshold in -2.0f64..2.0) {
        let table = Table::new(rows.clone());
        let graph = builder::build(&table, threshold);
        let expected = rows
            .iter()
            .filter(|r| !r.disease_a.is_empty() && !r.disease_b.is_empty())
            .filter(|r| r.s_ab_observed <= threshold)
            .count();
        prop_assert_eq!(graph.count_edges(), expected);
        for (_, _, bits) in edge_list(&graph) {
            let s = f64::from_bits(bits);
            prop_assert!(!s.is_nan() && s <= threshold);
        }
    }

    #[test]
    fn counts_ignore_row_order(
        (rows, shuffled) in table().prop_flat_map(|rows| {
            let shuffled = Just(rows.clone()).prop_shuffle();
            (Just(rows), shuffled)
        }),
        threshold in -2.0f64..2.0,
    ) {
        let g1 = builder::build(&Table::new(rows), threshold);
        let g2 = builder::build(&Table::new(shuffled), threshold);
        prop_assert_eq!(g1.count_nodes(), g2.count_nodes());
        prop_assert_eq!(g1.count_edges(), g2.count_edges());

        let mut e1 = edge_list(&g1);
        let mut e2 = edge_list(&g2);
        e1.sort();
        e2.sort();
        prop_assert_eq!(e1, e2);
    }
}
