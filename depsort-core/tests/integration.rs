//! Integration Tests for Dependency Analysis
//!
//! These tests run the scenarios and ordering properties against both
//! analyzers, through direct graph construction and through the key-based
//! builder.

use depsort_core::{
    AnalysisReport, Analyzer, DependencyMap, Graph, GraphError, LevelAnalyzer, NodeId,
    QueueAnalyzer,
};

/// Builds five nodes `value0..value4` with the given "depends on" edges.
fn five_nodes(edges: &[(usize, usize)]) -> (Graph<String>, Vec<NodeId>) {
    let mut graph = Graph::new();
    let ids: Vec<_> = (0..5).map(|i| graph.add_node(format!("value{i}"))).collect();
    for &(node, dependency) in edges {
        graph.add_dependency(ids[node], ids[dependency]).unwrap();
    }
    (graph, ids)
}

const DIAMOND: &[(usize, usize)] = &[(0, 1), (2, 0), (1, 3), (1, 4)];
const FULL_CYCLE: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)];
const MUTUAL_PAIR: &[(usize, usize)] = &[(0, 1), (1, 0)];
const PARTIAL_CYCLE: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (3, 1)];

fn strategies() -> Vec<(&'static str, Box<dyn Analyzer<String>>)> {
    let level: Box<dyn Analyzer<String>> = Box::new(LevelAnalyzer::new());
    let queue: Box<dyn Analyzer<String>> = Box::new(QueueAnalyzer::new());
    vec![("level", level), ("queue", queue)]
}

/// Test that both strategies order the diamond identically.
#[test]
fn diamond_orders_dependencies_first() {
    for (name, mut analyzer) in strategies() {
        let (mut graph, ids) = five_nodes(DIAMOND);

        assert!(analyzer.analyze(&mut graph), "{name}");
        assert_eq!(
            analyzer.ordered_nodes(),
            &[ids[3], ids[4], ids[1], ids[0], ids[2]],
            "{name}"
        );
        assert_eq!(
            analyzer.depth_groups(),
            vec![
                vec!["value3".to_string(), "value4".to_string()],
                vec!["value1".to_string()],
                vec!["value0".to_string()],
                vec!["value2".to_string()],
            ],
            "{name}"
        );
        assert_eq!(analyzer.max_depth(), 3, "{name}");
    }
}

/// Test that a cycle through every node leaves every node unresolved.
#[test]
fn full_cycle_is_invalid() {
    for (name, mut analyzer) in strategies() {
        let (mut graph, ids) = five_nodes(FULL_CYCLE);

        assert!(!analyzer.analyze(&mut graph), "{name}");
        assert!(analyzer.is_cyclic(), "{name}");
        assert_eq!(analyzer.cycle_nodes(), ids.as_slice(), "{name}");
        assert_eq!(analyzer.cycle_size(), 5, "{name}");
    }
}

/// Test that a mutual pair invalidates the run while isolated nodes order.
#[test]
fn mutual_pair_is_invalid() {
    for (name, mut analyzer) in strategies() {
        let (mut graph, ids) = five_nodes(MUTUAL_PAIR);

        assert!(!analyzer.analyze(&mut graph), "{name}");
        assert_eq!(analyzer.cycle_nodes(), &ids[..2], "{name}");
        assert_eq!(analyzer.ordered_nodes(), &ids[2..], "{name}");
    }
}

/// Test that a node depending on a cycle is reported with the cycle.
#[test]
fn partial_cycle_reports_dangling_dependent() {
    for (name, mut analyzer) in strategies() {
        let (mut graph, ids) = five_nodes(PARTIAL_CYCLE);

        assert!(!analyzer.analyze(&mut graph), "{name}");
        assert_eq!(analyzer.cycle_nodes(), &ids[..4], "{name}");
        assert_eq!(analyzer.ordered_nodes(), &[ids[4]], "{name}");
        assert_eq!(analyzer.depth(ids[3]), None, "{name}");
    }
}

/// Test that an empty graph is trivially valid.
#[test]
fn empty_input_is_valid() {
    for (name, mut analyzer) in strategies() {
        let mut graph = Graph::new();

        assert!(analyzer.analyze(&mut graph), "{name}");
        assert!(analyzer.ordered_nodes().is_empty(), "{name}");
        assert!(analyzer.cycle_nodes().is_empty(), "{name}");
        assert_eq!(analyzer.max_depth(), 0, "{name}");
    }
}

/// Test that the builder produces the same diamond ordering.
#[test]
fn dependency_map_feeds_both_strategies() {
    let mut map = DependencyMap::new();
    for i in 0..5 {
        map.add(format!("value{i}"), i);
    }
    map.add_dependency("value0".to_string(), "value1".to_string())
        .unwrap();
    map.add_dependency("value2".to_string(), "value0".to_string())
        .unwrap();
    map.add_dependent("value3".to_string(), "value1".to_string())
        .unwrap();
    map.add_dependent("value4".to_string(), "value1".to_string())
        .unwrap();

    let keyed = map.build().unwrap();
    let mut level = LevelAnalyzer::new();
    assert!(level.analyze(keyed.graph()));
    assert_eq!(level.ordered_values(), &[3, 4, 1, 0, 2]);

    let mut keyed = map.build().unwrap();
    let mut queue = QueueAnalyzer::new();
    assert!(queue.analyze(keyed.graph_mut()));
    assert_eq!(queue.ordered_values(), &[3, 4, 1, 0, 2]);
    assert_eq!(queue.depth_groups(), vec![vec![3, 4], vec![1], vec![0], vec![2]]);

    // The map is untouched by the destructive run
    assert_eq!(map.build().unwrap().graph().edge_count(), 4);
}

/// Test that builder cycles surface as invalid analyses, not errors.
#[test]
fn dependency_map_cycle_is_an_outcome() {
    let mut map = DependencyMap::new();
    map.add("a", ());
    map.add("b", ());
    map.add_dependency("a", "b").unwrap();
    map.add_dependency("b", "a").unwrap();

    let mut keyed = map.build().unwrap();
    let mut analyzer = QueueAnalyzer::new();
    assert!(!analyzer.analyze(keyed.graph_mut()));

    let names: Vec<_> = analyzer
        .cycle_nodes()
        .iter()
        .filter_map(|id| keyed.key(*id))
        .copied()
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

/// Test that self-dependencies are rejected when the edge is created.
#[test]
fn self_dependency_is_rejected_at_creation() {
    let mut graph = Graph::new();
    let a = graph.add_node(0);
    assert_eq!(
        graph.add_dependency(a, a),
        Err(GraphError::SelfDependency { node: a })
    );

    let mut map: DependencyMap<&str, i32> = DependencyMap::new();
    assert!(map.add_dependent("a", "a").is_err());
}

/// Test that reports survive a JSON round trip.
#[test]
fn report_round_trips_through_json() {
    let (mut graph, ids) = five_nodes(PARTIAL_CYCLE);
    let mut analyzer = QueueAnalyzer::new();
    analyzer.analyze(&mut graph);

    let report = AnalysisReport::from_analyzer(&analyzer);
    assert_eq!(report.cycle, ids[..4].to_vec());

    let parsed = AnalysisReport::from_json(&report.to_json().unwrap()).unwrap();
    assert_eq!(parsed, report);
}

// Property checks over generated graphs. The generator is a fixed LCG so
// failures reproduce exactly.

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Builds an acyclic graph: edges only point from higher to lower rank, and
/// ranks are shuffled relative to insertion order.
fn random_dag(seed: u64, n: usize) -> Graph<usize> {
    let mut rng = Lcg(seed);
    let mut rank: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.below(i as u64 + 1) as usize;
        rank.swap(i, j);
    }

    let mut graph = Graph::with_capacity(n);
    let ids: Vec<_> = (0..n).map(|i| graph.add_node(i)).collect();
    for a in 0..n {
        for b in 0..n {
            if rank[b] < rank[a] && rng.below(4) == 0 {
                graph.add_dependency(ids[a], ids[b]).unwrap();
            }
        }
    }
    graph
}

fn check_ordering_properties(graph: &Graph<usize>, analyzer: &dyn Analyzer<usize>) {
    assert!(analyzer.is_valid());
    assert_eq!(analyzer.ordered_nodes().len(), graph.len());

    for (id, node) in graph.iter() {
        let position = analyzer.position(id).unwrap();
        let mut expected_depth = 0;
        for dependency in node.dependencies() {
            assert!(analyzer.position(*dependency).unwrap() < position);
            expected_depth = expected_depth.max(analyzer.depth(*dependency).unwrap() + 1);
        }
        assert_eq!(analyzer.depth(id), Some(expected_depth));
    }

    let flattened: Vec<NodeId> = analyzer.depth_group_nodes().into_iter().flatten().collect();
    assert_eq!(flattened, analyzer.ordered_nodes());
}

/// Test ordering, depth and grouping invariants on generated DAGs.
#[test]
fn generated_dags_satisfy_ordering_invariants() {
    for seed in 0..20 {
        let graph = random_dag(seed, 40);

        let mut level = LevelAnalyzer::new();
        assert!(level.analyze(&graph));
        check_ordering_properties(&graph, &level);

        let mut queue = QueueAnalyzer::new();
        let mut consumed = graph.clone();
        assert!(queue.analyze(&mut consumed));
        check_ordering_properties(&graph, &queue);

        for id in graph.node_ids() {
            assert_eq!(level.depth(id), queue.depth(id), "seed {seed}");
        }
    }
}

/// Test that re-running the level analyzer reproduces its results.
#[test]
fn level_analysis_is_idempotent() {
    let graph = random_dag(7, 30);
    let mut analyzer = LevelAnalyzer::new();

    analyzer.analyze(&graph);
    let first = AnalysisReport::from_analyzer(&analyzer);
    analyzer.analyze(&graph);
    assert_eq!(AnalysisReport::from_analyzer(&analyzer), first);
}

/// Test that every node on an injected cycle is reported.
#[test]
fn generated_cycles_are_reported() {
    for seed in 0..20 {
        let mut graph = random_dag(seed, 25);

        // Close a three-node loop: 0 -> 1 -> 2 -> 0
        let loop_nodes = [NodeId::from(0), NodeId::from(1), NodeId::from(2)];
        for i in 0..3 {
            graph
                .add_dependency(loop_nodes[i], loop_nodes[(i + 1) % 3])
                .unwrap();
        }

        let mut level = LevelAnalyzer::new();
        assert!(!level.analyze(&graph));
        let mut queue = QueueAnalyzer::new();
        assert!(!queue.analyze(&mut graph.clone()));

        for node in loop_nodes {
            assert!(level.cycle_nodes().contains(&node), "seed {seed}");
            assert!(queue.cycle_nodes().contains(&node), "seed {seed}");
        }
        assert_eq!(level.cycle_nodes(), queue.cycle_nodes(), "seed {seed}");
    }
}
