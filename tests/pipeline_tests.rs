mod common;

use common::{pipeline, record, salary_scenario};
use moneyflow_core::{
    core::services::{ColumnPositioner, LayoutEngine, NodePositioner},
    domain::NodeRole,
    FlowInput, FlowOptions,
};

#[test]
fn salary_scenario_builds_expected_graph() {
    let graph = pipeline().compute(&salary_scenario());

    let names: Vec<_> = graph.nodes.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Income",
            "Budget",
            "Housing",
            "Food",
            "Savings",
            "Transportation",
            "Entertainment"
        ]
    );
    assert_eq!(graph.nodes[0].percentage_of_side, Some(100.0));
    assert_eq!(graph.nodes[1].role, NodeRole::Hub);

    let expected = [
        ("Housing", 1200.0),
        ("Food", 400.0),
        ("Savings", 300.0),
        ("Transportation", 200.0),
        ("Entertainment", 100.0),
    ];
    for (name, amount) in expected {
        let index = graph
            .nodes
            .iter()
            .position(|node| node.name == name)
            .expect("expense node present");
        let link = graph
            .links
            .iter()
            .find(|link| link.target_index == index)
            .expect("hub link present");
        assert_eq!(link.source_index, 1);
        assert_eq!(link.dollar_amount, amount);
        assert!((link.percentage_of_side - amount / 2200.0 * 100.0).abs() < 1e-9);
    }

    assert_eq!(graph.total_inflow, 3000.0);
    assert_eq!(graph.total_outflow, 2200.0);
    assert!(!graph.balanced);
    assert_eq!(
        graph.warning.as_deref(),
        Some("Total inflow ($3,000.00) does not match total outflow ($2,200.00)")
    );
}

#[test]
fn balanced_totals_carry_no_warning() {
    let input = FlowInput::new(
        vec![record("pay", 1000.0, "Salary")],
        vec![
            record("rent", 600.0, "Housing"),
            record("food", 250.0, "Food"),
            record("bills", 150.0, "Utilities"),
        ],
    );
    let graph = pipeline().compute(&input);
    assert!(graph.balanced);
    assert_eq!(graph.warning, None);
}

#[test]
fn unbalanced_totals_report_both_amounts() {
    let input = FlowInput::new(
        vec![record("pay", 1000.0, "Salary")],
        vec![record("rent", 800.0, "Housing")],
    );
    let graph = pipeline().compute(&input);
    assert!(!graph.balanced);
    let warning = graph.warning.expect("warning present");
    assert!(warning.contains("$1,000.00"), "{warning}");
    assert!(warning.contains("$800.00"), "{warning}");
}

#[test]
fn bucketing_conserves_side_totals() {
    let incomes: Vec<_> = (1..=9)
        .map(|i| record(&format!("i{i}"), f64::from(i) * 100.0, &format!("Client {i}")))
        .collect();
    let expenses: Vec<_> = [
        ("Housing", 900.0),
        ("Food", 310.0),
        ("Travel", 120.0),
        ("Gifts", 75.0),
        ("Taxes", 400.0),
        ("Education", 60.0),
        ("Hobby Lab", 45.0),
        ("", 20.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, (category, amount))| record(&format!("e{i}"), *amount, category))
    .collect();
    let income_sum: f64 = incomes.iter().map(|r| r.amount).sum();
    let expense_sum: f64 = expenses.iter().map(|r| r.amount).sum();

    let graph = pipeline().compute(&FlowInput::new(incomes, expenses));

    let side_sum = |role| -> f64 {
        graph
            .nodes
            .iter()
            .filter(|node| node.role == role)
            .map(|node| node.value)
            .sum()
    };
    assert_eq!(side_sum(NodeRole::Income), income_sum);
    assert_eq!(side_sum(NodeRole::Expense), expense_sum);

    // Five ranked categories plus the overflow bucket on each side.
    assert_eq!(graph.nodes_with_role(NodeRole::Income).count(), 6);
    assert_eq!(graph.nodes_with_role(NodeRole::Expense).count(), 6);
    let last_income = graph
        .nodes_with_role(NodeRole::Income)
        .last()
        .expect("income nodes");
    assert_eq!(last_income.name, "Other Income");
    assert_eq!(last_income.value, 100.0 + 200.0 + 300.0 + 400.0);
    let last_expense = graph
        .nodes_with_role(NodeRole::Expense)
        .last()
        .expect("expense nodes");
    assert_eq!(last_expense.name, "Other Expenses");
    assert_eq!(last_expense.value, 60.0 + 45.0 + 20.0);
}

#[test]
fn repeated_runs_are_identical() {
    let pipeline = pipeline();
    let input = salary_scenario();
    let first = pipeline.run(&input, 960.0, 600.0);
    let second = pipeline.run(&input, 960.0, 600.0);
    assert_eq!(first, second);
}

#[test]
fn record_order_does_not_change_the_graph() {
    let pipeline = pipeline();
    let input = salary_scenario();
    let mut shuffled = input.clone();
    shuffled.expenses.reverse();
    assert_eq!(pipeline.compute(&input), pipeline.compute(&shuffled));
}

#[test]
fn literal_canonical_names_are_never_reclassified() {
    let classifier = pipeline();
    let classifier = classifier.classifier();
    for side in [moneyflow_core::FlowSide::Income, moneyflow_core::FlowSide::Expense] {
        assert_eq!(classifier.classify(Some("Housing"), side), "Housing");
    }
}

/// Income categories are trusted as given: only the income keyword list
/// normalizes them, unlike the alias and keyword tables applied to expenses.
#[test]
fn income_categories_pass_through_without_expense_normalization() {
    let input = FlowInput::new(
        vec![
            record("etsy", 250.0, "Etsy shop"),
            record("pay", 750.0, "Monthly salary"),
        ],
        vec![record("shop", 1000.0, "Etsy shop")],
    );
    let graph = pipeline().compute(&input);
    let income: Vec<_> = graph
        .nodes_with_role(NodeRole::Income)
        .map(|node| node.name.as_str())
        .collect();
    let expense: Vec<_> = graph
        .nodes_with_role(NodeRole::Expense)
        .map(|node| node.name.as_str())
        .collect();
    assert_eq!(income, vec!["Income", "Etsy shop"]);
    assert_eq!(expense, vec!["Shopping"]);
}

#[test]
fn allow_list_limits_categories() {
    let input = salary_scenario().with_options(FlowOptions {
        include_categories: Some(vec!["income".into(), "housing".into(), "food".into()]),
        ..FlowOptions::default()
    });
    let graph = pipeline().compute(&input);
    let expense: Vec<_> = graph
        .nodes_with_role(NodeRole::Expense)
        .map(|node| node.name.as_str())
        .collect();
    assert_eq!(expense, vec!["Housing", "Food"]);
    assert_eq!(graph.total_outflow, 1600.0);
}

#[test]
fn stacked_intervals_fill_each_node_without_overlap() {
    let pipeline = pipeline();
    let input = FlowInput::new(
        vec![
            record("a", 2000.0, "Salary"),
            record("b", 700.0, "Consulting"),
            record("c", 300.0, "Dividends"),
        ],
        vec![
            record("rent", 1200.0, "Housing"),
            record("food", 400.0, "Food"),
            record("bus", 200.0, "Transportation"),
            record("fun", 100.0, "Entertainment"),
            record("save", 300.0, "Savings"),
        ],
    );
    let result = pipeline.run(&input, 960.0, 600.0);
    let layout = &result.layout;
    assert_eq!(layout.connectors.len(), result.graph.links.len());

    for index in 0..result.graph.nodes.len() {
        let extent = layout.extent(index).expect("every node placed");
        for outgoing in [true, false] {
            let mut spans: Vec<(f64, f64)> = layout
                .connectors
                .iter()
                .filter(|c| if outgoing { c.source_index == index } else { c.target_index == index })
                .map(|c| {
                    if outgoing {
                        (c.source_y0, c.source_y1)
                    } else {
                        (c.target_y0, c.target_y1)
                    }
                })
                .collect();
            if spans.is_empty() {
                continue;
            }
            spans.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("finite"));
            let total: f64 = spans.iter().map(|(y0, y1)| y1 - y0).sum();
            assert!((total - extent.height()).abs() < 1e-6, "node {index}");
            assert!((spans[0].0 - extent.y0).abs() < 1e-6);
            for pair in spans.windows(2) {
                assert!(pair[1].0 >= pair[0].1 - 1e-9, "overlap at node {index}");
            }
        }
    }
}

#[test]
fn external_extents_can_be_supplied_directly() {
    let pipeline = pipeline();
    let graph = pipeline.compute(&salary_scenario());
    let extents = ColumnPositioner::new(20.0, 8.0).position(&graph, 800.0, 400.0);
    let layout = LayoutEngine::default().layout(&graph, &extents, 400.0);
    let order: Vec<_> = layout
        .connectors
        .iter()
        .map(|c| (c.target_index, c.draw_order))
        .collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}
