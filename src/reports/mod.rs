use crate::cmd::survey::SurveySummary;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mechswitch::board::RULE_GRID;
use mechswitch::catalog::SwitchSpec;
use mechswitch::interaction::KeyCondition;
use mechswitch::round::RoundSetup;
use mechswitch::simulation::trace::IterationSnapshot;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_catalog(rows: &[(usize, &SwitchSpec)]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Switch").add_attribute(Attribute::Bold),
        Cell::new("Brand"),
        Cell::new("Color"),
        Cell::new("Sound"),
        Cell::new("Force (cN)"),
        Cell::new("Act (mm)"),
        Cell::new("Travel (mm)"),
        Cell::new("Col"),
    ]);
    for i in [0, 5, 6, 7, 8] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (idx, s) in rows {
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(s.name).add_attribute(Attribute::Bold),
            Cell::new(s.brand),
            Cell::new(s.color),
            Cell::new(s.sound),
            Cell::new(format!("{:.0}", s.force)),
            Cell::new(format!("{:.1}", s.actuation)),
            Cell::new(format!("{:.1}", s.travel)),
            Cell::new(s.column),
        ]);
    }
    println!("{}", table);
}

pub fn print_round(setup: &RoundSetup) {
    println!(
        "\n🧭 Order rule: {} → starting order {:?}",
        setup.order_rule, setup.starting_order
    );

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Switch"),
        Cell::new("Rank").fg(Color::Cyan),
        Cell::new("Condition"),
        Cell::new("Final cell"),
        Cell::new("Facing"),
    ]);
    for key in &setup.assignment.keys {
        let condition = if key.condition == KeyCondition::Normal {
            Cell::new("-")
        } else {
            Cell::new(key.condition).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(key.label).add_attribute(Attribute::Bold),
            Cell::new(key.switch.name),
            Cell::new(key.rank).fg(Color::Cyan),
            condition,
            Cell::new(format!("({}, {})", key.position.row, key.position.col)),
            Cell::new(key.facing),
        ]);
    }
    println!("{}", table);

    print_board(setup);
}

/// Final token grid. Empty rule cells show their rule id dimmed.
pub fn print_board(setup: &RoundSetup) {
    let mut table = new_table();
    for (r, ids) in RULE_GRID.iter().enumerate() {
        let cells: Vec<Cell> = ids
            .iter()
            .enumerate()
            .map(|(c, &id)| {
                let token = setup
                    .simulation
                    .board
                    .token_at(mechswitch::board::Pos::new(r as i8, c as i8));
                let cell = if token != 0 {
                    let label = setup
                        .assignment
                        .by_rank(token)
                        .map(|k| k.label.to_string())
                        .unwrap_or_else(|| token.to_string());
                    Cell::new(label)
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold)
                } else if id != 0 {
                    Cell::new(id).add_attribute(Attribute::Dim)
                } else {
                    Cell::new(" ")
                };
                cell.set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_trace(trace: &[IterationSnapshot]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Iter").add_attribute(Attribute::Bold),
        Cell::new("Tokens (rank@cell facing)"),
        Cell::new("Moved").fg(Color::Green),
        Cell::new("Abandoned").fg(Color::Red),
    ]);
    for snap in trace {
        table.add_row(vec![
            Cell::new(snap.iteration),
            Cell::new(snap.summary()),
            Cell::new(snap.moves).fg(Color::Green),
            Cell::new(snap.abandons).fg(Color::Red),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_survey(summary: &SurveySummary) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Order rule").add_attribute(Attribute::Bold),
        Cell::new("Rounds"),
        Cell::new("Share"),
    ]);
    for i in [1, 2] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let n = summary.rounds.max(1) as f32;
    for (rule, count) in &summary.rule_counts {
        if *count == 0 {
            continue;
        }
        table.add_row(vec![
            Cell::new(rule),
            Cell::new(count),
            Cell::new(format!("{:.1}%", *count as f32 / n * 100.0)),
        ]);
    }
    println!("\n{}", table);

    println!("📊 Rounds:                 {}", summary.rounds);
    println!(
        "📊 Hold order unchanged:   {} ({:.1}%)",
        summary.unchanged_orders,
        summary.unchanged_orders as f32 / n * 100.0
    );
    println!("📊 Mean moves/round:      {:.1}", summary.mean_moves);
    println!("📊 Mean abandons/round:   {:.1}", summary.mean_abandons);
    println!("📊 Mean conditions/round: {:.2}", summary.mean_conditions);
}
