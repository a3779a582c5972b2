use crate::cmd::{resolve_facts, seeded_rng};
use crate::reports;
use clap::Args;
use mechswitch::config::RoundConfig;
use mechswitch::error::MsResult;
use mechswitch::interaction::KeyCondition;
use mechswitch::order_rule::OrderRule;
use mechswitch::presentation::NullSink;
use mechswitch::round::{ModuleId, ModuleState};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct SurveyArgs {
    #[command(flatten)]
    pub config: RoundConfig,

    #[arg(short, long, default_value_t = 1000)]
    pub rounds: usize,

    #[arg(short, long)]
    pub facts: Option<String>,

    #[arg(short = 'S', long)]
    pub serial: Option<String>,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write one row per round to this CSV file
    #[arg(long)]
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyRow {
    pub round: usize,
    pub seed: u64,
    pub order_rule: String,
    pub starting_order: String,
    pub hold_order: String,
    pub moves: usize,
    pub abandons: usize,
    pub conditions: usize,
}

#[derive(Debug, Default)]
pub struct SurveySummary {
    pub rounds: usize,
    pub rule_counts: Vec<(OrderRule, usize)>,
    pub unchanged_orders: usize,
    pub mean_moves: f32,
    pub mean_abandons: f32,
    pub mean_conditions: f32,
}

impl SurveySummary {
    pub fn from_rows(rows: &[SurveyRow]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for r in rows {
            *counts.entry(r.order_rule.clone()).or_default() += 1;
        }
        let rule_counts = OrderRule::iter()
            .map(|rule| (rule, counts.get(&rule.to_string()).copied().unwrap_or(0)))
            .collect();

        let n = rows.len().max(1) as f32;
        Self {
            rounds: rows.len(),
            rule_counts,
            unchanged_orders: rows
                .iter()
                .filter(|r| r.starting_order == r.hold_order)
                .count(),
            mean_moves: rows.iter().map(|r| r.moves as f32).sum::<f32>() / n,
            mean_abandons: rows.iter().map(|r| r.abandons as f32).sum::<f32>() / n,
            mean_conditions: rows.iter().map(|r| r.conditions as f32).sum::<f32>() / n,
        }
    }
}

fn join(ranks: &[u8]) -> String {
    ranks
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("")
}

pub fn run(args: SurveyArgs) -> MsResult<()> {
    args.config.validate()?;
    let facts = resolve_facts(args.facts.as_deref(), args.serial.as_deref())?;

    let mut rng = seeded_rng(args.seed);
    let seeds: Vec<u64> = (0..args.rounds).map(|_| rng.u64(..)).collect();

    println!(
        "🔥 Surveying {} rounds for serial {}",
        args.rounds, facts.serial_number
    );
    let start = Instant::now();

    let rows: Vec<SurveyRow> = seeds
        .par_iter()
        .enumerate()
        .map(|(i, &seed)| -> MsResult<SurveyRow> {
            let module = ModuleState::new(
                ModuleId(i as u32 + 1),
                facts.clone(),
                NullSink,
                args.config.clone(),
                Some(seed),
            )?;
            let round = module.round();
            let sim = &round.simulation;
            Ok(SurveyRow {
                round: i + 1,
                seed,
                order_rule: round.order_rule.to_string(),
                starting_order: join(&round.starting_order),
                hold_order: join(&sim.hold_order),
                moves: sim.trace.iter().map(|s| s.moves).sum(),
                abandons: sim.trace.iter().map(|s| s.abandons).sum(),
                conditions: round
                    .assignment
                    .keys
                    .iter()
                    .filter(|k| k.condition != KeyCondition::Normal)
                    .count(),
            })
        })
        .collect::<MsResult<_>>()?;

    let elapsed = start.elapsed();
    println!(
        "⏱️  Done in {:.2?} ({:.0} rounds/s)",
        elapsed,
        rows.len() as f64 / elapsed.as_secs_f64().max(1e-9)
    );

    if let Some(path) = &args.csv {
        let mut wtr = csv::Writer::from_path(path)?;
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        println!("💾 Wrote {} rows to {}", rows.len(), path);
    }

    reports::print_survey(&SurveySummary::from_rows(&rows));
    Ok(())
}
