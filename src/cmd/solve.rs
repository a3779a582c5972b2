use crate::cmd::{parse_draws, resolve_facts, seeded_rng};
use crate::reports;
use clap::Args;
use mechswitch::assignment::{KeyAssignment, KeyInstance};
use mechswitch::catalog::SwitchCatalog;
use mechswitch::config::RoundConfig;
use mechswitch::consts::KEY_COUNT;
use mechswitch::error::MsResult;
use mechswitch::facts::FactsProvider;
use mechswitch::interaction::KeyCondition;
use mechswitch::order_rule::OrderRule;
use mechswitch::round::RoundSetup;
use mechswitch::rules::StaticFacts;
use mechswitch::serial::SerialBitVector;
use mechswitch::simulation::trace::IterationSnapshot;
use mechswitch::simulation::GridSimulationEngine;
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: RoundConfig,

    /// Bomb facts JSON file
    #[arg(short, long)]
    pub facts: Option<String>,

    /// Serial number (overrides the facts file)
    #[arg(short = 'S', long)]
    pub serial: Option<String>,

    /// Five catalog indices instead of a random draw, e.g. "0,5,9,13,21"
    #[arg(short, long)]
    pub draws: Option<String>,

    #[arg(short, long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 10)]
    pub iterations: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub trace: bool,
}

#[derive(Debug, Serialize)]
pub struct SolveReport<'a> {
    pub serial: &'a str,
    pub serial_bits: String,
    pub static_rules: Vec<u8>,
    pub order_rule: OrderRule,
    pub order_rule_text: String,
    pub starting_order: [u8; KEY_COUNT],
    pub hold_order: &'a [u8],
    pub hold_labels: Vec<char>,
    pub keys: &'a [KeyInstance],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<&'a [IterationSnapshot]>,
}

pub fn run(args: SolveArgs) -> MsResult<()> {
    args.config.validate()?;
    let facts = resolve_facts(args.facts.as_deref(), args.serial.as_deref())?;

    let mut rng = seeded_rng(args.seed);
    let catalog = SwitchCatalog::new(&mut rng);
    // Conditions before switches, as a module round rolls them.
    let conditions: [KeyCondition; KEY_COUNT] =
        std::array::from_fn(|_| KeyCondition::roll(&mut rng, &args.config.conditions));
    let assignment = match &args.draws {
        Some(raw) => KeyAssignment::from_draws(&catalog, &parse_draws(raw)?),
        None => KeyAssignment::random(&mut rng, &catalog),
    }
    .with_conditions(conditions);

    let serial = SerialBitVector::from_serial(facts.serial_number());
    let statics = StaticFacts::evaluate(&facts);
    let engine = GridSimulationEngine::with_iterations(args.iterations);
    let setup = RoundSetup::derive(assignment, &serial, &statics, &engine);

    let hold_labels: Vec<char> = setup
        .hold_order()
        .iter()
        .filter_map(|&r| setup.assignment.by_rank(r).map(|k| k.label))
        .collect();

    if args.json {
        let report = SolveReport {
            serial: facts.serial_number(),
            serial_bits: serial.to_bit_string(),
            static_rules: statics.true_ids(),
            order_rule: setup.order_rule,
            order_rule_text: setup.order_rule.to_string(),
            starting_order: setup.starting_order,
            hold_order: setup.hold_order(),
            hold_labels,
            keys: &setup.assignment.keys,
            trace: args.trace.then_some(setup.simulation.trace.as_slice()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n🔑 Serial: {}  (bits {})", facts.serial_number(), serial.to_bit_string());
    println!("📜 Static rules in force: {:?}", statics.true_ids());
    reports::print_round(&setup);
    if args.trace {
        reports::print_trace(&setup.simulation.trace);
    }
    println!(
        "\n✅ Hold order: {}",
        hold_labels
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    );
    Ok(())
}
