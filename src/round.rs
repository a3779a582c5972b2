use crate::assignment::KeyAssignment;
use crate::catalog::SwitchCatalog;
use crate::config::RoundConfig;
use crate::consts::{KEY_COUNT, LOG_TAG};
use crate::error::MsResult;
use crate::facts::{FactsProvider, TimerReading};
use crate::interaction::{InteractionState, KeyCondition, PressOutcome, ReleaseOutcome};
use crate::order_rule::{starting_order, OrderRule};
use crate::presentation::{KeyMaterial, PresentationSink, SoundCue};
use crate::rules::StaticFacts;
use crate::serial::SerialBitVector;
use crate::simulation::{GridSimulationEngine, SimulationOutcome};
use fastrand::Rng;
use std::fmt;
use tracing::{debug, info, warn};

/// Per-instance number used in log lines. Handed out by whoever creates
/// the modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} #{}]", LOG_TAG, self.0)
    }
}

/// Everything derived when a round starts.
#[derive(Debug, Clone)]
pub struct RoundSetup {
    pub assignment: KeyAssignment,
    pub order_rule: OrderRule,
    pub starting_order: [u8; KEY_COUNT],
    pub simulation: SimulationOutcome,
}

impl RoundSetup {
    /// Derives starting order and hold order for a fixed assignment.
    pub fn derive(
        mut assignment: KeyAssignment,
        serial: &SerialBitVector,
        statics: &StaticFacts,
        engine: &GridSimulationEngine,
    ) -> Self {
        let (order_rule, order) = starting_order(assignment.switches());
        let simulation = engine.run(&assignment, &order, serial, statics);
        simulation.apply_to(&mut assignment);
        Self {
            assignment,
            order_rule,
            starting_order: order,
            simulation,
        }
    }

    pub fn hold_order(&self) -> &[u8] {
        &self.simulation.hold_order
    }
}

/// One module on the bomb: catalog, facts snapshot, the current round and
/// the interaction state.
pub struct ModuleState<F: FactsProvider, S: PresentationSink> {
    id: ModuleId,
    config: RoundConfig,
    rng: Rng,
    catalog: SwitchCatalog,
    facts: F,
    statics: StaticFacts,
    serial: SerialBitVector,
    engine: GridSimulationEngine,
    round: RoundSetup,
    interaction: InteractionState,
    sink: S,
    solved: bool,
    strikes: u32,
    rounds: u32,
}

impl<F: FactsProvider, S: PresentationSink> ModuleState<F, S> {
    /// Builds the module and starts its first round. Fails on a timing
    /// config that `RoundConfig::validate` rejects.
    pub fn new(
        id: ModuleId,
        facts: F,
        sink: S,
        config: RoundConfig,
        seed: Option<u64>,
    ) -> MsResult<Self> {
        config.validate()?;
        let mut rng = match seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };
        let catalog = SwitchCatalog::new(&mut rng);
        let engine = GridSimulationEngine::new();
        let tag = id.to_string();

        let (statics, serial) = Self::snapshot_facts(&tag, &facts);
        let round = Self::roll_round(&mut rng, &catalog, &config, &serial, &statics, &engine);
        let interaction = InteractionState::new(config.timing, tag);

        let mut module = Self {
            id,
            config,
            rng,
            catalog,
            facts,
            statics,
            serial,
            engine,
            round,
            interaction,
            sink,
            solved: false,
            strikes: 0,
            rounds: 0,
        };
        module.start_round();
        Ok(module)
    }

    /// Polls the bomb for this round's static flags and serial bits.
    fn snapshot_facts(tag: &str, facts: &F) -> (StaticFacts, SerialBitVector) {
        let statics = StaticFacts::evaluate(facts);
        let serial = SerialBitVector::from_serial(facts.serial_number());
        debug!(
            "{} Serial {} -> bits {}",
            tag,
            facts.serial_number(),
            serial.to_bit_string()
        );
        debug!("{} True static rules: {:?}", tag, statics.true_ids());
        (statics, serial)
    }

    /// Same draw order as `solve --seed`: catalog first, then conditions,
    /// then switches.
    fn roll_round(
        rng: &mut Rng,
        catalog: &SwitchCatalog,
        config: &RoundConfig,
        serial: &SerialBitVector,
        statics: &StaticFacts,
        engine: &GridSimulationEngine,
    ) -> RoundSetup {
        let conditions: [KeyCondition; KEY_COUNT] =
            std::array::from_fn(|_| KeyCondition::roll(rng, &config.conditions));
        let assignment = KeyAssignment::random(rng, catalog).with_conditions(conditions);
        RoundSetup::derive(assignment, serial, statics, engine)
    }

    /// Re-reads the bomb facts, rolls fresh keys and derives a new hold order.
    pub fn reset(&mut self) {
        let (statics, serial) = Self::snapshot_facts(&self.id.to_string(), &self.facts);
        self.statics = statics;
        self.serial = serial;
        self.round = Self::roll_round(
            &mut self.rng,
            &self.catalog,
            &self.config,
            &self.serial,
            &self.statics,
            &self.engine,
        );
        self.start_round();
    }

    fn start_round(&mut self) {
        self.rounds += 1;
        self.interaction.reset_round();

        for key in &self.round.assignment.keys {
            self.sink.set_light(key.slot, false);
            self.sink
                .set_material(key.slot, KeyMaterial::Switch(key.switch.color));
            info!(
                "{} Key {} has a {} switch, and is assigned no. {}.",
                self.id, key.label, key.switch.name, key.rank
            );
            if key.condition != KeyCondition::Normal {
                debug!("{} Key {} condition: {}", self.id, key.label, key.condition);
            }
        }
        self.sink.show_text("");

        info!(
            "{} Starting order ({}): {:?}",
            self.id, self.round.order_rule, self.round.starting_order
        );
        info!(
            "{} Hold order: {:?}",
            self.id, self.round.simulation.hold_order
        );
    }

    pub fn press(&mut self, slot: usize, now: f32, timer: TimerReading) -> PressOutcome {
        let Some(key) = self.round.assignment.keys.get(slot) else {
            warn!("{} Press on unknown slot {}", self.id, slot);
            return PressOutcome::Ignored;
        };
        self.interaction.press(key, now, timer, &mut self.sink)
    }

    pub fn release(&mut self, slot: usize, now: f32, timer: TimerReading) -> ReleaseOutcome {
        let Some(key) = self.round.assignment.keys.get_mut(slot) else {
            warn!("{} Release on unknown slot {}", self.id, slot);
            return ReleaseOutcome::Ignored;
        };
        let outcome = self.interaction.release(
            key,
            &self.round.simulation.hold_order,
            now,
            timer,
            &mut self.rng,
            &mut self.sink,
            self.solved,
        );

        match outcome {
            ReleaseOutcome::Strike(_) => self.strike(),
            ReleaseOutcome::Solved => self.solve(),
            _ => {}
        }
        outcome
    }

    /// Runs scheduled effects due at `now`.
    pub fn advance(&mut self, now: f32) -> usize {
        self.interaction.advance(
            now,
            &mut self.round.assignment.keys,
            &mut self.rng,
            &mut self.sink,
        )
    }

    fn strike(&mut self) {
        self.strikes += 1;
        self.sink.play_sound(SoundCue::Strike);
        info!("{} Strike! Module resetting...", self.id);
        self.reset();
    }

    fn solve(&mut self) {
        self.solved = true;
        self.sink.play_sound(SoundCue::Solve);
        info!("{} Module solved!", self.id);
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    /// Rounds started so far, the first one included.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn round(&self) -> &RoundSetup {
        &self.round
    }

    pub fn hold_order(&self) -> &[u8] {
        self.round.hold_order()
    }

    pub fn assignment(&self) -> &KeyAssignment {
        &self.round.assignment
    }

    /// Rank the next correct hold must use, or `None` once solved.
    pub fn expected_rank(&self) -> Option<u8> {
        if self.solved {
            return None;
        }
        self.hold_order()
            .get(self.interaction.expected_index())
            .copied()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn catalog(&self) -> &SwitchCatalog {
        &self.catalog
    }

    pub fn facts(&self) -> &F {
        &self.facts
    }

    pub fn static_facts(&self) -> &StaticFacts {
        &self.statics
    }

    pub fn serial_bits(&self) -> &SerialBitVector {
        &self.serial
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
