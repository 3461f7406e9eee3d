//! Workout simulation engine.
//!
//! One call to [`WorkoutSimulator::simulate`] is one deterministic pass:
//! a fresh fatigue manager and clock are built, every rep boundary is put to
//! the pacing strategy, and the run ends either with all work done or at the
//! time cap.

use std::collections::BTreeSet;

use crate::athlete::{CapabilityProvider, CpProfile};
use crate::config::SimulatorConfig;
use crate::fatigue::{FatigueManager, Modality};
use crate::strategy::{PacingStrategy, RepBoundary};
use crate::workouts::{Exercise, ExerciseTarget, Round, Workout, WorkoutDefinition, WorkoutMode};

use super::types::{
    EventKind, RoundResult, SimulationError, SimulationEvent, SimulationResult, SimulatorState,
};

/// Concept2 pace model constant: watts = 2.8 * (m/s)^3.
const ERG_POWER_CONSTANT: f64 = 2.8;
/// Calorie rate used when no cardio profile is known (cal/s).
const DEFAULT_CALORIE_RATE: f64 = 0.5;
/// Speed for distance work on movements that are not cardio (m/s).
const DEFAULT_TRAVEL_SPEED: f64 = 1.0;
/// Fatigue slowdown applied to pieces without a cardio profile.
const WORK_FATIGUE_SLOWDOWN: f64 = 0.3;
/// Seconds of cardio work counted as one rep of local fatigue.
const CARDIO_SECONDS_PER_REP: f64 = 10.0;
/// Seconds of timed non-cardio work counted as one rep of local fatigue.
const HOLD_SECONDS_PER_REP: f64 = 3.0;

/// Default speed per modality when the athlete has no profile (m/s).
fn default_speed(modality: Option<Modality>) -> f64 {
    match modality {
        Some(Modality::Run) => 3.3,
        Some(Modality::Row) => 4.0,
        Some(Modality::Bike) => 7.0,
        Some(Modality::Swim) => 1.0,
        Some(Modality::Ski) => 3.8,
        None => DEFAULT_TRAVEL_SPEED,
    }
}

/// Speed on an erg holding `watts`.
fn erg_speed(watts: f64) -> f64 {
    (watts.max(0.0) / ERG_POWER_CONSTANT).cbrt()
}

/// Executes workouts against an athlete and a pacing strategy.
#[derive(Debug, Clone, Default)]
pub struct WorkoutSimulator {
    config: SimulatorConfig,
}

impl WorkoutSimulator {
    /// Create a simulator with the given knobs.
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Knobs in use.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run one simulation.
    ///
    /// Fails before producing any trace when the configuration is invalid or
    /// the workout mode has no execution semantics. Reaching the time cap is
    /// a normal outcome, reported through [`SimulationResult::final_state`].
    pub fn simulate(
        &self,
        workout: &Workout,
        athlete: &dyn CapabilityProvider,
        strategy: &mut dyn PacingStrategy,
    ) -> Result<SimulationResult, SimulationError> {
        self.config.validate()?;

        let capped = match workout.mode() {
            WorkoutMode::ForTime => false,
            WorkoutMode::Amrap => true,
            mode @ (WorkoutMode::Emom | WorkoutMode::Tabata) => {
                tracing::warn!(workout = workout.name(), %mode, "Unsupported workout mode");
                return Err(SimulationError::UnsupportedMode(mode));
            }
        };

        tracing::info!(
            workout = workout.name(),
            workout_id = %workout.id(),
            mode = %workout.mode(),
            athlete = athlete.name(),
            strategy = strategy.name(),
            "Simulation started"
        );

        let mut run = Run::new(&self.config, workout, athlete, strategy);
        if capped {
            run.run_amrap();
        } else {
            run.run_for_time();
        }
        let result = run.finish();

        tracing::info!(
            workout = %result.workout,
            outcome = %result.final_state,
            total_time = result.total_time,
            rounds = result.rounds_completed,
            reps = result.total_reps,
            "Simulation finished"
        );
        Ok(result)
    }

    /// Validate a raw workout definition, then run it.
    pub fn simulate_definition(
        &self,
        definition: WorkoutDefinition,
        athlete: &dyn CapabilityProvider,
        strategy: &mut dyn PacingStrategy,
    ) -> Result<SimulationResult, SimulationError> {
        let workout = Workout::try_from(definition)?;
        self.simulate(&workout, athlete, strategy)
    }
}

/// Run one simulation with the default configuration.
pub fn simulate(
    workout: &Workout,
    athlete: &dyn CapabilityProvider,
    strategy: &mut dyn PacingStrategy,
) -> Result<SimulationResult, SimulationError> {
    WorkoutSimulator::default().simulate(workout, athlete, strategy)
}

/// Whether a step fit under the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Capped,
}

/// Time and cardio demand of a non-rep piece.
#[derive(Debug, Clone, Copy)]
struct WorkPlan {
    duration: f64,
    output: Option<f64>,
    /// (modality, demanded output, critical output)
    demand: Option<(Modality, f64, f64)>,
}

/// Mutable state of one pass.
struct Run<'a, 's> {
    config: &'a SimulatorConfig,
    workout: &'a Workout,
    athlete: &'a dyn CapabilityProvider,
    strategy: &'s mut dyn PacingStrategy,
    fatigue: FatigueManager,
    cap: Option<f64>,
    clock: f64,
    state: SimulatorState,
    round: u32,
    total_reps: u32,
    rounds_completed: u32,
    events: Vec<SimulationEvent>,
    rounds: Vec<RoundResult>,
    /// Fatigue after each unit of work in the current round
    samples: Vec<f64>,
}

impl<'a, 's> Run<'a, 's> {
    fn new(
        config: &'a SimulatorConfig,
        workout: &'a Workout,
        athlete: &'a dyn CapabilityProvider,
        strategy: &'s mut dyn PacingStrategy,
    ) -> Self {
        let mut fatigue = FatigueManager::new(config.fatigue.clone(), config.patterns.clone());

        let modalities: BTreeSet<Modality> = workout
            .all_exercises()
            .into_iter()
            .filter_map(|e| Modality::from_movement(&e.name))
            .collect();
        for modality in modalities {
            match athlete.cardio_profile(modality) {
                Some(profile) => {
                    let base_tau = config.fatigue.cardio_tau.for_modality(modality);
                    let tau = athlete.recovery_time_constant(modality, base_tau);
                    fatigue.initialize_cardio(modality, profile.w_prime, tau);
                }
                None => {
                    tracing::debug!(%modality, "No cardio profile, demand treated as sustainable")
                }
            }
        }

        Self {
            config,
            workout,
            athlete,
            strategy,
            fatigue,
            cap: workout.time_cap_seconds(),
            clock: 0.0,
            state: SimulatorState::NotStarted,
            round: 0,
            total_reps: 0,
            rounds_completed: 0,
            events: Vec::new(),
            rounds: Vec::new(),
            samples: Vec::new(),
        }
    }

    fn run_for_time(&mut self) {
        let workout = self.workout;
        let total_rounds = workout.total_round_count();
        let mut executed = 0;

        for round in workout.rounds() {
            for _ in 0..round.repetitions {
                if self.run_round(round) == Flow::Capped {
                    self.cap_reached();
                    return;
                }
                executed += 1;
                if executed < total_rounds && self.rest_between_rounds() == Flow::Capped {
                    self.cap_reached();
                    return;
                }
            }
        }

        self.transition(SimulatorState::Completed);
        self.emit(EventKind::WorkoutCompleted, self.fatigue.overall_fatigue());
    }

    fn run_amrap(&mut self) {
        let workout = self.workout;
        'cap: loop {
            for round in workout.rounds() {
                for _ in 0..round.repetitions {
                    if self.run_round(round) == Flow::Capped {
                        break 'cap;
                    }
                    if self.rest_between_rounds() == Flow::Capped {
                        break 'cap;
                    }
                }
            }
        }
        self.cap_reached();
    }

    fn run_round(&mut self, round: &Round) -> Flow {
        self.round += 1;
        self.transition(SimulatorState::RunningRound);
        self.samples.clear();

        let start = self.clock;
        let reps_before = self.total_reps;
        let mut exercises_completed = 0;

        for exercise in &round.exercises {
            if self.run_exercise(exercise) == Flow::Capped {
                self.record_round(start, reps_before, exercises_completed, false);
                return Flow::Capped;
            }
            exercises_completed += 1;
        }

        self.record_round(start, reps_before, exercises_completed, true);
        Flow::Continue
    }

    fn run_exercise(&mut self, exercise: &Exercise) -> Flow {
        self.transition(SimulatorState::RunningExercise);
        let fatigue = self.fatigue.movement_fatigue(&exercise.name);
        self.emit(
            EventKind::ExerciseStart {
                exercise: exercise.name.clone(),
                target: exercise.target,
            },
            fatigue,
        );

        match exercise.target {
            ExerciseTarget::Reps(target) => self.run_reps(exercise, target),
            _ => self.run_work(exercise),
        }
    }

    /// Rep loop: strategy decision, optional rest, then one rep.
    fn run_reps(&mut self, exercise: &Exercise, target: u32) -> Flow {
        let name = exercise.name.as_str();
        let intensity = self.athlete.load_intensity(name, exercise.load_kg);
        let mut reps_done = 0;
        // Position within the current unbroken set
        let mut set_rep = 0;

        while reps_done < target {
            let boundary = RepBoundary {
                exercise: name,
                reps_done,
                target_reps: target,
                fatigue: self.fatigue.movement_fatigue(name),
                elapsed: self.clock,
            };
            if self.strategy.should_rest(&boundary) {
                let duration = self.strategy.rest_duration(&boundary);
                if self.rest(Some(name), duration) == Flow::Capped {
                    return Flow::Capped;
                }
                if duration.is_finite() && duration > 0.0 {
                    set_rep = 0;
                }
                self.transition(SimulatorState::RunningExercise);
            }

            let fatigue = self.fatigue.movement_fatigue(name);
            let rep_time = self.rep_time(exercise, fatigue);
            if self.overshoots(rep_time) {
                tracing::debug!(exercise = name, reps_done, "Next rep would pass the time cap");
                return Flow::Capped;
            }

            set_rep += 1;
            self.fatigue.add_local_rep(name, intensity, set_rep);
            self.clock += rep_time;
            reps_done += 1;
            self.total_reps += 1;

            let fatigue = self.fatigue.movement_fatigue(name);
            self.samples.push(fatigue);
            tracing::trace!(exercise = name, rep = reps_done, rep_time, fatigue, "Rep");
            self.emit(
                EventKind::RepCompleted {
                    exercise: name.to_string(),
                    rep: reps_done,
                },
                fatigue,
            );
        }
        Flow::Continue
    }

    /// Distance, calorie and duration pieces run as one step.
    fn run_work(&mut self, exercise: &Exercise) -> Flow {
        let name = exercise.name.as_str();
        let modality = Modality::from_movement(name);
        let fatigue = self.fatigue.movement_fatigue(name);

        let profiled = modality.and_then(|m| self.athlete.cardio_profile(m).map(|p| (m, p)));
        let plan = profiled
            .and_then(|(m, p)| self.cardio_plan(m, p, exercise.target))
            .unwrap_or_else(|| self.fallback_plan(modality, exercise.target, fatigue));
        let duration = plan.duration.max(self.config.min_rep_seconds);

        if self.overshoots(duration) {
            tracing::debug!(exercise = name, duration, "Work piece would pass the time cap");
            return Flow::Capped;
        }

        if let Some((m, demanded, critical)) = plan.demand {
            self.fatigue.add_cardio_work(m, demanded, critical, duration);
        }
        let per_rep = if modality.is_some() {
            CARDIO_SECONDS_PER_REP
        } else {
            HOLD_SECONDS_PER_REP
        };
        let reps_equivalent = ((duration / per_rep).round() as u32).max(1);
        self.fatigue.add_local_work(name, 0.0, reps_equivalent);
        self.clock += duration;

        let fatigue = self.fatigue.movement_fatigue(name);
        self.samples.push(fatigue);
        tracing::trace!(exercise = name, duration, output = ?plan.output, "Work piece");
        self.emit(
            EventKind::WorkCompleted {
                exercise: name.to_string(),
                duration,
                output: plan.output,
            },
            fatigue,
        );
        Flow::Continue
    }

    /// Solve the critical-power model for a piece, committing a fraction of
    /// the current W' balance. None when the target has no cardio solution.
    fn cardio_plan(
        &self,
        modality: Modality,
        profile: CpProfile,
        target: ExerciseTarget,
    ) -> Option<WorkPlan> {
        let critical = profile.critical / self.config.pace_multiplier;
        if !(critical.is_finite() && critical > 0.0) {
            return None;
        }
        let balance = self
            .fatigue
            .cardio_balance(modality)
            .unwrap_or(profile.w_prime);
        let spend = self.config.cardio_reserve_spend * balance.max(0.0);
        let overdrive = self.config.max_cardio_overdrive;

        let (duration, output) = match target {
            ExerciseTarget::Duration(seconds) => {
                let output = (critical + spend / seconds).min(overdrive * critical);
                (seconds, output)
            }
            ExerciseTarget::Distance(meters) if modality.is_speed_based() => {
                let duration = ((meters - spend) / critical).max(meters / (critical * overdrive));
                (duration, meters / duration)
            }
            ExerciseTarget::Distance(meters) => {
                let at_critical = meters / erg_speed(critical);
                let output = (critical + spend / at_critical).min(overdrive * critical);
                (meters / erg_speed(output), output)
            }
            ExerciseTarget::Calories(calories) if !modality.is_speed_based() => {
                let work = 3600.0 * calories as f64;
                let duration = ((work - 4.0 * spend) / (4.0 * critical + 300.0))
                    .max(work / (4.0 * overdrive * critical + 300.0));
                (duration, 900.0 * calories as f64 / duration - 75.0)
            }
            _ => return None,
        };
        if !(duration.is_finite() && duration > 0.0 && output.is_finite()) {
            return None;
        }

        if self
            .fatigue
            .cardio_sustainable(modality, output, critical, duration)
        {
            return Some(WorkPlan {
                duration,
                output: Some(output),
                demand: Some((modality, output, critical)),
            });
        }

        tracing::debug!(%modality, output, duration, "Demand not sustainable, holding critical output");
        let duration = match target {
            ExerciseTarget::Duration(seconds) => seconds,
            ExerciseTarget::Distance(meters) if modality.is_speed_based() => meters / critical,
            ExerciseTarget::Distance(meters) => meters / erg_speed(critical),
            ExerciseTarget::Calories(calories) => {
                3600.0 * calories as f64 / (4.0 * critical + 300.0)
            }
            ExerciseTarget::Reps(_) => return None,
        };
        Some(WorkPlan {
            duration,
            output: Some(critical),
            demand: Some((modality, critical, critical)),
        })
    }

    /// Default speeds and rates for pieces without a cardio profile.
    fn fallback_plan(
        &self,
        modality: Option<Modality>,
        target: ExerciseTarget,
        fatigue: f64,
    ) -> WorkPlan {
        let slowdown = self.config.pace_multiplier * (1.0 + fatigue.max(0.0) * WORK_FATIGUE_SLOWDOWN);
        let duration = match target {
            ExerciseTarget::Duration(seconds) => seconds,
            ExerciseTarget::Distance(meters) => meters / default_speed(modality) * slowdown,
            ExerciseTarget::Calories(calories) => calories as f64 / DEFAULT_CALORIE_RATE * slowdown,
            ExerciseTarget::Reps(reps) => reps as f64 * self.config.min_rep_seconds,
        };
        WorkPlan {
            duration,
            output: None,
            demand: None,
        }
    }

    fn rep_time(&self, exercise: &Exercise, fatigue: f64) -> f64 {
        let base = self
            .athlete
            .rep_duration(&exercise.name, exercise.load_kg, fatigue)
            * self.config.pace_multiplier;
        if base.is_finite() {
            base.max(self.config.min_rep_seconds)
        } else {
            tracing::debug!(exercise = %exercise.name, "Non-finite rep time, using fallback pace");
            crate::athlete::provider::FALLBACK_PACE_SECS * self.config.pace_multiplier
        }
    }

    /// Rest inside an exercise (`Some`) or between rounds (`None`).
    ///
    /// A rest that would pass the cap is not taken at all and ends the
    /// exercise at the current clock.
    fn rest(&mut self, exercise: Option<&str>, duration: f64) -> Flow {
        if !(duration.is_finite() && duration > 0.0) {
            return Flow::Continue;
        }
        if self.overshoots(duration) {
            tracing::debug!(?exercise, duration, clock = self.clock, "Rest would pass the time cap");
            return Flow::Capped;
        }

        self.transition(SimulatorState::Resting);
        let fatigue = self.current_fatigue(exercise);
        self.emit(
            EventKind::RestStart {
                exercise: exercise.map(str::to_string),
                duration,
            },
            fatigue,
        );

        self.fatigue.recover_all(duration, self.config.recovery_quality);
        self.clock += duration;

        let fatigue = self.current_fatigue(exercise);
        self.emit(
            EventKind::RestEnd {
                exercise: exercise.map(str::to_string),
            },
            fatigue,
        );
        Flow::Continue
    }

    fn rest_between_rounds(&mut self) -> Flow {
        self.rest(None, self.workout.rest_between_rounds())
    }

    fn record_round(&mut self, start: f64, reps_before: u32, exercises: usize, completed: bool) {
        let reps = self.total_reps - reps_before;
        if !completed && reps == 0 && self.clock <= start {
            return;
        }

        let overall = self.fatigue.overall_fatigue();
        let (avg_fatigue, max_fatigue) = if self.samples.is_empty() {
            (overall, overall)
        } else {
            let sum: f64 = self.samples.iter().sum();
            let max = self.samples.iter().copied().fold(0.0, f64::max);
            (sum / self.samples.len() as f64, max)
        };

        let duration = self.clock - start;
        self.rounds.push(RoundResult {
            round_number: self.round,
            start_time: start,
            end_time: self.clock,
            duration,
            exercises_completed: exercises,
            reps_completed: reps,
            avg_fatigue,
            max_fatigue,
            completed,
        });

        if completed {
            self.rounds_completed += 1;
            tracing::debug!(round = self.round, duration, reps, "Round completed");
            self.emit(EventKind::RoundCompleted { duration, reps }, overall);
        } else {
            tracing::debug!(round = self.round, duration, reps, "Partial round recorded");
        }
    }

    fn cap_reached(&mut self) {
        let cap = self.cap.unwrap_or(self.clock);
        tracing::debug!(cap, clock = self.clock, "Time cap reached");
        self.transition(SimulatorState::TimeCapped);
        self.emit(EventKind::TimeCapReached { cap }, self.fatigue.overall_fatigue());
    }

    fn overshoots(&self, duration: f64) -> bool {
        self.cap.is_some_and(|cap| self.clock + duration > cap)
    }

    fn current_fatigue(&self, exercise: Option<&str>) -> f64 {
        match exercise {
            Some(name) => self.fatigue.movement_fatigue(name),
            None => self.fatigue.overall_fatigue(),
        }
    }

    fn transition(&mut self, next: SimulatorState) {
        if self.state != next {
            tracing::trace!(from = %self.state, to = %next, clock = self.clock, "State transition");
            self.state = next;
        }
    }

    fn emit(&mut self, kind: EventKind, fatigue: f64) {
        self.events.push(SimulationEvent {
            timestamp: self.clock,
            round: self.round,
            fatigue,
            kind,
        });
    }

    fn finish(self) -> SimulationResult {
        SimulationResult {
            athlete: self.athlete.name().to_string(),
            workout: self.workout.name().to_string(),
            strategy: self.strategy.name().to_string(),
            mode: self.workout.mode(),
            total_time: self.clock,
            completed: self.state == SimulatorState::Completed,
            final_state: self.state,
            rounds_completed: self.rounds_completed,
            total_reps: self.total_reps,
            final_fatigue: self.fatigue.overall_fatigue(),
            fatigue: self.fatigue.snapshot(),
            rounds: self.rounds,
            events: self.events,
        }
    }
}
