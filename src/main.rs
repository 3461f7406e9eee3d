//! WodTwin - Workout Digital Twin
//!
//! Runs the benchmark workouts for a sample athlete under a few pacing
//! styles and logs the predicted outcomes.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wodtwin::athlete::{AthleteCapabilities, CpProfile, GymSkill};
use wodtwin::fatigue::Modality;
use wodtwin::{config, Benchmark, PacingStyle, WorkoutSimulator};

fn sample_athlete() -> AthleteCapabilities {
    AthleteCapabilities::new("Sample Athlete", 80.0)
        .with_height(178.0)
        .with_one_rm("back-squat", 140.0)
        .with_one_rm("front-squat", 115.0)
        .with_one_rm("deadlift", 180.0)
        .with_one_rm("clean", 100.0)
        .with_one_rm("clean-and-jerk", 95.0)
        .with_one_rm("kettlebell-swing", 48.0)
        .with_one_rm("wall-ball", 20.0)
        .with_gym_skill("pull-up", GymSkill::new(1.6, 25))
        .with_gym_skill("push-up", GymSkill::new(1.4, 35))
        .with_gym_skill("air-squat", GymSkill::new(1.1, 60))
        .with_cardio_profile(Modality::Run, CpProfile::new(3.9, 220.0))
        .with_cardio_profile(Modality::Row, CpProfile::new(250.0, 18000.0))
}

fn main() -> anyhow::Result<()> {
    let app_config = config::load_config().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WodTwin v{}", env!("CARGO_PKG_VERSION"));

    let athlete = sample_athlete();
    for (field, message) in athlete.validate() {
        tracing::warn!(field = %field, "{}", message);
    }

    let simulator = WorkoutSimulator::new(app_config.simulator);
    let styles = [
        PacingStyle::Unbroken,
        PacingStyle::Descending,
        PacingStyle::Rpe(7),
    ];

    for benchmark in [Benchmark::Fran, Benchmark::Helen, Benchmark::Cindy] {
        let workout = benchmark
            .workout()
            .with_context(|| format!("Failed to build {}", benchmark))?;
        for style in styles {
            let mut strategy = style.build();
            let result = simulator
                .simulate(&workout, &athlete, strategy.as_mut())
                .with_context(|| format!("Failed to simulate {} ({})", benchmark, style))?;
            tracing::info!(
                workout = %result.workout,
                strategy = %result.strategy,
                outcome = %result.final_state,
                total_time = result.total_time,
                rounds = result.rounds_completed,
                reps = result.total_reps,
                final_fatigue = result.final_fatigue,
                "Prediction"
            );
            println!("{}", result);
        }
    }

    Ok(())
}
