use std::f64::consts::TAU;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use log::info;
use rand::SeedableRng;
use rand::prelude::SmallRng;
use thousands::Separable;

use binsim::entities::{Bin, State};
use binsim::generation::ObjectGenerator;
use binsim::mdp::landscape;
use binsim::mdp::policy::{IdentityPolicy, PolicyKind, RandomPolicy, RowsPolicy};
use binsim::mdp::reward::{AreaCoverageReward, ConstantReward, RewardKind, RowsDistanceReward};
use binsim::mdp::{Simulation, Termination, Transition};

use crate::config::{PolicyType, RewardType, RolloutConfig};
use crate::io;
use crate::io::heatmap_svg::heatmap_to_svg;
use crate::io::output::RolloutOutput;
use crate::io::svg_recorder::SvgRecorder;
use crate::io::svg_util::SvgDrawOptions;

pub const ROLLOUT_SVG: &str = "rollout.svg";
pub const REPORT_JSON: &str = "report.json";

pub fn heatmap_file_name(step: usize, rotation: usize) -> String {
    format!("heatmap_s{step}_r{rotation}.svg")
}

/// Rolls out the configured policy in an empty bin.
/// The placements are drawn to [`ROLLOUT_SVG`] and the heatmaps (if any) are written next to it in `output_folder`.
pub fn run(config: &RolloutConfig, output_folder: &Path) -> Result<RolloutOutput> {
    config.validate()?;
    let start = Instant::now();

    let mut rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let bin = Bin::new(config.bin_length, config.bin_width);
    let generator = ObjectGenerator::new(
        config.object_distribution.clone(),
        config.max_generation_attempts,
    )?;
    let recorder = SvgRecorder::new(
        output_folder.join(ROLLOUT_SVG),
        config.svg_draw_options,
        SmallRng::from_rng(&mut rng),
    );
    let transition =
        Transition::with_visualizer(generator, SmallRng::from_rng(&mut rng), Box::new(recorder));
    let reward = build_reward(config.reward, &bin, SmallRng::from_rng(&mut rng));
    let mut policy = build_policy(config.policy, &bin, SmallRng::from_rng(&mut rng));

    let mut simulation = Simulation::new(transition, Termination::default(), reward);

    let first_object = match &config.first_object {
        Some(shape) => {
            let object = shape.build();
            ensure!(
                object.shape().is_valid(),
                "first object is not a valid polygon: {shape:?}"
            );
            object
        }
        None => simulation
            .transition
            .sample_object()
            .context("could not generate the first object")?,
    };
    let initial_state = simulation.initial_state(config.bin_length, config.bin_width, first_object);

    let heatmap = config.heatmap;
    let draw_options = config.svg_draw_options;
    let rollout = simulation.rollout_with(
        &mut policy,
        initial_state,
        config.max_steps,
        |sim, state, index| match heatmap {
            Some(hm) if index % hm.every_step == 0 => write_heatmaps(
                sim,
                state,
                index,
                hm.n_rotations,
                draw_options,
                output_folder,
            ),
            _ => Ok(()),
        },
    )?;
    simulation.transition.visualizer_mut().display();

    let output = RolloutOutput {
        config: config.clone(),
        total_reward: rollout.total_reward(),
        n_placed: rollout.final_state.n_placed(),
        final_coverage: rollout.final_state.coverage(),
        violation: rollout.violation,
        steps: rollout.steps,
        elapsed_secs: start.elapsed().as_secs_f64(),
    };

    info!(
        "[RUN] {} objects placed in {} steps, coverage: {:.1}%, total reward: {:.3}, ended by: {}",
        output.n_placed.separate_with_commas(),
        output.steps.len().separate_with_commas(),
        output.final_coverage * 100.0,
        output.total_reward,
        match &output.violation {
            Some(v) => format!("{v:?}"),
            None => "step limit".to_string(),
        }
    );

    Ok(output)
}

pub fn build_policy(policy_type: PolicyType, bin: &Bin, rng: SmallRng) -> PolicyKind {
    match policy_type {
        PolicyType::Identity => PolicyKind::Identity(IdentityPolicy),
        PolicyType::Random => PolicyKind::Random(RandomPolicy::new(rng)),
        PolicyType::Rows => PolicyKind::Rows(RowsPolicy::new(bin, rng)),
    }
}

pub fn build_reward(reward_type: RewardType, bin: &Bin, rng: SmallRng) -> RewardKind {
    match reward_type {
        RewardType::Constant => RewardKind::Constant(ConstantReward),
        RewardType::AreaCoverage => RewardKind::AreaCoverage(AreaCoverageReward),
        RewardType::RowsDistance => RewardKind::RowsDistance(RowsDistanceReward::new(bin, rng)),
    }
}

fn write_heatmaps(
    simulation: &mut Simulation,
    state: &State,
    step: usize,
    n_rotations: usize,
    options: SvgDrawOptions,
    output_folder: &Path,
) -> Result<()> {
    let landscapes = landscape::scan(
        state,
        &simulation.transition,
        &mut simulation.reward,
        n_rotations,
    )?;
    for (i, rewards) in landscapes.iter().enumerate() {
        let rotation = i as f64 * TAU / n_rotations as f64;
        let document = heatmap_to_svg(rewards, state, rotation, options);
        io::write_svg(&document, &output_folder.join(heatmap_file_name(step, i)))?;
    }
    info!(
        "[RUN] {} heatmaps written for step {step}",
        landscapes.len()
    );
    Ok(())
}
