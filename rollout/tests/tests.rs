#[cfg(test)]
mod tests {
    use std::fs;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;
    use std::sync::Arc;

    use float_cmp::approx_eq;
    use ndarray::Array2;
    use rand::SeedableRng;
    use rand::prelude::SmallRng;
    use test_case::test_case;

    use binsim::entities::{Bin, PlacementObject, State};
    use binsim::generation::{ObjectDistribution, ShapeSpec};
    use binsim::geometry::Transformation;
    use binsim::viz::Visualizer;

    use rollout::config::{HeatmapConfig, PolicyType, RewardType, RolloutConfig};
    use rollout::io;
    use rollout::io::heatmap_svg::heatmap_to_svg;
    use rollout::io::output::RolloutOutput;
    use rollout::io::svg_recorder::SvgRecorder;
    use rollout::io::svg_util::SvgDrawOptions;
    use rollout::runner;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn scratch_folder(name: &str) -> PathBuf {
        let folder = std::env::temp_dir().join(format!("rollout_{name}_{}", std::process::id()));
        fs::create_dir_all(&folder).unwrap();
        folder
    }

    #[test]
    fn default_config_survives_json() {
        let config = RolloutConfig::default();
        config.validate().unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: RolloutConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn config_omits_optional_sections() {
        let json = r#"{
            "bin_length": 30.0,
            "bin_width": 10.0,
            "prng_seed": null,
            "policy": "random",
            "reward": "area_coverage",
            "object_distribution": {"kind": "fixed", "params": {"shape": {"shape": "rectangle", "params": {"length": 3.0, "width": 1.0}}}},
            "max_generation_attempts": 50,
            "max_steps": 10
        }"#;
        let config: RolloutConfig = serde_json::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.policy, PolicyType::Random);
        assert_eq!(config.reward, RewardType::AreaCoverage);
        assert_eq!(config.prng_seed, None);
        assert_eq!(config.first_object, None);
        assert_eq!(config.heatmap, None);
        assert_eq!(config.svg_draw_options, SvgDrawOptions::default());
        assert_eq!(
            config.object_distribution,
            ObjectDistribution::Fixed {
                shape: ShapeSpec::Rectangle {
                    length: 3.0,
                    width: 1.0
                }
            }
        );
    }

    #[test_case(|c| c.bin_length = 0.0; "flat bin")]
    #[test_case(|c| c.max_generation_attempts = 0; "no generation attempts")]
    #[test_case(|c| c.heatmap = Some(HeatmapConfig { n_rotations: 0, every_step: 1 }); "heatmap without rotations")]
    #[test_case(|c| c.heatmap = Some(HeatmapConfig { n_rotations: 4, every_step: 0 }); "heatmap without interval")]
    #[test_case(|c| c.object_distribution = ObjectDistribution::Square { min_side: 5, max_side: 5 }; "empty side range")]
    fn invalid_configs_are_rejected(tweak: fn(&mut RolloutConfig)) {
        let mut config = RolloutConfig::default();
        tweak(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn recorder_draws_bin_and_objects() {
        let mut recorder = SvgRecorder::new(
            std::env::temp_dir().join("unused.svg"),
            SvgDrawOptions::default(),
            SmallRng::seed_from_u64(0),
        );
        assert!(recorder.document().is_none());

        recorder.create_environment();
        recorder.add_bin(20.0, 10.0);
        recorder.add_object(&PlacementObject::square(2.0));
        recorder.add_object(
            &PlacementObject::rectangle(3.0, 1.0)
                .transform_clone(&Transformation::from_translation((4.0, 2.0))),
        );
        assert_eq!(recorder.n_objects(), 2);

        let drawing = recorder.document().unwrap().to_string();
        assert!(drawing.contains("viewBox"));
        assert!(drawing.contains("id=\"bin\""));
        assert!(drawing.contains("object_0"));
        assert!(drawing.contains("object_1"));

        recorder.create_environment();
        assert_eq!(recorder.n_objects(), 0);
        assert!(recorder.document().is_none());
    }

    #[test]
    fn recorder_writes_on_display() {
        let folder = scratch_folder("recorder");
        let path = folder.join("bin.svg");

        let mut recorder =
            SvgRecorder::new(&path, SvgDrawOptions::default(), SmallRng::seed_from_u64(1));
        recorder.add_bin(10.0, 10.0);
        recorder.add_object(&PlacementObject::square(1.0));
        recorder.display();

        assert!(path.exists());
        let _ = fs::remove_dir_all(&folder);
    }

    #[test]
    fn heatmap_has_a_cell_per_grid_point() {
        let bin = Arc::new(Bin::new(6.0, 4.0));
        let placed = Arc::new(PlacementObject::square(1.0));
        let state = State::new(bin, vec![placed], PlacementObject::square(1.0));

        let mut rewards = Array2::zeros((4, 6));
        rewards[[0, 0]] = 1.0;
        let drawing = heatmap_to_svg(&rewards, &state, 0.0, SvgDrawOptions::default()).to_string();

        assert_eq!(drawing.matches("<rect").count(), 24);
        assert!(drawing.contains("(-3, -2): 1.0000"));
        assert!(drawing.contains("overlay"));
    }

    #[test]
    fn rollout_writes_report_drawing_and_heatmaps() {
        init_logger();
        let folder = scratch_folder("e2e");

        let config = RolloutConfig {
            policy: PolicyType::Rows,
            reward: RewardType::Constant,
            object_distribution: ObjectDistribution::Fixed {
                shape: ShapeSpec::Square { side: 4.0 },
            },
            max_steps: 100,
            heatmap: Some(HeatmapConfig {
                n_rotations: 2,
                every_step: 5,
            }),
            ..RolloutConfig::default()
        };

        let output = runner::run(&config, &folder).unwrap();

        //16 squares fit in rows, the 17th can not be placed anywhere
        assert_eq!(output.steps.len(), 17);
        assert_eq!(output.n_placed, 17);
        assert!(output.violation.is_some());
        assert!(approx_eq!(f64, output.total_reward, 17.0));

        assert!(folder.join(runner::ROLLOUT_SVG).exists());
        for step in [0, 5, 10, 15] {
            for rotation in 0..2 {
                assert!(folder.join(runner::heatmap_file_name(step, rotation)).exists());
            }
        }
        assert!(!folder.join(runner::heatmap_file_name(1, 0)).exists());

        let report_path = folder.join(runner::REPORT_JSON);
        io::write_json(&output, &report_path).unwrap();
        let report: RolloutOutput =
            serde_json::from_reader(BufReader::new(File::open(&report_path).unwrap())).unwrap();
        assert_eq!(report.steps.len(), output.steps.len());
        assert_eq!(report.config, config);
        for (r, o) in report.steps.iter().zip(output.steps.iter()) {
            assert_eq!(r.index, o.index);
            assert!(approx_eq!(f64, r.coverage, o.coverage, epsilon = 1e-12));
        }

        let _ = fs::remove_dir_all(&folder);
    }

    #[test]
    fn seeded_rollouts_are_reproducible() {
        let config = RolloutConfig {
            policy: PolicyType::Random,
            reward: RewardType::AreaCoverage,
            max_steps: 20,
            ..RolloutConfig::default()
        };
        let folder_a = scratch_folder("seed_a");
        let folder_b = scratch_folder("seed_b");

        let a = runner::run(&config, &folder_a).unwrap();
        let b = runner::run(&config, &folder_b).unwrap();
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.violation, b.violation);

        let _ = fs::remove_dir_all(&folder_a);
        let _ = fs::remove_dir_all(&folder_b);
    }
}
