#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;
    use std::sync::Arc;

    use float_cmp::approx_eq;
    use rand::SeedableRng;
    use rand::prelude::SmallRng;
    use test_case::test_case;

    use binsim::SimError;
    use binsim::entities::{Action, Bin, PlacementObject, State};
    use binsim::generation::{ObjectDistribution, ObjectGenerator, ShapeSpec};
    use binsim::geometry::Transformation;
    use binsim::geometry::boolean::intersection_area;
    use binsim::geometry::primitives::Point;
    use binsim::mdp::landscape;
    use binsim::mdp::policy::{Policy, RowPackingCursor, RowsPolicy};
    use binsim::mdp::reward::{
        AreaCoverageReward, ConstantReward, Reward, RewardKind, RowsDistanceReward,
    };
    use binsim::mdp::{Simulation, Termination, Transition, Violation};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn placed_at(object: PlacementObject, x: f64, y: f64) -> Arc<PlacementObject> {
        Arc::new(object.transform_clone(&Transformation::from_translation((x, y))))
    }

    fn fixed_transition(shape: ShapeSpec, seed: u64) -> Transition {
        let generator = ObjectGenerator::new(ObjectDistribution::Fixed { shape }, 100).unwrap();
        Transition::new(generator, SmallRng::seed_from_u64(seed))
    }

    fn random_transition(seed: u64) -> Transition {
        let generator = ObjectGenerator::new(ObjectDistribution::default(), 10_000).unwrap();
        Transition::new(generator, SmallRng::seed_from_u64(seed))
    }

    #[test_case(Transformation::from_rotation(0.7), Transformation::from_translation((3.0, -2.0)); "rotate then translate")]
    #[test_case(Transformation::from_translation((3.0, -2.0)), Transformation::from_rotation(0.7); "translate then rotate")]
    #[test_case(Transformation::from_rotation_translation(FRAC_PI_2, (1.0, 1.0)), Transformation::from_rotation_translation(-2.1, (-4.0, 0.5)); "two rigid motions")]
    fn transforms_compose(t1: Transformation, t2: Transformation) {
        let triangle = vec![Point(0.0, 0.0), Point(3.0, 1.0), Point(1.0, 2.0)];

        let mut stepwise = PlacementObject::polygon(triangle.clone());
        stepwise.apply_transform(&t1).apply_transform(&t2);

        let composed = PlacementObject::polygon(triangle)
            .transform_clone(&t1.clone().transform(&t2));

        assert!(stepwise.transform().almost_eq(composed.transform(), 1e-12));
        for (a, b) in stepwise
            .shape()
            .vertices
            .iter()
            .zip(composed.shape().vertices.iter())
        {
            assert!(a.distance(b) < 1e-9);
        }
        //base points are never touched
        assert_eq!(stepwise.base().vertices, composed.base().vertices);
    }

    #[test]
    fn protruding_object_is_terminal() {
        let bin = Arc::new(Bin::new(10.0, 10.0));
        let termination = Termination::default();

        let inside = State::new(
            bin.clone(),
            vec![placed_at(PlacementObject::square(4.0), 0.0, 0.0)],
            PlacementObject::square(1.0),
        );
        assert!(!termination.done(&inside));

        let protruding = State::new(
            bin,
            vec![placed_at(PlacementObject::square(4.0), 4.0, 0.0)],
            PlacementObject::square(1.0),
        );
        assert!(termination.done(&protruding));
        match termination.check(&protruding) {
            Some(Violation::OutOfBin {
                index,
                contained,
                area,
            }) => {
                assert_eq!(index, 0);
                assert!(approx_eq!(f64, contained, 12.0, epsilon = 1e-9));
                assert!(approx_eq!(f64, area, 16.0, epsilon = 1e-9));
            }
            other => panic!("expected the object to stick out of the bin, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_objects_are_terminal() {
        let a = placed_at(PlacementObject::square(1.0), 0.0, 0.0);
        let b = placed_at(PlacementObject::square(1.0), 0.0, 0.0);
        assert!(approx_eq!(f64, intersection_area(a.shape(), b.shape()), 1.0, epsilon = 1e-9));

        let state = State::new(
            Arc::new(Bin::new(10.0, 10.0)),
            vec![a, b],
            PlacementObject::square(1.0),
        );
        let termination = Termination::default();
        assert!(termination.done(&state));
        assert!(matches!(
            termination.check(&state),
            Some(Violation::Overlap { a: 0, b: 1, .. })
        ));
    }

    #[test]
    fn touching_objects_are_not_terminal() {
        let state = State::new(
            Arc::new(Bin::new(10.0, 10.0)),
            vec![
                placed_at(PlacementObject::square(2.0), -1.0, 0.0),
                placed_at(PlacementObject::square(2.0), 1.0, 0.0),
            ],
            PlacementObject::square(1.0),
        );
        assert!(!Termination::default().done(&state));
    }

    #[test_case(PlacementObject::rectangle(10.0, 4.0); "long rectangle")]
    #[test_case(PlacementObject::rectangle(4.0, 10.0); "tall rectangle")]
    #[test_case(PlacementObject::square(10.0); "big square")]
    fn full_row_breaks_to_next_row(pending: PlacementObject) {
        init_logger();
        let bin = Arc::new(Bin::new(20.0, 20.0));
        let row = vec![
            placed_at(PlacementObject::square(6.0), -7.0, -7.0),
            placed_at(PlacementObject::square(6.0), -1.0, -7.0),
            placed_at(PlacementObject::square(6.0), 5.0, -7.0),
        ];
        let state = State::new(bin.clone(), row.clone(), pending);

        let (action, cursor) = RowsPolicy::plan(
            &state,
            RowPackingCursor::new(&bin),
            &mut SmallRng::seed_from_u64(0),
        );
        let placed = action.placed_object();
        let bbox = &placed.shape().bbox;

        //starts the next row at the left edge, on top of the full row
        assert!(approx_eq!(f64, bbox.x_min, -9.9, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.y_min, -4.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, cursor.old_y, -4.0, epsilon = 1e-9));

        for o in row.iter() {
            assert!(intersection_area(placed.shape(), o.shape()) < 1e-9);
        }
        let mut next = state.clone();
        next.objects.push(Arc::new(placed));
        assert!(!Termination::default().done(&next));
    }

    #[test]
    fn rows_policy_fills_bin_row_by_row() {
        init_logger();
        let mut sim = Simulation::new(
            fixed_transition(ShapeSpec::Square { side: 4.0 }, 0),
            Termination::default(),
            RewardKind::Constant(ConstantReward),
        );
        let initial = sim.initial_state(20.0, 20.0, PlacementObject::square(4.0));
        let mut policy = RowsPolicy::new(&initial.bin, SmallRng::seed_from_u64(0));

        let rollout = sim.rollout(&mut policy, initial, 100).unwrap();

        //4 rows of 4 squares fit, the 17th object has nowhere to go
        assert_eq!(rollout.steps.len(), 17);
        assert_eq!(rollout.final_state.n_placed(), 17);
        assert!(rollout.violation.is_some());
        assert!(approx_eq!(f64, rollout.steps[15].coverage, 0.64, epsilon = 1e-9));
        assert!(approx_eq!(f64, rollout.total_reward(), 17.0));

        let first_rows = State::new(
            rollout.final_state.bin.clone(),
            rollout.final_state.objects[..16].to_vec(),
            PlacementObject::square(4.0),
        );
        assert!(!sim.done(&first_rows));
    }

    #[test]
    fn rollout_respects_step_limit() {
        let mut sim = Simulation::new(
            fixed_transition(ShapeSpec::Square { side: 1.0 }, 0),
            Termination::default(),
            RewardKind::AreaCoverage(AreaCoverageReward),
        );
        let initial = sim.initial_state(20.0, 20.0, PlacementObject::square(1.0));
        let mut policy = RowsPolicy::new(&initial.bin, SmallRng::seed_from_u64(0));

        let rollout = sim.rollout(&mut policy, initial, 5).unwrap();
        assert_eq!(rollout.steps.len(), 5);
        assert!(rollout.violation.is_none());
        for step in rollout.steps.iter() {
            assert!(approx_eq!(f64, step.reward, 1.0 / 400.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn rows_distance_rewards_canonical_action() {
        let bin = Arc::new(Bin::new(20.0, 20.0));
        let state = State::new(bin.clone(), vec![], PlacementObject::square(4.0));
        let (canonical, _) = RowsPolicy::plan(
            &state,
            RowPackingCursor::new(&bin),
            &mut SmallRng::seed_from_u64(0),
        );
        let transition = fixed_transition(ShapeSpec::Square { side: 4.0 }, 0);
        let mut reward = RowsDistanceReward::new(&bin, SmallRng::seed_from_u64(0));

        let next_state = transition.speculate(&state, &canonical).unwrap();
        assert_eq!(reward.get_reward(&state, &canonical, &next_state), 1.0);

        //2 units to the right: still feasible
        let (tx, ty) = canonical.translation();
        let shifted = Action::new(
            Transformation::from_translation((tx + 2.0, ty)),
            state.next_object.clone(),
        );
        let next_state = transition.speculate(&state, &shifted).unwrap();
        let r = reward.get_reward(&state, &shifted, &next_state);
        assert!(approx_eq!(f64, r, 0.5, epsilon = 1e-9));
    }

    #[test]
    fn rows_distance_rejects_infeasible_actions() {
        let bin = Arc::new(Bin::new(20.0, 20.0));
        let obstacle = placed_at(PlacementObject::square(4.0), 4.0, 0.0);
        let state = State::new(bin.clone(), vec![obstacle], PlacementObject::square(4.0));
        let transition = fixed_transition(ShapeSpec::Square { side: 4.0 }, 0);
        let mut reward = RowsDistanceReward::new(&bin, SmallRng::seed_from_u64(0));

        //canonical placement is flush with the right edge of the bin
        let (tx, ty) = reward.canonical_action(&state).translation();
        assert!(approx_eq!(f64, tx, 8.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, ty, 0.0, epsilon = 1e-9));

        let outside = Action::new(
            Transformation::from_translation((tx + 0.1, ty)),
            state.next_object.clone(),
        );
        let next_state = transition.speculate(&state, &outside).unwrap();
        assert_eq!(reward.get_reward(&state, &outside, &next_state), 0.0);

        let overlapping = Action::new(
            Transformation::from_translation((4.5, 0.0)),
            state.next_object.clone(),
        );
        let next_state = transition.speculate(&state, &overlapping).unwrap();
        assert_eq!(reward.get_reward(&state, &overlapping, &next_state), 0.0);

        assert_eq!(reward.n_cached(), 1);
    }

    #[test]
    fn speculation_is_idempotent_and_side_effect_free() {
        let bin = Arc::new(Bin::new(20.0, 20.0));
        let mut transition = random_transition(7);
        let mut policy = RowsPolicy::new(&bin, SmallRng::seed_from_u64(0));

        let state = State::new(bin, vec![], transition.sample_object().unwrap());
        let key_before = state.key();
        let action = policy.get_action(&state);
        let cursor = policy.cursor();

        let first = transition.speculate(&state, &action).unwrap();
        let second = transition.speculate(&state, &action).unwrap();
        assert_eq!(first.key(), second.key());

        //neither the input state nor the committed policy are affected
        assert_eq!(state.key(), key_before);
        assert_eq!(state.n_placed(), 0);
        assert_eq!(policy.cursor(), cursor);

        //committing afterwards yields the state that was speculated
        let committed = transition.execute(&state, &action).unwrap();
        assert_eq!(committed.key(), first.key());
    }

    #[test]
    fn landscape_scan_leaves_policy_and_transition_untouched() {
        let bin = Arc::new(Bin::new(20.0, 20.0));
        let transition = fixed_transition(ShapeSpec::Square { side: 4.0 }, 0);
        let state = State::new(bin.clone(), vec![], PlacementObject::square(4.0));
        let mut reward = RowsDistanceReward::new(&bin, SmallRng::seed_from_u64(0));

        let maps = landscape::scan(&state, &transition, &mut reward, 4).unwrap();

        assert_eq!(maps.len(), 4);
        for map in maps.iter() {
            assert_eq!(map.dim(), (20, 20));
            //object centered on the bin's left edge sticks out
            assert_eq!(map[[10, 0]], 0.0);
            //object in the middle of the empty bin is feasible
            assert!(map[[10, 10]] > 0.0);
        }
        assert_eq!(reward.n_cached(), 1);

        let mut constant = ConstantReward;
        let maps = landscape::scan(&state, &transition, &mut constant, 1).unwrap();
        assert!(maps[0].iter().all(|&r| r == 1.0));
    }

    #[test]
    fn invalid_objects_exhaust_generation() {
        let bowtie = ShapeSpec::Polygon {
            points: vec![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)],
        };
        let transition = fixed_transition(bowtie, 0);
        let state = State::new(
            Arc::new(Bin::new(20.0, 20.0)),
            vec![],
            PlacementObject::square(2.0),
        );
        let action = Action::new(Transformation::empty(), state.next_object.clone());

        let err = transition.speculate(&state, &action).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SimError>(),
            Some(&SimError::GenerationExhausted { attempts: 100 })
        );
    }

    #[test]
    fn random_rollout_terminates() {
        init_logger();
        let mut sim = Simulation::new(
            random_transition(3),
            Termination::default(),
            RewardKind::AreaCoverage(AreaCoverageReward),
        );
        let first = sim.transition.sample_object().unwrap();
        let initial = sim.initial_state(20.0, 20.0, first);
        let mut policy = binsim::mdp::policy::RandomPolicy::new(SmallRng::seed_from_u64(3));

        let rollout = sim.rollout(&mut policy, initial, 1_000).unwrap();
        assert!(rollout.violation.is_some());
        assert_eq!(rollout.steps.len(), rollout.final_state.n_placed());
    }
}
