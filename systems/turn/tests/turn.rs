use lane_defence_core::{BoardCoord, Command, Event, GameConfig, Host, Player, Resources, UnitKind};
use lane_defence_system_deployment::{neighbors_of, MAX_STALL_DEPLOYS, MIDPOINT_X};
use lane_defence_system_layout::DesiredLayout;
use lane_defence_system_turn::{OffensePolicy, OffenseTrigger, TurnController, TurnPhase, Wave};
use lane_defence_world::World;

fn controller(policy: OffensePolicy) -> TurnController {
    let layout = DesiredLayout::standard().expect("built-in layout is valid");
    TurnController::new(&layout, GameConfig::standard(), policy).expect("controller")
}

fn world_on_turn(turn: u32) -> World {
    let mut world = World::new(GameConfig::standard());
    for _ in 0..turn {
        world.advance_turn();
    }
    world
}

fn deploys(commands: &[Command]) -> Vec<Command> {
    commands
        .iter()
        .copied()
        .filter(|command| matches!(command, Command::Deploy { .. }))
        .collect()
}

#[test]
fn critical_health_launches_probe_flanks_and_swarm() {
    let mut world = world_on_turn(1);
    world.set_health(Player::Me, 3.0);
    let mut controller = controller(OffensePolicy::default());

    let report = controller.play_turn(&mut world);

    assert_eq!(report.trigger, Some(OffenseTrigger::CriticalHealth));
    let waves = deploys(&report.commands);
    assert_eq!(waves.len(), 4, "probe, two flanks and a swarm: {waves:?}");

    let probe = waves[0];
    assert_eq!(
        probe,
        Wave::new(UnitKind::Emp, 2).deploy_at(probe.at()),
        "probe wave leads"
    );
    assert!(controller.rally_cells().contains(&probe.at()));

    let flanks: Vec<BoardCoord> = waves[1..3].iter().map(Command::at).collect();
    assert_eq!(flanks, neighbors_of(probe.at()).to_vec());
    assert!(waves[1..3].iter().all(|command| command.kind() == UnitKind::Ping));

    assert!(matches!(
        waves[3],
        Command::Deploy {
            kind: UnitKind::Emp,
            count: 1000,
            ..
        }
    ));
    assert_eq!(controller.phase(), TurnPhase::Submitted);
}

#[test]
fn builds_precede_deploys_in_submission() {
    let mut world = world_on_turn(1);
    world.set_health(Player::Me, 1.0);
    let mut controller = controller(OffensePolicy::default());

    let report = controller.play_turn(&mut world);
    let first_deploy = report
        .commands
        .iter()
        .position(|command| matches!(command, Command::Deploy { .. }))
        .expect("offense fired");

    assert!(report.builds() > 0);
    assert!(report.commands[..first_deploy]
        .iter()
        .all(|command| matches!(command, Command::Build { .. })));
    assert!(report.commands[first_deploy..]
        .iter()
        .all(|command| matches!(command, Command::Deploy { .. })));
}

#[test]
fn turn_zero_never_attacks() {
    let mut world = world_on_turn(0);
    world.set_health(Player::Me, 1.0);
    world.set_resources(Player::Me, Resources::new(40.0, 100.0));
    let mut controller = controller(OffensePolicy::default());

    let report = controller.play_turn(&mut world);

    assert_eq!(report.trigger, None);
    assert!(deploys(&report.commands).is_empty());
    assert!(report.builds() > 0);
}

#[test]
fn healthy_and_poor_player_only_builds() {
    let mut world = world_on_turn(3);
    world.set_resources(Player::Me, Resources::new(10.0, 4.0));
    let mut controller = controller(OffensePolicy::default());

    let report = controller.play_turn(&mut world);

    assert_eq!(report.trigger, None);
    assert_eq!(report.deploys(), 0);
}

#[test]
fn bits_surplus_triggers_the_same_offense() {
    let mut world = world_on_turn(2);
    world.set_resources(Player::Me, Resources::new(0.0, 40.0));
    let mut controller = controller(OffensePolicy::default());

    let report = controller.play_turn(&mut world);

    assert_eq!(report.trigger, Some(OffenseTrigger::BitsSurplus));
    assert_eq!(report.deploys(), 4);
}

#[test]
fn blocked_rally_cells_fall_back_to_edge_scan() {
    let mut world = world_on_turn(1);
    world.set_health(Player::Me, 2.0);
    let mut controller = controller(OffensePolicy::default());
    for cell in controller.rally_cells().to_vec() {
        assert!(world.place(Player::Me, UnitKind::Filter, cell));
    }

    let report = controller.play_turn(&mut world);
    let waves = deploys(&report.commands);

    assert_eq!(waves.len(), 4);
    assert!(!controller.rally_cells().contains(&waves[0].at()));
    assert!(world.snapshot().structure_at(waves[0].at()).is_none());
}

#[test]
fn fully_blocked_edges_hold_the_offense() {
    let mut world = world_on_turn(1);
    world.set_health(Player::Me, 2.0);
    world.set_resources(Player::Me, Resources::new(0.0, 30.0));
    for x in 0..28 {
        let y = if x < MIDPOINT_X { 13 - x } else { x - 14 };
        assert!(world.place(Player::Me, UnitKind::Filter, BoardCoord::new(x, y)));
    }
    let mut controller = controller(OffensePolicy::default());

    let report = controller.play_turn(&mut world);

    assert_eq!(report.trigger, Some(OffenseTrigger::CriticalHealth));
    assert_eq!(report.deploys(), 0);
}

#[test]
fn submitted_commands_reach_the_host() {
    let mut world = world_on_turn(1);
    world.set_health(Player::Me, 3.0);
    world.set_resources(Player::Me, Resources::new(6.0, 12.0));
    let mut controller = controller(OffensePolicy::default());

    let report = controller.play_turn(&mut world);
    let admitted = world.last_submission();

    assert!(!admitted.is_empty());
    assert!(admitted.len() <= report.commands.len());
    for command in admitted {
        assert!(report
            .commands
            .iter()
            .any(|sent| sent.kind() == command.kind() && sent.at() == command.at()));
    }
    assert_eq!(world.rejections(), report.commands.len() - admitted.len());
}

#[test]
fn identical_inputs_replay_identical_turns() {
    let policy = OffensePolicy {
        stall_with_scramblers: true,
        seed: 11,
        ..OffensePolicy::default()
    };
    let run = || {
        let mut world = world_on_turn(2);
        world.set_resources(Player::Me, Resources::new(0.0, 9.0));
        controller(policy).play_turn(&mut world)
    };

    let first = run();
    assert_eq!(first.trigger, None);
    assert_eq!(first.deploys(), 9);
    assert_eq!(first, run());
}

#[test]
fn replaying_a_snapshot_on_one_controller_repeats_the_stall() {
    let mut controller = controller(OffensePolicy {
        stall_with_scramblers: true,
        seed: 11,
        ..OffensePolicy::default()
    });
    let mut play = || {
        let mut world = world_on_turn(2);
        world.set_resources(Player::Me, Resources::new(0.0, 9.0));
        controller.play_turn(&mut world)
    };

    let first = play();
    let second = play();
    assert_eq!(first.deploys(), 9);
    assert_eq!(first, second);
}

#[test]
fn large_bit_totals_stall_a_bounded_number_of_scramblers() {
    let mut controller = controller(OffensePolicy {
        stall_with_scramblers: true,
        bits_surplus: f32::MAX,
        ..OffensePolicy::default()
    });
    let mut world = world_on_turn(2);
    world.set_resources(Player::Me, Resources::new(0.0, 1.0e9));

    let report = controller.play_turn(&mut world);
    assert_eq!(report.trigger, None);
    assert_eq!(report.deploys(), MAX_STALL_DEPLOYS as usize);
}

#[test]
fn observed_breaches_accumulate() {
    let mut controller = controller(OffensePolicy::default());
    controller.observe(&[Event::Breach {
        location: BoardCoord::new(2, 11),
        attacker: Player::Opponent,
    }]);
    controller.observe(&[Event::Breach {
        location: BoardCoord::new(20, 21),
        attacker: Player::Me,
    }]);

    assert_eq!(controller.breaches().locations(), &[BoardCoord::new(2, 11)]);
}
