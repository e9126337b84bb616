//! Integration test: behaviour every engine shares.
//!
//! Each game is driven through the boxed factory with seeded random
//! policies and checked for determinism, idempotent observation reads,
//! terminal absorption, action validation and tensor shape.

use minatar_core::{ActError, Game, GameKind, Transition};
use minatar_games::{channel_names, make_game};
use minatar_obs::ObsLayout;
use minatar_space::GridShape;
use minatar_test_utils::{is_binary, rollout, ConstantPolicy, RandomPolicy};

const STEPS: usize = 1_000;

// ── Determinism ────────────────────────────────────────────────────

#[test]
fn same_seed_same_trajectory() {
    for kind in GameKind::ALL {
        for ramping in [false, true] {
            let mut a = make_game(kind, ramping, 1234);
            let mut b = make_game(kind, ramping, 1234);
            let ta = rollout(a.as_mut(), &mut RandomPolicy::new(9), STEPS);
            let tb = rollout(b.as_mut(), &mut RandomPolicy::new(9), STEPS);
            assert_eq!(ta, tb, "{kind} diverged (ramping={ramping})");
        }
    }
}

#[test]
fn reset_continues_the_stream() {
    // Two games reset the same number of times stay in lockstep.
    for kind in GameKind::ALL {
        let mut a = make_game(kind, false, 77);
        let mut b = make_game(kind, false, 77);
        for _ in 0..3 {
            rollout(a.as_mut(), &mut RandomPolicy::new(1), 200);
            rollout(b.as_mut(), &mut RandomPolicy::new(1), 200);
            a.reset();
            b.reset();
            assert_eq!(a.state(), b.state(), "{kind}");
        }
    }
}

// ── Observation ────────────────────────────────────────────────────

#[test]
fn observations_are_binary_and_shaped() {
    for kind in GameKind::ALL {
        let mut g = make_game(kind, true, 5);
        let names = channel_names(kind);
        let layout = ObsLayout::new(GridShape::MINATAR, names);
        assert!(layout.validate().is_ok(), "{kind} has duplicate channel names");
        assert_eq!(g.state_shape(), layout.shape());
        assert_eq!(g.state_shape(), [names.len(), 10, 10]);

        let traj = rollout(g.as_mut(), &mut RandomPolicy::new(3), STEPS);
        for obs in &traj.observations {
            assert_eq!(obs.len(), layout.len());
            assert!(is_binary(obs), "{kind} produced a non-binary value");
        }
    }
}

#[test]
fn repeated_state_reads_are_identical() {
    for kind in GameKind::ALL {
        let mut g = make_game(kind, false, 8);
        for a in [0, 1, 3, 5, 2, 4] {
            g.act(a).unwrap();
            let first = g.state().to_vec();
            assert_eq!(g.state(), &first[..], "{kind}");
            for ch in 0..g.n_channels() {
                let plane = g.channel(ch).unwrap();
                assert_eq!(plane, &first[ch * 100..(ch + 1) * 100]);
            }
        }
    }
}

#[test]
fn channel_out_of_range_is_an_error() {
    for kind in GameKind::ALL {
        let g = make_game(kind, false, 0);
        assert!(g.channel(g.n_channels()).is_err());
    }
}

// ── Actions ────────────────────────────────────────────────────────

#[test]
fn invalid_actions_are_rejected_without_side_effects() {
    for kind in GameKind::ALL {
        let mut g = make_game(kind, false, 21);
        g.act(0).unwrap();
        let before = g.state().to_vec();
        for bad in [-1, 6] {
            let err = g.act(bad).unwrap_err();
            assert_eq!(
                err,
                ActError::InvalidAction {
                    action: bad,
                    n_actions: 6,
                    terminal: false
                }
            );
            assert_eq!(err.transition(), Transition::new(-1.0, false));
            assert_eq!(g.state(), &before[..], "{kind} changed state on {bad}");
        }
    }
}

#[test]
fn minimal_action_sets() {
    let expect: [(GameKind, &[usize]); 5] = [
        (GameKind::Asterix, &[0, 1, 2, 3, 4]),
        (GameKind::Breakout, &[0, 1, 3]),
        (GameKind::Freeway, &[0, 2, 4]),
        (GameKind::Seaquest, &[0, 1, 2, 3, 4, 5]),
        (GameKind::SpaceInvaders, &[0, 1, 3, 5]),
    ];
    for (kind, set) in expect {
        assert_eq!(make_game(kind, false, 0).minimal_action_set(), set);
    }
}

// ── Termination ────────────────────────────────────────────────────

/// An action that, repeated, ends the episode: SeaQuest dives until the
/// oxygen runs out, Breakout parks the paddle at the right wall.
fn doomed_action(kind: GameKind) -> i32 {
    match kind {
        GameKind::Seaquest => 4,
        GameKind::Breakout => 3,
        _ => 0,
    }
}

#[test]
fn terminal_state_absorbs_until_reset() {
    for kind in GameKind::ALL {
        let mut g = make_game(kind, false, 31);
        let traj = rollout(g.as_mut(), &mut ConstantPolicy(doomed_action(kind)), 5_000);
        assert!(traj.ended(), "{kind} never ended");
        assert!(g.is_terminal());

        let frozen = g.state().to_vec();
        for a in 0..6 {
            assert_eq!(g.act(a).unwrap(), Transition::ABSORBED);
        }
        assert_eq!(g.state(), &frozen[..]);

        g.reset();
        assert!(!g.is_terminal());
        assert!(!g.act(0).unwrap().terminal);
    }
}

#[test]
fn games_without_ramp_report_zero() {
    for kind in [GameKind::Breakout, GameKind::Freeway] {
        let mut g = make_game(kind, true, 2);
        rollout(g.as_mut(), &mut RandomPolicy::new(2), STEPS);
        assert_eq!(g.difficulty_ramp(), 0);
    }
}
