use proptest::prelude::*;
use statclean_workflow::state_machine::{allowed_targets, validate_jump};
use statclean_workflow::{Step, WorkflowController, WorkflowError};

#[derive(Debug, Clone, Copy)]
enum Nav {
    Advance,
    Retreat,
    Jump(u8),
    Reset,
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Upload),
        Just(Step::Clean),
        Just(Step::Validate),
        Just(Step::Weight),
        Just(Step::Estimate),
        Just(Step::Report),
    ]
}

fn any_nav() -> impl Strategy<Value = Nav> {
    prop_oneof![
        4 => Just(Nav::Advance),
        3 => Just(Nav::Retreat),
        2 => (0u8..=8).prop_map(Nav::Jump),
        1 => Just(Nav::Reset),
    ]
}

#[test]
fn test_upload_targets() {
    assert!(validate_jump(Step::Upload, 1).is_ok());
    assert!(validate_jump(Step::Upload, 2).is_ok());

    // Invalid
    assert!(validate_jump(Step::Upload, 3).is_err());
    assert!(validate_jump(Step::Upload, 6).is_err());
}

#[test]
fn test_report_has_no_forward_target() {
    assert!(validate_jump(Step::Report, 6).is_ok());
    assert!(validate_jump(Step::Report, 1).is_ok());
    assert!(validate_jump(Step::Report, 7).is_err());
}

proptest! {
    #[test]
    fn prop_jump_validation_matches_allowed_targets(from in any_step(), to in 0u8..=9) {
        let res = validate_jump(from, to);
        let allowed = allowed_targets(from);

        match Step::from_number(to) {
            Some(target) if allowed.contains(&target) => prop_assert_eq!(res, Ok(target)),
            _ => prop_assert_eq!(
                res,
                Err(WorkflowError::InvalidTransition { from: from.number(), to })
            ),
        }
    }

    #[test]
    fn prop_step_stays_in_range(navs in proptest::collection::vec(any_nav(), 0..64)) {
        let mut controller = WorkflowController::new();
        for nav in navs {
            match nav {
                Nav::Advance => { let _ = controller.advance_step(); }
                Nav::Retreat => { controller.retreat_step(); }
                Nav::Jump(n) => { let _ = controller.jump_to_step(n); }
                Nav::Reset => controller.reset_workflow(),
            }
            let n = controller.current_step().number();
            prop_assert!((1..=6).contains(&n));
        }
        prop_assert!(controller.verify_integrity().is_ok());
    }

    #[test]
    fn prop_each_move_logs_exactly_one_entry(navs in proptest::collection::vec(any_nav(), 0..64)) {
        let mut controller = WorkflowController::new();
        for nav in navs {
            let before_step = controller.current_step();
            let before_len = controller.activity_log().len();
            match nav {
                Nav::Advance => { let _ = controller.advance_step(); }
                Nav::Retreat => { controller.retreat_step(); }
                Nav::Jump(n) => { let _ = controller.jump_to_step(n); }
                Nav::Reset => {
                    controller.reset_workflow();
                    continue;
                }
            }
            let moved = controller.current_step() != before_step;
            let expected = before_len + usize::from(moved);
            prop_assert_eq!(controller.activity_log().len(), expected);
        }
    }

    #[test]
    fn prop_rejected_jump_changes_nothing(steps_ahead in 0u8..6, offset in 2u8..8) {
        let mut controller = WorkflowController::new();
        for _ in 0..steps_ahead {
            controller.advance_step().unwrap();
        }
        let before = controller.snapshot();
        let target = before.current_step.number() + offset;

        prop_assert!(controller.jump_to_step(target).is_err());
        prop_assert_eq!(controller.snapshot(), before);
    }
}
