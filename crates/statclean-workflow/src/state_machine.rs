use crate::error::WorkflowError;
use crate::types::Step;

/// Validates a direct jump from `from` to the step numbered `to`.
///
/// Any already reached step may be revisited, and the step right after the
/// current one may be entered. Everything else, including numbers outside
/// `1..=6`, is an invalid transition.
pub fn validate_jump(from: Step, to: u8) -> Result<Step, WorkflowError> {
    match Step::from_number(to) {
        Some(target) if allowed(from, target) => Ok(target),
        _ => Err(WorkflowError::invalid_transition(from, to)),
    }
}

/// Every step reachable by a single jump from `from`, in workflow order.
pub fn allowed_targets(from: Step) -> Vec<Step> {
    Step::ALL
        .into_iter()
        .filter(|target| allowed(from, *target))
        .collect()
}

fn allowed(from: Step, to: Step) -> bool {
    to <= from || from.next() == Some(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_can_only_stay_or_move_to_clean() {
        assert_eq!(allowed_targets(Step::Upload), vec![Step::Upload, Step::Clean]);
    }

    #[test]
    fn report_can_revisit_everything() {
        assert_eq!(allowed_targets(Step::Report), Step::ALL.to_vec());
    }

    #[test]
    fn skipping_ahead_is_rejected() {
        assert_eq!(
            validate_jump(Step::Clean, 4),
            Err(WorkflowError::InvalidTransition { from: 2, to: 4 })
        );
        assert_eq!(validate_jump(Step::Clean, 3), Ok(Step::Validate));
        assert_eq!(validate_jump(Step::Clean, 1), Ok(Step::Upload));
    }

    #[test]
    fn out_of_range_targets_are_rejected() {
        assert!(validate_jump(Step::Report, 0).is_err());
        assert!(validate_jump(Step::Report, 7).is_err());
    }
}
