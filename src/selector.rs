//! Maximum-information item selection
//!
//! At each step the engine administers the unseen item that is most
//! informative at the current ability estimate. Ties break to the lowest
//! item id so selection is fully deterministic, which is what makes
//! repeated "what is the current question?" queries idempotent.
//!
//! Exhaustion of a dimension's pool is signalled with `None`; the session
//! state machine treats that as a forced dimension completion, distinct
//! from the precision-based stopping rule.

use crate::bank::{Item, ItemBank};
use crate::model;
use crate::session::DimensionState;

/// Pick the next item for a dimension, or `None` if its pool is exhausted
///
/// Only items belonging to the state's own dimension are considered, and an
/// item already administered in this session is never offered again.
pub fn select_next<'a>(state: &DimensionState, bank: &'a ItemBank) -> Option<&'a Item> {
    let mut best: Option<(&Item, f64)> = None;

    for item in bank.for_dimension(state.dimension) {
        if state.has_administered(item.id) {
            continue;
        }
        let info = model::information(state.theta, item);
        let better = match best {
            None => true,
            Some((current, current_info)) => {
                info > current_info || (info == current_info && item.id < current.id)
            }
        };
        if better {
            best = Some((item, info));
        }
    }

    best.map(|(item, _)| item)
}
