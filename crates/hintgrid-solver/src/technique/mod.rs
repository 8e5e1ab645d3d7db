//! Hint finders, one per solving technique.
//!
//! Each finder implements [`HintFinder`]: it scans a [`Grid`] without
//! modifying it and reports its deductions to a [`HintAggregator`].
//! [`all_finders`] is the registry used by
//! [`HintSolver::with_all_finders`](crate::HintSolver::with_all_finders).

use std::{fmt::Debug, ops::ControlFlow};

use hintgrid_core::{Grid, HouseKind};

pub use self::{
    basic_fish::BasicFish,
    full_house::FullHouse,
    hidden_single::HiddenSingle,
    hidden_subset::HiddenSubset,
    locked_candidates::LockedCandidates,
    naked_single::NakedSingle,
    naked_subset::NakedSubset,
    remote_pair::RemotePair,
    skyscraper::Skyscraper,
    two_string_kite::TwoStringKite,
    unique_rectangle::UniqueRectangle,
    x_chain::{DEFAULT_MAX_CHAIN_LENGTH, XChain},
};
use crate::{HintAggregator, SolvingTechnique};

mod basic_fish;
mod emit;
mod full_house;
mod hidden_single;
mod hidden_subset;
mod locked_candidates;
mod naked_single;
mod naked_subset;
mod remote_pair;
mod skyscraper;
mod two_string_kite;
mod unique_rectangle;
mod x_chain;

/// Returns a finder for every technique, in priority order.
///
/// The order follows [`SolvingTechnique::ALL`]: cheap and certain techniques
/// first.
///
/// # Examples
///
/// ```
/// use hintgrid_solver::{SolvingTechnique, technique};
///
/// let finders = technique::all_finders();
/// assert_eq!(finders.len(), SolvingTechnique::ALL.len());
/// assert_eq!(finders[0].technique(), SolvingTechnique::FullHouse);
/// ```
#[must_use]
pub fn all_finders() -> Vec<BoxedHintFinder> {
    vec![
        Box::new(FullHouse::new()),
        Box::new(NakedSingle::new()),
        Box::new(HiddenSingle::new()),
        Box::new(NakedSubset::locked_pair()),
        Box::new(NakedSubset::locked_triple()),
        Box::new(LockedCandidates::pointing()),
        Box::new(LockedCandidates::claiming()),
        Box::new(HiddenSubset::pair()),
        Box::new(HiddenSubset::triple()),
        Box::new(HiddenSubset::quadruple()),
        Box::new(NakedSubset::pair()),
        Box::new(NakedSubset::triple()),
        Box::new(NakedSubset::quadruple()),
        Box::new(BasicFish::x_wing()),
        Box::new(BasicFish::swordfish()),
        Box::new(BasicFish::jellyfish()),
        Box::new(Skyscraper::new()),
        Box::new(TwoStringKite::new()),
        Box::new(UniqueRectangle::type1()),
        Box::new(UniqueRectangle::type2()),
        Box::new(UniqueRectangle::type4()),
        Box::new(RemotePair::new()),
        Box::new(XChain::new()),
    ]
}

/// Returns the single-placement finders: Naked Single and Hidden Single.
///
/// This set drives the propagation step of
/// [`BruteForceSolver`](crate::BruteForceSolver).
#[must_use]
pub fn singles_finders() -> Vec<BoxedHintFinder> {
    vec![Box::new(NakedSingle::new()), Box::new(HiddenSingle::new())]
}

/// Returns the registered finders for the given techniques, in priority order.
///
/// Duplicates in `techniques` are ignored.
#[must_use]
pub fn finders_for(techniques: &[SolvingTechnique]) -> Vec<BoxedHintFinder> {
    all_finders()
        .into_iter()
        .filter(|finder| techniques.contains(&finder.technique()))
        .collect()
}

/// A solving technique that reports deductions as hints.
pub trait HintFinder: Debug + Send + Sync {
    /// Returns the technique this finder implements.
    fn technique(&self) -> SolvingTechnique;

    /// Returns a boxed clone of the finder.
    fn clone_box(&self) -> BoxedHintFinder;

    /// Scans `grid` and adds every deduction found to `hints`.
    ///
    /// Returns [`ControlFlow::Break`] as soon as `hints` stops accepting
    /// hints. Finding nothing is not an error.
    ///
    /// # Panics
    ///
    /// Panics if the derived state of `grid` is invalid.
    fn find_hints(&self, grid: &Grid, hints: &mut HintAggregator) -> ControlFlow<()>;
}

/// A boxed hint finder.
pub type BoxedHintFinder = Box<dyn HintFinder>;

impl Clone for BoxedHintFinder {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns the line kind crossing `kind`: columns for rows, rows otherwise.
fn cross_kind(kind: HouseKind) -> HouseKind {
    match kind {
        HouseKind::Row => HouseKind::Column,
        HouseKind::Column | HouseKind::Block => HouseKind::Row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_follows_priority_order() {
        let techniques: Vec<_> = all_finders().iter().map(|f| f.technique()).collect();
        assert_eq!(techniques, SolvingTechnique::ALL);
    }

    #[test]
    fn test_singles_finders() {
        let techniques: Vec<_> = singles_finders().iter().map(|f| f.technique()).collect();
        assert_eq!(
            techniques,
            [SolvingTechnique::NakedSingle, SolvingTechnique::HiddenSingle]
        );
    }

    #[test]
    fn test_finders_for_keeps_registry_order() {
        let finders = finders_for(&[
            SolvingTechnique::XWing,
            SolvingTechnique::FullHouse,
            SolvingTechnique::XWing,
        ]);
        let techniques: Vec<_> = finders.iter().map(|f| f.technique()).collect();
        assert_eq!(techniques, [SolvingTechnique::FullHouse, SolvingTechnique::XWing]);
    }

    #[test]
    fn test_boxed_finders_clone() {
        let finders = all_finders();
        let cloned = finders.clone();
        for (a, b) in finders.iter().zip(&cloned) {
            assert_eq!(a.technique(), b.technique());
        }
    }
}
