//! Sample-wise discrete systems run through the [`RangeExecutor`].
//!
//! [`RangeExecutor`]: crate::executor::RangeExecutor

use crate::executor::RangeWorker;
use crate::sequence::{SequenceView, SequenceViewMut};

/// A memoryless operation applied in place to every target sample.
///
/// Binary systems combine each target sample with the operand sample at the
/// same absolute index and store the result back into the target. Integer
/// arithmetic wraps on overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscreteSystem {
    /// `target += a`.
    Adder,
    /// `target -= a`.
    Subtracter,
    /// `target *= a`.
    Multiplier,
    /// `target = trunc(target · c)`; takes no operands.
    ConstantMultiplier(f64),
    /// `target = v`; takes no operands.
    Filler(i32),
}

impl DiscreteSystem {
    /// Number of operand windows the system reads besides the target.
    pub fn arity(&self) -> usize {
        match self {
            DiscreteSystem::Adder | DiscreteSystem::Subtracter | DiscreteSystem::Multiplier => 1,
            DiscreteSystem::ConstantMultiplier(_) | DiscreteSystem::Filler(_) => 0,
        }
    }

    fn operand<'o, 'b>(&self, operands: &'o [SequenceView<'b>]) -> &'o SequenceView<'b> {
        match operands.first() {
            Some(operand) => operand,
            None => panic!(
                "{:?} needs {} operand but was given none",
                self,
                self.arity()
            ),
        }
    }

    fn combine<F>(&self, target: &mut SequenceViewMut<'_>, operands: &[SequenceView<'_>], op: F)
    where
        F: Fn(i32, i32) -> i32,
    {
        let operand = self.operand(operands);
        for i in target.indices() {
            let sample = target.get_mut(i);
            *sample = op(*sample, operand.get(i));
        }
    }
}

impl<'a, 'b> RangeWorker<SequenceViewMut<'a>, SequenceView<'b>> for DiscreteSystem {
    fn operate(&self, target: &mut SequenceViewMut<'a>, operands: &[SequenceView<'b>]) {
        match *self {
            DiscreteSystem::Adder => self.combine(target, operands, i32::wrapping_add),
            DiscreteSystem::Subtracter => self.combine(target, operands, i32::wrapping_sub),
            DiscreteSystem::Multiplier => self.combine(target, operands, i32::wrapping_mul),
            DiscreteSystem::ConstantMultiplier(factor) => {
                for sample in target.values_mut() {
                    *sample = (*sample as f64 * factor) as i32;
                }
            }
            DiscreteSystem::Filler(value) => target.values_mut().fill(value),
        }
    }
}
