//! Bus slot allocation and bus branch wiring.
//!
//! Modules claim lateral slots along the shared bus through a [`BusRouter`]
//! and ask it to wire data/instruction branches down into their footprint.
//! [`SequentialRouter`] is the in-process implementation: slots are handed
//! out left to right and branches are recorded with their per-bit offsets.

use serde::Serialize;

use keystamp_blueprint::HostError;

/// A request to wire one bus branch into a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchSpec {
    /// Column the branch starts from.
    pub x: i32,
    /// Branch runs vertically instead of along the module floor.
    pub vertical: bool,
    /// Signals flow both ways (data bus) instead of into the module only.
    pub dual_direction: bool,
    /// Repeater glyphs used along the branch, e.g. `"><"`.
    pub glyphs: String,
    /// Bus width the offset function is evaluated over.
    pub bits: u32,
}

/// Host-side bus services.
pub trait BusRouter {
    /// Claim a non-overlapping lateral slot `width` columns wide and return its x.
    fn allocate_offset(&mut self, width: u32, reserved: bool) -> Result<i32, HostError>;

    /// Wire a branch. `offset` maps a bit index to its lateral offset from `spec.x`.
    fn build_branch(
        &mut self,
        spec: &BranchSpec,
        offset: &dyn Fn(u32) -> i32,
    ) -> Result<(), HostError>;
}

/// Lateral offset of bit line `bit` inside a keypad branch.
///
/// Bit pairs sit three columns apart; the odd line of each pair is pulled
/// one column back toward its partner.
pub fn keypad_branch_offset(bit: u32) -> i32 {
    let bit = bit as i32;
    -((bit * 3) - (bit % 2))
}

/// A slot handed out by a [`SequentialRouter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub x: i32,
    pub width: u32,
    pub reserved: bool,
}

/// A branch wired by a [`SequentialRouter`], with its offsets evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiredBranch {
    pub spec: BranchSpec,
    /// `offsets[bit]` is the lateral offset of that bit line.
    pub offsets: Vec<i32>,
}

/// Left-to-right slot allocator that records everything it is asked to do.
#[derive(Debug, Clone, Default)]
pub struct SequentialRouter {
    next_x: i32,
    gap: u32,
    allocations: Vec<Allocation>,
    branches: Vec<WiredBranch>,
}

impl SequentialRouter {
    /// Start handing out slots at column `start`, leaving `gap` columns between modules.
    pub fn new(start: i32, gap: u32) -> Self {
        Self {
            next_x: start,
            gap,
            ..Self::default()
        }
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn branches(&self) -> &[WiredBranch] {
        &self.branches
    }
}

impl BusRouter for SequentialRouter {
    fn allocate_offset(&mut self, width: u32, reserved: bool) -> Result<i32, HostError> {
        let x = self.next_x;
        let advance = width
            .checked_add(self.gap)
            .and_then(|span| i32::try_from(span).ok())
            .ok_or_else(|| HostError::new("bus", format!("slot width {width} out of range")))?;
        self.next_x = x
            .checked_add(advance)
            .ok_or_else(|| HostError::new("bus", "bus offsets exhausted"))?;
        self.allocations.push(Allocation { x, width, reserved });
        Ok(x)
    }

    fn build_branch(
        &mut self,
        spec: &BranchSpec,
        offset: &dyn Fn(u32) -> i32,
    ) -> Result<(), HostError> {
        if spec.glyphs.is_empty() {
            return Err(HostError::new("bus", "branch needs at least one glyph"));
        }
        self.branches.push(WiredBranch {
            spec: spec.clone(),
            offsets: (0..spec.bits).map(offset).collect(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_offsets_pair_lines() {
        let offsets: Vec<i32> = (0..6).map(keypad_branch_offset).collect();
        assert_eq!(offsets, vec![0, -2, -6, -8, -12, -14]);
    }

    #[test]
    fn sequential_slots_do_not_overlap() {
        let mut router = SequentialRouter::new(4, 1);
        assert_eq!(router.allocate_offset(16, false).unwrap(), 4);
        assert_eq!(router.allocate_offset(10, true).unwrap(), 21);
        assert_eq!(router.allocate_offset(3, false).unwrap(), 32);
        assert!(router.allocations()[1].reserved);
    }

    #[test]
    fn oversized_gap_is_refused() {
        let mut router = SequentialRouter::new(0, u32::MAX);
        let err = router.allocate_offset(16, false).unwrap_err();
        assert_eq!(err.operation, "bus");
        assert!(router.allocations().is_empty());

        let mut router = SequentialRouter::new(i32::MAX - 4, 0);
        assert!(router.allocate_offset(8, false).is_err());
    }

    #[test]
    fn branch_records_evaluated_offsets() {
        let mut router = SequentialRouter::new(0, 0);
        let spec = BranchSpec {
            x: 10,
            vertical: false,
            dual_direction: true,
            glyphs: "><".into(),
            bits: 4,
        };
        router.build_branch(&spec, &keypad_branch_offset).unwrap();
        assert_eq!(router.branches()[0].offsets, vec![0, -2, -6, -8]);
    }

    #[test]
    fn branch_without_glyphs_is_refused() {
        let mut router = SequentialRouter::new(0, 0);
        let spec = BranchSpec {
            x: 0,
            vertical: false,
            dual_direction: false,
            glyphs: String::new(),
            bits: 2,
        };
        assert!(router.build_branch(&spec, &keypad_branch_offset).is_err());
    }
}
