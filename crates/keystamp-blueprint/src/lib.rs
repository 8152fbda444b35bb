//! Blueprint stamping engine.
//!
//! Expands layered ASCII-art templates into absolute cell placements:
//!
//! - **Legend:** per-call character → cell descriptor map ([`legend`])
//! - **Slice stack:** layers of rows of characters ([`slice`])
//! - **Patches:** positional substring edits on a cloned stack ([`patch`])
//! - **Orientation:** 2–3 character axis codes like `xZy` ([`orient`])
//! - **Stamper:** resolves, maps and emits placements in a fixed order ([`stamp`])
//!
//! Placement itself is delegated to a [`host::CellHost`].
//!
//! ```rust
//! use keystamp_blueprint::{stamp, BlockPos, Legend, Orientation, PlacementLog, SliceStack};
//!
//! let legend = Legend::from_pairs([('L', "lamp"), ('|', "wire ns")]).unwrap();
//! let stack = SliceStack::flat(["L", "|"]);
//! let orientation = Orientation::parse("Xy").unwrap();
//!
//! let mut log = PlacementLog::new();
//! stamp(&legend, &stack, BlockPos::new(0, 10, 0), &orientation, &mut log).unwrap();
//! assert_eq!(log.cell_at(BlockPos::new(0, 9, 0)).unwrap().as_str(), "wire ns");
//! ```

pub mod cell;
pub mod digest;
pub mod error;
pub mod file;
pub mod host;
pub mod legend;
pub mod orient;
pub mod patch;
pub mod slice;
pub mod stamp;

pub use cell::{BlockPos, CellDescriptor, Extent};
pub use digest::{plan_digest, PlanDigest};
pub use error::{BlueprintError, Result};
pub use file::{load_blueprint, BlueprintFile};
pub use host::{CellHost, HostError, HostOp, PlacementLog};
pub use legend::{Legend, BLANK};
pub use orient::{Axis, AxisMap, Orientation};
pub use patch::{replace_at, Patch};
pub use slice::{SliceIndex, SliceStack};
pub use stamp::{plan, stamp, Blueprint, Placement};
