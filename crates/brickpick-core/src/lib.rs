//! # brickpick Core
//!
//! The file-side half of brickpick: typed records for required parts and
//! owned inventory, the color reference table, the inventory-export parser,
//! part-list/pick-list CSV I/O, and the reconciler that joins a set's bill
//! of materials against the user's own storage locations.
//!
//! Nothing in this crate touches a browser; everything is a pure transform
//! or plain file I/O, created fresh per run.

mod colors;
mod error;
mod files;
mod inventory;
mod model;
mod picklist;

pub use colors::ColorMap;
pub use error::CoreError;
pub use files::{part_list_path, pick_list_path, read_part_list, write_part_list, write_pick_list};
pub use inventory::{parse_inventory, parse_inventory_file};
pub use model::{InventoryItem, PartRecord, PickListEntry, UNKNOWN_LOCATION};
pub use picklist::build_pick_list;
