/// Inventory domain layer: records, collection, classification, rendering.
pub mod classify;
pub mod collect;
pub mod errors;
pub mod ordered;
pub mod record;
pub mod render;

pub use classify::ClassifyOptions;
pub use collect::{Collection, collect, resolve_regions};
pub use errors::InventoryError;
pub use record::{HostField, InstanceRecord, Tag};
pub use render::{RenderModel, write_inventory};
