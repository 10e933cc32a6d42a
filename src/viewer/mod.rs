//! Standalone NGL viewer page generation: color schemes, labels, force and
//! charge overlays, camera rotation and the hover tooltip.

mod error;
mod labels;
mod overlay;
mod page;
mod rotation;
mod scheme;
mod tooltip;

pub use error::Error;
pub use labels::{label_texts, LabelMode};
pub use overlay::{charge_store_js, force_arrows, ForceArrow};
pub use page::{write_page, CameraKind, ModelKind, ViewerOptions};
pub use rotation::{quaternion, rotation_matrix, spin_matrix, Axis};
pub use scheme::js_color_scheme;
pub use tooltip::tooltip_js;
