//! SDF scene editing and obstacle bookkeeping for dynamic task generation
//!
//! Two standalone helpers used when respawning dynamic obstacles: an
//! [`SdfDocument`] editor for renaming model roots and stripping pedestrian
//! plugin elements, and a [`KnownObstacles`] registry tracking spawn/usage
//! state per obstacle name.

pub mod error;
pub mod obstacles;
pub mod sdf;

pub use error::{ObstacleError, ObstacleResult, SdfError, SdfResult};
pub use obstacles::{KnownObstacle, KnownObstacles};
pub use sdf::{Element, PluginSelector, SdfDocument, XmlNode, MODEL_TAG};
