//! Dressing Animation Core (engine-agnostic)
//!
//! Compiles declarative smart controls and cabinet wear configurations into
//! animator controllers and animation clips. The host scene is modelled by
//! `dressing-api-core`; everything here reads that scene and writes plain
//! data structures the host can persist.

pub mod cabinet;
pub mod clip;
pub mod composer;
pub mod config;
pub mod context;
pub mod control;
pub mod controller;
pub mod error;
pub mod fluent;
pub mod ids;
pub mod properties;
pub mod remap;
pub mod report;
pub mod write_defaults;

// Re-exports for consumers
pub use cabinet::{scan_dynamics, CabinetAnimConfig, CabinetAnimGenerator, DynamicsRef};
pub use clip::{AnimationClip, AnimationCurve, CurveBinding, Keyframe, ObjectReferenceKeyframe};
pub use composer::SmartControlComposer;
pub use config::{AnimatorOptions, Config, WriteDefaultsSetting};
pub use context::Context;
pub use control::{ControlType, DriverType, ParameterSlot, SmartControl};
pub use controller::{AnimatorController, AnimatorControllerParameter, ParameterType, StateId};
pub use error::{ComposeError, Result};
pub use fluent::{AnimatorBuilder, AnimatorParameter, ClipBuilder};
pub use ids::{ControlId, IdAllocator, SlotId};
pub use remap::PathRemapper;
pub use report::{LogEntry, LogLevel, Report};
pub use write_defaults::{detect_write_defaults_mode, WriteDefaultsMode};
pub use dressing_api_core::{ObjectId, Scene, Value};
