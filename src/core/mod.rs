//! Platform-agnostic core module - shared between the WASM app and the CLI

pub mod clusters;
pub mod config;
pub mod flops;
pub mod frame;
pub mod mesh;
pub mod progress;
pub mod quiz;
pub mod scene;
pub mod timeline;
pub mod topology;
pub mod visibility;

pub use clusters::{Category, CategoryFilter, Cluster, SortField, ViewState, CLUSTERS};
pub use config::{GuideConfig, MeshConfig};
pub use flops::{CalculatorInputs, TokenUnit, TrainingEstimate, GPU_OPTIONS};
pub use frame::{FrameHandle, FrameLoop};
pub use mesh::{Mesh, MeshAnimator, MeshPainter, RenderStats};
pub use progress::ReadingProgress;
pub use quiz::{ConceptCheck, OptionMark, Scenario};
pub use scene::{Paint, Scene};
pub use timeline::{PowerTimeline, GENERATIONS};
pub use topology::{Level, TopologyExplorer};
pub use visibility::{ProbeKind, VisibilityMap, PROBES};
