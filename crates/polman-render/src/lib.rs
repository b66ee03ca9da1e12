//! Plain-text rendering for the polman CLI surfaces.
//!
//! Renderers are pure functions over the `Renderable*` models; every returned string ends with a
//! newline so callers can print it verbatim.

#![forbid(unsafe_code)]

mod library;
mod model;
mod policy;
mod scan;

pub use library::{render_library, render_library_list};
pub use model::{
    RenderableLibrary, RenderableListEntry, RenderablePolicy, RenderableRecommendation,
    RenderableScan, RenderableStats, RenderableVersion,
};
pub use policy::{render_history, render_policy, render_policy_list, render_stats};
pub use scan::render_scan;
