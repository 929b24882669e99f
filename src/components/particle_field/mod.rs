//! Interactive particle field background.
//!
//! Renders drifting particles on an HTML canvas with:
//! - Random bulk generation sized to the viewport, rebuilt on resize
//! - Wall reflection and pointer repulsion each frame
//! - Faint lines between nearby particles
//! - Opacity that brightens near the pointer and an optional cycling palette
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldStyle, ParticleField};
//!
//! view! { <ParticleField config=FieldStyle::baseline() /> }
//! ```

mod animation;
mod component;
mod input;
mod linker;
mod particles;
mod physics;
mod render;
mod state;
pub mod theme;

pub use animation::AnimationLoop;
pub use component::ParticleField;
pub use input::{InputAdapter, viewport_size};
pub use linker::{Link, links};
pub use particles::{Particle, ParticleStore, particle_count};
pub use physics::{HueCycle, Pointer, step, step_particle};
pub use render::render;
pub use state::{FieldState, SharedPointer};
pub use theme::{FieldConfig, FieldStyle, Hsla, Preset};
