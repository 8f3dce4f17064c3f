//! Console rendering.
//!
//! Drawing happens in two steps: entities and maps are drawn onto offscreen
//! [`Layer`]s, which are then blitted onto the [`RootConsole`] and presented.

pub mod console;
pub mod layer;
pub mod terminal;
pub mod texel;

pub use console::ConsoleSize;
pub use console::RootConsole;
pub use layer::Drawable;
pub use layer::Layer;
pub use layer::LayerSize;
pub use terminal::Terminal;
