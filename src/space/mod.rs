// space/ - Geometry queries
//
// Pure functions over positions and rectangles.
// No state, no allocation - just math.

mod math;
mod nearest;
mod rect;

pub use math::*;
pub use nearest::*;
pub use rect::*;
