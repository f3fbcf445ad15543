pub mod buffer;
pub mod colorize;
pub mod grid;
pub mod tile;
pub mod view;

pub use buffer::IterationBuffer;
pub use colorize::to_rgba;
pub use grid::tile_grid;
pub use tile::Tile;
pub use view::ViewParams;
