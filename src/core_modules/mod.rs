pub mod chunk;
pub mod de00;
pub mod de76;
pub mod de94;
pub mod formula;
pub mod grid_manager;
pub mod lab;
pub mod numeric;
pub mod pixel;
pub mod smart_pixel;
