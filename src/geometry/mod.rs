mod pixel_rect;

pub use pixel_rect::PixelRect;
