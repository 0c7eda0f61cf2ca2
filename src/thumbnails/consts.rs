pub const THUMBNAIL_WIDTH: u32 = 300;
pub const JPEG_QUALITY: u8 = 75;
