pub mod signs;

pub use signs::{degrees_in_sign, format_position, get_sign_index, ZodiacSign};
