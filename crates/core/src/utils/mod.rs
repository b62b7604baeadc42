pub mod input_format;
pub mod time_utils;
