pub mod bulk;
pub mod datetime;
pub mod display;
pub mod formats;
pub mod lens_info;
pub mod metadata;
pub mod offset;
pub mod presets;
pub mod shutter;
pub mod validation;
