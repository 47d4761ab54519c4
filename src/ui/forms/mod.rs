//! Form rendering module
//!
//! - `field_renderer`: text input / select rendering with message lines
//! - `province_form`: the province create page

mod field_renderer;
mod province_form;

pub use province_form::draw_province_create;
