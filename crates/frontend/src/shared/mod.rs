pub mod api_utils;
pub mod components;
pub mod http;
pub mod icons;
pub mod modal_frame;
