// Components module - reusable UI building blocks
//
// - App bar: navigation button, title, overflow menu
// - Sitemap list: one row per container of the displayed page
// - Status bar: latest log line and key hints
// - Toast: notifications overlay

pub mod app_bar;
pub mod sitemap_list;
pub mod status_bar;
pub mod toast;

pub use toast::ToastQueue;
