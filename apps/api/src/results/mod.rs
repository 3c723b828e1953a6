// Results view: the decode boundary for URL-transported skill lists,
// chart ranking and the selected-skill detail.

pub mod decoder;
pub mod handlers;
pub mod navigation;
pub mod render;
pub mod view;
