pub mod actions;
pub mod performance;
pub mod visual_tree;
