//! JSON 格式化与树视图工具库
//!
//! 提供JSON文本的格式化、压缩与可折叠树视图构建功能
//! 遵循MVVM架构模式，所有动作在显式的AppState上同步执行

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::actions::{AppState, AppError};
pub use model::visual_tree::{
    build_tree, flatten_visible, node_count, render_value, toggle_node, NodeKind, TreeRow,
    VisualNode,
};
