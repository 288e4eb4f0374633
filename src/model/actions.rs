//! AppState：应用核心状态与三个动作（格式化 / 压缩 / 可视化）
//!
//! 所有可变 UI 状态集中在显式的状态结构体中，动作在其上同步执行，
//! 与任何显示层解耦，便于单元测试

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::model::visual_tree::{build_tree, flatten_visible, render_value, toggle_node, TreeRow, VisualNode};
use crate::utils::fs::{read_text_file, write_text_file};

// === 用户可见消息（空输入按动作措辞，解析失败附带底层解析器诊断） ===
pub const MSG_EMPTY_FORMAT: &str = "Textarea is empty. Nothing to format.";
pub const MSG_EMPTY_MINIFY: &str = "Textarea is empty. Nothing to minify.";
pub const MSG_EMPTY_VISUALIZE: &str = "Textarea is empty. Nothing to visualize.";

#[derive(Debug, Default)]
pub struct AppState {
    /// 输入区的原始 JSON 文本
    pub input: String,
    /// 当前状态/错误消息；每个动作开始时清空，至多设置一次
    pub message: String,
    /// 当前可视树（顶层为容器时）
    pub tree: Option<VisualNode>,
    /// 顶层为裸原始值时直接展示的文本
    pub root_value_text: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
}

impl AppState {
    /// 格式化：解析后按 2 空格缩进重新序列化，结果替换输入文本
    pub fn format(&mut self) {
        self.reserialize(true, MSG_EMPTY_FORMAT, "format");
    }

    /// 压缩：解析后不带空白重新序列化，结果替换输入文本
    pub fn minify(&mut self) {
        self.reserialize(false, MSG_EMPTY_MINIFY, "minify");
    }

    fn reserialize(&mut self, pretty: bool, empty_msg: &str, verb: &str) {
        self.message.clear();
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.message = empty_msg.to_string();
            return;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => {
                // serde_json 的 pretty 输出即 2 空格缩进
                self.input = if pretty {
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| trimmed.to_string())
                } else {
                    serde_json::to_string(&value).unwrap_or_else(|_| trimmed.to_string())
                };
            }
            Err(e) => {
                // 解析失败不越过动作边界：转为用户可见消息，输入保持原样
                self.message = format!("Invalid JSON: Cannot {}. {}", verb, e);
                tracing::warn!("JSON 解析失败（{}）: {}", verb, e);
            }
        }
    }

    /// 可视化：清空旧树与消息后解析输入并构建可视树。
    /// 顶层为裸原始值时不建树，直接记录其渲染文本
    pub fn visualize(&mut self) {
        self.message.clear();
        self.tree = None;
        self.root_value_text.clear();

        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.message = MSG_EMPTY_VISUALIZE.to_string();
            return;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => match build_tree(&value, "root", true) {
                Some(tree) => {
                    tracing::info!("可视树构建成功，共 {} 个节点", crate::model::visual_tree::node_count(&tree));
                    self.tree = Some(tree);
                }
                None => {
                    self.root_value_text = render_value(&value);
                }
            },
            Err(e) => {
                self.message = format!("Invalid JSON: Cannot visualize. {}", e);
                tracing::warn!("JSON 解析失败（visualize）: {}", e);
            }
        }
    }

    /// 切换指定编号节点的折叠状态（只影响该节点的显示，不影响数据）
    pub fn toggle(&mut self, node_id: u32) {
        if let Some(tree) = self.tree.take() {
            self.tree = Some(toggle_node(tree, node_id));
        }
    }

    /// 当前可见的树行（已按展开状态过滤）
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        self.tree.as_ref().map(flatten_visible).unwrap_or_default()
    }

    /// 将文件的原始文本载入输入区（不在此处解析，错误在下一个动作中暴露）
    pub fn open_file(&mut self, p: &Path) -> Result<(), AppError> {
        self.input = read_text_file(p)?;
        self.message.clear();
        Ok(())
    }

    /// 将当前输入文本另存到指定路径
    pub fn save_file(&self, p: &Path) -> Result<(), AppError> {
        write_text_file(p, &self.input)?;
        Ok(())
    }
}
