//! 程序入口：初始化日志、加载 Slint UI，并绑定 VM 回调

use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::Context;
use slint::{ComponentHandle, ModelRc, VecModel};
use tracing_subscriber::fmt::SubscriberBuilder;

slint::include_modules!();

mod model;
mod utils;
mod vm;

use model::{actions::AppState, visual_tree::TreeRow};
use vm::bridge::*;

// TreeRowData转换实现
impl From<&TreeRow> for TreeRowData {
    /// 将Rust TreeRow转换为Slint可用的数据结构
    fn from(row: &TreeRow) -> Self {
        Self {
            node_id: row.node_id as i32,
            depth: row.depth as i32,
            marker: row.marker.into(),
            has_toggle: row.has_toggle,
            label: row.label.clone().into(),
            glyph: row.glyph.into(),
            value_text: row.value_text.clone().into(),
            kind: format!("{:?}", row.kind).into(), // Object/Array/String等
        }
    }
}

/// VM桥接器：管理UI与数据层的交互
struct ViewModelBridge {
    app_state: Rc<RefCell<AppState>>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, app_state: Rc<RefCell<AppState>>) -> Self {
        let bridge = Self { app_state };
        bridge.setup_callbacks(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        let app_state = self.app_state.clone();

        // === 格式化回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_format_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_format(&app_window, &app_state);
                }
            });
        }

        // === 压缩回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_minify_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_minify(&app_window, &app_state);
                }
            });
        }

        // === 可视化回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_visualize_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_visualize(&app_window, &app_state);
                }
            });
        }

        // === 节点展开/折叠回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_toggle_node(move |node_id| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_toggle_node(&app_window, &app_state, node_id);
                }
            });
        }

        // === 打开文件回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_open_file(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_open_file(&app_window, &app_state);
                }
            });
        }

        // === 另存为回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_save_file(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_save_file(&app_window, &app_state);
                }
            });
        }

        // === 复制按钮回调 ===
        {
            let app_window_weak = app_window.as_weak();
            app_window.on_copy_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_copy_pressed(&app_window);
                }
            });
        }
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_status_message(STATUS_READY.into());
        app_window.set_input_text("".into());
        app_window.set_root_value_text("".into());

        // 设置空的树模型
        let empty_model = ModelRc::new(VecModel::<TreeRowData>::default());
        app_window.set_tree_model(empty_model);
    }

    /// 把输入区文本同步进状态（动作执行前调用）
    fn pull_input(app_window: &AppWindow, state: &mut AppState) {
        state.input = app_window.get_input_text().to_string();
    }

    /// 把状态里的输入与消息推回UI
    fn push_text_state(app_window: &AppWindow, state: &AppState) {
        app_window.set_input_text(state.input.clone().into());
        app_window.set_status_message(state.message.clone().into());
    }

    /// 把当前可见树行推送到 ListView 模型
    fn push_tree_model(app_window: &AppWindow, state: &AppState) {
        let rows: Vec<TreeRowData> = state.visible_rows().iter().map(TreeRowData::from).collect();
        app_window.set_tree_model(ModelRc::new(VecModel::from(rows)));
        app_window.set_root_value_text(state.root_value_text.clone().into());
    }

    /// 处理格式化操作
    fn handle_format(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let mut state = app_state.borrow_mut();
        Self::pull_input(app_window, &mut state);
        state.format();
        Self::push_text_state(app_window, &state);
        tracing::info!("格式化完成，输出 {} 字符", state.input.len());
    }

    /// 处理压缩操作
    fn handle_minify(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let mut state = app_state.borrow_mut();
        Self::pull_input(app_window, &mut state);
        state.minify();
        Self::push_text_state(app_window, &state);
        tracing::info!("压缩完成，输出 {} 字符", state.input.len());
    }

    /// 处理可视化操作
    fn handle_visualize(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let mut state = app_state.borrow_mut();
        Self::pull_input(app_window, &mut state);
        state.visualize();
        app_window.set_status_message(state.message.clone().into());
        Self::push_tree_model(app_window, &state);
        tracing::info!("可视化完成，可见行数: {}", state.visible_rows().len());
    }

    /// 处理节点展开/折叠切换
    fn handle_toggle_node(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>, node_id: i32) {
        let mut state = app_state.borrow_mut();
        state.toggle(node_id as u32);
        Self::push_tree_model(app_window, &state);
    }

    /// 显示文件选择对话框
    fn show_open_dialog() -> Option<PathBuf> {
        use rfd::FileDialog;

        FileDialog::new()
            .add_filter("JSON文件", &["json"])
            .add_filter("所有文件", &["*"])
            .set_title("选择要载入的JSON文件")
            .pick_file()
    }

    /// 处理打开文件操作：原始文本载入输入区，不在此处解析
    fn handle_open_file(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let file_path = match Self::show_open_dialog() {
            Some(path) => path,
            None => {
                app_window.set_status_message(STATUS_NO_FILE.into());
                tracing::info!("用户取消了文件选择");
                return;
            }
        };

        let mut state = app_state.borrow_mut();
        match state.open_file(&file_path) {
            Ok(()) => {
                app_window.set_input_text(state.input.clone().into());
                app_window
                    .set_status_message(format!("{}{}", STATUS_LOADED_PREFIX, file_path.display()).into());
                tracing::info!("文件载入成功: {}", file_path.display());
            }
            Err(e) => {
                app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
                tracing::error!("文件载入失败: {}", e);
            }
        }
    }

    /// 处理另存为操作
    fn handle_save_file(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        use rfd::FileDialog;

        let file_path = FileDialog::new()
            .add_filter("JSON文件", &["json"])
            .set_title("保存当前文本")
            .save_file();

        let file_path = match file_path {
            Some(path) => path,
            None => {
                app_window.set_status_message(STATUS_NO_FILE.into());
                return;
            }
        };

        let mut state = app_state.borrow_mut();
        Self::pull_input(app_window, &mut state);
        match state.save_file(&file_path) {
            Ok(()) => {
                app_window
                    .set_status_message(format!("{}{}", STATUS_SAVED_PREFIX, file_path.display()).into());
                tracing::info!("文件保存成功: {}", file_path.display());
            }
            Err(e) => {
                app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
                tracing::error!("文件保存失败: {}", e);
            }
        }
    }

    /// 处理复制按钮操作：复制输入区的当前文本
    fn handle_copy_pressed(app_window: &AppWindow) {
        let text = app_window.get_input_text().to_string();
        if text.trim().is_empty() {
            app_window.set_status_message(format!("{}没有可复制的内容", STATUS_ERROR_PREFIX).into());
            return;
        }

        match utils::clipboard::copy_to_clipboard(&text) {
            Ok(()) => {
                app_window.set_status_message(STATUS_COPIED.into());
                tracing::info!("内容已复制到剪贴板，长度: {} 字符", text.len());
            }
            Err(e) => {
                app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
                tracing::error!("复制失败: {}", e);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let app = AppWindow::new().context("UI 初始化失败")?;
    let state = Rc::new(RefCell::new(AppState::default()));

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, state.clone());
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run()?;
    Ok(())
}
