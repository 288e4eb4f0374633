//! 可视树（Visual Tree）：将解码后的 JSON 值转换为可折叠的嵌套树结构

use serde_json::Value;

/// JSON 节点类型（与 UI 展示解耦）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    fn of(v: &Value) -> NodeKind {
        match v {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    /// 容器类型指示符。固定为 "{}" / "[]"，不随元素数量变化
    pub fn type_glyph(self) -> Option<&'static str> {
        match self {
            NodeKind::Object => Some("{}"),
            NodeKind::Array => Some("[]"),
            _ => None,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

/// 可视树节点：与一个 JSON 值一一对应
#[derive(Debug, Clone)]
pub struct VisualNode {
    /// 构建时按先序分配的稳定编号（UI 折叠回调用它寻址节点）
    pub id: u32,
    /// 父级中的键名或索引；根节点为 None
    pub label: Option<String>,
    /// 节点类型
    pub kind: NodeKind,
    /// 子元素数量（对象字段数 / 数组长度，叶子为 0）
    pub child_count: u32,
    /// 叶子值的渲染文本（容器为空串）
    pub value_text: String,
    /// 是否展开，默认展开
    pub expanded: bool,
    /// 子节点，保持输入中的顺序
    pub children: Vec<VisualNode>,
}

/// 渲染叶子值：字符串加双引号，null 渲染为字面 null，数字/布尔取文本形式
pub fn render_value(v: &Value) -> String {
    match v {
        Value::String(s) => format!("\"{}\"", s),
        Value::Null => "null".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // 容器不会走到这里；兜底用紧凑序列化
        other => other.to_string(),
    }
}

/// 从解码后的 JSON 值构建可视树。
///
/// 顶层为容器时返回一个无标签的包装节点，其子节点即第一层条目；
/// 顶层为裸原始值时返回 None，由调用方直接展示 `render_value` 的结果。
pub fn build_tree(value: &Value, label: &str, is_root: bool) -> Option<VisualNode> {
    let mut next_id = 0u32;
    build_node(value, label, is_root, &mut next_id)
}

fn build_node(value: &Value, label: &str, is_root: bool, next_id: &mut u32) -> Option<VisualNode> {
    let kind = NodeKind::of(value);
    if !kind.is_container() && is_root {
        // 裸原始值不能作为树的根
        return None;
    }

    let id = *next_id;
    *next_id += 1;

    match value {
        Value::Object(map) => {
            // preserve_order 特性保证按插入顺序遍历
            let mut children = Vec::with_capacity(map.len());
            for (k, child) in map {
                if let Some(node) = build_node(child, k, false, next_id) {
                    children.push(node);
                }
            }
            Some(container_node(id, label, is_root, kind, children))
        }
        Value::Array(arr) => {
            let mut children = Vec::with_capacity(arr.len());
            for (idx, child) in arr.iter().enumerate() {
                if let Some(node) = build_node(child, &idx.to_string(), false, next_id) {
                    children.push(node);
                }
            }
            Some(container_node(id, label, is_root, kind, children))
        }
        leaf => Some(VisualNode {
            id,
            label: Some(label.to_string()),
            kind,
            child_count: 0,
            value_text: render_value(leaf),
            expanded: true,
            children: Vec::new(),
        }),
    }
}

fn container_node(id: u32, label: &str, is_root: bool, kind: NodeKind, children: Vec<VisualNode>) -> VisualNode {
    VisualNode {
        id,
        label: if is_root { None } else { Some(label.to_string()) },
        kind,
        child_count: children.len() as u32,
        value_text: String::new(),
        expanded: true,
        children,
    }
}

/// 折叠状态切换：纯状态转移 `(node_id, 当前树) -> 新树`。
///
/// 只有带子节点的节点响应切换；编号在树中唯一，一次点击只作用于一个节点
pub fn toggle_node(mut tree: VisualNode, node_id: u32) -> VisualNode {
    fn walk(node: &mut VisualNode, id: u32) -> bool {
        if node.id == id {
            if !node.children.is_empty() {
                node.expanded = !node.expanded;
            }
            return true;
        }
        node.children.iter_mut().any(|c| walk(c, id))
    }
    walk(&mut tree, node_id);
    tree
}

/// 统计树中的节点总数（含根包装节点）
pub fn node_count(tree: &VisualNode) -> usize {
    1 + tree.children.iter().map(node_count).sum::<usize>()
}

/// 树视图的一行：供 Slint ListView 使用的扁平化表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub node_id: u32,
    pub depth: u32,
    /// 折叠标记："-" 展开 / "+" 折叠 / " " 占位对齐
    pub marker: &'static str,
    pub has_toggle: bool,
    /// `"<label>:"` 形式的标签
    pub label: String,
    /// 容器类型指示符（叶子为空串）
    pub glyph: &'static str,
    pub value_text: String,
    pub kind: NodeKind,
}

/// 将可视树扁平化为可见行。
///
/// 根包装节点本身不产生行，其子节点从深度 0 开始；
/// 折叠节点的子树保留在内存中，只是不再产生行
pub fn flatten_visible(tree: &VisualNode) -> Vec<TreeRow> {
    fn emit(node: &VisualNode, depth: u32, out: &mut Vec<TreeRow>) {
        let has_toggle = !node.children.is_empty();
        let marker = if !node.kind.is_container() || !has_toggle {
            " "
        } else if node.expanded {
            "-"
        } else {
            "+"
        };
        out.push(TreeRow {
            node_id: node.id,
            depth,
            marker,
            has_toggle,
            label: match &node.label {
                Some(l) => format!("{}:", l),
                None => String::new(),
            },
            glyph: node.kind.type_glyph().unwrap_or(""),
            value_text: node.value_text.clone(),
            kind: node.kind,
        });
        if node.expanded {
            for child in &node.children {
                emit(child, depth + 1, out);
            }
        }
    }

    let mut out = Vec::with_capacity(64);
    for child in &tree.children {
        emit(child, 0, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_root_yields_none() {
        assert!(build_tree(&json!(42), "root", true).is_none());
        assert!(build_tree(&json!("文本"), "root", true).is_none());
        assert!(build_tree(&json!(null), "root", true).is_none());
        assert!(build_tree(&json!(true), "root", true).is_none());
    }

    #[test]
    fn test_container_root_is_plain_wrapper() {
        let tree = build_tree(&json!({"a": 1}), "root", true).expect("容器根应该产生节点");
        assert_eq!(tree.label, None, "根包装节点不应携带标签");
        assert_eq!(tree.kind, NodeKind::Object);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].label.as_deref(), Some("a"));
    }

    #[test]
    fn test_node_count_matches_value_count() {
        // 值总数：根 + a + b + 2个数组元素 + c + 嵌套对象 + d = 8
        let json = json!({
            "a": 1,
            "b": [true, null],
            "c": {"d": "x"}
        });
        let tree = build_tree(&json, "root", true).unwrap();
        assert_eq!(node_count(&tree), 8, "每个嵌套值恰好对应一个节点");
    }

    #[test]
    fn test_object_key_order_preserved() {
        // 故意用非字母序的键，preserve_order 下应保持输入顺序
        let json: Value = serde_json::from_str(r#"{"zebra":1,"apple":2,"mango":3}"#).unwrap();
        let tree = build_tree(&json, "root", true).unwrap();
        let labels: Vec<_> = tree
            .children
            .iter()
            .map(|n| n.label.as_deref().unwrap())
            .collect();
        assert_eq!(labels, vec!["zebra", "apple", "mango"], "对象键应保持插入顺序");
    }

    #[test]
    fn test_array_children_indexed_in_order() {
        let tree = build_tree(&json!(["x", "y", "z"]), "root", true).unwrap();
        let labels: Vec<_> = tree
            .children
            .iter()
            .map(|n| n.label.as_deref().unwrap())
            .collect();
        assert_eq!(labels, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_scenario_a_structure() {
        let json: Value = serde_json::from_str(r#"{"a":1,"b":[true,null]}"#).unwrap();
        let tree = build_tree(&json, "root", true).unwrap();

        assert_eq!(tree.children.len(), 2);

        let a = &tree.children[0];
        assert_eq!(a.label.as_deref(), Some("a"));
        assert_eq!(a.kind, NodeKind::Number);
        assert_eq!(a.value_text, "1");

        let b = &tree.children[1];
        assert_eq!(b.label.as_deref(), Some("b"));
        assert_eq!(b.kind, NodeKind::Array);
        assert_eq!(b.child_count, 2);
        assert_eq!(b.children[0].label.as_deref(), Some("0"));
        assert_eq!(b.children[0].value_text, "true");
        assert_eq!(b.children[1].label.as_deref(), Some("1"));
        assert_eq!(b.children[1].value_text, "null");
    }

    #[test]
    fn test_render_value_forms() {
        assert_eq!(render_value(&json!("你好")), "\"你好\"");
        assert_eq!(render_value(&json!(null)), "null");
        assert_eq!(render_value(&json!(3.5)), "3.5");
        assert_eq!(render_value(&json!(false)), "false");
    }

    #[test]
    fn test_type_glyph_constant_regardless_of_count() {
        let empty = build_tree(&json!({"e": {}, "f": []}), "root", true).unwrap();
        let full = build_tree(&json!({"e": {"x": 1}, "f": [1, 2]}), "root", true).unwrap();
        // 指示符与元素数量无关
        assert_eq!(empty.children[0].kind.type_glyph(), Some("{}"));
        assert_eq!(full.children[0].kind.type_glyph(), Some("{}"));
        assert_eq!(empty.children[1].kind.type_glyph(), Some("[]"));
        assert_eq!(full.children[1].kind.type_glyph(), Some("[]"));
    }

    #[test]
    fn test_empty_container_has_no_toggle_row() {
        let tree = build_tree(&json!({"empty": {}, "full": {"x": 1}}), "root", true).unwrap();
        let rows = flatten_visible(&tree);

        let empty_row = rows.iter().find(|r| r.label == "empty:").unwrap();
        assert!(!empty_row.has_toggle, "空容器应使用占位符而非折叠标记");
        assert_eq!(empty_row.marker, " ");
        assert_eq!(empty_row.glyph, "{}");

        let full_row = rows.iter().find(|r| r.label == "full:").unwrap();
        assert!(full_row.has_toggle);
        assert_eq!(full_row.marker, "-", "有子节点的容器默认展开");
    }

    #[test]
    fn test_flatten_skips_root_wrapper() {
        let tree = build_tree(&json!({"a": 1, "b": 2}), "root", true).unwrap();
        let rows = flatten_visible(&tree);
        assert_eq!(rows.len(), 2, "根包装节点不应产生行");
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[0].label, "a:");
        assert_eq!(rows[1].label, "b:");
    }

    #[test]
    fn test_scenario_e_toggle_round_trip() {
        let json = json!({"b": [true, null]});
        let tree = build_tree(&json, "root", true).unwrap();
        let rows = flatten_visible(&tree);
        assert_eq!(rows.len(), 3, "展开状态应显示 b 和两个数组元素");

        let b_id = rows.iter().find(|r| r.label == "b:").unwrap().node_id;

        // 折叠：子行隐藏，标记翻转为 "+"
        let tree = toggle_node(tree, b_id);
        let rows = flatten_visible(&tree);
        assert_eq!(rows.len(), 1, "折叠后子行应隐藏");
        assert_eq!(rows[0].marker, "+");
        // 子树仍然完整保留在内存中
        assert_eq!(tree.children[0].children.len(), 2);

        // 再次切换：完全恢复
        let tree = toggle_node(tree, b_id);
        let rows = flatten_visible(&tree);
        assert_eq!(rows.len(), 3, "再次切换应恢复全部子行");
        let b_row = rows.iter().find(|r| r.label == "b:").unwrap();
        assert_eq!(b_row.marker, "-");
    }

    #[test]
    fn test_toggle_only_affects_target_node() {
        let json = json!({"x": {"a": 1}, "y": {"b": 2}});
        let tree = build_tree(&json, "root", true).unwrap();
        let x_id = tree.children[0].id;

        let tree = toggle_node(tree, x_id);
        assert!(!tree.children[0].expanded, "目标节点应被折叠");
        assert!(tree.children[1].expanded, "兄弟节点不应受影响");
        assert!(tree.expanded, "祖先节点不应受影响");
    }

    #[test]
    fn test_toggle_ignores_childless_container() {
        let tree = build_tree(&json!({"empty": []}), "root", true).unwrap();
        let empty_id = tree.children[0].id;
        let tree = toggle_node(tree, empty_id);
        assert!(tree.children[0].expanded, "无子节点的容器不响应切换");
    }

    #[test]
    fn test_collapsed_nested_subtree_hidden() {
        let json = json!({"outer": {"inner": {"leaf": 1}}});
        let tree = build_tree(&json, "root", true).unwrap();
        let outer_id = tree.children[0].id;

        let tree = toggle_node(tree, outer_id);
        let rows = flatten_visible(&tree);
        assert_eq!(rows.len(), 1, "折叠 outer 应隐藏整个子树");
        assert_eq!(rows[0].label, "outer:");
    }

    #[test]
    fn test_row_depth_follows_nesting() {
        let json = json!({"a": {"b": {"c": 1}}});
        let tree = build_tree(&json, "root", true).unwrap();
        let rows = flatten_visible(&tree);
        let depths: Vec<_> = rows.iter().map(|r| (r.label.as_str(), r.depth)).collect();
        assert_eq!(depths, vec![("a:", 0), ("b:", 1), ("c:", 2)]);
    }
}
