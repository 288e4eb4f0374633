//! 性能基准测试模块
//!
//! 用于测试大文档解析、可视树构建与扁平化的性能
//! 目标：中等规模文档（数万节点）各阶段均在亚秒级完成，UI保持响应

use std::time::Instant;

use serde_json::{json, Value};

use crate::model::actions::AppState;
use crate::model::visual_tree::{build_tree, flatten_visible, node_count};

/// 性能测试结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

/// 生成大型测试JSON数据
pub fn generate_large_json(depth: usize, width: usize) -> Value {
    fn create_nested_object(current_depth: usize, max_depth: usize, width: usize) -> Value {
        if current_depth >= max_depth {
            return json!("叶子节点值");
        }

        let mut obj = serde_json::Map::new();

        // 混合各种类型的字段
        for i in 0..width {
            let key = format!("field_{}", i);
            let value = match i % 5 {
                0 => json!(format!("字符串值_{}", i)),
                1 => json!(i as i64),
                2 => json!(i % 2 == 0),
                3 => json!([1, 2, 3, i]),
                4 => create_nested_object(current_depth + 1, max_depth, width / 2),
                _ => json!(null),
            };
            obj.insert(key, value);
        }

        Value::Object(obj)
    }

    let mut root = serde_json::Map::new();
    root.insert(
        "metadata".to_string(),
        json!({
            "depth": depth,
            "width": width,
            "description": "性能测试用大型JSON文档"
        }),
    );

    root.insert("data".to_string(), create_nested_object(0, depth, width));

    let large_array: Vec<Value> = (0..width * 10)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("项目_{}", i),
                "active": i % 3 == 0
            })
        })
        .collect();
    root.insert("items".to_string(), json!(large_array));

    Value::Object(root)
}

/// 测试可视树构建性能
pub fn benchmark_tree_build(json_data: &Value) -> PerformanceResult {
    let start = Instant::now();
    let tree = build_tree(json_data, "root", true);
    let duration = start.elapsed();

    match tree {
        Some(tree) => PerformanceResult::new(
            "可视树构建",
            duration.as_millis(),
            true,
            &format!("构建了 {} 个节点", node_count(&tree)),
        ),
        None => PerformanceResult::new("可视树构建", duration.as_millis(), false, "顶层不是容器"),
    }
}

/// 测试扁平化（全展开状态下的可见行生成）性能
pub fn benchmark_flatten(json_data: &Value) -> PerformanceResult {
    let tree = match build_tree(json_data, "root", true) {
        Some(t) => t,
        None => return PerformanceResult::new("扁平化", 0, false, "顶层不是容器"),
    };

    let start = Instant::now();
    let rows = flatten_visible(&tree);
    let duration = start.elapsed();

    PerformanceResult::new(
        "扁平化",
        duration.as_millis(),
        true,
        &format!("生成了 {} 行", rows.len()),
    )
}

/// 测试JSON解析性能
pub fn benchmark_json_parsing(json_str: &str) -> PerformanceResult {
    let start = Instant::now();
    let parse_result = serde_json::from_str::<Value>(json_str);
    let duration = start.elapsed();

    match parse_result {
        Ok(_) => PerformanceResult::new(
            "JSON解析",
            duration.as_millis(),
            true,
            &format!("解析了 {} 字节的JSON", json_str.len()),
        ),
        Err(e) => PerformanceResult::new(
            "JSON解析",
            duration.as_millis(),
            false,
            &format!("解析失败: {}", e),
        ),
    }
}

/// 测试格式化/压缩动作性能
pub fn benchmark_reformat(json_str: &str) -> Vec<PerformanceResult> {
    let mut results = Vec::new();

    let mut state = AppState {
        input: json_str.to_string(),
        ..AppState::default()
    };
    let start = Instant::now();
    state.format();
    results.push(PerformanceResult::new(
        "格式化",
        start.elapsed().as_millis(),
        state.message.is_empty(),
        &format!("输出 {} 字符", state.input.len()),
    ));

    let start = Instant::now();
    state.minify();
    results.push(PerformanceResult::new(
        "压缩",
        start.elapsed().as_millis(),
        state.message.is_empty(),
        &format!("输出 {} 字符", state.input.len()),
    ));

    results
}

/// 运行综合性能测试
pub fn run_performance_suite() -> Vec<PerformanceResult> {
    let mut results = Vec::new();

    // 测试不同规模的数据
    let test_cases = [
        (3, 10), // 小型：深度3，宽度10
        (4, 20), // 中型：深度4，宽度20
        (5, 30), // 大型：深度5，宽度30
    ];

    for (depth, width) in test_cases {
        println!("测试规模：深度{}，宽度{}", depth, width);

        let start = Instant::now();
        let json_data = generate_large_json(depth, width);
        let generation_time = start.elapsed();

        results.push(PerformanceResult::new(
            &format!("数据生成({}x{})", depth, width),
            generation_time.as_millis(),
            true,
            &format!("生成了深度{}宽度{}的JSON", depth, width),
        ));

        let start = Instant::now();
        let json_str = match serde_json::to_string(&json_data) {
            Ok(s) => s,
            Err(e) => {
                results.push(PerformanceResult::new(
                    &format!("JSON序列化({}x{})", depth, width),
                    start.elapsed().as_millis(),
                    false,
                    &format!("序列化失败: {}", e),
                ));
                continue;
            }
        };
        results.push(PerformanceResult::new(
            &format!("JSON序列化({}x{})", depth, width),
            start.elapsed().as_millis(),
            true,
            &format!("序列化了 {} 字节", json_str.len()),
        ));

        results.push(benchmark_json_parsing(&json_str));
        results.push(benchmark_tree_build(&json_data));
        results.push(benchmark_flatten(&json_data));
        results.extend(benchmark_reformat(&json_str));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_large_json() {
        let json = generate_large_json(2, 3);
        assert!(json.is_object());

        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("metadata"));
        assert!(obj.contains_key("data"));
        assert!(obj.contains_key("items"));
    }

    #[test]
    fn test_performance_benchmarks() {
        let json = generate_large_json(2, 5);

        let tree_result = benchmark_tree_build(&json);
        assert!(tree_result.success);
        assert!(tree_result.duration_ms < 1000); // 应该在1秒内完成

        let json_str = serde_json::to_string(&json).unwrap();
        let parse_result = benchmark_json_parsing(&json_str);
        assert!(parse_result.success);
        assert!(parse_result.duration_ms < 1000); // 应该在1秒内完成

        for r in benchmark_reformat(&json_str) {
            assert!(r.success, "格式化/压缩应该成功: {:?}", r);
        }
    }
}
