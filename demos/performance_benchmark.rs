//! 性能基准演示：不启动UI，直接跑模型层的综合性能测试

use json_shu_gongju::model::performance::run_performance_suite;

fn main() {
    println!("=== JSON 树视图工具 性能基准 ===\n");

    let results = run_performance_suite();

    let mut ok = 0usize;
    for r in &results {
        let flag = if r.success { "通过" } else { "失败" };
        println!("[{}] {} - {}ms ({})", flag, r.operation, r.duration_ms, r.details);
        if r.success {
            ok += 1;
        }
    }

    println!("\n共 {} 项，其中 {} 项成功", results.len(), ok);
}
