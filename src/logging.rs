// ==========================================
// 聚合物需求看板 - 日志初始化
// ==========================================
// tracing-subscriber: EnvFilter + fmt（文本或 JSON 行）
// 日志只写 stderr，stdout 留给报表表格
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 设为 1/true/yes/on 时输出 JSON 行日志
pub const ENV_LOG_JSON: &str = "POLYMER_DEMAND_LOG_JSON";

/// 解析 JSON 开关取值（未设置或无法识别视为关闭）
pub fn json_enabled(value: Option<&str>) -> bool {
    value
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// 初始化日志
///
/// # 环境变量
/// - RUST_LOG: 过滤器，默认 info（如 `RUST_LOG=polymer_demand::engine=debug`）
/// - POLYMER_DEMAND_LOG_JSON: 见 [`ENV_LOG_JSON`]
///
/// # 示例
/// ```no_run
/// polymer_demand::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = json_enabled(std::env::var(ENV_LOG_JSON).ok().as_deref());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// 测试用：debug 级别，输出交给测试框架捕获；重复调用无副作用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
