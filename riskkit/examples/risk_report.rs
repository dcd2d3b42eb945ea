use riskkit::{
    config::RiskConfig,
    logging::init_logging,
    returns::Returns,
    statistic::{metric::var::var_historic_value, summary::RiskSummaryGenerator},
};
use serde_json::json;
use tracing::info;

/// 风险配置文件路径。
const FILE_PATH_RISK_CONFIG: &str = "riskkit/examples/config/risk_config.json";

/// 示例：对两列月度收益率计算风险摘要。
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志追踪
    init_logging();

    // 加载风险配置
    let config = RiskConfig::load(FILE_PATH_RISK_CONFIG)?;

    // 动态 JSON 输入：值为数字数组的对象是收益率表，null 表示缺失值
    let input = json!({
        "SmallCap": [0.052, -0.081, 0.113, -0.142, 0.027, null, 0.064, -0.038, 0.091, -0.017, 0.045, -0.102],
        "LargeCap": [0.021, -0.034, 0.041, -0.056, 0.012, 0.018, 0.026, -0.011, 0.037, -0.004, 0.019, -0.045],
    });

    let var = var_historic_value(input.clone(), config.var_level)?;
    info!(?var, level = config.var_level, "historic VaR");

    let Returns::Table(table) = Returns::try_from(input)? else {
        return Err("expected a table of returns".into());
    };

    // 每列的回撤表
    for (name, drawdown) in table.drawdown() {
        if let Some(max) = drawdown.max_drawdown() {
            info!(%name, value = max.value(), peak = max.peak(), trough = max.trough(), "max drawdown");
        }
    }

    // 打印风险摘要
    RiskSummaryGenerator::new(config)?
        .generate_table(&table)
        .printstd();

    // 单个数字不是收益率序列
    if let Err(error) = var_historic_value(json!(0.05), config.var_level) {
        info!(%error, "scalar input rejected");
    }

    Ok(())
}
