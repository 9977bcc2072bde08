// ==========================================
// 聚合物需求看板 - 报表 API
// ==========================================
// 职责: 加载工作簿 → 引擎计算 → 报表 DTO
// 缓存: 持有 TableCache，按 (路径, 工作表, 表头行) 复用已解析的表
// 失效: 仅通过 clear_cache / invalidate 显式失效
// 红线: 每个报表独立失败，错误以 ApiError 返回，不 panic
// ==========================================

use crate::api::dto::{
    AvailablePeriods, ChartPoint, ChartSeries, CompoundDistribution, DemandReport,
    MaterialDetail, TrackingReport,
};
use crate::api::error::{ApiError, ApiResult};
use crate::config::DashboardConfig;
use crate::domain::totals::DemandSummary;
use crate::domain::tracking::ProductionDay;
use crate::domain::types::Month;
use crate::engine::demand::{sum_column, DemandAggregator};
use crate::engine::normalizer::AliasTable;
use crate::engine::reconcile::{reconcile, shortfalls};
use crate::engine::stock::StockAggregator;
use crate::engine::tracking::{load_tracking_sheet, parse_month_sheet, summarize};
use crate::i18n::t;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::sheet_cache::{TableCache, TableKey};
use crate::importer::sheet_loader_trait::SheetLoader;
use crate::importer::table::RawTable;
use crate::perf::PerfGuard;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// ReportApi
// ==========================================
pub struct ReportApi {
    config: DashboardConfig,
    loader: Arc<dyn SheetLoader>,
    cache: TableCache,
    aliases: AliasTable,
}

impl ReportApi {
    /// 创建报表 API
    ///
    /// # 参数
    /// - config: 看板配置（已校验）
    /// - loader: 工作簿读取实现
    pub fn new(config: DashboardConfig, loader: Arc<dyn SheetLoader>) -> Self {
        let aliases = AliasTable::new(&config.aliases);
        tracing::debug!(aliases = aliases.len(), "报表 API 初始化");
        Self {
            config,
            loader,
            cache: TableCache::new(),
            aliases,
        }
    }

    /// 使用按扩展名分派的默认解析器
    pub fn with_default_loader(config: DashboardConfig) -> Self {
        Self::new(config, Arc::new(UniversalFileParser))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ==========================================
    // 缓存管理
    // ==========================================

    /// 清空所有已缓存的工作表
    pub fn clear_cache(&self) {
        tracing::info!(entries = self.cache.len(), "清空工作表缓存");
        self.cache.clear();
    }

    /// 使单个工作表缓存失效（相对路径按 base_dir 解析）
    pub fn invalidate(&self, path: &Path, sheet: &str, header_row: usize) -> bool {
        let key = TableKey::new(self.config.resolve(path), sheet, header_row);
        self.cache.invalidate(&key)
    }

    pub fn cached_tables(&self) -> usize {
        self.cache.len()
    }

    fn load(&self, path: &Path, sheet: &str, header_row: usize) -> ApiResult<Arc<RawTable>> {
        let resolved = self.config.resolve(path);
        Ok(self
            .cache
            .get_or_load(self.loader.as_ref(), &resolved, sheet, header_row)?)
    }

    // ==========================================
    // 生产计划（需求）
    // ==========================================

    fn production_summary(&self) -> ApiResult<(DemandSummary, Option<f64>)> {
        let layout = &self.config.production;
        let table = self.load(&layout.path, &layout.sheet, layout.header_row)?;

        let aggregator = DemandAggregator::new(&self.aliases);
        let records = aggregator.load_records(&table, layout)?;
        let summary = aggregator.aggregate(&records, &layout.quantities);

        let total_hours = layout
            .hours_column
            .as_deref()
            .and_then(|column| sum_column(&table, column));

        Ok((summary, total_hours))
    }

    /// 需求/库存对账报表
    ///
    /// # 返回
    /// - Ok(DemandReport): 对账行、缺口列表、颜色明细、分布、图表
    /// - Err(FileNotFound / MissingSheetOrColumn / NoValidStockColumn)
    #[instrument(skip(self))]
    pub fn demand_report(&self) -> ApiResult<DemandReport> {
        let _perf = PerfGuard::new("demand_report");

        let (summary, total_hours) = self.production_summary()?;

        let layout = &self.config.stock;
        let stock_table = self.load(&layout.path, &layout.sheet, layout.header_row)?;
        let stock = StockAggregator::new(&self.aliases).aggregate_with_layout(&stock_table, layout)?;

        let rows = reconcile(&summary.totals, &stock);
        let shortfall_rows = shortfalls(&rows);

        let details = summary
            .totals
            .by_material
            .iter()
            .map(|(material, total)| MaterialDetail {
                material: material.clone(),
                total: *total,
                colors: summary
                    .by_color
                    .colors_for(material)
                    .into_iter()
                    .map(|(color, quantity)| ChartPoint::new(color, quantity))
                    .collect(),
            })
            .collect();

        let distribution = summary.distribution();
        let charts = vec![
            ChartSeries::new(
                t("common.demand"),
                rows.iter().map(|r| ChartPoint::new(r.material.clone(), r.demand)).collect(),
            ),
            ChartSeries::new(
                t("common.stock"),
                rows.iter().map(|r| ChartPoint::new(r.material.clone(), r.stock)).collect(),
            ),
            ChartSeries::new(
                t("chart.balance"),
                rows.iter().map(|r| ChartPoint::new(r.material.clone(), r.balance)).collect(),
            ),
        ];

        tracing::info!(
            rows = rows.len(),
            shortfalls = shortfall_rows.len(),
            stock_column = %stock.source_column,
            "对账报表生成完成"
        );

        Ok(DemandReport {
            rows,
            shortfalls: shortfall_rows,
            details,
            distribution: distribution
                .into_iter()
                .map(|(material, quantity)| ChartPoint::new(material, quantity))
                .collect(),
            total_hours,
            stock_column: stock.source_column,
            charts,
        })
    }

    /// 配料分布报表（只读取生产计划）
    #[instrument(skip(self))]
    pub fn compound_distribution(&self) -> ApiResult<CompoundDistribution> {
        let _perf = PerfGuard::new("compound_distribution");

        let (summary, total_hours) = self.production_summary()?;
        let distribution = summary.distribution();

        Ok(CompoundDistribution {
            total: summary.totals.total(),
            total_hours,
            chart: ChartSeries::from_pairs(t("chart.compound_distribution"), &distribution),
            distribution: distribution
                .into_iter()
                .map(|(material, quantity)| ChartPoint::new(material, quantity))
                .collect(),
        })
    }

    // ==========================================
    // 生产跟踪
    // ==========================================

    fn month_sheets(&self) -> ApiResult<Vec<(String, Month, i32)>> {
        let path = self.config.resolve(&self.config.tracking.path);
        let sheets = self.loader.sheet_names(&path)?;

        Ok(sheets
            .into_iter()
            .filter_map(|name| match parse_month_sheet(&name) {
                Some((month, year)) => Some((name, month, year)),
                None => {
                    tracing::debug!(sheet = %name, "非月度工作表，忽略");
                    None
                }
            })
            .collect())
    }

    /// 跟踪工作簿中可选的年份与月份
    #[instrument(skip(self))]
    pub fn available_periods(&self) -> ApiResult<AvailablePeriods> {
        let sheets = self.month_sheets()?;

        let years: BTreeSet<i32> = sheets.iter().map(|(_, _, year)| *year).collect();
        let months: BTreeSet<Month> = sheets.iter().map(|(_, month, _)| *month).collect();

        Ok(AvailablePeriods {
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
            sheets: sheets.into_iter().map(|(name, _, _)| name).collect(),
        })
    }

    /// 生产跟踪报表
    ///
    /// # 参数
    /// - years / months: 筛选条件，任一为空返回空报表
    #[instrument(skip(self))]
    pub fn tracking_report(&self, years: &[i32], months: &[Month]) -> ApiResult<TrackingReport> {
        let _perf = PerfGuard::new("tracking_report");

        let layout = &self.config.tracking;
        let mut days: Vec<ProductionDay> = Vec::new();

        if !years.is_empty() && !months.is_empty() {
            for (sheet, month, year) in self.month_sheets()? {
                if !years.contains(&year) || !months.contains(&month) {
                    continue;
                }
                let table = self.load(&layout.path, &sheet, layout.header_row)?;
                days.extend(load_tracking_sheet(&table, layout, month, year)?);
            }
        }

        let summary = summarize(&days, years, months);
        let charts = vec![
            ChartSeries::new(
                t("chart.copper_by_month"),
                summary
                    .by_month
                    .iter()
                    .map(|m| ChartPoint::new(m.label(), m.copper_done))
                    .collect(),
            ),
            ChartSeries::new(
                t("chart.aluminium_by_month"),
                summary
                    .by_month
                    .iter()
                    .map(|m| ChartPoint::new(m.label(), m.aluminium_done))
                    .collect(),
            ),
        ];

        tracing::info!(
            days = summary.days.len(),
            months = summary.by_month.len(),
            "跟踪报表生成完成"
        );

        Ok(TrackingReport {
            years: years.to_vec(),
            months: months.to_vec(),
            summary,
            charts,
        })
    }
}

/// 配置无效时直接拒绝创建
impl TryFrom<DashboardConfig> for ReportApi {
    type Error = ApiError;

    fn try_from(config: DashboardConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self::with_default_loader(config))
    }
}
