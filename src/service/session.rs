use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::error::EngineError;
use crate::gateway::{CatalogGateway, DocumentGateway, NavigationSink, NotificationSink};
use crate::models::{CatalogSnapshot, DocumentKind, LineItem};
use crate::service::draft::{OriginalSnapshot, WorkingDraft};
use crate::service::submit::{SubmissionOrchestrator, SubmitPhase};

/// 录入界面会话的外部依赖
#[derive(Clone)]
pub struct SessionDeps {
    pub catalog: Arc<dyn CatalogGateway>,
    pub store: Arc<dyn DocumentGateway>,
    pub notifier: Arc<dyn NotificationSink>,
    pub navigator: Arc<dyn NavigationSink>,
    pub config: AppConfig,
}

/// 录入界面会话 - 独占一份工作草稿, 编辑模式下另持一份原始快照
///
/// 每个界面实例一个状态, 取代跨界面共享的全局 loading 标志。
/// 提交在途或会话已结束时拒绝一切修改。
pub struct CompositionSession {
    catalog: CatalogSnapshot,
    draft: WorkingDraft,
    original: Option<OriginalSnapshot>,
    orchestrator: SubmissionOrchestrator,
    closed: bool,
}

impl CompositionSession {
    /// 新增模式打开界面: 空草稿
    pub async fn open_new(kind: DocumentKind, deps: SessionDeps) -> Result<Self, EngineError> {
        let catalog = deps.catalog.fetch_catalog(true).await?;
        tracing::info!(
            "打开{:?}新增界面: {} 个商品, {} 个客户",
            kind,
            catalog.products.len(),
            catalog.customers.len()
        );
        Ok(Self {
            catalog,
            draft: WorkingDraft::empty(kind),
            original: None,
            orchestrator: SubmissionOrchestrator::new(
                deps.store,
                deps.notifier,
                deps.navigator,
                deps.config,
            ),
            closed: false,
        })
    }

    /// 编辑模式打开界面: 拉取单据、回填草稿并冻结原始快照
    pub async fn open_edit(
        kind: DocumentKind,
        document_id: i64,
        deps: SessionDeps,
    ) -> Result<Self, EngineError> {
        let catalog = deps.catalog.fetch_catalog(true).await?;
        let doc = deps.store.fetch_document(kind, document_id).await?;
        let draft = WorkingDraft::hydrate(&doc, &catalog);
        let original = OriginalSnapshot::capture(&draft);
        tracing::info!("打开{:?}编辑界面: 单据 {}, {} 行明细", kind, document_id, draft.items.len());
        Ok(Self {
            catalog,
            draft,
            original: Some(original),
            orchestrator: SubmissionOrchestrator::new(
                deps.store,
                deps.notifier,
                deps.navigator,
                deps.config,
            ),
            closed: false,
        })
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.draft.items.iter()
    }

    /// 提交成功后会话结束, 草稿已丢弃
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn editable(&self) -> bool {
        !self.closed && !self.orchestrator.is_busy()
    }

    // ---- 明细行操作 (目录勾选 / 数量录入) ----

    /// 勾选开关: 已选则移除, 未选则选入。目录中不存在的商品忽略。
    pub fn toggle_product(&mut self, product_id: i64) {
        if !self.editable() {
            return;
        }
        let Some(product) = self.catalog.product(product_id) else {
            tracing::warn!("勾选的商品 {} 不在目录快照中, 忽略", product_id);
            return;
        };
        self.draft.items.toggle(product.clone());
    }

    pub fn remove_line(&mut self, product_id: i64) {
        if self.editable() {
            self.draft.items.remove(product_id);
        }
    }

    pub fn set_amount(&mut self, index: usize, raw: &str) {
        if self.editable() {
            self.draft.items.set_amount(index, raw);
        }
    }

    // ---- 表头操作 ----

    pub fn set_customer(&mut self, customer_id: Option<i64>) {
        if self.editable() {
            self.draft.set_customer(customer_id);
        }
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        if self.editable() {
            self.draft.set_date(date);
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        if self.editable() {
            self.draft.set_notes(notes);
        }
    }

    pub fn set_discount(&mut self, discount: BigDecimal) {
        if self.editable() {
            self.draft.set_discount(discount);
        }
    }

    pub fn set_tax(&mut self, tax: BigDecimal) {
        if self.editable() {
            self.draft.set_tax(tax);
        }
    }

    pub fn set_other_cost(&mut self, other_cost: BigDecimal) {
        if self.editable() {
            self.draft.set_other_cost(other_cost);
        }
    }

    // ---- 派生读数 ----

    pub fn sub_total(&self) -> BigDecimal {
        self.draft.sub_total()
    }

    pub fn net_total(&self) -> Option<BigDecimal> {
        self.draft.net_total()
    }

    /// 数量超出库存的商品ID列表 (行内警告)
    pub fn stock_warnings(&self) -> Vec<i64> {
        self.draft.items.over_stock()
    }

    /// 当前草稿与原始快照是否存在实质差异 (新增模式恒为 true)
    pub fn is_dirty(&self) -> bool {
        match &self.original {
            Some(snapshot) => snapshot.is_dirty(&self.draft),
            None => true,
        }
    }

    /// 提交按钮是否可用: 校验全部通过 (含编辑模式的脏检测)
    pub fn can_submit(&self) -> bool {
        self.editable()
            && self
                .orchestrator
                .validate(&self.draft, self.original.as_ref())
                .is_ok()
    }

    /// 触发一次提交。成功后丢弃草稿并结束会话;
    /// 被拒绝或结果不明时草稿原样保留, 供修正后重试。
    pub async fn submit(&mut self) -> SubmitPhase {
        if !self.editable() {
            return self.orchestrator.phase();
        }
        let phase = self
            .orchestrator
            .submit(&self.draft, self.original.as_ref())
            .await;
        if phase == SubmitPhase::Succeeded {
            self.draft = WorkingDraft::empty(self.draft.kind());
            self.original = None;
            self.closed = true;
        }
        phase
    }

    /// 用户确认通知后调用
    pub fn acknowledge(&mut self) {
        self.orchestrator.acknowledge();
    }
}
