use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ValidationError;
use crate::gateway::{DocumentGateway, NavigationSink, NotificationSink};
use crate::models::{Severity, WriteOutcome};
use crate::service::draft::{OriginalSnapshot, WorkingDraft};

/// 写入失败但无结构化原因时展示的兜底文案
pub const CONTACT_ADMIN_MESSAGE: &str = "操作失败, 请联系管理员";

/// 提交状态机
///
/// Idle -> Validating -> Submitting -> { Succeeded | Rejected | Indeterminate },
/// 用户确认通知后回到 Idle。校验不通过直接回到 Idle, 不发起网络调用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Rejected,
    Indeterminate,
}

/// 提交编排器
///
/// 校验表头与明细, 组装载荷, 调用持久化协作者, 并把三种结果
/// 映射为用户可见的通知。所有结果在此终结, 不再向上抛。
pub struct SubmissionOrchestrator {
    store: Arc<dyn DocumentGateway>,
    notifier: Arc<dyn NotificationSink>,
    navigator: Arc<dyn NavigationSink>,
    config: AppConfig,
    phase: SubmitPhase,
}

impl SubmissionOrchestrator {
    pub fn new(
        store: Arc<dyn DocumentGateway>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn NavigationSink>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            navigator,
            config,
            phase: SubmitPhase::Idle,
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// 提交在途期间禁用所有修改入口
    pub fn is_busy(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// 前置校验: 必填表头、非空明细、数量均大于 0;
    /// 编辑模式下还要求与原始快照存在实质差异。
    /// 库存上限默认只做行内提示, 开关打开后升级为硬校验。
    pub fn validate(
        &self,
        draft: &WorkingDraft,
        original: Option<&OriginalSnapshot>,
    ) -> Result<(), ValidationError> {
        if let Some(snapshot) = original {
            if !snapshot.is_dirty(draft) {
                return Err(ValidationError::NoChanges);
            }
        }
        if draft.header.customer_id().is_none() {
            return Err(ValidationError::MissingCustomer);
        }
        if draft.header.date().is_none() {
            return Err(ValidationError::MissingDate);
        }
        if draft.items.is_empty() {
            return Err(ValidationError::EmptyLineItems);
        }
        for item in draft.items.iter() {
            if item.amount <= bigdecimal::BigDecimal::from(0) {
                return Err(ValidationError::NonPositiveAmount {
                    product_name: item.product.name.clone(),
                });
            }
        }
        if self.config.policy.enforce_stock_limit {
            for item in draft.items.iter() {
                if item.exceeds_stock() {
                    return Err(ValidationError::StockExceeded {
                        product_name: item.product.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// 执行一次提交。无自动重试, 无超时, 等待协作者返回。
    pub async fn submit(
        &mut self,
        draft: &WorkingDraft,
        original: Option<&OriginalSnapshot>,
    ) -> SubmitPhase {
        // 1. 校验阶段
        self.phase = SubmitPhase::Validating;
        if let Err(e) = self.validate(draft, original) {
            tracing::warn!("提交校验不通过: {}", e);
            self.notifier.notify("警告", &e.to_string(), Severity::Warning);
            self.phase = SubmitPhase::Idle;
            return self.phase;
        }

        // 2. 提交阶段 - 载荷在 await 之前组装, 之后的改动不影响在途请求
        self.phase = SubmitPhase::Submitting;
        let Some(payload) = draft.to_payload() else {
            // 校验已保证表头齐全, 此分支仅作兜底
            self.phase = SubmitPhase::Idle;
            return self.phase;
        };
        tracing::info!(
            "提交单据: {:?}, {} 行明细, 小计 {}",
            payload.kind,
            payload.line_items.len(),
            payload.sub_total
        );
        let outcome = self.store.save_document(&payload).await;

        // 3. 结果映射
        self.phase = match outcome {
            WriteOutcome::Success(_) => {
                tracing::info!("单据提交成功");
                self.notifier.notify("成功", "保存成功", Severity::Success);
                self.navigator.navigate(self.config.list_route(payload.kind));
                SubmitPhase::Succeeded
            }
            WriteOutcome::Failure(reason) => {
                tracing::warn!("单据被拒绝: {}", reason);
                // 原因原样展示, 草稿保留待修正
                self.notifier.notify("错误", &reason, Severity::Error);
                SubmitPhase::Rejected
            }
            WriteOutcome::Unknown => {
                tracing::error!("持久化协作者返回不可识别的结果");
                self.notifier
                    .notify("错误", CONTACT_ADMIN_MESSAGE, Severity::Error);
                SubmitPhase::Indeterminate
            }
        };
        self.phase
    }

    /// 用户确认通知后回到待命状态
    pub fn acknowledge(&mut self) {
        self.phase = SubmitPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CatalogSnapshot, Customer, DocumentKind, DocumentPayload, PersistedDocument, Product,
    };
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use std::sync::Mutex;

    struct FixedStore {
        outcome: WriteOutcome,
        calls: Mutex<Vec<DocumentPayload>>,
    }

    impl FixedStore {
        fn new(outcome: WriteOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl DocumentGateway for FixedStore {
        async fn fetch_document(
            &self,
            _kind: DocumentKind,
            _id: i64,
        ) -> Result<PersistedDocument, crate::error::EngineError> {
            unimplemented!("这些用例不拉取单据")
        }

        async fn save_document(&self, payload: &DocumentPayload) -> WriteOutcome {
            self.calls.lock().unwrap().push(payload.clone());
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<(String, String, Severity)>>,
    }

    impl NotificationSink for RecordingNotifier {
        fn notify(&self, title: &str, message: &str, severity: Severity) {
            self.notices
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string(), severity));
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<String>>,
    }

    impl NavigationSink for RecordingNavigator {
        fn navigate(&self, route: &str) {
            self.routes.lock().unwrap().push(route.to_string());
        }
    }

    fn product(id: i64, price: i64, count: i64) -> Product {
        Product {
            id,
            name: format!("商品{}", id),
            code: format!("P{:04}", id),
            size: "箱".to_string(),
            unit_price: BigDecimal::from(price),
            count,
            active: true,
        }
    }

    fn valid_draft() -> WorkingDraft {
        let mut draft = WorkingDraft::empty(DocumentKind::PurchaseOrder);
        draft.set_customer(Some(9));
        draft.set_date(chrono::NaiveDate::from_ymd_opt(2026, 9, 1));
        draft.items.add(product(1, 100, 10));
        draft.items.set_amount(0, "3");
        draft
    }

    fn orchestrator(
        store: Arc<FixedStore>,
        config: AppConfig,
    ) -> (
        SubmissionOrchestrator,
        Arc<RecordingNotifier>,
        Arc<RecordingNavigator>,
    ) {
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let orch = SubmissionOrchestrator::new(
            store,
            notifier.clone() as Arc<dyn NotificationSink>,
            navigator.clone() as Arc<dyn NavigationSink>,
            config,
        );
        (orch, notifier, navigator)
    }

    #[tokio::test]
    async fn empty_line_items_block_submission_without_network_call() {
        let store = FixedStore::new(WriteOutcome::Unknown);
        let (mut orch, notifier, _) = orchestrator(store.clone(), AppConfig::default());

        let mut draft = WorkingDraft::empty(DocumentKind::PurchaseOrder);
        draft.set_customer(Some(9));
        draft.set_date(chrono::NaiveDate::from_ymd_opt(2026, 9, 1));

        let phase = orch.submit(&draft, None).await;
        assert_eq!(phase, SubmitPhase::Idle);
        assert!(store.calls.lock().unwrap().is_empty());
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].2, Severity::Warning);
    }

    #[tokio::test]
    async fn zero_amount_blocks_submission() {
        let store = FixedStore::new(WriteOutcome::Unknown);
        let (mut orch, _, _) = orchestrator(store.clone(), AppConfig::default());

        let mut draft = valid_draft();
        draft.items.set_amount(0, "0");
        let phase = orch.submit(&draft, None).await;
        assert_eq!(phase, SubmitPhase::Idle);
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn over_stock_passes_by_default_but_gates_when_enforced() {
        let mut draft = valid_draft();
        draft.items.set_amount(0, "999"); // 库存只有 10

        // 默认策略: 仅提示, 提交照常发出
        let store = FixedStore::new(WriteOutcome::Success(serde_json::json!({"id": 1})));
        let (mut orch, _, _) = orchestrator(store.clone(), AppConfig::default());
        assert_eq!(orch.submit(&draft, None).await, SubmitPhase::Succeeded);
        assert_eq!(store.calls.lock().unwrap().len(), 1);

        // 开关打开: 升级为硬校验
        let mut config = AppConfig::default();
        config.policy.enforce_stock_limit = true;
        let store = FixedStore::new(WriteOutcome::Success(serde_json::json!({"id": 1})));
        let (mut orch, _, _) = orchestrator(store.clone(), config);
        assert_eq!(orch.submit(&draft, None).await, SubmitPhase::Idle);
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_notifies_and_navigates_to_listing() {
        let store = FixedStore::new(WriteOutcome::Success(serde_json::json!({"id": 7})));
        let (mut orch, notifier, navigator) = orchestrator(store.clone(), AppConfig::default());

        let draft = valid_draft();
        let phase = orch.submit(&draft, None).await;
        assert_eq!(phase, SubmitPhase::Succeeded);
        assert_eq!(store.calls.lock().unwrap().len(), 1);
        assert_eq!(navigator.routes.lock().unwrap().as_slice(), ["/order/list"]);
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices[0].2, Severity::Success);

        orch.acknowledge();
        assert_eq!(orch.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn rejection_surfaces_reason_verbatim_without_navigation() {
        let store = FixedStore::new(WriteOutcome::Failure("Customer inactive".to_string()));
        let (mut orch, notifier, navigator) = orchestrator(store, AppConfig::default());

        let phase = orch.submit(&valid_draft(), None).await;
        assert_eq!(phase, SubmitPhase::Rejected);
        assert!(navigator.routes.lock().unwrap().is_empty());
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices[0].1, "Customer inactive");
        assert_eq!(notices[0].2, Severity::Error);
    }

    #[tokio::test]
    async fn unknown_outcome_shows_contact_admin_message() {
        let store = FixedStore::new(WriteOutcome::Unknown);
        let (mut orch, notifier, navigator) = orchestrator(store, AppConfig::default());

        let phase = orch.submit(&valid_draft(), None).await;
        assert_eq!(phase, SubmitPhase::Indeterminate);
        assert!(navigator.routes.lock().unwrap().is_empty());
        let notices = notifier.notices.lock().unwrap();
        assert_eq!(notices[0].1, CONTACT_ADMIN_MESSAGE);
    }

    #[tokio::test]
    async fn clean_edit_draft_cannot_be_submitted() {
        let catalog = CatalogSnapshot::new(
            vec![product(1, 100, 10)],
            vec![Customer {
                id: 9,
                name: "客户九".to_string(),
                active: true,
            }],
        );
        let doc = PersistedDocument {
            id: 1,
            kind: DocumentKind::PurchaseOrder,
            customer_id: 9,
            date: chrono::NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            discount: None,
            tax: None,
            other_cost: None,
            notes: String::new(),
            items: vec![crate::models::PersistedLine {
                product_id: 1,
                amount: BigDecimal::from(3),
            }],
        };
        let draft = WorkingDraft::hydrate(&doc, &catalog);
        let snapshot = OriginalSnapshot::capture(&draft);

        let store = FixedStore::new(WriteOutcome::Success(serde_json::json!({})));
        let (mut orch, _, _) = orchestrator(store.clone(), AppConfig::default());
        let phase = orch.submit(&draft, Some(&snapshot)).await;
        assert_eq!(phase, SubmitPhase::Idle);
        assert!(store.calls.lock().unwrap().is_empty());
    }
}
