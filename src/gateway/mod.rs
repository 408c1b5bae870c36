//! 外部协作者边界
//!
//! 目录查询、单据读写、通知与跳转都由宿主界面提供实现,
//! 引擎只依赖这里的 trait。测试用记录型替身实现。

use async_trait::async_trait;

use crate::error::EngineError;
use crate::models::{CatalogSnapshot, DocumentKind, DocumentPayload, PersistedDocument, Severity, WriteOutcome};

/// 目录查询 - 返回界面生命周期内使用的商品/客户快照
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// only_active 为 true 时仅返回在售商品和有效客户
    async fn fetch_catalog(&self, only_active: bool) -> Result<CatalogSnapshot, EngineError>;
}

/// 单据读写
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// 编辑模式按ID拉取已持久化单据
    async fn fetch_document(
        &self,
        kind: DocumentKind,
        id: i64,
    ) -> Result<PersistedDocument, EngineError>;

    /// 新增或更新单据。实现方必须把传输异常和无法识别的响应
    /// 归一为 [`WriteOutcome::Unknown`], 此调用本身不返回 Err。
    async fn save_document(&self, payload: &DocumentPayload) -> WriteOutcome;
}

/// 通知出口 - 只发不收
pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, message: &str, severity: Severity);
}

/// 跳转出口 - 仅在写入成功后调用
pub trait NavigationSink: Send + Sync {
    fn navigate(&self, route: &str);
}
