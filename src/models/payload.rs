use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::document::DocumentKind;

/// 提交载荷中的明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadLine {
    pub product: i64,
    pub amount: BigDecimal,
}

/// 单据提交载荷 (新增或更新)
///
/// 在进入提交阶段时一次性组装, 之后草稿的任何改动都不再影响在途请求。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    /// 更新时携带单据ID, 新增时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub kind: DocumentKind,
    pub customer: i64,
    pub date: NaiveDate,
    pub line_items: Vec<PayloadLine>,
    pub sub_total: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<BigDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<BigDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_cost: Option<BigDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_total: Option<BigDecimal>,
    pub notes: String,
}
