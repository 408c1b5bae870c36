use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::Product;

/// 单据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    PurchaseOrder,
    SalesRecord,
}

/// 单据明细行 - 商品 + 数量 + 行金额
///
/// 不变式: line_total 始终等于 product.unit_price * amount,
/// 任何修改数量的入口都必须经过 [`LineItem::set_amount`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub amount: BigDecimal,
    pub line_total: BigDecimal,
}

impl LineItem {
    /// 新选中的商品, 数量从 0 开始
    pub fn new(product: Product) -> Self {
        Self {
            product,
            amount: BigDecimal::zero(),
            line_total: BigDecimal::zero(),
        }
    }

    /// 写入数量并重算行金额 (负数在上层已归一为 0)
    pub fn set_amount(&mut self, amount: BigDecimal) {
        self.line_total = &self.product.unit_price * &amount;
        self.amount = amount;
    }

    /// 数量是否超出库存 (仅提示, 不在此处拦截)
    pub fn exceeds_stock(&self) -> bool {
        self.amount > BigDecimal::from(self.product.count)
    }
}

/// 进货单表头
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseHeader {
    pub customer_id: Option<i64>,
    pub expected_date: Option<NaiveDate>,
    pub notes: String,
}

/// 销售记录表头
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesHeader {
    pub customer_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub discount: BigDecimal,
    pub tax: BigDecimal,
    pub other_cost: BigDecimal,
    pub notes: String,
}

impl Default for SalesHeader {
    fn default() -> Self {
        Self {
            customer_id: None,
            date: None,
            discount: BigDecimal::zero(),
            tax: BigDecimal::zero(),
            other_cost: BigDecimal::zero(),
            notes: String::new(),
        }
    }
}

/// 单据表头 - 按单据类型区分字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DraftHeader {
    Purchase(PurchaseHeader),
    Sales(SalesHeader),
}

impl DraftHeader {
    /// 对应类型的空表头
    pub fn empty(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::PurchaseOrder => Self::Purchase(PurchaseHeader::default()),
            DocumentKind::SalesRecord => Self::Sales(SalesHeader::default()),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Purchase(_) => DocumentKind::PurchaseOrder,
            Self::Sales(_) => DocumentKind::SalesRecord,
        }
    }

    pub fn customer_id(&self) -> Option<i64> {
        match self {
            Self::Purchase(h) => h.customer_id,
            Self::Sales(h) => h.customer_id,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Purchase(h) => h.expected_date,
            Self::Sales(h) => h.date,
        }
    }

    pub fn notes(&self) -> &str {
        match self {
            Self::Purchase(h) => &h.notes,
            Self::Sales(h) => &h.notes,
        }
    }
}

/// 已持久化单据的明细行 (外部查询返回, 只带商品ID和数量)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedLine {
    pub product_id: i64,
    pub amount: BigDecimal,
}

/// 已持久化单据 - 编辑模式打开界面时由外部协作者提供
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub id: i64,
    pub kind: DocumentKind,
    pub customer_id: i64,
    pub date: NaiveDate,
    pub discount: Option<BigDecimal>,
    pub tax: Option<BigDecimal>,
    pub other_cost: Option<BigDecimal>,
    pub notes: String,
    pub items: Vec<PersistedLine>,
}
