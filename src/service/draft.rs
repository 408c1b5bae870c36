use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::models::{
    CatalogSnapshot, DocumentKind, DocumentPayload, DraftHeader, PayloadLine, PersistedDocument,
    PurchaseHeader, SalesHeader,
};
use crate::service::line_items::LineItemSet;

/// 工作草稿 - 正在录入或编辑的单据
///
/// 一个录入界面实例独占一份草稿; 离开界面或提交成功后丢弃。
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingDraft {
    pub header: DraftHeader,
    pub items: LineItemSet,
    /// 更新时的单据ID, 新增为空
    pub document_id: Option<i64>,
}

impl WorkingDraft {
    /// 新增模式: 指定类型的空草稿
    pub fn empty(kind: DocumentKind) -> Self {
        Self {
            header: DraftHeader::empty(kind),
            items: LineItemSet::new(),
            document_id: None,
        }
    }

    /// 编辑模式: 从已持久化单据回填草稿
    ///
    /// 明细行按目录快照解析商品; 目录中已不存在的商品无法再核价核库存,
    /// 跳过该行并记录警告。
    pub fn hydrate(doc: &PersistedDocument, catalog: &CatalogSnapshot) -> Self {
        let header = match doc.kind {
            DocumentKind::PurchaseOrder => DraftHeader::Purchase(PurchaseHeader {
                customer_id: Some(doc.customer_id),
                expected_date: Some(doc.date),
                notes: doc.notes.clone(),
            }),
            DocumentKind::SalesRecord => DraftHeader::Sales(SalesHeader {
                customer_id: Some(doc.customer_id),
                date: Some(doc.date),
                discount: doc.discount.clone().unwrap_or_default(),
                tax: doc.tax.clone().unwrap_or_default(),
                other_cost: doc.other_cost.clone().unwrap_or_default(),
                notes: doc.notes.clone(),
            }),
        };

        let mut items = LineItemSet::new();
        for line in &doc.items {
            match catalog.product(line.product_id) {
                Some(p) => items.push_with_amount(p.clone(), line.amount.clone()),
                None => {
                    tracing::warn!(
                        "单据 {} 的商品 {} 已不在目录中, 跳过该明细行",
                        doc.id,
                        line.product_id
                    );
                }
            }
        }

        Self {
            header,
            items,
            document_id: Some(doc.id),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.header.kind()
    }

    // ---- 表头字段写入 ----

    pub fn set_customer(&mut self, customer_id: Option<i64>) {
        match &mut self.header {
            DraftHeader::Purchase(h) => h.customer_id = customer_id,
            DraftHeader::Sales(h) => h.customer_id = customer_id,
        }
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        match &mut self.header {
            DraftHeader::Purchase(h) => h.expected_date = date,
            DraftHeader::Sales(h) => h.date = date,
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        match &mut self.header {
            DraftHeader::Purchase(h) => h.notes = notes.into(),
            DraftHeader::Sales(h) => h.notes = notes.into(),
        }
    }

    /// 折扣 (仅销售记录有此字段, 进货单上是空操作)
    pub fn set_discount(&mut self, discount: BigDecimal) {
        if let DraftHeader::Sales(h) = &mut self.header {
            h.discount = discount;
        }
    }

    pub fn set_tax(&mut self, tax: BigDecimal) {
        if let DraftHeader::Sales(h) = &mut self.header {
            h.tax = tax;
        }
    }

    pub fn set_other_cost(&mut self, other_cost: BigDecimal) {
        if let DraftHeader::Sales(h) = &mut self.header {
            h.other_cost = other_cost;
        }
    }

    // ---- 派生金额 (每次读取现算) ----

    pub fn sub_total(&self) -> BigDecimal {
        self.items.sub_total()
    }

    /// 实收金额 = 小计 - 折扣 + 税 + 其他费用 (允许为负, 原样展示)
    ///
    /// 仅销售记录有此值。
    pub fn net_total(&self) -> Option<BigDecimal> {
        match &self.header {
            DraftHeader::Sales(h) => {
                Some(self.items.sub_total() - &h.discount + &h.tax + &h.other_cost)
            }
            DraftHeader::Purchase(_) => None,
        }
    }

    /// 组装提交载荷。调用前表头必须已通过校验。
    pub(crate) fn to_payload(&self) -> Option<DocumentPayload> {
        let customer = self.header.customer_id()?;
        let date = self.header.date()?;
        let line_items = self
            .items
            .iter()
            .map(|it| PayloadLine {
                product: it.product.id,
                amount: it.amount.clone(),
            })
            .collect();

        let (discount, tax, other_cost, net_total) = match &self.header {
            DraftHeader::Sales(h) => (
                Some(h.discount.clone()),
                Some(h.tax.clone()),
                Some(h.other_cost.clone()),
                self.net_total(),
            ),
            DraftHeader::Purchase(_) => (None, None, None, None),
        };

        Some(DocumentPayload {
            id: self.document_id,
            kind: self.kind(),
            customer,
            date,
            line_items,
            sub_total: self.sub_total(),
            discount,
            tax,
            other_cost,
            net_total,
            notes: self.header.notes().to_string(),
        })
    }
}

/// 原始快照 - 编辑模式加载完成时冻结的表头与明细
///
/// 只用于脏检测, 从不修改。
#[derive(Debug, Clone)]
pub struct OriginalSnapshot {
    header: DraftHeader,
    lines: Vec<SnapshotLine>,
}

#[derive(Debug, Clone, PartialEq)]
struct SnapshotLine {
    product_id: i64,
    amount: BigDecimal,
}

impl OriginalSnapshot {
    /// 在草稿回填完成后立即捕获
    pub fn capture(draft: &WorkingDraft) -> Self {
        Self {
            header: draft.header.clone(),
            lines: draft
                .items
                .iter()
                .map(|it| SnapshotLine {
                    product_id: it.product.id,
                    amount: it.amount.clone(),
                })
                .collect(),
        }
    }

    /// 当前草稿与原始快照是否存在实质差异
    ///
    /// 表头按值比较 (日期按时点); 明细按位置比较: 行数不同,
    /// 或任一位置的商品ID/数量不同即为脏。同一组商品换序也会判脏,
    /// 这是沿用原行为的有意简化。
    pub fn is_dirty(&self, draft: &WorkingDraft) -> bool {
        if draft.header != self.header {
            return true;
        }
        if draft.items.len() != self.lines.len() {
            return true;
        }
        draft
            .items
            .iter()
            .zip(&self.lines)
            .any(|(it, orig)| it.product.id != orig.product_id || it.amount != orig.amount)
    }
}
